#![forbid(unsafe_code)]

pub mod error;
pub mod match_game;
pub mod model;
pub mod session;
pub mod time;
pub mod timing;

pub use error::Error;
pub use time::Clock;

pub use match_game::{
    BoardItem, CompletionHandle, CooldownHandle, ItemVisibility, MatchBoard, MatchConfigError,
    SelectOutcome, Side, COMPLETION_DELAY_MS, MISMATCH_COOLDOWN_MS,
};
pub use session::{
    AdvanceOutcome, LearningSession, SessionError, SessionPhase, SessionProgress,
    REWARD_PER_QUESTION,
};
pub use timing::QuestionTimer;
