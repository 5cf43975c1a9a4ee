mod attempt;
mod ids;
mod module;
mod question;
mod summary;

pub use ids::{LearnerId, ModuleId, ParseIdError, QuestionId};

pub use attempt::{Answer, AttemptRecord};
pub use module::{DifficultyLevel, Module, ModuleCategory, ModuleError};
pub use question::{MatchPair, Question, QuestionBody, QuestionError, QuestionKind};
pub use summary::{Rating, SessionSummary};
