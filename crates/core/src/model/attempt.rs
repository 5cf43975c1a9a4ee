use chrono::Duration;

use crate::model::ids::{ModuleId, QuestionId};
use crate::model::module::DifficultyLevel;
use crate::model::question::QuestionKind;

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A learner's answer to the current question.
///
/// Choice questions carry the selected option text; matching questions carry
/// the completion signal forwarded from the match board (fully solved or
/// abandoned wrong).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Option(String),
    MatchOutcome(bool),
}

impl Answer {
    #[must_use]
    pub fn option(text: impl Into<String>) -> Self {
        Answer::Option(text.into())
    }
}

//
// ─── ATTEMPT RECORD ────────────────────────────────────────────────────────────
//

/// Per-question outcome handed to the telemetry emitter.
///
/// Produced exactly once per answered question; the session keeps only the
/// running score/streak aggregates, not a history of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub module_id: ModuleId,
    pub question_id: QuestionId,
    pub question_kind: QuestionKind,
    pub difficulty: DifficultyLevel,
    pub is_correct: bool,
    /// Time from the question becoming current to the answer, clamped >= 0.
    pub response_time: Duration,
    /// Time to the learner's first interaction, clamped to [0, response_time].
    pub hesitation: Duration,
}
