use thiserror::Error;

use crate::match_game::MatchConfigError;
use crate::model::{ModuleError, QuestionError};
use crate::session::SessionError;

/// Aggregate error for callers that handle the whole core surface at once.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    MatchConfig(#[from] MatchConfigError),
}
