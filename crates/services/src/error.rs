//! Shared error types for the services crate.

use thiserror::Error;

use backend::ContentError;
use lesson_core::session::SessionError;

/// Errors emitted by `SessionController`.
///
/// Telemetry failures never appear here: emission is fire-and-forget and
/// recovered inside the outbox.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionServiceError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
