#![forbid(unsafe_code)]

pub mod error;
pub mod match_flow;
pub mod outbox;
pub mod session_controller;

pub use lesson_core::Clock;

pub use error::SessionServiceError;
pub use match_flow::MatchFlow;
pub use outbox::TelemetryOutbox;
pub use session_controller::SessionController;
