use std::sync::Arc;

use backend::{AnalyticsEvent, ContentProvider, ProgressEvent};
use lesson_core::model::{Answer, AttemptRecord, LearnerId, ModuleId};
use lesson_core::session::{AdvanceOutcome, LearningSession};
use lesson_core::time::Clock;

use crate::error::SessionServiceError;
use crate::outbox::TelemetryOutbox;

/// Orchestrates learning sessions against the backend services.
///
/// Loads modules through the content provider, stamps session events with
/// its clock, and forwards each answered question to the telemetry outbox
/// when a learner identity is present. Telemetry is never awaited here: the
/// learner can advance before any network round-trip completes.
pub struct SessionController {
    clock: Clock,
    content: Arc<dyn ContentProvider>,
    outbox: TelemetryOutbox,
}

impl SessionController {
    #[must_use]
    pub fn new(clock: Clock, content: Arc<dyn ContentProvider>, outbox: TelemetryOutbox) -> Self {
        Self {
            clock,
            content,
            outbox,
        }
    }

    /// Current time according to the controller's clock.
    #[must_use]
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Fetches a module and starts a session on it.
    ///
    /// A missing learner identity is not an error; the session proceeds and
    /// telemetry emission is skipped, which the summary later flags.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Content` when the module cannot be
    /// fetched and `SessionServiceError::Session` when it has no questions.
    pub async fn load_module(
        &self,
        module_id: ModuleId,
        learner: Option<LearnerId>,
    ) -> Result<LearningSession, SessionServiceError> {
        let module = self.content.module_by_id(module_id).await?;
        Ok(LearningSession::start(module, learner, self.clock.now())?)
    }

    /// Forwards a first-interaction event to the session's timer.
    pub fn mark_interaction(&self, session: &mut LearningSession) {
        session.mark_interaction(self.clock.now());
    }

    /// Submits an answer and queues its telemetry records.
    ///
    /// Duplicate submissions return `None` and emit nothing. Emission is
    /// fire-and-forget: a failed save is logged by the outbox and never
    /// rolls back score or streak.
    pub fn submit_answer(
        &self,
        session: &mut LearningSession,
        answer: &Answer,
    ) -> Option<AttemptRecord> {
        let now = self.clock.now();
        let record = session.submit_answer(answer, now)?;

        if let Some(learner) = session.learner() {
            self.outbox.enqueue(
                learner,
                ProgressEvent::from_attempt(&record),
                AnalyticsEvent::from_attempt(&record, Some(now)),
            );
        }
        Some(record)
    }

    /// Moves to the next question or the summary.
    pub fn advance(&self, session: &mut LearningSession) -> Option<AdvanceOutcome> {
        session.advance(self.clock.now())
    }

    /// Restarts a summarized session from question 0.
    pub fn restart(&self, session: &mut LearningSession) {
        session.restart(self.clock.now());
    }

    /// Shuts down the telemetry outbox, waiting for queued records.
    pub async fn close(self) {
        self.outbox.close().await;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
