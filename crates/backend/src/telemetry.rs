use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use lesson_core::model::{AttemptRecord, LearnerId, ModuleId, QuestionId};

/// Errors surfaced by the telemetry service.
///
/// These are always recovered locally: emission is best-effort and a failure
/// must never reach the learner-facing session flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("telemetry request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

//
// ─── WIRE RECORDS ──────────────────────────────────────────────────────────────
//

/// Progress record for one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub module_id: ModuleId,
    pub question_id: QuestionId,
    pub is_correct: bool,
    /// Whole seconds, clamped to a minimum of 1 so downstream aggregation
    /// never sees zero-duration answers.
    pub time_taken_seconds: u32,
}

impl ProgressEvent {
    /// Builds the progress record from a session attempt.
    #[must_use]
    pub fn from_attempt(attempt: &AttemptRecord) -> Self {
        let seconds = attempt.response_time.num_seconds().max(1);
        Self {
            module_id: attempt.module_id,
            question_id: attempt.question_id,
            is_correct: attempt.is_correct,
            time_taken_seconds: u32::try_from(seconds).unwrap_or(u32::MAX),
        }
    }
}

/// Analytics record for one answered question, millisecond resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub module_id: ModuleId,
    pub question_id: QuestionId,
    pub question_type: &'static str,
    pub difficulty_level: u8,
    pub is_correct: bool,
    pub duration_ms: u64,
    pub hesitation_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AnalyticsEvent {
    /// Builds the analytics record from a session attempt.
    ///
    /// Durations are clamped to >= 0 milliseconds; the attempt already
    /// guarantees hesitation <= duration.
    #[must_use]
    pub fn from_attempt(attempt: &AttemptRecord, timestamp: Option<DateTime<Utc>>) -> Self {
        let clamp_ms = |ms: i64| u64::try_from(ms.max(0)).unwrap_or(0);
        Self {
            module_id: attempt.module_id,
            question_id: attempt.question_id,
            question_type: attempt.question_kind.as_str(),
            difficulty_level: attempt.difficulty.value(),
            is_correct: attempt.is_correct,
            duration_ms: clamp_ms(attempt.response_time.num_milliseconds()),
            hesitation_ms: clamp_ms(attempt.hesitation.num_milliseconds()),
            timestamp,
        }
    }
}

//
// ─── SINK ──────────────────────────────────────────────────────────────────────
//

/// Write-only contract for the remote telemetry service.
///
/// Records are addressed by learner id. Callers emit in answer order but
/// must not assume the service observes them in that order.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Report a progress record.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError` on transport failure.
    async fn record_progress(
        &self,
        learner: LearnerId,
        event: ProgressEvent,
    ) -> Result<(), TelemetryError>;

    /// Report an analytics record.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError` on transport failure.
    async fn record_analytics(
        &self,
        learner: LearnerId,
        event: AnalyticsEvent,
    ) -> Result<(), TelemetryError>;
}

/// In-memory sink capturing records in arrival order, for tests.
#[derive(Clone, Default)]
pub struct InMemoryTelemetry {
    progress: Arc<Mutex<Vec<(LearnerId, ProgressEvent)>>>,
    analytics: Arc<Mutex<Vec<(LearnerId, AnalyticsEvent)>>>,
}

impl InMemoryTelemetry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress records received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned (test helper).
    #[must_use]
    pub fn progress_events(&self) -> Vec<(LearnerId, ProgressEvent)> {
        self.progress.lock().expect("telemetry store poisoned").clone()
    }

    /// Analytics records received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned (test helper).
    #[must_use]
    pub fn analytics_events(&self) -> Vec<(LearnerId, AnalyticsEvent)> {
        self.analytics.lock().expect("telemetry store poisoned").clone()
    }
}

#[async_trait]
impl TelemetrySink for InMemoryTelemetry {
    async fn record_progress(
        &self,
        learner: LearnerId,
        event: ProgressEvent,
    ) -> Result<(), TelemetryError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| TelemetryError::Connection(e.to_string()))?;
        guard.push((learner, event));
        Ok(())
    }

    async fn record_analytics(
        &self,
        learner: LearnerId,
        event: AnalyticsEvent,
    ) -> Result<(), TelemetryError> {
        let mut guard = self
            .analytics
            .lock()
            .map_err(|e| TelemetryError::Connection(e.to_string()))?;
        guard.push((learner, event));
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
