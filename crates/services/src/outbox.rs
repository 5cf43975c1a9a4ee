use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use backend::{AnalyticsEvent, ProgressEvent, TelemetrySink};
use lesson_core::model::LearnerId;

struct OutboxItem {
    learner: LearnerId,
    progress: ProgressEvent,
    analytics: AnalyticsEvent,
}

/// Fire-and-forget queue between the session flow and the telemetry service.
///
/// The session controller enqueues one progress + one analytics record per
/// answered question; a background task drains the queue in enqueue order so
/// local session logic never blocks on network I/O. A failed send is logged
/// once and dropped, with no retry, so telemetry is never authoritative for
/// local scoring. Records are sent in answer order, but the service may
/// observe them completing out of order.
pub struct TelemetryOutbox {
    tx: mpsc::UnboundedSender<OutboxItem>,
    worker: JoinHandle<()>,
}

impl TelemetryOutbox {
    /// Starts the drain task on the current tokio runtime.
    #[must_use]
    pub fn spawn(sink: Arc<dyn TelemetrySink>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<OutboxItem>();
        let worker = tokio::spawn(async move {
            while let Some(item) = rx.recv().await {
                let OutboxItem {
                    learner,
                    progress,
                    analytics,
                } = item;
                if let Err(err) = sink.record_progress(learner, progress).await {
                    warn!(learner = %learner, error = %err, "failed to save progress record");
                }
                if let Err(err) = sink.record_analytics(learner, analytics).await {
                    warn!(learner = %learner, error = %err, "failed to save analytics record");
                }
            }
        });
        Self { tx, worker }
    }

    /// Queues both records for one answered question.
    pub fn enqueue(&self, learner: LearnerId, progress: ProgressEvent, analytics: AnalyticsEvent) {
        let item = OutboxItem {
            learner,
            progress,
            analytics,
        };
        if self.tx.send(item).is_err() {
            // Drain task is gone; telemetry is best-effort, so just log.
            warn!(learner = %learner, "telemetry outbox closed, dropping records");
        }
    }

    /// Closes the queue and waits for queued records to be sent.
    ///
    /// Mainly for tests and shutdown paths that want deterministic delivery.
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.worker.await;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
