use async_trait::async_trait;
use reqwest::Client;

use lesson_core::model::LearnerId;

use super::RestConfig;
use crate::telemetry::{AnalyticsEvent, ProgressEvent, TelemetryError, TelemetrySink};

/// REST adapter for the telemetry service.
///
/// Progress and analytics land on separate endpoints, both addressed by the
/// learner id in the path.
#[derive(Clone)]
pub struct RestTelemetryClient {
    client: Client,
    config: RestConfig,
}

impl RestTelemetryClient {
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn post<T: serde::Serialize + Sync>(
        &self,
        path: String,
        payload: &T,
    ) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(self.config.endpoint(&path))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelemetryError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySink for RestTelemetryClient {
    async fn record_progress(
        &self,
        learner: LearnerId,
        event: ProgressEvent,
    ) -> Result<(), TelemetryError> {
        self.post(format!("progress/children/{learner}/events"), &event)
            .await
    }

    async fn record_analytics(
        &self,
        learner: LearnerId,
        event: AnalyticsEvent,
    ) -> Result<(), TelemetryError> {
        self.post(format!("analytics/track/{learner}"), &event)
            .await
    }
}
