mod content;
mod telemetry;

pub use content::RestContentClient;
pub use telemetry::RestTelemetryClient;

/// Connection settings shared by the REST clients.
#[derive(Clone, Debug)]
pub struct RestConfig {
    pub base_url: String,
}

impl RestConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Joins a path onto the base URL without doubling slashes.
    #[must_use]
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
