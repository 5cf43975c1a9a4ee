#![forbid(unsafe_code)]

pub mod content;
pub mod rest;
pub mod telemetry;

pub use content::{ContentError, ContentProvider, InMemoryContent};
pub use rest::{RestConfig, RestContentClient, RestTelemetryClient};
pub use telemetry::{
    AnalyticsEvent, InMemoryTelemetry, ProgressEvent, TelemetryError, TelemetrySink,
};
