use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use lesson_core::model::{Module, ModuleId};

/// Errors surfaced by the content service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("module not found")]
    NotFound,

    #[error("invalid module payload: {0}")]
    Invalid(String),

    #[error("content request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Read-only contract for the remote content service.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetch a module, including its questions.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` for unknown ids, or other content
    /// errors for transport/payload failures.
    async fn module_by_id(&self, id: ModuleId) -> Result<Module, ContentError>;
}

/// Simple in-memory content source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryContent {
    modules: Arc<Mutex<HashMap<ModuleId, Module>>>,
}

impl InMemoryContent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers a module so sessions can load it.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Connection` if the store mutex is poisoned.
    pub fn insert(&self, module: Module) -> Result<(), ContentError> {
        let mut guard = self
            .modules
            .lock()
            .map_err(|e| ContentError::Connection(e.to_string()))?;
        guard.insert(module.id(), module);
        Ok(())
    }
}

#[async_trait]
impl ContentProvider for InMemoryContent {
    async fn module_by_id(&self, id: ModuleId) -> Result<Module, ContentError> {
        let guard = self
            .modules
            .lock()
            .map_err(|e| ContentError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(ContentError::NotFound)
    }
}
