//! Application state for the payroll API.

use std::sync::Arc;

use crate::config::{ConfigLoader, PolicyMetadata};
use crate::engine::PayrollEngine;

/// Shared application state.
///
/// Holds the engine built from the loaded policy. Handlers only read it;
/// every request performs its own run.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PayrollEngine>,
    metadata: Arc<PolicyMetadata>,
}

impl AppState {
    /// Creates the application state from a loaded policy directory.
    pub fn new(config: ConfigLoader) -> Self {
        let metadata = config.metadata().clone();
        Self {
            engine: Arc::new(PayrollEngine::new(config.into_policy())),
            metadata: Arc::new(metadata),
        }
    }

    /// Returns the payroll engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }

    /// Returns the metadata of the loaded policy.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }
}
