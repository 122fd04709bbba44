//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::job::JobDispatcher;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap sharing across workers; nothing
/// in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Job dispatcher owning the background pipeline
    pub dispatcher: Arc<JobDispatcher>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, dispatcher: JobDispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }
}
