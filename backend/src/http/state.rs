//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::SubstanceRepository;
use crate::services::TimelineOptions;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Substance data used for every timeline request
    pub repository: Arc<dyn SubstanceRepository>,
    /// Tuning applied to every computed timeline
    pub options: TimelineOptions,
}

impl AppState {
    /// Create a new application state with default timeline options.
    pub fn new(repository: Arc<dyn SubstanceRepository>) -> Self {
        Self {
            repository,
            options: TimelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TimelineOptions) -> Self {
        self.options = options;
        self
    }
}
