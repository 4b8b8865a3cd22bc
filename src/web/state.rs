//! Application state shared across handlers

use crate::backend::ElasticBackend;
use crate::config::Settings;
use crate::search::Searcher;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search orchestrator
    pub searcher: Arc<Searcher>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let backend = Arc::new(ElasticBackend::new(&settings.backend)?);
        let searcher = Arc::new(Searcher::new(backend));

        Ok(Self {
            settings: Arc::new(settings),
            searcher,
        })
    }
}
