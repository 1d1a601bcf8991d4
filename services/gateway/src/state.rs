use std::sync::Arc;

use matching_engine::MatchingEngine;

use crate::catalog::InstrumentCatalog;

/// Shared application state: the engine registry and the instrument
/// catalog, both fixed after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
    pub catalog: Arc<InstrumentCatalog>,
}

impl AppState {
    pub fn new(engine: MatchingEngine, catalog: InstrumentCatalog) -> Self {
        Self {
            engine: Arc::new(engine),
            catalog: Arc::new(catalog),
        }
    }
}
