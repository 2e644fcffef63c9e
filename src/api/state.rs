use std::sync::Arc;

use crate::config::Config;
use crate::observability::Metrics;
use crate::shortener::Shortener;
use crate::storage::StorageClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub shortener: Arc<Shortener>,
    pub storage: Arc<StorageClient>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, shortener: Shortener, storage: Arc<StorageClient>) -> Self {
        Self {
            config: Arc::new(config),
            shortener: Arc::new(shortener),
            storage,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
