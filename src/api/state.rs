use std::sync::Arc;

use crate::{
    config::Config,
    services::CatalogProvider,
    store::{JsonFileRepository, Repository},
};

/// Shared application state
///
/// Collaborators are injected behind trait objects so tests can swap in
/// in-memory or stub implementations.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub catalog_provider: Arc<dyn CatalogProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn Repository>,
        catalog_provider: Arc<dyn CatalogProvider>,
        config: Config,
    ) -> Self {
        Self {
            repository,
            catalog_provider,
            config: Arc::new(config),
        }
    }

    /// State backed by an in-memory repository
    pub fn in_memory(catalog_provider: Arc<dyn CatalogProvider>, config: Config) -> Self {
        Self::new(Arc::new(JsonFileRepository::in_memory()), catalog_provider, config)
    }
}
