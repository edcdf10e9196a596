//! Shared application state

use std::sync::Arc;

use crate::{
    config::Config,
    db::{EntityStore, MemoryStore},
    services::{EntityService, ListService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub list_service: Arc<ListService>,
    pub entity_service: Arc<EntityService>,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn EntityStore>) -> Self {
        let translator = config.query.translator();
        tracing::debug!(
            default_take = translator.default_take(),
            max_take = ?translator.max_take(),
            "Query translator configured"
        );

        Self {
            list_service: Arc::new(ListService::new(store.clone(), translator)),
            entity_service: Arc::new(EntityService::new(store)),
            config: Arc::new(config),
        }
    }
}
