//! Entity service - single-record reads and creates

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::{
    db::EntityStore,
    models::{Entity, NewRecord},
    Error, Result,
};

pub struct EntityService {
    store: Arc<dyn EntityStore>,
}

impl EntityService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, entity: Entity, id: i64) -> Result<JsonValue> {
        self.store
            .find_unique(entity, id)
            .await?
            .ok_or(Error::NotFound {
                entity: entity.collection(),
                id,
            })
    }

    /// Validate `body` and insert it. The parent record (organization for a
    /// project, project for a probe) must already exist.
    pub async fn create(&self, entity: Entity, body: JsonValue) -> Result<JsonValue> {
        let record = NewRecord::parse(entity, body)?;

        if let Some((parent, parent_id)) = record.parent() {
            if self.store.find_unique(parent, parent_id).await?.is_none() {
                return Err(Error::Validation(format!(
                    "Referenced {parent}/{parent_id} does not exist"
                )));
            }
        }

        let created = self.store.create(entity, record.into_json()?).await?;
        tracing::info!(entity = %entity, id = %created["id"], "Created record");
        Ok(created)
    }
}
