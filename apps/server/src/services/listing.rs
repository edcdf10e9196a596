//! Listing service - query-args driven collection reads
//!
//! Translates the five query sub-languages into a find-many descriptor,
//! runs it against the store and works out the cursor for the next page.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use symon_query::{FindManyArgs, QueryArgs, QueryTranslator};

use crate::{db::EntityStore, models::Entity, Result};

/// One page of a collection listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub data: Vec<JsonValue>,
    /// Id to pass as `cursor` to continue in the same direction. `None` on
    /// the last page or when `id` was projected away.
    pub next_cursor: Option<i64>,
}

pub struct ListService {
    store: Arc<dyn EntityStore>,
    translator: QueryTranslator,
}

impl ListService {
    pub fn new(store: Arc<dyn EntityStore>, translator: QueryTranslator) -> Self {
        Self { store, translator }
    }

    /// Build the descriptor for `args` without touching the store.
    pub fn descriptor(&self, entity: Entity, args: &QueryArgs) -> FindManyArgs {
        self.translator
            .translate(Some(entity.searchable_fields()), Some(args))
    }

    pub async fn list(&self, entity: Entity, args: &QueryArgs) -> Result<ListPage> {
        let descriptor = self.descriptor(entity, args);
        tracing::debug!(
            entity = %entity,
            descriptor = %serde_json::to_string(&descriptor).unwrap_or_default(),
            "Listing collection"
        );

        let data = self.store.find_many(entity, &descriptor).await?;
        let next_cursor = next_cursor(&data, descriptor.take);
        Ok(ListPage { data, next_cursor })
    }
}

fn next_cursor(rows: &[JsonValue], take: i64) -> Option<i64> {
    if take == 0 || rows.len() as u64 != take.unsigned_abs() {
        return None;
    }
    let edge = if take > 0 { rows.last() } else { rows.first() };
    edge?.get("id")?.as_i64()
}
