//! Core storage trait for dashboard entities

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use symon_query::FindManyArgs;

use crate::{models::Entity, Result};

/// Storage collaborator behind the list/read/create endpoints.
///
/// Any backend (in-memory, SQL, HTTP proxy) can implement this trait. Records
/// are JSON objects with an integer `id`.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Return the records matching a find-many descriptor
    ///
    /// # Errors
    /// * `UnknownField` - a `select`, `where` or `orderBy` key is not a field of `entity`
    /// * `UnknownOperator` - a `where` clause uses an operator the store does not support
    async fn find_many(&self, entity: Entity, args: &FindManyArgs) -> Result<Vec<JsonValue>>;

    /// Read one record by id
    ///
    /// # Returns
    /// * `Ok(Some(record))` - record found
    /// * `Ok(None)` - no record with that id
    async fn find_unique(&self, entity: Entity, id: i64) -> Result<Option<JsonValue>>;

    /// Insert a record, assigning `id`, `createdAt` and `updatedAt`
    async fn create(&self, entity: Entity, data: JsonValue) -> Result<JsonValue>;
}
