//! In-memory entity store
//!
//! Records live in per-entity `BTreeMap`s keyed by id, so the base iteration
//! order is insertion order. `find_many` applies a descriptor in the same
//! order a relational backend would: filter, sort, position on the cursor,
//! skip, take, then project.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue};
use symon_query::FindManyArgs;
use tokio::sync::RwLock;

use super::predicate::{compare_records, matches, validate_clause};
use super::traits::EntityStore;
use crate::{models::Entity, Error, Result};

#[derive(Debug, Default)]
struct Collection {
    next_id: i64,
    records: BTreeMap<i64, JsonValue>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Entity, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored for `entity`.
    pub async fn count(&self, entity: Entity) -> usize {
        self.collections
            .read()
            .await
            .get(&entity)
            .map_or(0, |c| c.records.len())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_many(&self, entity: Entity, args: &FindManyArgs) -> Result<Vec<JsonValue>> {
        check_fields(entity, args)?;

        let collections = self.collections.read().await;
        let Some(collection) = collections.get(&entity) else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        for record in collection.records.values() {
            if matches_all(record, args.clauses())? {
                rows.push(record);
            }
        }

        if let Some(order_by) = args.order_by.as_ref().filter(|o| !o.is_empty()) {
            rows.sort_by(|a, b| compare_records(a, b, order_by));
        }

        let Some(window) = page_window(&rows, args) else {
            return Ok(Vec::new());
        };

        Ok(rows[window]
            .iter()
            .map(|record| project(record, args))
            .collect())
    }

    async fn find_unique(&self, entity: Entity, id: i64) -> Result<Option<JsonValue>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&entity)
            .and_then(|c| c.records.get(&id))
            .cloned())
    }

    async fn create(&self, entity: Entity, data: JsonValue) -> Result<JsonValue> {
        let JsonValue::Object(fields) = data else {
            return Err(Error::Validation(format!(
                "{entity} record must be a JSON object"
            )));
        };

        let mut collections = self.collections.write().await;
        let collection = collections.entry(entity).or_default();
        collection.next_id += 1;
        let id = collection.next_id;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut record = Map::new();
        record.insert("id".to_string(), JsonValue::from(id));
        record.extend(fields.into_iter().filter(|(k, _)| k != "id"));
        record.insert("createdAt".to_string(), JsonValue::String(now.clone()));
        record.insert("updatedAt".to_string(), JsonValue::String(now));

        let record = JsonValue::Object(record);
        collection.records.insert(id, record.clone());
        tracing::debug!(entity = %entity, id, "Record created");
        Ok(record)
    }
}

fn check_fields(entity: Entity, args: &FindManyArgs) -> Result<()> {
    let unknown = |field: &str| Error::UnknownField {
        entity: entity.collection(),
        field: field.to_string(),
    };

    if let Some(field) = args.selected_fields().find(|f| !entity.has_field(f)) {
        return Err(unknown(field));
    }
    if let Some(order_by) = &args.order_by {
        if let Some((field, _)) = order_by.iter().find(|(f, _)| !entity.has_field(f)) {
            return Err(unknown(field));
        }
    }
    for clause in args.clauses() {
        validate_clause(entity, clause)?;
    }
    Ok(())
}

fn matches_all(record: &JsonValue, clauses: &[JsonValue]) -> Result<bool> {
    for clause in clauses {
        if !matches(record, clause)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Index range of the page inside the sorted rows. `None` when the cursor
/// row is not part of the result set.
fn page_window(rows: &[&JsonValue], args: &FindManyArgs) -> Option<std::ops::Range<usize>> {
    let skip = args.skip.unwrap_or(0) as usize;
    let take = args.take.unsigned_abs() as usize;

    let anchor = match &args.cursor {
        Some(cursor) => Some(
            rows.iter()
                .position(|r| r.get("id").and_then(JsonValue::as_i64) == Some(cursor.id))?,
        ),
        None => None,
    };

    let range = match args.take.cmp(&0) {
        Ordering::Equal => 0..0,
        Ordering::Greater => {
            let start = (anchor.unwrap_or(0) + skip).min(rows.len());
            start..(start + take).min(rows.len())
        }
        Ordering::Less => {
            let end = anchor.map_or(rows.len(), |a| a + 1).saturating_sub(skip);
            end.saturating_sub(take)..end
        }
    };
    Some(range)
}

fn project(record: &JsonValue, args: &FindManyArgs) -> JsonValue {
    match (&args.select, record) {
        (Some(select), JsonValue::Object(fields)) => JsonValue::Object(
            fields
                .iter()
                .filter(|(k, _)| select.contains_key(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        _ => record.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use symon_query::{CursorInput, OrderBy, SortOrder, WhereInput};

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (name, interval) in [("alpha", 30), ("bravo", 60), ("charlie", 30), ("delta", 10)] {
            store
                .create(
                    Entity::Probe,
                    json!({ "name": name, "interval": interval, "projectId": 1 }),
                )
                .await
                .unwrap();
        }
        store
    }

    fn ids(rows: &[JsonValue]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[tokio::test]
    async fn create_assigns_ids_and_timestamps() {
        let store = MemoryStore::new();
        let first = store
            .create(Entity::Organization, json!({ "name": "acme", "id": 99 }))
            .await
            .unwrap();
        let second = store
            .create(Entity::Organization, json!({ "name": "globex" }))
            .await
            .unwrap();

        assert_eq!(first["id"], 1);
        assert_eq!(second["id"], 2);
        assert!(first["createdAt"].as_str().unwrap().ends_with('Z'));
        assert_eq!(first["createdAt"], first["updatedAt"]);
        assert_eq!(store.count(Entity::Organization).await, 2);
        assert_eq!(store.count(Entity::Probe).await, 0);
    }

    #[tokio::test]
    async fn filter_sort_and_project() {
        let store = seeded().await;
        let mut order_by = OrderBy::new();
        order_by.set("name", SortOrder::Desc);
        let mut select = Map::new();
        select.insert("name".into(), JsonValue::Bool(true));

        let args = FindManyArgs {
            select: Some(select),
            where_: Some(WhereInput {
                and: vec![json!({ "interval": { "lte": 30 } })],
            }),
            order_by: Some(order_by),
            ..FindManyArgs::with_take(10)
        };

        let rows = store.find_many(Entity::Probe, &args).await.unwrap();
        assert_eq!(
            rows,
            vec![
                json!({ "name": "delta" }),
                json!({ "name": "charlie" }),
                json!({ "name": "alpha" })
            ]
        );
    }

    #[tokio::test]
    async fn sort_is_stable_on_ties() {
        let store = seeded().await;
        let mut order_by = OrderBy::new();
        order_by.set("interval", SortOrder::Asc);
        let args = FindManyArgs {
            order_by: Some(order_by),
            ..FindManyArgs::with_take(10)
        };

        let rows = store.find_many(Entity::Probe, &args).await.unwrap();
        assert_eq!(ids(&rows), vec![4, 1, 3, 2]);
    }

    #[tokio::test]
    async fn cursor_pages_forward_and_backward() {
        let store = seeded().await;
        let forward = FindManyArgs {
            cursor: Some(CursorInput { id: 2 }),
            skip: Some(1),
            ..FindManyArgs::with_take(2)
        };
        let rows = store.find_many(Entity::Probe, &forward).await.unwrap();
        assert_eq!(ids(&rows), vec![3, 4]);

        let backward = FindManyArgs {
            take: -2,
            ..forward.clone()
        };
        let rows = store
            .find_many(
                Entity::Probe,
                &FindManyArgs {
                    cursor: Some(CursorInput { id: 4 }),
                    ..backward
                },
            )
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![2, 3]);
    }

    #[tokio::test]
    async fn unknown_cursor_and_zero_take_return_nothing() {
        let store = seeded().await;
        let missing = FindManyArgs {
            cursor: Some(CursorInput { id: 42 }),
            skip: Some(1),
            ..FindManyArgs::with_take(10)
        };
        assert!(store.find_many(Entity::Probe, &missing).await.unwrap().is_empty());
        assert!(store
            .find_many(Entity::Probe, &FindManyArgs::with_take(0))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn negative_take_without_cursor_returns_the_tail() {
        let store = seeded().await;
        let rows = store
            .find_many(Entity::Probe, &FindManyArgs::with_take(-3))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let store = seeded().await;
        let mut order_by = OrderBy::new();
        order_by.set("colour", SortOrder::Asc);
        let args = FindManyArgs {
            order_by: Some(order_by),
            ..FindManyArgs::with_take(10)
        };

        let err = store.find_many(Entity::Probe, &args).await.unwrap_err();
        assert!(matches!(err, Error::UnknownField { field, .. } if field == "colour"));
    }
}
