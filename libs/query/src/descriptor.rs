//! The filter descriptor handed to a store's find-many call.
//!
//! Serializes to the familiar ORM argument shape:
//!
//! ```text
//! { "select": {..}, "where": { "AND": [..] }, "orderBy": {..},
//!   "cursor": { "id": n }, "skip": 1, "take": n }
//! ```
//!
//! Keys for sub-languages that were not used are omitted; `take` is always present.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Structured find-many arguments produced by [`crate::translate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindManyArgs {
    /// Projection: field name -> `true`. `None` means all fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Map<String, JsonValue>>,

    /// Conjunction of filter and search clauses.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<WhereInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,

    /// Row to position on; always paired with `skip: 1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,

    /// Effective page size. Negative values page backwards from the cursor.
    pub take: i64,
}

impl FindManyArgs {
    /// A descriptor that only carries a page size.
    pub fn with_take(take: i64) -> Self {
        Self {
            select: None,
            where_: None,
            order_by: None,
            cursor: None,
            skip: None,
            take,
        }
    }

    /// Names of the selected fields, in request order. Empty when no projection applies.
    pub fn selected_fields(&self) -> impl Iterator<Item = &str> {
        self.select.iter().flat_map(|m| m.keys().map(String::as_str))
    }

    /// Whether `field` appears in the output (always true without a projection).
    pub fn is_selected(&self, field: &str) -> bool {
        self.select.as_ref().map_or(true, |m| m.contains_key(field))
    }

    /// The `AND` clauses, or an empty slice.
    pub fn clauses(&self) -> &[JsonValue] {
        self.where_
            .as_ref()
            .map(|w| w.and.as_slice())
            .unwrap_or(&[])
    }
}

/// `{ "AND": [clause, ...] }`
///
/// Each clause is a nested object ending in an operator object, e.g.
/// `{"name": {"first": {"equals": "john"}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WhereInput {
    #[serde(rename = "AND")]
    pub and: Vec<JsonValue>,
}

/// `{ "id": n }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CursorInput {
    pub id: i64,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Lower-cases `raw` and maps `desc` to [`SortOrder::Desc`]; anything else is ascending.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered field -> direction mapping, serialized as a JSON object.
///
/// Setting a field twice keeps its original position and takes the last direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy(Vec<(String, SortOrder)>);

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, order: SortOrder) {
        let field = field.into();
        match self.0.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = order,
            None => self.0.push((field, order)),
        }
    }

    pub fn get(&self, field: &str) -> Option<SortOrder> {
        self.0.iter().find(|(f, _)| f == field).map(|(_, o)| *o)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortOrder)> {
        self.0.iter().map(|(f, o)| (f.as_str(), *o))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for OrderBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, order) in &self.0 {
            map.serialize_entry(field, order)?;
        }
        map.end()
    }
}
