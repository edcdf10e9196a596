//! Query-argument translation for list endpoints
//!
//! Every list endpoint accepts the same small query-string language:
//! - `fields`: comma-separated projection (`fields=id,name`)
//! - `filter`: `and`-joined clauses of `<field> <operator> <value>`
//!   (`filter=name[first] equals john and age gte 21`)
//! - `search`: free text matched with `contains` against the endpoint's searchable fields
//! - `sort`: `<field>[ asc|desc]`, comma-separated
//! - `cursor`: integer id to resume after (exclusive)
//! - `limit`: page size (default 10)
//!
//! [`translate`] compiles these into a [`FindManyArgs`] descriptor
//! (`select` / `where` / `orderBy` / `cursor` / `skip` / `take`) that a store's
//! find-many call consumes. Translation never fails: malformed pieces
//! contribute nothing and the page size falls back to [`DEFAULT_TAKE`].
//!
//! ```
//! use symon_query::{translate, QueryArgs};
//! use serde_json::json;
//!
//! let args = QueryArgs {
//!     filter: Some("status equals up and interval gte 30".into()),
//!     sort: Some("name desc".into()),
//!     ..Default::default()
//! };
//!
//! let descriptor = translate(None, Some(&args));
//! assert_eq!(
//!     serde_json::to_value(&descriptor).unwrap(),
//!     json!({
//!         "where": { "AND": [{ "status": { "equals": "up" } }, { "interval": { "gte": 30 } }] },
//!         "orderBy": { "name": "desc" },
//!         "take": 10
//!     })
//! );
//! ```

#![forbid(unsafe_code)]

mod args;
mod descriptor;
mod field_path;
mod filter;
mod translate;

pub use args::QueryArgs;
pub use descriptor::{CursorInput, FindManyArgs, OrderBy, SortOrder, WhereInput};
pub use field_path::{FieldPath, MAX_BRACKET_DEPTH};
pub use filter::{coerce_value, parse_filter, Clause, CLAUSE_SEPARATOR};
pub use translate::{translate, QueryTranslator, DEFAULT_TAKE};
