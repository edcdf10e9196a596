//! Query arguments -> find-many descriptor

use serde_json::{Map, Value as JsonValue};

use crate::args::QueryArgs;
use crate::descriptor::{CursorInput, FindManyArgs, OrderBy, SortOrder, WhereInput};
use crate::filter::parse_filter;

/// Page size used when `limit` is absent or not an integer.
pub const DEFAULT_TAKE: i64 = 10;

/// Translate query arguments with the default page size and no page cap.
///
/// `searchable_fields` lists the fields `search` is matched against; when it
/// is absent or empty, `search` is ignored.
pub fn translate(searchable_fields: Option<&[&str]>, args: Option<&QueryArgs>) -> FindManyArgs {
    QueryTranslator::default().translate(searchable_fields, args)
}

/// Translator with configurable paging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTranslator {
    default_take: i64,
    max_take: Option<i64>,
}

impl Default for QueryTranslator {
    fn default() -> Self {
        Self {
            default_take: DEFAULT_TAKE,
            max_take: None,
        }
    }
}

impl QueryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size used when `limit` is missing or unparseable.
    pub fn with_default_take(mut self, take: i64) -> Self {
        self.default_take = take;
        self
    }

    /// Clamp page sizes to at most `max` rows in either direction.
    pub fn with_max_take(mut self, max: i64) -> Self {
        self.max_take = Some(max);
        self
    }

    pub fn default_take(&self) -> i64 {
        self.default_take
    }

    pub fn max_take(&self) -> Option<i64> {
        self.max_take
    }

    /// Compile `args` into a descriptor.
    ///
    /// Each sub-language is handled independently; none of them can fail.
    pub fn translate(
        &self,
        searchable_fields: Option<&[&str]>,
        args: Option<&QueryArgs>,
    ) -> FindManyArgs {
        let Some(args) = args else {
            return FindManyArgs::with_take(self.default_take);
        };

        let cursor = args.cursor.as_deref().and_then(parse_cursor);

        FindManyArgs {
            select: args.fields.as_deref().and_then(build_select),
            where_: build_where(
                args.filter.as_deref(),
                args.search.as_deref(),
                searchable_fields.unwrap_or_default(),
            ),
            order_by: args.sort.as_deref().and_then(build_order_by),
            skip: cursor.map(|_| 1),
            cursor,
            take: self.effective_take(args.limit.as_deref()),
        }
    }

    fn effective_take(&self, limit: Option<&str>) -> i64 {
        let requested = match limit {
            None => self.default_take,
            Some(raw) => parse_leading_int(raw).unwrap_or_else(|| {
                tracing::debug!(limit = raw, "Ignoring non-numeric limit");
                self.default_take
            }),
        };

        match self.max_take {
            Some(max) => {
                let bound = max.saturating_abs();
                requested.clamp(-bound, bound)
            }
            None => requested,
        }
    }
}

fn build_select(fields: &str) -> Option<Map<String, JsonValue>> {
    let select: Map<String, JsonValue> = fields
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| (f.to_string(), JsonValue::Bool(true)))
        .collect();

    (!select.is_empty()).then_some(select)
}

fn build_where(
    filter: Option<&str>,
    search: Option<&str>,
    searchable_fields: &[&str],
) -> Option<WhereInput> {
    let mut and = filter.map(parse_filter).unwrap_or_default();

    let search = search.filter(|s| !s.trim().is_empty());
    if let Some(term) = search {
        if searchable_fields.is_empty() {
            tracing::debug!(search = term, "No searchable fields, ignoring search");
        }
        and.extend(
            searchable_fields
                .iter()
                .map(|field| serde_json::json!({ *field: { "contains": term } })),
        );
    }

    (!and.is_empty()).then_some(WhereInput { and })
}

fn build_order_by(sort: &str) -> Option<OrderBy> {
    let mut order_by = OrderBy::new();

    for token in sort.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (field, order) = match token.split_once(' ') {
            Some((field, direction)) => (field, SortOrder::parse_lenient(direction)),
            None => (token, SortOrder::Asc),
        };
        order_by.set(field, order);
    }

    (!order_by.is_empty()).then_some(order_by)
}

/// A cursor that is not an integer is treated as absent.
fn parse_cursor(raw: &str) -> Option<CursorInput> {
    match parse_leading_int(raw) {
        Some(id) => Some(CursorInput { id }),
        None => {
            tracing::debug!(cursor = raw, "Ignoring non-numeric cursor");
            None
        }
    }
}

/// Parse an optionally signed run of leading digits, ignoring whatever follows
/// (`"30"`, `" 30"`, `"30items"` -> 30). Overflow counts as unparseable.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude: i64 = unsigned[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
