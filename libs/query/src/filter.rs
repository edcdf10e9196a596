//! Filter expression parsing
//!
//! Grammar (a fixed subset, there is no `or`, grouping or precedence):
//!
//! ```text
//! filter := clause (" and " clause)*
//! clause := field WS operator (WS value)?
//! field  := name ("[" segment "]")*
//! ```
//!
//! The value is everything after the operator, rejoined with single spaces, so
//! `city equals Jakarta, Indonesia` keeps its spaces. A value can never contain
//! the literal ` and ` because that always starts a new clause.

use serde_json::{Map, Number, Value as JsonValue};

use crate::field_path::FieldPath;

/// The only boolean combinator understood by the filter grammar.
pub const CLAUSE_SEPARATOR: &str = " and ";

/// One `field operator value` unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause<'a> {
    pub path: FieldPath<'a>,
    pub operator: &'a str,
    pub value: JsonValue,
}

impl<'a> Clause<'a> {
    /// Parse a single clause. Returns `None` when it lacks a field or an
    /// operator, or the operator is not purely alphabetic.
    pub fn parse(clause: &'a str) -> Option<Self> {
        let mut tokens = clause.split_whitespace();
        let field = tokens.next()?;
        let operator = tokens.next()?;

        if !operator.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let path = FieldPath::parse(field)?;
        let raw_value = tokens.collect::<Vec<_>>().join(" ");

        Some(Self {
            path,
            operator,
            value: coerce_value(&raw_value),
        })
    }

    /// `{field: ... {operator: value}}`
    pub fn into_json(self) -> JsonValue {
        let mut leaf = Map::with_capacity(1);
        leaf.insert(self.operator.to_string(), self.value);
        self.path.nest(JsonValue::Object(leaf))
    }
}

/// Parse a whole filter expression into store clauses, in order.
///
/// Clauses that do not parse are dropped.
pub fn parse_filter(expression: &str) -> Vec<JsonValue> {
    expression
        .split(CLAUSE_SEPARATOR)
        .filter_map(|raw| match Clause::parse(raw) {
            Some(clause) => Some(clause.into_json()),
            None => {
                if !raw.trim().is_empty() {
                    tracing::debug!(clause = raw, "Dropping unparseable filter clause");
                }
                None
            }
        })
        .collect()
}

/// Give a textual value its JSON type.
///
/// Order matters: the exact literals `true`, `false` and `null` win over
/// everything, then finite numbers, then the string itself.
pub fn coerce_value(raw: &str) -> JsonValue {
    match raw {
        "true" => JsonValue::Bool(true),
        "false" => JsonValue::Bool(false),
        "null" => JsonValue::Null,
        _ => match parse_number(raw) {
            Some(n) => JsonValue::Number(n),
            None => JsonValue::String(raw.to_string()),
        },
    }
}

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn parse_number(raw: &str) -> Option<Number> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Number::from(i));
    }

    // Rust accepts "inf"/"NaN" spellings; only finite values count as numbers.
    let f: f64 = raw.parse().ok()?;
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(f as i64));
    }
    Number::from_f64(f)
}
