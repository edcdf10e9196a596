//! Evaluation of `where` clauses and `orderBy` against JSON records
//!
//! A clause is a nested object: every key is a field name until the
//! innermost object, whose keys are operators with scalar operands, e.g.
//! `{"target": {"method": {"equals": "GET"}}}`.

use std::cmp::Ordering;

use serde_json::{Map, Value as JsonValue};
use symon_query::OrderBy;

use crate::{models::Entity, Error, Result};

static NULL: JsonValue = JsonValue::Null;

/// Comparison operators understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    Not,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "equals" => Self::Equals,
            "not" => Self::Not,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "contains" => Self::Contains,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            _ => return None,
        })
    }

    /// Evaluate against a record value. A missing value behaves like `null`.
    pub fn eval(self, actual: Option<&JsonValue>, operand: &JsonValue) -> bool {
        let actual = actual.unwrap_or(&NULL);
        match self {
            Self::Equals => values_equal(actual, operand),
            Self::Not => !values_equal(actual, operand),
            Self::Lt => compare_values(actual, operand) == Some(Ordering::Less),
            Self::Lte => matches!(
                compare_values(actual, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Gt => compare_values(actual, operand) == Some(Ordering::Greater),
            Self::Gte => matches!(
                compare_values(actual, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Contains => string_op(actual, operand, |a, b| a.contains(b)),
            Self::StartsWith => string_op(actual, operand, |a, b| a.starts_with(b)),
            Self::EndsWith => string_op(actual, operand, |a, b| a.ends_with(b)),
        }
    }
}

fn string_op(actual: &JsonValue, operand: &JsonValue, op: fn(&str, &str) -> bool) -> bool {
    match (actual, operand) {
        (JsonValue::String(a), JsonValue::String(b)) => op(a, b),
        _ => false,
    }
}

/// Equality with numbers compared by value (`21 == 21.0`).
fn values_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Order two values of the same kind. `None` for mismatched or unordered kinds.
pub fn compare_values(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (JsonValue::String(x), JsonValue::String(y)) => Some(x.cmp(y)),
        (JsonValue::Bool(x), JsonValue::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Check that every top-level key of `clause` is a field of `entity`.
pub fn validate_clause(entity: Entity, clause: &JsonValue) -> Result<()> {
    let map = as_clause_object(clause)?;
    for field in map.keys() {
        if !entity.has_field(field) {
            return Err(Error::UnknownField {
                entity: entity.collection(),
                field: field.clone(),
            });
        }
    }
    Ok(())
}

/// Whether `record` satisfies `clause`.
pub fn matches(record: &JsonValue, clause: &JsonValue) -> Result<bool> {
    let map = as_clause_object(clause)?;
    for (field, node) in map {
        if !matches_node(record.get(field), node)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Keys holding an object are path segments; keys holding a scalar are
/// operators applied to the value reached so far.
fn matches_node(current: Option<&JsonValue>, node: &JsonValue) -> Result<bool> {
    let map = as_clause_object(node)?;
    for (key, sub) in map {
        let ok = if sub.is_object() {
            matches_node(current.and_then(|c| c.get(key)), sub)?
        } else {
            match Operator::parse(key) {
                Some(op) => op.eval(current, sub),
                None => return Err(Error::UnknownOperator(key.clone())),
            }
        };
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn as_clause_object(value: &JsonValue) -> Result<&Map<String, JsonValue>> {
    value
        .as_object()
        .ok_or_else(|| Error::Validation(format!("Malformed filter clause: {value}")))
}

/// Compare two records by `order_by`. Missing and `null` values sort first.
pub fn compare_records(a: &JsonValue, b: &JsonValue, order_by: &OrderBy) -> Ordering {
    for (field, order) in order_by.iter() {
        let ordering = match (non_null(a.get(field)), non_null(b.get(field))) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
        };
        if ordering != Ordering::Equal {
            return order.apply(ordering);
        }
    }
    Ordering::Equal
}

fn non_null(value: Option<&JsonValue>) -> Option<&JsonValue> {
    value.filter(|v| !v.is_null())
}
