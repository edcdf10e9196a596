//! Bracket-notation field paths (`name[first]`, `a[b][c]`).
//!
//! A field token is split into a head and up to [`MAX_BRACKET_DEPTH`] bracket
//! segments. Anything the tokenizer does not consume (segments past the cap,
//! an unterminated `[`, stray text after `]`) becomes one literal trailing key.

use serde_json::{Map, Value as JsonValue};

/// Maximum number of bracket segments expanded into nested keys.
pub const MAX_BRACKET_DEPTH: usize = 5;

/// A field path as a list of keys, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath<'a> {
    keys: Vec<&'a str>,
}

impl<'a> FieldPath<'a> {
    /// Tokenize a field token. Returns `None` when the head is empty
    /// (e.g. `""` or `"[a]"`).
    pub fn parse(field: &'a str) -> Option<Self> {
        let head_end = field.find('[').unwrap_or(field.len());
        let head = &field[..head_end];
        if head.is_empty() {
            return None;
        }

        let mut keys = vec![head];
        let mut rest = &field[head_end..];
        let mut depth = 0;

        while !rest.is_empty() {
            if depth == MAX_BRACKET_DEPTH {
                keys.push(rest);
                break;
            }
            match bracket_segment(rest) {
                Some((segment, tail)) => {
                    keys.push(segment);
                    rest = tail;
                    depth += 1;
                }
                None => {
                    keys.push(rest);
                    break;
                }
            }
        }

        Some(Self { keys })
    }

    pub fn keys(&self) -> &[&'a str] {
        &self.keys
    }

    /// Top-level field name.
    pub fn head(&self) -> &'a str {
        self.keys[0]
    }

    pub fn depth(&self) -> usize {
        self.keys.len()
    }

    /// Wrap `leaf` in one object per key, innermost key last.
    ///
    /// `["name", "first"]` around `{"equals": "john"}` gives
    /// `{"name": {"first": {"equals": "john"}}}`.
    pub fn nest(&self, leaf: JsonValue) -> JsonValue {
        self.keys.iter().rev().fold(leaf, |inner, key| {
            let mut map = Map::with_capacity(1);
            map.insert((*key).to_string(), inner);
            JsonValue::Object(map)
        })
    }
}

/// Split `[segment]tail` into `(segment, tail)`.
///
/// Empty segments and segments containing `[` are rejected so they fall back
/// to a literal key.
fn bracket_segment(input: &str) -> Option<(&str, &str)> {
    let inner = input.strip_prefix('[')?;
    let close = inner.find(']')?;
    let segment = &inner[..close];
    if segment.is_empty() || segment.contains('[') {
        return None;
    }
    Some((segment, &inner[close + 1..]))
}
