//! Dot-path addressing for form values.
//!
//! Form inputs are named by dot paths (`address.streetAddress`,
//! `mainEntity.0.name`). Each segment addresses one level of nesting: a name
//! segment selects a key in a mapping, a numeric segment selects an index in
//! a sequence.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::PathError;

/// Highest list index a path may address. Writing index `n` pads the list
/// to `n + 1` elements.
pub const MAX_LIST_INDEX: usize = 999;

/// A parsed dot path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot path.
    ///
    /// # Errors
    ///
    /// Returns `PathError` for an empty path, an empty segment (`a..b`), or
    /// a list index above [`MAX_LIST_INDEX`].
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = path.split('.').map(String::from).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
            });
        }
        if let Some(segment) = segments
            .iter()
            .find(|s| is_numeric(s) && list_index(s).is_none())
        {
            return Err(PathError::IndexOutOfRange {
                path: path.to_string(),
                index: segment.clone(),
                max: MAX_LIST_INDEX,
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of nesting levels below the top-level key.
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    /// Read the value at this path.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(list_index(segment)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write `value` at this path, creating intermediate containers.
    ///
    /// A numeric segment creates (or extends with nulls) a sequence; any
    /// other segment creates a mapping. A scalar in the way is replaced.
    pub fn set(&self, root: &mut Map<String, Value>, value: Value) {
        let Some((first, rest)) = self.segments.split_first() else {
            return;
        };
        let slot = root.entry(first.clone()).or_insert(Value::Null);
        set_in(slot, rest, value);
    }
}

fn set_in(slot: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };

    match list_index(head) {
        Some(index) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                set_in(&mut items[index], rest, value);
            }
        }
        None => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let child = map.entry(head.clone()).or_insert(Value::Null);
                set_in(child, rest, value);
            }
        }
    }
}

fn is_numeric(segment: &str) -> bool {
    segment.bytes().all(|b| b.is_ascii_digit())
}

/// Index addressed by a numeric segment, if within [`MAX_LIST_INDEX`].
fn list_index(segment: &str) -> Option<usize> {
    if !is_numeric(segment) {
        return None;
    }
    segment
        .parse::<usize>()
        .ok()
        .filter(|index| *index <= MAX_LIST_INDEX)
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

/// Expand a flat `{"a.b": "x"}` mapping into nested `{"a": {"b": "x"}}`.
///
/// Keys are applied in order, so a later key wins over an earlier one that
/// addresses the same slot.
///
/// # Errors
///
/// Returns `PathError` if any key is not a valid dot path.
pub fn expand(flat: &Map<String, Value>) -> Result<Map<String, Value>, PathError> {
    let mut nested = Map::new();
    for (key, value) in flat {
        FieldPath::parse(key)?.set(&mut nested, value.clone());
    }
    Ok(nested)
}

/// Join a parent path and a child segment.
pub(crate) fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}
