//! Form state engine
//!
//! The value tree mirrors the field tree: one slot per field, objects as
//! nested maps, arrays as sequences. Updates are copy-on-write, so every
//! previously handed-out tree stays a valid snapshot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::path::{FieldPath, PathSegment};
use crate::schema::types::{FieldKind, ItemType, SimpleField};

// ============================================================================
// Value Tree
// ============================================================================

/// Largest run of `null` padding a single update may add past the end of a sequence
pub const MAX_INDEX_GAP: usize = 1024;

/// Live form values keyed by section key at every level
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTree(Map<String, Value>);

impl ValueTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read the value at `path`. `None` when any segment is missing or not traversable.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let PathSegment::Key(key) = first else {
            return None;
        };

        let mut current = self.0.get(key)?;
        for segment in rest {
            current = match segment {
                PathSegment::Key(key) => current.as_object()?.get(key)?,
                PathSegment::Index(idx) => current.as_array()?.get(*idx)?,
            };
        }
        Some(current)
    }

    /// Return a new tree with `value` stored at `path`.
    ///
    /// Missing or non-container intermediates are replaced by fresh
    /// containers. Sequences are padded with `null` at most [`MAX_INDEX_GAP`]
    /// slots past their end; a farther index leaves the tree unchanged.
    /// The receiver is left untouched.
    pub fn set(&self, path: &FieldPath, value: Value) -> ValueTree {
        match path.segments().split_first() {
            Some((PathSegment::Key(key), rest)) => match set_key(Some(&self.0), key, rest, value) {
                Some(map) => {
                    tracing::debug!(path = %path, "Setting form value");
                    ValueTree(map)
                }
                None => {
                    tracing::warn!(path = %path, "Index out of range, ignoring update");
                    self.clone()
                }
            },
            Some((PathSegment::Index(_), _)) => {
                tracing::warn!(path = %path, "Value tree root is not a sequence, ignoring update");
                self.clone()
            }
            None => match value {
                Value::Object(map) => ValueTree(map),
                other => {
                    tracing::warn!(value = %other, "Ignoring non-object replacement of the value tree");
                    self.clone()
                }
            },
        }
    }
}

impl From<Map<String, Value>> for ValueTree {
    fn from(map: Map<String, Value>) -> Self {
        ValueTree(map)
    }
}

impl From<ValueTree> for Value {
    fn from(tree: ValueTree) -> Self {
        Value::Object(tree.0)
    }
}

fn set_in(container: Option<&Value>, segments: &[PathSegment], value: Value) -> Option<Value> {
    match segments.split_first() {
        None => Some(value),
        Some((PathSegment::Key(key), rest)) => {
            set_key(container.and_then(Value::as_object), key, rest, value).map(Value::Object)
        }
        Some((PathSegment::Index(idx), rest)) => {
            let original = container.and_then(Value::as_array);
            let len = original.map_or(0, Vec::len);
            if *idx > len.saturating_add(MAX_INDEX_GAP) {
                return None;
            }
            let child = set_in(original.and_then(|arr| arr.get(*idx)), rest, value)?;
            let mut arr = original.cloned().unwrap_or_default();
            if arr.len() <= *idx {
                arr.resize(*idx + 1, Value::Null);
            }
            arr[*idx] = child;
            Some(Value::Array(arr))
        }
    }
}

fn set_key(
    map: Option<&Map<String, Value>>,
    key: &str,
    rest: &[PathSegment],
    value: Value,
) -> Option<Map<String, Value>> {
    let child = set_in(map.and_then(|m| m.get(key)), rest, value)?;
    let mut updated = map.cloned().unwrap_or_default();
    // insert keeps the position of an existing key
    updated.insert(key.to_string(), child);
    Some(updated)
}

// ============================================================================
// Initialization
// ============================================================================

/// Build a value tree shaped like `fields`, preferring compatible seed values,
/// then declared defaults, then type-appropriate empty values.
pub fn initialize(fields: &[SimpleField], seed: Option<&Value>) -> ValueTree {
    let seed_map = match seed {
        Some(Value::Object(map)) => Some(map),
        None | Some(Value::Null) => None,
        Some(other) => {
            tracing::warn!(seed = %other, "Seed values are not an object, ignoring");
            None
        }
    };
    ValueTree(init_object(fields, seed_map))
}

fn init_object(fields: &[SimpleField], seed: Option<&Map<String, Value>>) -> Map<String, Value> {
    fields
        .iter()
        .map(|field| {
            let value = init_field(field, seed.and_then(|m| m.get(&field.section_key)));
            (field.section_key.clone(), value)
        })
        .collect()
}

/// Initial value for one field given an optional seed
pub fn init_field(field: &SimpleField, seed: Option<&Value>) -> Value {
    let seed = seed.filter(|v| !v.is_null());
    let default = field.default.as_ref();

    match &field.kind {
        FieldKind::Object { fields } => {
            let source = seed
                .and_then(|v| compatible(field, v.as_object()))
                .or_else(|| default.and_then(Value::as_object));
            Value::Object(init_object(fields, source))
        }
        FieldKind::Array { items } => {
            let source = seed
                .and_then(|v| compatible(field, v.as_array()))
                .or_else(|| default.and_then(Value::as_array));
            let elements = source
                .map(|elements| {
                    elements
                        .iter()
                        .map(|element| match items {
                            Some(item) => init_field(item, Some(element)),
                            None => element.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            Value::Array(elements)
        }
        _ => seed
            .and_then(|v| compatible(field, coerce_scalar(field, v)))
            .or_else(|| default.and_then(|d| coerce_scalar(field, d)))
            .unwrap_or_else(|| empty_value(field)),
    }
}

/// Fresh element for an array whose items are described by `item`
pub fn new_element(item: &SimpleField) -> Value {
    init_field(item, None)
}

fn compatible<T>(field: &SimpleField, converted: Option<T>) -> Option<T> {
    if converted.is_none() {
        tracing::warn!(
            key = %field.section_key,
            kind = field.type_name(),
            "Discarding shape-incompatible seed value"
        );
    }
    converted
}

/// Type-appropriate empty value
pub fn empty_value(field: &SimpleField) -> Value {
    match &field.kind {
        FieldKind::String => Value::String(String::new()),
        FieldKind::Number | FieldKind::Integer => Value::Null,
        FieldKind::Boolean => Value::Bool(false),
        FieldKind::Object { .. } => Value::Object(Map::new()),
        FieldKind::Array { .. } => Value::Array(Vec::new()),
    }
}

/// Accept a scalar value if it fits the field's type, converting loosely.
fn coerce_scalar(field: &SimpleField, value: &Value) -> Option<Value> {
    match (&field.kind, value) {
        (FieldKind::String, Value::String(_)) => Some(value.clone()),
        (FieldKind::String, Value::Number(_) | Value::Bool(_)) => {
            Some(Value::String(crate::schema::string_of(value)))
        }
        (FieldKind::String, Value::Array(values)) if field.item_type == Some(ItemType::MultiSelect) => {
            let selected = values
                .iter()
                .filter(|v| !v.is_null() && !v.is_array() && !v.is_object())
                .map(|v| Value::String(crate::schema::string_of(v)))
                .collect();
            Some(Value::Array(selected))
        }
        (FieldKind::Number | FieldKind::Integer, Value::Number(_)) => Some(value.clone()),
        (FieldKind::Number | FieldKind::Integer, Value::String(s)) if s.is_empty() => {
            Some(value.clone())
        }
        (FieldKind::Number | FieldKind::Integer, Value::String(s)) => parse_number(s),
        (FieldKind::Boolean, Value::Bool(_)) => Some(value.clone()),
        _ => None,
    }
}

/// Parse user text into a JSON number
pub(crate) fn parse_number(text: &str) -> Option<Value> {
    let parsed = text.trim().parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(number_value(parsed))
}

/// Integral values are stored as integers so `3` and `"3"` initialize alike
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ============================================================================
// Tests
// ============================================================================
