//! Read-only view over a loosely-typed schema document
//!
//! Server templates are JSON-Schema-like but untrusted: any key may be
//! missing or carry the wrong JSON type. `JsonNode` answers every question
//! with an `Option` so the adapter never has to fail.

use serde_json::{Map, Value};

use super::types::{string_of, FieldType, InputType, ItemType, OptionItem};

/// Borrowed view of one schema node
#[derive(Clone, Copy, Debug)]
pub struct JsonNode<'a> {
    raw: &'a Value,
}

impl<'a> JsonNode<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.raw.get(key)
    }

    /// String attribute; non-strings are treated as absent
    pub fn str_attr(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Declared type, if it names one of the supported kinds
    pub fn declared_type(&self) -> Option<FieldType> {
        self.str_attr("type").and_then(FieldType::parse)
    }

    /// Declared type, else `object` when properties are present, else `string`
    pub fn normalized_type(&self) -> FieldType {
        match self.declared_type() {
            Some(t) => t,
            None if self.properties().is_some() => FieldType::Object,
            None => FieldType::String,
        }
    }

    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.get("properties").and_then(Value::as_object)
    }

    /// Names listed in this node's own `required` array
    pub fn required_names(&self) -> Vec<&'a str> {
        self.get("required")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn items(&self) -> Option<JsonNode<'a>> {
        self.get("items").filter(|v| v.is_object()).map(JsonNode::new)
    }

    pub fn item_type(&self) -> Option<ItemType> {
        self.str_attr("itemType").and_then(ItemType::parse)
    }

    pub fn input_type(&self) -> Option<InputType> {
        self.str_attr("inputType").and_then(InputType::parse)
    }

    /// `name` or `key` alias, when the source provides one
    pub fn alias(&self) -> Option<&'a str> {
        self.str_attr("name").or_else(|| self.str_attr("key"))
    }

    pub fn default_value(&self) -> Option<&'a Value> {
        self.get("default").filter(|v| !v.is_null())
    }

    /// Numeric attribute accepted as a number or a numeric string
    pub fn number_attr(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(to_number)
    }

    /// Explicit `options` win; otherwise `enum` values are projected; otherwise empty
    pub fn options(&self) -> Vec<OptionItem> {
        if let Some(options) = self.get("options").and_then(Value::as_array) {
            return options.iter().filter_map(option_from_value).collect();
        }

        self.get("enum")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .map(|v| OptionItem::new(string_of(v), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Coerce a loose numeric attribute. Empty or non-numeric input is absent, never zero.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Parse one entry of an explicit `options` list.
///
/// Objects use `displayName`/`value`; a bare scalar becomes its own label.
fn option_from_value(entry: &Value) -> Option<OptionItem> {
    match entry {
        Value::Object(obj) => {
            let value = obj.get("value").cloned().unwrap_or(Value::Null);
            let display_name = obj
                .get("displayName")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| string_of(&value));
            Some(OptionItem { display_name, value })
        }
        Value::Array(_) | Value::Null => None,
        scalar => Some(OptionItem::new(string_of(scalar), scalar.clone())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalized_type_inference() {
        assert_eq!(JsonNode::new(&json!({ "type": "integer" })).normalized_type(), FieldType::Integer);
        assert_eq!(JsonNode::new(&json!({ "properties": {} })).normalized_type(), FieldType::Object);
        assert_eq!(JsonNode::new(&json!({ "type": "date" })).normalized_type(), FieldType::String);
        assert_eq!(JsonNode::new(&json!({ "type": 7 })).normalized_type(), FieldType::String);
        assert_eq!(JsonNode::new(&json!("not an object")).normalized_type(), FieldType::String);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(5)), Some(5.0));
        assert_eq!(to_number(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&Value::Null), None);
    }

    #[test]
    fn test_options_prefer_explicit() {
        let node = json!({
            "enum": ["A", "B"],
            "options": [{ "displayName": "Yes", "value": true }]
        });
        let options = JsonNode::new(&node).options();
        assert_eq!(options, vec![OptionItem::new("Yes", true)]);
    }

    #[test]
    fn test_options_from_mixed_enum() {
        let node = json!({ "enum": ["A", 2] });
        let options = JsonNode::new(&node).options();
        assert_eq!(options, vec![OptionItem::new("A", "A"), OptionItem::new("2", 2)]);
    }

    #[test]
    fn test_required_names_ignore_non_strings() {
        let node = json!({ "required": ["a", 1, null, "b"] });
        assert_eq!(JsonNode::new(&node).required_names(), vec!["a", "b"]);
        assert!(JsonNode::new(&json!({ "required": true })).required_names().is_empty());
    }
}
