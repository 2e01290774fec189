//! Schema adaptation
//!
//! Converts a raw, loosely-typed template schema into the normalized
//! `DynamicFormSchema` field tree. Adaptation is total and deterministic:
//! malformed input degrades instead of failing.

use serde_json::Value;

use super::node::JsonNode;
use super::types::{DynamicFormSchema, FieldKind, FieldType, SimpleField};

/// Key used when the root document is not an object with properties
pub const ROOT_KEY: &str = "root";

/// Suffix appended to an array's key to name its element field
pub const ITEM_KEY_SUFFIX: &str = "__item";

/// Adapt a raw schema document into the normalized field tree
pub fn adapt(raw: &Value) -> DynamicFormSchema {
    let node = JsonNode::new(raw);
    let schema = DynamicFormSchema {
        title: node.str_attr("title").unwrap_or_default().to_string(),
        description: node.str_attr("description").unwrap_or_default().to_string(),
        fields: extract_fields(node),
        ..Default::default()
    };

    tracing::debug!(
        top_level = schema.fields.len(),
        total = schema.field_count(),
        "Adapted form schema"
    );
    schema
}

/// Fields of the root node. A primitive or property-less root becomes one synthetic field.
fn extract_fields(node: JsonNode<'_>) -> Vec<SimpleField> {
    match node.properties() {
        Some(_) if node.normalized_type() == FieldType::Object => object_fields(node),
        _ => vec![to_simple_field(ROOT_KEY, node, false)],
    }
}

/// Children of an object node. Requiredness comes from this node's own list only.
fn object_fields(node: JsonNode<'_>) -> Vec<SimpleField> {
    let Some(properties) = node.properties() else {
        return Vec::new();
    };
    let required = node.required_names();

    properties
        .iter()
        .map(|(key, child)| {
            let is_required = required.contains(&key.as_str());
            to_simple_field(key, JsonNode::new(child), is_required)
        })
        .collect()
}

/// Array element field. Element requiredness never inherits from the array.
fn item_field(parent_key: &str, items: JsonNode<'_>) -> SimpleField {
    let key = format!("{parent_key}{ITEM_KEY_SUFFIX}");
    to_simple_field(&key, items, false)
}

fn to_simple_field(key: &str, node: JsonNode<'_>, required: bool) -> SimpleField {
    let kind = match node.normalized_type() {
        FieldType::String => FieldKind::String,
        FieldType::Number => FieldKind::Number,
        FieldType::Integer => FieldKind::Integer,
        FieldType::Boolean => FieldKind::Boolean,
        FieldType::Object => FieldKind::Object {
            fields: object_fields(node),
        },
        FieldType::Array => FieldKind::Array {
            items: node.items().map(|items| Box::new(item_field(key, items))),
        },
    };

    tracing::trace!(key, kind = kind.field_type().as_str(), required, "Adapted field");

    SimpleField {
        section_key: key.to_string(),
        title: node.str_attr("title").unwrap_or_default().to_string(),
        kind,
        item_type: node.item_type(),
        input_type: node.input_type(),
        required,
        description: node.str_attr("description").unwrap_or_default().to_string(),
        placeholder: node.str_attr("placeholder").unwrap_or_default().to_string(),
        default: node.default_value().cloned(),
        minimum: node.number_attr("minimum"),
        maximum: node.number_attr("maximum"),
        max_length: node
            .number_attr("maxLength")
            .filter(|n| *n >= 0.0)
            // Fractions round down like HTML `maxlength`; huge values saturate to no practical limit
            .map(|n| n.floor() as u64),
        options: node.options(),
        alias: node.alias().map(String::from),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{InputType, ItemType, OptionItem};
    use serde_json::json;

    fn field<'a>(fields: &'a [SimpleField], key: &str) -> &'a SimpleField {
        fields
            .iter()
            .find(|f| f.section_key == key)
            .unwrap_or_else(|| panic!("missing field {key}"))
    }

    #[test]
    fn test_adapt_simple_object() {
        let schema = adapt(&json!({
            "type": "object",
            "title": "Contact",
            "properties": {
                "firstName": { "type": "string", "title": "First Name" },
                "age": { "type": "integer" }
            },
            "required": ["firstName"]
        }));

        assert_eq!(schema.title, "Contact");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].section_key, "firstName");
        assert_eq!(schema.fields[0].title, "First Name");
        assert!(schema.fields[0].required);
        assert_eq!(schema.fields[1].field_type(), FieldType::Integer);
        assert!(!schema.fields[1].required);
    }

    #[test]
    fn test_adapt_preserves_property_order() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": { "zeta": {}, "alpha": {}, "mid": {} }
        }));
        let keys: Vec<_> = schema.fields.iter().map(|f| f.section_key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_required_never_skips_a_level() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "object",
                    "required": ["x"],
                    "properties": {
                        "x": { "type": "string" },
                        "y": { "type": "string" },
                        "a": { "type": "string" }
                    }
                }
            },
            "required": ["a"]
        }));

        let a = field(&schema.fields, "a");
        assert!(a.required);
        assert!(field(a.fields(), "x").required);
        assert!(!field(a.fields(), "y").required);
        assert!(!field(a.fields(), "a").required);
    }

    #[test]
    fn test_primitive_array_items_not_required() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["tags"]
        }));

        let tags = field(&schema.fields, "tags");
        assert!(tags.required);
        let items = tags.items().unwrap();
        assert_eq!(items.section_key, "tags__item");
        assert_eq!(items.field_type(), FieldType::String);
        assert!(!items.required);
    }

    #[test]
    fn test_object_array_items_recurse() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "contacts": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["phone"],
                        "properties": { "phone": { "type": "string" } }
                    }
                }
            }
        }));

        let items = field(&schema.fields, "contacts").items().unwrap();
        assert_eq!(items.section_key, "contacts__item");
        assert!(items.is_object());
        assert!(field(items.fields(), "phone").required);
    }

    #[test]
    fn test_array_without_items() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": { "list": { "type": "array" } }
        }));
        let list = field(&schema.fields, "list");
        assert!(list.is_array());
        assert!(list.items().is_none());
    }

    #[test]
    fn test_primitive_root_becomes_synthetic_field() {
        let schema = adapt(&json!({ "type": "string", "title": "Note", "required": ["x"] }));
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].section_key, ROOT_KEY);
        assert_eq!(schema.fields[0].title, "Note");
        assert!(!schema.fields[0].required);
    }

    #[test]
    fn test_object_root_without_properties() {
        let schema = adapt(&json!({ "type": "object" }));
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].section_key, ROOT_KEY);
        assert!(schema.fields[0].is_object());
        assert!(schema.fields[0].fields().is_empty());
    }

    #[test]
    fn test_malformed_documents_degrade() {
        for raw in [json!(null), json!(42), json!([1, 2]), json!({ "type": ["string"] })] {
            let schema = adapt(&raw);
            assert_eq!(schema.fields.len(), 1);
            assert_eq!(schema.fields[0].field_type(), FieldType::String);
        }
    }

    #[test]
    fn test_untyped_properties_infer_object() {
        let schema = adapt(&json!({
            "properties": {
                "address": { "properties": { "city": {} } }
            }
        }));
        let address = field(&schema.fields, "address");
        assert!(address.is_object());
        assert_eq!(field(address.fields(), "city").field_type(), FieldType::String);
    }

    #[test]
    fn test_enum_to_options() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": { "grade": { "type": "string", "enum": ["A", "B"] } }
        }));
        assert_eq!(
            schema.fields[0].options,
            vec![OptionItem::new("A", "A"), OptionItem::new("B", "B")]
        );
    }

    #[test]
    fn test_hints_and_bounds() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "qty": {
                    "type": "number",
                    "itemType": "dropDown",
                    "inputType": "float",
                    "minimum": "1",
                    "maximum": "",
                    "maxLength": "ten",
                    "default": 2
                },
                "mood": { "itemType": "sparkles", "inputType": "telepathy" }
            }
        }));

        let qty = field(&schema.fields, "qty");
        assert_eq!(qty.item_type, Some(ItemType::DropDown));
        assert_eq!(qty.input_type, Some(InputType::Float));
        assert_eq!(qty.minimum, Some(1.0));
        assert_eq!(qty.maximum, None);
        assert_eq!(qty.max_length, None);
        assert_eq!(qty.default, Some(json!(2)));

        let mood = field(&schema.fields, "mood");
        assert_eq!(mood.item_type, None);
        assert_eq!(mood.input_type, None);
    }

    #[test]
    fn test_max_length_rounds_down() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "a": { "type": "string", "maxLength": 2.5 },
                "b": { "type": "string", "maxLength": "7.9" },
                "c": { "type": "string", "maxLength": 1e30 },
                "d": { "type": "string", "maxLength": -1 }
            }
        }));

        assert_eq!(field(&schema.fields, "a").max_length, Some(2));
        assert_eq!(field(&schema.fields, "b").max_length, Some(7));
        assert_eq!(field(&schema.fields, "c").max_length, Some(u64::MAX));
        assert_eq!(field(&schema.fields, "d").max_length, None);
    }

    #[test]
    fn test_adapt_is_deterministic() {
        let raw = json!({
            "type": "object",
            "properties": {
                "a": { "type": "array", "items": { "properties": { "b": { "enum": [1, 2] } } } },
                "c": { "type": "boolean", "default": true }
            },
            "required": ["c"]
        });
        assert_eq!(adapt(&raw), adapt(&raw));
    }
}
