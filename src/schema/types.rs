//! Core types for schema-driven lead forms

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Field Type
// ============================================================================

/// Data type of a normalized field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    /// Parse a declared `type` value. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "integer" => Some(FieldType::Integer),
            "boolean" => Some(FieldType::Boolean),
            "object" => Some(FieldType::Object),
            "array" => Some(FieldType::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }

    /// Number or integer
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Integer)
    }
}

// ============================================================================
// UI Hints
// ============================================================================

/// UI rendering hint, independent of the data type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    TextBox,
    TextArea,
    DropDown,
    MultiSelect,
    RadioButton,
    Toggle,
}

impl ItemType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "textBox" => Some(ItemType::TextBox),
            "textArea" => Some(ItemType::TextArea),
            "dropDown" => Some(ItemType::DropDown),
            "multiSelect" => Some(ItemType::MultiSelect),
            "radioButton" => Some(ItemType::RadioButton),
            "toggle" => Some(ItemType::Toggle),
            _ => None,
        }
    }
}

/// Semantic hint narrowing how a primitive is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputType {
    Text,
    Email,
    Date,
    Time,
    DateTime,
    Phone,
    Number,
    Float,
    State,
    Country,
}

impl InputType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(InputType::Text),
            "email" => Some(InputType::Email),
            "date" => Some(InputType::Date),
            "time" => Some(InputType::Time),
            "dateTime" => Some(InputType::DateTime),
            "phone" => Some(InputType::Phone),
            "number" => Some(InputType::Number),
            "float" => Some(InputType::Float),
            "state" => Some(InputType::State),
            "country" => Some(InputType::Country),
            _ => None,
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// A selectable choice: label shown to the user plus the stored value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub display_name: String,
    pub value: Value,
}

impl OptionItem {
    pub fn new(display_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            display_name: display_name.into(),
            value: value.into(),
        }
    }

    /// The option value as it appears in a `<select>` or radio `value` attribute
    pub fn value_string(&self) -> String {
        string_of(&self.value)
    }
}

/// Stringify a JSON scalar the way a browser stringifies form values.
pub fn string_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// Normalized Field Tree
// ============================================================================

/// Kind of a normalized field. Containers carry their children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Object {
        #[serde(default)]
        fields: Vec<SimpleField>,
    },
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        items: Option<Box<SimpleField>>,
    },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::String => FieldType::String,
            FieldKind::Number => FieldType::Number,
            FieldKind::Integer => FieldType::Integer,
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::Object { .. } => FieldType::Object,
            FieldKind::Array { .. } => FieldType::Array,
        }
    }
}

/// A field of the normalized tree, keyed by `section_key` within its parent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleField {
    pub section_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionItem>,
    /// Source-provided `name`/`key` alias, matched by field removal
    #[serde(default, rename = "name", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SimpleField {
    /// Create a bare field of the given kind
    pub fn new(section_key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            section_key: section_key.into(),
            title: String::new(),
            kind,
            item_type: None,
            input_type: None,
            required: false,
            description: String::new(),
            placeholder: String::new(),
            default: None,
            minimum: None,
            maximum: None,
            max_length: None,
            options: Vec::new(),
            alias: None,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn type_name(&self) -> &'static str {
        self.field_type().as_str()
    }

    /// Check if this is a primitive (renderable by the field renderer)
    pub fn is_scalar(&self) -> bool {
        !matches!(self.kind, FieldKind::Object { .. } | FieldKind::Array { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, FieldKind::Object { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, FieldKind::Array { .. })
    }

    /// Children of an object field; empty for anything else
    pub fn fields(&self) -> &[SimpleField] {
        match &self.kind {
            FieldKind::Object { fields } => fields,
            _ => &[],
        }
    }

    /// Element description of an array field
    pub fn items(&self) -> Option<&SimpleField> {
        match &self.kind {
            FieldKind::Array { items } => items.as_deref(),
            _ => None,
        }
    }

    /// Count this field and everything below it, array items included
    pub fn count(&self) -> usize {
        1 + match &self.kind {
            FieldKind::Object { fields } => count_fields(fields),
            FieldKind::Array { items: Some(item) } => item.count(),
            _ => 0,
        }
    }
}

/// Total number of fields in a forest, counted recursively
pub fn count_fields(fields: &[SimpleField]) -> usize {
    fields.iter().map(SimpleField::count).sum()
}

/// Root of a normalized form: always an object container
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicFormSchema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type", default)]
    pub schema_type: RootType,
    #[serde(default)]
    pub fields: Vec<SimpleField>,
}

/// The only root kind a form schema can have
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootType {
    #[default]
    Object,
}

impl DynamicFormSchema {
    pub fn new(fields: Vec<SimpleField>) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Recursive field count, array items included
    pub fn field_count(&self) -> usize {
        count_fields(&self.fields)
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
    fn test_field_type_parse() {
        assert_eq!(FieldType::parse("integer"), Some(FieldType::Integer));
        assert_eq!(FieldType::parse("Integer"), None);
        assert_eq!(FieldType::parse("null"), None);
        assert!(FieldType::Number.is_numeric());
        assert!(!FieldType::String.is_numeric());
    }

    #[test]
    fn test_string_of() {
        assert_eq!(string_of(&json!("A")), "A");
        assert_eq!(string_of(&json!(3)), "3");
        assert_eq!(string_of(&json!(2.5)), "2.5");
        assert_eq!(string_of(&json!(true)), "true");
        assert_eq!(string_of(&Value::Null), "null");
    }

    #[test]
    fn test_simple_field_serialization_shape() {
        let mut field = SimpleField::new(
            "contacts",
            FieldKind::Array {
                items: Some(Box::new(SimpleField::new("contacts__item", FieldKind::String))),
            },
        );
        field.required = true;

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["sectionKey"], "contacts");
        assert_eq!(value["type"], "array");
        assert_eq!(value["required"], true);
        assert_eq!(value["items"]["type"], "string");
        assert!(value["items"].get("required").is_none());

        let parsed: SimpleField = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, field);
    }

    #[test]
    fn test_count_includes_array_items() {
        let item = SimpleField::new(
            "a__item",
            FieldKind::Object {
                fields: vec![
                    SimpleField::new("x", FieldKind::String),
                    SimpleField::new("y", FieldKind::Boolean),
                ],
            },
        );
        let array = SimpleField::new("a", FieldKind::Array { items: Some(Box::new(item)) });
        assert_eq!(array.count(), 4);
        assert_eq!(DynamicFormSchema::new(vec![array]).field_count(), 4);
    }

    #[test]
    fn test_schema_type_tag() {
        let schema = DynamicFormSchema::new(vec![]);
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({ "type": "object", "fields": [] }));
    }
}
