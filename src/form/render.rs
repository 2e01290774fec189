//! Field renderer
//!
//! Maps one primitive field and its current value to a headless control
//! description, and converts raw control input back into a typed value.
//! Dispatch is by `(type, itemType)`; containers are never rendered here.

use serde::Serialize;
use serde_json::Value;

use super::path::FieldPath;
use super::state::{number_value, parse_number};
use crate::schema::node::to_number;
use crate::schema::{options_for_input, string_of, FieldKind, InputType, ItemType, SimpleField};

/// Placeholder shown for the unselected entry of a dropdown
pub const SELECT_PLACEHOLDER: &str = "Select...";

/// Rows of a multi-line text control
pub const TEXT_AREA_ROWS: u32 = 3;

// ============================================================================
// Control Model
// ============================================================================

/// HTML flavour of a single-line text input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Text,
    Email,
    Date,
    Time,
}

impl TextKind {
    fn for_input(input_type: Option<InputType>) -> Self {
        match input_type {
            Some(InputType::Email) => TextKind::Email,
            Some(InputType::Date) => TextKind::Date,
            Some(InputType::Time) => TextKind::Time,
            _ => TextKind::Text,
        }
    }

    pub fn as_html(&self) -> &'static str {
        match self {
            TextKind::Text => "text",
            TextKind::Email => "email",
            TextKind::Date => "date",
            TextKind::Time => "time",
        }
    }
}

/// A choice as presented by a select or radio control
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// Concrete control for one primitive field, carrying its display state
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Control {
    TextArea {
        value: String,
        placeholder: String,
        max_length: Option<u64>,
        rows: u32,
    },
    TextInput {
        kind: TextKind,
        value: String,
        placeholder: String,
        max_length: Option<u64>,
    },
    Select {
        value: String,
        placeholder: String,
        choices: Vec<Choice>,
        numeric: bool,
    },
    MultiSelect {
        choices: Vec<Choice>,
    },
    Radio {
        /// Group name, unique per field path
        group: String,
        choices: Vec<Choice>,
        numeric: bool,
    },
    NumberInput {
        value: String,
        placeholder: String,
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    Checkbox {
        checked: bool,
        caption: String,
    },
}

/// Output of rendering one primitive field
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedField {
    /// Display path of the field, unique within the form
    pub key: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub control: Control,
}

/// Raw input coming back from a control
#[derive(Clone, Debug, PartialEq)]
pub enum ControlInput {
    /// Typed text or the value attribute of the chosen `<option>`
    Text(String),
    /// Value attributes of every selected option of a multi-select
    Selection(Vec<String>),
    Checked(bool),
    /// Index of the chosen radio option
    Choice(usize),
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a primitive field. Containers yield `None`.
pub fn render_field(field: &SimpleField, value: Option<&Value>, path: &FieldPath) -> Option<RenderedField> {
    let control = match &field.kind {
        FieldKind::String => string_control(field, value, path),
        FieldKind::Number | FieldKind::Integer => numeric_control(field, value, path),
        FieldKind::Boolean => Control::Checkbox {
            checked: value.is_some_and(truthy),
            caption: if field.description.is_empty() {
                field.title.clone()
            } else {
                field.description.clone()
            },
        },
        FieldKind::Object { .. } | FieldKind::Array { .. } => return None,
    };

    Some(RenderedField {
        key: path.to_string(),
        label: field.title.clone(),
        required: field.required,
        description: field.description.clone(),
        control,
    })
}

fn string_control(field: &SimpleField, value: Option<&Value>, path: &FieldPath) -> Control {
    let current = display_string(value);
    let options = options_for_input(field);

    match field.item_type {
        Some(ItemType::TextArea) => Control::TextArea {
            value: current,
            placeholder: field.placeholder.clone(),
            max_length: field.max_length,
            rows: TEXT_AREA_ROWS,
        },
        Some(ItemType::DropDown) => Control::Select {
            choices: choices(&options, |v| v == current),
            value: current,
            placeholder: select_placeholder(field),
            numeric: false,
        },
        Some(ItemType::MultiSelect) => {
            let selected = display_strings(value);
            Control::MultiSelect {
                choices: choices(&options, |v| selected.iter().any(|s| s == v)),
            }
        }
        Some(ItemType::RadioButton) if !options.is_empty() => Control::Radio {
            group: path.to_string(),
            choices: choices(&options, |v| v == current),
            numeric: false,
        },
        _ => Control::TextInput {
            kind: TextKind::for_input(field.input_type),
            value: current,
            placeholder: field.placeholder.clone(),
            max_length: field.max_length,
        },
    }
}

fn numeric_control(field: &SimpleField, value: Option<&Value>, path: &FieldPath) -> Control {
    let options = options_for_input(field);

    match field.item_type {
        Some(ItemType::DropDown) => {
            let current = display_string(value);
            Control::Select {
                choices: choices(&options, |v| v == current),
                value: current,
                placeholder: select_placeholder(field),
                numeric: true,
            }
        }
        Some(ItemType::RadioButton) if !options.is_empty() => {
            let current = value.and_then(to_number);
            Control::Radio {
                group: path.to_string(),
                choices: options
                    .iter()
                    .map(|opt| Choice {
                        label: opt.display_name.clone(),
                        value: opt.value_string(),
                        selected: current.is_some() && current == to_number(&opt.value),
                    })
                    .collect(),
                numeric: true,
            }
        }
        _ => Control::NumberInput {
            value: display_number(value),
            placeholder: field.placeholder.clone(),
            min: field.minimum,
            max: field.maximum,
            integer: matches!(field.kind, FieldKind::Integer),
        },
    }
}

fn choices(options: &[crate::schema::OptionItem], is_selected: impl Fn(&str) -> bool) -> Vec<Choice> {
    options
        .iter()
        .map(|opt| {
            let value = opt.value_string();
            Choice {
                label: opt.display_name.clone(),
                selected: is_selected(&value),
                value,
            }
        })
        .collect()
}

fn select_placeholder(field: &SimpleField) -> String {
    if field.placeholder.is_empty() {
        SELECT_PLACEHOLDER.to_string()
    } else {
        field.placeholder.clone()
    }
}

/// Absent and null show as empty text
fn display_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => string_of(v),
    }
}

fn display_strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(values)) => values.iter().map(string_of).collect(),
        _ => Vec::new(),
    }
}

/// Numbers show as-is; the unset sentinel and anything non-numeric show as empty
fn display_number(value: Option<&Value>) -> String {
    value
        .and_then(to_number)
        .map(|n| string_of(&number_value(n)))
        .unwrap_or_default()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// Input Coercion
// ============================================================================

/// Convert raw control input into the value stored for `field`.
///
/// `None` means the input does not fit the field's control and is ignored.
pub fn coerce_input(field: &SimpleField, input: ControlInput) -> Option<Value> {
    let numeric = field.field_type().is_numeric();

    match (&field.kind, field.item_type, input) {
        (FieldKind::Boolean, _, ControlInput::Checked(checked)) => Some(Value::Bool(checked)),
        (FieldKind::String, Some(ItemType::MultiSelect), ControlInput::Selection(values)) => {
            Some(Value::Array(values.into_iter().map(Value::String).collect()))
        }
        (_, Some(ItemType::RadioButton), ControlInput::Choice(idx)) if numeric || matches!(field.kind, FieldKind::String) => {
            let options = options_for_input(field);
            let option = options.get(idx)?;
            if numeric {
                to_number(&option.value).map(number_value)
            } else {
                Some(Value::String(option.value_string()))
            }
        }
        (FieldKind::String, _, ControlInput::Text(text)) => Some(Value::String(truncate(text, field.max_length))),
        (FieldKind::Number | FieldKind::Integer, Some(ItemType::DropDown), ControlInput::Text(text)) => {
            Some(parse_number(&text).unwrap_or_else(|| Value::String(String::new())))
        }
        (FieldKind::Number | FieldKind::Integer, _, ControlInput::Text(text)) => {
            if text.trim().is_empty() {
                Some(Value::String(String::new()))
            } else {
                parse_number(&text)
            }
        }
        (_, _, input) => {
            tracing::warn!(key = %field.section_key, ?input, "Input does not match field control");
            None
        }
    }
}

/// Character-based cut, as an HTML `maxlength` attribute would apply
fn truncate(text: String, max_length: Option<u64>) -> String {
    match max_length {
        Some(max) if text.chars().count() as u64 > max => text.chars().take(max as usize).collect(),
        _ => text,
    }
}

// ============================================================================
// Tests
// ============================================================================
