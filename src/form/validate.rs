//! Advisory field validation
//!
//! Issues are reported, never enforced: values are not modified and
//! submission is not blocked.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use super::path::FieldPath;
use super::state::ValueTree;
use crate::schema::node::to_number;
use crate::schema::{options_for_input, string_of, DynamicFormSchema, FieldKind, InputType, ItemType, SimpleField};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Check an email address shape (`x@y.z`, no whitespace)
pub fn is_valid_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

/// A problem with one field value. `Display` is the user-facing message.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldIssue {
    #[error("This field is required")]
    Required,

    #[error("Must be at most {max} characters")]
    TooLong { max: u64 },

    #[error("Must be a number")]
    NotANumber,

    #[error("Must be a whole number")]
    NotAnInteger,

    #[error("Must be true or false")]
    NotABoolean,

    #[error("Must be a group of fields")]
    NotAnObject,

    #[error("Must be a list")]
    NotAList,

    #[error("Must be at least {min}")]
    BelowMinimum { min: f64 },

    #[error("Must be at most {max}")]
    AboveMaximum { max: f64 },

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("\"{value}\" is not one of the available options")]
    UnknownOption { value: String },
}

impl Serialize for FieldIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Issues found for one field path
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldReport {
    pub path: FieldPath,
    pub issues: Vec<FieldIssue>,
}

/// Every field with at least one issue, in form order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub fields: Vec<FieldReport>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.fields.iter().map(|f| f.issues.len()).sum()
    }

    /// Issues recorded for a display path such as `contacts[0].phone`
    pub fn issues_at(&self, path: &str) -> &[FieldIssue] {
        self.fields
            .iter()
            .find(|f| f.path.to_string() == path)
            .map(|f| f.issues.as_slice())
            .unwrap_or_default()
    }

    fn record(&mut self, path: &FieldPath, issues: Vec<FieldIssue>) {
        if !issues.is_empty() {
            self.fields.push(FieldReport {
                path: path.clone(),
                issues,
            });
        }
    }
}

/// Blank strings, null, and empty sequences count as not entered. `false` is a value.
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(values)) => values.is_empty(),
        _ => false,
    }
}

/// Validate one field's own value. Container children are not visited.
pub fn validate_field(field: &SimpleField, value: Option<&Value>) -> Vec<FieldIssue> {
    if is_empty(value) {
        return if field.required && !field.is_object() {
            vec![FieldIssue::Required]
        } else {
            Vec::new()
        };
    }
    let Some(value) = value else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    match &field.kind {
        FieldKind::String => check_string(field, value, &mut issues),
        FieldKind::Number | FieldKind::Integer => check_number(field, value, &mut issues),
        FieldKind::Boolean if !value.is_boolean() => issues.push(FieldIssue::NotABoolean),
        FieldKind::Object { .. } if !value.is_object() => issues.push(FieldIssue::NotAnObject),
        FieldKind::Array { .. } if !value.is_array() => issues.push(FieldIssue::NotAList),
        _ => {}
    }
    issues
}

fn check_string(field: &SimpleField, value: &Value, issues: &mut Vec<FieldIssue>) {
    if let Value::Array(selected) = value {
        check_options(field, selected.iter(), issues);
        return;
    }

    let text = string_of(value);
    if let Some(max) = field.max_length {
        if text.chars().count() as u64 > max {
            issues.push(FieldIssue::TooLong { max });
        }
    }
    if field.input_type == Some(InputType::Email) && !is_valid_email(text.trim()) {
        issues.push(FieldIssue::InvalidEmail);
    }
    check_options(field, std::iter::once(value), issues);
}

fn check_number(field: &SimpleField, value: &Value, issues: &mut Vec<FieldIssue>) {
    let Some(n) = to_number(value) else {
        issues.push(FieldIssue::NotANumber);
        return;
    };

    if matches!(field.kind, FieldKind::Integer) && n.fract() != 0.0 {
        issues.push(FieldIssue::NotAnInteger);
    }
    if let Some(min) = field.minimum.filter(|min| n < *min) {
        issues.push(FieldIssue::BelowMinimum { min });
    }
    if let Some(max) = field.maximum.filter(|max| n > *max) {
        issues.push(FieldIssue::AboveMaximum { max });
    }
    check_options(field, std::iter::once(value), issues);
}

/// Selection controls must hold one of their option values
fn check_options<'a>(
    field: &SimpleField,
    values: impl Iterator<Item = &'a Value>,
    issues: &mut Vec<FieldIssue>,
) {
    let is_selection = matches!(
        field.item_type,
        Some(ItemType::DropDown | ItemType::RadioButton | ItemType::MultiSelect)
    );
    let options = options_for_input(field);
    if !is_selection || options.is_empty() {
        return;
    }

    let numeric = field.field_type().is_numeric();
    for value in values {
        let known = options.iter().any(|opt| {
            if numeric {
                to_number(value).is_some() && to_number(value) == to_number(&opt.value)
            } else {
                opt.value_string() == string_of(value)
            }
        });
        if !known {
            issues.push(FieldIssue::UnknownOption {
                value: string_of(value),
            });
        }
    }
}

/// Validate the whole value tree, array elements included
pub fn validate_form(schema: &DynamicFormSchema, values: &ValueTree) -> ValidationReport {
    let mut report = ValidationReport::default();
    walk(&schema.fields, values, &FieldPath::root(), &mut report);
    tracing::debug!(issues = report.issue_count(), "Validated form values");
    report
}

fn walk(fields: &[SimpleField], values: &ValueTree, base: &FieldPath, report: &mut ValidationReport) {
    for field in fields {
        let path = base.push_key(&field.section_key);
        walk_field(field, values, &path, report);
    }
}

fn walk_field(field: &SimpleField, values: &ValueTree, path: &FieldPath, report: &mut ValidationReport) {
    let value = values.get(path);
    report.record(path, validate_field(field, value));

    match &field.kind {
        // A scalar in place of an object is reported once, not per child
        FieldKind::Object { fields } if value.is_none_or(|v| v.is_object() || is_empty(Some(v))) => {
            walk(fields, values, path, report)
        }
        FieldKind::Array { items: Some(item) } => {
            let len = value.and_then(Value::as_array).map_or(0, Vec::len);
            for idx in 0..len {
                walk_field(item, values, &path.push_index(idx), report);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::state::initialize;
    use crate::schema::{adapt, OptionItem};
    use serde_json::json;

    fn string_field() -> SimpleField {
        SimpleField::new("s", FieldKind::String)
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn test_required_emptiness() {
        let mut f = string_field();
        f.required = true;
        assert_eq!(validate_field(&f, Some(&json!("  "))), vec![FieldIssue::Required]);
        assert_eq!(validate_field(&f, None), vec![FieldIssue::Required]);
        assert!(validate_field(&f, Some(&json!("x"))).is_empty());

        let mut b = SimpleField::new("b", FieldKind::Boolean);
        b.required = true;
        assert!(validate_field(&b, Some(&json!(false))).is_empty());

        let mut n = SimpleField::new("n", FieldKind::Number);
        n.required = true;
        assert_eq!(validate_field(&n, Some(&json!(""))), vec![FieldIssue::Required]);
        assert!(validate_field(&n, Some(&json!(0))).is_empty());
    }

    #[test]
    fn test_optional_empty_is_fine() {
        let mut f = string_field();
        f.input_type = Some(InputType::Email);
        assert!(validate_field(&f, Some(&json!(""))).is_empty());
        assert_eq!(validate_field(&f, Some(&json!("nope"))), vec![FieldIssue::InvalidEmail]);
    }

    #[test]
    fn test_length_and_bounds() {
        let mut f = string_field();
        f.max_length = Some(2);
        assert_eq!(validate_field(&f, Some(&json!("abc"))), vec![FieldIssue::TooLong { max: 2 }]);

        let mut n = SimpleField::new("n", FieldKind::Integer);
        n.minimum = Some(1.0);
        n.maximum = Some(10.0);
        assert_eq!(validate_field(&n, Some(&json!(0))), vec![FieldIssue::BelowMinimum { min: 1.0 }]);
        assert_eq!(validate_field(&n, Some(&json!(11))), vec![FieldIssue::AboveMaximum { max: 10.0 }]);
        assert_eq!(validate_field(&n, Some(&json!(2.5))), vec![FieldIssue::NotAnInteger]);
        assert_eq!(validate_field(&n, Some(&json!("many"))), vec![FieldIssue::NotANumber]);
    }

    #[test]
    fn test_option_membership() {
        let mut f = string_field();
        f.item_type = Some(ItemType::DropDown);
        f.options = vec![OptionItem::new("A", "a")];
        assert!(validate_field(&f, Some(&json!("a"))).is_empty());
        assert_eq!(
            validate_field(&f, Some(&json!("z"))),
            vec![FieldIssue::UnknownOption { value: "z".into() }]
        );

        f.item_type = None;
        assert!(validate_field(&f, Some(&json!("z"))).is_empty());

        let mut m = string_field();
        m.item_type = Some(ItemType::MultiSelect);
        m.options = vec![OptionItem::new("A", "a"), OptionItem::new("B", "b")];
        assert_eq!(validate_field(&m, Some(&json!(["a", "q"]))).len(), 1);
    }

    #[test]
    fn test_shape_mismatches() {
        let b = SimpleField::new("b", FieldKind::Boolean);
        assert_eq!(validate_field(&b, Some(&json!("yes"))), vec![FieldIssue::NotABoolean]);

        let o = SimpleField::new("o", FieldKind::Object { fields: Vec::new() });
        assert_eq!(validate_field(&o, Some(&json!("oops"))), vec![FieldIssue::NotAnObject]);
        assert!(validate_field(&o, Some(&json!({}))).is_empty());

        let a = SimpleField::new("a", FieldKind::Array { items: None });
        assert_eq!(validate_field(&a, Some(&json!(3))), vec![FieldIssue::NotAList]);
    }

    #[test]
    fn test_validate_form_reports_values_as_given() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "age": { "type": "integer", "minimum": 18 },
                "addr": {
                    "type": "object",
                    "required": ["line"],
                    "properties": { "line": { "type": "string" } }
                }
            }
        }));
        let values: ValueTree = serde_json::from_value(json!({ "age": "abc", "addr": "oops" })).unwrap();

        let report = validate_form(&schema, &values);
        assert_eq!(report.issues_at("age"), &[FieldIssue::NotANumber]);
        assert_eq!(report.issues_at("addr"), &[FieldIssue::NotAnObject]);
        assert!(report.issues_at("addr.line").is_empty());
        assert_eq!(report.issue_count(), 2);
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(FieldIssue::Required.to_string(), "This field is required");
        assert_eq!(FieldIssue::TooLong { max: 200 }.to_string(), "Must be at most 200 characters");
        assert_eq!(FieldIssue::BelowMinimum { min: 1.5 }.to_string(), "Must be at least 1.5");
    }

    #[test]
    fn test_validate_form_walks_arrays() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "contacts": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["phone"],
                        "properties": { "phone": { "type": "string" } }
                    }
                }
            },
            "required": ["name"]
        }));
        let values = initialize(
            &schema.fields,
            Some(&json!({ "name": "Asha", "contacts": [{ "phone": "1" }, { "phone": "" }] })),
        );

        let report = validate_form(&schema, &values);
        assert!(!report.is_valid());
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.issues_at("contacts[1].phone"), &[FieldIssue::Required]);
        assert!(report.issues_at("contacts[0].phone").is_empty());

        let serialized = serde_json::to_value(&report).unwrap();
        assert_eq!(serialized["fields"][0]["path"], "contacts[1].phone");
        assert_eq!(serialized["fields"][0]["issues"][0], "This field is required");
    }

    #[test]
    fn test_validate_form_does_not_touch_values() {
        let schema = adapt(&json!({
            "type": "object",
            "properties": { "n": { "type": "number", "maximum": 1 } }
        }));
        let values = initialize(&schema.fields, Some(&json!({ "n": 5 })));
        let before = values.clone();
        let report = validate_form(&schema, &values);
        assert_eq!(report.issue_count(), 1);
        assert_eq!(values, before);
    }
}
