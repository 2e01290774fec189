//! Form orchestrator
//!
//! Walks the field tree against the live value tree and produces a headless
//! view: sections for objects, element lists for arrays, rendered controls
//! for primitives. [`DynamicForm`] owns the values and routes every edit
//! through a path `set`, notifying the consumer with the full tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path::{FieldPath, PathSegment};
use super::render::{coerce_input, render_field, ControlInput, RenderedField};
use super::state::{initialize, new_element, ValueTree};
use super::validate::{validate_field, validate_form, FieldIssue, ValidationReport};
use crate::schema::{DynamicFormSchema, FieldKind, NameSet, SimpleField};

/// Default label of the submit control
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

// ============================================================================
// Options
// ============================================================================

/// Operating mode of a form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Owns its submit control and scroll region
    #[default]
    Standalone,
    /// Fields only, composed inside a caller-owned form
    Embedded,
}

/// Caller-controlled presentation settings
#[derive(Clone, Debug, PartialEq)]
pub struct FormOptions {
    pub mode: FormMode,
    pub submit_label: String,
    pub hide_title: bool,
    pub hide_section_titles: NameSet,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            mode: FormMode::Standalone,
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            hide_title: false,
            hide_section_titles: NameSet::default(),
        }
    }
}

impl FormOptions {
    pub fn embedded() -> Self {
        Self {
            mode: FormMode::Embedded,
            ..Self::default()
        }
    }

    /// Title shown for a section, `None` when blank or hidden
    pub fn section_title(&self, title: &str) -> Option<String> {
        if title.is_empty() || self.hide_section_titles.contains(title) {
            None
        } else {
            Some(title.to_string())
        }
    }
}

// ============================================================================
// View Tree
// ============================================================================

/// One element slot of an array editor
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayElement {
    pub index: usize,
    pub path: FieldPath,
    /// Object items render their children; primitive items a single field
    pub content: Vec<FormNode>,
}

/// Node of the rendered form
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FormNode {
    Section {
        path: FieldPath,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        children: Vec<FormNode>,
    },
    Array {
        path: FieldPath,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        elements: Vec<ArrayElement>,
        /// False when the array has no element description
        can_add: bool,
    },
    Field(RenderedField),
}

/// Complete headless view of a form
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    pub mode: FormMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<FormNode>,
    /// Submit label, standalone mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<String>,
    /// Whether the form provides its own scroll region
    pub scrollable: bool,
}

impl FormView {
    /// Every rendered field, depth first
    pub fn fields(&self) -> Vec<&RenderedField> {
        let mut out = Vec::new();
        collect_fields(&self.nodes, &mut out);
        out
    }
}

fn collect_fields<'a>(nodes: &'a [FormNode], out: &mut Vec<&'a RenderedField>) {
    for node in nodes {
        match node {
            FormNode::Section { children, .. } => collect_fields(children, out),
            FormNode::Array { elements, .. } => {
                for element in elements {
                    collect_fields(&element.content, out);
                }
            }
            FormNode::Field(field) => out.push(field),
        }
    }
}

/// Build the view of `schema` for the current `values`
pub fn build_view(schema: &DynamicFormSchema, values: &ValueTree, options: &FormOptions) -> FormView {
    let standalone = options.mode == FormMode::Standalone;
    let title = schema.title.trim();

    FormView {
        mode: options.mode,
        title: (!options.hide_title && !title.is_empty()).then(|| schema.title.clone()),
        description: (!schema.description.is_empty()).then(|| schema.description.clone()),
        nodes: build_nodes(&schema.fields, values, &FieldPath::root(), options),
        submit: standalone.then(|| options.submit_label.clone()),
        scrollable: standalone,
    }
}

fn build_nodes(fields: &[SimpleField], values: &ValueTree, base: &FieldPath, options: &FormOptions) -> Vec<FormNode> {
    fields
        .iter()
        .filter_map(|field| build_node(field, values, &base.push_key(&field.section_key), options))
        .collect()
}

fn build_node(field: &SimpleField, values: &ValueTree, path: &FieldPath, options: &FormOptions) -> Option<FormNode> {
    match &field.kind {
        FieldKind::Object { fields } => Some(FormNode::Section {
            path: path.clone(),
            title: options.section_title(&field.title),
            children: build_nodes(fields, values, path, options),
        }),
        FieldKind::Array { items } => {
            let len = values.get(path).and_then(Value::as_array).map_or(0, Vec::len);
            let elements = match items.as_deref() {
                Some(item) => (0..len)
                    .map(|index| {
                        let element_path = path.push_index(index);
                        let content = match &item.kind {
                            FieldKind::Object { fields } => build_nodes(fields, values, &element_path, options),
                            _ => build_node(item, values, &element_path, options).into_iter().collect(),
                        };
                        ArrayElement {
                            index,
                            path: element_path,
                            content,
                        }
                    })
                    .collect(),
                None => Vec::new(),
            };

            Some(FormNode::Array {
                path: path.clone(),
                title: options.section_title(&field.title),
                elements,
                can_add: items.is_some(),
            })
        }
        _ => render_field(field, values.get(path), path).map(FormNode::Field),
    }
}

// ============================================================================
// Tree Operations
// ============================================================================

/// Find the field a value path points at. Index segments step into array items.
pub fn resolve_field<'a>(fields: &'a [SimpleField], path: &FieldPath) -> Option<&'a SimpleField> {
    let mut current: Option<&SimpleField> = None;

    for segment in path.segments() {
        current = match (current, segment) {
            (None, PathSegment::Key(key)) => fields.iter().find(|f| &f.section_key == key),
            (Some(field), PathSegment::Key(key)) => field.fields().iter().find(|f| &f.section_key == key),
            (Some(field), PathSegment::Index(_)) => field.items(),
            (None, PathSegment::Index(_)) => None,
        };
        current?;
    }
    current
}

/// Append a freshly initialized element to the array at `path`.
///
/// `None` when the path is not an array with an element description.
pub fn add_item(fields: &[SimpleField], values: &ValueTree, path: &FieldPath) -> Option<ValueTree> {
    let item = resolve_field(fields, path)?.items()?;
    let mut elements = values.get(path).and_then(Value::as_array).cloned().unwrap_or_default();
    elements.push(new_element(item));
    tracing::debug!(path = %path, len = elements.len(), "Added array element");
    Some(values.set(path, Value::Array(elements)))
}

/// Remove element `index` of the array at `path`; later elements shift down.
pub fn remove_item(values: &ValueTree, path: &FieldPath, index: usize) -> Option<ValueTree> {
    let mut elements = values.get(path).and_then(Value::as_array).cloned()?;
    if index >= elements.len() {
        return None;
    }
    elements.remove(index);
    tracing::debug!(path = %path, index, "Removed array element");
    Some(values.set(path, Value::Array(elements)))
}

// ============================================================================
// Dynamic Form
// ============================================================================

type Listener = Box<dyn FnMut(&ValueTree)>;

/// A mounted form: schema, options and the live value tree
pub struct DynamicForm {
    schema: DynamicFormSchema,
    options: FormOptions,
    seed: Option<Value>,
    values: ValueTree,
    on_change: Option<Listener>,
    on_submit: Option<Listener>,
}

impl DynamicForm {
    pub fn new(schema: DynamicFormSchema, seed: Option<Value>, options: FormOptions) -> Self {
        let values = initialize(&schema.fields, seed.as_ref());
        Self {
            schema,
            options,
            seed,
            values,
            on_change: None,
            on_submit: None,
        }
    }

    /// Called with the full value tree after every edit, in both modes
    pub fn on_change(mut self, listener: impl FnMut(&ValueTree) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Called with the full value tree on submit, standalone mode only
    pub fn on_submit(mut self, listener: impl FnMut(&ValueTree) + 'static) -> Self {
        self.on_submit = Some(Box::new(listener));
        self
    }

    pub fn schema(&self) -> &DynamicFormSchema {
        &self.schema
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn values(&self) -> &ValueTree {
        &self.values
    }

    pub fn view(&self) -> FormView {
        build_view(&self.schema, &self.values, &self.options)
    }

    fn replace(&mut self, next: ValueTree) {
        self.values = next;
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.values);
        }
    }

    /// Store `value` at `path` and notify
    pub fn set_value(&mut self, path: &FieldPath, value: Value) {
        let next = self.values.set(path, value);
        self.replace(next);
    }

    /// Coerce raw control input for the primitive at `path` and store it.
    ///
    /// Returns false when the path is not a primitive field or the input
    /// does not fit its control.
    pub fn apply_input(&mut self, path: &FieldPath, input: ControlInput) -> bool {
        let Some(field) = resolve_field(&self.schema.fields, path).filter(|f| f.is_scalar()) else {
            tracing::warn!(path = %path, "No primitive field at path");
            return false;
        };
        match coerce_input(field, input) {
            Some(value) => {
                self.set_value(path, value);
                true
            }
            None => false,
        }
    }

    pub fn add_item(&mut self, path: &FieldPath) -> bool {
        match add_item(&self.schema.fields, &self.values, path) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => {
                tracing::warn!(path = %path, "Cannot add element: no array item description");
                false
            }
        }
    }

    pub fn remove_item(&mut self, path: &FieldPath, index: usize) -> bool {
        match remove_item(&self.values, path, index) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    /// Hand the full value tree to the submit listener. Embedded forms never submit.
    pub fn submit(&mut self) -> bool {
        if self.options.mode == FormMode::Embedded {
            return false;
        }
        tracing::debug!(fields = self.values.len(), "Submitting form");
        if let Some(listener) = self.on_submit.as_mut() {
            listener(&self.values);
        }
        true
    }

    /// Discard edits and reinitialize from the schema and seed
    pub fn reset(&mut self) {
        let next = initialize(&self.schema.fields, self.seed.as_ref());
        self.replace(next);
    }

    pub fn validate(&self) -> ValidationReport {
        validate_form(&self.schema, &self.values)
    }

    /// Issues for the single field at `path`, for validation on edit
    pub fn validate_at(&self, path: &FieldPath) -> Vec<FieldIssue> {
        resolve_field(&self.schema.fields, path)
            .map(|field| validate_field(field, self.values.get(path)))
            .unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
