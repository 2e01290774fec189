//! Reactive handle on a mounted form's value tree

use leadform::form::{add_item, coerce_input, remove_item, ControlInput, FieldPath, ValueTree};
use leadform::schema::{DynamicFormSchema, SimpleField};
use leptos::prelude::*;
use serde_json::Value;

/// Shared by every component of one form. All edits go through `commit`,
/// which replaces the tree and notifies the consumer.
#[derive(Clone, Copy)]
pub struct FormState {
    pub values: RwSignal<ValueTree>,
    schema: StoredValue<DynamicFormSchema>,
    on_change: Option<Callback<Value>>,
}

impl FormState {
    pub fn new(schema: DynamicFormSchema, initial: ValueTree, on_change: Option<Callback<Value>>) -> Self {
        Self {
            values: RwSignal::new(initial),
            schema: StoredValue::new(schema),
            on_change,
        }
    }

    /// Tracked read of the value at `path`
    pub fn get(&self, path: &FieldPath) -> Option<Value> {
        self.values.with(|tree| tree.get(path).cloned())
    }

    /// Untracked copy of the whole tree
    pub fn snapshot(&self) -> Value {
        self.values.with_untracked(ValueTree::to_value)
    }

    pub fn commit(&self, next: ValueTree) {
        let payload = next.to_value();
        self.values.set(next);
        if let Some(on_change) = self.on_change {
            on_change.run(payload);
        }
    }

    /// Coerce control input for `field` and store it at `path`
    pub fn apply(&self, field: &SimpleField, path: &FieldPath, input: ControlInput) {
        let Some(value) = coerce_input(field, input) else {
            return;
        };
        let next = self.values.with_untracked(|tree| tree.set(path, value));
        self.commit(next);
    }

    pub fn add_item(&self, path: &FieldPath) {
        let next = self
            .schema
            .with_value(|schema| self.values.with_untracked(|tree| add_item(&schema.fields, tree, path)));
        match next {
            Some(next) => self.commit(next),
            None => log::warn!("No element description for array at {path}"),
        }
    }

    pub fn remove_item(&self, path: &FieldPath, index: usize) {
        if let Some(next) = self.values.with_untracked(|tree| remove_item(tree, path, index)) {
            self.commit(next);
        }
    }

    /// Number of elements currently stored for the array at `path`
    pub fn element_count(&self, path: &FieldPath) -> usize {
        self.values
            .with(|tree| tree.get(path).and_then(Value::as_array).map_or(0, Vec::len))
    }
}
