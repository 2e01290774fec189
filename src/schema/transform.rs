//! Tree-rewriting passes applied after adaptation
//!
//! Both passes are pure: they return a new schema and leave the input alone.

use super::types::{DynamicFormSchema, FieldKind, SimpleField};

/// Case-insensitive set of names, matched exactly after lowercasing.
///
/// Shared by title suppression, field removal and the orchestrator's
/// hide-section-titles option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameSet {
    names: Vec<String>,
}

impl NameSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        set.sort();
        set.dedup();
        Self { names: set }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Empty candidates never match
    pub fn contains(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let lowered = candidate.to_lowercase();
        self.names.binary_search(&lowered).is_ok()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        NameSet::new(iter)
    }
}

// ============================================================================
// Title Suppression
// ============================================================================

/// Blank every matching field title, array items included.
///
/// The schema's own top-level title is always blanked; its visibility is a
/// render-time decision.
pub fn strip_titles(schema: &DynamicFormSchema, titles: &NameSet) -> DynamicFormSchema {
    let mut stripped = schema.clone();
    stripped.title.clear();
    for field in &mut stripped.fields {
        strip_field_titles(field, titles);
    }
    tracing::debug!(patterns = titles.len(), "Stripped section titles");
    stripped
}

fn strip_field_titles(field: &mut SimpleField, titles: &NameSet) {
    if titles.contains(&field.title) {
        tracing::trace!(key = %field.section_key, title = %field.title, "Blanking title");
        field.title.clear();
    }

    match &mut field.kind {
        FieldKind::Object { fields } => {
            for child in fields {
                strip_field_titles(child, titles);
            }
        }
        FieldKind::Array { items: Some(item) } => strip_field_titles(item, titles),
        _ => {}
    }
}

// ============================================================================
// Field Removal
// ============================================================================

/// Drop every field whose title or alias matches, with its subtree.
///
/// A removed array item leaves the array in place with no element editor.
pub fn remove_fields(schema: &DynamicFormSchema, names: &NameSet) -> DynamicFormSchema {
    let before = schema.field_count();
    let pruned = DynamicFormSchema {
        fields: prune(&schema.fields, names),
        ..schema.clone()
    };
    tracing::debug!(
        removed = before - pruned.field_count(),
        "Removed fields from schema"
    );
    pruned
}

fn matches(field: &SimpleField, names: &NameSet) -> bool {
    names.contains(&field.title) || field.alias.as_deref().is_some_and(|a| names.contains(a))
}

fn prune(fields: &[SimpleField], names: &NameSet) -> Vec<SimpleField> {
    fields
        .iter()
        .filter(|f| !matches(f, names))
        .map(|f| prune_field(f, names))
        .collect()
}

fn prune_field(field: &SimpleField, names: &NameSet) -> SimpleField {
    let kind = match &field.kind {
        FieldKind::Object { fields } => FieldKind::Object {
            fields: prune(fields, names),
        },
        FieldKind::Array { items } => FieldKind::Array {
            items: items
                .as_deref()
                .filter(|item| !matches(item, names))
                .map(|item| Box::new(prune_field(item, names))),
        },
        scalar => scalar.clone(),
    };

    SimpleField {
        kind,
        ..field.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
