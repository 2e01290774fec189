//! Schema loading
//!
//! Fetching is done by the caller. [`SchemaLoader`] decides whether a
//! fetched document is still wanted and runs the adaptation pipeline on it.
//! [`LeadSdkDocument`] models the published lead-SDK catalogue that carries
//! template schemas per channel.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LeadformError, Result};
use crate::schema::{adapt, remove_fields, strip_titles, DynamicFormSchema, NameSet};

// ============================================================================
// Stale Result Guard
// ============================================================================

/// Identifies one schema request
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Hands out request tickets and turns fresh results into form schemas
#[derive(Clone, Debug, Default)]
pub struct SchemaLoader {
    latest: u64,
    cancelled: bool,
    remove_fields: NameSet,
    strip_titles: NameSet,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields dropped from every loaded schema
    pub fn with_remove_fields(mut self, names: NameSet) -> Self {
        self.remove_fields = names;
        self
    }

    /// Titles blanked in every loaded schema. An empty set skips the pass.
    pub fn with_strip_titles(mut self, titles: NameSet) -> Self {
        self.strip_titles = titles;
        self
    }

    /// Start a request. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        self.cancelled = false;
        tracing::debug!(ticket = self.latest, "Schema request started");
        LoadTicket(self.latest)
    }

    /// Abandon the outstanding request
    pub fn cancel(&mut self) {
        tracing::debug!(ticket = self.latest, "Schema request cancelled");
        self.cancelled = true;
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        !self.cancelled && ticket.0 == self.latest
    }

    /// Adapt `raw` if `ticket` is still the live request; stale results yield `None`
    pub fn accept(&self, ticket: LoadTicket, raw: &Value) -> Option<DynamicFormSchema> {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.latest,
                cancelled = self.cancelled,
                "Discarding stale schema result"
            );
            return None;
        }
        Some(self.prepare(raw))
    }

    /// Unwrap, adapt, remove fields, then strip titles
    pub fn prepare(&self, raw: &Value) -> DynamicFormSchema {
        let document = template_schema(raw);
        let mut schema = adapt(&document);
        if !self.remove_fields.is_empty() {
            schema = remove_fields(&schema, &self.remove_fields);
        }
        if !self.strip_titles.is_empty() {
            schema = strip_titles(&schema, &self.strip_titles);
        }
        schema
    }
}

/// The schema inside a template response.
///
/// A `templateSchema` member wins over the document itself; a string member
/// holding JSON text is parsed.
pub fn template_schema(raw: &Value) -> Cow<'_, Value> {
    match raw.get("templateSchema") {
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => Cow::Owned(parsed),
            Err(err) => {
                tracing::warn!(error = %err, "templateSchema is not valid JSON text");
                Cow::Borrowed(&raw["templateSchema"])
            }
        },
        Some(Value::Null) | None => Cow::Borrowed(raw),
        Some(inner) => Cow::Borrowed(inner),
    }
}

// ============================================================================
// Lead SDK Document
// ============================================================================

/// Channel an action submits leads to
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSdkChannel {
    pub id: i64,
    pub name: String,
    pub uid: String,
    pub encoded_uid: String,
    pub location_id: i64,
}

/// Form template attached to an action
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSdkTemplate {
    pub uid: String,
    pub template_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_schema: Option<Value>,
}

/// One published lead-capture action
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSdkAction {
    pub id: String,
    pub title: String,
    pub channel: LeadSdkChannel,
    pub product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<LeadSdkTemplate>,
}

/// Published lead-SDK catalogue
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSdkDocument {
    pub generated_at: String,
    pub source: String,
    pub account_id: i64,
    pub count: u64,
    pub actions: Vec<LeadSdkAction>,
}

impl LeadSdkDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Action whose channel encoded uid, or own id, equals `key`
    pub fn find_action(&self, key: &str) -> Option<&LeadSdkAction> {
        self.actions
            .iter()
            .find(|a| a.channel.encoded_uid == key)
            .or_else(|| self.actions.iter().find(|a| a.id == key))
    }

    /// Raw template schema for the action matching `key`
    pub fn template_schema(&self, key: &str) -> Result<&Value> {
        let action = self
            .find_action(key)
            .ok_or_else(|| LeadformError::UnknownChannel(key.to_string()))?;

        action
            .template
            .as_ref()
            .and_then(|t| t.template_schema.as_ref())
            .ok_or_else(|| LeadformError::MissingTemplate(action.id.clone()))
    }
}

// ============================================================================
// Tests
// ============================================================================
