//! # Leadform - schema-driven lead capture forms
//!
//! Leadform turns a loosely-typed, JSON-Schema-like template document into a
//! form: a normalized field tree, a live value tree shaped like it, and a
//! headless view that a UI layer renders.
//!
//! ## Pipeline
//!
//! - **Schema**: [`schema::adapt`] normalizes the raw document; [`schema::remove_fields`]
//!   and [`schema::strip_titles`] rewrite the result
//! - **Form**: [`form::initialize`] builds the value tree, [`form::DynamicForm`]
//!   routes edits through path updates and renders [`form::FormView`]s
//! - **Loader**: [`loader::SchemaLoader`] drops results of superseded requests
//! - **Lead**: static contact fields and the submission payload
//!
//! ## Quick Start
//!
//! ```rust
//! use leadform::form::{DynamicForm, FieldPath, FormOptions};
//! use leadform::schema::adapt;
//! use serde_json::json;
//!
//! let schema = adapt(&json!({
//!     "type": "object",
//!     "properties": { "firstName": { "type": "string", "title": "First Name" } },
//!     "required": ["firstName"]
//! }));
//!
//! let mut form = DynamicForm::new(schema, None, FormOptions::default());
//! form.set_value(&FieldPath::from_keys(["firstName"]), json!("Asha"));
//! assert_eq!(form.values().to_value(), json!({ "firstName": "Asha" }));
//! ```

pub mod document;
pub mod error;
pub mod form;
pub mod lead;
pub mod loader;
pub mod schema;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod config;

pub use error::{LeadformError, Result};
