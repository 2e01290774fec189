//! Schema-Driven Lead Forms
//!
//! Renders an adapted form schema in the browser:
//! - Objects become fieldsets, arrays element editors with add/remove
//! - Primitives become the control the headless renderer picks
//! - Every control reads its display state from one value tree signal

pub mod array_field;
pub mod field_renderer;
pub mod form;
pub mod remote;
pub mod state;

pub use form::{DynamicForm, FieldNode};
pub use remote::RemoteLeadForm;
pub use state::FormState;
