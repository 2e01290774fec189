//! Form engine: value paths, state, rendering, orchestration and validation

pub mod orchestrator;
pub mod path;
pub mod render;
pub mod state;
pub mod validate;

pub use orchestrator::{
    add_item, build_view, remove_item, resolve_field, ArrayElement, DynamicForm, FormMode, FormNode,
    FormOptions, FormView, DEFAULT_SUBMIT_LABEL,
};
pub use path::{FieldPath, PathSegment};
pub use render::{coerce_input, render_field, Choice, Control, ControlInput, RenderedField, TextKind};
pub use state::{empty_value, init_field, initialize, new_element, ValueTree};
pub use validate::{is_valid_email, validate_field, validate_form, FieldIssue, FieldReport, ValidationReport};
