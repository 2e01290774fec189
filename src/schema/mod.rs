//! Form schema model, adaptation and transforms
//!
//! A raw template schema flows through [`adapt`] into a [`DynamicFormSchema`],
//! then optionally through [`remove_fields`] and [`strip_titles`].

pub mod adapter;
pub mod constants;
pub mod node;
pub mod transform;
pub mod types;

pub use adapter::{adapt, ITEM_KEY_SUFFIX, ROOT_KEY};
pub use constants::options_for_input;
pub use node::JsonNode;
pub use transform::{remove_fields, strip_titles, NameSet};
pub use types::{
    count_fields, string_of, DynamicFormSchema, FieldKind, FieldType, InputType, ItemType,
    OptionItem, SimpleField,
};
