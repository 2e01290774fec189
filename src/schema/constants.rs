//! Built-in option lists for semantic input types

use super::types::{InputType, OptionItem, SimpleField};

/// (display name, value) pairs for `inputType = state`
pub const STATES: &[(&str, &str)] = &[
    ("Karnataka", "KA"),
    ("Kerala", "KL"),
    ("Tamil Nadu", "TN"),
    ("Maharashtra", "MH"),
];

/// (display name, value) pairs for `inputType = country`
pub const COUNTRIES: &[(&str, &str)] = &[
    ("India", "IN"),
    ("United States", "US"),
    ("United Kingdom", "GB"),
];

fn to_options(pairs: &[(&str, &str)]) -> Vec<OptionItem> {
    pairs
        .iter()
        .map(|(name, value)| OptionItem::new(*name, *value))
        .collect()
}

/// Options a field presents: the built-in list for state/country inputs, else its own
pub fn options_for_input(field: &SimpleField) -> Vec<OptionItem> {
    match field.input_type {
        Some(InputType::State) => to_options(STATES),
        Some(InputType::Country) => to_options(COUNTRIES),
        _ => field.options.clone(),
    }
}
