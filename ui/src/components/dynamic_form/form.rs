//! Main Dynamic Form Component
//!
//! Renders a normalized schema against a live value tree, either as a
//! standalone form with its own submit button and scroll region or as an
//! embedded group of fields inside a caller-owned form.

use leadform::form::{build_view, initialize, FieldPath, FormMode, FormOptions, FormView};
use leadform::schema::{DynamicFormSchema, FieldKind, SimpleField};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use serde_json::Value;

use super::array_field::ArrayField;
use super::field_renderer::FieldRenderer;
use super::state::FormState;

// ============================================================================
// Main Component
// ============================================================================

/// Dynamic Form Component
///
/// Every edit replaces the value tree and hands the full tree to `on_change`.
/// `on_submit` fires from the standalone submit button only. Optional props
/// take `Option`s so wrappers can forward their own.
#[component]
pub fn DynamicForm(
    /// Normalized schema to render
    schema: DynamicFormSchema,
    /// Seed values, filtered by the schema's shape
    #[prop(optional_no_strip)]
    initial_data: Option<Value>,
    /// Mode, submit label and title visibility
    #[prop(optional_no_strip)]
    options: Option<FormOptions>,
    /// Receives the full value tree after every edit
    #[prop(optional_no_strip)]
    on_change: Option<Callback<Value>>,
    /// Receives the full value tree on submit
    #[prop(optional_no_strip)]
    on_submit: Option<Callback<Value>>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let initial = initialize(&schema.fields, initial_data.as_ref());
    let FormView {
        mode,
        title,
        description,
        submit,
        scrollable,
        ..
    } = build_view(&schema, &initial, &options);

    let fields = schema.fields.clone();
    let state = FormState::new(schema, initial, on_change);
    let options = StoredValue::new(options);

    let body = view! {
        {title.map(|t| view! { <h2 class="text-lg font-semibold text-gray-800 mb-1">{t}</h2> })}
        {description.map(|d| view! { <p class="text-sm text-gray-500 mb-4">{d}</p> })}
        <div class="space-y-4">
            {fields.into_iter().map(|field| {
                let path = FieldPath::root().push_key(&field.section_key);
                view! { <FieldNode field=field path=path state=state options=options /> }
            }).collect_view()}
        </div>
    };

    match mode {
        FormMode::Standalone => {
            let on_form_submit = move |ev: SubmitEvent| {
                ev.prevent_default();
                log::debug!("Submitting lead form");
                if let Some(on_submit) = on_submit {
                    on_submit.run(state.snapshot());
                }
            };
            let scroll_class = if scrollable { "flex-1 overflow-y-auto p-4" } else { "p-4" };

            view! {
                <form class="flex flex-col h-full" novalidate=true on:submit=on_form_submit>
                    <div class=scroll_class>{body}</div>
                    <div class="border-t border-gray-200 p-4 flex justify-end">
                        <button
                            type="submit"
                            class="px-4 py-2 text-sm font-medium text-white bg-blue-600 rounded-md hover:bg-blue-700"
                        >
                            {submit.unwrap_or_default()}
                        </button>
                    </div>
                </form>
            }
            .into_any()
        }
        FormMode::Embedded => view! {
            <div role="group" class="space-y-4">{body}</div>
        }
        .into_any(),
    }
}

// ============================================================================
// Field Dispatch
// ============================================================================

/// Sections for objects, element editors for arrays, controls for primitives
#[component]
pub fn FieldNode(
    field: SimpleField,
    path: FieldPath,
    state: FormState,
    options: StoredValue<FormOptions>,
) -> impl IntoView {
    match field.kind {
        FieldKind::Object { fields } => {
            let title = options.with_value(|o| o.section_title(&field.title));
            view! {
                <fieldset class="border border-gray-200 rounded-lg p-3 space-y-3" data-path=path.to_string()>
                    {title.map(|t| view! { <legend class="px-1 text-sm font-semibold text-gray-700">{t}</legend> })}
                    {fields.into_iter().map(|child| {
                        let child_path = path.push_key(&child.section_key);
                        view! { <FieldNode field=child path=child_path state=state options=options /> }
                    }).collect_view()}
                </fieldset>
            }
            .into_any()
        }
        FieldKind::Array { .. } => view! {
            <ArrayField field=field path=path state=state options=options />
        }
        .into_any(),
        _ => view! { <FieldRenderer field=field path=path state=state /> }.into_any(),
    }
}
