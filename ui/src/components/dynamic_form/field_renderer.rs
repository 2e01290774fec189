//! Primitive Field Controls
//!
//! Maps each headless control to its HTML element. The element is chosen
//! once; its displayed value, checked and selected states follow the value
//! tree through a memo so typing never rebuilds the input.

use leadform::form::{render_field, validate_field, Control, ControlInput, FieldPath, RenderedField};
use leadform::schema::SimpleField;
use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen::JsCast;

use super::state::FormState;

const INPUT_CLASS: &str =
    "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

// ============================================================================
// Display State Readers
// ============================================================================

fn current_text(rendered: &Option<RenderedField>) -> String {
    match rendered.as_ref().map(|r| &r.control) {
        Some(
            Control::TextArea { value, .. }
            | Control::TextInput { value, .. }
            | Control::Select { value, .. }
            | Control::NumberInput { value, .. },
        ) => value.clone(),
        _ => String::new(),
    }
}

fn is_checked(rendered: &Option<RenderedField>) -> bool {
    matches!(
        rendered.as_ref().map(|r| &r.control),
        Some(Control::Checkbox { checked: true, .. })
    )
}

fn choice_selected(rendered: &Option<RenderedField>, idx: usize) -> bool {
    let choices = match rendered.as_ref().map(|r| &r.control) {
        Some(Control::Select { choices, .. } | Control::MultiSelect { choices } | Control::Radio { choices, .. }) => {
            choices
        }
        _ => return false,
    };
    choices.get(idx).is_some_and(|c| c.selected)
}

fn selected_values(ev: &web_sys::Event) -> Vec<String> {
    let select = event_target::<web_sys::HtmlSelectElement>(ev);
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|el| el.dyn_into::<web_sys::HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}

// ============================================================================
// Field Renderer
// ============================================================================

/// Label, control, description and advisory issues of one primitive field
#[component]
pub fn FieldRenderer(field: SimpleField, path: FieldPath, state: FormState) -> impl IntoView {
    let field = StoredValue::new(field);
    let path = StoredValue::new(path);

    let rendered = Memo::new(move |_| {
        let value = path.with_value(|p| state.get(p));
        field.with_value(|f| path.with_value(|p| render_field(f, value.as_ref(), p)))
    });

    // Issues show once the user has touched the field
    let touched = RwSignal::new(false);
    let issues = Memo::new(move |_| {
        let value = path.with_value(|p| state.get(p));
        field.with_value(|f| validate_field(f, value.as_ref()))
    });

    let apply = move |input: ControlInput| {
        touched.set(true);
        field.with_value(|f| path.with_value(|p| state.apply(f, p, input)));
    };

    let Some(initial) = rendered.get_untracked() else {
        return ().into_any();
    };
    let RenderedField {
        key,
        label,
        required,
        description,
        control,
    } = initial;

    let control_view = match control {
        Control::TextArea {
            placeholder,
            max_length,
            rows,
            ..
        } => view! {
            <textarea
                id=key.clone()
                class=INPUT_CLASS
                rows=rows.to_string()
                placeholder=placeholder
                maxlength=max_length.map(|m| m.to_string())
                prop:value=move || rendered.with(current_text)
                on:input=move |ev| apply(ControlInput::Text(event_target_value(&ev)))
            />
        }
        .into_any(),
        Control::TextInput {
            kind,
            placeholder,
            max_length,
            ..
        } => view! {
            <input
                id=key.clone()
                type=kind.as_html()
                class=INPUT_CLASS
                placeholder=placeholder
                maxlength=max_length.map(|m| m.to_string())
                prop:value=move || rendered.with(current_text)
                on:input=move |ev| apply(ControlInput::Text(event_target_value(&ev)))
            />
        }
        .into_any(),
        Control::Select {
            placeholder, choices, ..
        } => view! {
            <select
                id=key.clone()
                class=INPUT_CLASS
                on:change=move |ev| apply(ControlInput::Text(event_target_value(&ev)))
            >
                <option value="" prop:selected=move || rendered.with(current_text).is_empty()>
                    {placeholder}
                </option>
                {choices.into_iter().enumerate().map(|(idx, choice)| view! {
                    <option
                        value=choice.value
                        prop:selected=move || rendered.with(|r| choice_selected(r, idx))
                    >
                        {choice.label}
                    </option>
                }).collect_view()}
            </select>
        }
        .into_any(),
        Control::MultiSelect { choices } => view! {
            <select
                id=key.clone()
                multiple=true
                class=INPUT_CLASS
                on:change=move |ev| apply(ControlInput::Selection(selected_values(&ev)))
            >
                {choices.into_iter().enumerate().map(|(idx, choice)| view! {
                    <option
                        value=choice.value
                        prop:selected=move || rendered.with(|r| choice_selected(r, idx))
                    >
                        {choice.label}
                    </option>
                }).collect_view()}
            </select>
        }
        .into_any(),
        Control::Radio { group, choices, .. } => view! {
            <div class="flex flex-wrap gap-4" role="radiogroup">
                {choices.into_iter().enumerate().map(|(idx, choice)| view! {
                    <label class="inline-flex items-center gap-2 text-sm text-gray-700">
                        <input
                            type="radio"
                            name=group.clone()
                            value=choice.value
                            prop:checked=move || rendered.with(|r| choice_selected(r, idx))
                            on:change=move |_| apply(ControlInput::Choice(idx))
                        />
                        {choice.label}
                    </label>
                }).collect_view()}
            </div>
        }
        .into_any(),
        Control::NumberInput {
            placeholder,
            min,
            max,
            integer,
            ..
        } => {
            let step = if integer { "1" } else { "any" };
            view! {
                <input
                    id=key.clone()
                    type="number"
                    step=step
                    min=min.map(|v| v.to_string())
                    max=max.map(|v| v.to_string())
                    class=INPUT_CLASS
                    placeholder=placeholder
                    prop:value=move || rendered.with(current_text)
                    on:input=move |ev| apply(ControlInput::Text(event_target_value(&ev)))
                />
            }
            .into_any()
        }
        Control::Checkbox { caption, .. } => view! {
            <label class="inline-flex items-center gap-2 text-sm text-gray-700">
                <input
                    id=key.clone()
                    type="checkbox"
                    prop:checked=move || rendered.with(is_checked)
                    on:change=move |ev| apply(ControlInput::Checked(event_target_checked(&ev)))
                />
                {caption}
            </label>
        }
        .into_any(),
    };

    view! {
        <div class="lf-field" data-path=key.clone()>
            <label class="block text-sm font-medium text-gray-700 mb-1" for=key.clone()>
                {label}
                {required.then(|| view! { <span class="text-red-500">" *"</span> })}
            </label>
            {control_view}
            {(!description.is_empty()).then(|| view! {
                <p class="mt-1 text-xs text-gray-500">{description}</p>
            })}
            {move || {
                touched.get().then(|| {
                    issues.get().into_iter().map(|issue| view! {
                        <p class="mt-1 text-xs text-red-600">{issue.to_string()}</p>
                    }).collect_view()
                })
            }}
        </div>
    }
    .into_any()
}
