//! Array Field Component
//!
//! Element editor with add/remove. Elements follow the stored array length.

use leadform::form::{FieldPath, FormOptions};
use leadform::schema::{FieldKind, SimpleField};
use leptos::prelude::*;

use super::form::FieldNode;
use super::state::FormState;

// ============================================================================
// Array Field Editor
// ============================================================================

#[component]
pub fn ArrayField(
    field: SimpleField,
    path: FieldPath,
    state: FormState,
    options: StoredValue<FormOptions>,
) -> impl IntoView {
    let title = options.with_value(|o| o.section_title(&field.title));
    let item = StoredValue::new(field.items().cloned());
    let can_add = field.items().is_some();
    let path_attr = path.to_string();
    let path = StoredValue::new(path);

    let item_count = Memo::new(move |_| path.with_value(|p| state.element_count(p)));

    let on_add = move |_| path.with_value(|p| state.add_item(p));

    view! {
        <div class="border border-gray-200 rounded-lg p-3 bg-gray-50" data-path=path_attr>
            // Header with title and add button
            <div class="flex items-center justify-between mb-2">
                <span class="text-sm font-medium text-gray-700">{title}</span>
                <button
                    type="button"
                    class="px-2 py-1 text-xs rounded text-blue-600 hover:bg-blue-50"
                    on:click=on_add
                    disabled=!can_add
                >
                    "Add Item"
                </button>
            </div>

            {move || {
                let count = item_count.get();
                if count == 0 {
                    return view! {
                        <div class="text-sm text-gray-400 italic p-3 text-center">
                            "No items. Click \"Add Item\" to add one."
                        </div>
                    }
                    .into_any();
                }

                view! {
                    <div class="space-y-2">
                        {(0..count).map(|idx| {
                            let element_path = path.with_value(|p| p.push_index(idx));
                            view! {
                                <div class="border border-gray-200 rounded-lg p-2 bg-white">
                                    <div class="flex items-center justify-between mb-2">
                                        <span class="text-xs font-medium text-gray-600">
                                            {format!("#{}", idx + 1)}
                                        </span>
                                        <button
                                            type="button"
                                            class="text-xs text-red-500 hover:bg-red-50 px-2 py-1 rounded"
                                            on:click=move |_| path.with_value(|p| state.remove_item(p, idx))
                                        >
                                            "Remove"
                                        </button>
                                    </div>
                                    {item.get_value().map(|item| view! {
                                        <ArrayItemContent item=item path=element_path state=state options=options />
                                    })}
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// One element: object items render their children, primitive items one control
#[component]
fn ArrayItemContent(
    item: SimpleField,
    path: FieldPath,
    state: FormState,
    options: StoredValue<FormOptions>,
) -> impl IntoView {
    match item.kind {
        FieldKind::Object { fields } => view! {
            <div class="space-y-2">
                {fields.into_iter().map(|child| {
                    let child_path = path.push_key(&child.section_key);
                    view! { <FieldNode field=child path=child_path state=state options=options /> }
                }).collect_view()}
            </div>
        }
        .into_any(),
        _ => view! { <FieldNode field=item path=path state=state options=options /> }.into_any(),
    }
}
