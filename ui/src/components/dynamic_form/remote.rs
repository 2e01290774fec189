//! Remote Lead Form
//!
//! Fetches a template, adapts it and mounts a [`DynamicForm`]. A newer
//! fetch or unmounting makes older responses stale; those are dropped.

use leadform::form::FormOptions;
use leadform::loader::SchemaLoader;
use leadform::schema::DynamicFormSchema;
use leptos::prelude::*;
use serde_json::Value;

use super::form::DynamicForm;
use crate::api;

#[component]
pub fn RemoteLeadForm(
    /// Template URL, or lead-SDK catalogue URL when `sdk_catalogue` is set
    #[prop(into)]
    url: Signal<String>,
    /// Channel encoded uid (or action id) selecting the template
    #[prop(optional_no_strip)]
    channel: Option<String>,
    /// Treat `url` as the published lead-SDK catalogue
    #[prop(default = false)]
    sdk_catalogue: bool,
    /// Post-adaptation pipeline
    #[prop(default = SchemaLoader::new())]
    loader: SchemaLoader,
    #[prop(optional_no_strip)]
    initial_data: Option<Value>,
    #[prop(optional_no_strip)]
    options: Option<FormOptions>,
    #[prop(optional_no_strip)]
    on_change: Option<Callback<Value>>,
    #[prop(optional_no_strip)]
    on_submit: Option<Callback<Value>>,
) -> impl IntoView {
    let loader = StoredValue::new(loader);
    let schema = RwSignal::new(None::<DynamicFormSchema>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let url = url.get();
        let channel = channel.clone();
        let Some(ticket) = loader.try_update_value(|l| l.begin()) else {
            return;
        };
        error.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let raw = match channel.as_deref() {
                Some(channel) if sdk_catalogue => api::fetch_sdk_template(&url, channel).await,
                Some(channel) => api::fetch_template(&api::channel_template_url(&url, channel)).await,
                None => api::fetch_template(&url).await,
            };

            match raw {
                Ok(raw) => {
                    // None when the loader is gone or the ticket went stale
                    if let Some(adapted) = loader.try_with_value(|l| l.accept(ticket, &raw)).flatten() {
                        log::debug!("Loaded lead form with {} fields", adapted.field_count());
                        schema.set(Some(adapted));
                    }
                }
                Err(e) => {
                    if loader.try_with_value(|l| l.is_current(ticket)).unwrap_or(false) {
                        log::error!("Failed to load lead form: {}", e);
                        error.set(Some(e));
                    }
                }
            }
        });
    });

    on_cleanup(move || {
        loader.try_update_value(SchemaLoader::cancel);
    });

    let options = StoredValue::new(options);
    let initial_data = StoredValue::new(initial_data);

    view! {
        {move || error.get().map(|e| view! {
            <div class="p-3 text-sm text-red-700 bg-red-50 border border-red-200 rounded-md">{e}</div>
        })}
        {move || match schema.get() {
            Some(schema) => view! {
                <DynamicForm
                    schema=schema
                    initial_data=initial_data.get_value()
                    options=options.get_value()
                    on_change=on_change
                    on_submit=on_submit
                />
            }
            .into_any(),
            None => view! {
                <div class="p-4 text-sm text-gray-400 italic">"Loading form..."</div>
            }
            .into_any(),
        }}
    }
}
