//! Browser bindings for lead forms
//!
//! Leptos components over the `leadform` engine plus `wasm_bindgen` entry
//! points for pages that mount a form by element id.

use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod api;
pub mod components;
mod types;

pub use components::dynamic_form::{DynamicForm, RemoteLeadForm};
pub use types::MountOptions;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second module instance on the page already owns the logger
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn target_element(id: &str) -> Result<web_sys::HtmlElement, JsValue> {
    document()
        .get_element_by_id(id)
        .ok_or_else(|| js_error(format!("No element with id '{}'", id)))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| js_error(format!("Element '{}' is not an HTML element", id)))
}

/// Wrap a page callback; it receives the value tree as JSON text
fn page_callback(function: Option<js_sys::Function>) -> Option<Callback<Value>> {
    let function = StoredValue::new_local(function?);
    Some(Callback::new(move |values: Value| {
        let payload = JsValue::from_str(&values.to_string());
        function.with_value(|f| {
            if let Err(err) = f.call1(&JsValue::NULL, &payload) {
                log::error!("Lead form callback failed: {:?}", err);
            }
        });
    }))
}

/// Mount a form for `schema_json` into the element with id `target_id`.
///
/// `options_json` holds [`MountOptions`] and may be empty.
#[wasm_bindgen]
pub fn mount_lead_form(
    target_id: &str,
    schema_json: &str,
    options_json: &str,
    on_submit: Option<js_sys::Function>,
    on_change: Option<js_sys::Function>,
) -> Result<(), JsValue> {
    let raw: Value =
        serde_json::from_str(schema_json).map_err(|e| js_error(format!("Invalid schema JSON: {}", e)))?;
    let mount = MountOptions::parse(options_json).map_err(js_error)?;
    let schema = mount.loader().prepare(&raw);
    let target = target_element(target_id)?;

    log::info!("Mounting lead form with {} fields into #{}", schema.field_count(), target_id);

    let options = mount.form_options();
    let initial_data = mount.initial_data;
    let on_submit = page_callback(on_submit);
    let on_change = page_callback(on_change);

    leptos::mount::mount_to(target, move || {
        view! {
            <DynamicForm
                schema=schema
                initial_data=initial_data
                options=Some(options)
                on_change=on_change
                on_submit=on_submit
            />
        }
    })
    .forget();
    Ok(())
}

/// Mount a form whose template is fetched from `url`.
///
/// With `channel`, `url` is the lead-SDK catalogue and the channel's
/// template is used.
#[wasm_bindgen]
pub fn mount_remote_lead_form(
    target_id: &str,
    url: String,
    channel: Option<String>,
    options_json: &str,
    on_submit: Option<js_sys::Function>,
) -> Result<(), JsValue> {
    let mount = MountOptions::parse(options_json).map_err(js_error)?;
    let target = target_element(target_id)?;

    let sdk_catalogue = channel.is_some();
    let loader = mount.loader();
    let options = mount.form_options();
    let initial_data = mount.initial_data;
    let on_submit = page_callback(on_submit);

    leptos::mount::mount_to(target, move || {
        view! {
            <RemoteLeadForm
                url=url
                channel=channel
                sdk_catalogue=sdk_catalogue
                loader=loader
                initial_data=initial_data
                options=Some(options)
                on_submit=on_submit
            />
        }
    })
    .forget();
    Ok(())
}
