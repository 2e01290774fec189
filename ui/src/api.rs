//! Template fetches for remotely hosted lead forms

use gloo_net::http::Request;
use leadform::loader::LeadSdkDocument;
use serde_json::Value;

/// URL of the template served for one channel
pub fn channel_template_url(base: &str, channel: &str) -> String {
    format!("{}?channel={}", base, urlencoding::encode(channel))
}

/// Fetch a raw template document: a schema or a `templateSchema` wrapper
pub async fn fetch_template(url: &str) -> Result<Value, String> {
    fetch_json::<Value>(url).await
}

/// Fetch the lead-SDK catalogue and pick the template published for `channel`
pub async fn fetch_sdk_template(url: &str, channel: &str) -> Result<Value, String> {
    let document: LeadSdkDocument = fetch_json(url).await?;
    document
        .template_schema(channel)
        .cloned()
        .map_err(|e| e.to_string())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
