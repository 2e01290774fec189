//! Options accepted from the embedding page

use leadform::form::{FormMode, FormOptions, DEFAULT_SUBMIT_LABEL};
use leadform::loader::SchemaLoader;
use leadform::schema::NameSet;
use serde::Deserialize;
use serde_json::Value;

/// Mount options as JSON, e.g. `{"mode":"embedded","hideSectionTitles":["Additional Info"]}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MountOptions {
    pub mode: FormMode,
    pub submit_label: Option<String>,
    pub hide_title: bool,
    pub hide_section_titles: Vec<String>,
    /// Section titles blanked after adaptation
    pub strip_titles: Vec<String>,
    /// Fields removed after adaptation
    pub remove_fields: Vec<String>,
    pub initial_data: Option<Value>,
}

impl MountOptions {
    /// Empty text means defaults
    pub fn parse(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| format!("Invalid mount options: {}", e))
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            mode: self.mode,
            submit_label: self
                .submit_label
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBMIT_LABEL.to_string()),
            hide_title: self.hide_title,
            hide_section_titles: NameSet::new(&self.hide_section_titles),
        }
    }

    pub fn loader(&self) -> SchemaLoader {
        SchemaLoader::new()
            .with_remove_fields(NameSet::new(&self.remove_fields))
            .with_strip_titles(NameSet::new(&self.strip_titles))
    }
}
