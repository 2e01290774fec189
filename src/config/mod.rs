use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::cli::Cli;
use crate::error::{LeadformError, Result};
use crate::form::{FormMode, FormOptions, DEFAULT_SUBMIT_LABEL};
use crate::loader::SchemaLoader;
use crate::schema::NameSet;

/// Prefix of environment overrides, e.g. `LEADFORM_FORM__SUBMIT_LABEL`
pub const ENV_PREFIX: &str = "LEADFORM";

/// Country code used for lead submissions unless configured
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub form: FormSettings,
    pub schema: SchemaSettings,
    pub lead: LeadSettings,
}

/// Presentation of rendered forms
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormSettings {
    pub mode: FormMode,
    pub submit_label: String,
    pub hide_title: bool,
    pub hide_section_titles: Vec<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            mode: FormMode::Standalone,
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            hide_title: false,
            hide_section_titles: Vec::new(),
        }
    }
}

/// Rewrites applied to every adapted schema
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchemaSettings {
    /// Section titles blanked after adaptation
    pub strip_titles: Vec<String>,
    /// Fields (by title or name) removed after adaptation
    pub remove_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LeadSettings {
    pub country_code: String,
}

impl Default for LeadSettings {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl Settings {
    /// Load from an optional file plus `LEADFORM_*` environment overrides.
    ///
    /// Environment values stay strings so a country code keeps its `+`;
    /// name lists are only read from the file.
    pub fn load(config_path: &Path) -> Result<Self> {
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("form.mode", "standalone")?
            .set_default("form.submit_label", DEFAULT_SUBMIT_LABEL)?
            .set_default("lead.country_code", DEFAULT_COUNTRY_CODE)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!(path = %config_path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Load settings and apply CLI overrides (CLI > env vars > config file)
    pub fn new_with_cli(cli: &Cli) -> Result<Self> {
        let mut settings = Self::load(&cli.config)?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.form.mode = mode;
        }
        if cli.hide_title {
            self.form.hide_title = true;
        }
        self.form
            .hide_section_titles
            .extend(cli.hide_sections.iter().cloned());
    }

    pub fn validate(&self) -> Result<()> {
        validator::SettingsValidator::validate(self).map_err(|errors| {
            LeadformError::InvalidSettings(errors.iter().map(|e| e.to_string()).collect())
        })
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            mode: self.form.mode,
            submit_label: self.form.submit_label.clone(),
            hide_title: self.form.hide_title,
            hide_section_titles: NameSet::new(&self.form.hide_section_titles),
        }
    }

    /// Schema loader running the configured remove/strip pipeline
    pub fn schema_loader(&self) -> SchemaLoader {
        SchemaLoader::new()
            .with_remove_fields(NameSet::new(&self.schema.remove_fields))
            .with_strip_titles(NameSet::new(&self.schema.strip_titles))
    }
}
