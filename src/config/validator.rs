use thiserror::Error;

use crate::config::{FormSettings, LeadSettings, SchemaSettings, Settings};
use crate::form::FormMode;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Blank entry in {field} at index {index}")]
    BlankEntry { field: String, index: usize },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_form(&settings.form) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_schema(&settings.schema) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_lead(&settings.lead) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_form(form: &FormSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.mode == FormMode::Standalone && form.submit_label.trim().is_empty() {
            errors.push(ValidationError::MissingField("form.submit_label".to_string()));
        }
        errors.extend(blank_entries("form.hide_section_titles", &form.hide_section_titles));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_schema(schema: &SchemaSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = blank_entries("schema.strip_titles", &schema.strip_titles);
        errors.extend(blank_entries("schema.remove_fields", &schema.remove_fields));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_lead(lead: &LeadSettings) -> Result<(), Vec<ValidationError>> {
        let code = lead.country_code.as_str();
        let well_formed = code
            .strip_prefix('+')
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));

        if well_formed {
            Ok(())
        } else {
            Err(vec![ValidationError::InvalidValue {
                field: "lead.country_code".to_string(),
                reason: format!("'{code}' must be '+' followed by digits"),
            }])
        }
    }
}

fn blank_entries(field: &str, entries: &[String]) -> Vec<ValidationError> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.trim().is_empty())
        .map(|(index, _)| ValidationError::BlankEntry {
            field: field.to_string(),
            index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SettingsValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_blank_submit_label() {
        let mut settings = Settings::default();
        settings.form.submit_label = "  ".into();
        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingField("form.submit_label".into())]);

        settings.form.mode = FormMode::Embedded;
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut settings = Settings::default();
        settings.schema.strip_titles = vec!["Additional Info".into(), "".into()];
        settings.schema.remove_fields = vec![" ".into()];
        settings.lead.country_code = "91".into();

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::BlankEntry {
            field: "schema.strip_titles".into(),
            index: 1
        }));
    }

    #[test]
    fn test_country_code_shape() {
        for (code, ok) in [("+91", true), ("+1", true), ("+", false), ("+9a", false), ("", false)] {
            let mut settings = Settings::default();
            settings.lead.country_code = code.into();
            assert_eq!(SettingsValidator::validate(&settings).is_ok(), ok, "{code}");
        }
    }
}
