use std::fs;

use clap::Parser;
use leadform::cli::Cli;
use leadform::config::Settings;
use leadform::form::FormMode;
use tempfile::TempDir;

#[test]
fn test_load_toml_settings() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("leadform.toml");

    let leadform_toml = r#"
[form]
mode = "embedded"
hide_title = true
hide_section_titles = ["Additional Info"]

[schema]
strip_titles = ["Contacts"]
remove_fields = ["budget", "Phone"]

[lead]
country_code = "+1"
"#;
    fs::write(&path, leadform_toml)?;

    let settings = Settings::load(&path)?;
    assert_eq!(settings.form.mode, FormMode::Embedded);
    assert!(settings.form.hide_title);
    assert_eq!(settings.form.hide_section_titles, vec!["Additional Info"]);
    // Unset keys keep their defaults
    assert_eq!(settings.form.submit_label, "Submit");
    assert_eq!(settings.schema.remove_fields, vec!["budget", "Phone"]);
    assert_eq!(settings.lead.country_code, "+1");
    assert!(settings.validate().is_ok());

    Ok(())
}

#[test]
fn test_load_yaml_settings() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("leadform.yaml");

    let leadform_yaml = r#"
form:
  submit_label: Book a visit
schema:
  strip_titles:
    - Additional Info
"#;
    fs::write(&path, leadform_yaml)?;

    let settings = Settings::load(&path)?;
    assert_eq!(settings.form.mode, FormMode::Standalone);
    assert_eq!(settings.form.submit_label, "Book a visit");
    assert_eq!(settings.schema.strip_titles, vec!["Additional Info"]);
    assert_eq!(settings.lead.country_code, "+91");

    Ok(())
}

#[test]
fn test_cli_overrides_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("leadform.toml");
    fs::write(
        &path,
        "[form]\nmode = \"embedded\"\nhide_section_titles = [\"Additional Info\"]\n",
    )?;

    let config = path.to_string_lossy().to_string();
    let cli = Cli::parse_from([
        "leadform",
        "--config",
        config.as_str(),
        "--mode",
        "standalone",
        "--hide-title",
        "--hide-section",
        "Contacts",
        "adapt",
        "schema.json",
    ]);

    let settings = Settings::new_with_cli(&cli)?;
    assert_eq!(settings.form.mode, FormMode::Standalone);
    assert!(settings.form.hide_title);
    assert_eq!(settings.form.hide_section_titles, vec!["Additional Info", "Contacts"]);

    let options = settings.form_options();
    assert!(options.hide_section_titles.contains("contacts"));

    Ok(())
}

#[test]
fn test_invalid_settings_are_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("leadform.toml");
    fs::write(&path, "[form]\nsubmit_label = \" \"\n\n[lead]\ncountry_code = \"0091\"\n")?;

    let config = path.to_string_lossy().to_string();
    let cli = Cli::parse_from(["leadform", "--config", config.as_str(), "adapt", "schema.json"]);

    let err = Settings::new_with_cli(&cli).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("form.submit_label"), "{message}");
    assert!(message.contains("lead.country_code"), "{message}");

    Ok(())
}
