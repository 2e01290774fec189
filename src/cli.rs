use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::Value;

use crate::config::Settings;
use crate::document::read_document;
use crate::error::Result;
use crate::form::{build_view, initialize, validate_form, ValueTree};
use crate::loader::LeadSdkDocument;
use crate::schema::DynamicFormSchema;

/// Lead form tool - adapt template schemas and inspect the forms they produce
#[derive(Parser, Debug, Clone)]
#[command(name = "leadform", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "LEADFORM_CONFIG", default_value = "leadform.toml")]
    pub config: PathBuf,

    /// Form operating mode
    #[arg(long, value_enum)]
    pub mode: Option<crate::form::FormMode>,

    /// Hide the form's top-level title
    #[arg(long)]
    pub hide_title: bool,

    /// Hide a section title when rendering (repeatable)
    #[arg(long = "hide-section", value_name = "TITLE")]
    pub hide_sections: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Schema document to operate on
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SchemaArgs {
    /// Schema document (JSON, YAML or TOML)
    pub schema: PathBuf,

    /// Treat SCHEMA as a lead-SDK document and pick this channel (encoded uid or action id)
    #[arg(long)]
    pub channel: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the normalized schema
    Adapt {
        #[command(flatten)]
        source: SchemaArgs,
    },
    /// Print the initial value tree
    Init {
        #[command(flatten)]
        source: SchemaArgs,
        /// Seed values document
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Print the rendered form view
    Render {
        #[command(flatten)]
        source: SchemaArgs,
        /// Seed values document
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Print the advisory validation report for a values document
    Validate {
        #[command(flatten)]
        source: SchemaArgs,
        /// Values document to check
        values: PathBuf,
    },
}

/// Result of a command: JSON to print and whether it succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub json: Value,
    pub success: bool,
}

impl CommandOutput {
    fn ok(json: Value) -> Self {
        Self { json, success: true }
    }
}

/// Read, unwrap and adapt the schema named by `source`
pub fn load_schema(source: &SchemaArgs, settings: &Settings) -> Result<DynamicFormSchema> {
    let document = read_document(&source.schema)?;
    let raw = match &source.channel {
        Some(channel) => LeadSdkDocument::from_value(document)?
            .template_schema(channel)?
            .clone(),
        None => document,
    };
    Ok(settings.schema_loader().prepare(&raw))
}

fn read_seed(seed: Option<&Path>) -> Result<Option<Value>> {
    seed.map(read_document).transpose()
}

/// Run a parsed command against loaded settings
pub fn execute(command: &Command, settings: &Settings) -> Result<CommandOutput> {
    match command {
        Command::Adapt { source } => {
            let schema = load_schema(source, settings)?;
            Ok(CommandOutput::ok(serde_json::to_value(&schema)?))
        }
        Command::Init { source, seed } => {
            let schema = load_schema(source, settings)?;
            let seed = read_seed(seed.as_deref())?;
            let values = initialize(&schema.fields, seed.as_ref());
            Ok(CommandOutput::ok(values.to_value()))
        }
        Command::Render { source, seed } => {
            let schema = load_schema(source, settings)?;
            let seed = read_seed(seed.as_deref())?;
            let values = initialize(&schema.fields, seed.as_ref());
            let view = build_view(&schema, &values, &settings.form_options());
            Ok(CommandOutput::ok(serde_json::to_value(&view)?))
        }
        Command::Validate { source, values } => {
            let schema = load_schema(source, settings)?;
            let values = match read_document(values)? {
                Value::Object(map) => ValueTree::from(map),
                other => initialize(&schema.fields, Some(&other)),
            };
            let report = validate_form(&schema, &values);
            Ok(CommandOutput {
                success: report.is_valid(),
                json: serde_json::to_value(&report)?,
            })
        }
    }
}
