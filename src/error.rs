//! Error types for the boundaries of the form engine
//!
//! The engine itself is total; these cover reading documents and settings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading documents, settings or lead-SDK data
#[derive(Debug, Error)]
pub enum LeadformError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension not recognized
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Settings could not be assembled
    #[cfg(feature = "cli")]
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Settings loaded but failed validation
    #[error("Invalid settings: {}", .0.join("; "))]
    InvalidSettings(Vec<String>),

    /// No lead-SDK action matches the requested channel
    #[error("No lead SDK action for channel: {0}")]
    UnknownChannel(String),

    /// The matching action carries no template
    #[error("Lead SDK action {0} has no template schema")]
    MissingTemplate(String),
}

pub type Result<T> = std::result::Result<T, LeadformError>;
