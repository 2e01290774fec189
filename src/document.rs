//! Reading schema and value documents from disk
//!
//! The format follows the file extension: `.json`, `.yaml`/`.yml` or `.toml`.

use std::path::Path;

use serde_json::Value;

use crate::error::{LeadformError, Result};

/// Document formats understood by [`read_document`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            _ => Err(LeadformError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse document text in the given format into a JSON value
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
    };
    Ok(value)
}

/// Read and parse a document, choosing the format by extension
pub fn read_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| LeadformError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?format, "Read document");
    parse_document(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")).unwrap(), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")).unwrap(), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.toml")).unwrap(), DocumentFormat::Toml);
        assert!(matches!(
            DocumentFormat::from_path(Path::new("schema")),
            Err(LeadformError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_formats_agree() {
        let expected = json!({ "type": "object", "required": ["name"] });
        let yaml = "type: object\nrequired:\n  - name\n";
        let toml = "type = \"object\"\nrequired = [\"name\"]\n";
        assert_eq!(parse_document(yaml, DocumentFormat::Yaml).unwrap(), expected);
        assert_eq!(parse_document(toml, DocumentFormat::Toml).unwrap(), expected);
        assert_eq!(
            parse_document(&expected.to_string(), DocumentFormat::Json).unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            parse_document("{ nope", DocumentFormat::Json),
            Err(LeadformError::Json(_))
        ));
    }
}
