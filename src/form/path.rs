//! Paths into the value tree

use std::fmt;

use serde::{Serialize, Serializer};

/// Segment of a value path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Field access by section key: .fieldName
    Key(String),
    /// Array element access: [0], [1], etc.
    Index(usize),
}

/// Path from the root of a value tree (e.g. "contacts[0].phone")
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Create a root path (empty)
    pub fn root() -> Self {
        Self::default()
    }

    /// Path made of section keys only
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: keys.into_iter().map(|k| PathSegment::Key(k.into())).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Push a section key segment
    pub fn push_key(&self, key: &str) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Key(key.to_string()));
        new
    }

    /// Push an array index segment
    pub fn push_index(&self, idx: usize) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Index(idx));
        new
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path without its last segment
    pub fn parent(&self) -> Self {
        let mut new = self.clone();
        new.segments.pop();
        new
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Parse "a.b[0].c". Malformed index brackets are skipped.
    pub fn parse(s: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                    let mut index_str = String::new();
                    for c in chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                        index_str.push(c);
                    }
                    if let Ok(idx) = index_str.trim().parse::<usize>() {
                        segments.push(PathSegment::Index(idx));
                    }
                }
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            segments.push(PathSegment::Key(current));
        }

        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        FieldPath::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_building() {
        let path = FieldPath::root()
            .push_key("contacts")
            .push_index(0)
            .push_key("phone");

        assert_eq!(path.to_string(), "contacts[0].phone");
        assert_eq!(path.depth(), 3);
        assert_eq!(path.parent().to_string(), "contacts[0]");
        assert_eq!(path.last(), Some(&PathSegment::Key("phone".into())));
    }

    #[test]
    fn test_field_path_parse() {
        let path = FieldPath::parse("basic.tags[12].label");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("basic".into()),
                PathSegment::Key("tags".into()),
                PathSegment::Index(12),
                PathSegment::Key("label".into()),
            ]
        );
        assert_eq!(path.to_string(), "basic.tags[12].label");
    }

    #[test]
    fn test_field_path_parse_skips_bad_index() {
        assert_eq!(FieldPath::parse("a[x].b"), FieldPath::from_keys(["a", "b"]));
        assert!(FieldPath::parse("").is_root());
    }

    #[test]
    fn test_field_path_serializes_as_string() {
        let path = FieldPath::from_keys(["a", "b"]).push_index(1);
        assert_eq!(serde_json::to_value(&path).unwrap(), serde_json::json!("a.b[1]"));
    }
}
