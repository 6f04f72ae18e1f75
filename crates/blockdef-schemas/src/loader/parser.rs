//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;
use tracing::trace;

/// Supported file formats for definition documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path)),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Turns file content into a value tree
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = read_utf8(path)?;
        self.parse_content(&content, format, path)
    }

    /// Parse content with explicit format. `path` is used for error context only.
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        trace!(path = %path.display(), ?format, bytes = content.len(), "parsing document");
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path, e))?;

        // Non-string mapping keys have no JSON counterpart
        serde_json::to_value(yaml_value).map_err(|e| LoaderError::json_parse_error(path, e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path, e))
    }

    /// Parse content whose format may not match its name.
    ///
    /// The extension's format is tried first, then JSON, then YAML.
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        let detected = Format::from_path(path).ok();
        if let Some(format) = detected {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        for format in [Format::Json, Format::Yaml] {
            if Some(format) == detected {
                continue;
            }
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        Err(LoaderError::Unparseable {
            path: path.to_path_buf(),
        })
    }

    /// Serialize a value back to string format
    pub fn serialize(&self, value: &Value, format: Format) -> LoaderResult<String> {
        match format {
            Format::Json => {
                serde_json::to_string_pretty(value).map_err(|e| LoaderError::SerializeError {
                    reason: format!("Failed to serialize JSON: {}", e),
                })
            }
            Format::Yaml => serde_yaml::to_string(value).map_err(|e| LoaderError::SerializeError {
                reason: format!("Failed to serialize YAML: {}", e),
            }),
        }
    }
}

fn read_utf8(path: &Path) -> LoaderResult<String> {
    let bytes = std::fs::read(path).map_err(|e| LoaderError::io_error(path, e))?;
    String::from_utf8(bytes).map_err(|source| LoaderError::EncodingError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("blocks.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("blocks.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("blocks.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("blocks.txt")).is_err());
        assert!(Format::from_path(Path::new("blocks")).is_err());
        assert_eq!(Format::Yaml.extensions(), &["yaml", "yml"]);
    }

    #[test]
    fn test_yaml_parsing() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("math.yaml");

        let yaml_content = r#"
type: math_add
message0: "%1 + %2"
args0:
  - type: input_value
    name: A
    check: Number
  - type: input_value
    name: B
    check: Number
output: Number
previousStatement: ~
"#;
        fs::write(&file_path, yaml_content).unwrap();

        let value = DocumentParser::new().parse_file(&file_path)?;
        assert_eq!(value["type"], "math_add");
        assert_eq!(value["args0"][1]["name"], "B");
        assert!(value["previousStatement"].is_null());
        Ok(())
    }

    #[test]
    fn test_json_parsing() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("text.json");
        fs::write(&file_path, r#"{"type": "text", "message0": "%1", "output": "String"}"#).unwrap();

        let value = DocumentParser::new().parse_file(&file_path)?;
        assert_eq!(value["output"], "String");
        Ok(())
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.json");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();

        let error = DocumentParser::new().parse_file(&file_path).unwrap_err();
        assert!(matches!(error, LoaderError::EncodingError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let error = DocumentParser::new()
            .parse_file(Path::new("/nonexistent/blocks.json"))
            .unwrap_err();
        assert!(matches!(error, LoaderError::IoError { .. }));
    }

    #[test]
    fn test_yaml_with_non_string_keys() {
        let error = DocumentParser::new()
            .parse_yaml("? [1, 2]\n: x\n", Path::new("keys.yaml"))
            .unwrap_err();
        assert!(error.is_parse_error());
    }

    #[test]
    fn test_fallback_parsing() -> LoaderResult<()> {
        let parser = DocumentParser::new();

        let (value, format) =
            parser.parse_with_fallback(r#"{"type": "a"}"#, Path::new("stdin"))?;
        assert_eq!(format, Format::Json);
        assert_eq!(value["type"], "a");

        let (value, format) = parser.parse_with_fallback("type: b\n", Path::new("blocks.json"))?;
        assert_eq!(format, Format::Yaml);
        assert_eq!(value["type"], "b");

        let error = parser
            .parse_with_fallback("{ [unbalanced", Path::new("stdin"))
            .unwrap_err();
        assert!(matches!(error, LoaderError::Unparseable { .. }));
        Ok(())
    }

    #[test]
    fn test_serialize() -> LoaderResult<()> {
        let parser = DocumentParser::new();
        let value = serde_json::json!({"type": "a", "inputsInline": true});

        let yaml = parser.serialize(&value, Format::Yaml)?;
        assert!(yaml.contains("inputsInline: true"));
        assert_eq!(parser.parse_yaml(&yaml, Path::new("a.yaml"))?, value);

        let json = parser.serialize(&value, Format::Json)?;
        assert_eq!(parser.parse_json(&json, Path::new("a.json"))?, value);
        Ok(())
    }
}
