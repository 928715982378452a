//! YAML document loading

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Something that loads raw documents from a file
pub trait Reader {
    /// Decoded document type
    type Document;

    /// Load every document stored in `path`
    fn load(&self, path: &Path) -> Result<Vec<Self::Document>>;
}

/// Reader for `.yaml`/`.yml` files, multi-document streams included
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlReader;

impl YamlReader {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }

    /// Reject paths whose file name does not end in `.yaml` or `.yml`
    pub fn validate_extension(path: &Path) -> Result<()> {
        let is_yaml = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".yaml") || name.ends_with(".yml"));

        if is_yaml {
            Ok(())
        } else {
            Err(Error::FileType {
                path: path.to_path_buf(),
            })
        }
    }
}

impl Reader for YamlReader {
    type Document = serde_yaml::Value;

    fn load(&self, path: &Path) -> Result<Vec<serde_yaml::Value>> {
        Self::validate_extension(path)?;

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let documents = parse_documents(&content).map_err(|e| Error::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?;

        log::debug!("loaded {} document(s) from {}", documents.len(), path.display());
        Ok(documents)
    }
}

/// Decode every document of a YAML stream (useful for testing)
pub fn parse_documents(
    content: &str,
) -> std::result::Result<Vec<serde_yaml::Value>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(content)
        .map(serde_yaml::Value::deserialize)
        .filter(|doc| !matches!(doc, Ok(serde_yaml::Value::Null)))
        .collect()
}
