use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// One OpenConfig leaf -> RouterOS reply field pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldMapping {
    pub leaf: String,
    pub device: String,
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    mapping: Vec<FieldMapping>,
}

/// Errors returned when loading mapping files.
#[derive(Debug, Error)]
pub enum MappingLoadError {
    #[error("failed to read mappings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse mappings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Leaf-name lookup used when comparing device replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    fields: BTreeMap<String, String>,
}

impl FieldMap {
    pub fn from_mappings(mappings: impl IntoIterator<Item = FieldMapping>) -> Self {
        Self {
            fields: mappings
                .into_iter()
                .map(|m| (m.leaf, m.device))
                .collect(),
        }
    }

    /// Device field for `leaf`; unknown leaves map to themselves.
    pub fn device_field<'a>(&'a self, leaf: &'a str) -> &'a str {
        self.fields.get(leaf).map(String::as_str).unwrap_or(leaf)
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::from_mappings(default_field_mappings())
    }
}

/// Load field mappings from a TOML file.
pub fn load_field_mappings(path: &Path) -> Result<Vec<FieldMapping>, MappingLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| MappingLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_mappings(&raw, path.display().to_string())
}

/// Resolve the map to use and report where it came from.
///
/// An override that cannot be loaded falls back to the embedded table.
pub fn load_field_map_with_source(path: Option<&Path>) -> (FieldMap, String) {
    if let Some(path) = path {
        match load_field_mappings(path) {
            Ok(mappings) => {
                return (
                    FieldMap::from_mappings(mappings),
                    format!("file:{}", path.display()),
                )
            }
            Err(err) => warn!(%err, "using embedded field mappings"),
        }
    }
    (FieldMap::default(), "embedded".to_string())
}

/// Built-in mappings.
pub fn default_field_mappings() -> Vec<FieldMapping> {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/mappings/fields.toml"));
    match parse_mappings(embedded, "embedded mappings".to_string()) {
        Ok(mappings) if !mappings.is_empty() => mappings,
        _ => fallback_field_mappings(),
    }
}

fn parse_mappings(raw: &str, path: String) -> Result<Vec<FieldMapping>, MappingLoadError> {
    let parsed: MappingFile =
        toml::from_str(raw).map_err(|source| MappingLoadError::Parse { path, source })?;
    Ok(parsed.mapping)
}

fn fallback_field_mappings() -> Vec<FieldMapping> {
    [
        ("hostname", "name"),
        ("timezone-name", "time-zone-name"),
        ("enabled", "enabled"),
    ]
    .into_iter()
    .map(|(leaf, device)| FieldMapping {
        leaf: leaf.to_string(),
        device: device.to_string(),
    })
    .collect()
}
