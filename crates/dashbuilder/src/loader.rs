//! Document loading: YAML (and therefore JSON) text into [`ConfigValue`]s.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_yaml::{Location, Value as YamlValue};
use thiserror::Error;
use tracing::debug;

use crate::types::ConfigValue;

/// Origin reported for documents loaded from a string.
pub const STRING_ORIGIN: &str = "<string>";

/// An error that occurred while loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a document.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    ///
    /// `line` and `column` are 1-based; `offset` is the byte index into the
    /// source text. All three are zero when the parser reports no location.
    #[error("{origin}:{line}:{column}: {message}")]
    Parse {
        origin: String,
        line: usize,
        column: usize,
        offset: usize,
        message: String,
    },

    /// A mapping key is null, a sequence or a mapping.
    #[error("{origin}: mapping keys must be non-null scalars, got {key}")]
    UnsupportedKey { origin: String, key: String },
}

/// Load a document from text.
///
/// # Example
///
/// ```
/// use dashbuilder::{ConfigValue, load_str};
///
/// let doc = load_str("dashboard:\n  label: Ops\n  refresh: 30\n").unwrap();
/// let dashboard = doc.get("dashboard").unwrap();
/// assert_eq!(dashboard.get("label").and_then(ConfigValue::as_str), Some("Ops"));
/// assert_eq!(dashboard.get("refresh"), Some(&ConfigValue::Integer(30)));
/// ```
pub fn load_str(text: &str) -> Result<ConfigValue, LoadError> {
    load_with_origin(text, STRING_ORIGIN)
}

/// Load a document from a file.
pub fn load_file(path: impl AsRef<Path>) -> Result<ConfigValue, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_with_origin(&content, &path.display().to_string())
}

fn load_with_origin(text: &str, origin: &str) -> Result<ConfigValue, LoadError> {
    let raw: YamlValue = serde_yaml::from_str(text).map_err(|e| {
        let location = e.location();
        LoadError::Parse {
            origin: origin.to_string(),
            line: location.as_ref().map_or(0, Location::line),
            column: location.as_ref().map_or(0, Location::column),
            offset: location.as_ref().map_or(0, Location::index),
            message: e.to_string(),
        }
    })?;
    let value = convert(raw, origin)?;
    debug!(origin, kind = value.kind_name(), "loaded document");
    Ok(value)
}

fn convert(raw: YamlValue, origin: &str) -> Result<ConfigValue, LoadError> {
    Ok(match raw {
        YamlValue::Null => ConfigValue::Null,
        YamlValue::Bool(b) => ConfigValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigValue::Integer(i)
            } else if n.is_u64() {
                // Past i64::MAX; keep the digits rather than round through f64.
                ConfigValue::String(n.to_string())
            } else {
                ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        YamlValue::String(s) => ConfigValue::String(s),
        YamlValue::Sequence(items) => ConfigValue::Sequence(
            items
                .into_iter()
                .map(|item| convert(item, origin))
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(entries) => {
            let mut mapping = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                mapping.insert(convert_key(key, origin)?, convert(value, origin)?);
            }
            ConfigValue::Mapping(mapping)
        }
        YamlValue::Tagged(tagged) => convert(tagged.value, origin)?,
    })
}

/// Scalar keys are stringified: `1: x` and `"1": x` name the same field.
/// Null keys have no field name and are rejected with the complex ones.
fn convert_key(key: YamlValue, origin: &str) -> Result<String, LoadError> {
    let key = convert(key, origin)?;
    match key {
        ConfigValue::String(s) => Ok(s),
        scalar if scalar.is_scalar() && !scalar.is_null() => Ok(scalar.to_string()),
        other => Err(LoadError::UnsupportedKey {
            origin: origin.to_string(),
            key: other.snippet(),
        }),
    }
}
