use std::fmt::{Display, Formatter, Result as FmtResult};

use indexmap::IndexMap;
use serde::Serialize;

/// Maximum number of characters kept by [`ConfigValue::snippet`].
const SNIPPET_LIMIT: usize = 80;

/// A generic configuration value, as produced by a document loader.
///
/// Mappings keep the insertion order of their keys so that every traversal
/// (template argument binding, many-valued field rules, output children) is
/// deterministic across runs.
///
/// # Example
///
/// ```
/// use dashbuilder::{ConfigValue, mapping};
///
/// let value = mapping! { "title" => "Errors", "limit" => 10 };
/// assert_eq!(value.get("title").and_then(ConfigValue::as_str), Some("Errors"));
/// assert_eq!(value.to_string(), "{title: Errors, limit: 10}");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit empty value (`~` or an empty YAML node).
    #[default]
    Null,

    /// A boolean scalar.
    Bool(bool),

    /// An integer scalar.
    Integer(i64),

    /// A floating-point scalar.
    Float(f64),

    /// A string scalar, the only scalar kind placeholders are substituted in.
    String(String),

    /// An ordered sequence of values.
    Sequence(Vec<ConfigValue>),

    /// A mapping from string keys to values, in insertion order.
    Mapping(IndexMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns true for every variant other than sequences and mappings.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigValue::Sequence(_) | ConfigValue::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Get this value as a string slice, if it is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a sequence, if it is one.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as a mapping, if it is one.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, ConfigValue>> {
        match self {
            ConfigValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key, if this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// The literal textual form of this value.
    ///
    /// Scalars render bare (`Null` renders empty). Sequences and mappings
    /// use the compact flow form of [`Display`].
    pub fn to_text(&self) -> String {
        match self {
            ConfigValue::Null => String::new(),
            ConfigValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// A one-line rendering of this value, truncated for error messages.
    pub fn snippet(&self) -> String {
        let full = self.to_string();
        if full.chars().count() <= SNIPPET_LIMIT {
            return full;
        }
        let mut truncated: String = full.chars().take(SNIPPET_LIMIT).collect();
        truncated.push_str("...");
        truncated
    }

    /// A short name for the kind of this value, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }
}

impl Display for ConfigValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigValue::Null => write!(f, "~"),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Integer(n) => write!(f, "{n}"),
            ConfigValue::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            ConfigValue::Float(n) => write!(f, "{n}"),
            ConfigValue::String(s) => write!(f, "{s}"),
            ConfigValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ConfigValue::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// From implementations for common types

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, ConfigValue>> for ConfigValue {
    fn from(entries: IndexMap<String, ConfigValue>) -> Self {
        ConfigValue::Mapping(entries)
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigValue {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        ConfigValue::Mapping(iter.into_iter().collect())
    }
}
