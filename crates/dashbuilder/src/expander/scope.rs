//! Immutable binding environments for placeholder resolution.

use indexmap::IndexMap;

use crate::expander::ExpandError;
use crate::types::ConfigValue;

/// Separator between the segments of a placeholder path.
pub const PATH_SEPARATOR: char = ':';

/// A set of named bindings, optionally extending a parent scope.
///
/// Child scopes only ever add bindings; a lookup walks from the innermost
/// scope outwards. Scopes are never mutated once built.
///
/// # Example
///
/// ```
/// use dashbuilder::{ConfigValue, Scope, mapping};
///
/// let root = Scope::from_value(&mapping! { "numbers" => mapping! { "five" => 5 } }).unwrap();
/// let child = root.child([("name".to_string(), ConfigValue::from("five"))].into_iter().collect());
///
/// assert_eq!(child.lookup("numbers:five").unwrap(), &ConfigValue::Integer(5));
/// assert_eq!(child.lookup("name").unwrap().as_str(), Some("five"));
/// assert!(root.lookup("name").is_err());
/// ```
#[derive(Debug, Default)]
pub struct Scope<'p> {
    bindings: IndexMap<String, ConfigValue>,
    parent: Option<&'p Scope<'p>>,
}

impl<'p> Scope<'p> {
    /// Create an empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root scope from a set of bindings.
    pub fn from_bindings(bindings: IndexMap<String, ConfigValue>) -> Self {
        Self {
            bindings,
            parent: None,
        }
    }

    /// Create a root scope from a mapping value.
    ///
    /// Returns `None` if the value is not a mapping.
    pub fn from_value(value: &ConfigValue) -> Option<Self> {
        value.as_mapping().cloned().map(Self::from_bindings)
    }

    /// Create a child scope that extends this one with new bindings.
    pub fn child(&self, bindings: IndexMap<String, ConfigValue>) -> Scope<'_> {
        Scope {
            bindings,
            parent: Some(self),
        }
    }

    /// Check whether a name is bound in this scope or any ancestor.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the value bound to a top-level name.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        let mut current = Some(self);
        while let Some(scope) = current {
            if let Some(value) = scope.bindings.get(name) {
                return Some(value);
            }
            current = scope.parent;
        }
        None
    }

    /// Number of bindings visible from this scope.
    pub fn len(&self) -> usize {
        self.bindings.len() + self.parent.map_or(0, Scope::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a colon-separated path.
    ///
    /// The first segment names a binding; each following segment descends
    /// into a nested mapping.
    pub fn lookup(&self, path: &str) -> Result<&ConfigValue, ExpandError> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = segments.next().unwrap_or_default();
        let mut current = self.get(first).ok_or_else(|| ExpandError::PathLookup {
            path: path.to_string(),
            segment: first.to_string(),
            snippet: self.snippet(),
        })?;

        for segment in segments {
            current = current.get(segment).ok_or_else(|| ExpandError::PathLookup {
                path: path.to_string(),
                segment: segment.to_string(),
                snippet: current.snippet(),
            })?;
        }
        Ok(current)
    }

    /// A truncated rendering of the visible binding names, for error messages.
    fn snippet(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(scope) = current {
            names.extend(scope.bindings.keys().cloned());
            current = scope.parent;
        }
        ConfigValue::from(names).snippet()
    }
}
