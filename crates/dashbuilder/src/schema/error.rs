//! Error types for schema building and variant dispatch.

use thiserror::Error;

use crate::error::ErrorKind;

/// An error that occurred while building an element from configuration data.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    /// A required field is absent and has no default.
    #[error("required field '{field}' not found for <{tag}> (data = {snippet})")]
    MissingRequiredField {
        field: String,
        tag: String,
        snippet: String,
    },

    /// A field value has the wrong shape for its rule.
    #[error("field '{field}' expects {expected}, got {found} (value = {snippet})")]
    InvalidFieldShape {
        field: String,
        expected: String,
        found: String,
        snippet: String,
    },

    /// A schema was handed something other than a mapping.
    #[error("<{tag}> must be built from a mapping, got {found} (data = {snippet})")]
    NotAMapping {
        tag: String,
        found: String,
        snippet: String,
    },

    /// A member transform produced no element.
    #[error("field '{field}' of <{tag}> produced no element")]
    AbsentBuiltElement { field: String, tag: String },

    /// The variant tag could not be inferred from the data.
    #[error("expected a single key naming the element type, found {} (data = {snippet})", describe_keys(keys))]
    AmbiguousVariant { keys: Vec<String>, snippet: String },

    /// The variant tag is not registered.
    #[error("'{tag}' is not a valid choice, expected one of: {}{}", available.join(", "), describe_suggestions(suggestions))]
    UnknownVariant {
        tag: String,
        available: Vec<String>,
        suggestions: Vec<String>,
    },
}

impl BuildError {
    /// The error kind, shared with expansion errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            BuildError::InvalidFieldShape { .. } | BuildError::NotAMapping { .. } => {
                ErrorKind::InvalidFieldShape
            }
            BuildError::AbsentBuiltElement { .. } => ErrorKind::AbsentBuiltElement,
            BuildError::AmbiguousVariant { .. } | BuildError::UnknownVariant { .. } => {
                ErrorKind::AmbiguousOrUnknownVariant
            }
        }
    }
}

fn describe_keys(keys: &[String]) -> String {
    if keys.is_empty() {
        "no keys".to_string()
    } else {
        format!("{} keys ({})", keys.len(), keys.join(", "))
    }
}

fn describe_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Find the registered names closest to an unknown one.
///
/// Returns at most three names within a small edit distance, closest first.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_are_closest_first() {
        let available = vec![
            "table".to_string(),
            "chart".to_string(),
            "single".to_string(),
        ];
        assert_eq!(compute_suggestions("tabel", &available), vec!["table"]);
        assert_eq!(compute_suggestions("chat", &available), vec!["chart"]);
        assert!(compute_suggestions("xyz", &available).is_empty());
    }

    #[test]
    fn suggestions_are_limited_to_three() {
        let available: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();
        assert_eq!(compute_suggestions("item", &available).len(), 3);
    }

    #[test]
    fn unknown_variant_message_lists_choices_and_suggestions() {
        let err = BuildError::UnknownVariant {
            tag: "tabel".to_string(),
            available: vec!["table".to_string(), "chart".to_string()],
            suggestions: vec!["table".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "'tabel' is not a valid choice, expected one of: table, chart (did you mean: table?)"
        );
    }
}
