//! Template directive evaluation.
//!
//! A directive binds named arguments to one or many candidate values and
//! expands its body once per combination of bindings.

use indexmap::IndexMap;
use tracing::debug;

use crate::expander::{ExpandContext, ExpandError, Expander, Scope};
use crate::types::ConfigValue;

/// Directive key holding the document to expand.
pub const BODY: &str = "body";

/// Directive key holding the argument bindings.
pub const ARGUMENTS: &str = "arguments";

/// Evaluate a template directive against the enclosing scope.
///
/// Returns the single expanded body when every argument is a bare value,
/// otherwise a sequence with one expanded body per argument combination.
pub(crate) fn eval_directive(
    expander: &Expander,
    directive: &ConfigValue,
    scope: &Scope<'_>,
    ctx: &mut ExpandContext,
) -> Result<ConfigValue, ExpandError> {
    let fields = directive
        .as_mapping()
        .ok_or_else(|| malformed("directive value must be a mapping", directive))?;

    let arguments = match fields.get(ARGUMENTS) {
        None | Some(ConfigValue::Null) => None,
        Some(ConfigValue::Mapping(arguments)) => Some(arguments),
        Some(_) => return Err(malformed("'arguments' must be a mapping", directive)),
    };

    let mut simple = true;
    let mut candidates: Vec<(&str, Vec<&ConfigValue>)> = Vec::new();
    for (name, values) in arguments.into_iter().flatten() {
        if scope.contains(name) {
            return Err(ExpandError::ArgumentScopeCollision {
                argument: name.clone(),
                snippet: directive.snippet(),
            });
        }
        match values {
            ConfigValue::Sequence(items) => {
                simple = false;
                candidates.push((name.as_str(), items.iter().collect()));
            }
            other => candidates.push((name.as_str(), vec![other])),
        }
    }

    let body = fields
        .get(BODY)
        .ok_or_else(|| malformed("missing 'body'", directive))?;

    let sets = binding_sets(&candidates);
    debug!(
        arguments = candidates.len(),
        combinations = sets.len(),
        simple,
        "expanding template"
    );

    let mut results = Vec::with_capacity(sets.len());
    for bindings in sets {
        let child = scope.child(bindings);
        results.push(expander.expand_value(body, &child, ctx)?);
    }

    if simple {
        return Ok(results.into_iter().next().unwrap_or_default());
    }
    Ok(ConfigValue::Sequence(results))
}

/// Cartesian product of the candidate values, one binding set per
/// combination. The last argument varies fastest.
fn binding_sets(candidates: &[(&str, Vec<&ConfigValue>)]) -> Vec<IndexMap<String, ConfigValue>> {
    let mut sets = vec![IndexMap::new()];
    for (name, values) in candidates {
        sets = sets
            .into_iter()
            .flat_map(|set| {
                values.iter().map(move |value| {
                    let mut extended = set.clone();
                    extended.insert((*name).to_string(), (*value).clone());
                    extended
                })
            })
            .collect();
    }
    sets
}

fn malformed(reason: &str, directive: &ConfigValue) -> ExpandError {
    ExpandError::MalformedTemplate {
        reason: reason.to_string(),
        snippet: directive.snippet(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_sets_vary_last_argument_fastest() {
        let a = [ConfigValue::from(1), ConfigValue::from(2)];
        let b = [ConfigValue::from("x"), ConfigValue::from("y")];
        let candidates: Vec<(&str, Vec<&ConfigValue>)> =
            vec![("a", a.iter().collect()), ("b", b.iter().collect())];

        let rendered: Vec<String> = binding_sets(&candidates)
            .into_iter()
            .map(|set| format!("{}{}", set["a"], set["b"]))
            .collect();
        assert_eq!(rendered, vec!["1x", "1y", "2x", "2y"]);
    }

    #[test]
    fn binding_sets_without_arguments_is_one_empty_set() {
        let sets = binding_sets(&[]);
        assert_eq!(sets.len(), 1);
        assert!(sets[0].is_empty());
    }

    #[test]
    fn binding_sets_with_empty_candidates_is_empty() {
        let a = [ConfigValue::from(1)];
        let candidates: Vec<(&str, Vec<&ConfigValue>)> =
            vec![("a", a.iter().collect()), ("b", Vec::new())];
        assert!(binding_sets(&candidates).is_empty());
    }
}
