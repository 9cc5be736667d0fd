//! Placeholder scanning and substitution in scalar strings.
//!
//! A placeholder is the text between a `{` and the next `}`; a `{` with no
//! closing brace, or an empty `{}`, is literal text.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::expander::{DEFAULT_MAX_DEPTH, ExpandContext, ExpandError, Scope};

/// A piece of a scanned scalar string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'s> {
    /// Literal text copied to the output unchanged.
    Literal(&'s str),
    /// A placeholder path, without its braces.
    Placeholder(&'s str),
}

/// Split a string into literal and placeholder fragments.
pub fn scan_placeholders(input: &str) -> Vec<Fragment<'_>> {
    let mut remaining = input;
    fragments(&mut remaining).unwrap_or_else(|_| vec![Fragment::Literal(input)])
}

fn fragments<'s>(input: &mut &'s str) -> ModalResult<Vec<Fragment<'s>>> {
    repeat(0.., alt((placeholder, literal_run, lone_brace))).parse_next(input)
}

/// Parse a placeholder: `{path}`
fn placeholder<'s>(input: &mut &'s str) -> ModalResult<Fragment<'s>> {
    delimited('{', take_while(1.., |c: char| c != '}'), '}')
        .map(Fragment::Placeholder)
        .parse_next(input)
}

/// Parse a run of text up to the next `{`.
fn literal_run<'s>(input: &mut &'s str) -> ModalResult<Fragment<'s>> {
    take_while(1.., |c: char| c != '{')
        .map(Fragment::Literal)
        .parse_next(input)
}

/// Parse a `{` that does not open a placeholder.
fn lone_brace<'s>(input: &mut &'s str) -> ModalResult<Fragment<'s>> {
    "{".map(Fragment::Literal).parse_next(input)
}

/// Substitute every placeholder in `text` against `scope`.
///
/// Each placeholder is replaced by the textual form of its bound value, and
/// that text is itself substituted before being spliced in. A placeholder
/// that reappears while its own value is still being resolved is a cycle;
/// the same placeholder appearing several times side by side is not.
///
/// # Example
///
/// ```
/// use dashbuilder::{Scope, expand_str, mapping};
///
/// let scope = Scope::from_value(&mapping! { "number" => "five" }).unwrap();
/// assert_eq!(
///     expand_str("{number} is equal to {number}", &scope).unwrap(),
///     "five is equal to five"
/// );
/// ```
pub fn expand_str(text: &str, scope: &Scope<'_>) -> Result<String, ExpandError> {
    substitute(text, scope, &mut ExpandContext::new(DEFAULT_MAX_DEPTH))
}

pub(crate) fn substitute(
    text: &str,
    scope: &Scope<'_>,
    ctx: &mut ExpandContext,
) -> Result<String, ExpandError> {
    if !text.contains('{') {
        return Ok(text.to_string());
    }

    let mut output = String::with_capacity(text.len());
    for fragment in scan_placeholders(text) {
        match fragment {
            Fragment::Literal(s) => output.push_str(s),
            Fragment::Placeholder(path) => {
                ctx.push_placeholder(path)?;
                let raw = scope.lookup(path)?.to_text();
                let resolved = substitute(&raw, scope, ctx)?;
                ctx.pop_placeholder();
                output.push_str(&resolved);
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_splits_literals_and_placeholders() {
        assert_eq!(
            scan_placeholders("a {b} c"),
            vec![
                Fragment::Literal("a "),
                Fragment::Placeholder("b"),
                Fragment::Literal(" c"),
            ]
        );
    }

    #[test]
    fn scan_keeps_unclosed_and_empty_braces_literal() {
        for input in ["x { y", "a {} b", "trailing {"] {
            let joined: String = scan_placeholders(input)
                .into_iter()
                .map(|f| match f {
                    Fragment::Literal(s) => s,
                    Fragment::Placeholder(p) => panic!("unexpected placeholder {p}"),
                })
                .collect();
            assert_eq!(joined, input);
        }
    }

    #[test]
    fn scan_placeholder_runs_to_first_closing_brace() {
        assert_eq!(
            scan_placeholders("{a {b}c}"),
            vec![
                Fragment::Placeholder("a {b"),
                Fragment::Literal("c}"),
            ]
        );
    }

    #[test]
    fn scan_keeps_colon_paths_whole() {
        assert_eq!(
            scan_placeholders("{numbers:five}"),
            vec![Fragment::Placeholder("numbers:five")]
        );
    }

    #[test]
    fn scan_empty_string() {
        assert!(scan_placeholders("").is_empty());
    }
}
