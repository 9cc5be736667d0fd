//! Template expansion for configuration documents.
//!
//! The expander walks a [`ConfigValue`], replaces every template directive
//! (a single-key mapping under the reserved template key) by its expansion,
//! and substitutes `{path}` placeholders in string scalars against the
//! active [`Scope`].

mod context;
mod error;
mod scope;
mod substitute;
mod template;

use bon::Builder;
use indexmap::IndexMap;

pub use context::ExpandContext;
pub use error::ExpandError;
pub use scope::{PATH_SEPARATOR, Scope};
pub use substitute::{Fragment, expand_str, scan_placeholders};
pub use template::{ARGUMENTS, BODY};

use crate::types::ConfigValue;

/// Reserved mapping key that marks a template directive.
pub const TEMPLATE_KEY: &str = "_";

/// Default limit on recursion depth during expansion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling template expansion.
///
/// # Example
///
/// ```
/// use dashbuilder::ExpandOptions;
///
/// let options = ExpandOptions::builder().max_depth(32).build();
/// assert_eq!(options.template_key, "_");
/// assert_eq!(options.max_depth, 32);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct ExpandOptions {
    /// Mapping key that marks a template directive.
    #[builder(default = TEMPLATE_KEY.to_string())]
    pub template_key: String,

    /// Maximum recursion depth before expansion fails.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Expands template directives and placeholders in configuration values.
#[derive(Debug, Clone, Default)]
pub struct Expander {
    options: ExpandOptions,
}

impl Expander {
    /// Create an expander with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an expander with the given options.
    pub fn with_options(options: ExpandOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExpandOptions {
        &self.options
    }

    /// Expand a value against an empty scope.
    pub fn expand(&self, value: &ConfigValue) -> Result<ConfigValue, ExpandError> {
        self.expand_in(value, &Scope::new())
    }

    /// Expand a value against the given scope.
    pub fn expand_in(
        &self,
        value: &ConfigValue,
        scope: &Scope<'_>,
    ) -> Result<ConfigValue, ExpandError> {
        let mut ctx = ExpandContext::new(self.options.max_depth);
        self.expand_value(value, scope, &mut ctx)
    }

    pub(crate) fn expand_value(
        &self,
        value: &ConfigValue,
        scope: &Scope<'_>,
        ctx: &mut ExpandContext,
    ) -> Result<ConfigValue, ExpandError> {
        ctx.descend()?;
        let expanded = match value {
            ConfigValue::Mapping(entries) => match self.directive(entries) {
                Some(directive) => template::eval_directive(self, directive, scope, ctx)?,
                None => {
                    let mut expanded = IndexMap::with_capacity(entries.len());
                    for (key, item) in entries {
                        expanded.insert(key.clone(), self.expand_value(item, scope, ctx)?);
                    }
                    ConfigValue::Mapping(expanded)
                }
            },
            ConfigValue::Sequence(items) => ConfigValue::Sequence(
                items
                    .iter()
                    .map(|item| self.expand_value(item, scope, ctx))
                    .collect::<Result<_, _>>()?,
            ),
            ConfigValue::String(text) => {
                ConfigValue::String(substitute::substitute(text, scope, ctx)?)
            }
            other => other.clone(),
        };
        ctx.ascend();
        Ok(expanded)
    }

    /// The directive payload, if this mapping is a template directive.
    fn directive<'v>(&self, entries: &'v IndexMap<String, ConfigValue>) -> Option<&'v ConfigValue> {
        if entries.len() != 1 {
            return None;
        }
        entries.get(self.options.template_key.as_str())
    }
}

/// Expand a value against a scope with default options.
///
/// # Example
///
/// ```
/// use dashbuilder::{ConfigValue, Scope, expand, mapping};
///
/// let template = mapping! {
///     "_" => mapping! {
///         "arguments" => mapping! { "host" => vec!["web-1", "web-2"] },
///         "body" => "host={host}",
///     }
/// };
///
/// let expanded = expand(&template, &Scope::new()).unwrap();
/// assert_eq!(expanded, ConfigValue::from(vec!["host=web-1", "host=web-2"]));
/// ```
pub fn expand(value: &ConfigValue, scope: &Scope<'_>) -> Result<ConfigValue, ExpandError> {
    Expander::new().expand_in(value, scope)
}
