//! Variant registry for selecting a schema from a discriminant tag.

use indexmap::IndexMap;
use tracing::debug;

use crate::schema::error::compute_suggestions;
use crate::schema::{BuildError, ElementFactory, FieldValue, Schema};
use crate::types::{ConfigValue, Element};

/// Constructor producing a fresh schema for one variant.
pub type SchemaFactory = fn() -> Schema;

/// A source mapping split into its discriminant tag and payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discriminated<'a> {
    /// The single key of the source mapping.
    pub tag: &'a str,
    /// The value under that key.
    pub body: &'a ConfigValue,
}

/// Split a single-key mapping into its tag and payload.
///
/// # Example
///
/// ```
/// use dashbuilder::{ConfigValue, extract_discriminant, mapping};
///
/// let source = mapping! { "table" => mapping! { "id" => "errors" } };
/// let variant = extract_discriminant(&source).unwrap();
/// assert_eq!(variant.tag, "table");
/// assert_eq!(variant.body.get("id").and_then(ConfigValue::as_str), Some("errors"));
/// ```
pub fn extract_discriminant(source: &ConfigValue) -> Result<Discriminated<'_>, BuildError> {
    let entries = source.as_mapping().ok_or_else(|| BuildError::AmbiguousVariant {
        keys: Vec::new(),
        snippet: source.snippet(),
    })?;

    let mut iter = entries.iter();
    match (iter.next(), iter.next()) {
        (Some((tag, body)), None) => Ok(Discriminated { tag, body }),
        _ => Err(BuildError::AmbiguousVariant {
            keys: entries.keys().cloned().collect(),
            snippet: source.snippet(),
        }),
    }
}

/// A set of schemas keyed by discriminant tag.
///
/// Registries are plain values: build one, register the variants it may
/// dispatch to, and hand it to whatever needs dispatch.
///
/// # Example
///
/// ```
/// use dashbuilder::{FieldRule, Schema, VariantRegistry, mapping};
///
/// fn html() -> Schema {
///     Schema::new("html").field(FieldRule::text("html"))
/// }
///
/// let registry = VariantRegistry::new().register("html", html);
/// let node = registry
///     .resolve(&mapping! { "html" => mapping! { "html" => "<p>hi</p>" } }, None)
///     .unwrap();
/// assert_eq!(node.text.as_deref(), Some("<p>hi</p>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    variants: IndexMap<String, SchemaFactory>,
}

impl VariantRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema factory under a tag, replacing any previous one.
    #[must_use]
    pub fn register(mut self, tag: impl Into<String>, factory: SchemaFactory) -> Self {
        self.variants.insert(tag.into(), factory);
        self
    }

    /// Check if a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.variants.contains_key(tag)
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Create a fresh schema for a tag.
    pub fn schema(&self, tag: &str) -> Result<Schema, BuildError> {
        match self.variants.get(tag) {
            Some(factory) => Ok(factory()),
            None => {
                let available: Vec<String> = self.variants.keys().cloned().collect();
                Err(BuildError::UnknownVariant {
                    tag: tag.to_string(),
                    suggestions: compute_suggestions(tag, &available),
                    available,
                })
            }
        }
    }

    /// Build an element with the schema selected by `tag`.
    ///
    /// Without an explicit tag, `source` must be a single-key mapping whose
    /// key is the tag and whose value is the data to build from.
    pub fn resolve(&self, source: &ConfigValue, tag: Option<&str>) -> Result<Element, BuildError> {
        let variant = match tag {
            Some(tag) => Discriminated { tag, body: source },
            None => extract_discriminant(source)?,
        };
        debug!(tag = variant.tag, "dispatching variant");
        self.schema(variant.tag)?.build(variant.body)
    }
}

impl ElementFactory for VariantRegistry {
    fn create(&self, input: &FieldValue<'_>) -> Result<Element, BuildError> {
        self.resolve(input.value, None)
    }
}
