//! Schemas: ordered field rules producing one element per source mapping.

use tracing::trace;

use crate::schema::{BuildError, FieldRule, FieldValue};
use crate::types::{ConfigValue, Element};

/// A reusable bundle of field rules, applied to a schema under construction.
///
/// Traits compose by sequential application and only ever add rules.
pub type FieldTrait = fn(Schema) -> Schema;

/// Anything that can produce a child element from a field value.
///
/// Implemented by [`Schema`], [`crate::VariantRegistry`], [`Wrap`] and
/// [`KeyValue`], so nested builders plug straight into
/// [`FieldRule::member`].
pub trait ElementFactory: Send + Sync {
    fn create(&self, input: &FieldValue<'_>) -> Result<Element, BuildError>;
}

/// Builds the initial element of a schema from the whole source mapping.
pub type RootBuilder = fn(&ConfigValue) -> Result<Element, BuildError>;

/// An output tag plus the ordered rules that fill it.
///
/// # Example
///
/// ```
/// use dashbuilder::{FieldRule, Schema, mapping};
///
/// let schema = Schema::new("search")
///     .field(FieldRule::attribute("id").optional())
///     .field(FieldRule::text_child("query"));
///
/// let search = schema.build(&mapping! { "query" => "index=main" }).unwrap();
/// assert_eq!(search.tag, "search");
/// assert_eq!(search.attribute("id"), None);
/// assert_eq!(search.child("query").and_then(|q| q.text.as_deref()), Some("index=main"));
/// ```
#[derive(Debug)]
pub struct Schema {
    tag: String,
    root: Option<RootBuilder>,
    rules: Vec<FieldRule>,
}

impl Schema {
    /// Create a schema with no rules.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            root: None,
            rules: Vec::new(),
        }
    }

    /// Append a field rule.
    #[must_use]
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Apply a field trait.
    #[must_use]
    pub fn with(self, field_trait: FieldTrait) -> Self {
        field_trait(self)
    }

    /// Apply several field traits in order.
    #[must_use]
    pub fn with_traits(self, traits: &[FieldTrait]) -> Self {
        traits.iter().fold(self, |schema, t| t(schema))
    }

    /// Start from the element returned by `root` instead of an empty one.
    ///
    /// Rules are applied on top of whatever the root builder returns.
    #[must_use]
    pub fn with_root(mut self, root: RootBuilder) -> Self {
        self.root = Some(root);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Build an element from a source mapping.
    ///
    /// Every rule is evaluated against the same source; the first failing
    /// rule aborts the build.
    pub fn build(&self, source: &ConfigValue) -> Result<Element, BuildError> {
        let entries = source.as_mapping().ok_or_else(|| BuildError::NotAMapping {
            tag: self.tag.clone(),
            found: source.kind_name().to_string(),
            snippet: source.snippet(),
        })?;

        let mut node = match self.root {
            Some(root) => root(source)?,
            None => Element::new(self.tag.clone()),
        };
        trace!(tag = %self.tag, rules = self.rules.len(), "building element");
        for rule in &self.rules {
            rule.apply(entries, &mut node)?;
        }
        Ok(node)
    }
}

impl ElementFactory for Schema {
    fn create(&self, input: &FieldValue<'_>) -> Result<Element, BuildError> {
        self.build(input.value)
    }
}

/// Nests the output of another factory under a fixed envelope tag.
pub struct Wrap<F> {
    tag: String,
    inner: F,
}

impl<F: ElementFactory> Wrap<F> {
    pub fn new(tag: impl Into<String>, inner: F) -> Self {
        Self {
            tag: tag.into(),
            inner,
        }
    }
}

impl<F: ElementFactory> ElementFactory for Wrap<F> {
    fn create(&self, input: &FieldValue<'_>) -> Result<Element, BuildError> {
        Ok(self.inner.create(input)?.wrap(self.tag.clone()))
    }
}

/// Builds `<tag key_attribute="key">value</tag>` from a mapping entry.
///
/// Used with many-valued member rules over mappings, such as
/// `options: {count: 10}` becoming `<option name="count">10</option>`.
pub struct KeyValue {
    tag: String,
    key_attribute: String,
}

impl KeyValue {
    pub fn new(tag: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key_attribute: key_attribute.into(),
        }
    }
}

impl ElementFactory for KeyValue {
    fn create(&self, input: &FieldValue<'_>) -> Result<Element, BuildError> {
        let (key, value) = input.entry()?;
        let text = FieldValue {
            field: input.field,
            key: None,
            value,
        }
        .text()?;

        let mut node = Element::new(self.tag.clone());
        node.set_attribute(self.key_attribute.clone(), key);
        node.set_text(text);
        Ok(node)
    }
}
