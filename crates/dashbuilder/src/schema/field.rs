//! Field rules: single declarative mapping instructions.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use indexmap::IndexMap;

use crate::schema::{BuildError, ElementFactory};
use crate::types::{ConfigValue, Element};

/// How many values a field rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    /// Exactly one value must be present (`1`).
    #[default]
    One,
    /// At most one value (`?`).
    Optional,
    /// The field must be present and hold a sequence or mapping (`+`).
    OneOrMore,
    /// The field may be absent or hold a sequence or mapping (`*`).
    ZeroOrMore,
}

impl Cardinality {
    /// Parse the conventional one-character notation.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '1' => Some(Cardinality::One),
            '?' => Some(Cardinality::Optional),
            '+' => Some(Cardinality::OneOrMore),
            '*' => Some(Cardinality::ZeroOrMore),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cardinality::One => '1',
            Cardinality::Optional => '?',
            Cardinality::OneOrMore => '+',
            Cardinality::ZeroOrMore => '*',
        }
    }

    /// Whether the field may be absent.
    pub fn is_optional(self) -> bool {
        matches!(self, Cardinality::Optional | Cardinality::ZeroOrMore)
    }

    /// Whether the field holds a collection of values.
    pub fn expects_many(self) -> bool {
        matches!(self, Cardinality::OneOrMore | Cardinality::ZeroOrMore)
    }
}

/// One value handed to a field transform.
///
/// For many-valued rules over a mapping, each entry arrives with its `key`
/// set; otherwise `key` is `None`.
#[derive(Debug, Clone, Copy)]
pub struct FieldValue<'a> {
    /// Source key of the rule being evaluated.
    pub field: &'a str,
    /// Entry key, when iterating a mapping.
    pub key: Option<&'a str>,
    /// The value itself.
    pub value: &'a ConfigValue,
}

impl<'a> FieldValue<'a> {
    /// The textual form of a scalar value.
    pub fn text(&self) -> Result<String, BuildError> {
        if self.value.is_scalar() {
            Ok(self.value.to_text())
        } else {
            Err(self.shape_error("a scalar"))
        }
    }

    /// The key and value of a mapping entry.
    pub fn entry(&self) -> Result<(&'a str, &'a ConfigValue), BuildError> {
        self.key
            .map(|key| (key, self.value))
            .ok_or_else(|| self.shape_error("a mapping entry"))
    }

    /// An error reporting that this value does not have the expected shape.
    pub fn shape_error(&self, expected: &str) -> BuildError {
        BuildError::InvalidFieldShape {
            field: self.field.to_string(),
            expected: expected.to_string(),
            found: self.value.kind_name().to_string(),
            snippet: self.value.snippet(),
        }
    }
}

/// Transform producing text from a field value.
pub type TextTransform = Box<dyn Fn(&FieldValue<'_>) -> Result<String, BuildError> + Send + Sync>;

/// Transform producing a child element from a field value.
pub type MemberTransform =
    Box<dyn Fn(&FieldValue<'_>) -> Result<Option<Element>, BuildError> + Send + Sync>;

/// Where a field rule writes its result.
pub enum Strategy {
    /// Set a named attribute.
    Attribute { name: String, transform: TextTransform },
    /// Set a fixed attribute, ignoring the source data.
    StaticAttribute { name: String, value: String },
    /// Set the element's text.
    Text { transform: TextTransform },
    /// Append a child element with the given tag and text.
    TextChild { tag: String, transform: TextTransform },
    /// Append the element produced by the transform.
    Member { transform: MemberTransform },
}

impl Debug for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Strategy::Attribute { name, .. } => write!(f, "Attribute({name})"),
            Strategy::StaticAttribute { name, value } => {
                write!(f, "StaticAttribute({name}={value})")
            }
            Strategy::Text { .. } => write!(f, "Text"),
            Strategy::TextChild { tag, .. } => write!(f, "TextChild({tag})"),
            Strategy::Member { .. } => write!(f, "Member"),
        }
    }
}

/// A single declarative mapping instruction: read a field, check its
/// cardinality, transform it and assign it to the element being built.
///
/// Rules start out required and single-valued with an identity transform;
/// chain modifiers to change that.
///
/// # Example
///
/// ```
/// use dashbuilder::{Element, FieldRule, mapping};
///
/// let rule = FieldRule::attribute("refresh").to("refreshInterval").optional();
/// let mut node = Element::new("search");
/// rule.apply(mapping! { "refresh" => 30 }.as_mapping().unwrap(), &mut node).unwrap();
/// assert_eq!(node.attribute("refreshInterval"), Some("30"));
/// ```
#[derive(Debug)]
pub struct FieldRule {
    source: String,
    cardinality: Cardinality,
    default: Option<ConfigValue>,
    strategy: Strategy,
}

impl FieldRule {
    fn new(source: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            source: source.into(),
            cardinality: Cardinality::One,
            default: None,
            strategy,
        }
    }

    /// Map a field onto an attribute of the same name.
    pub fn attribute(source: impl Into<String>) -> Self {
        let source = source.into();
        let name = source.clone();
        Self::new(
            source,
            Strategy::Attribute {
                name,
                transform: identity(),
            },
        )
    }

    /// Always set `name` to `value`, whatever the source data holds.
    pub fn static_attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            name.clone(),
            Strategy::StaticAttribute {
                name,
                value: value.into(),
            },
        )
    }

    /// Map a field onto the element's text.
    pub fn text(source: impl Into<String>) -> Self {
        Self::new(
            source,
            Strategy::Text {
                transform: identity(),
            },
        )
    }

    /// Map a field onto a child element of the same name holding its text.
    pub fn text_child(source: impl Into<String>) -> Self {
        let source = source.into();
        let tag = source.clone();
        Self::new(
            source,
            Strategy::TextChild {
                tag,
                transform: identity(),
            },
        )
    }

    /// Map a field onto a child element built by `factory`.
    pub fn member(source: impl Into<String>, factory: impl ElementFactory + 'static) -> Self {
        Self::new(
            source,
            Strategy::Member {
                transform: Box::new(move |input: &FieldValue<'_>| factory.create(input).map(Some)),
            },
        )
    }

    /// Map a field onto a child element built by an arbitrary transform.
    ///
    /// Returning `Ok(None)` is an error: a member must always produce an
    /// element.
    pub fn member_with<F>(source: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&FieldValue<'_>) -> Result<Option<Element>, BuildError> + Send + Sync + 'static,
    {
        Self::new(
            source,
            Strategy::Member {
                transform: Box::new(transform),
            },
        )
    }

    /// Rename the destination attribute or child tag.
    ///
    /// Has no effect on text and member rules.
    #[must_use]
    pub fn to(mut self, dest: impl Into<String>) -> Self {
        match &mut self.strategy {
            Strategy::Attribute { name, .. } | Strategy::StaticAttribute { name, .. } => {
                *name = dest.into();
            }
            Strategy::TextChild { tag, .. } => *tag = dest.into(),
            Strategy::Text { .. } | Strategy::Member { .. } => {}
        }
        self
    }

    /// Set the cardinality.
    #[must_use]
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Shorthand for [`Cardinality::Optional`].
    #[must_use]
    pub fn optional(self) -> Self {
        self.cardinality(Cardinality::Optional)
    }

    /// Shorthand for [`Cardinality::ZeroOrMore`].
    #[must_use]
    pub fn many(self) -> Self {
        self.cardinality(Cardinality::ZeroOrMore)
    }

    /// Shorthand for [`Cardinality::OneOrMore`].
    #[must_use]
    pub fn at_least_one(self) -> Self {
        self.cardinality(Cardinality::OneOrMore)
    }

    /// Value used in place of an absent field.
    ///
    /// The default is assigned once through the strategy. It skips the
    /// sequence-or-mapping check of many-valued rules.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Replace the text transform of an attribute, text or text-child rule.
    ///
    /// Has no effect on static and member rules.
    #[must_use]
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValue<'_>) -> Result<String, BuildError> + Send + Sync + 'static,
    {
        match &mut self.strategy {
            Strategy::Attribute { transform, .. }
            | Strategy::Text { transform }
            | Strategy::TextChild { transform, .. } => *transform = Box::new(f),
            Strategy::StaticAttribute { .. } | Strategy::Member { .. } => {}
        }
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn get_cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Evaluate this rule against a source mapping, writing into `node`.
    pub fn apply(
        &self,
        source: &IndexMap<String, ConfigValue>,
        node: &mut Element,
    ) -> Result<(), BuildError> {
        if let Strategy::StaticAttribute { name, value } = &self.strategy {
            node.set_attribute(name.clone(), value.clone());
            return Ok(());
        }

        let Some(value) = source.get(&self.source).filter(|v| !v.is_null()) else {
            if let Some(default) = &self.default {
                let input = FieldValue {
                    field: &self.source,
                    key: None,
                    value: default,
                };
                return self.assign(&input, node);
            }
            if self.cardinality.is_optional() {
                return Ok(());
            }
            return Err(BuildError::MissingRequiredField {
                field: self.source.clone(),
                tag: node.tag.clone(),
                snippet: ConfigValue::Mapping(source.clone()).snippet(),
            });
        };

        if !self.cardinality.expects_many() {
            return self.assign(
                &FieldValue {
                    field: &self.source,
                    key: None,
                    value,
                },
                node,
            );
        }

        match value {
            ConfigValue::Sequence(items) => {
                for item in items {
                    let input = FieldValue {
                        field: &self.source,
                        key: None,
                        value: item,
                    };
                    self.assign(&input, node)?;
                }
                Ok(())
            }
            ConfigValue::Mapping(entries) => {
                for (key, item) in entries {
                    let input = FieldValue {
                        field: &self.source,
                        key: Some(key.as_str()),
                        value: item,
                    };
                    self.assign(&input, node)?;
                }
                Ok(())
            }
            other => Err(FieldValue {
                field: &self.source,
                key: None,
                value: other,
            }
            .shape_error("a sequence or mapping")),
        }
    }

    fn assign(&self, input: &FieldValue<'_>, node: &mut Element) -> Result<(), BuildError> {
        match &self.strategy {
            Strategy::Attribute { name, transform } => {
                node.set_attribute(name.clone(), transform(input)?);
            }
            Strategy::StaticAttribute { name, value } => {
                node.set_attribute(name.clone(), value.clone());
            }
            Strategy::Text { transform } => node.set_text(transform(input)?),
            Strategy::TextChild { tag, transform } => {
                let mut child = Element::new(tag.clone());
                child.set_text(transform(input)?);
                node.push_child(child);
            }
            Strategy::Member { transform } => {
                let child = transform(input)?.ok_or_else(|| BuildError::AbsentBuiltElement {
                    field: self.source.clone(),
                    tag: node.tag.clone(),
                })?;
                node.push_child(child);
            }
        }
        Ok(())
    }
}

fn identity() -> TextTransform {
    Box::new(|input: &FieldValue<'_>| input.text())
}
