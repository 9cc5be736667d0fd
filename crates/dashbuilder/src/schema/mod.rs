//! Schema-driven element building.
//!
//! A [`Schema`] is an ordered list of [`FieldRule`]s that map keys of a
//! source mapping onto attributes, text and children of one output
//! [`Element`](crate::Element). A [`VariantRegistry`] picks the schema to use
//! from a discriminant tag.

mod definition;
mod error;
mod field;
mod registry;

pub use definition::{ElementFactory, FieldTrait, KeyValue, RootBuilder, Schema, Wrap};
pub use error::{BuildError, compute_suggestions};
pub use field::{Cardinality, FieldRule, FieldValue, MemberTransform, Strategy, TextTransform};
pub use registry::{Discriminated, SchemaFactory, VariantRegistry, extract_discriminant};
