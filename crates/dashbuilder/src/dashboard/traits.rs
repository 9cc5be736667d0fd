//! Field traits shared across the vocabulary.

use crate::schema::{FieldRule, Schema};

/// Optional `rejects` and `depends` token conditions.
pub fn filterable(schema: Schema) -> Schema {
    schema
        .field(FieldRule::attribute("rejects").optional())
        .field(FieldRule::attribute("depends").optional())
}

/// Optional `id` attribute.
pub fn identifiable(schema: Schema) -> Schema {
    schema.field(FieldRule::attribute("id").optional())
}

/// Optional `ref` attribute.
pub fn referenceable(schema: Schema) -> Schema {
    schema.field(FieldRule::attribute("ref").optional())
}

/// Optional `<title>` child.
pub fn titled(schema: Schema) -> Schema {
    schema.field(FieldRule::text_child("title").optional())
}

/// Optional `token` attribute.
pub fn tokenized(schema: Schema) -> Schema {
    schema.field(FieldRule::attribute("token").optional())
}
