use crate::dashboard::tags;
use crate::schema::{FieldRule, Schema};

/// A `<search>` element: either an inline query or a reference to a saved
/// or base search.
pub fn search() -> Schema {
    let schema = ["app", "base", "id", "ref"]
        .into_iter()
        .fold(Schema::new(tags::SEARCH), |schema, name| {
            schema.field(FieldRule::attribute(name).optional())
        });

    [
        "cache",
        "earliest",
        "latest",
        "query",
        "refresh",
        "refreshType",
        "sampleRatio",
    ]
    .into_iter()
    .fold(schema, |schema, name| {
        schema.field(FieldRule::text_child(name).optional())
    })
}
