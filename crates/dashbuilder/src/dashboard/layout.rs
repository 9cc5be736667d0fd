//! Page structure: dashboards, forms, rows, panels and fieldsets.

use crate::dashboard::tags;
use crate::dashboard::{filterable, identifiable, input_variants, search, visualization_variants};
use crate::schema::{FieldRule, Schema};

const DOCUMENT_ATTRIBUTES: [&str; 13] = [
    "hideChrome",
    "hideAppBar",
    "hideEdit",
    "hideFilters",
    "hideFooter",
    "hideSplunkBar",
    "hideTitle",
    "isDashboard",
    "isVisible",
    "onunloadCancelJobs",
    "refresh",
    "script",
    "stylesheet",
];

fn document(tag: &str) -> Schema {
    DOCUMENT_ATTRIBUTES
        .into_iter()
        .fold(Schema::new(tag), |schema, name| {
            schema.field(FieldRule::attribute(name).optional())
        })
        .field(FieldRule::text_child("label").optional())
        .field(FieldRule::text_child("description").optional())
        .field(FieldRule::member(tags::SEARCH, search()).optional())
        .field(FieldRule::member("rows", row()).many())
        .field(FieldRule::member(tags::FIELDSET, fieldset()).optional())
}

pub fn dashboard() -> Schema {
    document(tags::DASHBOARD)
}

pub fn form() -> Schema {
    document(tags::FORM)
}

pub fn row() -> Schema {
    Schema::new(tags::ROW)
        .with_traits(&[filterable, identifiable])
        .field(FieldRule::attribute("grouping").optional())
        .field(FieldRule::member("panels", panel()).many())
}

pub fn panel() -> Schema {
    ["depends", "app", "id", "ref", "rejects"]
        .into_iter()
        .fold(Schema::new(tags::PANEL), |schema, name| {
            schema.field(FieldRule::attribute(name).optional())
        })
        .field(FieldRule::text_child("title").optional())
        .field(FieldRule::text_child("description").optional())
        .field(FieldRule::member(tags::SEARCH, search()).optional())
        .field(FieldRule::member("items", visualization_variants()).at_least_one())
}

pub fn fieldset() -> Schema {
    Schema::new(tags::FIELDSET)
        .field(FieldRule::attribute("autoRun").optional())
        .field(FieldRule::attribute("submitButton").optional())
        .field(FieldRule::member("items", input_variants()).many())
}
