//! Form inputs. Every input renders as `<input type="...">`.

use crate::dashboard::tags;
use crate::dashboard::{filterable, identifiable, search, tokenized};
use crate::schema::{FieldRule, KeyValue, Schema, VariantRegistry};

/// The variants a fieldset may hold.
pub fn input_variants() -> VariantRegistry {
    VariantRegistry::new()
        .register(tags::TIME, time)
        .register(tags::CHECKBOX, checkbox)
        .register(tags::DROPDOWN, dropdown)
        .register(tags::RADIO, radio)
        .register(tags::MULTISELECT, multiselect)
        .register(tags::TEXT, text)
        .register(tags::LINK, link)
}

fn input(kind: &str) -> Schema {
    Schema::new(tags::INPUT)
        .with_traits(&[identifiable, tokenized, filterable])
        .field(FieldRule::static_attribute("type", kind))
        .field(
            FieldRule::attribute("searchWhenChanged")
                .optional()
                .default_value(true),
        )
        .field(FieldRule::text_child("label").optional())
}

fn defaults(schema: Schema) -> Schema {
    schema
        .field(FieldRule::text_child("default").optional())
        .field(FieldRule::text_child("initialValue").optional())
}

/// Text wrapped around each selected value and around the whole selection.
fn value_decorations(schema: Schema) -> Schema {
    ["delimiter", "prefix", "suffix", "valuePrefix", "valueSuffix"]
        .into_iter()
        .fold(schema, |schema, name| {
            schema.field(FieldRule::text_child(name).optional())
        })
}

/// Static `choices` plus choices populated from a search.
fn choices(schema: Schema) -> Schema {
    schema
        .field(FieldRule::member("choices", KeyValue::new(tags::CHOICE, "value")).many())
        .field(FieldRule::text_child("fieldForLabel").optional())
        .field(FieldRule::text_child("fieldForValue").optional())
        .field(FieldRule::member(tags::SEARCH, search()).optional())
}

pub fn time() -> Schema {
    input(tags::TIME)
        .field(FieldRule::text_child("earliest").optional())
        .field(FieldRule::text_child("latest").optional())
}

pub fn checkbox() -> Schema {
    input(tags::CHECKBOX).with_traits(&[defaults, value_decorations, choices])
}

pub fn multiselect() -> Schema {
    input(tags::MULTISELECT).with_traits(&[defaults, value_decorations, choices])
}

pub fn dropdown() -> Schema {
    input(tags::DROPDOWN).with_traits(&[defaults, choices])
}

pub fn radio() -> Schema {
    input(tags::RADIO).with_traits(&[defaults, choices])
}

pub fn link() -> Schema {
    input(tags::LINK).with_traits(&[defaults, choices])
}

pub fn text() -> Schema {
    input(tags::TEXT)
        .with(defaults)
        .field(FieldRule::text_child("prefix").optional())
        .field(FieldRule::text_child("suffix").optional())
}
