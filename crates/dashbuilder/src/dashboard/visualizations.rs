//! Panel items: search-driven visualizations and static html.

use crate::dashboard::tags;
use crate::dashboard::{filterable, identifiable, search, titled};
use crate::schema::{BuildError, FieldRule, FieldValue, KeyValue, Schema, VariantRegistry};
use crate::types::{ConfigValue, Element};
use crate::xml::parse_markup;

/// The variants a panel may hold.
pub fn visualization_variants() -> VariantRegistry {
    VariantRegistry::new()
        .register(tags::TABLE, table)
        .register(tags::HTML, html)
        .register(tags::CHART, chart)
        .register(tags::EVENT, event)
        .register(tags::MAP, map)
        .register(tags::SINGLE, single)
}

fn visualization(tag: &str) -> Schema {
    Schema::new(tag).with_traits(&[filterable, identifiable, titled])
}

fn search_based(tag: &str) -> Schema {
    visualization(tag)
        .field(FieldRule::member("options", KeyValue::new(tags::OPTION, "name")).many())
        .field(FieldRule::member(tags::SEARCH, search()).optional())
}

/// `fields: [a, b]` becomes `<fields>a, b</fields>`.
fn field_list(input: &FieldValue<'_>) -> Result<String, BuildError> {
    let Some(items) = input.value.as_sequence() else {
        return input.text();
    };
    let parts = items
        .iter()
        .map(|value| {
            FieldValue {
                field: input.field,
                key: None,
                value,
            }
            .text()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(", "))
}

pub fn table() -> Schema {
    search_based(tags::TABLE)
        .field(FieldRule::text_child("fields").optional().transform(field_list))
}

pub fn event() -> Schema {
    search_based(tags::EVENT)
        .field(FieldRule::text_child("fields").optional().transform(field_list))
}

pub fn chart() -> Schema {
    search_based(tags::CHART)
}

pub fn map() -> Schema {
    search_based(tags::MAP)
}

pub fn single() -> Schema {
    search_based(tags::SINGLE)
}

/// An `<html>` panel item. The `html` field holds a markup fragment that is
/// parsed and embedded as the element's content.
pub fn html() -> Schema {
    Schema::new(tags::HTML)
        .with_root(html_root)
        .field(FieldRule::attribute("encoded").optional())
        .field(FieldRule::attribute("src").optional())
        .field(FieldRule::attribute("tokens").optional())
}

fn html_root(source: &ConfigValue) -> Result<Element, BuildError> {
    let Some(value) = source.get(tags::HTML).filter(|v| !v.is_null()) else {
        return Err(BuildError::MissingRequiredField {
            field: tags::HTML.to_string(),
            tag: tags::HTML.to_string(),
            snippet: source.snippet(),
        });
    };
    let markup = FieldValue {
        field: tags::HTML,
        key: None,
        value,
    }
    .text()?;

    parse_markup(&format!("<html>{markup}</html>")).map_err(|err| {
        BuildError::InvalidFieldShape {
            field: tags::HTML.to_string(),
            expected: "well-formed markup".to_string(),
            found: err.to_string(),
            snippet: value.snippet(),
        }
    })
}
