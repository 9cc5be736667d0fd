//! Tests for field rules and schema building.

use dashbuilder::{
    BuildError, Cardinality, ConfigValue, Element, ErrorKind, FieldRule, FieldValue, KeyValue,
    Schema, Wrap, mapping,
};

// =============================================================================
// Required, Optional and Default
// =============================================================================

#[test]
fn missing_required_field_fails() {
    let schema = Schema::new("search").field(FieldRule::text_child("query"));
    let err = schema.build(&mapping! { "earliest" => "-1h" }).unwrap_err();
    assert_eq!(
        err,
        BuildError::MissingRequiredField {
            field: "query".to_string(),
            tag: "search".to_string(),
            snippet: "{earliest: -1h}".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

#[test]
fn default_fills_a_missing_required_field() {
    let schema = Schema::new("search").field(FieldRule::text_child("query").default_value("*"));
    let node = schema.build(&mapping! {}).unwrap();
    assert_eq!(node.child("query").and_then(|q| q.text.as_deref()), Some("*"));
}

#[test]
fn default_is_ignored_when_the_field_is_present() {
    let schema = Schema::new("input").field(
        FieldRule::attribute("searchWhenChanged")
            .optional()
            .default_value(true),
    );
    let node = schema
        .build(&mapping! { "searchWhenChanged" => false })
        .unwrap();
    assert_eq!(node.attribute("searchWhenChanged"), Some("false"));
}

#[test]
fn null_counts_as_absent() {
    let schema = Schema::new("panel").field(FieldRule::attribute("id").optional());
    let node = schema.build(&mapping! { "id" => ConfigValue::Null }).unwrap();
    assert_eq!(node.attribute("id"), None);

    let required = Schema::new("panel").field(FieldRule::attribute("id"));
    let err = required.build(&mapping! { "id" => ConfigValue::Null }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

#[test]
fn optional_field_may_be_absent() {
    let schema = Schema::new("row").field(FieldRule::attribute("grouping").optional());
    assert_eq!(schema.build(&mapping! {}).unwrap(), Element::new("row"));
}

#[test]
fn many_rule_default_is_assigned_once() {
    let schema = Schema::new("row")
        .field(FieldRule::attribute("grouping").many().default_value("none"));
    let node = schema.build(&mapping! {}).unwrap();
    assert_eq!(node.attribute("grouping"), Some("none"));

    let children = Schema::new("row").field(
        FieldRule::text_child("panels")
            .to("panel")
            .at_least_one()
            .default_value("empty"),
    );
    let node = children.build(&mapping! {}).unwrap();
    let texts: Vec<&str> = node
        .children_named("panel")
        .filter_map(|c| c.text.as_deref())
        .collect();
    assert_eq!(texts, vec!["empty"]);
}

#[test]
fn many_rule_present_value_is_still_shape_checked() {
    let schema = Schema::new("row")
        .field(FieldRule::attribute("grouping").many().default_value("none"));
    let err = schema.build(&mapping! { "grouping" => "a" }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldShape);
}

// =============================================================================
// Assignment Strategies
// =============================================================================

#[test]
fn attribute_can_be_renamed() {
    let schema =
        Schema::new("search").field(FieldRule::attribute("refresh").to("refreshInterval"));
    let node = schema.build(&mapping! { "refresh" => 30 }).unwrap();
    assert_eq!(node.attribute("refreshInterval"), Some("30"));
    assert_eq!(node.attribute("refresh"), None);
}

#[test]
fn later_attribute_rule_wins() {
    let schema = Schema::new("panel")
        .field(FieldRule::attribute("id"))
        .field(FieldRule::attribute("ref").to("id"));
    let node = schema
        .build(&mapping! { "id" => "first", "ref" => "second" })
        .unwrap();
    assert_eq!(node.attribute("id"), Some("second"));
    assert_eq!(node.attributes.len(), 1);
}

#[test]
fn static_attribute_ignores_source_data() {
    let schema = Schema::new("input").field(FieldRule::static_attribute("type", "time"));
    for source in [mapping! {}, mapping! { "type" => "dropdown" }] {
        let node = schema.build(&source).unwrap();
        assert_eq!(node.attribute("type"), Some("time"));
    }
}

#[test]
fn text_rule_sets_element_text() {
    let schema = Schema::new("query").field(FieldRule::text("value"));
    let node = schema.build(&mapping! { "value" => "index=main" }).unwrap();
    assert_eq!(node.text.as_deref(), Some("index=main"));
}

#[test]
fn text_child_can_be_renamed() {
    let schema = Schema::new("panel").field(FieldRule::text_child("name").to("title"));
    let node = schema.build(&mapping! { "name" => "Errors" }).unwrap();
    assert_eq!(node.child("title").and_then(|t| t.text.as_deref()), Some("Errors"));
}

#[test]
fn transform_rewrites_the_value() {
    let schema = Schema::new("panel").field(
        FieldRule::text_child("title").transform(|input: &FieldValue<'_>| {
            Ok(input.text()?.to_uppercase())
        }),
    );
    let node = schema.build(&mapping! { "title" => "errors" }).unwrap();
    assert_eq!(node.child("title").and_then(|t| t.text.as_deref()), Some("ERRORS"));
}

#[test]
fn member_builds_a_nested_schema() {
    let search = Schema::new("search").field(FieldRule::text_child("query"));
    let schema = Schema::new("panel").field(FieldRule::member("search", search));
    let node = schema
        .build(&mapping! { "search" => mapping! { "query" => "index=main" } })
        .unwrap();
    let query = node.child("search").and_then(|s| s.child("query"));
    assert_eq!(query.and_then(|q| q.text.as_deref()), Some("index=main"));
}

#[test]
fn member_returning_nothing_fails() {
    let schema = Schema::new("panel").field(FieldRule::member_with(
        "search",
        |_: &FieldValue<'_>| Ok(None),
    ));
    let err = schema.build(&mapping! { "search" => "x" }).unwrap_err();
    assert_eq!(
        err,
        BuildError::AbsentBuiltElement {
            field: "search".to_string(),
            tag: "panel".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::AbsentBuiltElement);
}

#[test]
fn wrap_nests_under_an_envelope() {
    let inner = Schema::new("query").field(FieldRule::text("q"));
    let schema =
        Schema::new("panel").field(FieldRule::member("search", Wrap::new("search", inner)));
    let node = schema
        .build(&mapping! { "search" => mapping! { "q" => "index=main" } })
        .unwrap();
    let query = node.child("search").and_then(|s| s.child("query"));
    assert_eq!(query.and_then(|q| q.text.as_deref()), Some("index=main"));
}

// =============================================================================
// Many-valued Rules
// =============================================================================

#[test]
fn many_over_a_mapping_keeps_insertion_order() {
    let schema = Schema::new("table")
        .field(FieldRule::member("options", KeyValue::new("option", "name")).many());
    let node = schema
        .build(&mapping! {
            "options" => mapping! { "wrap" => true, "count" => 10, "drilldown" => "none" }
        })
        .unwrap();

    let options: Vec<(&str, &str)> = node
        .children_named("option")
        .map(|o| (o.attribute("name").unwrap(), o.text.as_deref().unwrap()))
        .collect();
    assert_eq!(
        options,
        vec![("wrap", "true"), ("count", "10"), ("drilldown", "none")]
    );
}

#[test]
fn many_over_a_sequence_keeps_order() {
    let schema = Schema::new("row").field(FieldRule::text_child("panels").to("panel").many());
    let node = schema
        .build(&mapping! { "panels" => vec!["a", "b", "c"] })
        .unwrap();
    let texts: Vec<&str> = node
        .children
        .iter()
        .filter_map(|c| c.text.as_deref())
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn many_over_a_scalar_is_a_shape_error() {
    let schema = Schema::new("row").field(FieldRule::text_child("panels").many());
    let err = schema.build(&mapping! { "panels" => "a" }).unwrap_err();
    assert_eq!(
        err,
        BuildError::InvalidFieldShape {
            field: "panels".to_string(),
            expected: "a sequence or mapping".to_string(),
            found: "string".to_string(),
            snippet: "a".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidFieldShape);
}

#[test]
fn at_least_one_requires_the_field() {
    let schema = Schema::new("panel").field(FieldRule::text_child("items").at_least_one());
    assert_eq!(
        schema.build(&mapping! {}).unwrap_err().kind(),
        ErrorKind::MissingRequiredField
    );
}

#[test]
fn key_value_rejects_sequence_items() {
    let schema = Schema::new("table")
        .field(FieldRule::member("options", KeyValue::new("option", "name")).many());
    let err = schema
        .build(&mapping! { "options" => vec!["count"] })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldShape);
}

#[test]
fn text_of_a_mapping_is_a_shape_error() {
    let schema = Schema::new("panel").field(FieldRule::text_child("title"));
    let err = schema
        .build(&mapping! { "title" => mapping! { "a" => 1 } })
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::InvalidFieldShape { ref expected, .. } if expected == "a scalar"
    ));
}

#[test]
fn schema_requires_a_mapping() {
    let schema = Schema::new("panel");
    let err = schema.build(&ConfigValue::from("panel")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldShape);
}

#[test]
fn cardinality_symbols() {
    for symbol in ['1', '?', '+', '*'] {
        let cardinality = Cardinality::from_symbol(symbol).unwrap();
        assert_eq!(cardinality.symbol(), symbol);
    }
    assert_eq!(Cardinality::from_symbol('x'), None);
    assert!(Cardinality::ZeroOrMore.is_optional());
    assert!(!Cardinality::OneOrMore.is_optional());
}
