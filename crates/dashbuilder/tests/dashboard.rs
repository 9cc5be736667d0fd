//! End-to-end tests: documents through expansion, building and rendering.

use std::fs;

use dashbuilder::dashboard::{self, visualization_variants};
use dashbuilder::{
    ConfigValue, Dashbuilder, Error, ErrorKind, LoadError, XmlOptions, load_str, mapping,
    to_xml_string,
};

fn compact() -> XmlOptions {
    XmlOptions::builder().indent(0).declaration(false).build()
}

fn render(document: &ConfigValue) -> String {
    Dashbuilder::builder()
        .xml_options(compact())
        .build()
        .render(document)
        .unwrap()
}

// =============================================================================
// Documents
// =============================================================================

#[test]
fn form_with_templated_rows() {
    let source = r#"
form:
  label: Ops
  rows:
    _:
      arguments:
        host: [web-1, web-2]
      body:
        id: "row-{host}"
        panels:
          - title: "{host}"
            items:
              - table:
                  search:
                    query: "host={host} | stats count"
                  fields: [host, count]
                  options:
                    count: 5
  fieldset:
    submitButton: false
    items:
      - time:
          token: range
          earliest: -24h
          latest: now
"#;
    let xml = Dashbuilder::new().generate_str(source).unwrap();
    insta::assert_snapshot!(xml, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <form>
      <label>Ops</label>
      <row id="row-web-1">
        <panel>
          <title>web-1</title>
          <table>
            <option name="count">5</option>
            <search>
              <query>host=web-1 | stats count</query>
            </search>
            <fields>host, count</fields>
          </table>
        </panel>
      </row>
      <row id="row-web-2">
        <panel>
          <title>web-2</title>
          <table>
            <option name="count">5</option>
            <search>
              <query>host=web-2 | stats count</query>
            </search>
            <fields>host, count</fields>
          </table>
        </panel>
      </row>
      <fieldset submitButton="false">
        <input token="range" type="time" searchWhenChanged="true">
          <earliest>-24h</earliest>
          <latest>now</latest>
        </input>
      </fieldset>
    </form>
    "#);
}

#[test]
fn dashboard_attributes_and_empty_rows() {
    let xml = render(&mapping! {
        "dashboard" => mapping! {
            "hideEdit" => true,
            "refresh" => 60,
            "description" => "  Service health  ",
            "rows" => vec![mapping! {}],
        }
    });
    assert_eq!(
        xml,
        r#"<dashboard hideEdit="true" refresh="60"><description>Service health</description><row/></dashboard>"#
    );
}

#[test]
fn numeric_attributes_keep_their_source_spelling() {
    let document = load_str("dashboard:\n  refresh: 1.0\n  rows: []\n").unwrap();
    let xml = render(&document);
    assert!(xml.contains(r#"refresh="1.0""#), "{xml}");

    let document =
        load_str("dashboard:\n  refresh: 18446744073709551615\n  rows: []\n").unwrap();
    let xml = render(&document);
    assert!(xml.contains(r#"refresh="18446744073709551615""#), "{xml}");
}

#[test]
fn simple_template_substitutes_in_place() {
    let xml = render(&mapping! {
        "dashboard" => mapping! {
            "label" => mapping! {
                "_" => mapping! {
                    "arguments" => mapping! { "team" => "payments" },
                    "body" => "{team} overview",
                }
            }
        }
    });
    assert_eq!(xml, "<dashboard><label>payments overview</label></dashboard>");
}

#[test]
fn panel_requires_items() {
    let document = mapping! {
        "dashboard" => mapping! {
            "rows" => vec![mapping! { "panels" => vec![mapping! { "title" => "Empty" }] }],
        }
    };
    let err = Dashbuilder::new().render(&document).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MissingRequiredField));
    assert!(err.to_string().contains("'items'"));
}

#[test]
fn unknown_document_type_is_reported() {
    let err = Dashbuilder::new()
        .render(&mapping! { "report" => mapping! {} })
        .unwrap_err();
    assert!(matches!(err, Error::Build(_)));
    assert_eq!(err.kind(), Some(ErrorKind::AmbiguousOrUnknownVariant));
}

#[test]
fn expansion_errors_abort_the_build() {
    let err = Dashbuilder::new()
        .render(&mapping! { "dashboard" => mapping! { "label" => "{missing}" } })
        .unwrap_err();
    assert!(matches!(err, Error::Expand(_)));
    assert_eq!(err.kind(), Some(ErrorKind::PathLookupFailure));
}

// =============================================================================
// Panel Items
// =============================================================================

#[test]
fn html_item_embeds_parsed_markup() {
    let node = visualization_variants()
        .resolve(
            &mapping! {
                "html" => mapping! { "html" => "<p>Status: <b>ok</b></p>", "tokens" => true }
            },
            None,
        )
        .unwrap();
    assert_eq!(
        to_xml_string(&node, &compact()).unwrap(),
        r#"<html tokens="true"><p>Status:<b>ok</b></p></html>"#
    );
}

#[test]
fn html_item_requires_markup() {
    let err = visualization_variants()
        .resolve(&mapping! { "html" => mapping! { "src" => "page.html" } }, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

#[test]
fn html_item_rejects_broken_markup() {
    let err = visualization_variants()
        .resolve(&mapping! { "html" => mapping! { "html" => "<p>open" } }, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFieldShape);
}

#[test]
fn visualizations_share_filter_and_title_fields() {
    for tag in ["table", "chart", "event", "map", "single"] {
        let node = visualization_variants()
            .resolve(
                &mapping! { "title" => "T", "depends" => "$tok$", "id" => "v" },
                Some(tag),
            )
            .unwrap();
        assert_eq!(node.tag, tag);
        assert_eq!(node.attribute("depends"), Some("$tok$"));
        assert_eq!(node.attribute("id"), Some("v"));
        assert_eq!(node.child("title").and_then(|t| t.text.as_deref()), Some("T"));
    }
}

// =============================================================================
// Inputs
// =============================================================================

#[test]
fn dropdown_choices_and_label() {
    let node = dashboard::input_variants()
        .resolve(
            &mapping! {
                "dropdown" => mapping! {
                    "token" => "env",
                    "label" => "Environment",
                    "default" => "prod",
                    "choices" => mapping! { "prod" => "Production", "dev" => "Development" },
                }
            },
            None,
        )
        .unwrap();
    assert_eq!(
        to_xml_string(&node, &compact()).unwrap(),
        concat!(
            r#"<input token="env" type="dropdown" searchWhenChanged="true">"#,
            "<label>Environment</label>",
            "<default>prod</default>",
            r#"<choice value="prod">Production</choice>"#,
            r#"<choice value="dev">Development</choice>"#,
            "</input>",
        )
    );
}

#[test]
fn search_when_changed_can_be_disabled() {
    let node = dashboard::text()
        .build(&mapping! { "searchWhenChanged" => false, "prefix" => "host=" })
        .unwrap();
    assert_eq!(node.attribute("type"), Some("text"));
    assert_eq!(node.attribute("searchWhenChanged"), Some("false"));
    assert_eq!(node.child("prefix").and_then(|p| p.text.as_deref()), Some("host="));
}

#[test]
fn checkbox_value_decorations() {
    let node = dashboard::checkbox()
        .build(&mapping! {
            "valuePrefix" => "status=",
            "valueSuffix" => "",
            "delimiter" => " OR ",
        })
        .unwrap();
    let tags: Vec<&str> = node.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["delimiter", "valuePrefix", "valueSuffix"]);
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn generate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ops.yaml");
    fs::write(&path, "dashboard:\n  label: Ops\n").unwrap();

    let xml = Dashbuilder::builder()
        .xml_options(compact())
        .build()
        .generate_file(&path)
        .unwrap();
    assert_eq!(xml, "<dashboard><label>Ops</label></dashboard>");
}

#[test]
fn json_documents_load_too() {
    let document = load_str(r#"{"dashboard": {"label": "Ops", "rows": []}}"#).unwrap();
    assert_eq!(render(&document), "<dashboard><label>Ops</label></dashboard>");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dashbuilder::new()
        .generate_file(dir.path().join("absent.yaml"))
        .unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::Io { .. })));
    assert_eq!(err.kind(), None);
}

#[test]
fn create_builds_from_expanded_data() {
    let node = dashboard::create(&mapping! { "form" => mapping! { "label" => "Ops" } }).unwrap();
    assert_eq!(node.tag, "form");
    assert_eq!(node.count(), 2);
}
