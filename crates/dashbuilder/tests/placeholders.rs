//! Tests for placeholder substitution in scalar strings.

use dashbuilder::{ConfigValue, ErrorKind, ExpandError, Scope, expand_str, mapping};

fn scope(bindings: ConfigValue) -> Scope<'static> {
    Scope::from_value(&bindings).unwrap()
}

// =============================================================================
// Substitution
// =============================================================================

#[test]
fn text_without_placeholders_is_unchanged() {
    assert_eq!(
        expand_str("There is nothing to replace", &Scope::new()).unwrap(),
        "There is nothing to replace"
    );
}

#[test]
fn same_name_can_appear_twice() {
    let scope = scope(mapping! { "number" => "five" });
    assert_eq!(
        expand_str("{number} is equal to {number}", &scope).unwrap(),
        "five is equal to five"
    );
}

#[test]
fn colon_path_descends_into_mappings() {
    let scope = scope(mapping! { "numbers" => mapping! { "five" => 5 } });
    assert_eq!(
        expand_str("{numbers:five} = 2 + 3", &scope).unwrap(),
        "5 = 2 + 3"
    );
}

#[test]
fn chained_indirection_resolves_fully() {
    let scope = scope(mapping! {
        "part1" => "fi",
        "part2" => "{part3}e",
        "part3" => "v",
    });
    assert_eq!(expand_str("{part1}{part2}", &scope).unwrap(), "five");
}

#[test]
fn name_reused_after_its_resolution_finished_is_not_a_cycle() {
    let scope = scope(mapping! { "x" => "{y}", "y" => "v" });
    assert_eq!(expand_str("{y} {x}", &scope).unwrap(), "v v");
}

#[test]
fn non_string_scalars_render_bare() {
    let scope = scope(mapping! { "on" => true, "ratio" => 0.5, "none" => ConfigValue::Null });
    assert_eq!(
        expand_str("[{on}] [{ratio}] [{none}]", &scope).unwrap(),
        "[true] [0.5] []"
    );
}

#[test]
fn unclosed_and_empty_braces_are_literal() {
    let scope = scope(mapping! { "a" => "1" });
    assert_eq!(expand_str("{a} {} {", &scope).unwrap(), "1 {} {");
}

#[test]
fn child_scope_sees_parent_bindings() {
    let root = scope(mapping! { "env" => "prod" });
    let child = root.child(
        [("host".to_string(), ConfigValue::from("web-{env}"))]
            .into_iter()
            .collect(),
    );
    assert_eq!(expand_str("{host}", &child).unwrap(), "web-prod");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn direct_cycle_is_detected() {
    let scope = scope(mapping! { "x" => "{x}" });
    let err = expand_str("{x}", &scope).unwrap_err();
    assert_eq!(
        err,
        ExpandError::CyclicSubstitution {
            chain: vec!["x".to_string(), "x".to_string()]
        }
    );
    assert_eq!(err.kind(), ErrorKind::CyclicSubstitution);
}

#[test]
fn mutual_cycle_is_detected() {
    let scope = scope(mapping! { "x" => "a{y}", "y" => "b{x}" });
    let err = expand_str("{x}", &scope).unwrap_err();
    assert_eq!(err.to_string(), "cyclic placeholder substitution: x -> y -> x");
}

#[test]
fn missing_name_is_a_lookup_failure() {
    let scope = scope(mapping! { "a" => "1" });
    let err = expand_str("{b}", &scope).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathLookupFailure);
    assert!(matches!(err, ExpandError::PathLookup { ref segment, .. } if segment == "b"));
}

#[test]
fn missing_nested_segment_names_the_segment() {
    let scope = scope(mapping! { "numbers" => mapping! { "five" => 5 } });
    let err = expand_str("{numbers:six}", &scope).unwrap_err();
    let ExpandError::PathLookup { path, segment, .. } = err else {
        panic!("expected a lookup failure, got {err:?}");
    };
    assert_eq!(path, "numbers:six");
    assert_eq!(segment, "six");
}

#[test]
fn path_through_a_scalar_fails() {
    let scope = scope(mapping! { "name" => "web" });
    let err = expand_str("{name:first}", &scope).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathLookupFailure);
}
