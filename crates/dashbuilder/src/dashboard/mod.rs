//! The dashboard vocabulary: schemas for every element a dashboard document
//! may contain.
//!
//! The entry point is [`create`], which dispatches on the single top-level
//! key of a document (`dashboard` or `form`).

mod inputs;
mod layout;
mod search;
mod traits;
mod visualizations;

use crate::schema::{BuildError, VariantRegistry};
use crate::types::{ConfigValue, Element};

pub use inputs::{checkbox, dropdown, input_variants, link, multiselect, radio, text, time};
pub use layout::{dashboard, fieldset, form, panel, row};
pub use search::search;
pub use traits::{filterable, identifiable, referenceable, titled, tokenized};
pub use visualizations::{chart, event, html, map, single, table, visualization_variants};

/// Tag names of the dashboard vocabulary.
pub mod tags {
    pub const DASHBOARD: &str = "dashboard";
    pub const FORM: &str = "form";
    pub const ROW: &str = "row";
    pub const PANEL: &str = "panel";
    pub const FIELDSET: &str = "fieldset";
    pub const SEARCH: &str = "search";
    pub const INPUT: &str = "input";
    pub const OPTION: &str = "option";
    pub const CHOICE: &str = "choice";

    pub const TABLE: &str = "table";
    pub const CHART: &str = "chart";
    pub const EVENT: &str = "event";
    pub const MAP: &str = "map";
    pub const SINGLE: &str = "single";
    pub const HTML: &str = "html";

    pub const TIME: &str = "time";
    pub const CHECKBOX: &str = "checkbox";
    pub const DROPDOWN: &str = "dropdown";
    pub const RADIO: &str = "radio";
    pub const MULTISELECT: &str = "multiselect";
    pub const TEXT: &str = "text";
    pub const LINK: &str = "link";
}

/// The variants allowed at the top of a document.
pub fn documents() -> VariantRegistry {
    VariantRegistry::new()
        .register(tags::DASHBOARD, dashboard)
        .register(tags::FORM, form)
}

/// Build a dashboard or form element from a single-key document mapping.
///
/// # Example
///
/// ```
/// use dashbuilder::{dashboard, mapping};
///
/// let doc = mapping! { "dashboard" => mapping! { "label" => "Ops" } };
/// let root = dashboard::create(&doc).unwrap();
/// assert_eq!(root.tag, "dashboard");
/// assert_eq!(root.child("label").and_then(|l| l.text.as_deref()), Some("Ops"));
/// ```
pub fn create(source: &ConfigValue) -> Result<Element, BuildError> {
    documents().resolve(source, None)
}
