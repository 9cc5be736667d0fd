//! The end-to-end pipeline: load, expand, build, render.

use std::path::Path;

use bon::Builder;
use tracing::{debug, info};

use crate::dashboard;
use crate::error::Error;
use crate::expander::{ExpandOptions, Expander};
use crate::loader::{load_file, load_str};
use crate::types::{ConfigValue, Element};
use crate::xml::{XmlOptions, to_xml_string};

/// Turns dashboard documents into markup.
///
/// # Example
///
/// ```
/// use dashbuilder::{Dashbuilder, XmlOptions};
///
/// let builder = Dashbuilder::builder()
///     .xml_options(XmlOptions::builder().indent(0).declaration(false).build())
///     .build();
///
/// let xml = builder
///     .generate_str("dashboard:\n  label: Ops\n")
///     .unwrap();
/// assert_eq!(xml, "<dashboard><label>Ops</label></dashboard>");
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct Dashbuilder {
    /// Options for template expansion.
    #[builder(default)]
    expand_options: ExpandOptions,

    /// Options for markup rendering.
    #[builder(default)]
    xml_options: XmlOptions,
}

impl Dashbuilder {
    /// Create a pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand_options(&self) -> &ExpandOptions {
        &self.expand_options
    }

    pub fn xml_options(&self) -> &XmlOptions {
        &self.xml_options
    }

    /// Expand every template directive and placeholder in a document.
    pub fn expand(&self, document: &ConfigValue) -> Result<ConfigValue, Error> {
        Ok(Expander::with_options(self.expand_options.clone()).expand(document)?)
    }

    /// Expand a document and build its element tree.
    pub fn build(&self, document: &ConfigValue) -> Result<Element, Error> {
        let expanded = self.expand(document)?;
        let root = dashboard::create(&expanded)?;
        debug!(tag = %root.tag, elements = root.count(), "built element tree");
        Ok(root)
    }

    /// Expand, build and render a document.
    pub fn render(&self, document: &ConfigValue) -> Result<String, Error> {
        Ok(to_xml_string(&self.build(document)?, &self.xml_options)?)
    }

    /// Load a document from text and render it.
    pub fn generate_str(&self, text: &str) -> Result<String, Error> {
        self.render(&load_str(text)?)
    }

    /// Load a document from a file and render it.
    pub fn generate_file(&self, path: impl AsRef<Path>) -> Result<String, Error> {
        let path = path.as_ref();
        info!(path = %path.display(), "generating dashboard");
        self.render(&load_file(path)?)
    }
}
