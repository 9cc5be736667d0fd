use bon::Builder;
use indexmap::IndexMap;

/// A node of the output tree: a tag with attributes, optional text and
/// ordered children.
///
/// Elements are built bottom-up by schemas and handed to a serializer.
///
/// # Example
///
/// ```
/// use dashbuilder::Element;
///
/// let mut panel = Element::new("panel");
/// panel.set_attribute("id", "errors");
///
/// let title = Element::builder().tag("title").text("Errors".to_string()).build();
/// panel.push_child(title);
///
/// assert_eq!(panel.attribute("id"), Some("errors"));
/// assert_eq!(panel.child("title").and_then(|t| t.text.as_deref()), Some("Errors"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Builder)]
#[builder(on(String, into))]
pub struct Element {
    /// Tag name of the element.
    pub tag: String,

    /// Attributes in assignment order. Setting an existing name overwrites it
    /// in place.
    #[builder(default)]
    pub attributes: IndexMap<String, String>,

    /// Text content, if any.
    pub text: Option<String>,

    /// Text following this element inside its parent, for mixed content.
    pub tail: Option<String>,

    /// Child elements in document order.
    #[builder(default)]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute, overwriting any previous value with the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Get the first child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Get all children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Nest this element under a new parent with the given tag.
    pub fn wrap(self, tag: impl Into<String>) -> Element {
        let mut parent = Element::new(tag);
        parent.push_child(self);
        parent
    }

    /// Count this element and all of its descendants.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }
}
