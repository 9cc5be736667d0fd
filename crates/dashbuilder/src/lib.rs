pub mod dashboard;
pub mod error;
pub mod expander;
pub mod loader;
pub mod pipeline;
pub mod schema;
pub mod types;
pub mod xml;

pub use error::{Error, ErrorKind};
pub use expander::{
    DEFAULT_MAX_DEPTH, ExpandError, ExpandOptions, Expander, Fragment, Scope, TEMPLATE_KEY, expand,
    expand_str, scan_placeholders,
};
pub use loader::{LoadError, load_file, load_str};
pub use pipeline::Dashbuilder;
pub use schema::{
    BuildError, Cardinality, ElementFactory, FieldRule, FieldTrait, FieldValue, KeyValue, Schema,
    VariantRegistry, Wrap, compute_suggestions, extract_discriminant,
};
pub use types::{ConfigValue, Element};
pub use xml::{XmlError, XmlOptions, parse_markup, to_xml_string};

#[doc(hidden)]
pub use indexmap::IndexMap as __IndexMap;

/// Creates a [`ConfigValue::Mapping`] from key-value pairs.
///
/// Keys keep the order they are written in. Values are converted via
/// `Into<ConfigValue>`, so strings, numbers, booleans, vectors and nested
/// `mapping!` calls can be passed directly.
///
/// # Example
///
/// ```
/// use dashbuilder::{ConfigValue, mapping};
///
/// let m = mapping! { "name" => "web", "ports" => vec![80, 443] };
/// assert_eq!(m.get("name").and_then(ConfigValue::as_str), Some("web"));
/// assert_eq!(m.get("ports").and_then(ConfigValue::as_sequence).map(<[_]>::len), Some(2));
/// ```
#[macro_export]
macro_rules! mapping {
    {} => {
        $crate::ConfigValue::Mapping($crate::__IndexMap::new())
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::__IndexMap::<String, $crate::ConfigValue>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::ConfigValue>::into($value));
            )+
            $crate::ConfigValue::Mapping(map)
        }
    };
}
