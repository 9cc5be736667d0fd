mod config_value;
mod element;

pub use config_value::ConfigValue;
pub use element::Element;
