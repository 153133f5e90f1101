//! Format-specific parser/serializer handlers

mod json;
mod properties;
pub mod scalar;
mod toml;
mod yaml;

pub use json::JsonHandler;
pub use properties::PropertiesHandler;
pub use toml::TomlHandler;
pub use yaml::YamlHandler;
