//! YAML serialization support using serde-saphyr.
//!
//! Only available when the `yaml` feature is enabled (the default).
//!
//! # Example
//!
//! ```rust
//! use slicespec_core::{ToYaml, extract};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = json!({
//!     "openapi": "3.0.3",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "paths": { "/pets": { "get": { "responses": { "200": { "description": "OK" } } } } }
//! });
//!
//! let sliced = extract(&doc, "3.0.3", "/pets", "get")?;
//! let yaml = sliced.to_yaml()?;
//! assert!(yaml.contains("openapi: 3.0.3"));
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Extension trait for serializing sliced documents (or any [`Serialize`] value) to YAML.
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}
