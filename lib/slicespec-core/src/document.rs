//! In-memory OpenAPI document tree and text helpers.
//!
//! The engine works on a plain [`serde_json::Value`] tree. Parsing and rendering
//! helpers live here for convenience, the algorithms never call them.

use std::path::Path;

use serde_json::{Map, Value};

use crate::SliceError;

/// A parsed OpenAPI document (mapping / list / scalar tree).
pub type Document = Value;

/// The lower-cased HTTP methods recognized as operation keys of a path item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Returns `true` if `key` is a recognized (lower-case) HTTP method.
#[must_use]
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}

/// Serialized text format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum DocumentFormat {
    /// JSON text.
    #[display("json")]
    Json,
    /// YAML text.
    #[display("yaml")]
    #[default]
    Yaml,
}

impl DocumentFormat {
    /// Guesses the format from a file extension.
    ///
    /// Returns `None` when the extension is unknown; [`parse_document_auto`] then tries
    /// YAML first and falls back to JSON.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses document text in the given format.
///
/// # Errors
///
/// Returns [`SliceError::Json`] or [`SliceError::Yaml`] when the text is not well-formed.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Document, SliceError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        DocumentFormat::Yaml => parse_yaml(text),
    }
}

/// Parses document text of unknown format: YAML first, then JSON.
///
/// # Errors
///
/// Returns the JSON error when neither format accepts the text.
pub fn parse_document_auto(text: &str) -> Result<Document, SliceError> {
    parse_yaml(text).or_else(|_| Ok(serde_json::from_str(text)?))
}

/// Renders a document as text (pretty JSON or YAML).
///
/// # Errors
///
/// Returns [`SliceError::Json`] or [`SliceError::Yaml`] when serialization fails.
pub fn render_document(document: &Document, format: DocumentFormat) -> Result<String, SliceError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        DocumentFormat::Yaml => render_yaml(document),
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(text: &str) -> Result<Document, SliceError> {
    serde_saphyr::from_str(text).map_err(SliceError::yaml)
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_text: &str) -> Result<Document, SliceError> {
    Err(SliceError::YamlUnavailable)
}

#[cfg(feature = "yaml")]
fn render_yaml(document: &Document) -> Result<String, SliceError> {
    use crate::ToYaml;

    document.to_yaml().map_err(SliceError::yaml)
}

#[cfg(not(feature = "yaml"))]
fn render_yaml(_document: &Document) -> Result<String, SliceError> {
    Err(SliceError::YamlUnavailable)
}

/// Looks up the path item and the operation for `(path, method)`.
///
/// The method is matched case-insensitively against the lower-cased keys.
pub(crate) fn lookup_operation<'a>(
    document: &'a Document,
    path: &str,
    method: &str,
) -> Result<(&'a Map<String, Value>, &'a Value, String), SliceError> {
    let path_item = document
        .get("paths")
        .and_then(|paths| paths.get(path))
        .ok_or_else(|| SliceError::PathNotFound {
            path: path.to_string(),
        })?;

    let method = method.to_ascii_lowercase();
    let Some(path_item) = path_item.as_object() else {
        return Err(SliceError::InvalidPathItem {
            path: path.to_string(),
        });
    };

    let operation = path_item
        .get(&method)
        .ok_or_else(|| SliceError::MethodNotFound {
            path: path.to_string(),
            method: method.clone(),
        })?;

    Ok((path_item, operation, method))
}

/// Returns the named section of `components` (e.g. `schemas`), if any.
pub(crate) fn components_section<'a>(
    document: &'a Document,
    section: &str,
) -> Option<&'a Map<String, Value>> {
    document
        .get("components")
        .and_then(|components| components.get(section))
        .and_then(Value::as_object)
}

/// Escapes a key for use as a JSON pointer token (RFC 6901).
pub(crate) fn pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
