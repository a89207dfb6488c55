//! Endpoint enumeration and path filtering.

use regex::Regex;
use serde_json::Value;

use crate::document::is_http_method;
use crate::{Document, SliceError};

/// A `(path, method)` pair of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{} {path}", method.to_ascii_uppercase())]
pub struct Endpoint {
    /// The path template, e.g. `/users/{id}`.
    pub path: String,
    /// The lower-cased method.
    pub method: String,
}

impl Endpoint {
    /// Creates an endpoint, lower-casing the method.
    #[must_use]
    pub fn new(path: impl Into<String>, method: &str) -> Self {
        Self {
            path: path.into(),
            method: method.to_ascii_lowercase(),
        }
    }
}

/// Every endpoint of `document`, in document order.
///
/// Path item keys that are not HTTP methods (`parameters`, `summary`, `x-*`...)
/// are ignored. Method keys are OpenAPI field names and match exactly: an
/// upper-case `DELETE` key is not an operation, and [`extract`](crate::extract)
/// would not find it either.
#[must_use]
pub fn list_endpoints(document: &Document) -> Vec<Endpoint> {
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return vec![];
    };
    paths
        .iter()
        .filter_map(|(path, item)| Some((path, item.as_object()?)))
        .flat_map(|(path, item)| {
            item.keys()
                .filter(|key| is_http_method(key))
                .map(move |method| Endpoint::new(path.as_str(), method))
        })
        .collect()
}

/// Selects endpoints by path.
#[derive(Debug, Clone, Default)]
pub struct EndpointFilter {
    pattern: Option<Regex>,
}

impl EndpointFilter {
    /// Accepts every path.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Accepts paths matching a glob, where `*` is any run of characters (`/` included)
    /// and `?` any single character.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::InvalidPattern`] when the translated expression exceeds the
    /// regex size limits.
    pub fn glob(pattern: &str) -> Result<Self, SliceError> {
        let mut expression = String::from("^");
        for ch in pattern.chars() {
            match ch {
                '*' => expression.push_str(".*"),
                '?' => expression.push('.'),
                _ => expression.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
            }
        }
        expression.push('$');
        Ok(Self {
            pattern: Some(Regex::new(&expression)?),
        })
    }

    /// Accepts paths whose beginning matches a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::InvalidPattern`] when `pattern` is not a valid expression.
    pub fn regex(pattern: &str) -> Result<Self, SliceError> {
        let pattern = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Returns `true` if `path` is selected.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(path))
    }

    /// The selected endpoints of `document`, in document order.
    #[must_use]
    pub fn filter(&self, document: &Document) -> Vec<Endpoint> {
        list_endpoints(document)
            .into_iter()
            .filter(|endpoint| self.matches(&endpoint.path))
            .collect()
    }
}
