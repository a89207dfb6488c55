/// Errors raised by the slicing engine.
///
/// Only contract violations and collaborator failures are reported as errors.
/// Data-quality findings are returned as values instead, see
/// [`ValidationResult`](crate::ValidationResult) and
/// [`ConversionResult`](crate::ConversionResult).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SliceError {
    /// The requested path is not a key of the document `paths`.
    #[display("Path not found: {path}")]
    #[from(skip)]
    PathNotFound {
        /// The missing path.
        path: String,
    },

    /// The requested method is not defined on the path item.
    #[display("Method not found: {method} for {path}")]
    #[from(skip)]
    MethodNotFound {
        /// The path that was found.
        path: String,
        /// The lower-cased missing method.
        method: String,
    },

    /// The path item (or its operation) is not a mapping.
    #[display("Path item '{path}' is not an object")]
    #[from(skip)]
    InvalidPathItem {
        /// The offending path.
        path: String,
    },

    /// JSON parsing or serialization error.
    Json(serde_json::Error),

    /// YAML parsing or serialization error, the `serde-saphyr` error is the source.
    #[display("YAML error: {_0}")]
    #[from(skip)]
    Yaml(Box<dyn std::error::Error + Send + Sync>),

    /// YAML text was given to a build without the `yaml` feature.
    #[display("YAML support requires the `yaml` feature")]
    #[from(skip)]
    YamlUnavailable,

    /// Invalid endpoint filter pattern.
    InvalidPattern(regex::Error),
}

impl SliceError {
    #[cfg(feature = "yaml")]
    pub(crate) fn yaml(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Yaml(Box::new(error))
    }

    /// Returns `true` for the not-found kind (missing path or method).
    ///
    /// These are caller errors: retrying with the same arguments cannot succeed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. } | Self::MethodNotFound { .. })
    }
}
