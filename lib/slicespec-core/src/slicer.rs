//! Single-endpoint slicing.
//!
//! A slice is a standalone document holding one `(path, method)` operation plus the
//! exact transitive closure of the components it references.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::document::lookup_operation;
use crate::{Document, ReferenceResolver, SliceError};

/// Builds standalone single-endpoint documents from a source document.
///
/// The source document is only borrowed: slices never alias it, so several
/// slicers (one per thread if needed) can share the same source.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use slicespec_core::EndpointSlicer;
///
/// # fn main() -> Result<(), slicespec_core::SliceError> {
/// let doc = json!({
///     "openapi": "3.0.3",
///     "info": { "title": "Users", "version": "2.0.0" },
///     "paths": { "/users/{id}": {
///         "get": { "responses": { "200": {
///             "description": "OK",
///             "content": { "application/json": {
///                 "schema": { "$ref": "#/components/schemas/User" }
///             } }
///         } } },
///         "delete": { "responses": { "204": { "description": "Deleted" } } }
///     } },
///     "components": { "schemas": { "User": { "type": "object" } } }
/// });
///
/// let slice = EndpointSlicer::new(&doc, "3.0.3").extract("/users/{id}", "GET")?;
/// assert!(slice["paths"]["/users/{id}"].get("delete").is_none());
/// assert_eq!(slice["components"]["schemas"]["User"], json!({ "type": "object" }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EndpointSlicer<'doc> {
    document: &'doc Document,
    version: String,
}

impl<'doc> EndpointSlicer<'doc> {
    /// Creates a slicer.
    ///
    /// `version` is used as the `openapi` value when the source has none.
    #[must_use]
    pub fn new(document: &'doc Document, version: impl Into<String>) -> Self {
        Self {
            document,
            version: version.into(),
        }
    }

    /// Extracts one operation with all its dependencies.
    ///
    /// The output holds, in order: `openapi`, `info` (a synthetic
    /// `{title: "Extracted", version: "1.0.0"}` when the source has none), the
    /// source `servers` if any, the inherited top-level `security` when the operation
    /// does not declare its own, `paths` with the single operation (and the shared
    /// path-level `parameters`), and `components` when at least one was resolved.
    ///
    /// # Errors
    ///
    /// Returns a not-found [`SliceError`] when the path or method is unknown.
    pub fn extract(&self, path: &str, method: &str) -> Result<Document, SliceError> {
        let (path_item, operation, method) = lookup_operation(self.document, path, method)?;
        if !operation.is_object() {
            return Err(SliceError::InvalidPathItem {
                path: path.to_string(),
            });
        }

        let openapi = self
            .document
            .get("openapi")
            .cloned()
            .unwrap_or_else(|| Value::String(self.version.clone()));
        let info = self
            .document
            .get("info")
            .cloned()
            .unwrap_or_else(|| json!({ "title": "Extracted", "version": "1.0.0" }));

        let mut sliced_item = Map::new();
        if let Some(parameters) = path_item.get("parameters") {
            sliced_item.insert("parameters".to_string(), parameters.clone());
        }
        sliced_item.insert(method.clone(), operation.clone());

        let mut paths = Map::new();
        paths.insert(path.to_string(), Value::Object(sliced_item));

        let mut result = Map::new();
        result.insert("openapi".to_string(), openapi);
        result.insert("info".to_string(), info);
        if let Some(servers) = self.document.get("servers") {
            result.insert("servers".to_string(), servers.clone());
        }
        if operation.get("security").is_none()
            && let Some(security) = self.document.get("security")
        {
            result.insert("security".to_string(), security.clone());
        }
        result.insert("paths".to_string(), Value::Object(paths));

        let resolved = ReferenceResolver::new(self.document).resolve_all_refs(path, &method)?;
        let component_count = resolved.total_count();
        let components = resolved.into_components();
        if !components.is_empty() {
            result.insert("components".to_string(), Value::Object(components));
        }

        debug!(%path, %method, components = component_count, "endpoint extracted");
        Ok(Value::Object(result))
    }
}

/// Extracts one operation with all its dependencies into a standalone document.
///
/// Shorthand for [`EndpointSlicer::extract`].
///
/// # Errors
///
/// Returns a not-found [`SliceError`] when the path or method is unknown.
pub fn extract(
    document: &Document,
    version: &str,
    path: &str,
    method: &str,
) -> Result<Document, SliceError> {
    EndpointSlicer::new(document, version).extract(path, method)
}
