//! Transitive `$ref` resolution for a single operation.
//!
//! The resolver walks every `$ref` reachable from one `(path, method)` operation,
//! breadth-first, across the eight component categories. A visited set keyed by
//! `(category, name)` guarantees termination on cyclic schema graphs.

use std::collections::{HashSet, VecDeque};

use serde_json::Value;
use tracing::{debug, trace};

use crate::component::{ComponentCategory, ComponentRef, ResolvedComponents};
use crate::document::{components_section, lookup_operation};
use crate::{Document, SliceError};

const REF_KEY: &str = "$ref";

/// Resolves the component dependency closure of operations of a document.
///
/// The resolver only borrows the document; every resolved definition is a deep copy.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use slicespec_core::{ComponentCategory, ReferenceResolver};
///
/// # fn main() -> Result<(), slicespec_core::SliceError> {
/// let doc = json!({
///     "openapi": "3.0.3",
///     "paths": {
///         "/nodes": { "get": { "responses": { "200": {
///             "description": "OK",
///             "content": { "application/json": {
///                 "schema": { "$ref": "#/components/schemas/Node" }
///             } }
///         } } } }
///     },
///     "components": { "schemas": {
///         "Node": { "properties": { "next": { "$ref": "#/components/schemas/Node" } } }
///     } }
/// });
///
/// let resolved = ReferenceResolver::new(&doc).resolve_all_refs("/nodes", "GET")?;
/// assert!(resolved.contains(ComponentCategory::Schemas, "Node"));
/// assert_eq!(resolved.total_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'doc> {
    document: &'doc Document,
}

impl<'doc> ReferenceResolver<'doc> {
    /// Creates a resolver over a parsed document.
    #[must_use]
    pub fn new(document: &'doc Document) -> Self {
        Self { document }
    }

    /// Resolves every component reachable from the `(path, method)` operation.
    ///
    /// The traversal is seeded with the path-level `parameters` and the whole
    /// operation object, then follows nested `$ref` breadth-first. Security schemes
    /// are resolved by name from the operation `security` requirements (or the
    /// document-level ones when the operation has no `security` key).
    ///
    /// External and malformed references are skipped, as are references to
    /// components missing from the document.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::PathNotFound`] or [`SliceError::MethodNotFound`] when the
    /// operation does not exist; [`SliceError::InvalidPathItem`] if the path item is not
    /// an object.
    pub fn resolve_all_refs(
        &self,
        path: &str,
        method: &str,
    ) -> Result<ResolvedComponents, SliceError> {
        let (path_item, operation, method) = lookup_operation(self.document, path, method)?;

        let mut traversal = Traversal::default();
        if let Some(parameters) = path_item.get("parameters") {
            traversal.scan(parameters);
        }
        traversal.scan(operation);

        self.resolve_security(operation, &mut traversal);

        while let Some(ref_location) = traversal.queue.pop_front() {
            let Some(reference) = ComponentRef::parse(&ref_location) else {
                trace!(%ref_location, "skipping non-component reference");
                continue;
            };
            if !traversal.visited.insert(reference.clone()) {
                continue;
            }

            let Some(definition) = self.component(&reference) else {
                trace!(%reference, "referenced component is missing");
                continue;
            };
            trace!(%reference, "resolved component");
            traversal.scan(definition);
            traversal.resolved.insert(&reference, definition.clone());
        }

        let resolved = traversal.resolved;
        debug!(
            %path,
            %method,
            components = resolved.total_count(),
            "references resolved"
        );
        Ok(resolved)
    }

    /// Looks up a component definition in the source document.
    #[must_use]
    pub fn component(&self, reference: &ComponentRef) -> Option<&'doc Value> {
        components_section(self.document, reference.category.section())?.get(&reference.name)
    }

    /// Resolves the security schemes named by an operation's requirements.
    ///
    /// An explicit `security: []` disables security and never falls back to the
    /// document-level requirements.
    #[must_use]
    pub fn resolve_security_schemes(&self, operation: &Value) -> ResolvedComponents {
        let mut traversal = Traversal::default();
        self.resolve_security(operation, &mut traversal);
        traversal.resolved
    }

    fn resolve_security(&self, operation: &Value, traversal: &mut Traversal) {
        let requirements = operation
            .get("security")
            .or_else(|| self.document.get("security"))
            .and_then(Value::as_array);
        let Some(requirements) = requirements else {
            return;
        };

        let scheme_names = requirements
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|requirement| requirement.keys());
        for name in scheme_names {
            let reference = ComponentRef::new(ComponentCategory::SecuritySchemes, name.as_str());
            if !traversal.visited.insert(reference.clone()) {
                continue;
            }
            if let Some(definition) = self.component(&reference) {
                trace!(%reference, "resolved security scheme");
                traversal.resolved.insert(&reference, definition.clone());
            }
        }
    }
}

/// Resolves every component reachable from the `(path, method)` operation.
///
/// Shorthand for [`ReferenceResolver::resolve_all_refs`].
///
/// # Errors
///
/// See [`ReferenceResolver::resolve_all_refs`].
pub fn resolve_all_refs(
    document: &Document,
    path: &str,
    method: &str,
) -> Result<ResolvedComponents, SliceError> {
    ReferenceResolver::new(document).resolve_all_refs(path, method)
}

/// Accumulator of one resolution call.
#[derive(Debug, Default)]
struct Traversal {
    resolved: ResolvedComponents,
    visited: HashSet<ComponentRef>,
    queue: VecDeque<String>,
}

impl Traversal {
    /// Enqueues every `$ref` found in `value`, recursively.
    ///
    /// Entries of a `headers` mapping are scanned as header objects, so a header
    /// `$ref` and the references nested in an inline header are both enqueued.
    fn scan(&mut self, value: &Value) {
        match value {
            Value::Object(object) => {
                if let Some(Value::String(ref_location)) = object.get(REF_KEY) {
                    self.queue.push_back(ref_location.clone());
                }
                for (key, child) in object {
                    match (key.as_str(), child) {
                        ("headers", Value::Object(headers)) => {
                            for header in headers.values() {
                                self.scan(header);
                            }
                        }
                        _ => self.scan(child),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.scan(item);
                }
            }
            _ => {}
        }
    }
}
