//! # Slicespec Core
//!
//! Slice an OpenAPI 3.0.x / 3.1.x document into standalone single-endpoint documents.
//!
//! Given one `(path, method)` operation, the crate:
//! - resolves the exact transitive closure of `#/components/...` references it needs
//!   ([`ReferenceResolver`]),
//! - assembles a minimal, self-contained document ([`EndpointSlicer`]),
//! - checks the result in seven ordered phases ([`Validator`]),
//! - converts it between the 3.0.x and 3.1.x construct families ([`convert`]).
//!
//! Documents are plain [`serde_json::Value`] trees (see [`Document`]); source key order
//! is preserved, so every output is deterministic.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use slicespec_core::{ValidationPhase, extract, validate};
//!
//! # fn main() -> Result<(), slicespec_core::SliceError> {
//! let source = json!({
//!     "openapi": "3.0.3",
//!     "info": { "title": "Users", "version": "1.0.0" },
//!     "paths": {
//!         "/users/{id}": {
//!             "get": {
//!                 "responses": { "200": {
//!                     "description": "A user",
//!                     "content": { "application/json": {
//!                         "schema": { "$ref": "#/components/schemas/User" }
//!                     } }
//!                 } }
//!             }
//!         }
//!     },
//!     "components": { "schemas": {
//!         "User": { "type": "object", "properties": {
//!             "address": { "$ref": "#/components/schemas/Address" }
//!         } },
//!         "Address": { "type": "object" },
//!         "Unused": { "type": "string" }
//!     } }
//! });
//!
//! let slice = extract(&source, "3.0.3", "/users/{id}", "GET")?;
//! let schemas = slice["components"]["schemas"].as_object().expect("schemas");
//! assert!(schemas.contains_key("User"));
//! assert!(schemas.contains_key("Address"));
//! assert!(!schemas.contains_key("Unused"));
//!
//! let result = validate(&slice, "3.0.3", Some(&source));
//! assert!(result.passed);
//! assert_eq!(result.phase, ValidationPhase::VersionValidation);
//! # Ok(())
//! # }
//! ```
//!
//! ## Selecting endpoints
//!
//! ```rust
//! use serde_json::json;
//! use slicespec_core::EndpointFilter;
//!
//! # fn main() -> Result<(), slicespec_core::SliceError> {
//! let doc = json!({ "paths": {
//!     "/users": { "get": {} },
//!     "/users/{id}": { "get": {}, "delete": {} },
//!     "/health": { "get": {} }
//! } });
//!
//! let selected = EndpointFilter::glob("/users*")?.filter(&doc);
//! let names: Vec<_> = selected.iter().map(ToString::to_string).collect();
//! assert_eq!(names, ["GET /users", "GET /users/{id}", "DELETE /users/{id}"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! [`SliceError`] is only returned for contract violations (unknown path or method,
//! malformed path item) and text I/O failures. Validation failures and conversion
//! problems are reported as values, see [`ValidationResult`] and [`ConversionResult`].
//!
//! ## Logging
//!
//! Progress is reported through [`tracing`] events; install any subscriber to see them.
//!
//! ## Features
//!
//! - `yaml` (default): YAML parsing and rendering with `serde-saphyr`, and [`ToYaml`].

mod component;
mod convert;
mod document;
mod error;
mod filter;
mod resolver;
mod slicer;
mod validation;
mod version;

#[cfg(feature = "yaml")]
mod yaml;

pub use self::component::{
    ComponentCategory, ComponentRef, ResolvedComponents, UnknownCategoryError,
};
pub use self::convert::{
    ConversionRequest, ConversionResult, RuleSet, TransformationKind, TransformationRule,
    UnknownTransformationError, VersionConverter, convert,
};
pub use self::document::{
    Document, DocumentFormat, HTTP_METHODS, is_http_method, parse_document, parse_document_auto,
    render_document,
};
pub use self::error::SliceError;
pub use self::filter::{Endpoint, EndpointFilter, list_endpoints};
pub use self::resolver::{ReferenceResolver, resolve_all_refs};
pub use self::slicer::{EndpointSlicer, extract};
pub use self::validation::{ValidationPhase, ValidationResult, Validator, validate};
pub use self::version::{OasVersion, OpenApiVersion, VersionParseError};
#[cfg(feature = "yaml")]
pub use self::yaml::{ToYaml, YamlError};
