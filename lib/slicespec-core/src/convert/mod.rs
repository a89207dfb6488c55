//! Conversion between the OpenAPI 3.0.x and 3.1.x construct families.
//!
//! A conversion walks every schema of the document and applies an ordered list of
//! [`TransformationRule`]s for the requested direction:
//!
//! | Direction  | Transformation                                                   |
//! |------------|------------------------------------------------------------------|
//! | 3.0 → 3.1  | `nullable: true` becomes a `type` array containing `"null"`      |
//! | 3.0 → 3.1  | `discriminator.mapping` synthesized from `oneOf` references      |
//! | 3.1 → 3.0  | a `type` array with `"null"` becomes `type` + `nullable: true`   |
//! | 3.1 → 3.0  | `discriminator.mapping` dropped                                  |
//! | 3.1 → 3.0  | `webhooks` and `mutualTLS` schemes removed                       |
//! | 3.1 → 3.0  | `info.license.identifier` moved to `info.license.name`           |
//! | 3.1 → 3.0  | `if` / `then` / `else` reported                                  |
//!
//! The caller's document is never mutated, and the same request always yields the
//! same output.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use slicespec_core::{ConversionRequest, OasVersion, convert};
//!
//! let document = json!({
//!     "openapi": "3.1.0",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "paths": {},
//!     "webhooks": { "newPet": {} }
//! });
//!
//! let result = convert(&ConversionRequest::new(OasVersion::V3_1, OasVersion::V3_0, document));
//!
//! assert!(result.success);
//! assert_eq!(result.warnings, ["Webhooks removed (not supported in 3.0.x)"]);
//! ```

mod converter;
mod request;
mod rules;
mod schema;
mod target;
mod transforms;

pub use self::converter::{VersionConverter, convert};
pub use self::request::{ConversionRequest, ConversionResult};
pub use self::rules::{
    RuleSet, TransformationKind, TransformationRule, UnknownTransformationError,
};
