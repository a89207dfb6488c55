use serde::Serialize;

use super::rules::RuleSet;
use crate::{Document, OasVersion};

/// Input of a version conversion.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use slicespec_core::{ConversionRequest, OasVersion};
///
/// let document = json!({
///     "openapi": "3.0.3",
///     "info": { "title": "Pets", "version": "1.0.0" },
///     "paths": {}
/// });
///
/// let request = ConversionRequest::new(OasVersion::V3_0, OasVersion::V3_1, document)
///     .with_strict_mode(true);
///
/// assert!(request.strict_mode);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// The family the document is expected to belong to.
    pub source_version: OasVersion,
    /// The family to convert to.
    pub target_version: OasVersion,
    /// The document to convert, never mutated.
    pub document: Document,
    /// Fail on any error instead of reporting it alongside a converted document.
    pub strict_mode: bool,
    /// Keep `example` / `examples` values untouched (they always are).
    pub preserve_examples: bool,
    /// Custom transformation rules replacing the built-in sequence.
    pub rules: Option<RuleSet>,
}

impl ConversionRequest {
    /// Creates a permissive request using the built-in rules.
    #[must_use]
    pub fn new(source_version: OasVersion, target_version: OasVersion, document: Document) -> Self {
        Self {
            source_version,
            target_version,
            document,
            strict_mode: false,
            preserve_examples: true,
            rules: None,
        }
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Sets whether examples are preserved.
    #[must_use]
    pub fn with_preserve_examples(mut self, preserve_examples: bool) -> Self {
        self.preserve_examples = preserve_examples;
        self
    }

    /// Replaces the built-in rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }
}

/// Outcome of a version conversion.
///
/// `converted_document` is set only when `success` is `true`; warnings and errors
/// are kept in both cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// Whether the conversion succeeded.
    pub success: bool,
    /// The requested source family.
    pub source_version: OasVersion,
    /// The requested target family.
    pub target_version: OasVersion,
    /// The converted document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_document: Option<Document>,
    /// Non-fatal semantic losses, in the order they occurred.
    pub warnings: Vec<String>,
    /// Fatal or strict-mode problems, in the order they occurred.
    pub errors: Vec<String>,
}

impl ConversionResult {
    pub(super) fn failure(
        request: &ConversionRequest,
        warnings: Vec<String>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            source_version: request.source_version,
            target_version: request.target_version,
            converted_document: None,
            warnings,
            errors,
        }
    }

    pub(super) fn success(
        request: &ConversionRequest,
        document: Document,
        warnings: Vec<String>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            source_version: request.source_version,
            target_version: request.target_version,
            converted_document: Some(document),
            warnings,
            errors,
        }
    }
}
