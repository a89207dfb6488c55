use serde_json::{Map, Value};
use tracing::debug;

use super::refs::{RefSite, collect_refs, first_dangling};
use super::{ValidationPhase, ValidationResult};
use crate::document::{components_section, is_http_method};
use crate::version::OpenApiVersion;
use crate::{ComponentCategory, ComponentRef, Document};

/// Runs the seven validation phases against an extracted document.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use slicespec_core::{ValidationPhase, Validator};
///
/// let doc = json!({ "info": { "title": "T", "version": "1" }, "paths": {} });
///
/// let result = Validator::new(&doc, "3.0.3").validate();
/// assert!(!result.passed);
/// assert_eq!(result.phase, ValidationPhase::FileStructure);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'doc> {
    document: &'doc Document,
    version: &'doc str,
    original: Option<&'doc Document>,
}

impl<'doc> Validator<'doc> {
    /// Creates a validator for an extracted document.
    #[must_use]
    pub fn new(document: &'doc Document, version: &'doc str) -> Self {
        Self {
            document,
            version,
            original: None,
        }
    }

    /// Enables payload equivalence against the source document.
    #[must_use]
    pub fn with_original(mut self, original: &'doc Document) -> Self {
        self.original = Some(original);
        self
    }

    /// Runs phases 1 to 7 in order, returning the first failure or the phase 7 success.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut last = ValidationResult::pass(ValidationPhase::FileStructure);
        for phase in ValidationPhase::ALL {
            last = self.run_phase(phase);
            if !last.passed {
                debug!(
                    version = self.version,
                    phase = phase.number(),
                    message = last.error_message.as_deref().unwrap_or_default(),
                    "validation failed"
                );
                return last;
            }
        }
        debug!(version = self.version, "validation passed");
        last
    }

    /// Runs every phase without stopping at the first failure.
    ///
    /// Later phases may report consequences of an earlier failure; use
    /// [`Self::validate`] to get the root cause.
    #[must_use]
    pub fn run_all(&self) -> Vec<ValidationResult> {
        ValidationPhase::ALL
            .into_iter()
            .map(|phase| self.run_phase(phase))
            .collect()
    }

    /// Runs a single phase.
    #[must_use]
    pub fn run_phase(&self, phase: ValidationPhase) -> ValidationResult {
        match phase {
            ValidationPhase::FileStructure => self.file_structure(),
            ValidationPhase::OperationIntegrity => self.operation_integrity(),
            ValidationPhase::ResponseIntegrity => self.response_integrity(),
            ValidationPhase::ReferenceResolution => self.reference_resolution(),
            ValidationPhase::ComponentCompleteness => self.component_completeness(),
            ValidationPhase::PayloadEquivalence => self.payload_equivalence(),
            ValidationPhase::VersionValidation => self.version_validation(),
        }
    }

    fn paths(&self) -> Option<&'doc Map<String, Value>> {
        self.document.get("paths").and_then(Value::as_object)
    }

    fn operations(&self) -> impl Iterator<Item = (&'doc str, &'doc str, &'doc Value)> {
        self.paths().into_iter().flatten().flat_map(|(path, item)| {
            item.as_object()
                .into_iter()
                .flatten()
                .filter(|(method, _)| is_http_method(method))
                .map(move |(method, operation)| (path.as_str(), method.as_str(), operation))
        })
    }

    fn file_structure(&self) -> ValidationResult {
        let phase = ValidationPhase::FileStructure;
        let Some(document) = self.document.as_object() else {
            return ValidationResult::fail(phase, "Document is not an object");
        };
        if !document.contains_key("openapi") {
            return ValidationResult::fail(phase, "Missing 'openapi' field");
        }
        if !document.contains_key("info") {
            return ValidationResult::fail(phase, "Missing 'info' field");
        }
        if !document.get("paths").is_some_and(Value::is_object) {
            return ValidationResult::fail(phase, "Missing or invalid 'paths' field");
        }
        ValidationResult::pass(phase)
    }

    fn operation_integrity(&self) -> ValidationResult {
        let phase = ValidationPhase::OperationIntegrity;
        let Some(paths) = self.paths().filter(|paths| !paths.is_empty()) else {
            return ValidationResult::fail(phase, "No paths defined in document");
        };

        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                return ValidationResult::fail(
                    phase,
                    format!("Path '{path}' is not a valid path item object"),
                )
                .with_detail("path", path.as_str());
            };

            let mut found_method = false;
            for (method, operation) in item.iter().filter(|(key, _)| is_http_method(key)) {
                found_method = true;
                let has_responses = operation
                    .get("responses")
                    .and_then(Value::as_object)
                    .is_some_and(|responses| !responses.is_empty());
                if !has_responses {
                    return ValidationResult::fail(
                        phase,
                        format!("Operation '{method} {path}' missing 'responses' field"),
                    )
                    .with_detail("path", path.as_str())
                    .with_detail("method", method.as_str());
                }
            }

            if !found_method {
                return ValidationResult::fail(
                    phase,
                    format!("Path '{path}' has no valid HTTP methods"),
                )
                .with_detail("path", path.as_str());
            }
        }
        ValidationResult::pass(phase)
    }

    fn response_integrity(&self) -> ValidationResult {
        let phase = ValidationPhase::ResponseIntegrity;
        let responses_section = components_section(self.document, "responses");

        for (path, method, operation) in self.operations() {
            let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
                continue;
            };
            for (code, response) in responses {
                let Some(response) = response.as_object() else {
                    return ValidationResult::fail(
                        phase,
                        format!("Response {code} is not an object"),
                    )
                    .with_detail("operation", format!("{method} {path}"));
                };

                // a `$ref` response is checked through its target, phase 4 reports a dangling one
                let target = match response.get("$ref").and_then(Value::as_str) {
                    Some(reference) => ComponentRef::parse(reference)
                        .filter(|reference| reference.category == ComponentCategory::Responses)
                        .and_then(|reference| responses_section?.get(&reference.name))
                        .and_then(Value::as_object),
                    None => Some(response),
                };
                if let Some(target) = target
                    && !target.contains_key("description")
                {
                    return ValidationResult::fail(
                        phase,
                        format!("Response {code} missing 'description' field"),
                    )
                    .with_detail("operation", format!("{method} {path}"))
                    .with_detail("code", code.as_str());
                }
            }
        }
        ValidationResult::pass(phase)
    }

    fn reference_resolution(&self) -> ValidationResult {
        let phase = ValidationPhase::ReferenceResolution;
        let mut sites = vec![];
        if let Some(paths) = self.document.get("paths") {
            collect_refs(paths, "/paths", &mut sites);
        }
        if let Some(components) = self.document.get("components") {
            collect_refs(components, "/components", &mut sites);
        }

        match first_dangling(self.document, &sites) {
            Some(site) => dangling_failure(phase, site),
            None => ValidationResult::pass(phase),
        }
    }

    /// Completeness is implied by reference resolution: phase 4 already proves every
    /// component reference of the slice has a target.
    fn component_completeness(&self) -> ValidationResult {
        ValidationResult::pass(ValidationPhase::ComponentCompleteness)
    }

    fn payload_equivalence(&self) -> ValidationResult {
        let phase = ValidationPhase::PayloadEquivalence;
        let Some(original) = self.original else {
            return ValidationResult::pass(phase).with_detail("skipped", true);
        };

        let mut sites = vec![];
        collect_refs(self.document, "", &mut sites);
        if let Some(site) = first_dangling(self.document, &sites) {
            return dangling_failure(phase, site);
        }

        let original_paths = original.get("paths").and_then(Value::as_object);
        for (path, item) in self.paths().into_iter().flatten() {
            let Some(original_item) = original_paths.and_then(|paths| paths.get(path)) else {
                return ValidationResult::fail(
                    phase,
                    format!("Path '{path}' not found in original document"),
                )
                .with_detail("path", path.as_str());
            };
            let methods = item
                .as_object()
                .into_iter()
                .flatten()
                .map(|(method, _)| method)
                .filter(|method| is_http_method(method));
            for method in methods {
                if original_item.get(method).is_none() {
                    return ValidationResult::fail(
                        phase,
                        format!("Operation '{method} {path}' not found in original document"),
                    )
                    .with_detail("path", path.as_str())
                    .with_detail("method", method.as_str());
                }
            }
        }
        ValidationResult::pass(phase)
    }

    fn version_validation(&self) -> ValidationResult {
        let phase = ValidationPhase::VersionValidation;
        let Some(openapi) = self.document.get("openapi").and_then(Value::as_str) else {
            return ValidationResult::fail(phase, "Invalid 'openapi' field format");
        };
        let Ok(version) = openapi.parse::<OpenApiVersion>() else {
            return ValidationResult::fail(phase, format!("Invalid OAS version format: {openapi}"))
                .with_detail("openapi", openapi);
        };
        if version.family().is_none() {
            return ValidationResult::fail(
                phase,
                format!("Unsupported OAS version: {openapi} (must be 3.0.x or 3.1.x)"),
            )
            .with_detail("openapi", openapi);
        }
        ValidationResult::pass(phase)
    }
}

fn dangling_failure(phase: ValidationPhase, site: RefSite) -> ValidationResult {
    let section = ComponentRef::parse(&site.reference)
        .map(|reference| reference.category.section())
        .unwrap_or_default();
    ValidationResult::fail(
        phase,
        format!(
            "Reference '{}' not found in components.{section}",
            site.reference
        ),
    )
    .with_detail("ref", site.reference)
    .with_detail("location", site.pointer)
}

/// Validates an extracted document, optionally against its source.
///
/// Without `original`, payload equivalence (phase 6) is skipped and reported as passed.
#[must_use]
pub fn validate(
    document: &Document,
    version: &str,
    original: Option<&Document>,
) -> ValidationResult {
    let validator = Validator::new(document, version);
    match original {
        Some(original) => validator.with_original(original).validate(),
        None => validator.validate(),
    }
}
