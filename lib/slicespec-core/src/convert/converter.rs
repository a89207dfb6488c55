use serde_json::Value;
use tracing::{debug, warn};

use super::request::{ConversionRequest, ConversionResult};
use super::rules::{RuleSet, TransformationRule};
use super::target::validate_target;
use super::transforms::{Diagnostics, apply};
use crate::Document;

/// Runs one conversion request.
#[derive(Debug, Clone, Copy)]
pub struct VersionConverter<'req> {
    request: &'req ConversionRequest,
}

impl<'req> VersionConverter<'req> {
    /// Creates a converter for `request`.
    #[must_use]
    pub fn new(request: &'req ConversionRequest) -> Self {
        Self { request }
    }

    /// Converts the request document, leaving the request untouched.
    #[must_use]
    pub fn convert(&self) -> ConversionResult {
        let request = self.request;
        let source = request.source_version;
        let target = request.target_version;
        debug!(%source, %target, strict = request.strict_mode, "converting document");

        let declared = request.document.get("openapi").and_then(Value::as_str);
        if !declared.is_some_and(|openapi| source.accepts(openapi)) {
            let found = declared.unwrap_or_default();
            let message =
                format!("Source document version mismatch: expected {source}, found '{found}'");
            debug!(%message, "conversion rejected");
            return ConversionResult::failure(request, vec![], vec![message]);
        }
        if source == target {
            debug!(%source, "unsupported conversion direction");
            return ConversionResult::failure(
                request,
                vec![],
                vec!["Unsupported conversion direction".to_string()],
            );
        }

        let mut document = request.document.clone();
        let mut diagnostics = Diagnostics::default();
        for rule in self.rules() {
            self.apply_rule(&rule, &mut document, &mut diagnostics);
        }

        if request.strict_mode && !diagnostics.errors.is_empty() {
            debug!(errors = diagnostics.errors.len(), "strict conversion failed");
            return ConversionResult::failure(request, diagnostics.warnings, diagnostics.errors);
        }

        if let Some(root) = document.as_object_mut() {
            root.insert(
                "openapi".to_string(),
                Value::String(target.canonical().to_string()),
            );
        }

        diagnostics.errors.extend(validate_target(&document, target));
        if request.strict_mode && !diagnostics.errors.is_empty() {
            debug!(
                errors = diagnostics.errors.len(),
                "strict conversion failed target validation"
            );
            return ConversionResult::failure(request, diagnostics.warnings, diagnostics.errors);
        }

        debug!(
            warnings = diagnostics.warnings.len(),
            errors = diagnostics.errors.len(),
            "conversion done"
        );
        ConversionResult::success(request, document, diagnostics.warnings, diagnostics.errors)
    }

    fn rules(&self) -> Vec<TransformationRule> {
        let source = self.request.source_version;
        let target = self.request.target_version;
        match &self.request.rules {
            Some(rules) => rules.for_direction(source, target),
            None => RuleSet::builtin().for_direction(source, target),
        }
    }

    fn apply_rule(
        &self,
        rule: &TransformationRule,
        document: &mut Document,
        diagnostics: &mut Diagnostics,
    ) {
        let source = self.request.source_version;
        let target = self.request.target_version;

        let Some(kind) = rule.transformation() else {
            warn!(rule = %rule.id, "unknown transformation rule");
            diagnostics.warn(format!("rule '{}' names no known transformation", rule.id));
            return;
        };
        if kind.direction() != (source, target) {
            warn!(rule = %rule.id, %kind, "transformation rule does not apply");
            diagnostics.warn(format!(
                "rule '{}' ({kind}) does not apply to {source} -> {target}",
                rule.id
            ));
            return;
        }

        debug!(rule = %rule.id, %kind, priority = rule.priority, "applying rule");
        apply(kind, document, self.request.strict_mode, diagnostics);
    }
}

/// Converts a document between the 3.0.x and 3.1.x families.
///
/// Failures are reported in the returned [`ConversionResult`], never as a panic or error.
#[must_use]
pub fn convert(request: &ConversionRequest) -> ConversionResult {
    VersionConverter::new(request).convert()
}
