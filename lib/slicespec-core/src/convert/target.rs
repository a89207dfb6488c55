use serde_json::Value;

use super::schema::for_each_schema;
use crate::{Document, OasVersion};

/// Checks a converted document against the rules of its target family.
///
/// Returns the violations found, empty when the document conforms.
pub(super) fn validate_target(document: &Document, target: OasVersion) -> Vec<String> {
    let mut errors = vec![];

    match document.get("openapi") {
        Some(Value::String(openapi)) if target.accepts(openapi) => {}
        Some(Value::String(openapi)) => errors.push(format!(
            "Version '{openapi}' does not match target {target}"
        )),
        _ => errors.push("Missing required field: openapi".to_string()),
    }
    if !document.get("info").is_some_and(Value::is_object) {
        errors.push("Missing required field: info".to_string());
    }
    if !document.get("paths").is_some_and(Value::is_object) {
        errors.push("Missing required field: paths".to_string());
    }

    match target {
        OasVersion::V3_1 => for_each_schema(document, |pointer, schema| {
            if schema.contains_key("nullable") {
                errors.push(format!("'nullable' is not supported in 3.1.x (at {pointer})"));
            }
        }),
        OasVersion::V3_0 => {
            for_each_schema(document, |pointer, schema| {
                if schema.get("type").is_some_and(Value::is_array) {
                    errors.push(format!(
                        "Type arrays are not supported in 3.0.x (at {pointer})"
                    ));
                }
            });
            if document.get("webhooks").is_some() {
                errors.push("'webhooks' is not supported in 3.0.x".to_string());
            }
            let mutual_tls = document
                .pointer("/components/securitySchemes")
                .and_then(Value::as_object)
                .into_iter()
                .flatten()
                .filter(|(_, scheme)| {
                    scheme.get("type").and_then(Value::as_str) == Some("mutualTLS")
                });
            for (name, _) in mutual_tls {
                errors.push(format!(
                    "Security scheme '{name}' uses mutualTLS, not supported in 3.0.x"
                ));
            }
        }
    }

    errors
}
