//! The built-in transformations applied during version conversion.

use serde_json::{Map, Value, json};
use tracing::trace;

use super::rules::TransformationKind;
use super::schema::for_each_schema_mut;
use crate::Document;

/// Warnings and errors accumulated while converting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct Diagnostics {
    pub(super) warnings: Vec<String>,
    pub(super) errors: Vec<String>,
}

impl Diagnostics {
    pub(super) fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Applies one transformation to `document` in place.
pub(super) fn apply(
    kind: TransformationKind,
    document: &mut Document,
    strict_mode: bool,
    diagnostics: &mut Diagnostics,
) {
    trace!(%kind, "applying transformation");
    match kind {
        TransformationKind::NullableToTypeArray => {
            for_each_schema_mut(document, |_, schema| nullable_to_type_array(schema));
        }
        TransformationKind::DiscriminatorMapping => {
            for_each_schema_mut(document, |_, schema| discriminator_mapping(schema));
        }
        TransformationKind::TypeArrayToNullable => {
            for_each_schema_mut(document, |pointer, schema| {
                type_array_to_nullable(pointer, schema, diagnostics);
            });
        }
        TransformationKind::DiscriminatorPropertyName => {
            for_each_schema_mut(document, |_, schema| discriminator_property_name(schema));
        }
        TransformationKind::RemoveWebhooks => remove_webhooks(document, diagnostics),
        TransformationKind::RemoveMutualTls => remove_mutual_tls(document, diagnostics),
        TransformationKind::LicenseIdentifier => license_identifier(document, diagnostics),
        TransformationKind::ConditionalSchemas => {
            conditional_schemas(document, strict_mode, diagnostics);
        }
    }
}

fn nullable_to_type_array(schema: &mut Map<String, Value>) {
    match schema.get("nullable") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => {
            schema.shift_remove("nullable");
            return;
        }
        _ => return,
    }

    let types = match schema.get("type") {
        Some(Value::String(kind)) => vec![json!(kind), json!("null")],
        Some(Value::Array(kinds)) => {
            let mut kinds = kinds.clone();
            if !kinds.iter().any(|kind| kind == "null") {
                kinds.push(json!("null"));
            }
            kinds
        }
        _ => vec![json!("object"), json!("null")],
    };
    schema.insert("type".to_string(), Value::Array(types));
    schema.shift_remove("nullable");
}

fn discriminator_mapping(schema: &mut Map<String, Value>) {
    let targets: Vec<String> = schema
        .get("oneOf")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|member| member.get("$ref").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    if targets.is_empty() {
        return;
    }
    let Some(discriminator) = schema
        .get_mut("discriminator")
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    if !discriminator.contains_key("propertyName") {
        return;
    }

    let mut mapping = discriminator
        .get("mapping")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    for target in targets {
        let name = target.rsplit('/').next().unwrap_or(&target).to_string();
        mapping.entry(name).or_insert(Value::String(target));
    }
    if !mapping.is_empty() {
        discriminator.insert("mapping".to_string(), Value::Object(mapping));
    }
}

fn type_array_to_nullable(
    pointer: &str,
    schema: &mut Map<String, Value>,
    diagnostics: &mut Diagnostics,
) {
    let Some(Value::Array(types)) = schema.get("type") else {
        return;
    };
    if !types.iter().any(|kind| kind == "null") {
        return;
    }
    let mut remaining = types.iter().filter(|kind| *kind != "null").cloned();

    match remaining.next() {
        None => {
            schema.shift_remove("type");
        }
        Some(first) => {
            let dropped: Vec<String> = remaining.map(|kind| kind.to_string()).collect();
            if !dropped.is_empty() {
                diagnostics.warn(format!(
                    "Type union at '{pointer}' narrowed to {first}, dropped {}",
                    dropped.join(", ")
                ));
            }
            schema.insert("type".to_string(), first);
        }
    }
    schema.insert("nullable".to_string(), Value::Bool(true));
}

fn discriminator_property_name(schema: &mut Map<String, Value>) {
    let Some(discriminator) = schema
        .get_mut("discriminator")
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    if discriminator.shift_remove("mapping").is_some()
        && !discriminator.contains_key("propertyName")
    {
        discriminator.insert("propertyName".to_string(), json!("type"));
    }
}

fn remove_webhooks(document: &mut Document, diagnostics: &mut Diagnostics) {
    if let Some(root) = document.as_object_mut()
        && root.shift_remove("webhooks").is_some()
    {
        diagnostics.warn("Webhooks removed (not supported in 3.0.x)");
    }
}

fn remove_mutual_tls(document: &mut Document, diagnostics: &mut Diagnostics) {
    let Some(schemes) = document
        .pointer_mut("/components/securitySchemes")
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    let removed: Vec<String> = schemes
        .iter()
        .filter(|(_, scheme)| scheme.get("type").and_then(Value::as_str) == Some("mutualTLS"))
        .map(|(name, _)| name.clone())
        .collect();
    if removed.is_empty() {
        return;
    }
    for name in &removed {
        schemes.shift_remove(name);
    }

    strip_requirements(document.get_mut("security"), &removed);
    if let Some(paths) = document.get_mut("paths").and_then(Value::as_object_mut) {
        for path_item in paths.values_mut().filter_map(Value::as_object_mut) {
            for operation in path_item.values_mut() {
                strip_requirements(operation.get_mut("security"), &removed);
            }
        }
    }

    diagnostics.warn(format!(
        "mutualTLS security schemes removed (not supported in 3.0.x): {}",
        removed.join(", ")
    ));
}

/// Drops removed schemes from security requirements, and requirements left empty.
fn strip_requirements(security: Option<&mut Value>, removed: &[String]) {
    let Some(requirements) = security.and_then(Value::as_array_mut) else {
        return;
    };
    requirements.retain_mut(|requirement| {
        let Some(requirement) = requirement.as_object_mut() else {
            return true;
        };
        if requirement.is_empty() {
            return true;
        }
        requirement.retain(|name, _| !removed.contains(name));
        !requirement.is_empty()
    });
}

fn license_identifier(document: &mut Document, diagnostics: &mut Diagnostics) {
    let Some(license) = document
        .pointer_mut("/info/license")
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    let Some(identifier) = license.shift_remove("identifier") else {
        return;
    };
    if license.contains_key("name") {
        diagnostics.warn("license.identifier removed (not supported in 3.0.x)");
    } else {
        license.insert("name".to_string(), identifier);
        diagnostics.warn("license.identifier moved to license.name (not supported in 3.0.x)");
    }
}

fn conditional_schemas(document: &Document, strict_mode: bool, diagnostics: &mut Diagnostics) {
    let Some(schemas) = document.pointer("/components/schemas") else {
        return;
    };
    if !named_schemas_have_conditionals(schemas) {
        return;
    }
    if strict_mode {
        diagnostics.error("JSON Schema conditionals (if/then/else) not supported in 3.0.x");
    } else {
        diagnostics.warn("JSON Schema conditionals found; may not convert properly to 3.0.x");
    }
}

/// Keys of `named` are names, not keywords.
fn named_schemas_have_conditionals(named: &Value) -> bool {
    named
        .as_object()
        .is_some_and(|named| named.values().any(has_conditionals))
}

fn has_conditionals(schema: &Value) -> bool {
    match schema {
        Value::Object(object) => object.iter().any(|(keyword, value)| match keyword.as_str() {
            "if" | "then" | "else" => true,
            "properties" | "patternProperties" | "dependentSchemas" | "$defs" | "definitions" => {
                named_schemas_have_conditionals(value)
            }
            // instance data
            "example" | "examples" | "default" | "enum" | "const" => false,
            _ => has_conditionals(value),
        }),
        Value::Array(items) => items.iter().any(has_conditionals),
        _ => false,
    }
}
