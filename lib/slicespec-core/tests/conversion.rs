#![allow(missing_docs)]

use anyhow::Context;
use rstest::rstest;
use serde_json::{Value, json};

use slicespec_core::{
    ConversionRequest, OasVersion, RuleSet, TransformationKind, TransformationRule, convert,
    extract,
};

mod common;
pub use self::common::*;

fn converted(request: &ConversionRequest) -> anyhow::Result<Value> {
    let result = convert(request);
    anyhow::ensure!(result.success, "conversion failed: {:?}", result.errors);
    result.converted_document.context("converted document")
}

#[rstest]
fn should_round_trip_nullable_schemas(users_api: Value) -> anyhow::Result<()> {
    let upgraded = converted(&ConversionRequest::new(
        OasVersion::V3_0,
        OasVersion::V3_1,
        users_api.clone(),
    ))?;
    assert_eq!(upgraded["openapi"], "3.1.0");
    assert_eq!(
        upgraded["components"]["schemas"]["User"]["properties"]["nickname"],
        json!({ "type": ["string", "null"] })
    );

    let downgraded = converted(&ConversionRequest::new(
        OasVersion::V3_1,
        OasVersion::V3_0,
        upgraded,
    ))?;
    assert_eq!(downgraded["openapi"], "3.0.0");

    let user = &downgraded["components"]["schemas"]["User"];
    let original = &users_api["components"]["schemas"]["User"];
    assert_eq!(user["required"], original["required"]);
    assert_eq!(user["properties"], original["properties"]);
    assert_eq!(
        user["properties"]["nickname"],
        json!({ "type": "string", "nullable": true })
    );
    Ok(())
}

#[rstest]
fn should_convert_deterministically(users_api: Value, modern_api: Value) -> anyhow::Result<()> {
    let requests = [
        ConversionRequest::new(OasVersion::V3_0, OasVersion::V3_1, users_api),
        ConversionRequest::new(OasVersion::V3_1, OasVersion::V3_0, modern_api),
    ];

    for request in &requests {
        let outputs = [convert(request), convert(request), convert(request)]
            .map(|result| serde_json::to_string(&result.converted_document));

        let [first, second, third] = outputs;
        let first = first?;
        assert_ne!(first, "null");
        assert_eq!(first, second?);
        assert_eq!(first, third?);
    }
    Ok(())
}

#[rstest]
fn should_refuse_conversion_within_one_family(users_api: Value) {
    let request = ConversionRequest::new(OasVersion::V3_0, OasVersion::V3_0, users_api);

    let result = convert(&request);

    assert!(!result.success);
    assert!(result.converted_document.is_none());
    assert_eq!(result.errors, ["Unsupported conversion direction"]);
}

#[rstest]
fn should_downgrade_31_only_constructs(modern_api: Value) -> anyhow::Result<()> {
    let result = convert(&ConversionRequest::new(
        OasVersion::V3_1,
        OasVersion::V3_0,
        modern_api,
    ));

    assert!(result.success, "{:?}", result.errors);
    assert!(result.errors.is_empty());
    assert_eq!(
        result.warnings,
        [
            "Webhooks removed (not supported in 3.0.x)",
            "mutualTLS security schemes removed (not supported in 3.0.x): mtls",
            "license.identifier moved to license.name (not supported in 3.0.x)",
            "JSON Schema conditionals found; may not convert properly to 3.0.x",
        ]
    );

    let document = result.converted_document.context("converted document")?;
    assert!(document.get("webhooks").is_none());
    assert_eq!(document["info"]["license"], json!({ "name": "Apache-2.0" }));
    assert_eq!(
        document["components"]["securitySchemes"]
            .as_object()
            .context("schemes")?
            .keys()
            .collect::<Vec<_>>(),
        ["apiKey"]
    );
    assert_eq!(
        document["paths"]["/pets"]["get"]["security"],
        json!([{ "apiKey": [] }])
    );
    assert_eq!(
        document["components"]["schemas"]["Pet"]["discriminator"],
        json!({ "propertyName": "kind" })
    );
    assert_eq!(
        document["components"]["schemas"]["Cat"]["properties"]["name"],
        json!({ "type": "string", "nullable": true })
    );
    Ok(())
}

#[rstest]
fn should_fail_strict_conversion_on_conditionals(modern_api: Value) {
    let request = ConversionRequest::new(OasVersion::V3_1, OasVersion::V3_0, modern_api)
        .with_strict_mode(true);

    let result = convert(&request);

    assert!(!result.success);
    assert!(result.converted_document.is_none());
    assert_eq!(
        result.errors,
        ["JSON Schema conditionals (if/then/else) not supported in 3.0.x"]
    );
    assert_eq!(result.warnings.len(), 3);
    assert_eq!(request.document["openapi"], "3.1.0");
}

#[rstest]
fn should_synthesize_discriminator_mapping_on_upgrade() -> anyhow::Result<()> {
    let document = json!({
        "openapi": "3.0.2",
        "info": { "title": "Pets", "version": "1.0.0" },
        "paths": {},
        "components": { "schemas": {
            "Pet": {
                "oneOf": [
                    { "$ref": "#/components/schemas/Cat" },
                    { "$ref": "#/components/schemas/Dog" }
                ],
                "discriminator": { "propertyName": "kind" }
            },
            "Cat": { "type": "object" },
            "Dog": { "type": "object" }
        } }
    });

    let upgraded = converted(&ConversionRequest::new(
        OasVersion::V3_0,
        OasVersion::V3_1,
        document,
    ))?;

    assert_eq!(
        upgraded["components"]["schemas"]["Pet"]["discriminator"]["mapping"],
        json!({
            "Cat": "#/components/schemas/Cat",
            "Dog": "#/components/schemas/Dog"
        })
    );
    Ok(())
}

#[rstest]
#[case::declared_31(OasVersion::V3_0, "3.1.0")]
#[case::declared_30(OasVersion::V3_1, "3.0.3")]
fn should_reject_mismatched_source(#[case] source: OasVersion, #[case] declared: &str) {
    let document = json!({ "openapi": declared, "info": {}, "paths": {} });

    let result = convert(&ConversionRequest::new(source, OasVersion::V3_1, document));

    assert!(!result.success);
    assert_eq!(
        result.errors,
        [format!(
            "Source document version mismatch: expected {source}, found '{declared}'"
        )]
    );
}

#[rstest]
fn should_apply_custom_rules_only(modern_api: Value) -> anyhow::Result<()> {
    let rules = RuleSet {
        rules_30_to_31: vec![],
        rules_31_to_30: vec![
            TransformationRule::new("drop-hooks", 1, TransformationKind::RemoveWebhooks),
            TransformationRule::new("nulls", 2, TransformationKind::TypeArrayToNullable),
            TransformationRule::new("tls", 3, TransformationKind::RemoveMutualTls),
        ],
    };
    let request =
        ConversionRequest::new(OasVersion::V3_1, OasVersion::V3_0, modern_api).with_rules(rules);

    let result = convert(&request);

    assert!(result.success);
    assert_eq!(result.warnings.len(), 2);
    assert!(result.errors.is_empty());
    let document = result.converted_document.context("converted document")?;
    assert_eq!(
        document["info"]["license"],
        json!({ "identifier": "Apache-2.0" })
    );
    Ok(())
}

#[rstest]
fn should_convert_extracted_slice(users_api: Value) -> anyhow::Result<()> {
    let slice = extract(&users_api, "3.0.3", "/users/{id}", "get")?;

    let upgraded = converted(
        &ConversionRequest::new(OasVersion::V3_0, OasVersion::V3_1, slice.clone())
            .with_strict_mode(true)
            .with_preserve_examples(true),
    )?;

    assert_eq!(upgraded["paths"], slice["paths"]);
    assert_eq!(
        upgraded["components"]["schemas"]["User"]["properties"]["nickname"]["type"],
        json!(["string", "null"])
    );
    Ok(())
}
