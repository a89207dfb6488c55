//! Ordered transformation rules for version conversion.
//!
//! Rules can be loaded from a JSON or YAML file keyed by direction:
//!
//! ```json
//! {
//!   "rules_30_to_31": [
//!     { "id": "nullable", "priority": 10, "kind": "nullable-to-type-array" },
//!     { "id": "discriminator", "priority": 20, "kind": "discriminator-mapping" }
//!   ],
//!   "rules_31_to_30": []
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{OasVersion, SliceError};

/// A built-in schema or document transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum TransformationKind {
    /// `nullable: true` becomes a `type` array containing `"null"` (3.0 → 3.1).
    #[display("nullable-to-type-array")]
    NullableToTypeArray,
    /// `discriminator.mapping` synthesized from `oneOf` references (3.0 → 3.1).
    #[display("discriminator-mapping")]
    DiscriminatorMapping,
    /// A `type` array containing `"null"` becomes `nullable: true` (3.1 → 3.0).
    #[display("type-array-to-nullable")]
    TypeArrayToNullable,
    /// `discriminator.mapping` dropped in favor of `propertyName` (3.1 → 3.0).
    #[display("discriminator-property-name")]
    DiscriminatorPropertyName,
    /// Top-level `webhooks` removed (3.1 → 3.0).
    #[display("remove-webhooks")]
    RemoveWebhooks,
    /// `mutualTLS` security schemes removed (3.1 → 3.0).
    #[display("remove-mutual-tls")]
    RemoveMutualTls,
    /// `info.license.identifier` relocated to `info.license.name` (3.1 → 3.0).
    #[display("license-identifier")]
    LicenseIdentifier,
    /// `if`/`then`/`else` in component schemas reported (3.1 → 3.0).
    #[display("conditional-schemas")]
    ConditionalSchemas,
}

impl TransformationKind {
    /// The conversion direction this transformation belongs to, as `(source, target)`.
    #[must_use]
    pub fn direction(self) -> (OasVersion, OasVersion) {
        match self {
            Self::NullableToTypeArray | Self::DiscriminatorMapping => {
                (OasVersion::V3_0, OasVersion::V3_1)
            }
            Self::TypeArrayToNullable
            | Self::DiscriminatorPropertyName
            | Self::RemoveWebhooks
            | Self::RemoveMutualTls
            | Self::LicenseIdentifier
            | Self::ConditionalSchemas => (OasVersion::V3_1, OasVersion::V3_0),
        }
    }
}

/// A name that designates no built-in transformation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Unknown transformation: {name}")]
pub struct UnknownTransformationError {
    /// The rejected name.
    pub name: String,
}

impl FromStr for TransformationKind {
    type Err = UnknownTransformationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kind = match value {
            "nullable-to-type-array" => Self::NullableToTypeArray,
            "discriminator-mapping" => Self::DiscriminatorMapping,
            "type-array-to-nullable" => Self::TypeArrayToNullable,
            "discriminator-property-name" => Self::DiscriminatorPropertyName,
            "remove-webhooks" => Self::RemoveWebhooks,
            "remove-mutual-tls" => Self::RemoveMutualTls,
            "license-identifier" => Self::LicenseIdentifier,
            "conditional-schemas" => Self::ConditionalSchemas,
            _ => {
                return Err(UnknownTransformationError {
                    name: value.to_string(),
                });
            }
        };
        Ok(kind)
    }
}

fn enabled_by_default() -> bool {
    true
}

/// One configured transformation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRule {
    /// Rule identifier, used as the ordering tie-break.
    pub id: String,
    /// Lower priorities run first.
    pub priority: i32,
    /// The transformation applied; when absent, the `id` names it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransformationKind>,
    /// Disabled rules are skipped.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransformationRule {
    /// Creates an enabled rule.
    #[must_use]
    pub fn new(id: impl Into<String>, priority: i32, kind: TransformationKind) -> Self {
        Self {
            id: id.into(),
            priority,
            kind: Some(kind),
            enabled: true,
            description: None,
        }
    }

    /// The transformation this rule applies, if it names a known one.
    #[must_use]
    pub fn transformation(&self) -> Option<TransformationKind> {
        self.kind.or_else(|| self.id.parse().ok())
    }
}

/// Transformation rules for both conversion directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules applied when converting 3.0.x to 3.1.x.
    #[serde(default)]
    pub rules_30_to_31: Vec<TransformationRule>,
    /// Rules applied when converting 3.1.x to 3.0.x.
    #[serde(default)]
    pub rules_31_to_30: Vec<TransformationRule>,
}

impl RuleSet {
    /// The built-in fixed transformation sequence.
    #[must_use]
    pub fn builtin() -> Self {
        use TransformationKind as Kind;

        Self {
            rules_30_to_31: vec![
                TransformationRule::new("nullable-to-type-array", 10, Kind::NullableToTypeArray),
                TransformationRule::new("discriminator-mapping", 20, Kind::DiscriminatorMapping),
            ],
            rules_31_to_30: vec![
                TransformationRule::new("type-array-to-nullable", 10, Kind::TypeArrayToNullable),
                TransformationRule::new(
                    "discriminator-property-name",
                    20,
                    Kind::DiscriminatorPropertyName,
                ),
                TransformationRule::new("remove-webhooks", 30, Kind::RemoveWebhooks),
                TransformationRule::new("remove-mutual-tls", 40, Kind::RemoveMutualTls),
                TransformationRule::new("license-identifier", 50, Kind::LicenseIdentifier),
                TransformationRule::new("conditional-schemas", 60, Kind::ConditionalSchemas),
            ],
        }
    }

    /// Parses a JSON rules file.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Json`] on malformed content.
    pub fn from_json_str(text: &str) -> Result<Self, SliceError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a YAML rules file.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Yaml`] on malformed content.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self, SliceError> {
        serde_saphyr::from_str(text).map_err(SliceError::yaml)
    }

    /// Enabled rules for a direction, sorted by `(priority, id)`.
    ///
    /// Same-family directions have no rules.
    #[must_use]
    pub fn for_direction(&self, source: OasVersion, target: OasVersion) -> Vec<TransformationRule> {
        let rules = match (source, target) {
            (OasVersion::V3_0, OasVersion::V3_1) => &self.rules_30_to_31,
            (OasVersion::V3_1, OasVersion::V3_0) => &self.rules_31_to_30,
            _ => return vec![],
        };
        let mut rules: Vec<_> = rules.iter().filter(|rule| rule.enabled).cloned().collect();
        rules.sort_by(|left, right| {
            left.priority
                .cmp(&right.priority)
                .then_with(|| left.id.cmp(&right.id))
        });
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_sort_rules_by_priority_then_id() {
        let rules = RuleSet::from_json_str(
            r#"{
                "rules_30_to_31": [
                    { "id": "b", "priority": 5, "kind": "discriminator-mapping" },
                    { "id": "a", "priority": 5, "kind": "nullable-to-type-array" },
                    { "id": "first", "priority": 1, "kind": "nullable-to-type-array" },
                    {
                        "id": "off",
                        "priority": 0,
                        "kind": "nullable-to-type-array",
                        "enabled": false
                    }
                ]
            }"#,
        )
        .expect("valid rules");

        let ids: Vec<_> = rules
            .for_direction(OasVersion::V3_0, OasVersion::V3_1)
            .into_iter()
            .map(|rule| rule.id)
            .collect();

        assert_eq!(ids, ["first", "a", "b"]);
        assert!(
            rules
                .for_direction(OasVersion::V3_1, OasVersion::V3_0)
                .is_empty()
        );
    }

    #[test]
    fn should_reject_unknown_kind() {
        let result = RuleSet::from_json_str(
            r#"{ "rules_30_to_31": [{ "id": "x", "priority": 1, "kind": "rename-everything" }] }"#,
        );

        assert!(matches!(result, Err(SliceError::Json(_))));
    }

    #[test]
    fn should_keep_builtin_directions_consistent() {
        let rules = RuleSet::builtin();

        for rule in &rules.rules_30_to_31 {
            let kind = rule.transformation().expect("known kind");
            assert_eq!(kind.direction(), (OasVersion::V3_0, OasVersion::V3_1));
            assert_eq!(kind.to_string(), rule.id);
        }
        for rule in &rules.rules_31_to_30 {
            let kind = rule.transformation().expect("known kind");
            assert_eq!(kind.direction(), (OasVersion::V3_1, OasVersion::V3_0));
            assert_eq!(kind.to_string(), rule.id);
        }
        assert!(
            rules
                .for_direction(OasVersion::V3_1, OasVersion::V3_1)
                .is_empty()
        );
    }

    #[test]
    fn should_infer_kind_from_id() {
        let rules = RuleSet::from_json_str(
            r#"{ "rules_31_to_30": [
                { "id": "remove-webhooks", "priority": 1 },
                { "id": "custom", "priority": 2 }
            ] }"#,
        )
        .expect("valid rules");

        let kinds: Vec<_> = rules
            .rules_31_to_30
            .iter()
            .map(TransformationRule::transformation)
            .collect();

        assert_eq!(kinds, [Some(TransformationKind::RemoveWebhooks), None]);
    }

    #[test]
    fn should_name_unknown_transformation() {
        let error = "custom"
            .parse::<TransformationKind>()
            .expect_err("not a transformation");

        assert_eq!(error.to_string(), "Unknown transformation: custom");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn should_parse_yaml_rules() {
        let rules = RuleSet::from_yaml_str(
            "rules_31_to_30:\n  - id: webhooks\n    priority: 1\n    kind: remove-webhooks\n",
        )
        .expect("valid rules");

        assert_eq!(
            rules.rules_31_to_30,
            [TransformationRule::new(
                "webhooks",
                1,
                TransformationKind::RemoveWebhooks
            )]
        );
        assert!(rules.rules_30_to_31.is_empty());
    }
}
