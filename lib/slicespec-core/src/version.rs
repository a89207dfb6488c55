//! OpenAPI version families and version-string parsing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Document;

/// An OpenAPI version family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
pub enum OasVersion {
    /// OpenAPI 3.0.x
    #[serde(rename = "3.0.x")]
    #[display("3.0.x")]
    V3_0,
    /// OpenAPI 3.1.x
    #[serde(rename = "3.1.x")]
    #[display("3.1.x")]
    V3_1,
}

impl OasVersion {
    /// The canonical `openapi` value written after a conversion.
    #[must_use]
    pub fn canonical(self) -> &'static str {
        match self {
            Self::V3_0 => "3.0.0",
            Self::V3_1 => "3.1.0",
        }
    }

    /// The prefix every `openapi` value of this family starts with.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::V3_0 => "3.0.",
            Self::V3_1 => "3.1.",
        }
    }

    /// Detects the family from the document `openapi` field.
    #[must_use]
    pub fn detect(document: &Document) -> Option<Self> {
        let raw = document.get("openapi")?.as_str()?;
        let version = raw.parse::<OpenApiVersion>().ok()?;
        version.family()
    }

    /// Returns `true` if `openapi` (a raw version string) belongs to this family.
    #[must_use]
    pub fn accepts(self, openapi: &str) -> bool {
        openapi.starts_with(self.prefix())
    }
}

impl FromStr for OasVersion {
    type Err = VersionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "3.0.x" | "3.0" => Ok(Self::V3_0),
            "3.1.x" | "3.1" => Ok(Self::V3_1),
            _ => Err(VersionParseError {
                value: value.to_string(),
            }),
        }
    }
}

/// A version string that is not `<major>.<minor>.<patch>` (or not a known family).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Invalid OAS version format: {value}")]
pub struct VersionParseError {
    /// The rejected input.
    pub value: String,
}

/// A parsed `openapi` field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{major}.{minor}.{patch}")]
pub struct OpenApiVersion {
    /// Major version, must be 3 to be supported.
    pub major: u32,
    /// Minor version, 0 or 1 to be supported.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl OpenApiVersion {
    /// The supported family of this version, if any.
    #[must_use]
    pub fn family(self) -> Option<OasVersion> {
        match (self.major, self.minor) {
            (3, 0) => Some(OasVersion::V3_0),
            (3, 1) => Some(OasVersion::V3_1),
            _ => None,
        }
    }
}

impl FromStr for OpenApiVersion {
    type Err = VersionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let error = || VersionParseError {
            value: value.to_string(),
        };
        let mut parts = value.split('.');
        let mut next = || -> Result<u32, VersionParseError> {
            parts.next().and_then(|part| part.parse().ok()).ok_or_else(error)
        };
        let major = next()?;
        let minor = next()?;
        let patch = next()?;
        if parts.next().is_some() {
            return Err(error());
        }
        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}
