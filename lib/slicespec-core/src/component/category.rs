use std::str::FromStr;

/// The eight OpenAPI 3.x component sections that can be targeted by a `$ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ComponentCategory {
    /// `#/components/schemas`
    #[display("schemas")]
    Schemas,
    /// `#/components/headers`
    #[display("headers")]
    Headers,
    /// `#/components/parameters`
    #[display("parameters")]
    Parameters,
    /// `#/components/responses`
    #[display("responses")]
    Responses,
    /// `#/components/requestBodies`
    #[display("requestBodies")]
    RequestBodies,
    /// `#/components/securitySchemes`
    #[display("securitySchemes")]
    SecuritySchemes,
    /// `#/components/links`
    #[display("links")]
    Links,
    /// `#/components/callbacks`
    #[display("callbacks")]
    Callbacks,
}

impl ComponentCategory {
    /// All categories, in output order.
    pub const ALL: [Self; 8] = [
        Self::Schemas,
        Self::Headers,
        Self::Parameters,
        Self::Responses,
        Self::RequestBodies,
        Self::SecuritySchemes,
        Self::Links,
        Self::Callbacks,
    ];

    /// The key of this category under `components`.
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            Self::Schemas => "schemas",
            Self::Headers => "headers",
            Self::Parameters => "parameters",
            Self::Responses => "responses",
            Self::RequestBodies => "requestBodies",
            Self::SecuritySchemes => "securitySchemes",
            Self::Links => "links",
            Self::Callbacks => "callbacks",
        }
    }
}

/// A `components` key that is not one of the eight referenceable sections.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Unknown component section: {section}")]
pub struct UnknownCategoryError {
    /// The rejected section name.
    pub section: String,
}

impl FromStr for ComponentCategory {
    type Err = UnknownCategoryError;

    fn from_str(section: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.section() == section)
            .ok_or_else(|| UnknownCategoryError {
                section: section.to_string(),
            })
    }
}
