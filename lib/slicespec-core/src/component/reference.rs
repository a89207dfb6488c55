use super::ComponentCategory;

const COMPONENTS_PREFIX: &str = "#/components/";

/// A parsed internal component reference.
///
/// # Example
///
/// ```rust
/// use slicespec_core::{ComponentCategory, ComponentRef};
///
/// let reference = ComponentRef::parse("#/components/headers/X-Rate-Limit").unwrap();
/// assert_eq!(reference.category, ComponentCategory::Headers);
/// assert_eq!(reference.name, "X-Rate-Limit");
///
/// // external or malformed pointers are not component references
/// assert!(ComponentRef::parse("common.yaml#/components/schemas/Error").is_none());
/// assert!(ComponentRef::parse("#/definitions/User").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("#/components/{category}/{name}")]
pub struct ComponentRef {
    /// The targeted section.
    pub category: ComponentCategory,
    /// The component name; may contain `/`.
    pub name: String,
}

impl ComponentRef {
    /// Creates a reference from its parts.
    #[must_use]
    pub fn new(category: ComponentCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// Parses `#/components/<category>/<name...>`.
    ///
    /// Returns `None` for external references, unknown categories and empty names.
    /// Everything after the category segment is the name, slashes included.
    #[must_use]
    pub fn parse(ref_location: &str) -> Option<Self> {
        let rest = ref_location.strip_prefix(COMPONENTS_PREFIX)?;
        let (section, name) = rest.split_once('/')?;
        if name.is_empty() {
            return None;
        }
        let category = section.parse().ok()?;
        Some(Self::new(category, name))
    }
}
