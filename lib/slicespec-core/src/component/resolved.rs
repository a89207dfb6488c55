use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{ComponentCategory, ComponentRef};

/// Every component reachable from one operation, grouped by category.
///
/// Built by the [`ReferenceResolver`](crate::ReferenceResolver); each entry is a deep
/// copy of the source definition. Insertion is idempotent: the first definition
/// stored under a `(category, name)` slot is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedComponents {
    schemas: IndexMap<String, Value>,
    headers: IndexMap<String, Value>,
    parameters: IndexMap<String, Value>,
    responses: IndexMap<String, Value>,
    request_bodies: IndexMap<String, Value>,
    security_schemes: IndexMap<String, Value>,
    links: IndexMap<String, Value>,
    callbacks: IndexMap<String, Value>,
}

impl ResolvedComponents {
    /// The resolved components of one category.
    #[must_use]
    pub fn section(&self, category: ComponentCategory) -> &IndexMap<String, Value> {
        match category {
            ComponentCategory::Schemas => &self.schemas,
            ComponentCategory::Headers => &self.headers,
            ComponentCategory::Parameters => &self.parameters,
            ComponentCategory::Responses => &self.responses,
            ComponentCategory::RequestBodies => &self.request_bodies,
            ComponentCategory::SecuritySchemes => &self.security_schemes,
            ComponentCategory::Links => &self.links,
            ComponentCategory::Callbacks => &self.callbacks,
        }
    }

    fn section_mut(&mut self, category: ComponentCategory) -> &mut IndexMap<String, Value> {
        match category {
            ComponentCategory::Schemas => &mut self.schemas,
            ComponentCategory::Headers => &mut self.headers,
            ComponentCategory::Parameters => &mut self.parameters,
            ComponentCategory::Responses => &mut self.responses,
            ComponentCategory::RequestBodies => &mut self.request_bodies,
            ComponentCategory::SecuritySchemes => &mut self.security_schemes,
            ComponentCategory::Links => &mut self.links,
            ComponentCategory::Callbacks => &mut self.callbacks,
        }
    }

    /// Stores a definition; returns `false` if the slot was already taken.
    pub(crate) fn insert(&mut self, reference: &ComponentRef, definition: Value) -> bool {
        let section = self.section_mut(reference.category);
        if section.contains_key(&reference.name) {
            return false;
        }
        section.insert(reference.name.clone(), definition);
        true
    }

    /// Returns `true` if the component was resolved.
    #[must_use]
    pub fn contains(&self, category: ComponentCategory, name: &str) -> bool {
        self.section(category).contains_key(name)
    }

    /// The resolved definition, if any.
    #[must_use]
    pub fn get(&self, category: ComponentCategory, name: &str) -> Option<&Value> {
        self.section(category).get(name)
    }

    /// Names resolved in one category, in discovery order.
    pub fn names(&self, category: ComponentCategory) -> impl Iterator<Item = &str> {
        self.section(category).keys().map(String::as_str)
    }

    /// Returns `true` when nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ComponentCategory::ALL
            .into_iter()
            .all(|category| self.section(category).is_empty())
    }

    /// Total number of resolved components across all categories.
    #[must_use]
    pub fn total_count(&self) -> usize {
        ComponentCategory::ALL
            .into_iter()
            .map(|category| self.section(category).len())
            .sum()
    }

    /// Builds the `components` mapping, omitting empty categories.
    #[must_use]
    pub fn into_components(self) -> Map<String, Value> {
        let mut result = Map::new();
        let Self {
            schemas,
            headers,
            parameters,
            responses,
            request_bodies,
            security_schemes,
            links,
            callbacks,
        } = self;
        let sections = [
            (ComponentCategory::Schemas, schemas),
            (ComponentCategory::Headers, headers),
            (ComponentCategory::Parameters, parameters),
            (ComponentCategory::Responses, responses),
            (ComponentCategory::RequestBodies, request_bodies),
            (ComponentCategory::SecuritySchemes, security_schemes),
            (ComponentCategory::Links, links),
            (ComponentCategory::Callbacks, callbacks),
        ];
        for (category, entries) in sections {
            if entries.is_empty() {
                continue;
            }
            let entries = entries.into_iter().collect::<Map<String, Value>>();
            result.insert(category.section().to_string(), Value::Object(entries));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_keep_first_definition() {
        let mut resolved = ResolvedComponents::default();
        let user = ComponentRef::new(ComponentCategory::Schemas, "User");

        assert!(resolved.insert(&user, json!({ "type": "object" })));
        assert!(!resolved.insert(&user, json!({ "type": "string" })));

        assert_eq!(
            resolved.get(ComponentCategory::Schemas, "User"),
            Some(&json!({ "type": "object" }))
        );
        assert_eq!(resolved.total_count(), 1);
    }

    #[test]
    fn should_track_categories_independently() {
        let mut resolved = ResolvedComponents::default();
        resolved.insert(
            &ComponentRef::new(ComponentCategory::Schemas, "Error"),
            json!({}),
        );
        resolved.insert(
            &ComponentRef::new(ComponentCategory::Responses, "Error"),
            json!({ "description": "error" }),
        );

        assert!(resolved.contains(ComponentCategory::Schemas, "Error"));
        assert!(resolved.contains(ComponentCategory::Responses, "Error"));
        assert!(!resolved.contains(ComponentCategory::Headers, "Error"));
        assert_eq!(resolved.total_count(), 2);
    }

    #[test]
    fn should_omit_empty_sections() {
        let mut resolved = ResolvedComponents::default();
        assert!(resolved.is_empty());
        assert!(resolved.clone().into_components().is_empty());

        resolved.insert(
            &ComponentRef::new(ComponentCategory::RequestBodies, "NewPet"),
            json!({ "content": {} }),
        );
        resolved.insert(
            &ComponentRef::new(ComponentCategory::Schemas, "Pet"),
            json!({ "type": "object" }),
        );

        let components = Value::Object(resolved.into_components());
        assert_eq!(
            components,
            json!({
                "schemas": { "Pet": { "type": "object" } },
                "requestBodies": { "NewPet": { "content": {} } }
            })
        );
    }
}
