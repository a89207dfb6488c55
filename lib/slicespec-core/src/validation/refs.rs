use serde_json::Value;

use crate::ComponentRef;
use crate::Document;
use crate::document::{components_section, pointer_token};

/// A `$ref` occurrence and its JSON pointer location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RefSite {
    pub(super) pointer: String,
    pub(super) reference: String,
}

/// Collects every string `$ref` under `value`, depth-first in document order.
pub(super) fn collect_refs(value: &Value, pointer: &str, sites: &mut Vec<RefSite>) {
    match value {
        Value::Object(object) => {
            if let Some(Value::String(reference)) = object.get("$ref") {
                sites.push(RefSite {
                    pointer: pointer.to_string(),
                    reference: reference.clone(),
                });
            }
            for (key, child) in object {
                collect_refs(child, &format!("{pointer}/{}", pointer_token(key)), sites);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_refs(item, &format!("{pointer}/{index}"), sites);
            }
        }
        _ => {}
    }
}

/// Finds the first component reference that has no target in `document`.
///
/// External and malformed references are not component references and are ignored.
pub(super) fn first_dangling(document: &Document, sites: &[RefSite]) -> Option<RefSite> {
    sites
        .iter()
        .find(|site| {
            ComponentRef::parse(&site.reference).is_some_and(|reference| {
                components_section(document, reference.category.section())
                    .is_none_or(|section| !section.contains_key(&reference.name))
            })
        })
        .cloned()
}
