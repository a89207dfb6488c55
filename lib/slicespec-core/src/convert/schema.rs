//! Locating schema objects inside a document.

use serde_json::{Map, Value};

use crate::document::{is_http_method, pointer_token};

/// JSON pointers of every schema object in `document`, parents before children.
///
/// Schema positions are the component schemas plus the `schema` of every parameter,
/// header and media type reachable from components, paths, callbacks and webhooks.
/// Inside a schema, `properties`, `items`, `allOf`, `oneOf`, `anyOf`,
/// `additionalProperties` and `not` are followed.
pub(super) fn schema_pointers(document: &Value) -> Vec<String> {
    let mut collector = SchemaCollector::default();
    collector.document(document);
    collector.pointers
}

/// Calls `visit` on every schema object of `document` with its pointer.
pub(super) fn for_each_schema_mut(
    document: &mut Value,
    mut visit: impl FnMut(&str, &mut Map<String, Value>),
) {
    for pointer in schema_pointers(document) {
        if let Some(schema) = document.pointer_mut(&pointer).and_then(Value::as_object_mut) {
            visit(&pointer, schema);
        }
    }
}

/// Calls `visit` on every schema object of `document` with its pointer.
pub(super) fn for_each_schema(document: &Value, mut visit: impl FnMut(&str, &Map<String, Value>)) {
    for pointer in schema_pointers(document) {
        if let Some(schema) = document.pointer(&pointer).and_then(Value::as_object) {
            visit(&pointer, schema);
        }
    }
}

fn child(pointer: &str, key: &str) -> String {
    format!("{pointer}/{}", pointer_token(key))
}

fn entries<'a>(
    value: Option<&'a Value>,
    pointer: &str,
) -> impl Iterator<Item = (String, &'a Value)> + use<'a> {
    let pointer = pointer.to_string();
    value
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .map(move |(key, item)| (child(&pointer, key), item))
}

fn elements<'a>(
    value: Option<&'a Value>,
    pointer: &str,
) -> impl Iterator<Item = (String, &'a Value)> + use<'a> {
    let pointer = pointer.to_string();
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .map(move |(index, item)| (format!("{pointer}/{index}"), item))
}

#[derive(Default)]
struct SchemaCollector {
    pointers: Vec<String>,
}

impl SchemaCollector {
    fn document(&mut self, document: &Value) {
        let components = document.get("components");
        let components_pointer = "/components";
        let section = |name: &str| components.and_then(|components| components.get(name));
        let section_pointer = |name: &str| child(components_pointer, name);

        for (pointer, schema) in entries(section("schemas"), &section_pointer("schemas")) {
            self.schema(schema, &pointer);
        }
        for (pointer, parameter) in entries(section("parameters"), &section_pointer("parameters")) {
            self.parameter(parameter, &pointer);
        }
        for (pointer, header) in entries(section("headers"), &section_pointer("headers")) {
            self.parameter(header, &pointer);
        }
        for (pointer, response) in entries(section("responses"), &section_pointer("responses")) {
            self.response(response, &pointer);
        }
        for (pointer, body) in entries(section("requestBodies"), &section_pointer("requestBodies"))
        {
            self.content(body, &pointer);
        }
        for (pointer, callback) in entries(section("callbacks"), &section_pointer("callbacks")) {
            self.callback(callback, &pointer);
        }

        for (pointer, path_item) in entries(document.get("paths"), "/paths") {
            self.path_item(path_item, &pointer);
        }
        for (pointer, path_item) in entries(document.get("webhooks"), "/webhooks") {
            self.path_item(path_item, &pointer);
        }
    }

    fn path_item(&mut self, path_item: &Value, pointer: &str) {
        let Some(path_item) = path_item.as_object() else {
            return;
        };
        for (pointer, parameter) in
            elements(path_item.get("parameters"), &child(pointer, "parameters"))
        {
            self.parameter(parameter, &pointer);
        }
        for (method, operation) in path_item {
            if is_http_method(method) {
                self.operation(operation, &child(pointer, method));
            }
        }
    }

    fn operation(&mut self, operation: &Value, pointer: &str) {
        for (pointer, parameter) in
            elements(operation.get("parameters"), &child(pointer, "parameters"))
        {
            self.parameter(parameter, &pointer);
        }
        if let Some(body) = operation.get("requestBody") {
            self.content(body, &child(pointer, "requestBody"));
        }
        for (pointer, response) in entries(operation.get("responses"), &child(pointer, "responses"))
        {
            self.response(response, &pointer);
        }
        for (pointer, callback) in entries(operation.get("callbacks"), &child(pointer, "callbacks"))
        {
            self.callback(callback, &pointer);
        }
    }

    fn callback(&mut self, callback: &Value, pointer: &str) {
        for (pointer, path_item) in entries(Some(callback), pointer) {
            self.path_item(path_item, &pointer);
        }
    }

    fn response(&mut self, response: &Value, pointer: &str) {
        for (pointer, header) in entries(response.get("headers"), &child(pointer, "headers")) {
            self.parameter(header, &pointer);
        }
        self.content(response, pointer);
    }

    /// Parameters and headers share the `schema` / `content` layout.
    fn parameter(&mut self, parameter: &Value, pointer: &str) {
        if let Some(schema) = parameter.get("schema") {
            self.schema(schema, &child(pointer, "schema"));
        }
        self.content(parameter, pointer);
    }

    fn content(&mut self, holder: &Value, pointer: &str) {
        for (pointer, media) in entries(holder.get("content"), &child(pointer, "content")) {
            if let Some(schema) = media.get("schema") {
                self.schema(schema, &child(&pointer, "schema"));
            }
        }
    }

    fn schema(&mut self, schema: &Value, pointer: &str) {
        let Some(object) = schema.as_object() else {
            return;
        };
        self.pointers.push(pointer.to_string());

        for (pointer, property) in entries(object.get("properties"), &child(pointer, "properties"))
        {
            self.schema(property, &pointer);
        }
        for keyword in ["items", "additionalProperties", "not"] {
            if let Some(nested) = object.get(keyword) {
                self.schema(nested, &child(pointer, keyword));
            }
        }
        for keyword in ["allOf", "oneOf", "anyOf"] {
            for (pointer, member) in elements(object.get(keyword), &child(pointer, keyword)) {
                self.schema(member, &pointer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_find_schemas_in_every_position() {
        let doc = json!({
            "paths": {
                "/users/{id}": {
                    "parameters": [{ "name": "id", "in": "path", "schema": { "type": "string" } }],
                    "get": {
                        "responses": {
                            "200": {
                                "headers": { "X-Rate": { "schema": { "type": "integer" } } },
                                "content": { "application/json": { "schema": {
                                    "type": "object",
                                    "properties": {
                                        "tags": { "type": "array", "items": { "type": "string" } }
                                    }
                                } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": { "Pet": { "oneOf": [{ "$ref": "#/components/schemas/Cat" }] } }
            }
        });

        let pointers = schema_pointers(&doc);

        assert_eq!(
            pointers,
            [
                "/components/schemas/Pet",
                "/components/schemas/Pet/oneOf/0",
                "/paths/~1users~1{id}/parameters/0/schema",
                "/paths/~1users~1{id}/get/responses/200/headers/X-Rate/schema",
                "/paths/~1users~1{id}/get/responses/200/content/application~1json/schema",
                "/paths/~1users~1{id}/get/responses/200/content/application~1json/schema/properties/tags",
                "/paths/~1users~1{id}/get/responses/200/content/application~1json/schema/properties/tags/items",
            ]
        );
    }

    #[test]
    fn should_follow_callbacks_and_webhooks() {
        let doc = json!({
            "paths": { "/subscribe": { "post": {
                "callbacks": { "onEvent": { "{$request.body#/url}": { "post": {
                    "requestBody": { "content": {
                        "application/json": { "schema": { "type": "object" } }
                    } }
                } } } }
            } } },
            "webhooks": { "newPet": { "post": {
                "requestBody": { "content": {
                    "application/json": { "schema": { "type": "string" } }
                } }
            } } }
        });

        let pointers = schema_pointers(&doc);

        assert_eq!(pointers.len(), 2);
        assert!(pointers.iter().any(|pointer| pointer.contains("/callbacks/onEvent/")));
        assert!(pointers.iter().any(|pointer| pointer.starts_with("/webhooks/newPet/")));
    }

    #[test]
    fn should_ignore_boolean_additional_properties() {
        let doc = json!({
            "components": { "schemas": {
                "Bag": { "type": "object", "additionalProperties": true }
            } }
        });

        assert_eq!(schema_pointers(&doc), ["/components/schemas/Bag"]);
    }

    #[test]
    fn should_visit_schemas_mutably() {
        let mut doc = json!({
            "components": { "schemas": {
                "A": { "type": "string" },
                "B": { "items": { "type": "integer" } }
            } }
        });
        let mut visited = vec![];

        for_each_schema_mut(&mut doc, |pointer, schema| {
            visited.push(pointer.to_string());
            schema.insert("x-seen".to_string(), json!(true));
        });

        assert_eq!(visited.len(), 3);
        assert_eq!(doc["components"]["schemas"]["B"]["items"]["x-seen"], true);
    }
}
