#![allow(dead_code, missing_docs, clippy::missing_panics_doc)]

use rstest::fixture;
use serde_json::{Value, json};
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A 3.0 user API: GET and DELETE share a path, each with its own components.
#[fixture]
pub fn users_api() -> Value {
    init_tracing();
    json!({
        "openapi": "3.0.3",
        "info": { "title": "Users API", "version": "2.1.0" },
        "servers": [{ "url": "https://api.example.com" }],
        "security": [{ "bearer": [] }],
        "paths": {
            "/users/{id}": {
                "parameters": [{ "$ref": "#/components/parameters/UserId" }],
                "get": {
                    "operationId": "getUser",
                    "responses": {
                        "200": {
                            "description": "The user",
                            "headers": {
                                "X-Rate-Limit": { "$ref": "#/components/headers/X-Rate-Limit" }
                            },
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/User" }
                                }
                            }
                        },
                        "404": { "$ref": "#/components/responses/NotFound" }
                    }
                },
                "delete": {
                    "operationId": "deleteUser",
                    "security": [{ "apiKey": [] }],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "409": {
                            "description": "Conflict",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/DeleteConflict" }
                                }
                            }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "security": [],
                    "responses": { "200": { "description": "OK" } }
                }
            }
        },
        "components": {
            "schemas": {
                "User": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "nickname": { "type": "string", "nullable": true }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } }
                },
                "RetrySeconds": { "type": "integer", "minimum": 0 },
                "DeleteConflict": { "type": "object" },
                "Unused": { "type": "boolean" }
            },
            "parameters": {
                "UserId": {
                    "name": "id",
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" }
                }
            },
            "headers": {
                "X-Rate-Limit": {
                    "description": "Seconds before retrying",
                    "schema": { "$ref": "#/components/schemas/RetrySeconds" }
                }
            },
            "responses": {
                "NotFound": {
                    "description": "Not found",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/Error" }
                        }
                    }
                }
            },
            "securitySchemes": {
                "bearer": { "type": "http", "scheme": "bearer" },
                "apiKey": { "type": "apiKey", "in": "header", "name": "X-Api-Key" }
            }
        }
    })
}

/// A tree of schemas with a self-reference and a three-schema cycle.
#[fixture]
pub fn cyclic_api() -> Value {
    init_tracing();
    json!({
        "openapi": "3.1.0",
        "info": { "title": "Graph", "version": "1.0.0" },
        "paths": {
            "/nodes": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "Nodes",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Node" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/cycle": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "Cycle",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/A" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "children": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Node" }
                        }
                    }
                },
                "A": { "properties": { "b": { "$ref": "#/components/schemas/B" } } },
                "B": { "properties": { "c": { "$ref": "#/components/schemas/C" } } },
                "C": { "properties": { "a": { "$ref": "#/components/schemas/A" } } }
            }
        }
    })
}

/// A 3.1 document using constructs that do not exist in 3.0.
#[fixture]
pub fn modern_api() -> Value {
    init_tracing();
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Pets",
            "version": "1.0.0",
            "license": { "identifier": "Apache-2.0" }
        },
        "paths": {
            "/pets": {
                "get": {
                    "security": [{ "mtls": [] }, { "apiKey": [] }],
                    "responses": {
                        "200": {
                            "description": "Pets",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "webhooks": {
            "newPet": {
                "post": { "responses": { "200": { "description": "Received" } } }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "oneOf": [
                        { "$ref": "#/components/schemas/Cat" },
                        { "$ref": "#/components/schemas/Dog" }
                    ],
                    "discriminator": {
                        "propertyName": "kind",
                        "mapping": {
                            "Cat": "#/components/schemas/Cat",
                            "Dog": "#/components/schemas/Dog"
                        }
                    }
                },
                "Cat": {
                    "type": "object",
                    "properties": { "name": { "type": ["string", "null"] } }
                },
                "Dog": {
                    "type": "object",
                    "properties": { "bark": { "type": "boolean" } },
                    "if": { "properties": { "bark": { "const": true } } },
                    "then": { "required": ["bark"] }
                }
            },
            "securitySchemes": {
                "mtls": { "type": "mutualTLS" },
                "apiKey": { "type": "apiKey", "in": "header", "name": "X-Api-Key" }
            }
        }
    })
}
