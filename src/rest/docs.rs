//! Machine-readable description of the REST surface and the page that
//! renders it.

use axum::{response::Html, response::IntoResponse, Json};
use serde_json::{json, Value};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Capybara API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub async fn swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(openapi_document())
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Capybara id",
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn message_response(description: &str) -> Value {
    json!({ "description": description, "content": json_content(schema_ref("Message")) })
}

fn storage_error_response() -> Value {
    json!({ "description": "Storage error", "content": json_content(schema_ref("StorageError")) })
}

fn capybara_response(description: &str) -> Value {
    json!({ "description": description, "content": json_content(schema_ref("Capybara")) })
}

fn capybara_body() -> Value {
    json!({ "required": true, "content": json_content(schema_ref("CapybaraInput")) })
}

pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Capybara API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "CRUD operations over capybaras"
        },
        "paths": {
            "/capybaras": {
                "get": {
                    "summary": "List all capybaras",
                    "responses": {
                        "200": {
                            "description": "Capybaras ordered by id",
                            "content": json_content(json!({
                                "type": "array",
                                "items": schema_ref("Capybara")
                            }))
                        },
                        "500": storage_error_response()
                    }
                },
                "post": {
                    "summary": "Create a capybara",
                    "requestBody": capybara_body(),
                    "responses": {
                        "201": capybara_response("Created capybara"),
                        "400": message_response("Name is required"),
                        "500": storage_error_response()
                    }
                }
            },
            "/capybaras/{id}": {
                "get": {
                    "summary": "Get a capybara by id",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": capybara_response("Capybara"),
                        "400": message_response("Invalid id"),
                        "404": message_response("Capybara not found"),
                        "500": storage_error_response()
                    }
                },
                "put": {
                    "summary": "Rename a capybara",
                    "parameters": [id_parameter()],
                    "requestBody": capybara_body(),
                    "responses": {
                        "200": capybara_response("Updated capybara"),
                        "400": message_response("Invalid id or name is required"),
                        "404": message_response("Capybara not found"),
                        "500": storage_error_response()
                    }
                },
                "delete": {
                    "summary": "Delete a capybara",
                    "parameters": [id_parameter()],
                    "responses": {
                        "204": { "description": "Capybara deleted" },
                        "400": message_response("Invalid id"),
                        "404": message_response("Capybara not found"),
                        "500": storage_error_response()
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Service health",
                    "responses": { "200": { "description": "Service is up" } }
                }
            }
        },
        "components": {
            "schemas": {
                "Capybara": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string", "minLength": 1 }
                    }
                },
                "CapybaraInput": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 }
                    }
                },
                "Message": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } }
                },
                "StorageError": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } }
                }
            }
        }
    })
}
