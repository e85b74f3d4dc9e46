//! OpenAPI fragments generated from an entity's column list.

use bookrec_db::{ColumnKind, Entity};
use serde_json::{json, Map, Value};

/// `Book`, `UserInteraction`, ... from the entity's singular name.
pub fn schema_name<E: Entity>() -> String {
    E::NAME
        .split(|c: char| c == ' ' || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn column_schema(kind: ColumnKind) -> Value {
    match kind {
        ColumnKind::Text => json!({ "type": "string" }),
        ColumnKind::Integer => json!({ "type": "integer", "format": "int32" }),
        ColumnKind::Double => json!({ "type": "number", "format": "double" }),
        ColumnKind::Timestamp => json!({ "type": "string", "format": "date-time" }),
    }
}

fn entity_schema<E: Entity>() -> Value {
    let mut properties = Map::new();
    properties.insert("id".to_string(), json!({ "type": "string" }));
    for column in E::COLUMNS {
        properties.insert(column.name.to_string(), column_schema(column.kind));
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": ["id"]
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn path_param(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

pub fn document<E: Entity>() -> Value {
    let schema = schema_name::<E>();
    let tag = schema.clone();
    let item = json!({ "$ref": format!("#/components/schemas/{schema}") });
    let items = json!({ "type": "array", "items": item });
    let body = json!({
        "required": true,
        "content": { "application/json": { "schema": item } }
    });

    let collection = format!("/{}/", E::RESOURCE);
    let member = format!("/{}/{{id}}", E::RESOURCE);

    let mut paths = Map::new();
    paths.insert(
        collection,
        json!({
            "get": {
                "summary": format!("List {}", E::RESOURCE),
                "tags": [tag],
                "responses": {
                    "200": json_response("All records", items.clone()),
                    "500": error_response("Store error")
                }
            },
            "post": {
                "summary": format!("Create a {}", E::NAME),
                "tags": [tag],
                "requestBody": body,
                "responses": {
                    "201": json_response("Created", item.clone()),
                    "400": error_response("Malformed body"),
                    "409": error_response("Id already exists"),
                    "500": error_response("Store error")
                }
            }
        }),
    );
    paths.insert(
        member,
        json!({
            "parameters": [path_param("id")],
            "get": {
                "summary": format!("Get a {} by id", E::NAME),
                "tags": [tag],
                "responses": {
                    "200": json_response("The record", item.clone()),
                    "404": error_response("Not found"),
                    "500": error_response("Store error")
                }
            },
            "put": {
                "summary": format!("Replace a {}", E::NAME),
                "tags": [tag],
                "requestBody": body,
                "responses": {
                    "200": json_response("Updated", item.clone()),
                    "400": error_response("Malformed body"),
                    "404": error_response("Not found (strict writes only)"),
                    "500": error_response("Store error")
                }
            },
            "delete": {
                "summary": format!("Delete a {}", E::NAME),
                "tags": [tag],
                "responses": {
                    "204": { "description": "Deleted" },
                    "404": error_response("Not found (strict writes only)"),
                    "500": error_response("Store error")
                }
            }
        }),
    );

    if E::OWNER_COLUMN.is_some() {
        paths.insert(
            format!("/{}/user/{{user_id}}", E::RESOURCE),
            json!({
                "parameters": [path_param("user_id")],
                "get": {
                    "summary": format!("List {} of one user", E::RESOURCE),
                    "tags": [tag],
                    "responses": {
                        "200": json_response("Records owned by the user", items),
                        "500": error_response("Store error")
                    }
                }
            }),
        );
    }

    json!({
        "paths": paths,
        "components": {
            "schemas": { schema: entity_schema::<E>() }
        }
    })
}
