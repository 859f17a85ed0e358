//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to generate a JSON schema from a Rust type and
//! rewrites it into the OpenAPI subset accepted by `generationConfig.responseSchema`.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Agenda {
//!     title: String,
//!     items: Vec<String>,
//! }
//!
//! let schema = Agenda::response_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keywords the provider's schema dialect understands. Everything else is dropped.
const ALLOWED_KEYWORDS: &[&str] = &[
    "type",
    "format",
    "description",
    "nullable",
    "enum",
    "properties",
    "required",
    "items",
];

/// Formats the provider accepts; schemars emits others (e.g. "uint8").
const ALLOWED_FORMATS: &[&str] = &["int32", "int64", "float", "double", "enum", "date-time"];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    ///
    /// Gemini requires:
    /// 1. Fully inlined schemas (no `$ref`, no `definitions`)
    /// 2. Upper-case type names (`OBJECT`, `STRING`, ...)
    /// 3. Only its supported keywords (no `additionalProperties`, `title`, `uniqueItems`)
    ///
    /// Every object property is also listed in `required`.
    fn response_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        sanitize(&mut value);
        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all $ref references by replacing them with the schema from definitions.
fn inline_refs(value: &mut Value) {
    let definitions = if let Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Rewrite a (ref-free) JSON schema node into the provider dialect.
fn sanitize(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };

    // ["string", "null"] -> "STRING" + nullable
    let mut nullable = false;
    if let Some(Value::Array(types)) = map.get("type").cloned() {
        nullable = types.iter().any(|t| t == "null");
        if let Some(first) = types.iter().find(|t| *t != "null") {
            map.insert("type".to_string(), first.clone());
        }
    }

    if let Some(Value::String(ty)) = map.get("type").cloned() {
        map.insert("type".to_string(), Value::String(ty.to_uppercase()));
    }

    if let Some(Value::String(format)) = map.get("format") {
        if !ALLOWED_FORMATS.contains(&format.as_str()) {
            map.remove("format");
        }
    }

    map.retain(|key, _| ALLOWED_KEYWORDS.contains(&key.as_str()));

    if nullable {
        map.insert("nullable".to_string(), Value::Bool(true));
    }

    if let Some(Value::Object(props)) = map.get_mut("properties") {
        let keys: Vec<Value> = props.keys().map(|k| Value::String(k.clone())).collect();
        for (_, prop) in props.iter_mut() {
            sanitize(prop);
        }
        map.insert("required".to_string(), Value::Array(keys));
    }

    if let Some(items) = map.get_mut("items") {
        sanitize(items);
    }
}

/// Names listed in a schema node's `required` array.
pub fn required_fields(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Property map of a schema node, if it describes an object.
pub fn properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use std::collections::BTreeSet;

    #[derive(Deserialize, JsonSchema)]
    struct Tagged {
        text: String,
        page: u32,
        tags: BTreeSet<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct Report {
        title: String,
        executive_summary: String,
        note: Option<String>,
        items: Vec<Tagged>,
    }

    #[test]
    fn test_refs_are_inlined() {
        let schema = Report::response_schema();
        let schema_str = serde_json::to_string(&schema).unwrap();

        assert!(!schema_str.contains("$ref"));
        assert!(!schema_str.contains("definitions"));
        assert!(!schema_str.contains("$schema"));

        let items = &schema["properties"]["items"]["items"];
        assert_eq!(items["type"], "OBJECT");
        assert_eq!(items["properties"]["text"]["type"], "STRING");
    }

    #[test]
    fn test_unsupported_keywords_removed() {
        let schema = Report::response_schema();
        let schema_str = serde_json::to_string(&schema).unwrap();

        assert!(!schema_str.contains("additionalProperties"));
        assert!(!schema_str.contains("uniqueItems"));
        assert!(!schema_str.contains("uint32"));
        assert!(!schema_str.contains("\"title\":\"Report\""));
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Report::response_schema();
        let required = required_fields(&schema);

        assert!(required.contains(&"title"));
        assert!(required.contains(&"executiveSummary"));
        assert!(required.contains(&"note"));
        assert!(required.contains(&"items"));

        let nested = required_fields(&schema["properties"]["items"]["items"]);
        assert_eq!(nested.len(), 3);
    }

    #[test]
    fn test_option_becomes_nullable() {
        let schema = Report::response_schema();
        let note = &schema["properties"]["note"];

        assert_eq!(note["type"], "STRING");
        assert_eq!(note["nullable"], true);
    }

    #[test]
    fn test_set_becomes_array() {
        let schema = Report::response_schema();
        let tags = &schema["properties"]["items"]["items"]["properties"]["tags"];

        assert_eq!(tags["type"], "ARRAY");
        assert_eq!(tags["items"]["type"], "STRING");
    }
}
