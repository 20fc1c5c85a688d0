//! Strict-mode JSON schema derivation for schema-constrained batch entries.
//!
//! The batch service validates structured responses the same way OpenAI's
//! strict mode does: every object must carry `additionalProperties: false`,
//! every property must be listed in `required` (nullable ones included), and
//! `$ref` indirection is not followed. `schemars` output satisfies none of
//! that out of the box, so this module rewrites it.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Types that can be requested as a schema-constrained batch response.
///
/// Blanket-implemented for anything deriving `JsonSchema` + `Deserialize`.
pub trait StrictSchema: JsonSchema + DeserializeOwned {
    /// Derive a strict-mode schema for this type.
    fn strict_schema() -> serde_json::Value {
        let mut value = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        tighten_objects(&mut value);

        // Inline definitions before stripping the bookkeeping keys.
        let definitions = value.get("definitions").cloned();
        if let Some(defs) = definitions {
            inline_definitions(&mut value, &defs);
        }
        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Schema name reported to the service.
    fn schema_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StrictSchema for T {}

/// Recursively add `additionalProperties: false` and promote every property
/// into `required` on each object schema.
fn tighten_objects(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            let is_object_schema =
                map.get("type") == Some(&serde_json::Value::String("object".to_string()));

            if is_object_schema {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(keys));
                }
            }

            for (_, v) in map.iter_mut() {
                tighten_objects(v);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items.iter_mut() {
                tighten_objects(item);
            }
        }
        _ => {}
    }
}

/// Replace every `{"$ref": "#/definitions/Name"}` with the referenced schema,
/// recursing into the inlined copy for nested refs.
fn inline_definitions(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(path)) = map.get("$ref").cloned() {
                if let Some(name) = path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(name) {
                        *value = def.clone();
                        inline_definitions(value, definitions);
                        return;
                    }
                }
            }
            for (_, v) in map.iter_mut() {
                inline_definitions(v, definitions);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items.iter_mut() {
                inline_definitions(item, definitions);
            }
        }
        _ => {}
    }
}
