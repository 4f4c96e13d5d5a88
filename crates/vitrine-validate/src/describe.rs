//! JSON Schema documents generated from `InputSchema` declarations.
//!
//! The same document is published in action listings and compiled by
//! `SchemaValidator`, so callers and the validator always agree on shape.

use serde_json::{json, Map, Value};

use vitrine_contracts::{
    error::VitrineResult,
    schema::{FieldSpec, InputSchema},
};
use vitrine_core::traits::SchemaDescriber;

/// Describes inputs as draft 2020-12 object schemas.
///
/// Properties are keyed by canonical field name. Aliases are resolved by the
/// validator before the document is applied, so they never appear here.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaDescriber;

impl JsonSchemaDescriber {
    fn describe_field(field: &FieldSpec) -> Value {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(field.kind.json_type()));
        if let Some(description) = &field.description {
            prop.insert("description".to_string(), json!(description));
        }
        if let Some(default) = &field.default {
            prop.insert("default".to_string(), default.clone());
        }
        if let Some(min) = field.minimum {
            prop.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = field.maximum {
            prop.insert("maximum".to_string(), json!(max));
        }
        if let Some(len) = field.max_length {
            prop.insert("maxLength".to_string(), json!(len));
        }
        Value::Object(prop)
    }
}

impl SchemaDescriber for JsonSchemaDescriber {
    fn describe(&self, schema: &InputSchema) -> VitrineResult<Value> {
        let properties: Map<String, Value> = schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), Self::describe_field(f)))
            .collect();
        let required: Vec<&str> = schema
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        Ok(json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vitrine_contracts::schema::{FieldKind, FieldSpec, InputSchema};
    use vitrine_core::traits::SchemaDescriber;

    use super::JsonSchemaDescriber;

    #[test]
    fn document_lists_canonical_properties_in_order() {
        let mut target = FieldSpec::new("target", FieldKind::String);
        target.alias = Some("planet".to_string());
        target.required = true;
        target.max_length = Some(32);
        let mut zoom = FieldSpec::new("zoom", FieldKind::Integer);
        zoom.minimum = Some(1.0);
        zoom.maximum = Some(10.0);
        zoom.default = Some(json!(3));

        let doc = JsonSchemaDescriber
            .describe(&InputSchema {
                fields: vec![target, zoom],
            })
            .unwrap();

        assert_eq!(doc["type"], "object");
        assert_eq!(doc["additionalProperties"], false);
        assert_eq!(doc["required"], json!(["target"]));
        assert_eq!(doc["properties"]["target"]["type"], "string");
        assert_eq!(doc["properties"]["target"]["maxLength"], 32);
        assert!(doc["properties"].get("planet").is_none());
        assert_eq!(doc["properties"]["zoom"]["type"], "integer");
        assert_eq!(doc["properties"]["zoom"]["minimum"], 1.0);
        assert_eq!(doc["properties"]["zoom"]["default"], 3);
    }

    #[test]
    fn empty_schema_is_an_empty_object() {
        let doc = JsonSchemaDescriber.describe(&InputSchema::default()).unwrap();
        assert_eq!(doc["properties"], json!({}));
        assert_eq!(doc["required"], json!([]));
    }
}
