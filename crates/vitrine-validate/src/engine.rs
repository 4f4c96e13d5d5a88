//! Schema-based input validator for Vitrine actions.
//!
//! `SchemaValidator` implements the `InputValidator` trait from
//! `vitrine-core`. Validation runs in two phases:
//!
//! 1. **Keys**: every supplied key is mapped to its canonical field (name
//!    or alias), unknown keys are rejected by name, defaults fill omitted
//!    fields, missing required fields are reported.
//! 2. **Values**: the canonical argument object is checked against the
//!    action's compiled JSON Schema document with the `jsonschema` crate.
//!
//! Violations from both phases are collected before returning so callers
//! see the full failure set in one pass.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use vitrine_contracts::{
    action::ActionDescriptor,
    error::{VitrineError, VitrineResult},
    schema::{FieldKind, FieldSpec, FieldValue, ValidatedPayload, ValidationError},
};
use vitrine_core::{
    registry::Registry,
    traits::{InputValidator, SchemaDescriber},
};

use crate::describe::JsonSchemaDescriber;

/// Field name used for violations that concern the argument object itself.
const ARGUMENTS_FIELD: &str = "arguments";

/// The Vitrine input validator.
///
/// Holds one compiled `jsonschema::Validator` per registered action,
/// built in `prepare`. Actions validated without a prior `prepare` are
/// compiled on demand and not retained.
pub struct SchemaValidator {
    compiled: HashMap<String, jsonschema::Validator>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            compiled: HashMap::new(),
        }
    }

    /// Number of actions with a precompiled schema.
    pub fn compiled_len(&self) -> usize {
        self.compiled.len()
    }

    fn compile(action: &str, document: &Value) -> VitrineResult<jsonschema::Validator> {
        jsonschema::validator_for(document).map_err(|e| VitrineError::SchemaDocument {
            action: action.to_string(),
            reason: e.to_string(),
        })
    }

    /// Phase 1: canonical keys, defaults and required fields.
    fn canonicalize(
        action: &ActionDescriptor,
        arguments: &Map<String, Value>,
        err: &mut ValidationError,
    ) -> Map<String, Value> {
        let schema = &action.input_schema;
        let mut canonical = Map::new();
        // canonical name → key the caller used
        let mut used: BTreeMap<&str, &str> = BTreeMap::new();

        for (key, value) in arguments {
            let Some(field) = schema.resolve(key) else {
                err.push(
                    key.clone(),
                    format!(
                        "unknown field; accepted: {}",
                        schema.accepted_names().join(", ")
                    ),
                );
                continue;
            };
            if let Some(previous) = used.insert(field.name.as_str(), key.as_str()) {
                err.push(
                    field.name.clone(),
                    format!("supplied as both '{previous}' and '{key}'"),
                );
                continue;
            }
            canonical.insert(field.name.clone(), value.clone());
        }

        for field in &schema.fields {
            if canonical.contains_key(&field.name) {
                continue;
            }
            if let Some(default) = &field.default {
                canonical.insert(field.name.clone(), default.clone());
            } else if field.required && !used.contains_key(field.name.as_str()) {
                err.push(field.name.clone(), "required field is missing");
            }
        }

        canonical
    }

    /// Phase 2: JSON Schema type and range checks.
    ///
    /// Root-level errors (`required`, `additionalProperties`) are already
    /// covered by phase 1 and skipped here.
    fn check_values(compiled: &jsonschema::Validator, instance: &Value, err: &mut ValidationError) {
        for error in compiled.iter_errors(instance) {
            let path = error.instance_path.to_string();
            let Some(field) = path.trim_start_matches('/').split('/').next().filter(|s| !s.is_empty())
            else {
                continue;
            };
            err.push(field.to_string(), error.to_string());
        }
    }

    /// Convert a schema-checked value into its typed form.
    ///
    /// Whole-number floats and unsigned values are accepted for integer
    /// fields only when they fit in an `i64`; anything outside that range is
    /// rejected rather than clamped.
    fn typed(field: &FieldSpec, value: &Value) -> Result<FieldValue, String> {
        let mismatch = || format!("expected {}, got {value}", field.kind.json_type());
        match field.kind {
            FieldKind::String => value
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or_else(mismatch),
            FieldKind::Integer => {
                if let Some(i) = value.as_i64() {
                    return Ok(FieldValue::Integer(i));
                }
                let f = value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .ok_or_else(mismatch)?;
                if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Ok(FieldValue::Integer(f as i64))
                } else {
                    Err(format!("integer out of range: {value}"))
                }
            }
            FieldKind::Number => value.as_f64().map(FieldValue::Number).ok_or_else(mismatch),
            FieldKind::Boolean => value.as_bool().map(FieldValue::Flag).ok_or_else(mismatch),
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValidator for SchemaValidator {
    /// Compile every registered action's described schema.
    ///
    /// A document that does not compile is a startup defect and aborts
    /// dispatcher construction with `SchemaDocument`.
    fn prepare(&mut self, registry: &Registry, describer: &dyn SchemaDescriber) -> VitrineResult<()> {
        for action in registry.actions() {
            let document = describer.describe(&action.input_schema)?;
            let compiled = Self::compile(&action.name, &document)?;
            self.compiled.insert(action.name.clone(), compiled);
        }
        debug!(actions = self.compiled.len(), "input schemas compiled");
        Ok(())
    }

    fn validate(
        &self,
        action: &ActionDescriptor,
        arguments: &Value,
    ) -> Result<ValidatedPayload, ValidationError> {
        let mut err = ValidationError::new(action.name.clone());

        let empty = Map::new();
        let supplied = match arguments {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                err.push(
                    ARGUMENTS_FIELD,
                    format!("expected an object of named arguments, got {other}"),
                );
                return Err(err);
            }
        };

        let canonical = Self::canonicalize(action, supplied, &mut err);
        let instance = Value::Object(canonical);

        match self.compiled.get(&action.name) {
            Some(compiled) => Self::check_values(compiled, &instance, &mut err),
            None => {
                let document = JsonSchemaDescriber.describe(&action.input_schema);
                match document.and_then(|d| Self::compile(&action.name, &d)) {
                    Ok(compiled) => Self::check_values(&compiled, &instance, &mut err),
                    Err(e) => err.push(ARGUMENTS_FIELD, e.to_string()),
                }
            }
        }

        let mut fields = BTreeMap::new();
        if let Value::Object(canonical) = &instance {
            for field in &action.input_schema.fields {
                let Some(value) = canonical.get(&field.name) else {
                    continue;
                };
                match Self::typed(field, value) {
                    Ok(typed) => {
                        fields.insert(field.name.clone(), typed);
                    }
                    Err(_) if err.fields().any(|f| f == field.name) => {}
                    Err(message) => err.push(field.name.clone(), message),
                }
            }
        }

        if !err.is_empty() {
            warn!(
                action = %action.name,
                fields = ?err.fields().collect::<Vec<_>>(),
                "argument validation failed"
            );
            return Err(err);
        }

        Ok(ValidatedPayload {
            action: action.name.clone(),
            fields,
        })
    }
}

/// Look up `action_name` in `registry` and validate `arguments` for it.
///
/// # Errors
///
/// `NotFound` when the action is not registered, `Validation` when the
/// arguments are rejected.
pub fn validate_named(
    registry: &Registry,
    validator: &dyn InputValidator,
    action_name: &str,
    arguments: &Value,
) -> VitrineResult<ValidatedPayload> {
    let action = registry.action(action_name)?;
    Ok(validator.validate(action, arguments)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
