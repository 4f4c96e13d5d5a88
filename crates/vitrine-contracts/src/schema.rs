//! Input schema declarations and validated payloads.
//!
//! `InputSchema` is the typed description of an action's arguments. The
//! validator turns it into a JSON Schema document (through a
//! `SchemaDescriber`) and produces a `ValidatedPayload` on success or a
//! `ValidationError` listing every violation on failure.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered list of fields an action accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    pub fields: Vec<FieldSpec>,
}

impl InputSchema {
    /// Find a field by canonical name or declared alias.
    pub fn resolve(&self, key: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.name == key || f.alias.as_deref() == Some(key))
    }

    /// Canonical names, plus aliases in parentheses, for error messages.
    pub fn accepted_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| match &f.alias {
                Some(alias) => format!("{} (alias '{}')", f.name, alias),
                None => f.name.clone(),
            })
            .collect()
    }
}

/// One accepted argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Canonical field name, used in the validated payload.
    pub name: String,
    /// Alternative key a caller may use instead of `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Value applied when the caller omits the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl FieldSpec {
    /// A bare field of the given kind; optional, no default, no constraints.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind,
            required: false,
            default: None,
            description: None,
            minimum: None,
            maximum: None,
            max_length: None,
        }
    }
}

/// The primitive types an argument may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    /// The JSON Schema `type` keyword for this kind.
    pub fn json_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// A single typed argument value after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
}

impl From<&FieldValue> for Value {
    fn from(v: &FieldValue) -> Self {
        match v {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Number(n) => Value::from(*n),
            FieldValue::Flag(b) => Value::Bool(*b),
        }
    }
}

/// Arguments that passed validation, keyed by canonical field name.
///
/// Owned by a single invocation and dropped once the response is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPayload {
    pub action: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl ValidatedPayload {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.fields.get(field) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.fields.get(field) {
            Some(FieldValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }
}

/// All messages attached to one offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub messages: Vec<String>,
}

/// Every violation found in one argument object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub action: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            violations: Vec::new(),
        }
    }

    /// Attach `message` to `field`, grouping messages for the same field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.violations.iter_mut().find(|v| v.field == field) {
            Some(existing) => existing.messages.push(message),
            None => self.violations.push(FieldViolation {
                field,
                messages: vec![message],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Names of every offending field, in discovery order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid arguments for '{}'", self.action)?;
        for violation in &self.violations {
            write!(f, "; {}: {}", violation.field, violation.messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
