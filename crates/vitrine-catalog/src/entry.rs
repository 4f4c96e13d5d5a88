//! Catalog entry types and configuration schema.
//!
//! A `CatalogConfig` is deserialized from TOML. Entries keep TOML-friendly
//! snake_case names and flat layouts; `Catalog::into_registry` converts them
//! into the wire descriptors from `vitrine-contracts`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vitrine_contracts::schema::FieldKind;

/// Server identity shown to hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// One action argument.
///
/// ```toml
/// [[actions.fields]]
/// name = "target"
/// alias = "planet"
/// kind = "string"
/// description = "Planet to center on"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Any TOML value; stored as JSON.
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub max_length: Option<u64>,
}

/// The closed identifier set one string field is normalized against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub field: String,
    pub entries: Vec<String>,
    pub default: String,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    #[serde(default)]
    pub description_field: Option<String>,
}

/// Behavioural hints published with an action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationsEntry {
    #[serde(default)]
    pub destructive: bool,
    #[serde(default)]
    pub idempotent: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub open_world: bool,
}

/// An invocable action.
///
/// ```toml
/// [[actions]]
/// name = "focus"
/// title = "Focus planet"
/// description = "Center the solar system view on a planet"
/// output_resource = "ui://w/1"
/// invoking = "Charting a course"
/// invoked = "Arrived"
/// summary = "Centered the view on {value}."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntry {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub output_resource: Option<String>,
    #[serde(default)]
    pub invoking: Option<String>,
    #[serde(default)]
    pub invoked: Option<String>,
    #[serde(default)]
    pub widget_accessible: bool,
    /// Text summary template; `{title}` and `{value}` are substituted.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub annotations: AnnotationsEntry,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub vocabulary: Option<VocabularyEntry>,
}

/// A fixed resource. Exactly one of `text` or `content_key` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub mime_type: String,
    /// Inline body.
    #[serde(default)]
    pub text: Option<String>,
    /// Key handed to the `ContentProvider` on first read.
    #[serde(default)]
    pub content_key: Option<String>,
}

/// A parametrized resource family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub uri_template: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub mime_type: String,
    /// Body rendered on read with the uri's placeholder values.
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgumentEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptEntry {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub template: String,
    #[serde(default)]
    pub arguments: Vec<PromptArgumentEntry>,
}

/// The top-level structure deserialized from a TOML catalog file.
///
/// Entries are registered in the order they appear, which is also the order
/// enumeration requests return them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub server: ServerInfo,
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
    #[serde(default)]
    pub prompts: Vec<PromptEntry>,
}
