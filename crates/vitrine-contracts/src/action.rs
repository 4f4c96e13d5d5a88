//! Action descriptors and the host-surface hints attached to them.
//!
//! An action is the caller-facing unit of invocation. Its descriptor is built
//! once at startup, registered, and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::InputSchema;

/// Everything the runtime knows about one invocable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    /// Unique, stable, caller-facing identifier (e.g. "focus").
    pub name: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description shown to the calling model.
    pub description: String,
    /// Structural description of the accepted arguments.
    pub input_schema: InputSchema,
    /// Uri of the UI resource that renders this action's results.
    ///
    /// Must resolve to a registered resource when the dispatcher is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_resource_ref: Option<String>,
    #[serde(default)]
    pub annotations: ActionAnnotations,
    #[serde(default)]
    pub hints: InvocationHints,
    /// Closed vocabulary for the action's free-text identifier field, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vocabulary>,
}

impl ActionDescriptor {
    /// The bound resource uri, treating an empty string as "no binding".
    pub fn binding(&self) -> Option<&str> {
        self.output_resource_ref
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }
}

/// Capability hints a host may use to decide how to present an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionAnnotations {
    #[serde(default)]
    pub destructive_hint: bool,
    #[serde(default)]
    pub idempotent_hint: bool,
    #[serde(default)]
    pub read_only_hint: bool,
    #[serde(default)]
    pub open_world_hint: bool,
}

/// Labels and flags forwarded to the host surface in result metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationHints {
    /// Shown while the action is in flight.
    pub invoking: String,
    /// Shown once the action has completed.
    pub invoked: String,
    /// Whether the rendered widget may call back into actions itself.
    #[serde(default)]
    pub widget_accessible: bool,
    /// Text summary template. `{value}` is replaced with the resolved
    /// identifier and `{title}` with the action title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Default for InvocationHints {
    fn default() -> Self {
        Self {
            invoking: "Working".to_string(),
            invoked: "Done".to_string(),
            widget_accessible: false,
            summary: None,
        }
    }
}

/// A closed, ordered vocabulary bound to one string field of an action.
///
/// Entry order is the only tie-breaker the normalizer uses, for both exact
/// and prefix matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    /// Canonical name of the input field holding the identifier.
    pub field: String,
    /// Canonical entries, in tie-breaking order.
    pub entries: Vec<String>,
    /// Alias → canonical entry.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Returned for empty or whitespace-only input.
    pub default: String,
    /// Canonical entry → descriptive text surfaced to the widget.
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    /// Structured-content key the description is written under.
    #[serde(default = "default_description_field")]
    pub description_field: String,
}

fn default_description_field() -> String {
    "description".to_string()
}
