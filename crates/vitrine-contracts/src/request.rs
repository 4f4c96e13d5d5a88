//! Request and response types crossing the dispatcher boundary.
//!
//! Both sides are plain serde values: no transport framing. Callers
//! pattern-match on `Response`; per-request failures are carried inside it
//! rather than returned as `Err`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    action::ActionAnnotations,
    error::EntityKind,
    prompt::PromptDescriptor,
    resource::{ResourceContents, ResourceDescriptor, ResourceTemplateDescriptor},
};

/// Correlates the log lines of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub uuid::Uuid);

impl InvocationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

/// An unvalidated call to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub action_name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl InvocationRequest {
    pub fn new(action_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            action_name: action_name.into(),
            arguments,
        }
    }
}

/// Every request kind the dispatcher serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    EnumerateActions,
    EnumerateResources,
    EnumerateResourceTemplates,
    EnumeratePrompts,
    ReadResource {
        uri: String,
    },
    InvokeAction(InvocationRequest),
    GetPrompt {
        name: String,
        #[serde(default)]
        arguments: Map<String, Value>,
    },
}

/// The discriminated result of `Dispatcher::dispatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Response {
    Actions(Vec<ActionListing>),
    Resources(Vec<ResourceDescriptor>),
    ResourceTemplates(Vec<ResourceTemplateDescriptor>),
    Prompts(Vec<PromptDescriptor>),
    Resource(ReadResourceResult),
    Invocation(InvocationResult),
    Prompt(PromptResult),
    /// A lookup outside the invocation path missed.
    NotFound { kind: EntityKind, key: String },
    /// A request outside the invocation path was malformed.
    Failed { message: String },
}

/// How an action is advertised to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionListing {
    pub name: String,
    pub title: String,
    pub description: String,
    /// JSON Schema document produced by the schema describer.
    pub input_schema: Value,
    pub annotations: ActionAnnotations,
    /// Binding and invocation hints, using the wire metadata keys.
    #[serde(rename = "_meta")]
    pub meta: Map<String, Value>,
}

/// Why an invocation result carries `is_error = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    Validation,
    UnresolvedIdentifier,
    ContentUnavailable,
    /// The action's result handler failed.
    ActionFailed,
}

/// The response to one action invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    /// Short human-readable confirmation or error explanation.
    pub text_summary: String,
    /// Hydration data for the bound UI. Never present on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Map<String, Value>>,
    #[serde(rename = "_meta", default)]
    pub metadata: Map<String, Value>,
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl InvocationResult {
    /// An error-flagged result with no structured content or metadata.
    pub fn failure(kind: FailureKind, text: impl Into<String>) -> Self {
        Self {
            text_summary: text.into(),
            structured_content: None,
            metadata: Map::new(),
            is_error: true,
            failure: Some(kind),
        }
    }
}

/// The response to a resource read.
///
/// A miss is an empty `contents` list with an explanation under
/// `meta::READ_ERROR`, not a hard failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
    #[serde(rename = "_meta", default)]
    pub meta: Map<String, Value>,
}

/// A rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub text: String,
}
