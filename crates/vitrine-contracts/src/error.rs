//! Error types for the Vitrine runtime.
//!
//! Startup paths (registration, binding resolution, schema compilation,
//! catalog loading) return `VitrineResult<T>` and abort on `Err`. Request
//! paths capture failures into the response instead of returning them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::ValidationError;

/// The registry tables an identifier can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Action,
    Resource,
    ResourceTemplate,
    Prompt,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Action => "action",
            EntityKind::Resource => "resource",
            EntityKind::ResourceTemplate => "resource template",
            EntityKind::Prompt => "prompt",
        };
        f.write_str(name)
    }
}

/// The unified error type for the Vitrine runtime.
#[derive(Debug, Error)]
pub enum VitrineError {
    /// A descriptor was registered under a key that is already taken.
    #[error("duplicate {kind} identifier '{key}'")]
    DuplicateIdentifier { kind: EntityKind, key: String },

    /// An action's output resource reference does not name a registered
    /// resource. Fatal at startup.
    #[error("action '{action}' is bound to unregistered resource '{reference}'")]
    UnresolvedBinding { action: String, reference: String },

    /// A registry lookup missed.
    #[error("{kind} '{key}' not found")]
    NotFound { kind: EntityKind, key: String },

    /// Arguments did not match the action's schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A free-text identifier matched nothing in the vocabulary.
    #[error("unknown {field} '{raw}'; valid options: {}", .vocabulary.join(", "))]
    UnresolvedIdentifier {
        field: String,
        raw: String,
        vocabulary: Vec<String>,
    },

    /// The content provider could not produce a resource body.
    #[error("content for '{key}' unavailable: {reason}")]
    ContentUnavailable { key: String, reason: String },

    /// An action's result handler rejected a validated payload.
    #[error("action '{action}' failed: {reason}")]
    ActionFailed { action: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A described input schema did not compile.
    #[error("schema document for action '{action}' is invalid: {reason}")]
    SchemaDocument { action: String, reason: String },
}

/// Convenience alias used throughout the Vitrine crates.
pub type VitrineResult<T> = Result<T, VitrineError>;
