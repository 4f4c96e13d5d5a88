//! Trait seams between the Vitrine core and its collaborators.
//!
//! - `ContentProvider` (untrusted I/O) fetches lazily-loaded resource bodies
//! - `SchemaDescriber` turns an `InputSchema` into a JSON Schema document
//! - `InputValidator` checks invocation arguments against an action
//!
//! The dispatcher owns one of each and calls them in a fixed order:
//! validate, then compose (which may fetch content through the cache).

use serde_json::Value;

use vitrine_contracts::{
    action::ActionDescriptor,
    error::VitrineResult,
    schema::{InputSchema, ValidatedPayload, ValidationError},
};

use crate::registry::Registry;

/// Source of resource bodies referenced by `ResourceContent::Provided`.
///
/// Implementations may hit the filesystem or the network. The core never
/// calls `load_content` twice for the same resource uri once a load has
/// succeeded; see `ContentCache`.
pub trait ContentProvider: Send + Sync {
    /// Return the raw bytes stored under `key`, or `VitrineError::NotFound`
    /// / `VitrineError::ContentUnavailable` on failure.
    fn load_content(&self, key: &str) -> VitrineResult<Vec<u8>>;
}

/// Produces the machine-readable schema document for an input description.
///
/// The document is what callers see in action listings and what the
/// validator compiles, so both always agree.
pub trait SchemaDescriber: Send + Sync {
    fn describe(&self, schema: &InputSchema) -> VitrineResult<Value>;
}

/// Checks raw invocation arguments against an action's declared schema.
pub trait InputValidator: Send + Sync {
    /// Called once while the dispatcher is built, before any request.
    ///
    /// Implementations may precompile per-action state here. An `Err` aborts
    /// dispatcher construction.
    fn prepare(&mut self, registry: &Registry, describer: &dyn SchemaDescriber) -> VitrineResult<()> {
        let _ = (registry, describer);
        Ok(())
    }

    /// Validate `arguments` for `action`.
    ///
    /// Must either return a fully typed payload with defaults applied or a
    /// `ValidationError` naming every offending field. Never partial.
    fn validate(
        &self,
        action: &ActionDescriptor,
        arguments: &Value,
    ) -> Result<ValidatedPayload, ValidationError>;
}
