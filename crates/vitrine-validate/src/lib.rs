//! # vitrine-validate
//!
//! JSON Schema backed input validation for Vitrine.
//!
//! - `JsonSchemaDescriber` turns an `InputSchema` into the document shown in
//!   action listings.
//! - `SchemaValidator` compiles those documents with `jsonschema` and checks
//!   invocation arguments against them.
//! - `standard_builder` wires both into a `DispatcherBuilder`, and
//!   `standard_dispatcher` builds it as is.

pub mod describe;
pub mod engine;

pub use describe::JsonSchemaDescriber;
pub use engine::{validate_named, SchemaValidator};

use vitrine_contracts::error::VitrineResult;
use vitrine_core::{traits::ContentProvider, Dispatcher, DispatcherBuilder, Registry};

/// A builder preloaded with the JSON Schema describer and validator. Further
/// overrides and result handlers may be added before `build()`.
pub fn standard_builder(
    registry: Registry,
    provider: Option<Box<dyn ContentProvider>>,
) -> DispatcherBuilder {
    let builder = Dispatcher::builder(registry)
        .schema_describer(Box::new(JsonSchemaDescriber))
        .validator(Box::new(SchemaValidator::new()));
    match provider {
        Some(provider) => builder.content_provider(provider),
        None => builder,
    }
}

/// Build a dispatcher with the JSON Schema describer and validator and the
/// standard handler in every slot.
pub fn standard_dispatcher(
    registry: Registry,
    provider: Option<Box<dyn ContentProvider>>,
) -> VitrineResult<Dispatcher> {
    standard_builder(registry, provider).build()
}
