//! # vitrine-core
//!
//! The binding, dispatch, and identifier-resolution core of Vitrine.
//!
//! This crate provides:
//! - The collaborator traits (`ContentProvider`, `SchemaDescriber`,
//!   `InputValidator`)
//! - The `Registry` of actions, resources, templates, and prompts
//! - The binding resolver, identifier normalizer, and result composer
//! - The `Dispatcher` that routes every request kind to its handler slot
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_core::{Dispatcher, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register(widget_resource)?;
//! registry.register(focus_action)?;
//! let dispatcher = Dispatcher::builder(registry)
//!     .schema_describer(Box::new(describer))
//!     .validator(Box::new(validator))
//!     .build()?;
//! ```

pub mod binding;
pub mod cache;
pub mod composer;
pub mod dispatcher;
pub mod normalizer;
pub mod prompt;
pub mod registry;
pub mod template;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use dispatcher::{DispatchContext, Dispatcher, DispatcherBuilder};
pub use registry::{Descriptor, Registry};
