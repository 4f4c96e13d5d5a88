//! # vitrine-catalog
//!
//! A TOML-driven static catalog for Vitrine servers.
//!
//! ## Overview
//!
//! [`Catalog`] reads a TOML document declaring server metadata, actions,
//! resources, resource templates, and prompts, and converts it into a
//! [`Registry`](vitrine_core::Registry) ready for the dispatcher builder.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use vitrine_catalog::Catalog;
//!
//! let registry = Catalog::from_file(Path::new("catalog/solar.toml"))?.into_registry()?;
//! let dispatcher = vitrine_validate::standard_dispatcher(registry, None)?;
//! ```

pub mod catalog;
pub mod entry;

pub use catalog::Catalog;
pub use entry::{CatalogConfig, ServerInfo};

// ── Tests ─────────────────────────────────────────────────────────────────────
