//! # vitrine-content
//!
//! Where widget bodies come from.
//!
//! `StaticContentProvider` and `DirectoryContentProvider` implement the
//! `ContentProvider` trait from `vitrine-core`. `content_digest` and
//! `versioned_uri` derive cache-busting resource identifiers from a body's
//! SHA-256 digest.

pub mod digest;
pub mod provider;

pub use digest::{content_digest, versioned_uri};
pub use provider::{DirectoryContentProvider, StaticContentProvider};
