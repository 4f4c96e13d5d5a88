//! Resource and resource-template descriptors.
//!
//! A resource is one fixed unit of content addressed by an opaque `uri`.
//! A template describes a family of resources (`user://{user_id}/profile`)
//! and is enumerated separately from concrete resources.

use serde::{Deserialize, Serialize};

/// One registered resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// Caller-assigned opaque identifier, unique within the registry.
    ///
    /// Hosts cache content by uri; publishing new content means registering
    /// it under a new uri.
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mime_type: String,
    /// Where the body comes from. Never listed on the wire.
    #[serde(skip_serializing, default)]
    pub content: ResourceContent,
}

/// Source of a resource body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ResourceContent {
    /// The body is held directly in the descriptor.
    Inline { text: String },
    /// The body is fetched from the content provider under `key` on first
    /// use and memoized for the lifetime of the process.
    Provided { key: String },
}

impl Default for ResourceContent {
    fn default() -> Self {
        ResourceContent::Inline {
            text: String::new(),
        }
    }
}

/// A parametrized family of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplateDescriptor {
    /// Uri pattern with `{placeholder}` segments.
    pub uri_template: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mime_type: String,
    /// Body rendered for matching reads; the same placeholders as
    /// `uri_template` are substituted. Templates without a body are listed
    /// but cannot be read.
    #[serde(skip_serializing, default)]
    pub body_template: Option<String>,
}

/// The body of one resource as returned by a read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}
