//! TOML catalog loading.
//!
//! `Catalog` loads a `CatalogConfig` from a TOML string or file and converts
//! it into a populated `Registry`:
//!
//! 1. Resources, in declaration order.
//! 2. Actions, in declaration order.
//! 3. Templates, then prompts.
//!
//! Duplicate identifiers and malformed entries surface as `Err` here;
//! binding and vocabulary checks run later, when the dispatcher is built.

use std::path::Path;

use tracing::debug;

use vitrine_contracts::{
    action::{ActionAnnotations, ActionDescriptor, InvocationHints, Vocabulary},
    error::{VitrineError, VitrineResult},
    prompt::{PromptArgument, PromptDescriptor},
    resource::{ResourceContent, ResourceDescriptor, ResourceTemplateDescriptor},
    schema::{FieldSpec, InputSchema},
};
use vitrine_core::registry::Registry;

use crate::entry::{
    ActionEntry, CatalogConfig, FieldEntry, PromptEntry, ResourceEntry, ServerInfo, TemplateEntry,
    VocabularyEntry,
};

/// A static catalog of everything a server exposes.
///
/// ```rust,ignore
/// use vitrine_catalog::Catalog;
///
/// let registry = Catalog::from_file(Path::new("catalog/solar.toml"))?.into_registry()?;
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    config: CatalogConfig,
}

impl Catalog {
    /// Parse `s` as a TOML catalog.
    ///
    /// Returns `VitrineError::ConfigError` if the TOML is malformed or does
    /// not match the expected `CatalogConfig` schema.
    pub fn from_toml_str(s: &str) -> VitrineResult<Self> {
        let config: CatalogConfig = toml::from_str(s).map_err(|e| VitrineError::ConfigError {
            reason: format!("failed to parse catalog TOML: {}", e),
        })?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a TOML catalog.
    pub fn from_file(path: &Path) -> VitrineResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VitrineError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn server(&self) -> &ServerInfo {
        &self.config.server
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Register every entry into a fresh `Registry`.
    ///
    /// # Errors
    ///
    /// - `ConfigError` for a resource with both or neither of `text` and
    ///   `content_key`
    /// - `DuplicateIdentifier` for a repeated name or uri
    pub fn into_registry(self) -> VitrineResult<Registry> {
        let mut registry = Registry::new();
        let CatalogConfig {
            server,
            resources,
            actions,
            templates,
            prompts,
        } = self.config;

        for entry in resources {
            registry.register(resource_descriptor(entry)?)?;
        }
        for entry in actions {
            registry.register(action_descriptor(entry))?;
        }
        for entry in templates {
            registry.register(template_descriptor(entry))?;
        }
        for entry in prompts {
            registry.register(prompt_descriptor(entry))?;
        }

        debug!(
            server = %server.name,
            actions = registry.actions().len(),
            resources = registry.resources().len(),
            "catalog loaded"
        );
        Ok(registry)
    }
}

// ── Entry conversion ──────────────────────────────────────────────────────────

fn resource_descriptor(entry: ResourceEntry) -> VitrineResult<ResourceDescriptor> {
    let content = match (entry.text, entry.content_key) {
        (Some(text), None) => ResourceContent::Inline { text },
        (None, Some(key)) => ResourceContent::Provided { key },
        (Some(_), Some(_)) => {
            return Err(VitrineError::ConfigError {
                reason: format!(
                    "resource '{}' sets both 'text' and 'content_key'",
                    entry.uri
                ),
            })
        }
        (None, None) => {
            return Err(VitrineError::ConfigError {
                reason: format!(
                    "resource '{}' needs either 'text' or 'content_key'",
                    entry.uri
                ),
            })
        }
    };
    Ok(ResourceDescriptor {
        uri: entry.uri,
        name: entry.name,
        title: entry.title,
        description: entry.description,
        mime_type: entry.mime_type,
        content,
    })
}

fn field_spec(entry: FieldEntry) -> FieldSpec {
    FieldSpec {
        name: entry.name,
        alias: entry.alias,
        kind: entry.kind,
        required: entry.required,
        default: entry.default,
        description: entry.description,
        minimum: entry.minimum,
        maximum: entry.maximum,
        max_length: entry.max_length,
    }
}

fn vocabulary(entry: VocabularyEntry) -> Vocabulary {
    Vocabulary {
        field: entry.field,
        entries: entry.entries,
        aliases: entry.aliases,
        default: entry.default,
        descriptions: entry.descriptions,
        description_field: entry
            .description_field
            .unwrap_or_else(|| "description".to_string()),
    }
}

fn action_descriptor(entry: ActionEntry) -> ActionDescriptor {
    let defaults = InvocationHints::default();
    ActionDescriptor {
        title: entry.title.unwrap_or_else(|| entry.name.clone()),
        name: entry.name,
        description: entry.description,
        input_schema: InputSchema {
            fields: entry.fields.into_iter().map(field_spec).collect(),
        },
        output_resource_ref: entry.output_resource,
        annotations: ActionAnnotations {
            destructive_hint: entry.annotations.destructive,
            idempotent_hint: entry.annotations.idempotent,
            read_only_hint: entry.annotations.read_only,
            open_world_hint: entry.annotations.open_world,
        },
        hints: InvocationHints {
            invoking: entry.invoking.unwrap_or(defaults.invoking),
            invoked: entry.invoked.unwrap_or(defaults.invoked),
            widget_accessible: entry.widget_accessible,
            summary: entry.summary,
        },
        vocabulary: entry.vocabulary.map(vocabulary),
    }
}

fn template_descriptor(entry: TemplateEntry) -> ResourceTemplateDescriptor {
    ResourceTemplateDescriptor {
        uri_template: entry.uri_template,
        name: entry.name,
        title: entry.title,
        description: entry.description,
        mime_type: entry.mime_type,
        body_template: entry.body,
    }
}

fn prompt_descriptor(entry: PromptEntry) -> PromptDescriptor {
    PromptDescriptor {
        name: entry.name,
        title: entry.title,
        description: entry.description,
        arguments: entry
            .arguments
            .into_iter()
            .map(|a| PromptArgument {
                name: a.name,
                description: a.description,
                required: a.required,
                default: a.default,
            })
            .collect(),
        template: entry.template,
    }
}
