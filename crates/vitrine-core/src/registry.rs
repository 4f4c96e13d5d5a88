//! The content registry: immutable descriptors keyed by stable identifiers.
//!
//! Each table keeps registration order. Enumeration results are
//! caller-visible and hosts may cache the first listing forever, so `list`
//! order never changes for the lifetime of the process.

use std::collections::HashMap;

use tracing::debug;

use vitrine_contracts::{
    action::ActionDescriptor,
    error::{EntityKind, VitrineError, VitrineResult},
    prompt::PromptDescriptor,
    resource::{ResourceDescriptor, ResourceTemplateDescriptor},
};

/// Any descriptor the registry can hold.
#[derive(Debug, Clone)]
pub enum Descriptor {
    Action(ActionDescriptor),
    Resource(ResourceDescriptor),
    ResourceTemplate(ResourceTemplateDescriptor),
    Prompt(PromptDescriptor),
}

impl From<ActionDescriptor> for Descriptor {
    fn from(d: ActionDescriptor) -> Self {
        Descriptor::Action(d)
    }
}

impl From<ResourceDescriptor> for Descriptor {
    fn from(d: ResourceDescriptor) -> Self {
        Descriptor::Resource(d)
    }
}

impl From<ResourceTemplateDescriptor> for Descriptor {
    fn from(d: ResourceTemplateDescriptor) -> Self {
        Descriptor::ResourceTemplate(d)
    }
}

impl From<PromptDescriptor> for Descriptor {
    fn from(d: PromptDescriptor) -> Self {
        Descriptor::Prompt(d)
    }
}

/// An insertion-ordered table with a key index.
#[derive(Debug)]
struct Table<T> {
    kind: EntityKind,
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Table<T> {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, key: String, item: T) -> VitrineResult<()> {
        if self.index.contains_key(&key) {
            return Err(VitrineError::DuplicateIdentifier {
                kind: self.kind,
                key,
            });
        }
        debug!(kind = %self.kind, key = %key, "registered descriptor");
        self.index.insert(key, self.entries.len());
        self.entries.push(item);
        Ok(())
    }

    fn get(&self, key: &str) -> VitrineResult<&T> {
        self.index
            .get(key)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| VitrineError::NotFound {
                kind: self.kind,
                key: key.to_string(),
            })
    }

    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }
}

/// Holds every action, resource, resource template, and prompt.
///
/// Populated at startup through `register`, then moved into the dispatcher,
/// which only ever reads it.
#[derive(Debug)]
pub struct Registry {
    actions: Table<ActionDescriptor>,
    resources: Table<ResourceDescriptor>,
    templates: Table<ResourceTemplateDescriptor>,
    prompts: Table<PromptDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            actions: Table::new(EntityKind::Action),
            resources: Table::new(EntityKind::Resource),
            templates: Table::new(EntityKind::ResourceTemplate),
            prompts: Table::new(EntityKind::Prompt),
        }
    }

    /// Insert `descriptor` under its identity key.
    ///
    /// Returns `VitrineError::DuplicateIdentifier` if the key is taken within
    /// the descriptor's table. Tables are independent: an action and a prompt
    /// may share a name.
    pub fn register(&mut self, descriptor: impl Into<Descriptor>) -> VitrineResult<()> {
        match descriptor.into() {
            Descriptor::Action(d) => self.actions.insert(d.name.clone(), d),
            Descriptor::Resource(d) => self.resources.insert(d.uri.clone(), d),
            Descriptor::ResourceTemplate(d) => self.templates.insert(d.uri_template.clone(), d),
            Descriptor::Prompt(d) => self.prompts.insert(d.name.clone(), d),
        }
    }

    /// Whether `key` is registered in the `kind` table.
    pub fn contains(&self, kind: EntityKind, key: &str) -> bool {
        match kind {
            EntityKind::Action => self.actions.contains(key),
            EntityKind::Resource => self.resources.contains(key),
            EntityKind::ResourceTemplate => self.templates.contains(key),
            EntityKind::Prompt => self.prompts.contains(key),
        }
    }

    /// Look up a descriptor of any kind.
    pub fn get(&self, kind: EntityKind, key: &str) -> VitrineResult<Descriptor> {
        Ok(match kind {
            EntityKind::Action => Descriptor::Action(self.action(key)?.clone()),
            EntityKind::Resource => Descriptor::Resource(self.resource(key)?.clone()),
            EntityKind::ResourceTemplate => {
                Descriptor::ResourceTemplate(self.template(key)?.clone())
            }
            EntityKind::Prompt => Descriptor::Prompt(self.prompt(key)?.clone()),
        })
    }

    pub fn action(&self, name: &str) -> VitrineResult<&ActionDescriptor> {
        self.actions.get(name)
    }

    pub fn resource(&self, uri: &str) -> VitrineResult<&ResourceDescriptor> {
        self.resources.get(uri)
    }

    pub fn template(&self, uri_template: &str) -> VitrineResult<&ResourceTemplateDescriptor> {
        self.templates.get(uri_template)
    }

    pub fn prompt(&self, name: &str) -> VitrineResult<&PromptDescriptor> {
        self.prompts.get(name)
    }

    /// Actions in registration order.
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions.entries
    }

    /// Resources in registration order.
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources.entries
    }

    /// Resource templates in registration order.
    pub fn templates(&self) -> &[ResourceTemplateDescriptor] {
        &self.templates.entries
    }

    /// Prompts in registration order.
    pub fn prompts(&self) -> &[PromptDescriptor] {
        &self.prompts.entries
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
