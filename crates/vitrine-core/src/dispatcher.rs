//! The Vitrine dispatcher: the single protocol entry point.
//!
//! Every request kind has one handler slot. Slots start out holding the
//! standard handlers below and may be replaced while the dispatcher is being
//! built; after `build()` nothing about the dispatcher changes.
//!
//!   Request → slot → { registry read | validate → compose | cache read } → Response
//!
//! Per-request failures are always captured in the `Response`. Only startup
//! defects (bad bindings, uncompilable schemas, missing collaborators) are
//! returned as `Err`, from `DispatcherBuilder::build`.

use std::{collections::HashMap, sync::Arc};

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use vitrine_contracts::{
    error::{EntityKind, VitrineError, VitrineResult},
    meta,
    prompt::PromptDescriptor,
    request::{
        ActionListing, FailureKind, InvocationId, InvocationRequest, InvocationResult,
        ReadResourceResult, Request, Response,
    },
    resource::{ResourceContents, ResourceDescriptor, ResourceTemplateDescriptor},
    schema::ValidatedPayload,
};

use crate::{
    binding::resolve_bindings,
    cache::ContentCache,
    composer::{hint_metadata, ActionHandler, Composer},
    prompt::render_prompt,
    registry::Registry,
    template::{match_uri, render},
    traits::{ContentProvider, InputValidator, SchemaDescriber},
};

/// Everything a handler may read. Immutable once built.
pub struct DispatchContext {
    registry: Arc<Registry>,
    cache: Arc<ContentCache>,
    validator: Box<dyn InputValidator>,
    composer: Composer,
    listings: Vec<ActionListing>,
}

impl DispatchContext {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn validator(&self) -> &dyn InputValidator {
        self.validator.as_ref()
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Action listings with described input schemas, in registration order.
    pub fn listings(&self) -> &[ActionListing] {
        &self.listings
    }
}

pub type EnumerateActionsHandler = Box<dyn Fn(&DispatchContext) -> Vec<ActionListing> + Send + Sync>;
pub type EnumerateResourcesHandler =
    Box<dyn Fn(&DispatchContext) -> Vec<ResourceDescriptor> + Send + Sync>;
pub type EnumerateTemplatesHandler =
    Box<dyn Fn(&DispatchContext) -> Vec<ResourceTemplateDescriptor> + Send + Sync>;
pub type EnumeratePromptsHandler =
    Box<dyn Fn(&DispatchContext) -> Vec<PromptDescriptor> + Send + Sync>;
pub type ReadResourceHandler =
    Box<dyn Fn(&DispatchContext, &str) -> ReadResourceResult + Send + Sync>;
pub type InvokeActionHandler =
    Box<dyn Fn(&DispatchContext, &InvocationRequest) -> InvocationResult + Send + Sync>;
pub type GetPromptHandler =
    Box<dyn Fn(&DispatchContext, &str, &Map<String, Value>) -> Response + Send + Sync>;

/// One named slot per request kind.
struct HandlerSlots {
    enumerate_actions: EnumerateActionsHandler,
    enumerate_resources: EnumerateResourcesHandler,
    enumerate_templates: EnumerateTemplatesHandler,
    enumerate_prompts: EnumeratePromptsHandler,
    read_resource: ReadResourceHandler,
    invoke_action: InvokeActionHandler,
    get_prompt: GetPromptHandler,
}

impl Default for HandlerSlots {
    fn default() -> Self {
        Self {
            enumerate_actions: Box::new(enumerate_actions),
            enumerate_resources: Box::new(enumerate_resources),
            enumerate_templates: Box::new(enumerate_templates),
            enumerate_prompts: Box::new(enumerate_prompts),
            read_resource: Box::new(read_resource),
            invoke_action: Box::new(invoke_action),
            get_prompt: Box::new(get_prompt),
        }
    }
}

// ── Standard handlers ─────────────────────────────────────────────────────────

/// Standard `EnumerateActions` handler: every action, registration order.
pub fn enumerate_actions(ctx: &DispatchContext) -> Vec<ActionListing> {
    ctx.listings.clone()
}

/// Standard `EnumerateResources` handler.
pub fn enumerate_resources(ctx: &DispatchContext) -> Vec<ResourceDescriptor> {
    ctx.registry.resources().to_vec()
}

/// Standard `EnumerateResourceTemplates` handler.
pub fn enumerate_templates(ctx: &DispatchContext) -> Vec<ResourceTemplateDescriptor> {
    ctx.registry.templates().to_vec()
}

/// Standard `EnumeratePrompts` handler.
pub fn enumerate_prompts(ctx: &DispatchContext) -> Vec<PromptDescriptor> {
    ctx.registry.prompts().to_vec()
}

/// Standard `ReadResource` handler.
///
/// Resolution order: exact resource uri, then the first readable template
/// (registration order) whose pattern matches. A miss, or a body that cannot
/// be loaded, is an empty success with `meta::READ_ERROR` explaining why.
pub fn read_resource(ctx: &DispatchContext, uri: &str) -> ReadResourceResult {
    if let Ok(resource) = ctx.registry.resource(uri) {
        return match ctx.cache.fetch(resource) {
            Ok(body) => ReadResourceResult {
                contents: vec![body.to_contents()],
                meta: Map::new(),
            },
            Err(err) => {
                warn!(uri = %uri, error = %err, "resource body unavailable");
                read_miss(err.to_string())
            }
        };
    }

    for template in ctx.registry.templates() {
        let Some(body) = &template.body_template else {
            continue;
        };
        if let Some(values) = match_uri(&template.uri_template, uri) {
            debug!(uri = %uri, template = %template.uri_template, "read served by template");
            return ReadResourceResult {
                contents: vec![ResourceContents {
                    uri: uri.to_string(),
                    mime_type: template.mime_type.clone(),
                    text: render(body, &values),
                }],
                meta: Map::new(),
            };
        }
    }

    debug!(uri = %uri, "read missed every resource and template");
    read_miss(format!("no resource registered for uri '{uri}'"))
}

fn read_miss(reason: String) -> ReadResourceResult {
    let mut meta = Map::new();
    meta.insert(meta::READ_ERROR.to_string(), json!(reason));
    ReadResourceResult {
        contents: Vec::new(),
        meta,
    }
}

/// Standard `InvokeAction` handler.
///
/// Unknown action → `FailureKind::NotFound`. Bad arguments →
/// `FailureKind::Validation` with every field-scoped message in the text.
/// Otherwise the composer's result.
pub fn invoke_action(ctx: &DispatchContext, request: &InvocationRequest) -> InvocationResult {
    let invocation_id = InvocationId::new();

    let action = match ctx.registry.action(&request.action_name) {
        Ok(action) => action,
        Err(_) => {
            warn!(
                invocation_id = %invocation_id.0,
                action = %request.action_name,
                "invocation of unknown action"
            );
            let known: Vec<&str> = ctx.registry.actions().iter().map(|a| a.name.as_str()).collect();
            return InvocationResult::failure(
                FailureKind::NotFound,
                format!(
                    "Unknown action '{}'. Available actions: {}",
                    request.action_name,
                    known.join(", ")
                ),
            );
        }
    };

    debug!(
        invocation_id = %invocation_id.0,
        action = %action.name,
        "invocation starting"
    );

    let payload = match ctx.validator.validate(action, &request.arguments) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(
                invocation_id = %invocation_id.0,
                action = %action.name,
                violations = err.violations.len(),
                "invocation arguments rejected"
            );
            return InvocationResult::failure(FailureKind::Validation, err.to_string());
        }
    };

    let result = ctx.composer.compose(action, &payload);
    info!(
        invocation_id = %invocation_id.0,
        action = %action.name,
        is_error = result.is_error,
        "invocation complete"
    );
    result
}

/// Standard `GetPrompt` handler.
pub fn get_prompt(ctx: &DispatchContext, name: &str, arguments: &Map<String, Value>) -> Response {
    let prompt = match ctx.registry.prompt(name) {
        Ok(prompt) => prompt,
        Err(_) => {
            return Response::NotFound {
                kind: EntityKind::Prompt,
                key: name.to_string(),
            }
        }
    };
    match render_prompt(prompt, arguments) {
        Ok(rendered) => Response::Prompt(rendered),
        Err(err) => Response::Failed {
            message: err.to_string(),
        },
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Assembles a `Dispatcher` and runs the startup checks.
pub struct DispatcherBuilder {
    registry: Registry,
    provider: Option<Box<dyn ContentProvider>>,
    describer: Option<Box<dyn SchemaDescriber>>,
    validator: Option<Box<dyn InputValidator>>,
    action_handlers: HashMap<String, ActionHandler>,
    slots: HandlerSlots,
}

impl DispatcherBuilder {
    /// Source for `ResourceContent::Provided` bodies. Without one, only
    /// inline content can be served.
    pub fn content_provider(mut self, provider: Box<dyn ContentProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Required.
    pub fn schema_describer(mut self, describer: Box<dyn SchemaDescriber>) -> Self {
        self.describer = Some(describer);
        self
    }

    /// Required.
    pub fn validator(mut self, validator: Box<dyn InputValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Attach a result handler to the action called `name`. Its output is
    /// merged into that action's structured content after normalization.
    pub fn action_handler(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&ValidatedPayload) -> VitrineResult<Map<String, Value>> + Send + Sync + 'static,
    ) -> Self {
        self.action_handlers.insert(name.into(), Box::new(f));
        self
    }

    pub fn on_enumerate_actions(
        mut self,
        f: impl Fn(&DispatchContext) -> Vec<ActionListing> + Send + Sync + 'static,
    ) -> Self {
        self.slots.enumerate_actions = Box::new(f);
        self
    }

    pub fn on_enumerate_resources(
        mut self,
        f: impl Fn(&DispatchContext) -> Vec<ResourceDescriptor> + Send + Sync + 'static,
    ) -> Self {
        self.slots.enumerate_resources = Box::new(f);
        self
    }

    pub fn on_enumerate_templates(
        mut self,
        f: impl Fn(&DispatchContext) -> Vec<ResourceTemplateDescriptor> + Send + Sync + 'static,
    ) -> Self {
        self.slots.enumerate_templates = Box::new(f);
        self
    }

    pub fn on_enumerate_prompts(
        mut self,
        f: impl Fn(&DispatchContext) -> Vec<PromptDescriptor> + Send + Sync + 'static,
    ) -> Self {
        self.slots.enumerate_prompts = Box::new(f);
        self
    }

    pub fn on_read_resource(
        mut self,
        f: impl Fn(&DispatchContext, &str) -> ReadResourceResult + Send + Sync + 'static,
    ) -> Self {
        self.slots.read_resource = Box::new(f);
        self
    }

    pub fn on_invoke_action(
        mut self,
        f: impl Fn(&DispatchContext, &InvocationRequest) -> InvocationResult + Send + Sync + 'static,
    ) -> Self {
        self.slots.invoke_action = Box::new(f);
        self
    }

    pub fn on_get_prompt(
        mut self,
        f: impl Fn(&DispatchContext, &str, &Map<String, Value>) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.slots.get_prompt = Box::new(f);
        self
    }

    /// Run the startup checks and freeze the dispatcher.
    ///
    /// # Errors
    ///
    /// - `UnresolvedBinding` / `ConfigError` from binding resolution
    /// - `ConfigError` when no describer or validator was supplied, or a
    ///   result handler names an unregistered action
    /// - whatever the validator's `prepare` or the describer reports
    pub fn build(self) -> VitrineResult<Dispatcher> {
        let bindings = resolve_bindings(&self.registry)?;

        if let Some(name) = self
            .action_handlers
            .keys()
            .find(|name| !self.registry.contains(EntityKind::Action, name))
        {
            return Err(VitrineError::ConfigError {
                reason: format!("result handler for unknown action '{name}'"),
            });
        }

        let describer = self.describer.ok_or_else(|| VitrineError::ConfigError {
            reason: "dispatcher requires a schema describer".to_string(),
        })?;
        let mut validator = self.validator.ok_or_else(|| VitrineError::ConfigError {
            reason: "dispatcher requires an input validator".to_string(),
        })?;
        validator.prepare(&self.registry, describer.as_ref())?;

        let listings = self
            .registry
            .actions()
            .iter()
            .map(|action| {
                Ok(ActionListing {
                    name: action.name.clone(),
                    title: action.title.clone(),
                    description: action.description.clone(),
                    input_schema: describer.describe(&action.input_schema)?,
                    annotations: action.annotations.clone(),
                    meta: hint_metadata(action),
                })
            })
            .collect::<VitrineResult<Vec<_>>>()?;

        let cache = Arc::new(match self.provider {
            Some(provider) => ContentCache::new(provider),
            None => ContentCache::inline_only(),
        });
        let registry = Arc::new(self.registry);

        info!(
            actions = registry.actions().len(),
            resources = registry.resources().len(),
            templates = registry.templates().len(),
            prompts = registry.prompts().len(),
            bindings = bindings.len(),
            handlers = self.action_handlers.len(),
            "dispatcher ready"
        );

        Ok(Dispatcher {
            ctx: DispatchContext {
                composer: Composer::new(Arc::clone(&registry), Arc::clone(&cache))
                    .with_handlers(self.action_handlers),
                registry,
                cache,
                validator,
                listings,
            },
            slots: self.slots,
        })
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Routes requests to their handler slot.
///
/// `Send + Sync`: share one dispatcher across threads behind an `Arc`.
pub struct Dispatcher {
    ctx: DispatchContext,
    slots: HandlerSlots,
}

impl Dispatcher {
    pub fn builder(registry: Registry) -> DispatcherBuilder {
        DispatcherBuilder {
            registry,
            provider: None,
            describer: None,
            validator: None,
            action_handlers: HashMap::new(),
            slots: HandlerSlots::default(),
        }
    }

    /// Serve one request. Never panics on bad input and never returns `Err`.
    pub fn dispatch(&self, request: Request) -> Response {
        let slots = &self.slots;
        let ctx = &self.ctx;
        match request {
            Request::EnumerateActions => Response::Actions((slots.enumerate_actions)(ctx)),
            Request::EnumerateResources => Response::Resources((slots.enumerate_resources)(ctx)),
            Request::EnumerateResourceTemplates => {
                Response::ResourceTemplates((slots.enumerate_templates)(ctx))
            }
            Request::EnumeratePrompts => Response::Prompts((slots.enumerate_prompts)(ctx)),
            Request::ReadResource { uri } => Response::Resource((slots.read_resource)(ctx, &uri)),
            Request::InvokeAction(req) => Response::Invocation((slots.invoke_action)(ctx, &req)),
            Request::GetPrompt { name, arguments } => (slots.get_prompt)(ctx, &name, &arguments),
        }
    }

    /// Shorthand for `dispatch(Request::InvokeAction(..))`.
    pub fn invoke(&self, action_name: &str, arguments: Value) -> InvocationResult {
        (self.slots.invoke_action)(&self.ctx, &InvocationRequest::new(action_name, arguments))
    }

    /// Shorthand for `dispatch(Request::ReadResource { .. })`.
    pub fn read(&self, uri: &str) -> ReadResourceResult {
        (self.slots.read_resource)(&self.ctx, uri)
    }

    pub fn context(&self) -> &DispatchContext {
        &self.ctx
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
