//! The result composer: validated payload → invocation result.
//!
//! Composition order:
//!
//!   Normalize identifier → Structured content → Metadata → Text summary
//!
//! An identifier that does not resolve ends composition early with an
//! error-flagged result listing the vocabulary. That is a user-facing
//! answer, never a fault.
//!
//! An action may also carry a result handler. It runs after normalization
//! and its keys are merged into the structured content, where the summary
//! template can reference them.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use vitrine_contracts::{
    action::ActionDescriptor,
    error::{VitrineError, VitrineResult},
    meta,
    request::{FailureKind, InvocationResult},
    schema::{FieldValue, ValidatedPayload},
};

use crate::{
    cache::ContentCache,
    normalizer::{normalize_in, NormalizedIdentifier},
    registry::Registry,
    template::render,
};

/// Metadata every listing and result of `action` carries.
///
/// Always includes the in-flight / completed labels. Bound actions also get
/// the output template uri and the widget flags.
pub fn hint_metadata(action: &ActionDescriptor) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert(meta::INVOKING.to_string(), json!(action.hints.invoking));
    out.insert(meta::INVOKED.to_string(), json!(action.hints.invoked));
    if let Some(uri) = action.binding() {
        out.insert(meta::OUTPUT_TEMPLATE.to_string(), json!(uri));
        out.insert(
            meta::WIDGET_ACCESSIBLE.to_string(),
            json!(action.hints.widget_accessible),
        );
        out.insert(meta::RESULT_CAN_PRODUCE_WIDGET.to_string(), json!(true));
    }
    out
}

/// Computes extra structured content for one action from its validated
/// (and normalized) payload.
pub type ActionHandler =
    Box<dyn Fn(&ValidatedPayload) -> VitrineResult<Map<String, Value>> + Send + Sync>;

/// Builds invocation results from validated payloads.
pub struct Composer {
    registry: Arc<Registry>,
    cache: Arc<ContentCache>,
    handlers: HashMap<String, ActionHandler>,
}

impl Composer {
    pub fn new(registry: Arc<Registry>, cache: Arc<ContentCache>) -> Self {
        Self {
            registry,
            cache,
            handlers: HashMap::new(),
        }
    }

    /// Result handlers keyed by action name.
    pub fn with_handlers(mut self, handlers: HashMap<String, ActionHandler>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Compose the response to one invocation of `action`.
    ///
    /// Never fails: unresolved identifiers and unavailable widget content
    /// become error-flagged results with `failure` set.
    pub fn compose(&self, action: &ActionDescriptor, payload: &ValidatedPayload) -> InvocationResult {
        match self.try_compose(action, payload) {
            Ok(result) => result,
            Err(err) => {
                let kind = match &err {
                    VitrineError::UnresolvedIdentifier { .. } => FailureKind::UnresolvedIdentifier,
                    VitrineError::NotFound { .. } => FailureKind::NotFound,
                    VitrineError::ActionFailed { .. } => FailureKind::ActionFailed,
                    _ => FailureKind::ContentUnavailable,
                };
                warn!(action = %action.name, error = %err, "composition failed");
                InvocationResult::failure(kind, capitalize(&err.to_string()))
            }
        }
    }

    fn try_compose(
        &self,
        action: &ActionDescriptor,
        payload: &ValidatedPayload,
    ) -> VitrineResult<InvocationResult> {
        // ── Step 1: Identifier resolution ────────────────────────────────────
        let resolved = match &action.vocabulary {
            Some(vocab) => {
                let raw = payload.text(&vocab.field).unwrap_or_default();
                match normalize_in(raw, vocab) {
                    NormalizedIdentifier::Canonical(c) => {
                        debug!(action = %action.name, raw = %raw, canonical = %c, "identifier resolved");
                        Some(c)
                    }
                    NormalizedIdentifier::Unresolved => {
                        return Err(VitrineError::UnresolvedIdentifier {
                            field: vocab.field.clone(),
                            raw: raw.to_string(),
                            vocabulary: vocab.entries.clone(),
                        });
                    }
                }
            }
            None => None,
        };

        // ── Step 2: Structured content ───────────────────────────────────────
        let mut structured = Map::new();
        match (&action.vocabulary, &resolved) {
            (Some(vocab), Some(canonical)) => {
                structured.insert(vocab.field.clone(), json!(canonical));
                if let Some(text) = vocab.descriptions.get(canonical).filter(|t| !t.is_empty()) {
                    structured.insert(vocab.description_field.clone(), json!(text));
                }
                for (name, value) in &payload.fields {
                    if let FieldValue::Flag(flag) = value {
                        structured.insert(name.clone(), json!(flag));
                    }
                }
            }
            _ => {
                for (name, value) in &payload.fields {
                    structured.insert(name.clone(), Value::from(value));
                }
            }
        }

        if let Some(handler) = self.handlers.get(&action.name) {
            let mut normalized = payload.clone();
            if let (Some(vocab), Some(canonical)) = (&action.vocabulary, &resolved) {
                normalized
                    .fields
                    .insert(vocab.field.clone(), FieldValue::Text(canonical.clone()));
            }
            let extra = handler(&normalized)?;
            debug!(action = %action.name, keys = extra.len(), "result handler applied");
            structured.extend(extra);
        }

        // ── Step 3: Metadata ─────────────────────────────────────────────────
        let mut metadata = hint_metadata(action);
        if let Some(uri) = action.binding() {
            let resource = self.registry.resource(uri)?;
            let body = self.cache.fetch(resource).map_err(|e| match e {
                VitrineError::ContentUnavailable { .. } => e,
                other => VitrineError::ContentUnavailable {
                    key: uri.to_string(),
                    reason: other.to_string(),
                },
            })?;
            metadata.insert(
                meta::EMBEDDED_WIDGET.to_string(),
                json!({
                    "type": "resource",
                    "resource": body.to_contents(),
                }),
            );
        }

        // ── Step 4: Text summary ─────────────────────────────────────────────
        let text_summary = summarize(action, resolved.as_deref(), &structured);

        Ok(InvocationResult {
            text_summary,
            structured_content: Some(structured),
            metadata,
            is_error: false,
            failure: None,
        })
    }
}

fn summarize(
    action: &ActionDescriptor,
    resolved: Option<&str>,
    structured: &Map<String, Value>,
) -> String {
    let mut values: BTreeMap<String, String> = structured
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(_) | Value::Bool(_) => value.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect();
    values.insert("title".to_string(), action.title.clone());
    values.insert("value".to_string(), resolved.unwrap_or_default().to_string());

    match (&action.hints.summary, resolved) {
        (Some(template), _) => render(template, &values),
        (None, Some(value)) => format!("{}: {}", action.title, value),
        (None, None) => format!("{} completed", action.title),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
