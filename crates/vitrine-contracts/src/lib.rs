//! # vitrine-contracts
//!
//! Shared descriptors, request/response types, and errors for the Vitrine
//! action bridge.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, wire metadata keys, and error types.

pub mod action;
pub mod error;
pub mod meta;
pub mod prompt;
pub mod request;
pub mod resource;
pub mod schema;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use action::{ActionDescriptor, InvocationHints};
    use error::{EntityKind, VitrineError};
    use request::{InvocationRequest, Request, Response};
    use resource::{ResourceContent, ResourceDescriptor};
    use schema::{InputSchema, ValidationError};

    fn action(binding: Option<&str>) -> ActionDescriptor {
        ActionDescriptor {
            name: "focus".to_string(),
            title: "Focus".to_string(),
            description: "Center the view".to_string(),
            input_schema: InputSchema::default(),
            output_resource_ref: binding.map(str::to_string),
            annotations: Default::default(),
            hints: InvocationHints::default(),
            vocabulary: None,
        }
    }

    // ── ActionDescriptor ─────────────────────────────────────────────────────

    #[test]
    fn blank_binding_counts_as_unbound() {
        assert_eq!(action(Some("ui://w/1")).binding(), Some("ui://w/1"));
        assert_eq!(action(Some("  ")).binding(), None);
        assert_eq!(action(None).binding(), None);
    }

    #[test]
    fn action_descriptor_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(action(Some("ui://w/1"))).unwrap();
        assert_eq!(json["outputResourceRef"], "ui://w/1");
        assert!(json.get("inputSchema").is_some());
        assert!(json.get("vocabulary").is_none());
    }

    // ── ResourceDescriptor ───────────────────────────────────────────────────

    #[test]
    fn resource_content_is_never_listed() {
        let resource = ResourceDescriptor {
            uri: "ui://w/1".to_string(),
            name: "widget".to_string(),
            title: None,
            description: None,
            mime_type: "text/html+skybridge".to_string(),
            content: ResourceContent::Inline {
                text: "<div></div>".to_string(),
            },
        };
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["mimeType"], "text/html+skybridge");
        assert!(json.get("content").is_none());
    }

    // ── ValidationError ──────────────────────────────────────────────────────

    #[test]
    fn validation_error_groups_messages_by_field() {
        let mut err = ValidationError::new("focus");
        err.push("target", "must be a string");
        err.push("zoom", "unknown field");
        err.push("target", "too long");

        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[0].messages.len(), 2);
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["target", "zoom"]);

        let text = err.to_string();
        assert!(text.contains("'focus'"));
        assert!(text.contains("target: must be a string, too long"));
        assert!(text.contains("zoom: unknown field"));
    }

    // ── Request / Response serde ─────────────────────────────────────────────

    #[test]
    fn request_is_tagged_by_kind() {
        let req: Request = serde_json::from_value(json!({
            "kind": "invoke_action",
            "actionName": "focus",
            "arguments": { "target": "Terra" }
        }))
        .unwrap();
        assert_eq!(
            req,
            Request::InvokeAction(InvocationRequest::new("focus", json!({ "target": "Terra" })))
        );

        let req: Request = serde_json::from_value(json!({ "kind": "enumerate_actions" })).unwrap();
        assert_eq!(req, Request::EnumerateActions);
    }

    #[test]
    fn not_found_response_round_trips() {
        let original = Response::NotFound {
            kind: EntityKind::Prompt,
            key: "missing".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }

    // ── VitrineError display messages ────────────────────────────────────────

    #[test]
    fn error_duplicate_identifier_display() {
        let err = VitrineError::DuplicateIdentifier {
            kind: EntityKind::ResourceTemplate,
            key: "user://{id}".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate resource template identifier 'user://{id}'");
    }

    #[test]
    fn error_unresolved_binding_display() {
        let err = VitrineError::UnresolvedBinding {
            action: "focus".to_string(),
            reference: "ui://w/404".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("focus"));
        assert!(msg.contains("ui://w/404"));
    }

    #[test]
    fn error_unresolved_identifier_lists_vocabulary_in_order() {
        let err = VitrineError::UnresolvedIdentifier {
            field: "target".to_string(),
            raw: "Pluto".to_string(),
            vocabulary: vec!["Mercury".to_string(), "Venus".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown target 'Pluto'; valid options: Mercury, Venus"
        );
    }

    #[test]
    fn error_validation_is_transparent() {
        let mut inner = ValidationError::new("focus");
        inner.push("zoom", "unknown field");
        let err = VitrineError::from(inner);
        assert!(err.to_string().starts_with("invalid arguments for 'focus'"));
    }
}
