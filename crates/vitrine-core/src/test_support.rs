//! Shared fixtures for the in-crate tests.

use std::collections::BTreeMap;

use serde_json::json;

use vitrine_contracts::{
    action::{ActionDescriptor, InvocationHints, Vocabulary},
    resource::{ResourceContent, ResourceDescriptor},
    schema::{FieldKind, FieldSpec, InputSchema},
};

pub(crate) fn action(name: &str, binding: Option<&str>) -> ActionDescriptor {
    ActionDescriptor {
        name: name.to_string(),
        title: name.to_string(),
        description: format!("{name} action"),
        input_schema: InputSchema::default(),
        output_resource_ref: binding.map(str::to_string),
        annotations: Default::default(),
        hints: InvocationHints::default(),
        vocabulary: None,
    }
}

pub(crate) fn resource(uri: &str) -> ResourceDescriptor {
    ResourceDescriptor {
        uri: uri.to_string(),
        name: uri.to_string(),
        title: None,
        description: None,
        mime_type: "text/html+skybridge".to_string(),
        content: ResourceContent::Inline {
            text: format!("<div data-uri=\"{uri}\"></div>"),
        },
    }
}

pub(crate) fn planet_vocabulary() -> Vocabulary {
    let entries: Vec<String> = [
        "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let aliases: BTreeMap<String, String> = [
        ("terra", "Earth"),
        ("gaia", "Earth"),
        ("red planet", "Mars"),
        ("morning star", "Venus"),
    ]
    .iter()
    .map(|(a, t)| (a.to_string(), t.to_string()))
    .collect();

    let mut descriptions = BTreeMap::new();
    descriptions.insert("Earth".to_string(), "Our home world.".to_string());
    descriptions.insert("Mars".to_string(), "The red planet.".to_string());
    descriptions.insert("Venus".to_string(), String::new());

    Vocabulary {
        field: "target".to_string(),
        entries,
        aliases,
        default: "Earth".to_string(),
        descriptions,
        description_field: "description".to_string(),
    }
}

/// The `focus` action: a `target` identifier (alias `planet`) and an
/// `auto_orbit` flag defaulting to false, bound to `uri`.
pub(crate) fn focus_action(uri: &str) -> ActionDescriptor {
    let mut target = FieldSpec::new("target", FieldKind::String);
    target.alias = Some("planet".to_string());

    let mut auto_orbit = FieldSpec::new("auto_orbit", FieldKind::Boolean);
    auto_orbit.default = Some(json!(false));

    ActionDescriptor {
        name: "focus".to_string(),
        title: "Focus planet".to_string(),
        description: "Center the solar system view on a planet".to_string(),
        input_schema: InputSchema {
            fields: vec![target, auto_orbit],
        },
        output_resource_ref: Some(uri.to_string()),
        annotations: Default::default(),
        hints: InvocationHints {
            invoking: "Charting a course".to_string(),
            invoked: "Arrived".to_string(),
            widget_accessible: true,
            summary: Some("Centered the view on {value}.".to_string()),
        },
        vocabulary: Some(planet_vocabulary()),
    }
}
