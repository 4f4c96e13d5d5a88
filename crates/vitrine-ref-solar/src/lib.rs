//! # vitrine-ref-solar
//!
//! Reference deployment of the Vitrine action bridge: a solar system
//! explorer widget.
//!
//! - **`focus`**: centers the widget on a planet. Accepts aliases
//!   ("Terra", "red planet") and prefixes ("jup"); unknown names get an
//!   error listing every planet.
//! - **`add`**: sums two integers, reporting `{"result": a + b}`.
//! - **`file://config.json`**: a static JSON document.
//! - **`user://{user_id}/profile`**: a templated profile document.
//! - **`code_review`**: a prompt parametrized by language.
//!
//! Everything is declared in `catalog/solar.toml`; nothing here is
//! hand-registered. The only code attached to a declaration is the result
//! handler behind `add`.

pub mod deployment;
pub mod scenarios;

pub use deployment::{solar_dispatcher, solar_dispatcher_from};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use serde_json::{json, Map};

    use vitrine_contracts::{
        error::{EntityKind, VitrineError},
        meta,
        request::{FailureKind, Request, Response},
        schema::{FieldValue, ValidatedPayload},
    };

    use crate::deployment::{
        add_numbers, solar_catalog, solar_dispatcher, versioned_widget_uri, WIDGET_URI,
    };

    // ── End to end ───────────────────────────────────────────────────────────

    #[test]
    fn test_alias_focuses_earth_with_widget_metadata() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("focus", json!({ "target": "Terra" }));

        assert!(!result.is_error, "{}", result.text_summary);
        let content = result.structured_content.unwrap();
        assert_eq!(content["target"], "Earth");
        assert_eq!(
            content["planet_description"],
            "Our home world, the only planet known to host life."
        );
        assert_eq!(content["auto_orbit"], false);
        assert_eq!(result.metadata[meta::OUTPUT_TEMPLATE], WIDGET_URI);
        assert_eq!(result.metadata[meta::INVOKING], "Charting a course");
        assert_eq!(result.metadata[meta::INVOKED], "Arrived");
        assert_eq!(
            result.metadata[meta::EMBEDDED_WIDGET]["resource"]["uri"],
            WIDGET_URI
        );
        assert!(result.metadata[meta::EMBEDDED_WIDGET]["resource"]["text"]
            .as_str()
            .unwrap()
            .contains("solar-root"));
        assert_eq!(result.text_summary, "Centered the solar system view on Earth.");
    }

    #[test]
    fn test_unknown_planet_lists_every_planet() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("focus", json!({ "target": "Pluto" }));

        assert!(result.is_error);
        assert_eq!(result.failure, Some(FailureKind::UnresolvedIdentifier));
        assert!(result.text_summary.contains("Pluto"));
        for planet in [
            "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        ] {
            assert!(result.text_summary.contains(planet), "missing {planet}");
        }
    }

    #[test]
    fn test_unregistered_action_is_not_found() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("warp", json!({ "target": "Mars" }));
        assert!(result.is_error);
        assert_eq!(result.failure, Some(FailureKind::NotFound));
        assert!(result.text_summary.contains("focus"));
    }

    #[test]
    fn test_alias_field_prefix_and_flag() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("focus", json!({ "planet": "jup", "auto_orbit": true }));
        let content = result.structured_content.unwrap();
        assert_eq!(content["target"], "Jupiter");
        assert_eq!(content["auto_orbit"], true);
    }

    #[test]
    fn test_spaced_alias_and_blank_default() {
        let d = solar_dispatcher().unwrap();
        let mars = d.invoke("focus", json!({ "target": "Red Planet" }));
        assert_eq!(mars.structured_content.unwrap()["target"], "Mars");

        let blank = d.invoke("focus", json!({}));
        assert_eq!(blank.structured_content.unwrap()["target"], "Earth");
    }

    #[test]
    fn test_unknown_field_is_a_validation_failure() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("focus", json!({ "target": "Mars", "zoom": 3 }));
        assert!(result.is_error);
        assert_eq!(result.failure, Some(FailureKind::Validation));
        assert!(result.text_summary.contains("zoom"));
    }

    #[test]
    fn test_wrong_flag_type_is_a_validation_failure() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("focus", json!({ "target": "Mars", "auto_orbit": "yes" }));
        assert_eq!(result.failure, Some(FailureKind::Validation));
        assert!(result.text_summary.contains("auto_orbit"));
    }

    #[test]
    fn test_add_reports_sum() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("add", json!({ "a": 2, "b": 3 }));

        assert!(!result.is_error, "{}", result.text_summary);
        let content = result.structured_content.unwrap();
        assert_eq!(content["result"], 5);
        assert_eq!(content["a"], 2);
        assert_eq!(content["b"], 3);
        assert_eq!(result.text_summary, "2 + 3 = 5");
        assert!(result.metadata.get(meta::OUTPUT_TEMPLATE).is_none());
        assert!(result.metadata.get(meta::EMBEDDED_WIDGET).is_none());
        assert_eq!(result.metadata[meta::INVOKED], "Added");
    }

    #[test]
    fn test_add_negative_operands() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("add", json!({ "a": -7, "b": 4 }));
        assert_eq!(result.structured_content.unwrap()["result"], -3);
        assert_eq!(result.text_summary, "-7 + 4 = -3");
    }

    #[test]
    fn test_add_overflow_is_an_action_failure() {
        let d = solar_dispatcher().unwrap();
        let result = d.invoke("add", json!({ "a": i64::MAX, "b": 1 }));
        assert!(result.is_error);
        assert_eq!(result.failure, Some(FailureKind::ActionFailed));
        assert!(result.text_summary.contains("overflows"));
    }

    #[test]
    fn test_add_requires_both_operands() {
        let d = solar_dispatcher().unwrap();
        let missing = d.invoke("add", json!({ "a": 2 }));
        assert_eq!(missing.failure, Some(FailureKind::Validation));
        assert!(missing.text_summary.contains("; b: "));

        let fractional = d.invoke("add", json!({ "a": 2.5, "b": 1 }));
        assert_eq!(fractional.failure, Some(FailureKind::Validation));
        assert!(fractional.text_summary.contains("; a: "));
    }

    // ── Listings ─────────────────────────────────────────────────────────────

    #[test]
    fn test_listing_publishes_schema_and_hints() {
        let d = solar_dispatcher().unwrap();
        let Response::Actions(actions) = d.dispatch(Request::EnumerateActions) else {
            panic!("expected Actions");
        };
        let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["focus", "add"]);
        let focus = &actions[0];
        assert_eq!(focus.input_schema["properties"]["target"]["type"], "string");
        assert_eq!(focus.input_schema["properties"]["auto_orbit"]["default"], false);
        assert_eq!(focus.input_schema["additionalProperties"], false);
        assert_eq!(focus.meta[meta::OUTPUT_TEMPLATE], WIDGET_URI);
        assert_eq!(focus.meta[meta::WIDGET_ACCESSIBLE], true);
        assert_eq!(focus.meta[meta::RESULT_CAN_PRODUCE_WIDGET], true);
        assert!(focus.annotations.read_only_hint);

        let add = &actions[1];
        assert_eq!(add.input_schema["properties"]["a"]["type"], "integer");
        assert_eq!(add.input_schema["required"], json!(["a", "b"]));
        assert!(add.meta.get(meta::OUTPUT_TEMPLATE).is_none());

        assert_eq!(d.dispatch(Request::EnumerateActions), Response::Actions(actions));
    }

    #[test]
    fn test_resources_templates_prompts_listed() {
        let d = solar_dispatcher().unwrap();
        match d.dispatch(Request::EnumerateResources) {
            Response::Resources(r) => {
                let uris: Vec<&str> = r.iter().map(|r| r.uri.as_str()).collect();
                assert_eq!(uris, vec!["ui://w/1", "file://config.json"]);
            }
            other => panic!("expected Resources, got {:?}", other),
        }
        match d.dispatch(Request::EnumerateResourceTemplates) {
            Response::ResourceTemplates(t) => {
                assert_eq!(t[0].uri_template, "user://{user_id}/profile")
            }
            other => panic!("expected ResourceTemplates, got {:?}", other),
        }
        match d.dispatch(Request::EnumeratePrompts) {
            Response::Prompts(p) => assert_eq!(p[0].name, "code_review"),
            other => panic!("expected Prompts, got {:?}", other),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    #[test]
    fn test_config_read() {
        let read = solar_dispatcher().unwrap().read("file://config.json");
        assert_eq!(read.contents[0].mime_type, "application/json");
        let parsed: serde_json::Value = serde_json::from_str(&read.contents[0].text).unwrap();
        assert_eq!(parsed["server"], "minimal");
    }

    #[test]
    fn test_profile_template_read() {
        let read = solar_dispatcher().unwrap().read("user://42/profile");
        let parsed: serde_json::Value = serde_json::from_str(&read.contents[0].text).unwrap();
        assert_eq!(parsed["user_id"], "42");
        assert_eq!(parsed["email"], "user42@example.com");
        assert_eq!(read.contents[0].uri, "user://42/profile");
    }

    #[test]
    fn test_unknown_uri_read_is_empty() {
        let read = solar_dispatcher().unwrap().read("ui://w/9");
        assert!(read.contents.is_empty());
        assert!(read.meta.contains_key(meta::READ_ERROR));
    }

    #[test]
    fn test_widget_loaded_once_across_threads() {
        let d = Arc::new(solar_dispatcher().unwrap());
        std::thread::scope(|s| {
            for _ in 0..4 {
                let d = Arc::clone(&d);
                s.spawn(move || d.read("ui://w/1"));
            }
        });
        assert!(d.context().cache().is_cached("ui://w/1"));
        assert_eq!(d.context().cache().len(), 1);
    }

    // ── Prompts ──────────────────────────────────────────────────────────────

    #[test]
    fn test_code_review_prompt_defaults_to_python() {
        let d = solar_dispatcher().unwrap();
        match d.dispatch(Request::GetPrompt {
            name: "code_review".to_string(),
            arguments: Map::new(),
        }) {
            Response::Prompt(p) => assert!(p.text.starts_with("You are an expert python code reviewer.")),
            other => panic!("expected Prompt, got {:?}", other),
        }

        let mut arguments = Map::new();
        arguments.insert("language".to_string(), json!("rust"));
        match d.dispatch(Request::GetPrompt {
            name: "code_review".to_string(),
            arguments,
        }) {
            Response::Prompt(p) => assert!(p.text.contains("expert rust code reviewer")),
            other => panic!("expected Prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_prompt_is_not_found() {
        let d = solar_dispatcher().unwrap();
        assert_eq!(
            d.dispatch(Request::GetPrompt {
                name: "haiku".to_string(),
                arguments: Map::new(),
            }),
            Response::NotFound {
                kind: EntityKind::Prompt,
                key: "haiku".to_string(),
            }
        );
    }

    // ── Deployment ───────────────────────────────────────────────────────────

    #[test]
    fn test_catalog_server_info() {
        let catalog = solar_catalog().unwrap();
        assert_eq!(catalog.server().name, "solar-explorer");
        assert_eq!(catalog.server().version, "1.0.0");
    }

    #[test]
    fn test_add_handler_rejects_missing_addend() {
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), FieldValue::Integer(1));
        let payload = ValidatedPayload {
            action: "add".to_string(),
            fields,
        };
        match add_numbers(&payload) {
            Err(VitrineError::ActionFailed { action, reason }) => {
                assert_eq!(action, "add");
                assert!(reason.contains("'b'"));
            }
            other => panic!("expected ActionFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_versioned_widget_uri_is_stable() {
        let uri = versioned_widget_uri();
        assert!(uri.starts_with("ui://w/1?v="));
        assert_eq!(uri, versioned_widget_uri());
    }
}
