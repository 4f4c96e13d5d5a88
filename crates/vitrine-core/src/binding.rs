//! Startup validation of action bindings.
//!
//! Runs once while the dispatcher is built. An unresolvable binding is a
//! configuration defect, so it aborts startup instead of surfacing on the
//! first invocation of the affected action.

use tracing::debug;

use vitrine_contracts::{
    action::ActionDescriptor,
    error::{VitrineError, VitrineResult},
    schema::FieldKind,
};

use crate::registry::Registry;

/// One resolved action → resource link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub action: String,
    pub resource_uri: String,
}

/// Check every action's output resource reference and identifier vocabulary.
///
/// Actions are visited in registration order; the first defect is returned:
/// - `UnresolvedBinding` when `output_resource_ref` names no registered
///   resource (an empty reference means "unbound" and is skipped)
/// - `ConfigError` when a vocabulary is bound to a field the schema does not
///   declare as a string, or names a default/alias target that is not one of
///   its entries
pub fn resolve_bindings(registry: &Registry) -> VitrineResult<Vec<Binding>> {
    let mut bindings = Vec::new();

    for action in registry.actions() {
        check_vocabulary(action)?;

        let Some(reference) = action.binding() else {
            continue;
        };

        if registry.resource(reference).is_err() {
            return Err(VitrineError::UnresolvedBinding {
                action: action.name.clone(),
                reference: reference.to_string(),
            });
        }

        debug!(action = %action.name, resource = %reference, "binding resolved");
        bindings.push(Binding {
            action: action.name.clone(),
            resource_uri: reference.to_string(),
        });
    }

    Ok(bindings)
}

fn check_vocabulary(action: &ActionDescriptor) -> VitrineResult<()> {
    let Some(vocab) = &action.vocabulary else {
        return Ok(());
    };

    let config_error = |reason: String| VitrineError::ConfigError {
        reason: format!("action '{}': {}", action.name, reason),
    };

    match action.input_schema.fields.iter().find(|f| f.name == vocab.field) {
        Some(field) if field.kind == FieldKind::String => {}
        Some(_) => {
            return Err(config_error(format!(
                "vocabulary field '{}' must be a string field",
                vocab.field
            )))
        }
        None => {
            return Err(config_error(format!(
                "vocabulary field '{}' is not declared in the input schema",
                vocab.field
            )))
        }
    }

    if vocab.entries.is_empty() {
        return Err(config_error("vocabulary has no entries".to_string()));
    }

    if !vocab.entries.contains(&vocab.default) {
        return Err(config_error(format!(
            "vocabulary default '{}' is not an entry",
            vocab.default
        )));
    }

    for (alias, target) in &vocab.aliases {
        if !vocab.entries.contains(target) {
            return Err(config_error(format!(
                "alias '{}' points at '{}', which is not an entry",
                alias, target
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use vitrine_contracts::{error::VitrineError, schema::FieldKind};

    use super::resolve_bindings;
    use crate::{
        registry::Registry,
        test_support::{action, focus_action, resource},
    };

    #[test]
    fn resolved_bindings_are_reported_in_order() {
        let mut registry = Registry::new();
        registry.register(resource("ui://w/1")).unwrap();
        registry.register(action("unbound", None)).unwrap();
        registry.register(action("first", Some("ui://w/1"))).unwrap();
        registry.register(action("second", Some("ui://w/1"))).unwrap();

        let bindings = resolve_bindings(&registry).unwrap();
        let names: Vec<&str> = bindings.iter().map(|b| b.action.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn missing_resource_fails_fast() {
        let mut registry = Registry::new();
        registry.register(action("focus", Some("ui://w/missing"))).unwrap();

        match resolve_bindings(&registry) {
            Err(VitrineError::UnresolvedBinding { action, reference }) => {
                assert_eq!(action, "focus");
                assert_eq!(reference, "ui://w/missing");
            }
            other => panic!("expected UnresolvedBinding, got {:?}", other),
        }
    }

    #[test]
    fn empty_reference_is_unbound() {
        let mut registry = Registry::new();
        registry.register(action("focus", Some(""))).unwrap();
        assert!(resolve_bindings(&registry).unwrap().is_empty());
    }

    #[test]
    fn vocabulary_default_must_be_an_entry() {
        let mut focus = focus_action("ui://w/1");
        focus.vocabulary.as_mut().unwrap().default = "Pluto".to_string();

        let mut registry = Registry::new();
        registry.register(resource("ui://w/1")).unwrap();
        registry.register(focus).unwrap();

        match resolve_bindings(&registry) {
            Err(VitrineError::ConfigError { reason }) => assert!(reason.contains("Pluto")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn vocabulary_field_must_be_a_string() {
        let mut focus = focus_action("ui://w/1");
        focus.input_schema.fields[0].kind = FieldKind::Integer;

        let mut registry = Registry::new();
        registry.register(resource("ui://w/1")).unwrap();
        registry.register(focus).unwrap();

        assert!(matches!(
            resolve_bindings(&registry),
            Err(VitrineError::ConfigError { .. })
        ));
    }
}
