//! Prompt rendering.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use vitrine_contracts::{
    prompt::PromptDescriptor,
    request::PromptResult,
    schema::ValidationError,
};

use crate::template::render;

/// Render `prompt` with caller-supplied `arguments`.
///
/// Unknown argument names and missing required arguments are collected into
/// one `ValidationError`. Omitted optional arguments take their default, or
/// the empty string when none is declared. Scalar JSON values are rendered
/// as text; objects and arrays are rejected.
pub fn render_prompt(
    prompt: &PromptDescriptor,
    arguments: &Map<String, Value>,
) -> Result<PromptResult, ValidationError> {
    let mut errors = ValidationError::new(prompt.name.clone());
    let mut values = BTreeMap::new();

    for key in arguments.keys() {
        if !prompt.arguments.iter().any(|a| &a.name == key) {
            let accepted: Vec<&str> = prompt.arguments.iter().map(|a| a.name.as_str()).collect();
            errors.push(
                key.clone(),
                format!("unknown argument; expected one of: {}", accepted.join(", ")),
            );
        }
    }

    for arg in &prompt.arguments {
        let value = match arguments.get(&arg.name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => arg.default.clone(),
            Some(v @ (Value::Bool(_) | Value::Number(_))) => Some(v.to_string()),
            Some(_) => {
                errors.push(arg.name.clone(), "must be a string, number, or boolean");
                continue;
            }
        };
        match value {
            Some(v) => {
                values.insert(arg.name.clone(), v);
            }
            None if arg.required => errors.push(arg.name.clone(), "argument is required"),
            None => {
                values.insert(arg.name.clone(), String::new());
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(PromptResult {
        name: prompt.name.clone(),
        description: prompt.description.clone(),
        text: render(&prompt.template, &values),
    })
}
