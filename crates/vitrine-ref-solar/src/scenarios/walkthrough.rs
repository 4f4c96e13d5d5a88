//! Walkthrough: every request kind, in the order a host issues them.
//!
//! 1. Enumerate actions, resources, templates and prompts
//! 2. Invoke `focus` with an alias ("Terra"), a prefix ("jup") and an
//!    unknown planet ("Pluto")
//! 3. Invoke `add`, then an action that does not exist
//! 4. Read the widget, the config document, a templated profile and a miss
//! 5. Render the `code_review` prompt

use serde_json::{json, Map, Value};

use vitrine_contracts::{
    error::VitrineResult,
    meta,
    request::{InvocationResult, ReadResourceResult, Request, Response},
};
use vitrine_core::Dispatcher;

use crate::deployment::{solar_dispatcher, versioned_widget_uri};

// ── Printing helpers ──────────────────────────────────────────────────────────

fn print_invocation(label: &str, result: &InvocationResult) {
    println!("  {label}");
    if result.is_error {
        println!("    ERROR ({:?}): {}", result.failure, result.text_summary);
    } else {
        println!("    summary:    {}", result.text_summary);
        if let Some(content) = &result.structured_content {
            println!("    structured: {}", Value::Object(content.clone()));
        }
        if let Some(template) = result.metadata.get(meta::OUTPUT_TEMPLATE) {
            println!("    template:   {template}");
        }
    }
    println!();
}

fn print_read(uri: &str, read: &ReadResourceResult) {
    match read.contents.first() {
        Some(body) => {
            let preview: String = body.text.chars().take(60).collect();
            println!("  read {uri} [{}]", body.mime_type);
            println!("    {}", preview.replace('\n', " "));
        }
        None => {
            let reason = read
                .meta
                .get(meta::READ_ERROR)
                .and_then(Value::as_str)
                .unwrap_or("empty");
            println!("  read {uri}: no contents ({reason})");
        }
    }
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run the walkthrough against the bundled deployment.
pub fn run_scenario() -> VitrineResult<()> {
    let dispatcher = solar_dispatcher()?;
    run_with(&dispatcher);
    Ok(())
}

/// Run the walkthrough against `dispatcher`.
pub fn run_with(dispatcher: &Dispatcher) {
    println!("=== Solar explorer walkthrough ===");
    println!();

    // ── Enumeration ───────────────────────────────────────────────────────────

    if let Response::Actions(actions) = dispatcher.dispatch(Request::EnumerateActions) {
        for action in &actions {
            println!("  action   {:<12} {}", action.name, action.description);
        }
    }
    if let Response::Resources(resources) = dispatcher.dispatch(Request::EnumerateResources) {
        for resource in &resources {
            println!("  resource {:<20} {}", resource.uri, resource.mime_type);
        }
    }
    if let Response::ResourceTemplates(templates) =
        dispatcher.dispatch(Request::EnumerateResourceTemplates)
    {
        for template in &templates {
            println!("  template {}", template.uri_template);
        }
    }
    if let Response::Prompts(prompts) = dispatcher.dispatch(Request::EnumeratePrompts) {
        for prompt in &prompts {
            println!("  prompt   {}", prompt.name);
        }
    }
    println!("  widget version: {}", versioned_widget_uri());
    println!();

    // ── Invocation ────────────────────────────────────────────────────────────

    print_invocation(
        "focus {\"target\": \"Terra\"}",
        &dispatcher.invoke("focus", json!({ "target": "Terra" })),
    );
    print_invocation(
        "focus {\"planet\": \"jup\", \"auto_orbit\": true}",
        &dispatcher.invoke("focus", json!({ "planet": "jup", "auto_orbit": true })),
    );
    print_invocation(
        "focus {\"target\": \"Pluto\"}",
        &dispatcher.invoke("focus", json!({ "target": "Pluto" })),
    );
    print_invocation(
        "add {\"a\": 2, \"b\": 3}",
        &dispatcher.invoke("add", json!({ "a": 2, "b": 3 })),
    );
    print_invocation(
        "warp {\"target\": \"Mars\"}",
        &dispatcher.invoke("warp", json!({ "target": "Mars" })),
    );

    // ── Resource reads ────────────────────────────────────────────────────────

    for uri in ["ui://w/1", "file://config.json", "user://42/profile", "ui://w/9"] {
        print_read(uri, &dispatcher.read(uri));
    }
    println!();

    // ── Prompts ───────────────────────────────────────────────────────────────

    let mut arguments = Map::new();
    arguments.insert("language".to_string(), json!("rust"));
    match dispatcher.dispatch(Request::GetPrompt {
        name: "code_review".to_string(),
        arguments,
    }) {
        Response::Prompt(prompt) => {
            println!("  prompt code_review (language = rust):");
            for line in prompt.text.lines() {
                println!("    {line}");
            }
        }
        other => println!("  prompt code_review failed: {other:?}"),
    }
    println!();
}
