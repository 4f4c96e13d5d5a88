//! Vitrine solar explorer demo CLI.
//!
//! Drives the reference dispatcher one request at a time and prints the
//! response as JSON, or runs the scripted walkthrough.
//!
//! Usage:
//!   cargo run -p demo -- walkthrough
//!   cargo run -p demo -- list-actions
//!   cargo run -p demo -- invoke focus --args '{"target": "Terra"}'
//!   cargo run -p demo -- invoke add --args '{"a": 2, "b": 3}'
//!   cargo run -p demo -- read user://42/profile
//!   cargo run -p demo -- prompt code_review --args '{"language": "rust"}'
//!   cargo run -p demo -- --catalog my.toml --assets ./widgets list-resources

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vitrine_contracts::{
    error::{VitrineError, VitrineResult},
    request::{InvocationRequest, Request},
};
use vitrine_ref_solar::{scenarios::walkthrough, solar_dispatcher_from};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Vitrine: actions, resources and widgets for conversational hosts.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Vitrine solar explorer demo",
    long_about = "Sends single requests to the solar explorer dispatcher and prints\n\
                  the response, or runs the full walkthrough."
)]
struct Cli {
    /// TOML catalog to load instead of the bundled one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding widget bodies referenced by `content_key`.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enumerate actions with their schemas and metadata.
    ListActions,
    /// Enumerate fixed resources.
    ListResources,
    /// Enumerate resource templates.
    ListTemplates,
    /// Enumerate prompts.
    ListPrompts,
    /// Read one resource by uri.
    Read { uri: String },
    /// Invoke an action.
    Invoke {
        name: String,
        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Render a prompt.
    Prompt {
        name: String,
        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Run every request kind in sequence.
    Walkthrough,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> VitrineResult<()> {
    let dispatcher = solar_dispatcher_from(cli.catalog.as_deref(), cli.assets.as_deref())?;

    let request = match cli.command {
        Command::Walkthrough => {
            walkthrough::run_with(&dispatcher);
            return Ok(());
        }
        Command::ListActions => Request::EnumerateActions,
        Command::ListResources => Request::EnumerateResources,
        Command::ListTemplates => Request::EnumerateResourceTemplates,
        Command::ListPrompts => Request::EnumeratePrompts,
        Command::Read { uri } => Request::ReadResource { uri },
        Command::Invoke { name, args } => {
            Request::InvokeAction(InvocationRequest::new(name, parse_args(&args)?))
        }
        Command::Prompt { name, args } => {
            let arguments = match parse_args(&args)? {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            Request::GetPrompt { name, arguments }
        }
    };

    debug!(?request, "dispatching");
    let response = dispatcher.dispatch(request);
    let rendered = serde_json::to_string_pretty(&response).map_err(|e| VitrineError::ConfigError {
        reason: format!("failed to render response: {e}"),
    })?;
    println!("{rendered}");
    Ok(())
}

/// Parse `--args` as JSON. Objects only.
fn parse_args(raw: &str) -> VitrineResult<Value> {
    let value: Value = serde_json::from_str(raw).map_err(|e| VitrineError::ConfigError {
        reason: format!("--args is not valid JSON: {e}"),
    })?;
    if !value.is_object() {
        return Err(VitrineError::ConfigError {
            reason: "--args must be a JSON object".to_string(),
        });
    }
    Ok(value)
}
