//! The solar explorer deployment: catalog, widget body and dispatcher.
//!
//! The catalog and widget ship inside the binary. `solar_dispatcher_from`
//! swaps either for files on disk so a widget can be iterated on without a
//! rebuild.

use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::info;

use vitrine_catalog::Catalog;
use vitrine_content::{versioned_uri, DirectoryContentProvider, StaticContentProvider};
use vitrine_contracts::{
    error::{EntityKind, VitrineError, VitrineResult},
    schema::ValidatedPayload,
};
use vitrine_core::{traits::ContentProvider, Dispatcher, Registry};
use vitrine_validate::standard_builder;

/// Bundled TOML catalog.
pub const SOLAR_CATALOG: &str = include_str!("../catalog/solar.toml");

/// Bundled widget markup, served for content key `WIDGET_KEY`.
pub const SOLAR_WIDGET: &str = include_str!("../assets/solar-widget.html");

pub const WIDGET_KEY: &str = "solar-widget.html";

/// Uri the `focus` action renders into.
pub const WIDGET_URI: &str = "ui://w/1";

pub fn solar_catalog() -> VitrineResult<Catalog> {
    Catalog::from_toml_str(SOLAR_CATALOG)
}

pub fn solar_registry() -> VitrineResult<Registry> {
    solar_catalog()?.into_registry()
}

/// Provider holding the bundled widget.
pub fn solar_content() -> StaticContentProvider {
    StaticContentProvider::new().with(WIDGET_KEY, SOLAR_WIDGET)
}

/// `WIDGET_URI` with a version suffix derived from the bundled widget body.
///
/// Publish under this uri to force hosts to drop a cached copy after the
/// widget changes.
pub fn versioned_widget_uri() -> String {
    versioned_uri(WIDGET_URI, SOLAR_WIDGET.as_bytes())
}

/// Result handler for `add`: `{"result": a + b}`.
///
/// # Errors
///
/// `ActionFailed` when an addend is missing or the sum overflows `i64`.
pub fn add_numbers(payload: &ValidatedPayload) -> VitrineResult<Map<String, Value>> {
    let failed = |reason: String| VitrineError::ActionFailed {
        action: payload.action.clone(),
        reason,
    };
    let a = payload.integer("a").ok_or_else(|| failed("missing addend 'a'".to_string()))?;
    let b = payload.integer("b").ok_or_else(|| failed("missing addend 'b'".to_string()))?;
    let sum = a
        .checked_add(b)
        .ok_or_else(|| failed(format!("{a} + {b} overflows a 64-bit integer")))?;

    let mut out = Map::new();
    out.insert("result".to_string(), json!(sum));
    Ok(out)
}

/// Standard dispatcher for `registry`, with `add_numbers` attached when the
/// catalog declares an `add` action.
fn build_dispatcher(
    registry: Registry,
    provider: Box<dyn ContentProvider>,
) -> VitrineResult<Dispatcher> {
    let has_add = registry.contains(EntityKind::Action, "add");
    let builder = standard_builder(registry, Some(provider));
    if has_add {
        builder.action_handler("add", add_numbers).build()
    } else {
        builder.build()
    }
}

/// Dispatcher over the bundled catalog and widget.
pub fn solar_dispatcher() -> VitrineResult<Dispatcher> {
    let dispatcher = build_dispatcher(solar_registry()?, Box::new(solar_content()))?;
    info!(widget = %versioned_widget_uri(), "solar dispatcher ready");
    Ok(dispatcher)
}

/// Dispatcher over an optional on-disk catalog and asset directory.
///
/// `None` falls back to the bundled copy.
pub fn solar_dispatcher_from(
    catalog: Option<&Path>,
    assets: Option<&Path>,
) -> VitrineResult<Dispatcher> {
    let registry = match catalog {
        Some(path) => Catalog::from_file(path)?.into_registry()?,
        None => solar_registry()?,
    };
    let provider: Box<dyn ContentProvider> = match assets {
        Some(dir) => Box::new(DirectoryContentProvider::new(dir)),
        None => Box::new(solar_content()),
    };
    build_dispatcher(registry, provider)
}
