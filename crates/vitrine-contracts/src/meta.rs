//! Metadata keys host surfaces pattern-match on.
//!
//! These names are part of the wire contract. Hosts look for them verbatim,
//! so they must never be renamed.

/// Uri of the UI resource that renders an action's results.
pub const OUTPUT_TEMPLATE: &str = "openai/outputTemplate";

/// Label shown while an invocation is in flight.
pub const INVOKING: &str = "openai/toolInvocation/invoking";

/// Label shown once an invocation has completed.
pub const INVOKED: &str = "openai/toolInvocation/invoked";

/// Whether the rendered widget may itself call actions.
pub const WIDGET_ACCESSIBLE: &str = "openai/widgetAccessible";

/// Whether the result may be rendered as a widget at all.
pub const RESULT_CAN_PRODUCE_WIDGET: &str = "openai/resultCanProduceWidget";

/// The embedded resource (uri, mime type, body) so a result is self-contained.
pub const EMBEDDED_WIDGET: &str = "openai.com/widget";

/// Explanation attached to an empty resource read.
pub const READ_ERROR: &str = "vitrine/readError";
