//! Widget event types for the UI and the host.
//!
//! This module defines the contract for events emitted by the widget engine.
//! Events are serializable so non-interactive hosts can log them as JSON.

use serde::{Deserialize, Serialize};
use vitrine_types::Product;

/// Events emitted by the widget engine during execution.
///
/// Every load and add terminates in a completed or failed event, so
/// consumers can always clear their in-flight flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// A credential was accepted and a store client constructed.
    AuthAccepted,

    /// A credential message arrived without a usable token.
    AuthRejected { error: String },

    /// No credential arrived within the grace period.
    GraceExpired,

    /// A product fetch has started.
    LoadStarted,

    /// The product collection was replaced wholesale.
    LoadCompleted { products: Vec<Product> },

    /// The fetch failed; `error` is the full user-facing message.
    LoadFailed { error: String },

    /// An insert has started.
    AddStarted,

    /// The insert succeeded; a reload follows immediately.
    AddCompleted,

    /// The insert failed; `error` is the full user-facing message.
    AddFailed { error: String },
}
