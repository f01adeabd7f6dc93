//! Cross-boundary messaging contract between the widget and its host.
//!
//! The embedding host ("parent") and the widget exchange tagged JSON
//! messages. Inbound messages arrive wrapped in an [`Envelope`] carrying the
//! sender origin so the widget can filter untrusted senders; outbound
//! messages are addressed to the single trusted origin.

use serde::{Deserialize, Serialize};

/// Messages the widget accepts from the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ParentMessage {
    /// Bearer credential for the data store. A `null` or empty payload is a
    /// handshake failure, not a silently ignored message.
    #[serde(rename = "AUTH_TOKEN")]
    AuthToken(Option<String>),
}

/// Messages the widget posts to the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WidgetMessage {
    /// Sent exactly once when the widget mounts, before any credential
    /// arrives.
    #[serde(rename = "APP_LOADED")]
    AppLoaded,
    /// User-facing outcome of a load or add operation.
    #[serde(rename = "SHOW_NOTIFICATION")]
    ShowNotification(Notification),
}

/// Payload of [`WidgetMessage::ShowNotification`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub status: NotificationStatus,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: NotificationStatus::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: NotificationStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Success,
    Error,
}

/// A message tagged with an origin.
///
/// For inbound traffic `origin` is the sender's origin (checked against the
/// trusted origin); for outbound traffic it is the destination the message is
/// addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub origin: String,
    pub message: T,
}

impl<T> Envelope<T> {
    pub fn new(origin: impl Into<String>, message: T) -> Self {
        Self {
            origin: origin.into(),
            message,
        }
    }
}
