//! The channel link standing in for the embedding boundary.
//!
//! Two ports: [`ParentPort`] held by the host, [`WidgetPort`] held by the
//! widget engine. Inbound traffic passes through origin-filtering middleware
//! on the widget side; outbound traffic is addressed to the one trusted
//! origin. Receivers are scoped resources: dropping a port closes its side
//! of the link.

use tokio::sync::mpsc;
use tracing::warn;
use vitrine_types::{Envelope, ParentMessage, WidgetMessage};

/// Creates a linked pair of ports.
///
/// `trusted_origin` is the only origin the widget accepts messages from;
/// `host_origin` is stamped on everything the parent sends (equal to
/// `trusted_origin` for a well-behaved host, different to exercise the
/// filtering path).
pub fn link(trusted_origin: &str, host_origin: &str) -> (ParentPort, WidgetPort) {
    let (to_widget_tx, to_widget_rx) = mpsc::unbounded_channel();
    let (to_parent_tx, to_parent_rx) = mpsc::unbounded_channel();

    let parent = ParentPort {
        origin: host_origin.to_string(),
        outgoing: to_widget_tx,
        incoming: to_parent_rx,
    };
    let widget = WidgetPort {
        trusted_origin: trusted_origin.to_string(),
        incoming: to_widget_rx,
        outgoing: to_parent_tx,
    };
    (parent, widget)
}

/// Host-side end of the link.
pub struct ParentPort {
    origin: String,
    outgoing: mpsc::UnboundedSender<Envelope<ParentMessage>>,
    incoming: mpsc::UnboundedReceiver<Envelope<WidgetMessage>>,
}

impl ParentPort {
    /// Sends a message to the widget, stamped with this port's origin.
    pub fn send(&self, message: ParentMessage) {
        let _ = self.outgoing.send(Envelope::new(self.origin.clone(), message));
    }

    /// Receives the next widget message, or `None` once the widget is gone.
    pub async fn recv(&mut self) -> Option<Envelope<WidgetMessage>> {
        self.incoming.recv().await
    }

    /// Non-blocking receive for frame-loop style consumers.
    pub fn try_recv(&mut self) -> Option<Envelope<WidgetMessage>> {
        self.incoming.try_recv().ok()
    }
}

/// Widget-side end of the link.
pub struct WidgetPort {
    trusted_origin: String,
    incoming: mpsc::UnboundedReceiver<Envelope<ParentMessage>>,
    outgoing: mpsc::UnboundedSender<Envelope<WidgetMessage>>,
}

impl WidgetPort {
    /// Receives the next message from the trusted origin.
    ///
    /// Messages from any other origin are logged and dropped here, before
    /// they can reach any state. Returns `None` once the parent is gone.
    pub async fn recv(&mut self) -> Option<ParentMessage> {
        while let Some(envelope) = self.incoming.recv().await {
            if envelope.origin == self.trusted_origin {
                return Some(envelope.message);
            }
            warn!(origin = %envelope.origin, "ignoring message from untrusted origin");
        }
        None
    }

    /// Posts a message to the parent, addressed to the trusted origin.
    ///
    /// A closed parent side is not an error; the widget keeps running.
    pub fn post(&self, message: WidgetMessage) {
        let _ = self
            .outgoing
            .send(Envelope::new(self.trusted_origin.clone(), message));
    }

    pub fn trusted_origin(&self) -> &str {
        &self.trusted_origin
    }
}
