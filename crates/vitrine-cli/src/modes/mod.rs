//! Runtime execution modes.
//!
//! - `exec`: Non-interactive mode (stdout/stderr)
//! - interactive: full-screen terminal UI via `vitrine-tui`
//!
//! Both modes mount the widget the same way: resolve store settings, build
//! the client factory, link the frame ports, spawn the engine, and forward
//! whatever credential the host was given.

pub mod exec;

use std::sync::Arc;

use anyhow::Result;
use vitrine_core::config::Config;
use vitrine_core::core::frame::{self, ParentPort};
use vitrine_core::core::widget::{WidgetEventRx, WidgetHandle, spawn_widget};
use vitrine_core::store::{PostgrestFactory, StoreFactory};
use vitrine_types::ParentMessage;

/// Host-side choices for a widget session.
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Credential to forward, if the host has one.
    pub token: Option<String>,
    /// Send a credential message with an empty token instead.
    pub empty_token: bool,
    /// Origin stamped on host messages; defaults to the trusted origin.
    pub origin: Option<String>,
    /// Trusted-origin override (beats config and env).
    pub parent_origin: Option<String>,
    /// Store base URL override.
    pub store_url: Option<String>,
    /// Store anon key override.
    pub anon_key: Option<String>,
}

/// A mounted widget session: the host end of the link plus the engine.
pub struct MountedWidget {
    pub parent: ParentPort,
    pub handle: WidgetHandle,
    pub events: WidgetEventRx,
}

/// Mounts the widget and forwards the host's credential message, if any.
pub fn mount_widget(config: &Config, host: &HostOptions) -> Result<MountedWidget> {
    let trusted_origin = host
        .parent_origin
        .clone()
        .unwrap_or_else(|| config.resolved_parent_origin());

    let base_url = match &host.store_url {
        Some(url) => url.clone(),
        None => config.store.resolve_base_url()?,
    };
    let anon_key = match &host.anon_key {
        Some(key) => key.clone(),
        None => config.store.resolve_anon_key()?,
    };
    let factory = Arc::new(PostgrestFactory { base_url, anon_key });

    let host_origin = host.origin.clone().unwrap_or_else(|| trusted_origin.clone());
    let (parent, widget) = frame::link(&trusted_origin, &host_origin);
    let (handle, events) = spawn_widget(
        factory as Arc<dyn StoreFactory>,
        widget,
        config.auth_grace(),
    );

    if host.empty_token {
        parent.send(ParentMessage::AuthToken(Some(String::new())));
    } else if let Some(token) = &host.token {
        parent.send(ParentMessage::AuthToken(Some(token.clone())));
    }

    Ok(MountedWidget {
        parent,
        handle,
        events,
    })
}
