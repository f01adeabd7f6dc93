//! Interactive (full-screen) widget command.

use anyhow::{Context, Result};
use vitrine_core::config::Config;

use crate::cli::HostArgs;
use crate::modes::{self, MountedWidget};

pub async fn run(args: &HostArgs) -> Result<()> {
    let config = Config::load().context("load config")?;
    let MountedWidget {
        mut parent,
        handle,
        events,
    } = modes::mount_widget(&config, &args.into())?;

    // The host side consumes outbound widget messages for the session log.
    let drain = tokio::spawn(async move {
        while let Some(envelope) = parent.recv().await {
            tracing::info!(origin = %envelope.origin, message = ?envelope.message, "widget message");
        }
    });

    let result = vitrine_tui::run_widget(handle, events);
    drain.abort();
    result
}
