//! Exec command handler.

use anyhow::{Context, Result};
use vitrine_core::config::Config;

use crate::cli::HostArgs;
use crate::modes;

pub async fn run(args: &HostArgs, add: Option<&str>) -> Result<()> {
    let config = Config::load().context("load config")?;
    let mounted = modes::mount_widget(&config, &args.into())?;

    let options = modes::exec::ExecOptions {
        add: add.map(str::to_string),
    };
    modes::exec::run_exec(mounted, &options).await
}
