//! CLI entry and dispatch.
//!
//! The binary plays the embedding host: it mounts the widget, forwards the
//! credential it was given, and consumes the widget's outbound messages.

use anyhow::{Context, Result};
use clap::Parser;

use crate::modes::HostOptions;

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version)]
#[command(about = "Embeddable product-management widget")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    host_args: HostArgs,
}

/// Host-side arguments shared by the interactive and exec modes.
#[derive(clap::Args, Debug, Clone, Default)]
pub(crate) struct HostArgs {
    /// Bearer credential forwarded to the widget
    #[arg(long, env = "VITRINE_AUTH_TOKEN", global = true)]
    token: Option<String>,

    /// Send a credential message with an empty token
    #[arg(long, global = true, conflicts_with = "token")]
    empty_token: bool,

    /// Origin stamped on host messages (defaults to the trusted origin)
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Override the trusted origin from config
    #[arg(long, global = true)]
    parent_origin: Option<String>,

    /// Override the store base URL from config
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// Override the store anon key from config
    #[arg(long, global = true)]
    anon_key: Option<String>,
}

impl From<&HostArgs> for HostOptions {
    fn from(args: &HostArgs) -> Self {
        HostOptions {
            token: args.token.clone(),
            empty_token: args.empty_token,
            origin: args.origin.clone(),
            parent_origin: args.parent_origin.clone(),
            store_url: args.store_url.clone(),
            anon_key: args.anon_key.clone(),
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the widget without a terminal UI and print the outcome
    Exec {
        /// Add a product with this name after the initial load
        #[arg(long, value_name = "NAME")]
        add: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { command }) => commands::config::run(&command),
        Some(Commands::Exec { add }) => {
            crate::logging::init_stderr();
            commands::exec::run(&cli.host_args, add.as_deref()).await
        }
        None => {
            // The alternate screen owns the terminal; logs go to a file.
            let _guard = crate::logging::init_file()?;
            commands::widget::run(&cli.host_args).await
        }
    }
}
