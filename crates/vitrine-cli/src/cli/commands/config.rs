//! Config command handlers.

use anyhow::Result;
use vitrine_core::config::{Config, paths};

use crate::cli::ConfigCommands;

pub fn run(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", paths::config_path().display());
        }
        ConfigCommands::Init => {
            let path = paths::config_path();
            if Config::init_at(&path)? {
                println!("Created {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
            }
        }
    }
    Ok(())
}
