//! Command line interface definition

use clap::{Parser, Subcommand};
use hat_types::{ColorChoice, Version};
use std::path::PathBuf;

/// hat - Mod dependency resolver for the HAT mod loader
#[derive(Parser)]
#[command(name = "hat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mod dependency resolver for the HAT mod loader")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to a log file
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the running loader version
    #[arg(long, global = true, value_name = "VERSION")]
    pub loader_version: Option<Version>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the load order of a candidate manifest
    #[command(alias = "r")]
    Resolve {
        /// Candidate manifest (defaults to mods.toml in the mods directory)
        #[arg(long, value_name = "PATH")]
        candidates: Option<PathBuf>,

        /// Mods directory
        #[arg(long, value_name = "DIR")]
        mods_dir: Option<PathBuf>,

        /// Priority list file
        #[arg(long, value_name = "PATH")]
        priority: Option<PathBuf>,

        /// Disable a mod by name (repeatable)
        #[arg(long = "disable", value_name = "NAME")]
        disabled: Vec<String>,

        /// Exit with an error if any mod is rejected
        #[arg(long)]
        strict: bool,
    },

    /// Show the running loader identity
    Version,
}

impl Commands {
    /// Validate command arguments
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Commands::Resolve { disabled, .. } => {
                if disabled.iter().any(|name| name.trim().is_empty()) {
                    return Err("--disable requires a mod name".to_string());
                }
                Ok(())
            }
            Commands::Version => Ok(()),
        }
    }
}
