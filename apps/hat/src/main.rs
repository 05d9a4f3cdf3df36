//! hat - Mod dependency resolver for the HAT mod loader
//!
//! Reads a candidate manifest, applies configuration and the priority list,
//! and prints the resulting load order together with every rejected mod.

mod cli;
mod display;
mod error;
mod events;
mod logging;
mod manifest;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use console::Term;
use hat_config::{constants, Config, PriorityList};
use hat_resolver::ModLoader;
use hat_types::{ColorChoice, OutputFormat};
use std::path::Path;
use std::process;
use tracing::{error, info};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting hat v{}", env!("CARGO_PKG_VERSION"));
    cli.command.validate().map_err(CliError::InvalidArguments)?;

    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global, &cli.command);

    let json_output = cli.global.json || config.general.default_output == OutputFormat::Json;
    let renderer = OutputRenderer::new(json_output, config.general.color);

    match cli.command {
        Commands::Version => {
            renderer.render_loader(&config.loader.name, config.loader.version)?;
        }
        Commands::Resolve {
            candidates, strict, ..
        } => {
            let candidates_path = candidates.unwrap_or_else(|| config.candidates_path());
            let colors_enabled = match config.general.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => Term::stderr().features().colors_supported(),
            };
            let mut handler = EventHandler::new(!json_output, colors_enabled);

            let rejected = resolve(&config, &candidates_path, &renderer, &mut handler).await?;
            if strict && rejected > 0 {
                return Err(CliError::Rejected(rejected));
            }
        }
    }

    info!("Command completed successfully");
    Ok(())
}

/// Resolve the candidate manifest and render the result
///
/// Returns the number of rejected mods.
async fn resolve(
    config: &Config,
    candidates_path: &Path,
    renderer: &OutputRenderer,
    handler: &mut EventHandler,
) -> Result<usize, CliError> {
    let priority = load_priority_list(config).await?;
    let candidates = manifest::load_candidates(candidates_path).await?;

    let (event_sender, mut event_receiver) = hat_events::channel();
    let loader = ModLoader::from_config(config, priority)
        .with_event_sender(event_sender)
        .with_run_id(Uuid::new_v4().to_string());

    let result = loader.prepare(candidates);
    drop(loader);
    handler.drain(&mut event_receiver);
    tracing::debug!(events = handler.handled(), "resolver events handled");

    renderer.render_resolution(&result)?;
    Ok(result.invalid.len())
}

/// Load the priority list, seeding the default file inside the mods directory
async fn load_priority_list(config: &Config) -> Result<PriorityList, CliError> {
    let path = config.priority_list_path();
    let in_mods_dir = config.mods.priority_list.is_none();

    let list = if in_mods_dir && tokio::fs::try_exists(config.mods_dir()).await.unwrap_or(false) {
        PriorityList::load_or_create_default(&path, constants::DEFAULT_PRIORITY_LIST).await?
    } else {
        PriorityList::load(&path).await?
    };
    Ok(list)
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = std::env::temp_dir().join("hat-logs");
        let log_file = log_dir.join(format!(
            "hat-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        let file = std::fs::create_dir_all(&log_dir).and_then(|()| std::fs::File::create(&log_file));
        match file {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,hat=debug,hat_resolver=debug"),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // JSON mode: keep stdout clean and stay quiet on stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,hat_resolver=error")
                }),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs, command: &Commands) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(version) = global.loader_version {
        config.loader.version = version;
    }

    if let Commands::Resolve {
        mods_dir,
        priority,
        disabled,
        ..
    } = command
    {
        if let Some(dir) = mods_dir {
            config.mods.directory = Some(dir.clone());
        }
        if let Some(path) = priority {
            config.mods.priority_list = Some(path.clone());
        }
        config.mods.disabled.extend(disabled.iter().cloned());
    }
}
