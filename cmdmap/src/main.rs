//! Command console.
//!
//! Registers the built-in command catalog and reads command lines from
//! stdin, dispatching each one as the server console.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::warn;

use cmdmap::commands::builtin_catalog;
use cmdmap::discovery::discover;
use cmdmap::dispatch::Dispatcher;
use cmdmap::exit_codes;
use cmdmap::handbook;
use cmdmap::io::config::{ConsoleConfig, DEFAULT_CONFIG_PATH, load_config, write_config};
use cmdmap::io::console::{StdoutConsole, run_console};
use cmdmap::logging;
use cmdmap::registry::CommandRegistry;

#[derive(Parser)]
#[command(name = "cmdmap", version, about = "Command registry and dispatch console")]
struct Cli {
    /// Path to the console config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read command lines from stdin and dispatch them as the console.
    Console,
    /// Print every registered command with its aliases, scope, and permission.
    List {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(()) => std::process::exit(exit_codes::OK),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Console => cmd_console(&cli.config),
        Command::List { json } => cmd_list(&cli.config, json),
        Command::Init { force } => cmd_init(&cli.config, force),
    }
}

/// Build the registry from config and the built-in catalog.
fn startup(config: &ConsoleConfig) -> CommandRegistry {
    let registry = CommandRegistry::new();
    let report = discover(&registry, &builtin_catalog(), &config.discovery_options());
    for failure in &report.failed {
        warn!("{failure}");
    }
    registry
}

fn cmd_console(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = startup(&config);
    let dispatcher = Dispatcher::new(registry, Arc::new(StdoutConsole));
    let stdin = io::stdin();
    run_console(&dispatcher, stdin.lock(), io::stdout(), &config.prompt)
        .context("console loop")?;
    Ok(())
}

fn cmd_list(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = startup(&config);
    let rows = handbook::collect(&registry.entries());
    if json {
        let payload = serde_json::to_string_pretty(&rows).context("serialize handbook")?;
        println!("{payload}");
    } else {
        print!("{}", handbook::render(&rows));
    }
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if !force && config_path.exists() {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_config(config_path, &ConsoleConfig::default())
}
