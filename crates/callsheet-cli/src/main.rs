mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{calls, completions, load_roster, status, tui, Context};
use crate::error::{exit_code_for, report_error};
use callsheet_config as config;

#[derive(Debug, Parser)]
#[command(name = "callsheet", version, about = "callsheet CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Roster file to start from instead of the configured or built-in one
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read-only status view of the roster
    Status(status::StatusArgs),
    /// Next hotel to call after a roster position
    Next(calls::NextArgs),
    /// Dial strings for the given hotel ids
    Targets(calls::TargetsArgs),
    /// Dial one hotel through the configured dialer
    Dial(calls::DialArgs),
    /// Open the interactive call sheet
    Tui(tui::TuiArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        seed,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Tui(args) => tui::launch(config_path, seed, args, verbose),
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let store = load_roster(&app_config, seed.as_deref())?;
            debug!(hotels = store.len(), "roster loaded");

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::Status(args) => status::show_status(&ctx, args),
                Command::Next(args) => calls::next_callable(&ctx, args),
                Command::Targets(args) => calls::call_targets(&ctx, args),
                Command::Dial(args) => calls::dial(&ctx, args),
                Command::Tui(_) => unreachable!("tui command handled before roster load"),
                Command::Completions(_) => {
                    unreachable!("completions command handled before roster load")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
