//! `mjolnir` — command-line CRUD for JSON records in an embedded database.
//!
//! Usage:
//!   mjolnir -f <db> -b <bucket> (-a|-u) -key <key> -value <value>
//!   mjolnir -f <db> -b <bucket> (-r|-d) -key <key>
//!   mjolnir -f <db> [-b <bucket>] -p
//!
//! Exactly one operation runs per invocation, inside one transaction.

mod cli;
mod commands;
mod config;
mod plan;
mod render;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{ClientConfig, Settings};
use plan::ValidationError;

fn main() -> ExitCode {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    if cli.version {
        println!("mjolnir v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ClientConfig::default_path);
    let config = ClientConfig::load(&config_path)?;
    let settings = Settings::resolve(cli, &config);

    let invocation = plan::plan(cli, &settings)?;
    commands::execute(&invocation, settings.timeout, cli.noop)
}

/// `-D` and `-v` pick the level; otherwise RUST_LOG, then warnings only.
fn init_logging(cli: &Cli) {
    let filter = if cli.debug {
        EnvFilter::new("mjolnir=debug,mjolnir_kv=debug")
    } else if cli.verbose {
        EnvFilter::new("mjolnir=info,mjolnir_kv=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn report(err: &anyhow::Error) {
    if err.downcast_ref::<ValidationError>().is_some() {
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("For more information, try '--help'.");
    }
    eprintln!("{} {}", "[ ERROR ]:".yellow(), err);
}
