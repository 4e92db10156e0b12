//! Stencil CLI - maintenance toolbox for project-template repositories
//!
//! This is the main entry point for the stencil command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            output::error(format_args!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Dispatch to the command, returning the process exit status
fn run(cli: Cli) -> Result<u8> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::HashFiles(args) => commands::hash::run(args, config),
        Commands::Version(args) => commands::version::run(args).map(|()| 0),
        Commands::Context(args) => commands::context::run(args, config).map(|()| 0),
        Commands::Release(args) => commands::release::run(args, config).map(|()| 0),
        Commands::UsePublicRegistries(args) => commands::registries::run(args).map(|()| 0),
        Commands::InstallCiTooling(args) => commands::tooling::run(args, config).map(|()| 0),
        Commands::SyncDeps(args) => commands::deps::run(args, config).map(|()| 0),
    }
}

/// Initialize tracing on stderr; stdout stays reserved for command output
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
