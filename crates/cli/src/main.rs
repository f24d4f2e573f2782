//! Plangate CLI - license enforcement demo

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use plangate_cli::{commands, logging, Cli, Commands};

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();
    let enforcer = plangate_core::global();

    match cli.command {
        Some(Commands::Demo) | None => commands::demo::run(enforcer),
        Some(Commands::Status) => commands::status::run(enforcer),
        Some(Commands::Hello) => commands::feature::run_hello(),
        Some(Commands::Pro { x, y }) => commands::feature::run_pro(enforcer, x, y),
        Some(Commands::Enterprise { ref name }) => {
            commands::feature::run_enterprise(enforcer, name)
        }
    }
}
