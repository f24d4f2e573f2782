//! Plangate CLI library — exposed for integration tests

pub mod commands;
pub mod features;
pub mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plangate")]
#[command(about = "Validate the process license and run plan-gated features", long_about = None)]
#[command(version = plangate_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Enforce the license, then run every demo feature (default command)
    Demo,

    /// Show the verified license status
    Status,

    /// Run the free greeting feature
    Hello,

    /// Run the Pro-plan product feature
    Pro {
        x: i64,
        y: i64,
    },

    /// Run the Enterprise-plan feature for a project
    Enterprise {
        /// Project name
        name: String,
    },
}
