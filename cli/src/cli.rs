//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::{ConfigError, UsageError};

/// Exit code for command lines that cannot be honoured.
pub const USAGE_EXIT: u8 = 2;

/// Configure and deploy AI agents
#[derive(Parser)]
#[command(
    name = "agentkit",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (the `NO_COLOR` env var is honoured too)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Never prompt (also set by CI or AGENTKIT_YES)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create, update or show the agent configuration
    Config(commands::config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        });
        match command {
            Command::Config(args) => commands::config::run(&app, args),
        }
    }
}

/// Process exit code for a failed command: usage errors exit 2, every
/// other failure exits 1.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<UsageError>().is_some() {
        ExitCode::from(USAGE_EXIT)
    } else {
        ExitCode::FAILURE
    }
}

/// Stable machine-readable name for the error kind, used by `--json`.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<UsageError>().is_some() {
        "usage_error"
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "invalid_config"
    } else {
        "io_error"
    }
}
