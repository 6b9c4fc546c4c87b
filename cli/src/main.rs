//! agentkit - Configure and deploy AI agents

use std::process::ExitCode;

use agentkit_cli::cli::{Cli, error_code, exit_code};
use agentkit_cli::domain::ConfigError;
use agentkit_cli::output::{OutputContext, json};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Env var holding the log filter, e.g. `AGENTKIT_LOG=debug`.
const LOG_ENV: &str = "AGENTKIT_LOG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    let output = OutputContext::new(cli.no_color, cli.quiet);
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            report(&output, &e, json_mode);
            exit_code(&e)
        }
    }
}

fn report(output: &OutputContext, e: &anyhow::Error, json_mode: bool) {
    if !json_mode {
        output.error(&format!("{e:#}"));
        return;
    }
    let message = format!("{e:#}");
    let formatted = match e.downcast_ref::<ConfigError>() {
        Some(invalid) => json::format_invalid(&message, invalid.violations()),
        None => json::format_error(&message, error_code(e)),
    };
    match formatted {
        Ok(out) => println!("{out}"),
        Err(_) => output.error(&message),
    }
}
