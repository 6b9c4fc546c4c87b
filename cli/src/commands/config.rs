//! `agentkit config`: create, update or show the agent configuration.
//!
//! Flag values are merged over `agentkit.yaml`, validated, and written
//! back atomically. With no flags on a terminal the command falls back to
//! prompting for every field.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, InputSource};
use crate::application::services::collector::FlagInput;
use crate::application::services::config_service;
use crate::commands::field_args::FieldArgs;
use crate::domain::{CONFIG_PATH_ENV, EnvAssignment, UsageError, parse_assignment};
use crate::infra::config::YamlConfigStore;
use crate::infra::prompt::PromptInput;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Application-level env var, shared by every launch type (repeatable)
    #[arg(
        short = 'e',
        long = "runtime_envs",
        visible_alias = "runtime-envs",
        value_name = "KEY=VALUE"
    )]
    pub runtime_envs: Vec<String>,

    /// Env var for the current launch type, wins over -e on the same key (repeatable)
    #[arg(
        long = "workflow-runtime-envs",
        visible_alias = "workflow_runtime_envs",
        value_name = "KEY=VALUE"
    )]
    pub workflow_runtime_envs: Vec<String>,

    /// Configuration file [default: $AGENTKIT_CONFIG or ./agentkit.yaml]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prompt for every field, pre-filled with the current values
    #[arg(short, long)]
    pub interactive: bool,

    /// Validate and report changes without writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the current configuration and exit
    #[arg(short, long)]
    pub show: bool,
}

/// Run the config command.
///
/// # Errors
///
/// Returns [`UsageError`] for a contradictory command line, a
/// [`crate::domain::ConfigError`] when the result is invalid, and an I/O
/// error with the file path when the configuration cannot be read or written.
pub fn run(app: &AppContext, args: ConfigArgs) -> Result<ExitCode> {
    let flags = preflight(&args)?;
    let path = YamlConfigStore::resolve(args.config.as_deref(), std::env::var_os(CONFIG_PATH_ENV));
    let store = YamlConfigStore::new(path);

    if args.show {
        return show(app, &store);
    }

    let interactive = args.interactive || (flags.is_empty() && app.prompts_enabled());
    let prompt = PromptInput;
    let mut sources: Vec<&dyn InputSource> = vec![&flags];
    if interactive {
        sources.push(&prompt);
    }

    let plan = config_service::plan(&store, &sources)?;
    app.renderer().render_changes(store.path(), &plan.changes)?;

    let display = store.path().display();
    if !plan.needs_write() {
        app.output.info(&format!("{display} not modified"));
        return Ok(ExitCode::SUCCESS);
    }
    if args.dry_run {
        app.output.info(&format!("Dry run: {display} not written"));
        return Ok(ExitCode::SUCCESS);
    }
    if interactive && !app.confirm(&format!("Write {display}?"), true)? {
        app.output.warn(&format!("Cancelled, {display} not modified"));
        return Ok(ExitCode::SUCCESS);
    }

    config_service::commit(&store, &plan)?;
    app.output.success(&format!("Saved {display}"));
    Ok(ExitCode::SUCCESS)
}

/// Turn the raw flags into a [`FlagInput`], rejecting command lines that
/// cannot be honoured before anything is read.
fn preflight(args: &ConfigArgs) -> Result<FlagInput, UsageError> {
    if args.show {
        let conflict = args
            .fields
            .values
            .keys()
            .map(|name| format!("--{name}"))
            .chain((!args.runtime_envs.is_empty()).then(|| "--runtime_envs".to_string()))
            .chain(
                (!args.workflow_runtime_envs.is_empty())
                    .then(|| "--workflow-runtime-envs".to_string()),
            )
            .chain(args.interactive.then(|| "--interactive".to_string()))
            .chain(args.dry_run.then(|| "--dry-run".to_string()))
            .next();
        if let Some(flag) = conflict {
            return Err(UsageError::ShowConflict(flag));
        }
    }

    Ok(FlagInput {
        fields: args.fields.values.clone(),
        runtime_envs: parse_all(&args.runtime_envs)?,
        workflow_runtime_envs: parse_all(&args.workflow_runtime_envs)?,
    })
}

fn parse_all(raw: &[String]) -> Result<Vec<EnvAssignment>, UsageError> {
    raw.iter().map(|item| parse_assignment(item)).collect()
}

fn show(app: &AppContext, store: &impl ConfigStore) -> Result<ExitCode> {
    let config = config_service::load_config(store)?;
    app.renderer().render_config(store.path(), config.as_ref())?;
    Ok(ExitCode::SUCCESS)
}
