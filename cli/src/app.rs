//! Application context: unified state passed to every command handler.
//!
//! Adding a new cross-cutting concern (e.g. `--verbose`) requires only one
//! field change here; no command signature changes.

use std::io::IsTerminal as _;

use anyhow::Result;

use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Environment variables that switch off prompts when present.
pub const NON_INTERACTIVE_ENV: &[&str] = &["AGENTKIT_YES", "CI"];

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `AGENTKIT_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// When `true`, never prompt and take defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `AGENTKIT_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and the process
    /// environment.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let env_set = NON_INTERACTIVE_ENV
            .iter()
            .any(|name| std::env::var_os(name).is_some());
        Self::with_env(flags, env_set)
    }

    /// Like [`AppContext::new`] with the env var lookup already done.
    #[must_use]
    pub fn with_env(flags: &AppFlags, non_interactive_env: bool) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            non_interactive: flags.behaviour.yes || non_interactive_env,
        }
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Whether the command may fall back to prompting: nothing turned
    /// prompts off and stdin is a terminal.
    #[must_use]
    pub fn prompts_enabled(&self) -> bool {
        !self.non_interactive && std::io::stdin().is_terminal()
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `AGENTKIT_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
