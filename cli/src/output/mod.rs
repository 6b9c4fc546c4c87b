//! Output formatting module
//!
//! Reports (the diff, `--show`) go to stdout through a [`Renderer`].
//! Status lines go to stderr, so stdout carries the same bytes whether or
//! not a run ends up writing the file.

pub mod human;
pub mod json;
pub mod styles;

use std::path::Path;

use agentkit_common::PersistedConfig;
use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use crate::domain::FieldChange;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors =
            !no_color && Term::stdout().is_term() && std::env::var_os("NO_COLOR").is_none();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success status line prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning status line prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print `Error: <msg>` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "Error:".style(self.styles.error));
    }

    /// Print an info status line prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header to stdout. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair to stdout with the key dimmed and padded to
    /// `width`. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str, width: usize) {
        if !self.quiet {
            println!("    {}  {value}", format!("{key:<width$}").style(self.styles.dim));
        }
    }
}

/// Dispatches reports to the renderer of the active output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the changes a run makes (or would make) to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_changes(&self, path: &Path, changes: &[FieldChange]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_changes(path, changes);
                Ok(())
            }
            Renderer::Json(r) => r.render_changes(path, changes),
        }
    }

    /// Render the stored configuration, or its absence.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, path: &Path, config: Option<&PersistedConfig>) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_config(path, config);
                Ok(())
            }
            Renderer::Json(r) => r.render_config(path, config),
        }
    }
}
