//! JSON output helpers.
//!
//! Every `--json` report is a single pretty-printed object on stdout.

use std::path::Path;

use agentkit_common::PersistedConfig;
use anyhow::{Context, Result};
use serde_json::json;

use crate::domain::config::active_launch_type;
use crate::domain::{FieldChange, Violation};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the JSON error object for a rejected configuration, with one
/// entry per violation.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_invalid(message: &str, violations: &[Violation]) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": "invalid_config",
        "violations": violations,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders reports as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the changes of a run.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_changes(&self, path: &Path, changes: &[FieldChange]) -> Result<()> {
        let obj = json!({
            "path": path.display().to_string(),
            "changes": changes,
        });
        println!("{}", serde_json::to_string_pretty(&obj).context("JSON serialization failed")?);
        Ok(())
    }

    /// Render the stored configuration. `config` is `null` when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, path: &Path, config: Option<&PersistedConfig>) -> Result<()> {
        println!("{}", config_json(path, config)?);
        Ok(())
    }
}

fn config_json(path: &Path, config: Option<&PersistedConfig>) -> Result<String> {
    let obj = json!({
        "path": path.display().to_string(),
        "config": config,
        "launch_type": config.map(active_launch_type),
        "effective_env": config.map(PersistedConfig::effective_env),
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
