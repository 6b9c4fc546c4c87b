//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs` or `std::process`. Both enums
//! implement `thiserror::Error` and convert to `anyhow::Error` via `?`;
//! `main` downcasts them to pick the exit code.

use thiserror::Error;

use crate::domain::validate::Violation;

// ── Validation errors ─────────────────────────────────────────────────────────

/// The collected configuration breaks one or more rules. Nothing is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration is invalid:\n{}", list_violations(.0))]
    Invalid(Vec<Violation>),
}

impl ConfigError {
    /// Violations carried by the error, in report order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            ConfigError::Invalid(v) => v,
        }
    }
}

fn list_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}: {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Usage errors ──────────────────────────────────────────────────────────────

/// The command line itself is wrong. Raised before any file is read.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("--show cannot be combined with {0}")]
    ShowConflict(String),

    #[error("Invalid environment variable '{0}': expected KEY=VALUE")]
    MalformedEnv(String),

    #[error("Invalid environment variable name '{0}': must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidEnvName(String),
}
