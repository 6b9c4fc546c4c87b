//! Domain helpers for `agentkit.yaml`.
//!
//! Pure functions only, no I/O.

use agentkit_common::{LaunchType, PersistedConfig};

use crate::domain::schema::COMMON_FIELDS;

// ── Constants ────────────────────────────────────────────────────────────────

/// File name used when neither `--config` nor `AGENTKIT_CONFIG` is given.
pub const DEFAULT_CONFIG_FILE: &str = "agentkit.yaml";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "AGENTKIT_CONFIG";

/// Placeholder rendered for a value that is absent.
pub const NOT_SET: &str = "(not set)";

// ── Construction ─────────────────────────────────────────────────────────────

/// Configuration used when no file exists yet: schema defaults only.
#[must_use]
pub fn with_defaults() -> PersistedConfig {
    let mut config = PersistedConfig::default();
    for field in COMMON_FIELDS {
        if let Some(default) = field.meta.default {
            field.set(&mut config.common, Some(default.to_string()));
        }
    }
    config
}

/// Launch type name that workflow values are written under.
///
/// An unset `launch_type` resolves to the default launch type.
#[must_use]
pub fn active_launch_type(config: &PersistedConfig) -> String {
    config
        .common
        .launch_type
        .clone()
        .unwrap_or_else(|| LaunchType::default().to_string())
}

/// Section names in report order: known launch types first, in
/// [`LaunchType::ALL`] order, then any other key alphabetically.
#[must_use]
pub fn ordered_sections<'a>(configs: &[&'a PersistedConfig]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for known in LaunchType::NAMES.iter().copied() {
        if configs.iter().any(|c| c.launch_types.contains_key(known)) {
            names.push(known);
        }
    }
    let mut others: Vec<&str> = configs
        .iter()
        .flat_map(|c| c.launch_types.keys().map(String::as_str))
        .filter(|name| !LaunchType::NAMES.contains(name))
        .collect();
    others.sort_unstable();
    others.dedup();
    names.extend(others);
    names
}

// ── Unit tests ───────────────────────────────────────────────────────────────
