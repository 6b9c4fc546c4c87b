//! Runtime environment variable sets and the two-tier merge rule.

use std::collections::BTreeMap;

/// Environment variables keyed by name. Ordered so that files and reports
/// are stable across runs.
pub type EnvVarSet = BTreeMap<String, String>;

/// Resolve the environment an agent actually runs with.
///
/// Starts from the application-level set and overwrites every key present
/// in the workflow-level set. A key missing from `workflow` keeps its
/// application value; there is no way to delete a variable.
#[must_use]
pub fn effective_env(application: &EnvVarSet, workflow: &EnvVarSet) -> EnvVarSet {
    let mut merged = application.clone();
    merged.extend(
        workflow
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    merged
}
