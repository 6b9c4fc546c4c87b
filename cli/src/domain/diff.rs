//! Field-level changes between two configurations.

use agentkit_common::{EnvVarSet, PersistedConfig, WorkflowConfig};
use serde::Serialize;

use crate::domain::config::ordered_sections;
use crate::domain::schema::{COMMON_FIELDS, WORKFLOW_FIELDS};

/// One changed value. `None` means the value was (or became) unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

impl FieldChange {
    fn new(field: String, old: Option<&str>, new: Option<&str>) -> Self {
        Self {
            field,
            old: old.map(str::to_string),
            new: new.map(str::to_string),
        }
    }
}

/// Every field whose value differs between `old` and `new`, in report
/// order: common fields in schema order, application env vars by name,
/// then each launch type section (workflow fields in schema order, then
/// its env vars by name).
///
/// Env vars are reported only when added or changed. Unchanged fields are
/// never reported.
#[must_use]
pub fn diff(old: &PersistedConfig, new: &PersistedConfig) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for field in COMMON_FIELDS {
        let (before, after) = (field.get(&old.common), field.get(&new.common));
        if before != after {
            changes.push(FieldChange::new(field.meta.name.to_string(), before, after));
        }
    }
    diff_env("runtime_envs", &old.common.runtime_envs, &new.common.runtime_envs, &mut changes);

    let empty = WorkflowConfig::default();
    for section in ordered_sections(&[old, new]) {
        let before = old.launch_types.get(section).unwrap_or(&empty);
        let after = new.launch_types.get(section).unwrap_or(&empty);
        for field in WORKFLOW_FIELDS {
            let (b, a) = (field.get(before), field.get(after));
            if b != a {
                changes.push(FieldChange::new(format!("{section}.{}", field.meta.name), b, a));
            }
        }
        diff_env(
            &format!("{section}.runtime_envs"),
            &before.runtime_envs,
            &after.runtime_envs,
            &mut changes,
        );
    }

    changes
}

fn diff_env(prefix: &str, old: &EnvVarSet, new: &EnvVarSet, changes: &mut Vec<FieldChange>) {
    for (key, value) in new {
        let before = old.get(key).map(String::as_str);
        if before != Some(value.as_str()) {
            changes.push(FieldChange::new(format!("{prefix}.{key}"), before, Some(value.as_str())));
        }
    }
}
