//! Application service: argument collection.
//!
//! Folds the answers of an [`InputSource`] into a configuration. Values
//! the source leaves unset keep what the configuration already had; env
//! var assignments are merged by key, never replacing the whole set.

use std::collections::BTreeMap;

use agentkit_common::{EnvVarSet, PersistedConfig};
use anyhow::Result;
use tracing::debug;

use crate::application::ports::{FieldQuery, InputSource};
use crate::domain::config::active_launch_type;
use crate::domain::{COMMON_FIELDS, EnvAssignment, EnvScope, WORKFLOW_FIELDS};

/// Values supplied on the command line. Every absent entry means "leave
/// unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagInput {
    /// Field name → raw value.
    pub fields: BTreeMap<String, String>,
    /// Application-level assignments, in the order given.
    pub runtime_envs: Vec<EnvAssignment>,
    /// Workflow-level assignments, in the order given.
    pub workflow_runtime_envs: Vec<EnvAssignment>,
}

impl FlagInput {
    /// `true` when no field or env var was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.runtime_envs.is_empty() && self.workflow_runtime_envs.is_empty()
    }

    /// Builder-style setter, mostly for tests and scripted callers.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}

impl InputSource for FlagInput {
    fn field(&self, query: &FieldQuery<'_>) -> Result<Option<String>> {
        Ok(self.fields.get(query.meta.name).cloned())
    }

    fn env_vars(&self, scope: EnvScope<'_>, _current: &EnvVarSet) -> Result<Vec<EnvAssignment>> {
        Ok(match scope {
            EnvScope::Application => self.runtime_envs.clone(),
            EnvScope::Workflow(_) => self.workflow_runtime_envs.clone(),
        })
    }
}

/// Apply one input source on top of `base`.
///
/// Common fields are collected first so that a new `launch_type` decides
/// which section the workflow fields and workflow env vars land in.
///
/// # Errors
///
/// Returns an error if the source fails (e.g. the prompt terminal is gone).
pub fn collect(base: &PersistedConfig, source: &dyn InputSource) -> Result<PersistedConfig> {
    let mut next = base.clone();

    for field in COMMON_FIELDS {
        let launch_type = active_launch_type(&next);
        let query = FieldQuery {
            meta: &field.meta,
            current: field.get(&next.common),
            launch_type: &launch_type,
        };
        if let Some(value) = source.field(&query)? {
            debug!(field = field.meta.name, "collected value");
            field.set(&mut next.common, Some(value));
        }
    }
    let assignments = source.env_vars(EnvScope::Application, &next.common.runtime_envs)?;
    merge_assignments(&mut next.common.runtime_envs, assignments);

    let launch_type = active_launch_type(&next);
    let mut workflow = next.launch_types.get(&launch_type).cloned().unwrap_or_default();
    for field in WORKFLOW_FIELDS {
        let query = FieldQuery {
            meta: &field.meta,
            current: field.get(&workflow),
            launch_type: &launch_type,
        };
        if let Some(value) = source.field(&query)? {
            debug!(field = field.meta.name, launch_type = %launch_type, "collected value");
            field.set(&mut workflow, Some(value));
        }
    }
    let assignments = source.env_vars(EnvScope::Workflow(&launch_type), &workflow.runtime_envs)?;
    merge_assignments(&mut workflow.runtime_envs, assignments);

    if !workflow.is_empty() || next.launch_types.contains_key(&launch_type) {
        if next.common.launch_type.is_none() {
            next.common.launch_type = Some(launch_type.clone());
        }
        next.launch_types.insert(launch_type, workflow);
    }

    Ok(next)
}

fn merge_assignments(target: &mut EnvVarSet, assignments: Vec<EnvAssignment>) {
    for EnvAssignment { key, value } in assignments {
        debug!(key = %key, "merged env var");
        target.insert(key, value);
    }
}
