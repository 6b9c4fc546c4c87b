use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::env::{EnvVarSet, effective_env};
use crate::scalar;
use crate::types::LaunchType;

/// Contents of `agentkit.yaml`.
///
/// Scalar values are kept as strings, `launch_type` included, so a file
/// edited by hand with an unknown value still loads and can be reported
/// field by field instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PersistedConfig {
    /// Settings shared by every launch type.
    pub common: CommonConfig,
    /// Per launch type settings, keyed by launch type name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub launch_types: BTreeMap<String, WorkflowConfig>,
}

/// Settings that do not depend on the launch type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub agent_name: Option<String>,
    /// Script started by the runtime, e.g. `agent.py`.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub entry_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub python_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub dependencies_file: Option<String>,
    /// One of `local`, `hybrid`, `cloud`.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub launch_type: Option<String>,
    /// Application-level environment variables.
    #[serde(skip_serializing_if = "EnvVarSet::is_empty", deserialize_with = "scalar::env_map")]
    pub runtime_envs: EnvVarSet,
}

/// Settings scoped to a single launch type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WorkflowConfig {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub region: Option<String>,
    /// Object storage bucket holding uploaded sources (cloud builds).
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub storage_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub image_tag: Option<String>,
    /// Container registry instance.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub cr_instance_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub cr_namespace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar::option")]
    pub cr_repo_name: Option<String>,
    /// Workflow-level environment variables.
    #[serde(skip_serializing_if = "EnvVarSet::is_empty", deserialize_with = "scalar::env_map")]
    pub runtime_envs: EnvVarSet,
}

impl WorkflowConfig {
    /// `true` when nothing is set in this section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &WorkflowConfig::default()
    }
}

impl PersistedConfig {
    /// The selected launch type, or `None` when unset or not recognized.
    #[must_use]
    pub fn launch_type(&self) -> Option<LaunchType> {
        self.common.launch_type.as_deref()?.parse().ok()
    }

    /// Settings of the selected launch type. An unset launch type selects
    /// the default one.
    #[must_use]
    pub fn workflow(&self) -> Option<&WorkflowConfig> {
        let name = self
            .common
            .launch_type
            .as_deref()
            .unwrap_or(LaunchType::default().as_str());
        self.launch_types.get(name)
    }

    /// Environment the selected launch type runs with: application-level
    /// variables overridden by the workflow-level ones.
    #[must_use]
    pub fn effective_env(&self) -> EnvVarSet {
        match self.workflow() {
            Some(workflow) => effective_env(&self.common.runtime_envs, &workflow.runtime_envs),
            None => self.common.runtime_envs.clone(),
        }
    }
}
