//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `agentkit_common`,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::Path;

use agentkit_common::{EnvVarSet, PersistedConfig};
use anyhow::Result;

use crate::domain::{EnvAssignment, EnvScope, FieldMeta};

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Access to the persisted configuration file.
///
/// Only the store touches the file. Services receive it explicitly instead
/// of locating the file themselves.
pub trait ConfigStore {
    /// Load the configuration, returning `None` if no file exists yet.
    fn load(&self) -> Result<Option<PersistedConfig>>;
    /// Replace the stored configuration. Either the whole new content is
    /// visible afterwards or the previous file is left untouched.
    fn save(&self, config: &PersistedConfig) -> Result<()>;
    /// Location of the file, for reporting.
    fn path(&self) -> &Path;
}

// ── Input Source Port ─────────────────────────────────────────────────────────

/// A question the collector asks about one field.
pub struct FieldQuery<'a> {
    pub meta: &'static FieldMeta,
    /// Value the field has before this source is consulted.
    pub current: Option<&'a str>,
    /// Launch type the collected workflow values are written under.
    pub launch_type: &'a str,
}

/// Where configuration values come from: flags given up front, or an
/// operator answering prompts. The collector treats every source the same.
pub trait InputSource {
    /// New value for a field, or `None` to leave it unchanged.
    fn field(&self, query: &FieldQuery<'_>) -> Result<Option<String>>;
    /// Assignments to merge by key into the env var set of `scope`.
    fn env_vars(&self, scope: EnvScope<'_>, current: &EnvVarSet) -> Result<Vec<EnvAssignment>>;
}
