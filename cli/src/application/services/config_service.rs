//! Application service: configuration use-cases.
//!
//! `plan` runs collection, validation and diffing without side effects;
//! `commit` is the single path through which a configuration is written.

use agentkit_common::PersistedConfig;
use anyhow::Result;
use tracing::{debug, info};

use crate::application::ports::{ConfigStore, InputSource};
use crate::application::services::collector::collect;
use crate::domain::validate::check;
use crate::domain::{FieldChange, diff, with_defaults};

/// Outcome of collection and validation, ready to be shown or committed.
#[derive(Debug, Clone)]
pub struct ConfigPlan {
    /// What the store held before, if anything.
    pub existing: Option<PersistedConfig>,
    /// The validated configuration to persist.
    pub candidate: PersistedConfig,
    /// Changes from `existing` (everything unset when absent) to `candidate`.
    pub changes: Vec<FieldChange>,
}

impl ConfigPlan {
    /// A first run always writes; later runs only when something changed.
    #[must_use]
    pub fn needs_write(&self) -> bool {
        self.existing.is_none() || !self.changes.is_empty()
    }
}

/// Load the stored configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<Option<PersistedConfig>> {
    store.load()
}

/// Collect from every source in turn, validate, and diff against the
/// stored configuration. Nothing is written.
///
/// # Errors
///
/// Returns an error if the store cannot be read, a source fails, or the
/// result breaks a rule ([`crate::domain::ConfigError::Invalid`]).
pub fn plan(store: &impl ConfigStore, sources: &[&dyn InputSource]) -> Result<ConfigPlan> {
    let existing = store.load()?;
    debug!(path = %store.path().display(), found = existing.is_some(), "loaded configuration");

    let mut candidate = existing.clone().unwrap_or_else(with_defaults);
    for source in sources {
        candidate = collect(&candidate, *source)?;
    }
    check(&candidate)?;

    let changes = diff(existing.as_ref().unwrap_or(&PersistedConfig::default()), &candidate);
    debug!(changes = changes.len(), "computed diff");
    Ok(ConfigPlan {
        existing,
        candidate,
        changes,
    })
}

/// Persist a planned configuration.
///
/// # Errors
///
/// Returns an error if the store cannot write; the previous file is kept.
pub fn commit(store: &impl ConfigStore, plan: &ConfigPlan) -> Result<()> {
    store.save(&plan.candidate)?;
    info!(path = %store.path().display(), changes = plan.changes.len(), "configuration saved");
    Ok(())
}
