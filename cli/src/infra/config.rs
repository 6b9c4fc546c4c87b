//! Infrastructure implementation of the `ConfigStore` port.
//!
//! The configuration lives in a single YAML file. Writes go to a temp file
//! in the same directory which is then renamed over the target, so readers
//! see either the old or the new content and never a partial file.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use agentkit_common::PersistedConfig;
use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::DEFAULT_CONFIG_FILE;

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    /// Create a store for an explicit path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Pick the file to use: the `--config` value, then the
    /// `AGENTKIT_CONFIG` value, then `agentkit.yaml` in the working directory.
    #[must_use]
    pub fn resolve(explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match env {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("cannot create temp file in {}", dir.display()))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("cannot write temp file {}", temp.path().display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("cannot flush temp file {}", temp.path().display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", temp.path().display()))?;
        }

        temp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("cannot write {}", self.path.display()))?;
        Ok(())
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<Option<PersistedConfig>> {
        let exists = self
            .path
            .try_exists()
            .with_context(|| format!("cannot access {}", self.path.display()))?;
        if !exists {
            debug!(path = %self.path.display(), "no configuration file");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Some(PersistedConfig::default()));
        }
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        Ok(Some(config))
    }

    fn save(&self, config: &PersistedConfig) -> Result<()> {
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        self.write_atomic(&content)?;
        debug!(path = %self.path.display(), bytes = content.len(), "wrote configuration");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
