//! Types shared by every agentkit command that reads `agentkit.yaml`.
//!
//! The `config` command writes these structures; `build` and `launch`
//! consume them together with the effective environment.

pub mod config;
pub mod env;
mod scalar;
pub mod types;

pub use config::{CommonConfig, PersistedConfig, WorkflowConfig};
pub use env::{EnvVarSet, effective_env};
pub use types::{LaunchType, UnknownLaunchType};
