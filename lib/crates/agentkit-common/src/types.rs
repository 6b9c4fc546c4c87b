use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Deployment target of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LaunchType {
    /// Build and run on the operator's machine.
    #[default]
    Local,
    /// Build locally, run in the cloud.
    Hybrid,
    /// Build and run in the cloud.
    Cloud,
}

impl LaunchType {
    /// Every launch type, in presentation order.
    pub const ALL: [LaunchType; 3] = [LaunchType::Local, LaunchType::Hybrid, LaunchType::Cloud];

    /// Names accepted in `launch_type`, in the same order as [`LaunchType::ALL`].
    pub const NAMES: &'static [&'static str] = &["local", "hybrid", "cloud"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LaunchType::Local => "local",
            LaunchType::Hybrid => "hybrid",
            LaunchType::Cloud => "cloud",
        }
    }
}

impl fmt::Display for LaunchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `launch_type` value outside {local, hybrid, cloud}.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown launch type '{0}' (expected one of: local, hybrid, cloud)")]
pub struct UnknownLaunchType(pub String);

impl FromStr for LaunchType {
    type Err = UnknownLaunchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(LaunchType::Local),
            "hybrid" => Ok(LaunchType::Hybrid),
            "cloud" => Ok(LaunchType::Cloud),
            other => Err(UnknownLaunchType(other.to_string())),
        }
    }
}
