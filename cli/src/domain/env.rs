//! `KEY=VALUE` assignments given on the command line or at a prompt.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::UsageError;

/// Names accepted for runtime environment variables.
pub static ENV_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

/// Which env var set an assignment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvScope<'a> {
    /// Shared by every launch type.
    Application,
    /// Scoped to the named launch type.
    Workflow(&'a str),
}

/// One parsed `KEY=VALUE` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    pub key: String,
    pub value: String,
}

/// Parse `KEY=VALUE`. The value is everything after the first `=` and may
/// be empty or contain further `=` characters.
///
/// # Errors
///
/// Returns [`UsageError::MalformedEnv`] when there is no `=`, and
/// [`UsageError::InvalidEnvName`] when the key is not a valid name.
pub fn parse_assignment(raw: &str) -> Result<EnvAssignment, UsageError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(UsageError::MalformedEnv(raw.to_string()));
    };
    let key = key.trim();
    if !ENV_NAME_RE.is_match(key) {
        return Err(UsageError::InvalidEnvName(key.to_string()));
    }
    Ok(EnvAssignment {
        key: key.to_string(),
        value: value.to_string(),
    })
}
