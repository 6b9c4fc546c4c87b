//! Rule checks over a fully collected configuration.
//!
//! Every violation is collected before reporting. The order is fixed:
//! required fields, then formats, then enumerations, then launch type
//! applicability; inside each phase fields follow schema order and
//! sections follow [`ordered_sections`].

use std::sync::LazyLock;

use agentkit_common::{EnvVarSet, LaunchType, PersistedConfig};
use regex::Regex;
use serde::Serialize;

use crate::domain::config::ordered_sections;
use crate::domain::env::ENV_NAME_RE;
use crate::domain::error::ConfigError;
use crate::domain::schema::{
    COMMON_FIELDS, ENTRY_POINT_EXTENSIONS, FieldKind, FieldMeta, WORKFLOW_FIELDS,
};

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\d+\.\d+(\.\d+)?$").expect("valid regex")
});

/// One broken rule: which field, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Check a candidate configuration and return every violation found.
#[must_use]
pub fn validate(config: &PersistedConfig) -> Vec<Violation> {
    let sections = ordered_sections(&[config]);
    let mut violations = Vec::new();

    // Required fields
    for field in COMMON_FIELDS {
        if field.meta.required && field.get(&config.common).is_none_or(|v| v.trim().is_empty()) {
            violations.push(Violation::new(field.meta.name, "is required"));
        }
    }

    // Formats
    for field in COMMON_FIELDS {
        if let Some(reason) = field.get(&config.common).and_then(|v| format_problem(&field.meta, v)) {
            violations.push(Violation::new(field.meta.name, reason));
        }
    }
    check_env_names("runtime_envs", &config.common.runtime_envs, &mut violations);
    for section in &sections {
        let workflow = &config.launch_types[*section];
        for field in WORKFLOW_FIELDS {
            if let Some(reason) = field.get(workflow).and_then(|v| format_problem(&field.meta, v)) {
                violations.push(Violation::new(format!("{section}.{}", field.meta.name), reason));
            }
        }
        check_env_names(&format!("{section}.runtime_envs"), &workflow.runtime_envs, &mut violations);
    }

    // Enumerations
    for field in COMMON_FIELDS {
        if let Some(reason) = field.get(&config.common).and_then(|v| choice_problem(&field.meta, v)) {
            violations.push(Violation::new(field.meta.name, reason));
        }
    }
    for section in &sections {
        if section.parse::<LaunchType>().is_err() {
            violations.push(Violation::new(
                format!("launch_types.{section}"),
                format!("unknown launch type (expected one of: {})", LaunchType::NAMES.join(", ")),
            ));
            continue;
        }
        let workflow = &config.launch_types[*section];
        for field in WORKFLOW_FIELDS {
            if let Some(reason) = field.get(workflow).and_then(|v| choice_problem(&field.meta, v)) {
                violations.push(Violation::new(format!("{section}.{}", field.meta.name), reason));
            }
        }
    }

    // Applicability
    for section in sections.iter().filter(|s| s.parse::<LaunchType>().is_ok()) {
        let workflow = &config.launch_types[*section];
        for field in WORKFLOW_FIELDS {
            if field.get(workflow).is_some() && !field.meta.supports(section) {
                violations.push(Violation::new(
                    format!("{section}.{}", field.meta.name),
                    format!("does not apply to launch type {section}"),
                ));
            }
        }
    }

    violations
}

/// [`validate`] as a `Result`, for use with `?`.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] carrying every violation.
pub fn check(config: &PersistedConfig) -> Result<(), ConfigError> {
    let violations = validate(config);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(violations))
    }
}

/// Problem with a single value, ignoring rules that need the whole
/// configuration. Used to reject bad answers at a prompt.
#[must_use]
pub fn value_problem(meta: &FieldMeta, value: &str) -> Option<String> {
    if meta.required && value.trim().is_empty() {
        return Some("is required".to_string());
    }
    format_problem(meta, value).or_else(|| choice_problem(meta, value))
}

fn format_problem(meta: &FieldMeta, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    match meta.kind {
        FieldKind::ScriptPath => {
            let ok = ENTRY_POINT_EXTENSIONS
                .iter()
                .any(|ext| value.len() > ext.len() && value.ends_with(ext));
            (!ok).then(|| {
                format!(
                    "must be a {} script (got '{value}')",
                    ENTRY_POINT_EXTENSIONS.join(", ")
                )
            })
        }
        FieldKind::Version => (!VERSION_RE.is_match(value)).then(|| {
            format!("must look like MAJOR.MINOR or MAJOR.MINOR.PATCH (got '{value}')")
        }),
        FieldKind::Text | FieldKind::Path | FieldKind::Choice(_) => None,
    }
}

fn choice_problem(meta: &FieldMeta, value: &str) -> Option<String> {
    match meta.kind {
        FieldKind::Choice(options) if !options.contains(&value) => Some(format!(
            "must be one of: {} (got '{value}')",
            options.join(", ")
        )),
        _ => None,
    }
}

fn check_env_names(prefix: &str, envs: &EnvVarSet, violations: &mut Vec<Violation>) {
    for key in envs.keys().filter(|k| !ENV_NAME_RE.is_match(k)) {
        violations.push(Violation::new(
            format!("{prefix}.{key}"),
            "is not a valid variable name",
        ));
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
