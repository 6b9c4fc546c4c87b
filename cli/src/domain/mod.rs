//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `dialoguer`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod diff;
pub mod env;
pub mod error;
pub mod schema;
pub mod validate;

pub use config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, NOT_SET, with_defaults};
pub use diff::{FieldChange, diff};
pub use env::{EnvAssignment, EnvScope, parse_assignment};
pub use error::{ConfigError, UsageError};
pub use schema::{COMMON_FIELDS, FieldKind, FieldMeta, WORKFLOW_FIELDS};
pub use validate::{Violation, validate};
