//! Command implementations

pub mod config;
pub mod field_args;
