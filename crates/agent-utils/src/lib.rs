//! Shared utilities for the agent workspace
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and environment-driven configuration helpers.

pub mod config;
pub mod logging;

pub use config::{ConfigError, env_var, parse_var};
pub use logging::{LogFormat, init_tracing};
