//! Tool management and execution framework for LLM agents
//!
//! This crate provides a framework for defining and executing tools (functions)
//! that agents can use to perform actions.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Error, Result};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolInfo, string_input};
