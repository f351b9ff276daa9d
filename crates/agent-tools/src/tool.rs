//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions that LLM agents can call to interact with the world.
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// Describes the parameters this tool expects. The LLM uses this schema
    /// to generate valid tool calls.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a single-string tool:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "query": {
    ///             "type": "string",
    ///             "description": "Format \"PRINCIPAL RATE YEARS\""
    ///         }
    ///     },
    ///     "required": ["query"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;

    /// Describe the tool for an LLM tool definition list
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Serializable description of a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Extract a single string argument from tool parameters
///
/// Accepts either a bare JSON string or an object carrying `key`. Anything
/// else yields an empty string so the tool can report the problem in its
/// own result record.
pub fn string_input(params: &Value, key: &str) -> String {
    match params {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}
