//! Tool trait definition

use async_trait::async_trait;
use invest_core::Result;
use serde_json::Value;

/// Trait for tools the agent runtime can execute
///
/// Tools are functions an LLM agent can call to look up data. Each tool
/// provides a stable name, a description, and a JSON schema for its input.
/// Implementations in this workspace return a response envelope as the
/// output value and convert every internal failure into an error envelope,
/// so `execute` never surfaces an `Err` to the runtime for data problems.
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
    /// Tool output as a JSON response envelope
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
    fn input_schema(&self) -> Value;
}
