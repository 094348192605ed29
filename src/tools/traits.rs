//! Tool capability trait
//!
//! A callable unit an agent framework can invoke: a name, a one-line
//! description, an input schema, and an invoke-and-return-text operation.

use async_trait::async_trait;

use crate::core::{Result, ToolDefinition};

/// Trait for agent-callable tools
///
/// `call` converts every failure of its delegated session operation into
/// a descriptive string returned as a normal result, so an LLM caller
/// sees failures as conversational text. The only `Err` it may return is
/// a session-initialization failure, which no tool call can survive.
#[async_trait]
pub trait AgentTool: Send + Sync {
    /// Name the agent framework dispatches on
    fn name(&self) -> &'static str;

    /// One-line natural-language description
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's input
    fn parameters(&self) -> serde_json::Value;

    /// Invoke the tool with JSON input and return a textual result
    async fn call(&self, input: &serde_json::Value) -> Result<String>;

    /// The declared tool-calling contract for this tool
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(self.name(), self.description(), self.parameters())
    }
}
