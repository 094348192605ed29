//! Toolkit - the four Stagehand tools bound to one shared session
//!
//! Builds the tool set an agent registers, exposes their declared
//! contract, and dispatches tool calls by name.

use std::sync::Arc;

use crate::core::{Config, Result, ToolCall, ToolDefinition, ToolResult};
use crate::session::{LazySession, StagehandSession};
use crate::tools::act::ActTool;
use crate::tools::extract::ExtractTool;
use crate::tools::navigate::NavigateTool;
use crate::tools::observe::ObserveTool;
use crate::tools::traits::AgentTool;

/// The Stagehand tool set sharing one lazy session
pub struct Toolkit {
    session: Arc<LazySession>,
    tools: Vec<Arc<dyn AgentTool>>,
}

impl Toolkit {
    /// Build a toolkit with a fresh session from configuration
    ///
    /// Session initialization starts in the background immediately.
    pub fn new(config: &Config) -> Self {
        let session = StagehandSession::new(config.stagehand.clone());
        Self::with_session(Arc::new(LazySession::new(Arc::new(session))))
    }

    /// Build a toolkit over an existing session holder
    pub fn with_session(session: Arc<LazySession>) -> Self {
        let tools: Vec<Arc<dyn AgentTool>> = vec![
            Arc::new(NavigateTool::new(session.clone())),
            Arc::new(ActTool::new(session.clone())),
            Arc::new(ExtractTool::new(session.clone())),
            Arc::new(ObserveTool::new(session.clone())),
        ];

        Self { session, tools }
    }

    /// Declared contract of every tool, for registration with an agent
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// The shared session holder
    pub fn session(&self) -> &Arc<LazySession> {
        &self.session
    }

    /// Execute a tool call
    ///
    /// An unknown tool name is a failure result, not an error; the only
    /// `Err` is a session-initialization failure.
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            return Ok(ToolResult::failure(
                &call.name,
                format!("Unknown tool: {}", call.name),
            ));
        };

        let output = tool.call(&call.arguments).await?;
        Ok(ToolResult::success(tool.name(), output))
    }

    /// Close the browser session
    ///
    /// Lifecycle ownership stays with whoever drives the toolkit; this is
    /// called once at the end of a run, never per tool call.
    pub async fn close(&self) -> Result<()> {
        self.session.ready().await?.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_definitions_cover_all_tools() {
        let toolkit = Toolkit::new(&Config::default());
        let names: Vec<String> = toolkit
            .definitions()
            .into_iter()
            .map(|d| d.function.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "stagehand_navigate",
                "stagehand_act",
                "stagehand_extract",
                "stagehand_observe"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_failure_result() {
        let toolkit = Toolkit::new(&Config::default());
        let call = ToolCall::new("stagehand_teleport", serde_json::json!({}));

        let result = toolkit.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("Unknown tool"));
    }
}
