//! Observe tool - list candidate actions on the current page

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Result, StagehandConfig};
use crate::session::LazySession;
use crate::tools::binding::{acquire, SessionBinding};
use crate::tools::text_arg;
use crate::tools::traits::AgentTool;

/// Tool that surveys the current page for possible actions
pub struct ObserveTool {
    binding: SessionBinding,
}

impl ObserveTool {
    /// Create an observe tool sharing a session holder
    pub fn new(holder: Arc<LazySession>) -> Self {
        Self {
            binding: SessionBinding::shared(holder),
        }
    }

    /// Create an observe tool that owns a private session
    pub fn standalone(config: StagehandConfig) -> Self {
        Self {
            binding: SessionBinding::standalone(config),
        }
    }
}

#[async_trait]
impl AgentTool for ObserveTool {
    fn name(&self) -> &'static str {
        "stagehand_observe"
    }

    fn description(&self) -> &'static str {
        "Use this tool to list candidate actions on the current web page using Stagehand. The input is an optional instruction focusing the observation."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "instruction": {
                    "type": "string",
                    "description": "Optional instruction focusing the observation"
                }
            }
        })
    }

    async fn call(&self, input: &serde_json::Value) -> Result<String> {
        // Instruction is optional; an absent or empty one means "observe
        // the whole page".
        let instruction = text_arg(input, "instruction").filter(|s| !s.is_empty());

        let session = acquire(&self.binding).await?;

        match session.observe(instruction.as_deref()).await {
            Ok(actions) => match serde_json::to_string(&actions) {
                Ok(text) => Ok(text),
                Err(e) => Ok(format!("Failed to observe: {}", e)),
            },
            Err(e) => Ok(format!("Failed to observe: {}", e)),
        }
    }
}
