//! Act tool - perform a natural-language action on the current page

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Result, StagehandConfig};
use crate::session::LazySession;
use crate::tools::binding::{acquire, SessionBinding};
use crate::tools::text_arg;
use crate::tools::traits::AgentTool;

/// Tool that executes a described action on the current page
pub struct ActTool {
    binding: SessionBinding,
}

impl ActTool {
    /// Create an act tool sharing a session holder
    pub fn new(holder: Arc<LazySession>) -> Self {
        Self {
            binding: SessionBinding::shared(holder),
        }
    }

    /// Create an act tool that owns a private session
    pub fn standalone(config: StagehandConfig) -> Self {
        Self {
            binding: SessionBinding::standalone(config),
        }
    }
}

#[async_trait]
impl AgentTool for ActTool {
    fn name(&self) -> &'static str {
        "stagehand_act"
    }

    fn description(&self) -> &'static str {
        "Use this tool to perform an action on the current web page using Stagehand. The input should be a string describing the action to perform."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "The action to perform, in natural language"
                }
            },
            "required": ["action"]
        })
    }

    async fn call(&self, input: &serde_json::Value) -> Result<String> {
        let action = match text_arg(input, "action") {
            Some(action) if !action.is_empty() => action,
            _ => return Ok("Failed to perform action: no action provided".to_string()),
        };

        let session = acquire(&self.binding).await?;

        match session.act(&action).await {
            Ok(outcome) if outcome.success => {
                Ok(format!("Action performed successfully: {}", outcome.message))
            }
            Ok(outcome) => Ok(format!("Failed to perform action: {}", outcome.message)),
            Err(e) => Ok(format!("Failed to perform action: {}", e)),
        }
    }
}
