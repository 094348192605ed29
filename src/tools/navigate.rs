//! Navigate tool - drive the page to a URL

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Result, StagehandConfig};
use crate::session::LazySession;
use crate::tools::binding::{acquire, SessionBinding};
use crate::tools::text_arg;
use crate::tools::traits::AgentTool;

/// Tool that navigates the session's page to a URL
pub struct NavigateTool {
    binding: SessionBinding,
}

impl NavigateTool {
    /// Create a navigate tool sharing a session holder
    pub fn new(holder: Arc<LazySession>) -> Self {
        Self {
            binding: SessionBinding::shared(holder),
        }
    }

    /// Create a navigate tool that owns a private session
    pub fn standalone(config: StagehandConfig) -> Self {
        Self {
            binding: SessionBinding::standalone(config),
        }
    }
}

#[async_trait]
impl AgentTool for NavigateTool {
    fn name(&self) -> &'static str {
        "stagehand_navigate"
    }

    fn description(&self) -> &'static str {
        "Use this tool to navigate to a specific URL using Stagehand. The input should be a valid URL as a string."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to navigate to"
                }
            },
            "required": ["url"]
        })
    }

    async fn call(&self, input: &serde_json::Value) -> Result<String> {
        let url = match text_arg(input, "url") {
            Some(url) if !url.is_empty() => url,
            _ => return Ok("Failed to navigate: no URL provided".to_string()),
        };

        let session = acquire(&self.binding).await?;

        match session.goto(&url).await {
            Ok(()) => Ok(format!("Successfully navigated to {}.", url)),
            Err(e) => Ok(format!("Failed to navigate: {}", e)),
        }
    }
}
