//! Extract tool - pull structured data out of the current page

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Result, StagehandConfig};
use crate::session::LazySession;
use crate::tools::binding::{acquire, SessionBinding};
use crate::tools::text_arg;
use crate::tools::traits::AgentTool;

/// Tool that extracts structured data using a caller-supplied schema
///
/// The schema is a free-form key-value record describing the desired
/// shape; it is passed through to the session unvalidated.
pub struct ExtractTool {
    binding: SessionBinding,
}

impl ExtractTool {
    /// Create an extract tool sharing a session holder
    pub fn new(holder: Arc<LazySession>) -> Self {
        Self {
            binding: SessionBinding::shared(holder),
        }
    }

    /// Create an extract tool that owns a private session
    pub fn standalone(config: StagehandConfig) -> Self {
        Self {
            binding: SessionBinding::standalone(config),
        }
    }
}

#[async_trait]
impl AgentTool for ExtractTool {
    fn name(&self) -> &'static str {
        "stagehand_extract"
    }

    fn description(&self) -> &'static str {
        "Use this tool to extract structured information from the current web page using Stagehand. Provide an instruction and a schema describing the desired shape."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "instruction": {
                    "type": "string",
                    "description": "What to extract from the page"
                },
                "schema": {
                    "type": "object",
                    "description": "Free-form key-value record describing the desired output shape",
                    "additionalProperties": true
                }
            },
            "required": ["instruction", "schema"]
        })
    }

    async fn call(&self, input: &serde_json::Value) -> Result<String> {
        let instruction = match text_arg(input, "instruction") {
            Some(instruction) if !instruction.is_empty() => instruction,
            _ => return Ok("Failed to extract information: no instruction provided".to_string()),
        };

        let schema = input
            .get("schema")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        let session = acquire(&self.binding).await?;

        match session.extract(&instruction, &schema).await {
            Ok(value) => match serde_json::to_string(&value) {
                Ok(text) => Ok(text),
                Err(e) => Ok(format!("Failed to extract information: {}", e)),
            },
            Err(e) => Ok(format!("Failed to extract information: {}", e)),
        }
    }
}
