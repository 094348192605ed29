//! Browser session trait for abstracting the automation backend
//!
//! Everything the tool adapters need from a Stagehand-style session:
//! navigation, grounded actions, structured extraction, and observation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Outcome of a grounded action execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActOutcome {
    /// Whether the action was carried out
    pub success: bool,
    /// Human-readable description of what happened
    pub message: String,
    /// The action as the session understood it
    #[serde(default)]
    pub action: String,
}

/// A candidate action found on the current page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedAction {
    /// Selector locating the element
    pub selector: String,
    /// What interacting with the element would do
    pub description: String,
    /// Suggested method (click, fill, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Suggested arguments for the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
}

/// Trait for browser automation sessions
///
/// One implementor drives the real `stagehand` CLI; tests substitute
/// their own.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Start the underlying browser session
    async fn init(&self) -> Result<()>;

    /// Navigate the page to a URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Execute a natural-language action on the current page
    async fn act(&self, action: &str) -> Result<ActOutcome>;

    /// Extract structured data from the current page
    ///
    /// The schema is caller-supplied and passed through unvalidated.
    async fn extract(&self, instruction: &str, schema: &serde_json::Value)
        -> Result<serde_json::Value>;

    /// List candidate actions on the current page
    async fn observe(&self, instruction: Option<&str>) -> Result<Vec<ObservedAction>>;

    /// Close the browser session
    async fn close(&self) -> Result<()>;
}
