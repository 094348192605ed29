//! Custom error types for Stagekit
//!
//! Provides a unified error handling system across all modules.

use std::sync::Arc;
use thiserror::Error;

/// Main error type for Stagekit operations
#[derive(Error, Debug)]
pub enum StagekitError {
    /// Model API connection or protocol errors
    #[error("Model API error: {0}")]
    Model(String),

    /// Browser session errors
    #[error("Session error: {0}")]
    Session(String),

    /// Tool execution errors
    #[error("Tool execution error: {0}")]
    Tool(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stagehand CLI not installed
    #[error("stagehand not found. Install with: npm install -g @browserbasehq/stagehand-cli")]
    StagehandNotFound,

    /// Missing API key for the model client
    #[error("No API key configured. Set {0} or add it to your .env file")]
    MissingApiKey(String),

    /// Session initialization failed. The same failure is delivered to
    /// every caller that awaits the lazy holder.
    #[error("Session initialization failed: {0}")]
    Init(Arc<StagekitError>),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Stagekit operations
pub type Result<T> = std::result::Result<T, StagekitError>;

impl StagekitError {
    /// Create a model API error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
