//! Stagekit - Stagehand browser tools for LLM agents
//!
//! Exposes a Stagehand-style browser-automation session to an LLM
//! tool-calling agent as four thin tools: navigate, act, extract, and
//! observe. One lazily initialized session is shared by all tools.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Session**: The `BrowserSession` seam, its lazy holder, and the
//!   Stagehand CLI binding
//! - **Tools**: The four tool adapters and the toolkit that binds them
//! - **LLM**: Provider abstraction with an OpenAI-compatible client
//! - **Agent**: Tool-calling loop and conversation management
//!
//! # Usage
//!
//! ```rust,no_run
//! use stagekit::{Agent, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut agent = Agent::from_config(Config::load())?;
//!     let answer = agent.process("Navigate to https://www.google.com").await?;
//!     println!("{}", answer);
//!     agent.close().await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod core;
pub mod llm;
pub mod session;
pub mod tools;

// Re-export commonly used items
pub use agent::Agent;
pub use core::{Config, Result, StagekitError};
pub use session::{BrowserSession, LazySession};
pub use tools::Toolkit;
