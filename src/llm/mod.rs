//! LLM module - Language model integrations
//!
//! Provides a provider abstraction with an OpenAI-compatible client as
//! the primary implementation.

pub mod openai;
pub mod traits;

pub use openai::OpenAiClient;
pub use traits::{GenerateOptions, LLMProvider, LLMResponse, StreamCallback, TokenUsage};
