//! Agent module - the tool-calling loop and conversation management

pub mod conversation;
pub mod runner;

pub use conversation::Conversation;
pub use runner::Agent;
