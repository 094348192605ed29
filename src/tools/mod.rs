//! Tools module - Stagehand tool adapters for the agent
//!
//! Contains the tool capability trait, the four adapters, and the
//! toolkit that binds them to one shared session.

pub mod act;
pub mod binding;
pub mod extract;
pub mod navigate;
pub mod observe;
pub mod toolkit;
pub mod traits;

pub use act::ActTool;
pub use extract::ExtractTool;
pub use navigate::NavigateTool;
pub use observe::ObserveTool;
pub use toolkit::Toolkit;
pub use traits::AgentTool;

/// Read a textual argument that may arrive as a bare string or as a
/// field of an object, depending on how the agent framework packs input.
pub(crate) fn text_arg(input: &serde_json::Value, key: &str) -> Option<String> {
    match input {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}
