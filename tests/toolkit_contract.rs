//! Tool adapter contract tests
//!
//! Exercises the four tools and the shared lazy session against a mock
//! browser session: exact output strings, failure prefixes, extraction
//! round-trips, and single-initialization sharing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use stagekit::core::{Result, StagekitError, ToolCall};
use stagekit::session::{ActOutcome, BrowserSession, LazySession, ObservedAction};
use stagekit::tools::{ActTool, AgentTool, ExtractTool, NavigateTool, ObserveTool, Toolkit};

/// Scriptable mock session
#[derive(Default)]
struct MockSession {
    init_calls: AtomicUsize,
    goto_calls: AtomicUsize,
    /// Hold initialization open until released
    init_gate: Option<Arc<Notify>>,
    fail_init: bool,
    fail_goto: Option<String>,
    act_outcome: Option<ActOutcome>,
    fail_act: Option<String>,
    extract_value: Option<serde_json::Value>,
    fail_extract: Option<String>,
    observed: Vec<ObservedAction>,
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn init(&self) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.init_gate {
            gate.notified().await;
        }
        if self.fail_init {
            Err(StagekitError::session("browser failed to launch"))
        } else {
            Ok(())
        }
    }

    async fn goto(&self, _url: &str) -> Result<()> {
        self.goto_calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_goto {
            Some(msg) => Err(StagekitError::session(msg.clone())),
            None => Ok(()),
        }
    }

    async fn act(&self, action: &str) -> Result<ActOutcome> {
        if let Some(msg) = &self.fail_act {
            return Err(StagekitError::session(msg.clone()));
        }
        Ok(self.act_outcome.clone().unwrap_or(ActOutcome {
            success: true,
            message: format!("performed: {}", action),
            action: action.to_string(),
        }))
    }

    async fn extract(
        &self,
        _instruction: &str,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        if let Some(msg) = &self.fail_extract {
            return Err(StagekitError::session(msg.clone()));
        }
        Ok(self.extract_value.clone().unwrap_or(serde_json::Value::Null))
    }

    async fn observe(&self, _instruction: Option<&str>) -> Result<Vec<ObservedAction>> {
        Ok(self.observed.clone())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

fn holder(session: MockSession) -> (Arc<MockSession>, Arc<LazySession>) {
    let session = Arc::new(session);
    let holder = Arc::new(LazySession::new(session.clone()));
    (session, holder)
}

#[tokio::test]
async fn navigate_success_returns_exact_confirmation() {
    let (_, holder) = holder(MockSession::default());
    let tool = NavigateTool::new(holder);

    let result = tool
        .call(&json!({"url": "https://www.google.com"}))
        .await
        .unwrap();

    assert_eq!(result, "Successfully navigated to https://www.google.com.");
}

#[tokio::test]
async fn navigate_failure_keeps_prefix_and_cause() {
    let (_, holder) = holder(MockSession {
        fail_goto: Some("net::ERR_NAME_NOT_RESOLVED".to_string()),
        ..Default::default()
    });
    let tool = NavigateTool::new(holder);

    let result = tool.call(&json!({"url": "https://nope.invalid"})).await.unwrap();

    assert!(result.starts_with("Failed to navigate:"));
    assert!(result.contains("net::ERR_NAME_NOT_RESOLVED"));
}

#[tokio::test]
async fn navigate_without_url_does_not_touch_the_session() {
    let (session, holder) = holder(MockSession::default());
    let tool = NavigateTool::new(holder);

    let result = tool.call(&json!({})).await.unwrap();

    assert!(result.starts_with("Failed to navigate:"));
    assert_eq!(session.goto_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn act_prefix_matches_delegated_success_flag() {
    let (_, holder) = holder(MockSession {
        act_outcome: Some(ActOutcome {
            success: true,
            message: "clicked the search button".to_string(),
            action: String::new(),
        }),
        ..Default::default()
    });
    let tool = ActTool::new(holder);
    let result = tool.call(&json!({"action": "click search"})).await.unwrap();
    assert_eq!(result, "Action performed successfully: clicked the search button");

    let (_, holder) = holder_failed_act("no matching element");
    let tool = ActTool::new(holder);
    let result = tool.call(&json!({"action": "click search"})).await.unwrap();
    assert_eq!(result, "Failed to perform action: no matching element");
}

fn holder_failed_act(message: &str) -> (Arc<MockSession>, Arc<LazySession>) {
    holder(MockSession {
        act_outcome: Some(ActOutcome {
            success: false,
            message: message.to_string(),
            action: String::new(),
        }),
        ..Default::default()
    })
}

#[tokio::test]
async fn act_delegated_error_uses_failure_prefix() {
    let (_, holder) = holder(MockSession {
        fail_act: Some("page crashed".to_string()),
        ..Default::default()
    });
    let tool = ActTool::new(holder);

    let result = tool.call(&json!({"action": "scroll down"})).await.unwrap();

    assert!(result.starts_with("Failed to perform action:"));
    assert!(result.contains("page crashed"));
}

#[tokio::test]
async fn extract_output_round_trips_to_the_delegated_value() {
    let produced = json!({"title": "Example Domain", "links": ["https://www.iana.org"]});
    let (_, holder) = holder(MockSession {
        extract_value: Some(produced.clone()),
        ..Default::default()
    });
    let tool = ExtractTool::new(holder);

    let result = tool
        .call(&json!({
            "instruction": "get the page title and links",
            "schema": {"title": "string", "links": "array"}
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(parsed, produced);
}

#[tokio::test]
async fn extract_failure_keeps_prefix() {
    let (_, holder) = holder(MockSession {
        fail_extract: Some("model refused".to_string()),
        ..Default::default()
    });
    let tool = ExtractTool::new(holder);

    let result = tool
        .call(&json!({"instruction": "get prices", "schema": {}}))
        .await
        .unwrap();

    assert!(result.starts_with("Failed to extract information:"));
    assert!(result.contains("model refused"));
}

#[tokio::test]
async fn observe_serializes_the_candidate_list() {
    let (_, holder) = holder(MockSession {
        observed: vec![ObservedAction {
            selector: "#search".to_string(),
            description: "the search box".to_string(),
            method: Some("fill".to_string()),
            arguments: None,
        }],
        ..Default::default()
    });
    let tool = ObserveTool::new(holder);

    let result = tool.call(&json!({})).await.unwrap();

    let parsed: Vec<ObservedAction> = serde_json::from_str(&result).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].selector, "#search");
}

#[tokio::test]
async fn call_before_init_completes_runs_exactly_once_after_it() {
    let gate = Arc::new(Notify::new());
    let (session, holder) = holder(MockSession {
        init_gate: Some(gate.clone()),
        ..Default::default()
    });
    let tool = NavigateTool::new(holder);

    let call = tokio::spawn(async move {
        tool.call(&json!({"url": "https://example.com"})).await
    });

    // The tool is parked on initialization; nothing has navigated yet
    tokio::task::yield_now().await;
    assert_eq!(session.goto_calls.load(Ordering::SeqCst), 0);

    gate.notify_waiters();
    gate.notify_one();

    let result = call.await.unwrap().unwrap();
    assert_eq!(result, "Successfully navigated to https://example.com.");
    assert_eq!(session.goto_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.init_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn shared_holder_initializes_once_across_tools() {
    let (session, holder) = holder(MockSession::default());
    let navigate = NavigateTool::new(holder.clone());
    let act = ActTool::new(holder);

    navigate
        .call(&json!({"url": "https://example.com"}))
        .await
        .unwrap();
    act.call(&json!({"action": "click the first link"}))
        .await
        .unwrap();

    assert_eq!(session.init_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn init_failure_surfaces_to_every_tool_as_an_error() {
    let (session, holder) = holder(MockSession {
        fail_init: true,
        ..Default::default()
    });
    let navigate = NavigateTool::new(holder.clone());
    let observe = ObserveTool::new(holder);

    let first = navigate.call(&json!({"url": "https://example.com"})).await;
    let second = observe.call(&json!({})).await;

    let first = first.expect_err("init failure must propagate");
    assert!(matches!(first, StagekitError::Init(_)));
    assert!(second.is_err());
    // One attempt, never retried
    assert_eq!(session.init_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn toolkit_dispatches_by_declared_name() {
    let (session, holder) = holder(MockSession::default());
    let toolkit = Toolkit::with_session(holder);

    let call = ToolCall::new(
        "stagehand_navigate",
        json!({"url": "https://www.google.com"}),
    );
    let result = toolkit.execute(&call).await.unwrap();

    assert!(result.success);
    assert_eq!(result.output, "Successfully navigated to https://www.google.com.");
    assert_eq!(session.init_calls.load(Ordering::SeqCst), 1);

    let defs = toolkit.definitions();
    assert_eq!(defs.len(), 4);
    assert!(defs
        .iter()
        .any(|d| d.function.name == "stagehand_extract"
            && d.function.parameters["required"] == json!(["instruction", "schema"])));
}

#[tokio::test]
async fn bare_string_input_is_accepted() {
    let (_, holder) = holder(MockSession::default());
    let tool = NavigateTool::new(holder);

    let result = tool.call(&json!("https://example.com")).await.unwrap();

    assert_eq!(result, "Successfully navigated to https://example.com.");
}
