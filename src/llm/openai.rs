//! OpenAI-compatible client implementation
//!
//! Async HTTP client for the chat-completions API with tool calling and
//! SSE streaming support.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{Config, Message, Result, StagekitError, ToolCall, ToolDefinition};
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse, StreamCallback, TokenUsage};

/// OpenAI-compatible API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    debug: bool,
}

/// Chat-completions request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    stream: bool,
}

/// Message in the API wire format
#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    /// Null when the assistant only emits tool calls
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

/// Tool call in the API wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiToolCall {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: ApiFunction,
}

fn function_type() -> String {
    "function".to_string()
}

/// Function payload in a tool call; arguments arrive JSON-encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

/// Chat-completions response (non-streaming)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Streaming chunk response
#[derive(Debug, Deserialize)]
struct StreamChunkResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.openai.timeout_secs))
            .build()
            .map_err(StagekitError::from)?;

        Ok(Self {
            client,
            base_url: config.openai.base_url.trim_end_matches('/').to_string(),
            api_key,
            debug: config.agent.debug,
        })
    }

    /// Create a client with an explicit base URL and key
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(StagekitError::from)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            debug: false,
        })
    }

    /// Convert an internal message to the wire format
    fn to_api_message(msg: &Message) -> ApiMessage {
        let tool_calls = msg.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|tc| ApiToolCall {
                    id: tc.id.clone(),
                    call_type: "function".to_string(),
                    function: ApiFunction {
                        name: tc.name.clone(),
                        arguments: tc.arguments.to_string(),
                    },
                })
                .collect()
        });

        ApiMessage {
            role: msg.role.clone(),
            content: if msg.content.is_empty() && tool_calls.is_some() {
                None
            } else {
                Some(msg.content.clone())
            },
            tool_calls,
            tool_call_id: msg.tool_call_id.clone(),
        }
    }

    /// Convert an API tool call back to the internal shape
    fn to_tool_call(tc: ApiToolCall) -> ToolCall {
        // Arguments arrive as a JSON-encoded string
        let arguments = serde_json::from_str(&tc.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        ToolCall {
            id: tc.id,
            name: tc.function.name,
            arguments,
        }
    }

    /// Convert a chat response to an LLMResponse
    fn to_llm_response(response: ChatResponse) -> Result<LLMResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| StagekitError::model("Response contained no choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(Self::to_tool_call)
            .collect();

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            usage,
            model: response.model,
        })
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        const PREVIEW_BYTES: usize = 500;

        if !self.debug {
            return;
        }

        if content.len() > PREVIEW_BYTES {
            // Back up to a char boundary so the cut never splits a
            // multi-byte character
            let mut cut = PREVIEW_BYTES;
            while !content.is_char_boundary(cut) {
                cut -= 1;
            }
            eprintln!("DEBUG {}: {}...", label, &content[..cut]);
        } else {
            eprintln!("DEBUG {}: {}", label, content);
        }
    }

    /// Send a request and map transport/API failures to descriptive errors
    async fn post_chat(&self, request: &ChatRequest<'_>, model: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    StagekitError::model(format!(
                        "Cannot connect to model API at {}",
                        self.base_url
                    ))
                } else {
                    StagekitError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StagekitError::model(format!(
                "API error for model '{}' ({}): {}",
                model, status, error_text
            )));
        }

        Ok(response)
    }

    async fn chat_internal(
        &self,
        model: &str,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        let options = options.unwrap_or_default();

        let request = ChatRequest {
            model,
            messages: messages.iter().map(Self::to_api_message).collect(),
            tools,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stop: options.stop,
            stream: false,
        };

        let request_json = serde_json::to_string(&request)?;
        self.debug_print("Request", &request_json);

        let response = self.post_chat(&request, model).await?;

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| StagekitError::model(format!("Failed to parse response: {}", e)))?;

        Self::to_llm_response(chat_response)
    }
}

#[async_trait]
impl LLMProvider for OpenAiClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        self.chat_internal(model, messages, None, options).await
    }

    async fn chat_with_tools(
        &self,
        model: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        self.chat_internal(model, messages, Some(tools), options)
            .await
    }

    async fn chat_stream(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<GenerateOptions>,
        on_token: StreamCallback,
    ) -> Result<LLMResponse> {
        let options = options.unwrap_or_default();

        let request = ChatRequest {
            model,
            messages: messages.iter().map(Self::to_api_message).collect(),
            tools: None,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stop: options.stop,
            stream: true,
        };

        let request_json = serde_json::to_string(&request)?;
        self.debug_print("Stream Request", &request_json);

        let response = self.post_chat(&request, model).await?;

        let mut full_content = String::new();
        let mut final_model = model.to_string();
        let mut usage: Option<TokenUsage> = None;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result
                .map_err(|e| StagekitError::model(format!("Stream error: {}", e)))?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // Process complete SSE lines from the buffer
            while let Some(newline_pos) = buffer.find('\n') {
                let line = buffer[..newline_pos].trim().to_string();
                buffer = buffer[newline_pos + 1..].to_string();

                let Some(payload) = line.strip_prefix("data:").map(str::trim) else {
                    continue;
                };

                if payload.is_empty() || payload == "[DONE]" {
                    continue;
                }

                match serde_json::from_str::<StreamChunkResponse>(payload) {
                    Ok(chunk_response) => {
                        if !chunk_response.model.is_empty() {
                            final_model = chunk_response.model;
                        }

                        for choice in &chunk_response.choices {
                            if let Some(ref content) = choice.delta.content {
                                if !content.is_empty() {
                                    full_content.push_str(content);
                                    on_token(content);
                                }
                            }
                        }

                        if let Some(u) = chunk_response.usage {
                            usage = Some(TokenUsage {
                                prompt_tokens: u.prompt_tokens,
                                completion_tokens: u.completion_tokens,
                                total_tokens: u.total_tokens,
                            });
                        }
                    }
                    Err(e) => {
                        self.debug_print("Parse Error", &format!("{}: {}", e, payload));
                    }
                }
            }
        }

        Ok(LLMResponse {
            content: full_content,
            tool_calls: Vec::new(),
            usage,
            model: final_model,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::with_base_url("https://api.openai.com/v1/", "sk-test").unwrap();
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_message_conversion() {
        let msg = Message::user("Hello");
        let api_msg = OpenAiClient::to_api_message(&msg);
        assert_eq!(api_msg.role, "user");
        assert_eq!(api_msg.content.as_deref(), Some("Hello"));

        let msg = Message::assistant_with_tools(
            "",
            vec![ToolCall::new("stagehand_act", serde_json::json!({"action": "click"}))],
        );
        let api_msg = OpenAiClient::to_api_message(&msg);
        assert!(api_msg.content.is_none());
        assert_eq!(api_msg.tool_calls.unwrap().len(), 1);
    }

    #[test]
    fn test_debug_print_survives_multibyte_truncation() {
        let mut client = OpenAiClient::with_base_url("https://api.openai.com/v1", "sk-test").unwrap();
        client.debug = true;

        // A multi-byte character straddling the preview cut must not panic
        let content = format!("{}é and the rest of the reply", "a".repeat(499));
        client.debug_print("Response", &content);

        // Short content takes the untruncated path
        client.debug_print("Response", "short");
    }

    #[test]
    fn test_tool_call_arguments_decoded_from_string() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "stagehand_navigate",
                            "arguments": "{\"url\": \"https://www.google.com\"}"
                        }
                    }]
                }
            }],
            "model": "gpt-4o"
        }"#;

        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let response = OpenAiClient::to_llm_response(parsed).unwrap();

        assert!(response.content.is_empty());
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].id, "call_1");
        assert_eq!(
            response.tool_calls[0].arguments["url"],
            "https://www.google.com"
        );
    }
}
