//! Agent runner
//!
//! Tool-calling loop: the model proposes tool calls against the
//! toolkit's declared contract, the toolkit executes them one at a time,
//! and results flow back as tool messages until the model answers.

use std::io::{self, Write};

use crate::agent::conversation::Conversation;
use crate::core::{Config, Message, Result, ToolDefinition};
use crate::llm::{GenerateOptions, LLMProvider, OpenAiClient};
use crate::tools::Toolkit;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a web automation agent. You control a browser through \
the stagehand tools: navigate to pages, act on them, extract structured data, and observe \
candidate actions. Use observe when unsure what is on the page. Respond with your final answer \
only when the task is complete.";

/// Agent that drives the Stagehand toolkit with an LLM
pub struct Agent {
    config: Config,
    llm: OpenAiClient,
    toolkit: Toolkit,
    conversation: Conversation,
}

impl Agent {
    /// Create an agent from configuration
    ///
    /// Builds the model client and a toolkit with a fresh session; the
    /// session begins initializing in the background immediately.
    pub fn from_config(config: Config) -> Result<Self> {
        let toolkit = Toolkit::new(&config);
        Self::with_toolkit(config, toolkit)
    }

    /// Create an agent over an existing toolkit
    ///
    /// The caller keeps lifecycle ownership of the toolkit's session.
    pub fn with_toolkit(config: Config, toolkit: Toolkit) -> Result<Self> {
        let llm = OpenAiClient::from_config(&config)?;

        let mut conversation = Conversation::new(config.agent.max_history);
        let prompt = config
            .agent
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        conversation.set_system_prompt(prompt);

        Ok(Self {
            config,
            llm,
            toolkit,
            conversation,
        })
    }

    /// Process a user message through the tool-calling loop
    ///
    /// The loop ends when the model responds without tool calls, or when
    /// `max_turns` is reached and a final answer is synthesized from the
    /// collected tool results.
    pub async fn process(&mut self, user_input: &str) -> Result<String> {
        self.conversation.add_user(user_input);

        let tool_defs: Vec<ToolDefinition> = self.toolkit.definitions();
        let mut messages = self.conversation.get_messages();
        let max_turns = self.config.agent.max_turns;

        for turn in 1..=max_turns {
            let response = self
                .llm
                .chat_with_tools(
                    &self.config.openai.model,
                    &messages,
                    &tool_defs,
                    Some(GenerateOptions {
                        temperature: Some(self.config.openai.temperature),
                        ..Default::default()
                    }),
                )
                .await?;

            if response.tool_calls.is_empty() {
                let answer = if response.content.is_empty() {
                    "I could not produce a response.".to_string()
                } else {
                    response.content
                };
                self.conversation.add_assistant(&answer);
                return Ok(answer);
            }

            println!(
                "[Turn {}/{}] Executing {} tool call(s)...",
                turn,
                max_turns,
                response.tool_calls.len()
            );

            messages.push(Message::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            // Sequential execution: one browser, one tool at a time
            for call in &response.tool_calls {
                if self.config.agent.debug {
                    eprintln!("DEBUG: Executing tool: {} {}", call.name, call.arguments);
                }

                let result = self.toolkit.execute(call).await?;
                let status = if result.success { "✓" } else { "✗" };
                println!("  {} {}", status, result.tool_name);

                let call_id = if call.id.is_empty() {
                    call.name.clone()
                } else {
                    call.id.clone()
                };
                messages.push(Message::tool(result.output, call_id));
            }
        }

        // Max turns reached without a final answer
        println!("[Agent] Max turns reached. Synthesizing response...");
        let answer = self.synthesize(messages).await?;
        self.conversation.add_assistant(&answer);
        Ok(answer)
    }

    /// Produce a final answer from the accumulated tool results
    async fn synthesize(&self, mut messages: Vec<Message>) -> Result<String> {
        messages.push(Message::user(
            "Provide your final answer based on the tool results above. Do not call any more tools.",
        ));

        if self.config.streaming.enabled {
            let print_tokens = self.config.streaming.print_tokens;
            let response = self
                .llm
                .chat_stream(
                    &self.config.openai.model,
                    &messages,
                    Some(GenerateOptions {
                        temperature: Some(self.config.openai.temperature),
                        ..Default::default()
                    }),
                    Box::new(move |token| {
                        if print_tokens {
                            print!("{}", token);
                            let _ = io::stdout().flush();
                        }
                    }),
                )
                .await?;

            if print_tokens {
                println!();
            }
            Ok(response.content)
        } else {
            let response = self
                .llm
                .chat(&self.config.openai.model, &messages, None)
                .await?;
            Ok(response.content)
        }
    }

    /// The toolkit backing this agent
    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clear conversation history
    pub fn clear_history(&mut self) {
        self.conversation.clear();
    }

    /// Get conversation length
    pub fn conversation_length(&self) -> usize {
        self.conversation.len()
    }

    /// Close the browser session
    pub async fn close(&self) -> Result<()> {
        self.toolkit.close().await
    }
}
