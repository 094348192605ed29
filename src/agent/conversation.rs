//! Conversation history for the agent loop
//!
//! Keeps a capped transcript plus a pinned system prompt; the runner
//! replays the whole thing to the model each turn.

use crate::core::Message;

/// Capped conversation transcript
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Pinned system prompt, replayed first on every turn
    system: Option<Message>,
    history: Vec<Message>,
    cap: usize,
}

impl Conversation {
    /// Create a transcript that keeps at most `cap` messages
    pub fn new(cap: usize) -> Self {
        Self {
            system: None,
            history: Vec::new(),
            cap,
        }
    }

    /// Pin the system prompt
    ///
    /// The prompt never counts against the cap and is never evicted.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system = Some(Message::system(prompt));
    }

    /// Append a user message
    pub fn add_user(&mut self, content: impl Into<String>) {
        self.push(Message::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.push(Message::assistant(content));
    }

    /// Append a message, evicting the oldest ones past the cap
    pub fn push(&mut self, message: Message) {
        self.history.push(message);
        if self.history.len() > self.cap {
            let excess = self.history.len() - self.cap;
            self.history.drain(..excess);
        }
    }

    /// The full transcript to send to the model: system prompt first,
    /// then the surviving history in order
    pub fn get_messages(&self) -> Vec<Message> {
        self.system
            .iter()
            .chain(self.history.iter())
            .cloned()
            .collect()
    }

    /// Drop the history, keeping the system prompt
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Number of history messages (the system prompt is not counted)
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(50)
    }
}
