//! Message and Conversation domain types.
//!
//! A conversation is an append-only log of turns: one system message at the
//! front, then user/assistant/tool messages in the order they happened.
//! Truncation keeps the log within a configured bound without ever removing
//! the system message or separating an assistant tool-call message from the
//! tool results that answer it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (environment info, behavioral rules)
    System,
    /// The end user
    User,
    /// The model
    Assistant,
    /// Tool execution result
    Tool,
}

/// A single message in a conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content. Empty on assistant turns that only carry tool calls.
    pub content: String,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, which tool call it answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create an assistant message carrying tool-call requests.
    pub fn assistant_with_calls(content: impl Into<String>, calls: Vec<MessageToolCall>) -> Self {
        let mut msg = Self::new(Role::Assistant, content);
        msg.tool_calls = calls;
        msg
    }

    /// Create a tool result message answering the given call.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Tool, content);
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }
}

/// A tool call embedded in an assistant message, as delivered by the
/// endpoint: arguments arrive as a raw JSON string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Correlation ID, copied verbatim into the answering tool message
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a JSON string
    pub arguments: String,
}

/// An ordered sequence of messages, always beginning with one system message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: String,

    /// Ordered messages
    pub messages: Vec<Message>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a conversation seeded with its system message.
    pub fn with_system(system_prompt: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            messages: vec![Message::system(system_prompt)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message to the conversation.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Trim oldest messages so the conversation holds at most `max`.
    ///
    /// Trimming works in atomic units: an assistant message that carries
    /// tool calls plus the tool-result messages immediately following it is
    /// one unit and is dropped or kept as a whole. The leading system
    /// message is never removed. The newest unit is always kept, even when
    /// it alone exceeds the budget — the pairing invariant outranks the
    /// length bound in that degenerate case.
    pub fn truncate_to(&mut self, max: usize) {
        if self.messages.len() <= max {
            return;
        }

        // Group everything after the system message into units.
        let mut units: Vec<Vec<Message>> = Vec::new();
        for msg in self.messages.drain(1..) {
            match units.last_mut() {
                Some(unit)
                    if msg.role == Role::Tool
                        && unit
                            .first()
                            .is_some_and(|m| m.role == Role::Assistant && !m.tool_calls.is_empty()) =>
                {
                    unit.push(msg);
                }
                _ => units.push(vec![msg]),
            }
        }

        // Drop oldest units until we fit, but never the newest one.
        let mut total = 1 + units.iter().map(Vec::len).sum::<usize>();
        let mut drop_from = 0;
        while total > max && drop_from + 1 < units.len() {
            total -= units[drop_from].len();
            drop_from += 1;
        }

        for unit in units.into_iter().skip(drop_from) {
            self.messages.extend(unit);
        }
    }
}
