//! # toolhand core
//!
//! Domain types, traits, and error definitions for the toolhand agent.
//! This crate defines the domain model that all other crates implement
//! against: no HTTP, no filesystem, no subprocesses.
//!
//! The shape of the system: a [`Session`](session::Session) owns a
//! [`Conversation`](message::Conversation); the agent loop sends it to a
//! [`Provider`](provider::Provider) together with the catalog from a
//! [`ToolRegistry`](tool::ToolRegistry), executes the tool calls the model
//! requests, and appends the results back onto the conversation.

pub mod error;
pub mod message;
pub mod provider;
pub mod schema;
pub mod session;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, Error, ProviderError, Result, ToolError};
pub use message::{Conversation, Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use schema::{ParamSchema, ParamSpec, ParamType, ParamValue};
pub use session::Session;
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
