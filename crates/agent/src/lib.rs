//! The toolhand orchestration loop.
//!
//! One user turn runs as a small state machine:
//!
//! 1. Append the user message and call the completion endpoint (through
//!    the retry wrapper) with the full conversation and tool catalog.
//! 2. If the response carries tool calls, execute them in order, append
//!    the results, and call the endpoint again — with no new user input.
//! 3. If it carries text, that is the final answer for the turn.
//!
//! The cycle is bounded by a per-turn step budget; tool failures are fed
//! back to the model as text rather than aborting the turn.

pub mod loop_runner;
pub mod prompt;
pub mod retry;

pub use loop_runner::AgentLoop;
pub use prompt::system_prompt;
pub use retry::{complete_with_retry, RetryPolicy};
