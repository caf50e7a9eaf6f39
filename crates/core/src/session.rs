//! Agent session — the single unit of per-process state.
//!
//! Everything the loop mutates lives here: the conversation, the resolved
//! working directory, and the per-turn budgets. One session per process;
//! nothing is persisted across restarts.

use crate::message::Conversation;
use std::path::PathBuf;

/// Default step budget per user turn.
pub const DEFAULT_MAX_STEPS: u32 = 20;

/// Default history bound, in messages.
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Default provider-call retry attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Holds the conversation and the limits that bound a turn.
#[derive(Debug)]
pub struct Session {
    /// The conversation, seeded with the system message at construction
    pub conversation: Conversation,

    /// Base path for relative file operations and spawned commands
    pub working_dir: PathBuf,

    /// Maximum model-call steps per user turn
    pub max_steps: u32,

    /// Maximum conversation length, enforced by truncation
    pub max_history: usize,

    /// Maximum provider-call attempts per step
    pub max_retries: u32,
}

impl Session {
    /// Create a session with default budgets.
    pub fn new(system_prompt: impl Into<String>, working_dir: PathBuf) -> Self {
        Self {
            conversation: Conversation::with_system(system_prompt),
            working_dir,
            max_steps: DEFAULT_MAX_STEPS,
            max_history: DEFAULT_MAX_HISTORY,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_steps(mut self, max: u32) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn session_seeds_system_message() {
        let session = Session::new("rules", PathBuf::from("/tmp"));
        assert_eq!(session.conversation.len(), 1);
        assert_eq!(session.conversation.messages[0].role, Role::System);
        assert_eq!(session.max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn builder_overrides() {
        let session = Session::new("rules", PathBuf::from("/tmp"))
            .with_max_steps(5)
            .with_max_history(10)
            .with_max_retries(1);
        assert_eq!(session.max_steps, 5);
        assert_eq!(session.max_history, 10);
        assert_eq!(session.max_retries, 1);
    }
}
