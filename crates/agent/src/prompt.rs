//! System prompt construction.
//!
//! One fixed template, rendered once at session start: environment facts
//! (working directory, user, host, timestamp) followed by the behavioral
//! rules the model is asked to follow. Not user-configurable at runtime.

use chrono::Local;
use std::path::Path;

/// Render the system prompt for a session rooted at `working_dir`.
pub fn system_prompt(working_dir: &Path) -> String {
    let username = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".into());
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".into());
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        "You are a capable AI assistant operating as an agent in a command-line \
environment. You accomplish tasks by calling the tools made available to you.

Environment:
- Working directory: {wd}
- User: {username}
- Host: {host}
- Current time: {now}

Rules:
1. Use the provided tools to run commands, read and write files, and inspect \
directories.
2. Before any write or other destructive operation, read the current state \
first and confirm the change makes sense.
3. Make one tool call at a time and wait for its result before deciding the \
next step.
4. If a tool reports an error, analyze the message and try to recover.
5. Keep responses concise and focused on the task.
6. When the task is done, summarize the outcome in natural language.",
        wd = working_dir.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn prompt_includes_environment_facts() {
        let prompt = system_prompt(&PathBuf::from("/srv/project"));
        assert!(prompt.contains("/srv/project"));
        assert!(prompt.contains("Working directory:"));
        assert!(prompt.contains("User:"));
        assert!(prompt.contains("Host:"));
        assert!(prompt.contains("Current time:"));
    }

    #[test]
    fn prompt_includes_behavioral_rules() {
        let prompt = system_prompt(&PathBuf::from("/tmp"));
        assert!(prompt.contains("one tool call at a time"));
        assert!(prompt.contains("destructive"));
        assert!(prompt.contains("summarize"));
    }
}
