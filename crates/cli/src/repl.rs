//! The interactive shell: a line-oriented read/answer loop over stdin.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use toolhand_agent::AgentLoop;
use toolhand_core::session::Session;
use tracing::debug;

/// Inputs that end the session. Matched exactly, after trimming.
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Drive the interactive loop until the operator exits or stdin closes.
///
/// A failed turn is printed and the loop continues; only I/O errors on
/// stdin/stdout are propagated.
pub async fn run(
    agent: &AgentLoop,
    session: &mut Session,
    model: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("toolhand — interactive AI assistant");
    println!("Model: {model}");
    println!("Working directory: {}", session.working_dir.display());
    println!("Type 'exit' or 'quit' to leave.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You > ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                // EOF (piped input exhausted or Ctrl+D)
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&input) {
            break;
        }

        debug!(chars = input.len(), "Read user input");

        match agent.run_turn(session, input).await {
            Ok(answer) => {
                println!();
                for line in answer.lines() {
                    println!("Assistant > {line}");
                }
                println!();
            }
            Err(e) => {
                eprintln!("[error] {e}");
                println!();
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
