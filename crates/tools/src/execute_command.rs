//! Shell command tool — spawn `sh -c` with an enforced timeout.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use toolhand_core::error::ToolError;
use toolhand_core::schema::{ParamSchema, ParamType, ParamValue};
use toolhand_core::tool::{Tool, ToolArgs, ToolResult};
use tracing::{debug, warn};

/// Exit code reported when the process could not provide one
/// (killed by signal, or timed out).
const EXIT_CODE_UNKNOWN: i32 = -1;

/// How long to keep draining the pipes after killing a timed-out child.
/// Grandchildren may hold the write ends open past the kill.
const PIPE_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Stream a pipe into a shared buffer so partial output survives a timeout.
fn capture<R>(reader: Option<R>) -> (Arc<Mutex<Vec<u8>>>, Option<JoinHandle<()>>)
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    let buf = Arc::new(Mutex::new(Vec::new()));
    let task = reader.map(|mut reader| {
        let buf = Arc::clone(&buf);
        tokio::spawn(async move {
            let mut chunk = [0u8; 4096];
            loop {
                match reader.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => match buf.lock() {
                        Ok(mut bytes) => bytes.extend_from_slice(&chunk[..n]),
                        Err(_) => break,
                    },
                }
            }
        })
    });
    (buf, task)
}

fn collected(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    match buf.lock() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
    }
}

/// Wait for a capture task, aborting it if it outlives `grace`.
async fn settle(task: Option<JoinHandle<()>>, grace: Duration) {
    if let Some(mut task) = task {
        if tokio::time::timeout(grace, &mut task).await.is_err() {
            task.abort();
        }
    }
}

/// Execute shell commands in the workspace directory.
pub struct ExecuteCommandTool {
    workspace: PathBuf,
}

impl ExecuteCommandTool {
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self {
            workspace: workspace.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Tool for ExecuteCommandTool {
    fn name(&self) -> &str {
        "execute_command"
    }

    fn description(&self) -> &str {
        "Execute a shell command in the working directory. Supports pipes, \
         redirection, and any other shell syntax. Returns the exit code and \
         the combined stdout/stderr output."
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required(
                "command",
                ParamType::String,
                "The complete command to execute, including any pipes or redirections",
            )
            .optional(
                "timeout",
                ParamType::Integer,
                "Timeout in seconds",
                ParamValue::Integer(30),
            )
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolResult, ToolError> {
        let command = args
            .get("command")
            .and_then(ParamValue::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'command'".into()))?
            .to_string();
        let timeout_secs = args
            .get("timeout")
            .and_then(ParamValue::as_i64)
            .unwrap_or(30)
            .max(1) as u64;

        debug!(command = %command, timeout_secs, "Executing shell command");

        let child = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .current_dir(&self.workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the child (e.g. when the timeout future wins)
            // must take the subprocess down with it.
            .kill_on_drop(true)
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                return Ok(ToolResult::failure(
                    "",
                    format!("Command: {command}\nError: failed to start shell: {e}"),
                ))
            }
        };

        // Read both pipes while waiting, so a timed-out command still
        // reports whatever it produced before the deadline.
        let (stdout_buf, stdout_task) = capture(child.stdout.take());
        let (stderr_buf, stderr_task) = capture(child.stderr.take());

        let deadline = Duration::from_secs(timeout_secs);
        let waited = tokio::time::timeout(deadline, child.wait()).await;
        match waited {
            Ok(Ok(status)) => {
                settle(stdout_task, deadline).await;
                settle(stderr_task, deadline).await;

                let exit_code = status.code().unwrap_or(EXIT_CODE_UNKNOWN);
                let mut combined = collected(&stdout_buf);
                combined.push_str(&collected(&stderr_buf));

                let mut report = format!("Command: {command}\nExit code: {exit_code}\n");
                if !combined.is_empty() {
                    report.push_str("Output:\n");
                    report.push_str(&combined);
                }

                if !status.success() {
                    warn!(command = %command, exit_code, "Command failed");
                }

                Ok(ToolResult {
                    call_id: String::new(),
                    success: status.success(),
                    output: report,
                })
            }
            Ok(Err(e)) => {
                settle(stdout_task, PIPE_DRAIN_GRACE).await;
                settle(stderr_task, PIPE_DRAIN_GRACE).await;
                Ok(ToolResult::failure(
                    "",
                    format!("Command: {command}\nError: failed to wait for command: {e}"),
                ))
            }
            Err(_elapsed) => {
                warn!(command = %command, timeout_secs, "Command timed out, killing subprocess");
                let _ = child.kill().await;
                settle(stdout_task, PIPE_DRAIN_GRACE).await;
                settle(stderr_task, PIPE_DRAIN_GRACE).await;

                let mut combined = collected(&stdout_buf);
                combined.push_str(&collected(&stderr_buf));

                let mut report =
                    format!("Command: {command}\nExit code: {EXIT_CODE_UNKNOWN}\n");
                if !combined.is_empty() {
                    report.push_str("Output:\n");
                    report.push_str(&combined);
                    if !combined.ends_with('\n') {
                        report.push('\n');
                    }
                }
                report.push_str(&format!("Error: command timed out after {timeout_secs}s"));

                Ok(ToolResult::failure("", report))
            }
        }
    }
}
