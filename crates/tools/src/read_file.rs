//! File read tool — UTF-8 file contents, workspace-relative.

use crate::workspace;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use toolhand_core::error::ToolError;
use toolhand_core::schema::{ParamSchema, ParamType, ParamValue};
use toolhand_core::tool::{Tool, ToolArgs, ToolResult};
use tracing::debug;

pub struct ReadFileTool {
    workspace: PathBuf,
}

impl ReadFileTool {
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self {
            workspace: workspace.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a UTF-8 text file. Relative paths resolve \
         against the working directory. Returns an error description if the \
         file does not exist or cannot be read."
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new().required(
            "path",
            ParamType::String,
            "The file path to read (absolute or relative)",
        )
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolResult, ToolError> {
        let path = args
            .get("path")
            .and_then(ParamValue::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'path'".into()))?;
        let resolved = workspace::resolve(&self.workspace, path);

        debug!(path = %resolved.display(), "Reading file");

        match tokio::fs::read_to_string(&resolved).await {
            Ok(content) => Ok(ToolResult::ok(
                "",
                format!("Contents of {}:\n{content}", resolved.display()),
            )),
            Err(e) => Ok(ToolResult::failure(
                "",
                format!("Failed to read file {}: {e}", resolved.display()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolhand_core::tool::{ToolCall, ToolRegistry};

    async fn run(workspace: &Path, args: serde_json::Value) -> ToolResult {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(ReadFileTool::new(workspace)));
        registry
            .execute(&ToolCall {
                id: "call_1".into(),
                name: "read_file".into(),
                arguments: args,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn read_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("note.txt"), "Hello, world!").unwrap();

        let result = run(dir.path(), json!({"path": "note.txt"})).await;
        assert!(result.success);
        assert!(result.output.contains("Hello, world!"));
        assert!(result.output.contains("note.txt"));
    }

    #[tokio::test]
    async fn read_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("abs.txt");
        std::fs::write(&file, "absolute").unwrap();

        let result = run(Path::new("/elsewhere"), json!({"path": file.to_str().unwrap()})).await;
        assert!(result.success);
        assert!(result.output.contains("absolute"));
    }

    #[tokio::test]
    async fn nonexistent_file_is_failure_text() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), json!({"path": "missing.txt"})).await;
        assert!(!result.success);
        assert!(result.output.contains("Failed to read file"));
        assert!(result.output.contains("missing.txt"));
    }

    #[tokio::test]
    async fn directory_is_failure_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let result = run(dir.path(), json!({"path": "sub"})).await;
        assert!(!result.success);
        assert!(result.output.contains("Failed to read file"));
    }
}
