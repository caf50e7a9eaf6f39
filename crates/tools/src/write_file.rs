//! File write tool — create or overwrite files, with an append mode.

use crate::workspace;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use toolhand_core::error::ToolError;
use toolhand_core::schema::{ParamSchema, ParamType, ParamValue};
use toolhand_core::tool::{Tool, ToolArgs, ToolResult};
use tracing::debug;

pub struct WriteFileTool {
    workspace: PathBuf,
}

impl WriteFileTool {
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self {
            workspace: workspace.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file. Creates the file and any missing parent \
         directories. Overwrites existing content unless 'append' is true."
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required(
                "path",
                ParamType::String,
                "The file path to write (absolute or relative)",
            )
            .required("content", ParamType::String, "The content to write")
            .optional(
                "append",
                ParamType::Boolean,
                "Append instead of overwriting",
                ParamValue::Boolean(false),
            )
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolResult, ToolError> {
        let path = args
            .get("path")
            .and_then(ParamValue::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'path'".into()))?;
        let content = args
            .get("content")
            .and_then(ParamValue::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'content'".into()))?;
        let append = args
            .get("append")
            .and_then(ParamValue::as_bool)
            .unwrap_or(false);

        let resolved = workspace::resolve(&self.workspace, path);
        debug!(path = %resolved.display(), append, "Writing file");

        if let Some(parent) = resolved.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return Ok(ToolResult::failure(
                    "",
                    format!("Failed to create directory {}: {e}", parent.display()),
                ));
            }
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.create(true).write(true);
        if append {
            options.append(true);
        } else {
            options.truncate(true);
        }

        let mut file = match options.open(&resolved).await {
            Ok(file) => file,
            Err(e) => {
                return Ok(ToolResult::failure(
                    "",
                    format!("Failed to open file {}: {e}", resolved.display()),
                ))
            }
        };

        // tokio files buffer writes; an unflushed write can be lost when
        // the handle drops.
        let written = async {
            file.write_all(content.as_bytes()).await?;
            file.flush().await
        }
        .await;
        if let Err(e) = written {
            return Ok(ToolResult::failure(
                "",
                format!("Failed to write file {}: {e}", resolved.display()),
            ));
        }

        let verb = if append { "Appended" } else { "Wrote" };
        Ok(ToolResult::ok(
            "",
            format!(
                "{verb} {} bytes to {}",
                content.len(),
                resolved.display()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolhand_core::tool::{ToolCall, ToolRegistry};

    async fn run(workspace: &Path, args: serde_json::Value) -> ToolResult {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(WriteFileTool::new(workspace)));
        registry
            .execute(&ToolCall {
                id: "call_1".into(),
                name: "write_file".into(),
                arguments: args,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn write_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            json!({"path": "out.txt", "content": "Hello from test!"}),
        )
        .await;

        assert!(result.success);
        assert!(result.output.contains("16 bytes"));
        let content = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(content, "Hello from test!");
    }

    #[tokio::test]
    async fn content_is_on_disk_when_success_returns() {
        let dir = tempfile::tempdir().unwrap();
        let payload = "x".repeat(64 * 1024);
        let result = run(dir.path(), json!({"path": "big.txt", "content": payload})).await;

        assert!(result.success);
        let content = std::fs::read_to_string(dir.path().join("big.txt")).unwrap();
        assert_eq!(content.len(), 64 * 1024);
    }

    #[tokio::test]
    async fn overwrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), json!({"path": "f.txt", "content": "first version"})).await;
        let result = run(dir.path(), json!({"path": "f.txt", "content": "second"})).await;

        assert!(result.success);
        let content = std::fs::read_to_string(dir.path().join("f.txt")).unwrap();
        assert_eq!(content, "second");
    }

    #[tokio::test]
    async fn append_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), json!({"path": "log.txt", "content": "one\n"})).await;
        run(
            dir.path(),
            json!({"path": "log.txt", "content": "two\n", "append": true}),
        )
        .await;
        let result = run(
            dir.path(),
            json!({"path": "log.txt", "content": "three\n", "append": true}),
        )
        .await;

        assert!(result.success);
        assert!(result.output.contains("Appended"));
        let content = std::fs::read_to_string(dir.path().join("log.txt")).unwrap();
        assert_eq!(content, "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            json!({"path": "nested/deeper/file.txt", "content": "nested content"}),
        )
        .await;

        assert!(result.success);
        let path = dir.path().join("nested/deeper/file.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "nested content");
    }

    #[tokio::test]
    async fn missing_content_rejected_at_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(WriteFileTool::new(dir.path())));
        let err = registry
            .execute(&ToolCall {
                id: "call_1".into(),
                name: "write_file".into(),
                arguments: json!({"path": "x.txt"}),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
