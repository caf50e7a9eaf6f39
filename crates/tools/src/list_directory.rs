//! Directory listing tool — immediate entries with type and size.

use crate::workspace;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use toolhand_core::error::ToolError;
use toolhand_core::schema::{ParamSchema, ParamType, ParamValue};
use toolhand_core::tool::{Tool, ToolArgs, ToolResult};
use tracing::debug;

pub struct ListDirectoryTool {
    workspace: PathBuf,
}

impl ListDirectoryTool {
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self {
            workspace: workspace.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List the immediate entries of a directory (non-recursive). Each \
         entry is reported as a file or directory with its size in bytes."
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new().optional(
            "path",
            ParamType::String,
            "The directory to list (absolute or relative); defaults to the working directory",
            ParamValue::String(".".into()),
        )
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolResult, ToolError> {
        let path = args
            .get("path")
            .and_then(ParamValue::as_str)
            .unwrap_or(".");
        let resolved = workspace::resolve(&self.workspace, path);

        debug!(path = %resolved.display(), "Listing directory");

        let mut reader = match tokio::fs::read_dir(&resolved).await {
            Ok(reader) => reader,
            Err(e) => {
                return Ok(ToolResult::failure(
                    "",
                    format!("Failed to read directory {}: {e}", resolved.display()),
                ))
            }
        };

        let mut entries = Vec::new();
        loop {
            match reader.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let (kind, size) = match entry.metadata().await {
                        Ok(meta) if meta.is_dir() => ("dir", meta.len()),
                        Ok(meta) => ("file", meta.len()),
                        Err(_) => ("file", 0),
                    };
                    entries.push((name, kind, size));
                }
                Ok(None) => break,
                Err(e) => {
                    return Ok(ToolResult::failure(
                        "",
                        format!("Failed to read directory {}: {e}", resolved.display()),
                    ))
                }
            }
        }

        // Stable ordering; read_dir order is platform-dependent.
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = format!("Contents of {}:\n", resolved.display());
        for (name, kind, size) in &entries {
            report.push_str(&format!("  [{kind}] {name} ({size} bytes)\n"));
        }
        if entries.is_empty() {
            report.push_str("  (empty)\n");
        }

        Ok(ToolResult::ok("", report))
    }
}
