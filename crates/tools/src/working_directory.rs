//! Working directory tool — report the process's current directory.

use async_trait::async_trait;
use toolhand_core::error::ToolError;
use toolhand_core::schema::ParamSchema;
use toolhand_core::tool::{Tool, ToolArgs, ToolResult};

/// Reports the process working directory at call time. This can differ
/// from the session's configured workspace if something changed the
/// process directory externally.
pub struct WorkingDirectoryTool;

#[async_trait]
impl Tool for WorkingDirectoryTool {
    fn name(&self) -> &str {
        "get_working_directory"
    }

    fn description(&self) -> &str {
        "Get the absolute path of the current working directory."
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
    }

    async fn execute(&self, _args: ToolArgs) -> Result<ToolResult, ToolError> {
        match std::env::current_dir() {
            Ok(cwd) => Ok(ToolResult::ok(
                "",
                format!("Current working directory: {}", cwd.display()),
            )),
            Err(e) => Ok(ToolResult::failure(
                "",
                format!("Failed to determine working directory: {e}"),
            )),
        }
    }
}
