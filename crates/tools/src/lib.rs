//! Built-in tool implementations for toolhand.
//!
//! Five tools give the agent its hands: run a shell command, read a file,
//! write a file, list a directory, and report the working directory. Each
//! is scoped to a workspace directory: relative paths resolve against it
//! and spawned commands run inside it.
//!
//! Operational failures (missing file, non-zero exit, timeout) come back
//! as result text the model can read — only argument problems surface as
//! errors, and the agent loop converts those to text as well.

pub mod execute_command;
pub mod list_directory;
pub mod read_file;
pub mod workspace;
pub mod working_directory;
pub mod write_file;

pub use execute_command::ExecuteCommandTool;
pub use list_directory::ListDirectoryTool;
pub use read_file::ReadFileTool;
pub use working_directory::WorkingDirectoryTool;
pub use write_file::WriteFileTool;

use std::path::Path;
use toolhand_core::tool::ToolRegistry;

/// Build the standard registry of all five tools, scoped to `workspace`.
///
/// Registration order is the order the catalog is advertised in.
pub fn default_registry(workspace: &Path) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ExecuteCommandTool::new(workspace)));
    registry.register(Box::new(ReadFileTool::new(workspace)));
    registry.register(Box::new(WriteFileTool::new(workspace)));
    registry.register(Box::new(ListDirectoryTool::new(workspace)));
    registry.register(Box::new(WorkingDirectoryTool));
    registry
}
