//! Workspace path resolution.
//!
//! Model-supplied paths resolve the same way everywhere: absolute paths
//! pass through, relative paths join onto the workspace directory, and the
//! result is cleaned lexically — `.` components dropped, `..` folded —
//! without touching the filesystem, so resolution works for paths that do
//! not exist yet.

use std::path::{Component, Path, PathBuf};

/// Resolve a model-supplied path against the workspace directory.
pub fn resolve(workspace: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        normalize(candidate)
    } else {
        normalize(&workspace.join(candidate))
    }
}

/// Lexically clean a path: drop `.`, fold `..` into its parent.
///
/// `..` at the root of an absolute path is discarded (`/../x` → `/x`);
/// for relative paths it is kept, since there is no parent to fold into.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_joins_workspace() {
        let resolved = resolve(Path::new("/work"), "src/main.rs");
        assert_eq!(resolved, PathBuf::from("/work/src/main.rs"));
    }

    #[test]
    fn absolute_passes_through() {
        let resolved = resolve(Path::new("/work"), "/etc/hosts");
        assert_eq!(resolved, PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn dot_components_dropped() {
        let resolved = resolve(Path::new("/work"), "./a/./b");
        assert_eq!(resolved, PathBuf::from("/work/a/b"));
    }

    #[test]
    fn parent_components_folded() {
        let resolved = resolve(Path::new("/work"), "a/b/../c");
        assert_eq!(resolved, PathBuf::from("/work/a/c"));
    }

    #[test]
    fn parent_can_escape_workspace() {
        // Resolution is lexical, not a sandbox: ".." walks out of the
        // workspace exactly as the shell would.
        let resolved = resolve(Path::new("/work/sub"), "../other.txt");
        assert_eq!(resolved, PathBuf::from("/work/other.txt"));
    }

    #[test]
    fn parent_at_absolute_root_discarded() {
        assert_eq!(normalize(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn relative_parent_kept() {
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn empty_result_becomes_dot() {
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }
}
