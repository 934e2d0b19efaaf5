use std::path::{Path, PathBuf};

use capconf::config::PROJECT_CONFIG_FILE;

/// Directory whose `.capconf.toml` applies to a run started in `start`.
///
/// Walks upward; the first directory holding `.capconf.toml` wins, then
/// the first holding `.git`. Falls back to `start`.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_CONFIG_FILE).is_file())
        .or_else(|| start.ancestors().find(|dir| dir.join(".git").exists()))
        .unwrap_or(start)
        .to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_project_root_prefers_config_file_over_git() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("conf/yarn")).unwrap();
        std::fs::write(root.join("conf").join(PROJECT_CONFIG_FILE), "").unwrap();

        assert_eq!(discover_project_root(&root.join("conf/yarn")), root.join("conf"));
    }

    #[test]
    fn discover_project_root_falls_back_to_git() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("conf/yarn")).unwrap();

        assert_eq!(discover_project_root(&root.join("conf/yarn")), root.to_path_buf());
    }

    #[test]
    fn config_directory_named_like_the_file_is_ignored() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("sub").join(PROJECT_CONFIG_FILE)).unwrap();

        assert_eq!(discover_project_root(&root.join("sub")), root.to_path_buf());
    }
}
