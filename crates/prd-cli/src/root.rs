use prd_core::config::PRD_DIR;
use std::path::{Path, PathBuf};

/// Resolve the project root that holds `.prd/config.yaml`.
///
/// Priority:
/// 1. `--root` flag / `PRD_ROOT` env var (passed in as `explicit`)
/// 2. Nearest ancestor of `cwd` containing `.prd/`
/// 3. Nearest ancestor of `cwd` containing `.git/`
/// 4. `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&cwd)
}

fn resolve_from(cwd: &Path) -> PathBuf {
    find_ancestor_with(cwd, PRD_DIR)
        .or_else(|| find_ancestor_with(cwd, ".git"))
        .unwrap_or_else(|| cwd.to_path_buf())
}

fn find_ancestor_with(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
