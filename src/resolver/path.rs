//! Path resolution: direct stat, cwd-relative stat, bounded file search.

use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::DEFAULT_FIND_DEPTH;

/// Resolves path tokens to existing filesystem entries.
///
/// Failures of any kind (missing entry, permission denied, races) are
/// reported as `None`.
#[derive(Debug, Clone)]
pub struct PathResolver {
    find_depth: usize,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FIND_DEPTH)
    }
}

impl PathResolver {
    pub fn new(find_depth: usize) -> Self {
        Self { find_depth }
    }

    /// Resolve `token` against `cwd`.
    ///
    /// Absolute tokens are checked as given and never searched. Relative
    /// tokens are only ever looked up under `cwd`, never under the process
    /// working directory: first joined onto it, then by the bounded search.
    /// Every returned path is absolute whenever `cwd` is.
    pub async fn resolve(&self, token: &str, cwd: &Path) -> Option<PathBuf> {
        if token.is_empty() {
            return None;
        }

        let path = expand_home(token);
        if path.is_absolute() {
            if entry_exists(&path).await {
                trace!("{} exists as given", path.display());
                return Some(path);
            }
            return None;
        }

        let joined = cwd.join(&path);
        if entry_exists(&joined).await {
            trace!("{} exists under {}", token, cwd.display());
            return Some(joined);
        }

        // A leading "./" never matches a searched directory entry.
        let name = PathBuf::from(token.strip_prefix("./").unwrap_or(token));
        if name.as_os_str().is_empty() || name.components().any(|c| c == Component::ParentDir) {
            return None;
        }

        let cwd = cwd.to_path_buf();
        let depth = self.find_depth;
        let found = tokio::task::spawn_blocking(move || find_file(&name, &cwd, depth))
            .await
            .unwrap_or_default();

        if let Some(ref path) = found {
            debug!("Found {} by searching for {}", path.display(), token);
        }
        found
    }
}

/// `path` made absolute against `cwd`.
pub fn to_absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Remove a diff-style `a/` or `b/` prefix.
pub fn strip_diff_prefix(token: &str) -> &str {
    token
        .strip_prefix("a/")
        .or_else(|| token.strip_prefix("b/"))
        .unwrap_or(token)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(token: &str) -> PathBuf {
    let rest = match token.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(token),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(token),
    }
}

/// Whether a file, directory or symbolic link exists at `path`.
async fn entry_exists(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(meta) => meta.is_file() || meta.is_dir(),
        Err(_) => fs::symlink_metadata(path)
            .await
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false),
    }
}

/// Search `depth` levels below `cwd`, then `depth` levels of its ancestors,
/// for a file at relative path `name`.
fn find_file(name: &Path, cwd: &Path, depth: usize) -> Option<PathBuf> {
    let below = WalkDir::new(cwd)
        .max_depth(depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path().join(name))
        .find(|candidate| candidate.is_file());
    if below.is_some() {
        return below;
    }

    cwd.ancestors()
        .skip(1)
        .take(depth)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "x").unwrap();
        path
    }

    #[tokio::test]
    async fn test_resolve_relative_to_cwd() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "foo/bar.txt");

        let resolved = PathResolver::default().resolve("foo/bar.txt", dir.path()).await;
        assert_eq!(resolved, Some(file));
    }

    #[tokio::test]
    async fn test_resolve_absolute_token() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "abs.txt");

        let resolver = PathResolver::default();
        let token = file.to_string_lossy().to_string();
        assert_eq!(resolver.resolve(&token, Path::new("/")).await, Some(file.clone()));

        let missing = dir.path().join("missing.txt").to_string_lossy().to_string();
        assert_eq!(resolver.resolve(&missing, dir.path()).await, None);
    }

    #[tokio::test]
    async fn test_resolve_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src/nested")).unwrap();

        let resolved = PathResolver::default().resolve("src/nested", dir.path()).await;
        assert_eq!(resolved, Some(dir.path().join("src/nested")));
    }

    #[tokio::test]
    async fn test_search_below_cwd() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "crates/core/src/engine.rs");

        let resolved = PathResolver::default().resolve("src/engine.rs", dir.path()).await;
        assert_eq!(resolved, Some(file));
    }

    #[tokio::test]
    async fn test_search_strips_dot_slash() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "pkg/util.py");

        let resolved = PathResolver::default().resolve("./util.py", dir.path()).await;
        assert_eq!(resolved, Some(file));
    }

    #[tokio::test]
    async fn test_search_ancestors() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "Makefile.inc");
        let cwd = dir.path().join("a/b");
        std::fs::create_dir_all(&cwd).unwrap();

        let resolved = PathResolver::default().resolve("Makefile.inc", &cwd).await;
        assert_eq!(resolved, Some(file));
    }

    #[tokio::test]
    async fn test_search_depth_is_bounded() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "1/2/3/deep.txt");

        let shallow = PathResolver::new(2);
        assert_eq!(shallow.resolve("deep.txt", dir.path()).await, None);

        let deep = PathResolver::new(3);
        assert!(deep.resolve("deep.txt", dir.path()).await.is_some());
    }

    #[tokio::test]
    async fn test_search_ignores_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("x/target.d")).unwrap();

        let resolved = PathResolver::default().resolve("target.d", dir.path()).await;
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn test_unresolvable_tokens() {
        let dir = TempDir::new().unwrap();
        let resolver = PathResolver::default();

        assert_eq!(resolver.resolve("", dir.path()).await, None);
        assert_eq!(resolver.resolve("nope.txt", dir.path()).await, None);
        assert_eq!(resolver.resolve("../nope.txt", dir.path()).await, None);
    }

    #[tokio::test]
    async fn test_relative_token_ignores_process_cwd() {
        // Tests run from the package root, which holds Cargo.toml.
        assert!(Path::new("Cargo.toml").is_file());
        let dir = TempDir::new().unwrap();

        let resolved = PathResolver::default().resolve("Cargo.toml", dir.path()).await;
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn test_stat_failure_is_not_found() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "file.txt");
        let resolver = PathResolver::default();

        // Walking through a regular file fails with ENOTDIR.
        assert_eq!(resolver.resolve("file.txt/x", dir.path()).await, None);
        let through_file = dir.path().join("file.txt/x").to_string_lossy().to_string();
        assert_eq!(resolver.resolve(&through_file, dir.path()).await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_exists() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink(dir.path().join("void"), &link).unwrap();

        assert!(entry_exists(&link).await);
    }

    #[test]
    fn test_strip_diff_prefix() {
        assert_eq!(strip_diff_prefix("a/real/file.txt"), "real/file.txt");
        assert_eq!(strip_diff_prefix("b/real/file.txt"), "real/file.txt");
        assert_eq!(strip_diff_prefix("c/real/file.txt"), "c/real/file.txt");
        assert_eq!(strip_diff_prefix("abc.txt"), "abc.txt");
    }

    #[test]
    fn test_to_absolute() {
        assert_eq!(
            to_absolute(Path::new("src/a.rs"), Path::new("/w")),
            PathBuf::from("/w/src/a.rs")
        );
        assert_eq!(
            to_absolute(Path::new("/etc/hosts"), Path::new("/w")),
            PathBuf::from("/etc/hosts")
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("src/a.rs"), PathBuf::from("src/a.rs"));
        assert_eq!(expand_home("~user/a"), PathBuf::from("~user/a"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.gitconfig"), home.join(".gitconfig"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
