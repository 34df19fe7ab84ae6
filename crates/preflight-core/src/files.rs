//! Changed-file discovery.
//!
//! Paths are returned relative to `root` (git's own output format), in the
//! order git reports them, deduplicated.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::error::PreflightError;

/// Files staged for commit: `git diff --cached --name-only`.
///
/// Deleted files are excluded; a formatter or linter cannot be handed a path
/// that no longer exists.
///
/// # Errors
///
/// Returns [`PreflightError::Other`] if the `git` command fails to execute
/// or exits with a non-zero status.
pub fn staged_files(root: &Path) -> Result<Vec<PathBuf>, PreflightError> {
    git_lines(
        root,
        &["diff", "--cached", "--name-only", "--diff-filter=ACMR"],
    )
}

/// Files changed relative to the upstream branch:
/// `git diff --name-only @{upstream}...HEAD`.
///
/// Falls back to all tracked files when no upstream is configured (the
/// branch has never been pushed).
///
/// # Errors
///
/// Returns [`PreflightError::Other`] if git cannot be executed at all.
pub fn upstream_files(root: &Path) -> Result<Vec<PathBuf>, PreflightError> {
    match git_lines(
        root,
        &[
            "diff",
            "--name-only",
            "--diff-filter=ACMR",
            "@{upstream}...HEAD",
        ],
    ) {
        Ok(files) => Ok(files),
        Err(_) => tracked_files(root),
    }
}

/// All tracked files: `git ls-files`.
///
/// # Errors
///
/// Returns [`PreflightError::Other`] if the `git` command fails to execute
/// or exits with a non-zero status.
pub fn tracked_files(root: &Path) -> Result<Vec<PathBuf>, PreflightError> {
    git_lines(root, &["ls-files"])
}

/// Every file in the project: tracked files inside a git work tree, a
/// filesystem walk otherwise.
///
/// # Errors
///
/// Returns [`PreflightError::Other`] if git fails inside a work tree, or
/// [`PreflightError::Io`] from the filesystem walk.
pub fn all_files(root: &Path) -> Result<Vec<PathBuf>, PreflightError> {
    match tracked_files(root) {
        Ok(files) => Ok(files),
        Err(_) => walk_files(root),
    }
}

/// Recursively lists files under `root`, relative to `root`, skipping
/// hidden directories.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>, PreflightError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.depth() > 0
                && e.file_type().is_dir()
                && e.file_name().to_string_lossy().starts_with('.'))
        })
    {
        let entry = entry.map_err(|e| PreflightError::Other(e.to_string()))?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }
    Ok(files)
}

/// Runs git in `root` and returns its stdout as one path per line, order
/// preserved, duplicates removed.
fn git_lines(root: &Path, args: &[&str]) -> Result<Vec<PathBuf>, PreflightError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|e| PreflightError::Other(format!("Failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(PreflightError::Other(format!(
            "git {} failed",
            args.join(" ")
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut seen = HashSet::new();
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(PathBuf::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("git failed to execute");
        assert!(status.status.success(), "git {args:?} failed");
    }

    fn setup_repo() -> TempDir {
        let tmp = TempDir::new().unwrap();
        git(tmp.path(), &["init"]);
        tmp
    }

    #[test]
    fn staged_files_empty_for_clean_repo() {
        let tmp = setup_repo();
        assert!(staged_files(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn staged_files_lists_added_paths() {
        let tmp = setup_repo();
        fs::write(tmp.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(tmp.path().join("b.txt"), "hello\n").unwrap();
        git(tmp.path(), &["add", "a.py", "b.txt"]);

        let files = staged_files(tmp.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.py"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn staged_files_ignores_unstaged_paths() {
        let tmp = setup_repo();
        fs::write(tmp.path().join("staged.py"), "").unwrap();
        fs::write(tmp.path().join("loose.py"), "").unwrap();
        git(tmp.path(), &["add", "staged.py"]);

        let files = staged_files(tmp.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("staged.py")]);
    }

    #[test]
    fn staged_files_errors_outside_a_repo() {
        let tmp = TempDir::new().unwrap();
        assert!(staged_files(tmp.path()).is_err());
    }

    #[test]
    fn all_files_walks_outside_a_repo() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/app.py"), "").unwrap();
        fs::write(tmp.path().join("top.txt"), "").unwrap();

        let files = all_files(tmp.path()).unwrap();
        assert!(files.contains(&PathBuf::from("src/app.py")));
        assert!(files.contains(&PathBuf::from("top.txt")));
    }

    #[test]
    fn walk_skips_hidden_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".hidden")).unwrap();
        fs::write(tmp.path().join(".hidden/secret.py"), "").unwrap();
        fs::write(tmp.path().join("visible.py"), "").unwrap();

        let files = walk_files(tmp.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("visible.py")]);
    }

    #[test]
    fn upstream_files_falls_back_without_upstream() {
        let tmp = setup_repo();
        fs::write(tmp.path().join("a.py"), "").unwrap();
        git(tmp.path(), &["add", "a.py"]);
        git(tmp.path(), &["-c", "user.email=t@t", "-c", "user.name=t", "commit", "-m", "init"]);

        // No upstream configured, so this degrades to the tracked set.
        let files = upstream_files(tmp.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.py")]);
    }
}
