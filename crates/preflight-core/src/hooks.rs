//! Git hook entry points.
//!
//! These functions tie the pieces together for the two supported hooks:
//! discover the changed-file set, select matching actions, and run them in
//! declaration order. They are what the installed hook scripts ultimately
//! call via `preflight run --hook <name>`.

use std::path::{Path, PathBuf};

use crate::error::PreflightError;
use crate::exec::{run_selections, InterruptFlag, RunObserver, RunReport};
use crate::files::{staged_files, upstream_files};
use crate::types::Registry;

/// The git hooks preflight can run as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    PreCommit,
    PrePush,
}

impl HookKind {
    pub fn name(&self) -> &str {
        match self {
            HookKind::PreCommit => "pre-commit",
            HookKind::PrePush => "pre-push",
        }
    }

    /// The changed-file set this hook operates on.
    pub fn changed_files(&self, root: &Path) -> Result<Vec<PathBuf>, PreflightError> {
        match self {
            HookKind::PreCommit => staged_files(root),
            HookKind::PrePush => upstream_files(root),
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runs every matching action for `kind` against the hook's changed-file
/// set, in declaration order. `parallel` only ever groups disjoint
/// non-mutating actions; see [`crate::exec::run_selections`].
///
/// # Errors
///
/// Returns an error only for changed-file discovery failures; per-action
/// failures are recorded in the returned [`RunReport`].
pub fn run_hook(
    registry: &Registry,
    kind: HookKind,
    root: &Path,
    interrupt: &InterruptFlag,
    parallel: bool,
    observer: &RunObserver,
) -> Result<RunReport, PreflightError> {
    let files = kind.changed_files(root)?;
    Ok(run_files(registry, &files, root, interrupt, parallel, observer))
}

/// Runs every matching action against an explicit changed-file set.
pub fn run_files(
    registry: &Registry,
    files: &[PathBuf],
    root: &Path,
    interrupt: &InterruptFlag,
    parallel: bool,
    observer: &RunObserver,
) -> RunReport {
    let selections = registry.select(files);
    run_selections(
        &selections,
        registry.missing_placeholder(),
        root,
        interrupt,
        parallel,
        observer,
    )
}
