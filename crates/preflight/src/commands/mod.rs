pub mod check;
pub mod install;
pub mod list;
pub mod run;

use std::path::{Path, PathBuf};

use preflight_core::config::{discover_config, load_config};
use preflight_core::Registry;

use crate::output::Reporter;

/// Resolves the configuration file path from the `--config` override or by
/// walking up from the current directory.
pub(crate) fn resolve_config_path(
    config_override: Option<&str>,
    reporter: &mut Reporter,
) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(PathBuf::from(path));
    }
    let cwd = match std::env::current_dir() {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!("Cannot get current directory: {e}"));
            return None;
        }
    };
    match discover_config(&cwd) {
        Ok(p) => Some(p),
        Err(e) => {
            reporter.error(&format!("{e}"));
            None
        }
    }
}

/// Loads the registry, reporting an error if the configuration cannot be
/// found or parsed. Returns the registry together with the project root
/// (the configuration file's directory).
pub(crate) fn load_registry_required(
    config_override: Option<&str>,
    reporter: &mut Reporter,
) -> Option<(Registry, PathBuf)> {
    let path = resolve_config_path(config_override, reporter)?;
    let registry = match load_config(&path) {
        Ok(r) => r,
        Err(e) => {
            reporter.error(&format!("Failed to load configuration: {e}"));
            return None;
        }
    };
    let root = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((registry, root))
}

/// Walks up from `start` looking for a `.git` entry.
pub(crate) fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.canonicalize().ok()?;
    loop {
        if current.join(".git").exists() {
            return Some(current);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}
