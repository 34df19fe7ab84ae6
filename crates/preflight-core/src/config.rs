//! Configuration loading and discovery.
//!
//! The configuration document is a YAML mapping of action names to
//! `{run, include}` pairs:
//!
//! ```yaml
//! actions:
//!   types:
//!     run: "mypy {files}"
//!     include: "*.py"
//!   security:
//!     run: "bandit {files}"
//!     include: "*.py"
//! ```
//!
//! The document is parsed once at startup into an immutable [`Registry`];
//! every structural problem (missing `run`, invalid glob, malformed template)
//! is rejected here, before any action runs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PreflightError;
use crate::types::{Action, CommandTemplate, IncludePattern, MissingPlaceholder, Registry};

/// File names probed by [`discover_config`], in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["preflight.yaml", ".preflight.yaml"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    missing_placeholder: Option<MissingPlaceholder>,
    actions: serde_yaml::Mapping,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    run: String,
    include: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    mutating: bool,
}

fn default_enabled() -> bool {
    true
}

/// Searches upward from `start_dir` for a configuration file, stopping at
/// the first directory that contains a `.git` entry.
///
/// # Errors
///
/// Returns [`PreflightError::ConfigNotFound`] if no configuration file is
/// found before the search terminates.
pub fn discover_config(start_dir: &Path) -> Result<PathBuf, PreflightError> {
    let mut current = start_dir.canonicalize()?;

    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        if current.join(".git").exists() {
            break;
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => break,
        }
    }

    Err(PreflightError::ConfigNotFound(start_dir.to_path_buf()))
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns [`PreflightError::Io`] if the file cannot be read, otherwise any
/// error from [`parse_config`].
pub fn load_config(path: &Path) -> Result<Registry, PreflightError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses a configuration document into a validated [`Registry`].
///
/// Declaration order of the `actions` mapping becomes execution order.
///
/// # Errors
///
/// - [`PreflightError::Yaml`] if the document is not a mapping of mappings
///   or contains unknown top-level keys.
/// - [`PreflightError::Config`] for a missing `run`/`include` field, a
///   non-string or duplicate or malformed action name.
/// - [`PreflightError::Glob`] for an invalid include pattern.
/// - [`PreflightError::Template`] for a malformed command, including a
///   command with no `{files}` token under the default `missing_placeholder:
///   error` policy.
pub fn parse_config(content: &str) -> Result<Registry, PreflightError> {
    let raw: RawConfig = serde_yaml::from_str(content)?;
    let policy = raw.missing_placeholder.unwrap_or_default();

    let name_re = regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$")
        .map_err(|e| PreflightError::Other(e.to_string()))?;

    let mut actions = Vec::with_capacity(raw.actions.len());
    let mut seen: HashSet<String> = HashSet::new();

    for (key, value) in raw.actions {
        let name = key
            .as_str()
            .ok_or_else(|| {
                PreflightError::Config(format!("action names must be strings, got: {key:?}"))
            })?
            .to_string();

        if !name_re.is_match(&name) {
            return Err(PreflightError::Config(format!(
                "invalid action name '{name}': must match [A-Za-z0-9][A-Za-z0-9._-]*"
            )));
        }
        if !seen.insert(name.clone()) {
            return Err(PreflightError::Config(format!(
                "duplicate action name '{name}'"
            )));
        }

        let entry: RawAction = serde_yaml::from_value(value)
            .map_err(|e| PreflightError::Config(format!("action '{name}': {e}")))?;

        let template = CommandTemplate::parse(&entry.run, &name)?;
        if !template.has_placeholder() && policy == MissingPlaceholder::Error {
            return Err(PreflightError::Template {
                action: name,
                reason: format!(
                    "command has no {} token (set missing_placeholder to allow this)",
                    crate::types::FILES_TOKEN
                ),
            });
        }

        let include = IncludePattern::parse(&entry.include, &name)?;

        actions.push(Action {
            name,
            template,
            include,
            enabled: entry.enabled,
            mutating: entry.mutating,
        });
    }

    Ok(Registry::new(actions, policy))
}
