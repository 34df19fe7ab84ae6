use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No preflight.yaml found searching upward from {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid include pattern for action '{action}': {source}")]
    Glob {
        action: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid command for action '{action}': {reason}")]
    Template { action: String, reason: String },

    #[error("Command for action '{action}' has no {{files}} placeholder but {count} file(s) matched")]
    Render { action: String, count: usize },

    #[error("{0}")]
    Other(String),
}

/// Severity of a configuration check finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding produced by `check_config`.
#[derive(Debug, Clone)]
pub struct CheckDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub action: Option<String>,
    pub path: Option<PathBuf>,
}

impl CheckDiagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            action: None,
            path: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            action: None,
            path: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

/// Ordered collection of check findings.
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<CheckDiagnostic>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: CheckDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn merge(&mut self, other: CheckResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
