//! Non-executing configuration check.

use std::path::Path;

use crate::config::load_config;
use crate::error::{CheckDiagnostic, CheckResult};

/// Validates the configuration at `path` without running any action.
///
/// Load failures become error diagnostics; structurally valid but
/// questionable configurations (disabled actions, patterns that can never
/// match, nothing enabled at all) become warnings.
pub fn check_config(path: &Path) -> CheckResult {
    let mut result = CheckResult::new();

    let registry = match load_config(path) {
        Ok(r) => r,
        Err(e) => {
            result.push(CheckDiagnostic::error(e.to_string()).with_path(path));
            return result;
        }
    };

    for action in registry.actions() {
        if !action.enabled {
            result.push(
                CheckDiagnostic::warning("action is disabled").with_action(&action.name),
            );
        }
        if action.include.as_str().is_empty() {
            result.push(
                CheckDiagnostic::warning("include pattern is empty and can never match a file")
                    .with_action(&action.name),
            );
        }
    }

    if !registry.actions().iter().any(|a| a.enabled) {
        result.push(CheckDiagnostic::warning(
            "configuration has no enabled actions; nothing will ever run",
        ));
    }

    result
}
