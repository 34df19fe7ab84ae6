//! CLI handler for `preflight check`.

use preflight_core::check::check_config;

use crate::commands::resolve_config_path;
use crate::output::Reporter;

/// Validates the configuration without running any action.
pub fn run_check(config_override: Option<&str>, reporter: &mut Reporter) -> i32 {
    let Some(path) = resolve_config_path(config_override, reporter) else {
        return 2;
    };

    reporter.section("Configuration check");

    let result = check_config(&path);
    reporter.report_check(&result);

    if result.has_errors() {
        reporter.error("Configuration check failed");
        2
    } else {
        reporter.success("Configuration check passed");
        0
    }
}
