//! CLI handler for `preflight list`.

use crate::commands::load_registry_required;
use crate::output::Reporter;

/// Lists configured actions in declaration order.
pub fn run_list(config_override: Option<&str>, reporter: &mut Reporter) -> i32 {
    let Some((registry, _root)) = load_registry_required(config_override, reporter) else {
        return 2;
    };

    reporter.section("Configured actions");

    if registry.actions().is_empty() {
        reporter.info("No actions configured");
        return 0;
    }

    for action in registry.actions() {
        let mut flags = Vec::new();
        if action.mutating {
            flags.push("mutating");
        }
        if !action.enabled {
            flags.push("disabled");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        reporter.action_line(
            &action.name,
            &format!(
                "include {} -> {}{flags}",
                action.include.as_str(),
                action.template
            ),
        );
    }

    0
}
