//! CLI handler for `preflight install`.

use std::io::IsTerminal;

use dialoguer::Confirm;
use preflight_core::install::{install_hook, InstallAction, MANAGED_HOOKS};

use crate::commands::find_git_root;
use crate::output::{OutputMode, Reporter};

/// Installs the managed git hooks into `.git/hooks/`.
///
/// A hook file written by another tool is only overwritten with `--force`,
/// or after interactive confirmation in human mode.
pub fn run_install(force: bool, reporter: &mut Reporter) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!("Cannot get current directory: {e}"));
            return 1;
        }
    };

    let Some(root) = find_git_root(&cwd) else {
        reporter.error("Not inside a git repository");
        return 1;
    };

    reporter.section("Installing git hooks");

    let interactive = reporter.mode() == OutputMode::Human && std::io::stdin().is_terminal();
    let mut failed = false;

    for kind in MANAGED_HOOKS {
        let outcome = match install_hook(&root, kind, force) {
            Ok(InstallAction::SkippedForeign) if interactive => {
                let overwrite = Confirm::new()
                    .with_prompt(format!(
                        "A {kind} hook from another tool exists. Overwrite it?"
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if overwrite {
                    install_hook(&root, kind, true)
                } else {
                    Ok(InstallAction::SkippedForeign)
                }
            }
            other => other,
        };

        match outcome {
            Ok(InstallAction::Created) => {
                reporter.success(&format!("Installed {kind} hook"));
            }
            Ok(InstallAction::AlreadyInstalled) => {
                reporter.info(&format!("{kind} hook already installed"));
            }
            Ok(InstallAction::SkippedForeign) => {
                reporter.warning(&format!(
                    "{kind} hook belongs to another tool; rerun with --force to replace it"
                ));
            }
            Err(e) => {
                reporter.error(&format!("Failed to install {kind} hook: {e}"));
                failed = true;
            }
        }
    }

    if failed {
        1
    } else {
        0
    }
}
