//! CLI handler for `preflight run`.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use colored::*;
use indicatif::ProgressBar;
use preflight_core::exec::{ActionStatus, InterruptFlag, RunEvent};
use preflight_core::files::all_files;
use preflight_core::hooks::{run_files, run_hook, HookKind};

use crate::cli::HookArg;
use crate::commands::load_registry_required;
use crate::output::{OutputMode, Reporter};

/// Runs configured actions against the selected changed-file set.
///
/// The file set comes from, in priority order: explicit file arguments,
/// `--all-files`, or the git hook's discovery (`--hook`, defaulting to
/// pre-commit staged files).
pub fn run_actions(
    hook: Option<HookArg>,
    all: bool,
    parallel: bool,
    files: &[String],
    config_override: Option<&str>,
    interrupt: &InterruptFlag,
    reporter: &mut Reporter,
) -> i32 {
    let Some((registry, root)) = load_registry_required(config_override, reporter) else {
        return 2;
    };

    let kind = hook.map(HookKind::from).unwrap_or(HookKind::PreCommit);

    let changed: Option<Vec<PathBuf>> = if !files.is_empty() {
        Some(files.iter().map(PathBuf::from).collect())
    } else if all {
        match all_files(&root) {
            Ok(f) => Some(f),
            Err(e) => {
                reporter.error(&format!("Failed to list project files: {e}"));
                return 1;
            }
        }
    } else {
        None
    };

    reporter.section(&format!("preflight {kind}"));

    let live = reporter.mode() == OutputMode::Human;
    let spin = live && !parallel;
    let active: Mutex<Option<ProgressBar>> = Mutex::new(None);

    let observer = move |event: RunEvent<'_>| match event {
        RunEvent::Started(action) => {
            if spin {
                let pb = ProgressBar::new_spinner();
                pb.set_message(action.name.clone());
                pb.enable_steady_tick(Duration::from_millis(80));
                if let Ok(mut slot) = active.lock() {
                    *slot = Some(pb);
                }
            }
        }
        RunEvent::Finished(result) => {
            if let Ok(mut slot) = active.lock() {
                if let Some(pb) = slot.take() {
                    pb.finish_and_clear();
                }
            }
            if live {
                match &result.status {
                    ActionStatus::Passed => println!(
                        "{} {} ({} file(s))",
                        "✓".green(),
                        result.action,
                        result.files.len()
                    ),
                    ActionStatus::Skipped => println!(
                        "{} {} (no matching files)",
                        "-".dimmed(),
                        result.action
                    ),
                    other => println!(
                        "{} {} ({})",
                        "✗".red(),
                        result.action,
                        status_word(other)
                    ),
                }
            }
        }
    };

    let report = match changed {
        Some(files) => run_files(&registry, &files, &root, interrupt, parallel, &observer),
        None => match run_hook(&registry, kind, &root, interrupt, parallel, &observer) {
            Ok(r) => r,
            Err(e) => {
                reporter.error(&format!("Failed to detect changed files: {e}"));
                return 1;
            }
        },
    };

    reporter.report_run(&report);

    if report.interrupted {
        130
    } else if report.success() {
        0
    } else {
        1
    }
}

fn status_word(status: &ActionStatus) -> String {
    match status {
        ActionStatus::Failed { code: Some(code) } => format!("exit {code}"),
        ActionStatus::Failed { code: None } => "signal".to_string(),
        ActionStatus::Interrupted => "interrupted".to_string(),
        ActionStatus::Error { message } => message.clone(),
        ActionStatus::Passed | ActionStatus::Skipped => String::new(),
    }
}
