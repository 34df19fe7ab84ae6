//! Run scheduling.
//!
//! Actions run sequentially in declaration order: a formatting action must
//! finish rewriting files before a later check reads them, and the
//! filesystem is the hand-off between those stages. Parallel mode is an
//! opt-in optimization that only ever runs non-mutating actions with
//! pairwise-disjoint file sets concurrently, and never reorders anything
//! across a mutating action.

use std::collections::HashSet;
use std::path::Path;

use crate::exec::report::{ActionStatus, InvocationResult, RunReport};
use crate::exec::runner::{run_selection, InterruptFlag};
use crate::types::{Action, MissingPlaceholder, Selection};

/// Progress notifications emitted while a run executes.
pub enum RunEvent<'a> {
    /// A child process is about to be spawned for this action.
    Started(&'a Action),
    /// An action reached a terminal state (including skipped).
    Finished(&'a InvocationResult),
}

/// Observer for [`RunEvent`]s. Must be `Sync`: parallel groups emit events
/// from worker threads.
pub type RunObserver = dyn Fn(RunEvent<'_>) + Sync;

fn noop_observer(_: RunEvent<'_>) {}

/// No-op observer for callers that do not track progress.
pub fn silent_observer() -> &'static RunObserver {
    &noop_observer
}

/// Executes selections in declaration order and collects a [`RunReport`].
///
/// A non-passing action does not prevent subsequent actions from running;
/// the report as a whole fails. Cancellation via `interrupt` kills the
/// running child, abandons the remaining actions, and returns partial
/// results with `interrupted` set.
pub fn run_selections(
    selections: &[Selection<'_>],
    policy: MissingPlaceholder,
    cwd: &Path,
    interrupt: &InterruptFlag,
    parallel: bool,
    observer: &RunObserver,
) -> RunReport {
    let mut report = RunReport::default();

    for group in plan_groups(selections, parallel) {
        if interrupt.is_triggered() {
            report.interrupted = true;
            break;
        }

        if group.len() == 1 {
            let selection = &selections[group[0]];
            run_one(selection, policy, cwd, interrupt, observer, &mut report);
        } else {
            run_group(&group, selections, policy, cwd, interrupt, observer, &mut report);
        }

        if report.interrupted {
            break;
        }
    }

    report
}

fn run_one(
    selection: &Selection<'_>,
    policy: MissingPlaceholder,
    cwd: &Path,
    interrupt: &InterruptFlag,
    observer: &RunObserver,
    report: &mut RunReport,
) {
    if !selection.is_empty() {
        observer(RunEvent::Started(selection.action));
    }
    let result = run_selection(selection, policy, cwd, interrupt);
    observer(RunEvent::Finished(&result));
    if result.status == ActionStatus::Interrupted {
        report.interrupted = true;
    }
    report.push(result);
}

fn run_group(
    group: &[usize],
    selections: &[Selection<'_>],
    policy: MissingPlaceholder,
    cwd: &Path,
    interrupt: &InterruptFlag,
    observer: &RunObserver,
    report: &mut RunReport,
) {
    let mut results: Vec<InvocationResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = group
            .iter()
            .map(|&index| {
                let selection = &selections[index];
                scope.spawn(move || {
                    if !selection.is_empty() {
                        observer(RunEvent::Started(selection.action));
                    }
                    let result = run_selection(selection, policy, cwd, interrupt);
                    observer(RunEvent::Finished(&result));
                    result
                })
            })
            .collect();

        handles
            .into_iter()
            .zip(group)
            .map(|(handle, &index)| match handle.join() {
                Ok(result) => result,
                Err(_) => InvocationResult {
                    action: selections[index].action.name.clone(),
                    files: selections[index].files.clone(),
                    status: ActionStatus::Error {
                        message: "worker thread panicked".to_string(),
                    },
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                },
            })
            .collect()
    });

    if results
        .iter()
        .any(|r| r.status == ActionStatus::Interrupted)
    {
        report.interrupted = true;
    }
    for result in results.drain(..) {
        report.push(result);
    }
}

/// Partitions selections into contiguous execution groups.
///
/// Sequential mode yields one singleton group per selection. Parallel mode
/// groups maximal runs of consecutive non-mutating selections whose file
/// sets are pairwise disjoint; a mutating selection is always its own group,
/// so every mutating action still completes before anything declared after
/// it starts.
fn plan_groups(selections: &[Selection<'_>], parallel: bool) -> Vec<Vec<usize>> {
    if !parallel {
        return (0..selections.len()).map(|i| vec![i]).collect();
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_files: HashSet<&Path> = HashSet::new();

    for (index, selection) in selections.iter().enumerate() {
        if selection.action.mutating {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
                current_files.clear();
            }
            groups.push(vec![index]);
            continue;
        }

        let overlaps = selection
            .files
            .iter()
            .any(|f| current_files.contains(f.as_path()));
        if overlaps && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
            current_files.clear();
        }

        current.push(index);
        current_files.extend(selection.files.iter().map(|f| f.as_path()));
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}
