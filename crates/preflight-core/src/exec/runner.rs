//! Single-action execution.
//!
//! Each rendered command runs through the platform shell as a child process.
//! The child is held by an RAII guard so it is killed and reaped on every
//! exit path, including when the parent is interrupted mid-run.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::exec::report::{ActionStatus, InvocationResult};
use crate::types::{MissingPlaceholder, Selection};

/// Shared cancellation flag, set from a Ctrl-C handler.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Holds a spawned child and guarantees it is reaped.
///
/// Mirrors the consume-on-success guard shape used for file mutations: the
/// happy path marks the child reaped after `wait`, and `Drop` kills and
/// waits on any child still running when the guard unwinds.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// Waits for the child to exit, polling the interrupt flag. Returns
    /// `None` if the run was interrupted; the child is killed and reaped
    /// before returning.
    fn wait_or_interrupt(
        &mut self,
        interrupt: &InterruptFlag,
    ) -> std::io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                self.reaped = true;
                return Ok(Some(status));
            }
            if interrupt.is_triggered() {
                let _ = self.child.kill();
                let _ = self.child.wait();
                self.reaped = true;
                return Ok(None);
            }
            thread::sleep(Duration::from_millis(25));
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        // Best effort: a zombie is worse than a failed kill.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn shell_command(rendered: &str) -> Command {
    #[cfg(unix)]
    {
        let mut command = Command::new("sh");
        command.arg("-c").arg(rendered);
        command
    }
    #[cfg(windows)]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", rendered]);
        command
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut reader) = source {
            let _ = reader.read_to_end(&mut buf);
        }
        buf
    })
}

/// Executes one selection and returns its result.
///
/// Render failures and spawn failures are recorded as
/// [`ActionStatus::Error`] rather than propagated, so one broken action does
/// not prevent subsequent actions from running. An empty selection is
/// reported as [`ActionStatus::Skipped`] without spawning anything.
pub fn run_selection(
    selection: &Selection<'_>,
    policy: MissingPlaceholder,
    cwd: &Path,
    interrupt: &InterruptFlag,
) -> InvocationResult {
    let action = selection.action;

    if selection.is_empty() {
        return InvocationResult::skipped(&action.name);
    }

    let rendered = match action.render(&selection.files, policy) {
        Ok(r) => r,
        Err(e) => {
            return InvocationResult {
                action: action.name.clone(),
                files: selection.files.clone(),
                status: ActionStatus::Error {
                    message: e.to_string(),
                },
                stdout: Vec::new(),
                stderr: Vec::new(),
            }
        }
    };

    let spawned = shell_command(&rendered)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(c) => c,
        Err(e) => {
            return InvocationResult {
                action: action.name.clone(),
                files: selection.files.clone(),
                status: ActionStatus::Error {
                    message: format!("failed to spawn: {e}"),
                },
                stdout: Vec::new(),
                stderr: Vec::new(),
            }
        }
    };

    // Drain the pipes on reader threads so a chatty child cannot fill the
    // pipe buffer and deadlock against our wait loop.
    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    let mut guard = ChildGuard::new(child);
    let waited = guard.wait_or_interrupt(interrupt);

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    let status = match waited {
        Ok(Some(exit)) if exit.success() => ActionStatus::Passed,
        Ok(Some(exit)) => ActionStatus::Failed { code: exit.code() },
        Ok(None) => ActionStatus::Interrupted,
        Err(e) => ActionStatus::Error {
            message: format!("failed to wait on child: {e}"),
        },
    };

    InvocationResult {
        action: action.name.clone(),
        files: selection.files.clone(),
        status,
        stdout,
        stderr,
    }
}
