//! Native git hook installation.
//!
//! Writes `.git/hooks/pre-commit` and `.git/hooks/pre-push` scripts that
//! invoke `preflight run --hook <name>`. A hook file that was not written
//! by preflight is left alone unless the caller forces the overwrite.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::PreflightError;
use crate::hooks::HookKind;

/// The hooks managed by [`install_hook`].
pub const MANAGED_HOOKS: [HookKind; 2] = [HookKind::PreCommit, HookKind::PrePush];

/// The shebang and hook body for native git hooks.
const HOOK_TEMPLATE: &str = "#!/bin/sh\npreflight run --hook {hook}\n";

/// Marker used to recognize hooks written by preflight.
const HOOK_MARKER: &str = "preflight run --hook";

/// State of a hook file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStatus {
    /// No hook file exists.
    NotInstalled,
    /// The hook file was written by preflight.
    Installed,
    /// A hook file exists but was written by something else.
    Foreign,
}

/// What [`install_hook`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallAction {
    Created,
    AlreadyInstalled,
    /// A foreign hook was present and `force` was not set.
    SkippedForeign,
}

/// Inspects the hook file for `kind` under `project_root`.
///
/// # Errors
///
/// Returns [`PreflightError::Io`] if an existing hook file cannot be read.
pub fn hook_status(project_root: &Path, kind: HookKind) -> Result<HookStatus, PreflightError> {
    let hook_path = project_root.join(".git").join("hooks").join(kind.name());
    if !hook_path.exists() {
        return Ok(HookStatus::NotInstalled);
    }
    let content = fs::read_to_string(&hook_path)?;
    if content.contains(HOOK_MARKER) {
        Ok(HookStatus::Installed)
    } else {
        Ok(HookStatus::Foreign)
    }
}

/// Installs the hook script for `kind` under `project_root/.git/hooks/`.
///
/// The script is written atomically (temp file then rename) and made
/// executable on Unix. Returns [`InstallAction::SkippedForeign`] without
/// touching anything when a foreign hook exists and `force` is false.
///
/// # Errors
///
/// Returns [`PreflightError::Other`] if `project_root` is not a git
/// repository, or [`PreflightError::Io`] for filesystem failures.
pub fn install_hook(
    project_root: &Path,
    kind: HookKind,
    force: bool,
) -> Result<InstallAction, PreflightError> {
    if !project_root.join(".git").exists() {
        return Err(PreflightError::Other(format!(
            "not a git repository: {}",
            project_root.display()
        )));
    }

    match hook_status(project_root, kind)? {
        HookStatus::Installed => return Ok(InstallAction::AlreadyInstalled),
        HookStatus::Foreign if !force => return Ok(InstallAction::SkippedForeign),
        _ => {}
    }

    let hooks_dir = project_root.join(".git").join("hooks");
    fs::create_dir_all(&hooks_dir)?;
    let hook_path = hooks_dir.join(kind.name());
    let content = HOOK_TEMPLATE.replace("{hook}", kind.name());

    let mut tmp = NamedTempFile::new_in(&hooks_dir)?;
    tmp.write_all(content.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o755);
        tmp.as_file().set_permissions(perms)?;
    }

    tmp.persist(&hook_path).map_err(|e| PreflightError::Io(e.error))?;

    Ok(InstallAction::Created)
}
