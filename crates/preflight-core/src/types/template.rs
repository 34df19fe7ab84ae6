//! Typed command templates with a single `{files}` substitution token.
//!
//! Templates are validated when the configuration is loaded, so a malformed
//! command fails before any action runs rather than at invocation time.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::PreflightError;

/// The substitution token recognized in `run` commands.
pub const FILES_TOKEN: &str = "{files}";

/// Registry-wide policy for commands that carry no [`FILES_TOKEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPlaceholder {
    /// Reject the configuration: a command without `{files}` paired with
    /// matched files is ambiguous.
    #[default]
    Error,
    /// Append the escaped file list to the end of the command.
    Append,
    /// Run the command as written, without the file list.
    RunWithoutFiles,
}

/// A parsed `run` command, split around its `{files}` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTemplate {
    /// `prefix{files}suffix`
    WithFiles { prefix: String, suffix: String },
    /// A command with no `{files}` token.
    Bare(String),
}

impl CommandTemplate {
    /// Parses a raw `run` string.
    ///
    /// # Errors
    ///
    /// Returns [`PreflightError::Template`] if the command is blank or
    /// contains more than one `{files}` token.
    pub fn parse(raw: &str, action: &str) -> Result<Self, PreflightError> {
        if raw.trim().is_empty() {
            return Err(PreflightError::Template {
                action: action.to_string(),
                reason: "command is empty".to_string(),
            });
        }

        match raw.match_indices(FILES_TOKEN).count() {
            0 => Ok(CommandTemplate::Bare(raw.to_string())),
            1 => {
                let start = raw.find(FILES_TOKEN).unwrap_or(0);
                Ok(CommandTemplate::WithFiles {
                    prefix: raw[..start].to_string(),
                    suffix: raw[start + FILES_TOKEN.len()..].to_string(),
                })
            }
            n => Err(PreflightError::Template {
                action: action.to_string(),
                reason: format!("found {n} {FILES_TOKEN} tokens, expected at most one"),
            }),
        }
    }

    /// Whether this template contains a `{files}` token.
    pub fn has_placeholder(&self) -> bool {
        matches!(self, CommandTemplate::WithFiles { .. })
    }

    /// Renders the template into a shell command string, substituting the
    /// space-joined, shell-escaped file list for the `{files}` token.
    ///
    /// # Errors
    ///
    /// Returns [`PreflightError::Render`] for a [`CommandTemplate::Bare`]
    /// template with non-empty `files` under [`MissingPlaceholder::Error`].
    pub fn render(
        &self,
        action: &str,
        files: &[PathBuf],
        policy: MissingPlaceholder,
    ) -> Result<String, PreflightError> {
        let joined = shell_words::join(files.iter().map(|p| p.to_string_lossy()));

        match self {
            CommandTemplate::WithFiles { prefix, suffix } => {
                Ok(format!("{prefix}{joined}{suffix}"))
            }
            CommandTemplate::Bare(command) => {
                if files.is_empty() {
                    return Ok(command.clone());
                }
                match policy {
                    MissingPlaceholder::Error => Err(PreflightError::Render {
                        action: action.to_string(),
                        count: files.len(),
                    }),
                    MissingPlaceholder::Append => Ok(format!("{command} {joined}")),
                    MissingPlaceholder::RunWithoutFiles => Ok(command.clone()),
                }
            }
        }
    }
}

impl std::fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandTemplate::WithFiles { prefix, suffix } => {
                write!(f, "{prefix}{FILES_TOKEN}{suffix}")
            }
            CommandTemplate::Bare(command) => write!(f, "{command}"),
        }
    }
}
