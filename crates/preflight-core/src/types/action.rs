//! Actions: one configured (command, file-selection) pair.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::PreflightError;
use crate::types::template::{CommandTemplate, MissingPlaceholder};

/// A compiled include glob.
///
/// `*` never crosses a path separator. A pattern containing no `/` is matched
/// against the file name, a pattern containing `/` against the whole relative
/// path, so `*.py` selects `src/app.py` while `src/*.py` selects only direct
/// children of `src/`.
#[derive(Debug, Clone)]
pub struct IncludePattern {
    raw: String,
    matcher: GlobMatcher,
    match_file_name: bool,
}

impl IncludePattern {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PreflightError::Glob`] with the action name if the pattern
    /// is not valid glob syntax.
    pub fn parse(raw: &str, action: &str) -> Result<Self, PreflightError> {
        let glob = GlobBuilder::new(raw)
            .literal_separator(true)
            .build()
            .map_err(|source| PreflightError::Glob {
                action: action.to_string(),
                source,
            })?;

        Ok(Self {
            raw: raw.to_string(),
            matcher: glob.compile_matcher(),
            match_file_name: !raw.contains('/'),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Tests a changed-file path against this pattern. Case-sensitive.
    pub fn matches(&self, path: &Path) -> bool {
        if self.match_file_name {
            match path.file_name() {
                Some(name) => self.matcher.is_match(Path::new(name)),
                None => false,
            }
        } else {
            self.matcher.is_match(path)
        }
    }
}

/// One configured action: a command template plus a file-inclusion glob.
#[derive(Debug, Clone)]
pub struct Action {
    pub name: String,
    pub template: CommandTemplate,
    pub include: IncludePattern,
    /// Disabled actions stay in the registry but are never selected.
    pub enabled: bool,
    /// Mutating actions rewrite file contents and are never parallelized.
    pub mutating: bool,
}

impl Action {
    /// Renders this action's command for the given matched files.
    ///
    /// # Errors
    ///
    /// See [`CommandTemplate::render`].
    pub fn render(
        &self,
        files: &[PathBuf],
        policy: MissingPlaceholder,
    ) -> Result<String, PreflightError> {
        self.template.render(&self.name, files, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> IncludePattern {
        IncludePattern::parse(raw, "test").unwrap()
    }

    #[test]
    fn slash_free_pattern_matches_file_name_at_any_depth() {
        let p = pattern("*.py");
        assert!(p.matches(Path::new("a.py")));
        assert!(p.matches(Path::new("src/deep/nested/app.py")));
        assert!(!p.matches(Path::new("b.txt")));
        assert!(!p.matches(Path::new("src/b.txt")));
    }

    #[test]
    fn pattern_with_slash_anchors_to_full_path() {
        let p = pattern("src/*.py");
        assert!(p.matches(Path::new("src/app.py")));
        assert!(!p.matches(Path::new("app.py")));
        assert!(!p.matches(Path::new("src/deep/app.py")));
    }

    #[test]
    fn recursive_pattern_spans_directories() {
        let p = pattern("src/**/*.py");
        assert!(p.matches(Path::new("src/deep/nested/app.py")));
        assert!(!p.matches(Path::new("other/app.py")));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let p = pattern("*.py");
        assert!(!p.matches(Path::new("a.PY")));
    }

    #[test]
    fn brace_alternation_is_supported() {
        let p = pattern("*.{yml,yaml}");
        assert!(p.matches(Path::new("ci/config.yaml")));
        assert!(p.matches(Path::new("config.yml")));
        assert!(!p.matches(Path::new("config.json")));
    }

    #[test]
    fn invalid_glob_carries_action_name() {
        let err = IncludePattern::parse("[", "lint").unwrap_err();
        match err {
            PreflightError::Glob { action, .. } => assert_eq!(action, "lint"),
            other => panic!("expected Glob error, got {other:?}"),
        }
    }
}
