//! The action registry: an ordered, immutable sequence of actions.

use std::path::{Path, PathBuf};

use crate::types::action::Action;
use crate::types::template::MissingPlaceholder;

/// All configured actions, in declaration order, plus registry-wide policy.
///
/// Built once by [`crate::config::load_config`] and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    actions: Vec<Action>,
    missing_placeholder: MissingPlaceholder,
}

/// One action paired with the changed files its include pattern matched.
#[derive(Debug)]
pub struct Selection<'a> {
    pub action: &'a Action,
    pub files: Vec<PathBuf>,
}

impl<'a> Selection<'a> {
    /// A selection with no matched files produces no invocation.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Registry {
    pub(crate) fn new(actions: Vec<Action>, missing_placeholder: MissingPlaceholder) -> Self {
        Self {
            actions,
            missing_placeholder,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn missing_placeholder(&self) -> MissingPlaceholder {
        self.missing_placeholder
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Filters `changed_files` through each enabled action's include pattern,
    /// in declaration order. Disabled actions are never selected.
    pub fn select<'a, P: AsRef<Path>>(&'a self, changed_files: &[P]) -> Vec<Selection<'a>> {
        self.actions
            .iter()
            .filter(|a| a.enabled)
            .map(|action| Selection {
                action,
                files: changed_files
                    .iter()
                    .map(AsRef::as_ref)
                    .filter(|p| action.include.matches(p))
                    .map(Path::to_path_buf)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::action::IncludePattern;
    use crate::types::template::CommandTemplate;

    fn action(name: &str, include: &str, enabled: bool) -> Action {
        Action {
            name: name.to_string(),
            template: CommandTemplate::parse("true {files}", name).unwrap(),
            include: IncludePattern::parse(include, name).unwrap(),
            enabled,
            mutating: false,
        }
    }

    fn registry(actions: Vec<Action>) -> Registry {
        Registry::new(actions, MissingPlaceholder::Error)
    }

    #[test]
    fn select_with_no_changed_files_matches_nothing() {
        let reg = registry(vec![action("a", "*.py", true), action("b", "*.rs", true)]);
        let selections = reg.select::<PathBuf>(&[]);
        assert_eq!(selections.len(), 2);
        assert!(selections.iter().all(Selection::is_empty));
    }

    #[test]
    fn select_filters_by_include_pattern() {
        let reg = registry(vec![action("py", "*.py", true)]);
        let selections = reg.select(&[Path::new("a.py"), Path::new("b.txt")]);
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].files, vec![PathBuf::from("a.py")]);
    }

    #[test]
    fn select_preserves_declaration_order() {
        let reg = registry(vec![
            action("zeta", "*.py", true),
            action("alpha", "*.py", true),
            action("mid", "*.py", true),
        ]);
        let selections = reg.select(&[Path::new("x.py")]);
        let names: Vec<&str> = selections.iter().map(|s| s.action.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn select_skips_disabled_actions() {
        let reg = registry(vec![action("off", "*.py", false), action("on", "*.py", true)]);
        let selections = reg.select(&[Path::new("x.py")]);
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].action.name, "on");
    }

    #[test]
    fn get_finds_actions_by_name() {
        let reg = registry(vec![action("fmt", "*.rs", true)]);
        assert!(reg.get("fmt").is_some());
        assert!(reg.get("missing").is_none());
    }
}
