//! Run configuration for tsfix
//!
//! The rule table is compiled in; only how a run behaves comes from the
//! command line.

use std::path::{Path, PathBuf};

use tsfix_rules::RuleSetRegistry;

/// Whether transformed text is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write transformed files in place
    #[default]
    Fix,
    /// Report what would change, write nothing
    Check,
}

/// What happens to the rest of the run when one file fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure; files already written stay written
    #[default]
    Abort,
    /// Report the failure and carry on with the next file
    Continue,
}

/// Options for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory the configured target paths are relative to
    pub root: PathBuf,
    pub mode: Mode,
    pub policy: FailurePolicy,
    /// Check each output is a fixed point before writing it
    pub verify: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            mode: Mode::default(),
            policy: FailurePolicy::default(),
            verify: false,
        }
    }
}

impl RunConfig {
    /// Path of a configured target on disk
    pub fn resolve(&self, target: &Path) -> PathBuf {
        self.root.join(target)
    }
}

/// Entries of `only` that name no configured target
pub fn unknown_targets<'a>(registry: &RuleSetRegistry, only: &'a [PathBuf]) -> Vec<&'a Path> {
    only.iter()
        .map(PathBuf::as_path)
        .filter(|p| registry.get(p).is_none())
        .collect()
}
