//! File processing logic for tsfix
//!
//! Each target goes through load, transform and store on its own. Nothing
//! is carried from one file to the next.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use tsfix_core::{Change, RuleSet};

use crate::config::{FailurePolicy, Mode, RunConfig};
use crate::output::{EditInfo, Reporter};

/// Where a file is in its load, transform, store cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Pending,
    Loaded,
    /// Transform done; terminal when there is nothing to write
    Transformed,
    Written,
    Failed,
}

/// Result of processing a single file
pub struct ProcessResult {
    /// Replacements made, in application order
    pub changes: Vec<Change>,
    /// Original source text
    pub old_source: String,
    /// Source text after every rule ran
    pub new_source: String,
}

impl ProcessResult {
    pub fn is_modified(&self) -> bool {
        self.old_source != self.new_source
    }

    pub fn edit_infos(&self) -> Vec<EditInfo> {
        self.changes
            .iter()
            .map(|change| EditInfo {
                rule: change.rule.clone(),
                line: change.line,
                column: change.column,
                message: change.description.clone(),
            })
            .collect()
    }
}

/// Final state of one target after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub state: FileState,
}

struct Tracker {
    path: PathBuf,
    state: FileState,
}

impl Tracker {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: FileState::Pending,
        }
    }

    fn advance(&mut self, next: FileState) {
        debug!(path = %self.path.display(), from = ?self.state, to = ?next, "file state");
        self.state = next;
    }

    fn finish(self) -> FileOutcome {
        FileOutcome {
            path: self.path,
            state: self.state,
        }
    }
}

/// Run a rule set over a file's text; pure, no I/O
pub fn transform_source(
    path: &Path,
    old_source: String,
    rule_set: &RuleSet,
    verify: bool,
) -> Result<ProcessResult> {
    let compiled = rule_set
        .compile()
        .with_context(|| format!("Invalid rule set for {}", path.display()))?;

    let transform = compiled
        .transform(&old_source)
        .with_context(|| format!("Failed to transform {}", path.display()))?;

    if verify {
        compiled
            .verify_fixed_point(&transform.output)
            .with_context(|| format!("Output for {} is not stable", path.display()))?;
    }

    Ok(ProcessResult {
        changes: transform.changes,
        old_source,
        new_source: transform.output,
    })
}

/// Read a whole file as text
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Run every rule set against its target, in order
///
/// Under [`FailurePolicy::Abort`] the first failure is returned as the
/// error; targets processed before it keep their new content.
pub fn run(rule_sets: &[&RuleSet], config: &RunConfig, reporter: &mut Reporter) -> Result<Vec<FileOutcome>> {
    let mut outcomes = Vec::with_capacity(rule_sets.len());

    for rule_set in rule_sets {
        let display_path = rule_set.target();
        let mut tracker = Tracker::new(config.resolve(display_path));

        match process_target(&mut tracker, rule_set, config) {
            Ok(result) => {
                if !result.is_modified() {
                    reporter.report_skipped(display_path);
                } else if config.mode == Mode::Check {
                    reporter.report_check(
                        display_path,
                        result.edit_infos(),
                        &result.old_source,
                        &result.new_source,
                    );
                } else {
                    info!(path = %display_path.display(), edits = result.changes.len(), "rewrote file");
                    reporter.report_fix(display_path, result.edit_infos());
                }
            }
            Err(e) => {
                tracker.advance(FileState::Failed);
                if config.policy == FailurePolicy::Abort {
                    return Err(e);
                }
                warn!(path = %display_path.display(), "skipping file: {:#}", e);
                reporter.report_error(display_path, &format!("{:#}", e));
            }
        }

        outcomes.push(tracker.finish());
    }

    Ok(outcomes)
}

fn process_target(tracker: &mut Tracker, rule_set: &RuleSet, config: &RunConfig) -> Result<ProcessResult> {
    let path = tracker.path.clone();

    let source = read_file(&path)?;
    tracker.advance(FileState::Loaded);

    let result = transform_source(&path, source, rule_set, config.verify)?;
    tracker.advance(FileState::Transformed);

    if config.mode == Mode::Fix && result.is_modified() {
        write_file(&path, &result.new_source)?;
        tracker.advance(FileState::Written);
    }

    Ok(result)
}
