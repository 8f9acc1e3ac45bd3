//! Folder run report value objects

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to one folder group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupOutcome {
    /// Every file succeeded and the source directory was deleted
    Retired,
    /// A file failed; remaining files were not attempted and the source is intact
    Failed { file: PathBuf, reason: String },
    /// Every file succeeded but the source directory could not be deleted
    RetireFailed { reason: String },
    /// No eligible files; the group was left untouched
    Skipped,
}

impl GroupOutcome {
    pub fn is_retired(&self) -> bool {
        matches!(self, GroupOutcome::Retired)
    }

    pub fn is_attempted(&self) -> bool {
        !matches!(self, GroupOutcome::Skipped)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupOutcome::Retired => "retired",
            GroupOutcome::Failed { .. } => "failed",
            GroupOutcome::RetireFailed { .. } => "retire failed",
            GroupOutcome::Skipped => "skipped",
        }
    }
}

/// Per-group entry of a folder run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub name: String,
    /// Eligible files found in the group
    pub eligible_files: usize,
    /// Files that completed successfully before the group finished
    pub processed_files: usize,
    pub outcome: GroupOutcome,
}

/// Overall result of a bulk folder run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRunReport {
    pub root: PathBuf,
    pub groups: Vec<GroupReport>,
    /// The root had no subdirectories at all
    pub no_groups: bool,
}

impl FolderRunReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            groups: Vec::new(),
            no_groups: false,
        }
    }

    /// Report for a root without any subdirectory
    pub fn without_groups(root: impl Into<PathBuf>) -> Self {
        Self {
            no_groups: true,
            ..Self::new(root)
        }
    }

    pub fn push(&mut self, group: GroupReport) {
        self.groups.push(group);
    }

    /// Groups that had eligible files
    pub fn attempted(&self) -> usize {
        self.groups.iter().filter(|g| g.outcome.is_attempted()).count()
    }

    /// Groups whose source directory was deleted
    pub fn retired(&self) -> usize {
        self.groups.iter().filter(|g| g.outcome.is_retired()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups.iter().filter(|g| !g.outcome.is_attempted())
    }

    /// Summary line, e.g. `1/1 groups processed.`
    pub fn summary(&self) -> String {
        format!("{}/{} groups processed.", self.retired(), self.attempted())
    }
}
