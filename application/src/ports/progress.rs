//! Progress notification port
//!
//! Defines the interface for reporting progress during a bulk folder run.

use casequery_domain::GroupOutcome;
use std::path::Path;

/// Callback for progress updates during a folder run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait FolderProgressNotifier: Send + Sync {
    /// Called once the groups have been enumerated
    fn on_run_start(&self, _total_groups: usize) {}

    /// Called when a group with eligible files starts
    fn on_group_start(&self, group: &str, total_files: usize);

    /// Called after each file of the group
    fn on_file_complete(&self, group: &str, file: &Path, success: bool);

    /// Called when the group has finished (including skipped groups)
    fn on_group_complete(&self, group: &str, outcome: &GroupOutcome);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl FolderProgressNotifier for NoProgress {
    fn on_group_start(&self, _group: &str, _total_files: usize) {}
    fn on_file_complete(&self, _group: &str, _file: &Path, _success: bool) {}
    fn on_group_complete(&self, _group: &str, _outcome: &GroupOutcome) {}
}
