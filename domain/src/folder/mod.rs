//! Bulk folder run: groups and the run report

mod report;

pub use report::{FolderRunReport, GroupOutcome, GroupReport};
