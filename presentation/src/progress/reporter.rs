//! Progress reporting for bulk folder runs

use casequery_application::ports::progress::FolderProgressNotifier;
use casequery_domain::GroupOutcome;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;

/// Reports progress with one bar per group
pub struct ProgressReporter {
    multi: MultiProgress,
    group_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            group_bar: Mutex::new(None),
        }
    }

    fn group_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.group_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderProgressNotifier for ProgressReporter {
    fn on_group_start(&self, group: &str, total_files: usize) {
        let pb = self.multi.add(ProgressBar::new(total_files as u64));
        pb.set_style(Self::group_style());
        pb.set_prefix(group.to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.group_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_file_complete(&self, _group: &str, file: &Path, success: bool) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.with_bar(|pb| {
            let status = if success {
                format!("{} {}", "v".green(), name)
            } else {
                format!("{} {}", "x".red(), name)
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_group_complete(&self, _group: &str, outcome: &GroupOutcome) {
        let Ok(mut slot) = self.group_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            let label = match outcome {
                GroupOutcome::Retired => outcome.label().green(),
                _ => outcome.label().red(),
            };
            pb.finish_with_message(format!("{}", label));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl FolderProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_groups: usize) {
        println!("{} {} group(s)", "->".cyan(), total_groups);
    }

    fn on_group_start(&self, group: &str, total_files: usize) {
        println!("{} {} ({} files)", "->".cyan(), group.bold(), total_files);
    }

    fn on_file_complete(&self, _group: &str, file: &Path, success: bool) {
        if success {
            println!("  {} {}", "v".green(), file.display());
        } else {
            println!("  {} {} (failed)", "x".red(), file.display());
        }
    }

    fn on_group_complete(&self, group: &str, outcome: &GroupOutcome) {
        match outcome {
            GroupOutcome::Skipped => println!("  {} {} skipped", "-".yellow(), group),
            _ => println!("  {} {}", group, outcome.label()),
        }
    }
}
