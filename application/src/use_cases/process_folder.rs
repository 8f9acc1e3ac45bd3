//! Process Folder use case
//!
//! Every immediate subdirectory of the input root is one group. A group is
//! retired (source deleted) only when every eligible file in it succeeded;
//! one bad document aborts its own group and nothing else.

use crate::ports::file_store::FileStoreError;
use crate::ports::progress::{FolderProgressNotifier, NoProgress};
use crate::use_cases::process_document::{DocumentJob, ProcessDocumentUseCase, Relocation};
use casequery_domain::{
    DocumentKind, ELIGIBLE_EXTENSIONS, FolderRunReport, GroupOutcome, GroupReport, ProviderFamily,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a folder run before any group is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessFolderError {
    #[error("Input root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("No network connection; folder run not started")]
    Offline,

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FileStoreError),
}

/// Input for a bulk folder run
#[derive(Debug, Clone)]
pub struct FolderJob {
    pub root: PathBuf,
    pub questions: Vec<String>,
    pub family: ProviderFamily,
    /// Answers land under `<output_root>/<group>/`
    pub output_root: PathBuf,
    /// Source copies land under `<completed_root>/<group>/`
    pub completed_root: PathBuf,
}

impl FolderJob {
    pub fn new(
        root: impl Into<PathBuf>,
        questions: Vec<String>,
        output_root: impl Into<PathBuf>,
        completed_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            questions,
            family: ProviderFamily::default(),
            output_root: output_root.into(),
            completed_root: completed_root.into(),
        }
    }

    pub fn with_family(mut self, family: ProviderFamily) -> Self {
        self.family = family;
        self
    }
}

/// Use case for bulk folder processing
pub struct ProcessFolderUseCase {
    documents: Arc<ProcessDocumentUseCase>,
}

impl ProcessFolderUseCase {
    pub fn new(documents: Arc<ProcessDocumentUseCase>) -> Self {
        Self { documents }
    }

    pub async fn execute(&self, job: &FolderJob) -> Result<FolderRunReport, ProcessFolderError> {
        self.execute_with_progress(job, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        job: &FolderJob,
        progress: &dyn FolderProgressNotifier,
    ) -> Result<FolderRunReport, ProcessFolderError> {
        let files = self.documents.files();

        if !files.is_dir(&job.root) {
            return Err(ProcessFolderError::RootNotFound(job.root.clone()));
        }

        let groups = files.list_subdirectories(&job.root)?;
        if groups.is_empty() {
            warn!("No subfolders found in {}", job.root.display());
            return Ok(FolderRunReport::without_groups(&job.root));
        }

        if job.family.is_remote() && !self.documents.dispatcher().is_online().await {
            return Err(ProcessFolderError::Offline);
        }

        info!(
            "Processing {} group(s) under {}",
            groups.len(),
            job.root.display()
        );
        progress.on_run_start(groups.len());

        let mut report = FolderRunReport::new(&job.root);
        for group_dir in &groups {
            let group = self.process_group(job, group_dir, progress).await;
            progress.on_group_complete(&group.name, &group.outcome);
            report.push(group);
        }

        info!("{}", report.summary());
        Ok(report)
    }

    async fn process_group(
        &self,
        job: &FolderJob,
        group_dir: &Path,
        progress: &dyn FolderProgressNotifier,
    ) -> GroupReport {
        let files = self.documents.files();
        let name = group_name(group_dir);

        let eligible: Vec<PathBuf> = match files.walk_files(group_dir) {
            Ok(all) => all
                .into_iter()
                .filter(|p| DocumentKind::is_eligible(p))
                .collect(),
            Err(e) => {
                warn!("Could not list group {}: {}", name, e);
                return GroupReport {
                    name,
                    eligible_files: 0,
                    processed_files: 0,
                    outcome: GroupOutcome::Failed {
                        file: group_dir.to_path_buf(),
                        reason: e.to_string(),
                    },
                };
            }
        };

        if eligible.is_empty() {
            warn!(
                "No .{} files in {}, skipping",
                ELIGIBLE_EXTENSIONS.join("/."),
                name
            );
            return GroupReport {
                name,
                eligible_files: 0,
                processed_files: 0,
                outcome: GroupOutcome::Skipped,
            };
        }

        progress.on_group_start(&name, eligible.len());
        let mut report = GroupReport {
            name: name.clone(),
            eligible_files: eligible.len(),
            processed_files: 0,
            outcome: GroupOutcome::Retired,
        };

        let output_group = job.output_root.join(&name);
        let completed_group = job.completed_root.join(&name);
        for dir in [&output_group, &completed_group] {
            if let Err(e) = files.create_dir_all(dir) {
                warn!("Group {} failed: {}", name, e);
                report.outcome = GroupOutcome::Failed {
                    file: dir.clone(),
                    reason: e.to_string(),
                };
                return report;
            }
        }

        for file in &eligible {
            let relative_dir = file
                .parent()
                .and_then(|p| p.strip_prefix(group_dir).ok())
                .unwrap_or_else(|| Path::new(""));

            let doc_job = DocumentJob::new(
                file.clone(),
                job.questions.clone(),
                output_group.join(relative_dir),
                completed_group.join(relative_dir),
            )
            .with_family(job.family)
            .with_relocation(Relocation::Copy);

            match self.documents.execute(&doc_job).await {
                Ok(processed) => {
                    debug!("{} -> {}", file.display(), processed.output_path.display());
                    report.processed_files += 1;
                    progress.on_file_complete(&name, file, true);
                }
                Err(e) => {
                    warn!(
                        "Group {} failed on {}, remaining files not attempted: {}",
                        name,
                        file.display(),
                        e
                    );
                    progress.on_file_complete(&name, file, false);
                    report.outcome = GroupOutcome::Failed {
                        file: file.clone(),
                        reason: e.to_string(),
                    };
                    return report;
                }
            }
        }

        match files.remove_dir_all(group_dir) {
            Ok(()) => info!("Group {} retired", name),
            Err(e) => {
                warn!("Group {} succeeded but its source could not be removed: {}", name, e);
                report.outcome = GroupOutcome::RetireFailed {
                    reason: e.to_string(),
                };
            }
        }
        report
    }
}

fn group_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchParams;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::dispatch_prompt::ModelDispatcher;
    use crate::use_cases::test_support::{
        EchoExtractor, MemoryFileStore, MemorySettings, ScriptedLocal, ScriptedProbe,
        ScriptedRemote,
    };
    use std::sync::Mutex;

    /// Remote that fails whenever the prompt contains a marker
    struct PoisonedRemote {
        marker: &'static str,
        calls: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl crate::ports::llm_gateway::RemoteModelGateway for PoisonedRemote {
        async fn generate(
            &self,
            _model: &casequery_domain::Model,
            prompt: &str,
            _temperature: f32,
        ) -> Result<String, GatewayError> {
            *self.calls.lock().unwrap() += 1;
            if prompt.contains(self.marker) {
                Err(GatewayError::RequestFailed("HTTP 400: bad document".into()))
            } else {
                Ok("answer".to_string())
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl FolderProgressNotifier for RecordingProgress {
        fn on_run_start(&self, total_groups: usize) {
            self.events.lock().unwrap().push(format!("run:{total_groups}"));
        }

        fn on_group_start(&self, group: &str, total_files: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{group}:{total_files}"));
        }

        fn on_file_complete(&self, group: &str, file: &Path, success: bool) {
            let name = file.file_name().unwrap().to_string_lossy();
            self.events
                .lock()
                .unwrap()
                .push(format!("file:{group}:{name}:{success}"));
        }

        fn on_group_complete(&self, group: &str, outcome: &GroupOutcome) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{group}:{}", outcome.label()));
        }
    }

    fn use_case(
        online: bool,
        remote: Arc<dyn crate::ports::llm_gateway::RemoteModelGateway>,
        files: &Arc<MemoryFileStore>,
    ) -> ProcessFolderUseCase {
        let dispatcher = ModelDispatcher::new(
            Arc::new(ScriptedProbe::new(online)),
            remote,
            Arc::new(ScriptedLocal::answering("local")),
        );
        let documents = ProcessDocumentUseCase::new(
            Arc::new(dispatcher),
            Arc::new(EchoExtractor),
            files.clone(),
            Arc::new(MemorySettings::with_sequence(&["m1"])),
            DispatchParams::default(),
        );
        ProcessFolderUseCase::new(Arc::new(documents))
    }

    fn job() -> FolderJob {
        FolderJob::new(
            "input",
            vec!["Who?".to_string(), "When?".to_string()],
            "output",
            "completed",
        )
    }

    #[tokio::test]
    async fn test_single_group_end_to_end() {
        let files = Arc::new(
            MemoryFileStore::new()
                .with_file("input/case_17/a_1.html", "<p>first</p>")
                .with_file("input/case_17/b_2.txt", "second"),
        );
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));

        let report = use_case(true, remote.clone(), &files)
            .execute(&job())
            .await
            .unwrap();

        assert_eq!(report.summary(), "1/1 groups processed.");
        assert_eq!(files.text("output/case_17/a.txt").unwrap(), "answer");
        assert_eq!(files.text("output/case_17/b.txt").unwrap(), "answer");
        assert!(files.exists("completed/case_17/a_1.html"));
        assert!(files.exists("completed/case_17/b_2.txt"));
        assert!(!files.exists("input/case_17"));
        assert!(files.files_under("input").is_empty());
        assert_eq!(remote.calls(), vec!["m1", "m1"]);
    }

    #[tokio::test]
    async fn test_failing_file_keeps_group_source() {
        let files = Arc::new(
            MemoryFileStore::new()
                .with_file("input/g/1_a.txt", "fine")
                .with_file("input/g/2_b.txt", "POISON")
                .with_file("input/g/3_c.txt", "fine"),
        );
        let remote = Arc::new(PoisonedRemote {
            marker: "POISON",
            calls: Mutex::new(0),
        });

        let report = use_case(true, remote.clone(), &files)
            .execute(&job())
            .await
            .unwrap();

        let group = &report.groups[0];
        assert_eq!(group.processed_files, 1);
        assert!(matches!(
            &group.outcome,
            GroupOutcome::Failed { file, .. } if file == Path::new("input/g/2_b.txt")
        ));
        assert_eq!(*remote.calls.lock().unwrap(), 2);
        assert!(files.exists("input/g/1_a.txt"));
        assert!(files.exists("input/g/2_b.txt"));
        assert!(files.exists("input/g/3_c.txt"));
        // Already-copied destination files stay behind
        assert!(files.exists("output/g/1.txt"));
        assert!(!files.exists("output/g/3.txt"));
        assert_eq!(report.summary(), "0/1 groups processed.");
    }

    #[tokio::test]
    async fn test_failed_group_does_not_abort_other_groups() {
        let files = Arc::new(
            MemoryFileStore::new()
                .with_file("input/bad/x_1.txt", "POISON")
                .with_file("input/good/y_1.txt", "fine"),
        );
        let remote = Arc::new(PoisonedRemote {
            marker: "POISON",
            calls: Mutex::new(0),
        });

        let report = use_case(true, remote, &files).execute(&job()).await.unwrap();

        assert_eq!(report.attempted(), 2);
        assert_eq!(report.retired(), 1);
        assert!(files.exists("input/bad/x_1.txt"));
        assert!(!files.exists("input/good"));
        assert!(files.exists("output/good/y.txt"));
    }

    #[tokio::test]
    async fn test_group_without_eligible_files_is_skipped() {
        let files = Arc::new(
            MemoryFileStore::new()
                .with_file("input/scans/page_1.pdf", "%PDF")
                .with_file("input/docs/d_1.htm", "<p>x</p>"),
        );
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));

        let report = use_case(true, remote, &files).execute(&job()).await.unwrap();

        assert_eq!(report.summary(), "1/1 groups processed.");
        assert_eq!(report.skipped().count(), 1);
        assert!(files.exists("input/scans/page_1.pdf"));
        assert!(!files.exists("output/scans"));
    }

    #[tokio::test]
    async fn test_empty_group_is_skipped() {
        let files = Arc::new(
            MemoryFileStore::new()
                .with_dir("input/empty")
                .with_file("input/docs/d_1.txt", "x"),
        );
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));

        let report = use_case(true, remote, &files).execute(&job()).await.unwrap();

        assert_eq!(report.summary(), "1/1 groups processed.");
        assert_eq!(report.skipped().count(), 1);
        assert!(files.exists("input/empty"));
        assert!(!files.exists("completed/empty"));
    }

    #[tokio::test]
    async fn test_nested_files_keep_relative_layout() {
        let files = Arc::new(
            MemoryFileStore::new().with_file("input/case/sub/YB42_1.html", "<p>x</p>"),
        );
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));

        use_case(true, remote, &files).execute(&job()).await.unwrap();

        assert!(files.exists("output/case/sub/42.txt"));
        assert!(files.exists("completed/case/sub/YB42_1.html"));
    }

    #[tokio::test]
    async fn test_root_without_subfolders_is_a_warning() {
        let files = Arc::new(MemoryFileStore::new().with_file("input/loose_1.txt", "x"));
        let remote = Arc::new(ScriptedRemote::new());

        let report = use_case(true, remote, &files).execute(&job()).await.unwrap();

        assert!(report.no_groups);
        assert_eq!(report.attempted(), 0);
    }

    #[tokio::test]
    async fn test_missing_root_is_an_error() {
        let files = Arc::new(MemoryFileStore::new());
        let remote = Arc::new(ScriptedRemote::new());

        let err = use_case(true, remote, &files).execute(&job()).await.unwrap_err();

        assert_eq!(err, ProcessFolderError::RootNotFound(PathBuf::from("input")));
    }

    #[tokio::test]
    async fn test_offline_run_touches_nothing() {
        let files = Arc::new(MemoryFileStore::new().with_file("input/g/a_1.txt", "x"));
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));

        let err = use_case(false, remote.clone(), &files)
            .execute(&job())
            .await
            .unwrap_err();

        assert_eq!(err, ProcessFolderError::Offline);
        assert!(remote.calls().is_empty());
        assert!(files.exists("input/g/a_1.txt"));
        assert!(files.files_under("output").is_empty());
    }

    #[tokio::test]
    async fn test_undeletable_source_is_reported() {
        let files = Arc::new(MemoryFileStore::new().with_file("input/g/a_1.txt", "x"));
        files.deny("input/g");
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));

        let report = use_case(true, remote, &files).execute(&job()).await.unwrap();

        assert!(matches!(report.groups[0].outcome, GroupOutcome::RetireFailed { .. }));
        assert_eq!(report.summary(), "0/1 groups processed.");
        assert!(files.exists("output/g/a.txt"));
    }

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let files = Arc::new(
            MemoryFileStore::new()
                .with_file("input/g/a_1.txt", "x")
                .with_file("input/g/b_1.txt", "y"),
        );
        let remote = Arc::new(ScriptedRemote::new().answer("m1", "answer"));
        let progress = RecordingProgress::default();

        use_case(true, remote, &files)
            .execute_with_progress(&job(), &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                "run:1",
                "start:g:2",
                "file:g:a_1.txt:true",
                "file:g:b_1.txt:true",
                "done:g:retired",
            ]
        );
    }
}
