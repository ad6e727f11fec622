//! Per-file review pipeline and the sequential batch loop around it.

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::{debug, error, info};

use memsentry_core::{FileOutcome, Stage};
use memsentry_prompt::PromptBuilder;
use memsentry_reports::{format_report, BatchSummary, ReportError, ReportWriter};

use crate::llms::{CompletionClient, ServiceError};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Completion request for {} failed: {source}", path.display())]
    Completion {
        path: PathBuf,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Write(#[from] ReportError),
}

impl AnalysisError {
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisError::Read { .. } => Stage::Read,
            AnalysisError::Completion { .. } => Stage::Completion,
            AnalysisError::Write(_) => Stage::Write,
        }
    }
}

/// Which per-file failures let the batch continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Every failing file is recorded and skipped.
    IsolateAll,
    /// Only read failures are skipped; completion and write failures end the batch.
    IsolateReadsOnly,
}

impl FailurePolicy {
    pub fn from_isolate_flag(isolate_failures: bool) -> Self {
        if isolate_failures {
            FailurePolicy::IsolateAll
        } else {
            FailurePolicy::IsolateReadsOnly
        }
    }

    fn tolerates(&self, stage: Stage) -> bool {
        match self {
            FailurePolicy::IsolateAll => true,
            FailurePolicy::IsolateReadsOnly => stage == Stage::Read,
        }
    }
}

/// Progress hooks for a batch run.
pub trait BatchObserver {
    fn file_started(&mut self, _index: usize, _total: usize, _path: &Path) {}
    fn file_finished(&mut self, _index: usize, _total: usize, _outcome: &FileOutcome) {}
}

/// Observer that ignores every event.
pub struct SilentObserver;

impl BatchObserver for SilentObserver {}

/// Runs read → prompt → completion → format → write for one file at a time.
pub struct SecurityAnalyzer<C: CompletionClient> {
    client: C,
    prompt_builder: PromptBuilder,
    writer: ReportWriter,
}

impl<C: CompletionClient> SecurityAnalyzer<C> {
    pub fn new(client: C, prompt_builder: PromptBuilder, writer: ReportWriter) -> Self {
        Self {
            client,
            prompt_builder,
            writer,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Review one file and return the path of the report written for it.
    pub async fn analyze_file(&mut self, file_path: &Path) -> Result<PathBuf, AnalysisError> {
        let content = std::fs::read_to_string(file_path).map_err(|source| AnalysisError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;

        let prompt = self.prompt_builder.build_security_analysis_prompt(&content);
        drop(content);
        debug!(
            "Built prompt of {} characters for {}",
            prompt.chars().count(),
            file_path.display()
        );

        let completion =
            self.client
                .complete(&prompt)
                .await
                .map_err(|source| AnalysisError::Completion {
                    path: file_path.to_path_buf(),
                    source,
                })?;

        let timestamp = Local::now();
        let report = format_report(&file_path.display().to_string(), &completion, &timestamp);
        let report_path = self.writer.write(file_path, &report, &timestamp)?;

        info!("Report for {} saved to {}", file_path.display(), report_path.display());
        Ok(report_path)
    }

    /// Review every file in order.
    ///
    /// Failures the policy tolerates are recorded in the summary; any other
    /// failure is returned immediately and the remaining files are not touched.
    /// Reports already written stay on disk either way.
    pub async fn run_batch(
        &mut self,
        files: &[PathBuf],
        policy: FailurePolicy,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchSummary, AnalysisError> {
        let total = files.len();
        let mut summary = BatchSummary::new();

        for (index, file_path) in files.iter().enumerate() {
            observer.file_started(index, total, file_path);

            let outcome = match self.analyze_file(file_path).await {
                Ok(report_path) => FileOutcome::analyzed(file_path.clone(), report_path),
                Err(e) if policy.tolerates(e.stage()) => {
                    debug!("Skipping after failure: {}", e);
                    FileOutcome::failed(file_path.clone(), e.stage(), failure_reason(&e))
                }
                Err(e) => {
                    error!("Aborting batch at {} of {}: {}", index + 1, total, e);
                    return Err(e);
                }
            };

            observer.file_finished(index, total, &outcome);
            summary.add(outcome);
        }

        Ok(summary)
    }
}

/// Underlying cause without the path prefix, for the summary listing.
fn failure_reason(err: &AnalysisError) -> String {
    match err {
        AnalysisError::Read { source, .. } => source.to_string(),
        AnalysisError::Completion { source, .. } => source.to_string(),
        AnalysisError::Write(source) => source.to_string(),
    }
}
