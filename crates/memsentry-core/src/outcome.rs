//! Per-file pipeline outcomes.

use std::path::PathBuf;

/// Pipeline step at which a file can fail.
///
/// Prompt building and report formatting cannot fail and have no stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Read,
    Completion,
    Write,
}

impl Stage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Completion => "completion",
            Stage::Write => "write",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The report was written.
    Analyzed { report_path: PathBuf },
    /// The file was abandoned at `stage`.
    Failed { stage: Stage, reason: String },
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn analyzed(path: PathBuf, report_path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Analyzed { report_path },
        }
    }

    pub fn failed(path: PathBuf, stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Failed {
                stage,
                reason: reason.into(),
            },
        }
    }

    #[must_use]
    pub fn is_analyzed(&self) -> bool {
        matches!(self.status, FileStatus::Analyzed { .. })
    }

    /// Path of the written report, if any.
    #[must_use]
    pub fn report_path(&self) -> Option<&PathBuf> {
        match &self.status {
            FileStatus::Analyzed { report_path } => Some(report_path),
            FileStatus::Failed { .. } => None,
        }
    }

    /// Stage at which the file failed, if it did.
    #[must_use]
    pub fn failed_stage(&self) -> Option<Stage> {
        match &self.status {
            FileStatus::Failed { stage, .. } => Some(*stage),
            FileStatus::Analyzed { .. } => None,
        }
    }
}
