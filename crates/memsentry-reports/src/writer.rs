//! Persists formatted reports.

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, warn};

use crate::filename::{report_filename, with_sequence};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output directory {} is not usable: {reason}", path.display())]
    OutputDirectory { path: PathBuf, reason: String },
}

/// Writes one report file per analyzed source file.
///
/// Names already produced by this writer are remembered so that two sources
/// sharing a base name within the same second get distinct files. A report
/// left on disk by an earlier run with the same name is overwritten.
#[derive(Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
    written: HashSet<String>,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: HashSet::new(),
        }
    }

    /// Pick the destination path for `source`, unique within this writer.
    pub fn next_path(&mut self, source: &Path, timestamp: &DateTime<Local>) -> PathBuf {
        let base = report_filename(source, timestamp);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.written.contains(&candidate) {
            candidate = with_sequence(&base, n);
            n += 1;
        }
        if candidate != base {
            warn!(
                "Report name {} already used in this run, writing {} instead",
                base, candidate
            );
        }
        self.written.insert(candidate.clone());
        self.output_dir.join(candidate)
    }

    /// Write `report` for `source` and return the path written.
    pub fn write(
        &mut self,
        source: &Path,
        report: &str,
        timestamp: &DateTime<Local>,
    ) -> Result<PathBuf, ReportError> {
        let path = self.next_path(source, timestamp);

        let mut file = File::create(&path).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        file.write_all(report.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", report.len(), path.display());
        Ok(path)
    }
}
