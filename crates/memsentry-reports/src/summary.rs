use memsentry_core::{FileOutcome, FileStatus};

/// Outcomes of every file in one batch run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn analyzed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_analyzed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.analyzed_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_analyzed())
    }

    pub fn report_paths(&self) -> impl Iterator<Item = &std::path::PathBuf> {
        self.outcomes.iter().filter_map(FileOutcome::report_path)
    }

    /// Plain-text block printed at the end of a run.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "Processed {} file(s): {} analyzed, {} failed.\n",
            self.total(),
            self.analyzed_count(),
            self.failed_count()
        );
        for outcome in self.failures() {
            if let FileStatus::Failed { stage, reason } = &outcome.status {
                text.push_str(&format!(
                    "  - {} ({} failed): {}\n",
                    outcome.path.display(),
                    stage,
                    reason
                ));
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memsentry_core::Stage;
    use std::path::PathBuf;

    fn sample() -> BatchSummary {
        let mut summary = BatchSummary::new();
        summary.add(FileOutcome::analyzed(
            PathBuf::from("a.c"),
            PathBuf::from("a_security_report_20240101_000000.txt"),
        ));
        summary.add(FileOutcome::failed(
            PathBuf::from("bad.c"),
            Stage::Read,
            "stream did not contain valid UTF-8",
        ));
        summary.add(FileOutcome::analyzed(
            PathBuf::from("b.h"),
            PathBuf::from("b_security_report_20240101_000001.txt"),
        ));
        summary
    }

    #[test]
    fn test_counts() {
        let summary = sample();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.analyzed_count(), 2);
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.report_paths().count(), 2);
    }

    #[test]
    fn test_to_text_lists_failures() {
        let text = sample().to_text();
        assert!(text.starts_with("Processed 3 file(s): 2 analyzed, 1 failed."));
        assert!(text.contains("bad.c (read failed): stream did not contain valid UTF-8"));
        assert!(!text.contains("a.c ("));
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::new();
        assert_eq!(summary.to_text(), "Processed 0 file(s): 0 analyzed, 0 failed.\n");
    }
}
