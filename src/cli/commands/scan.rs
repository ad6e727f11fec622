use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, info};

use memsentry_core::{FileOutcome, FileStatus, Stage};
use memsentry_prompt::PromptBuilder;
use memsentry_reports::{validate_output_directory, BatchSummary, ReportWriter};
use memsentry_utils::{DiscoveryError, FileDiscovery, TargetKind};

use crate::analyzer::{BatchObserver, FailurePolicy, SecurityAnalyzer};
use crate::cli::args::ScanArgs;
use crate::cli::ui::{progress, stderr_is_terminal, terminal_width, truncate_path, StatusPrinter};
use crate::config::MemsentryConfig;
use crate::llms::{CompletionClient, OpenAiClient, OpenAiConfig};

pub const TARGET_PROMPT: &str = "Enter file path or directory path to analyze: ";

/// How a scan ended when it did not abort with an error.
#[derive(Debug)]
pub enum ScanOutcome {
    PathNotFound(PathBuf),
    UnsupportedFile(PathBuf),
    /// Exists but is neither a regular file nor a directory (FIFO, socket, device).
    UnsupportedTarget(PathBuf),
    NoFiles,
    Completed(BatchSummary),
}

pub async fn run_scan_command(args: ScanArgs) -> Result<()> {
    let env_vars: HashMap<String, String> = std::env::vars().collect();
    let config = MemsentryConfig::load_with_precedence(args.config.as_deref(), &args, &env_vars)?;

    // Everything the run depends on is checked before any source file is touched.
    let api_key = config.resolve_api_key(&env_vars)?;
    validate_output_directory(&config.paths.output_dir)?;

    let client = OpenAiClient::new(
        OpenAiConfig::new(api_key)
            .with_model(&config.analysis.model)
            .with_base_url(&config.api.base_url)
            .with_timeout(config.api.timeout_secs),
    )
    .context("Failed to build the completion client")?;
    debug!("Using model {} at {}", client.model(), config.api.base_url);

    let target = match args.target.clone() {
        Some(target) => target,
        None => prompt_target(BufReader::new(std::io::stdin()), std::io::stdout()).await?,
    };

    let prompt_builder = PromptBuilder::new().with_max_chars(config.analysis.max_file_chars);
    let writer = ReportWriter::new(config.paths.output_dir.clone());
    let mut analyzer = SecurityAnalyzer::new(client, prompt_builder, writer);
    let policy = FailurePolicy::from_isolate_flag(config.batch.isolate_failures);

    let printer = StatusPrinter::new();
    scan_target(&target, &mut analyzer, policy, &printer, stderr_is_terminal()).await?;
    Ok(())
}

/// Ask for the target path and read one trimmed line.
pub fn read_target<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<PathBuf> {
    write!(output, "{}", TARGET_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read the target path from standard input")?;
    Ok(PathBuf::from(line.trim()))
}

/// [`read_target`] on the blocking pool, so a pending Ctrl+C is still handled
/// while the user has not answered.
pub async fn prompt_target<R, W>(input: R, output: W) -> Result<PathBuf>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || read_target(input, output))
        .await
        .context("Target prompt was cancelled")?
}

/// Validate `target`, enumerate its eligible files and review them in order.
///
/// Path problems and empty directories are reported and end the scan normally.
pub async fn scan_target<C: CompletionClient>(
    target: &Path,
    analyzer: &mut SecurityAnalyzer<C>,
    policy: FailurePolicy,
    printer: &StatusPrinter,
    show_progress: bool,
) -> Result<ScanOutcome> {
    let discovery = FileDiscovery::new(target.to_path_buf());

    let kind = match discovery.target_kind() {
        Ok(kind) => kind,
        Err(DiscoveryError::UnsupportedFile(path)) => {
            printer.error(
                "Error",
                "File must be a C source (.c) or header (.h) file.",
            );
            return Ok(ScanOutcome::UnsupportedFile(path));
        }
        Err(DiscoveryError::NotFound(path)) => {
            printer.error("Error", &format!("Path '{}' not found.", path.display()));
            return Ok(ScanOutcome::PathNotFound(path));
        }
        Err(e @ DiscoveryError::UnsupportedTarget(_)) => {
            printer.error("Error", &e.to_string());
            return Ok(ScanOutcome::UnsupportedTarget(target.to_path_buf()));
        }
    };

    let files = match kind {
        TargetKind::File => {
            printer.status("Analyzing", &format!("file: {}", target.display()));
            if let Ok(content) = std::fs::read_to_string(target) {
                printer.dim(&format!("File size: {} characters", content.chars().count()));
            }
            vec![target.to_path_buf()]
        }
        TargetKind::Directory => {
            printer.status("Scanning", &format!("directory: {}", target.display()));
            let files = discovery.get_files()?;
            if files.is_empty() {
                printer.warning("Empty", "No C files (.c or .h) found in the directory.");
                return Ok(ScanOutcome::NoFiles);
            }
            printer.info("Found", &format!("{} C file(s) to analyze.", files.len()));
            files
        }
    };

    let bar = (show_progress && files.len() > 1).then(|| progress::create_bar(files.len() as u64));
    let mut observer = ScanProgress {
        printer,
        bar: bar.clone(),
    };

    let result = analyzer.run_batch(&files, policy, &mut observer).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let summary = result?;

    if kind == TargetKind::Directory {
        printer.section(&format!(
            "Analysis complete. Processed {} file(s).",
            summary.total()
        ));
        eprint!("{}", summary.to_text());
    }
    info!(
        "Scan of {} finished: {} analyzed, {} failed",
        target.display(),
        summary.analyzed_count(),
        summary.failed_count()
    );

    Ok(ScanOutcome::Completed(summary))
}

/// Prints per-file progress and drives the optional progress bar.
struct ScanProgress<'a> {
    printer: &'a StatusPrinter,
    bar: Option<ProgressBar>,
}

impl ScanProgress<'_> {
    fn print(&self, f: impl FnOnce(&StatusPrinter)) {
        match &self.bar {
            Some(bar) => bar.suspend(|| f(self.printer)),
            None => f(self.printer),
        }
    }
}

impl BatchObserver for ScanProgress<'_> {
    fn file_started(&mut self, _index: usize, _total: usize, path: &Path) {
        let display = path.display().to_string();
        if let Some(bar) = &self.bar {
            bar.set_message(truncate_path(&display, terminal_width() / 3));
        }
        self.print(|p| p.status("Analyzing", &display));
    }

    fn file_finished(&mut self, _index: usize, _total: usize, outcome: &FileOutcome) {
        match &outcome.status {
            FileStatus::Analyzed { report_path } => {
                self.print(|p| p.success("Saved", &format!("Report saved to: {}", report_path.display())));
            }
            FileStatus::Failed { stage: Stage::Read, reason } => {
                self.print(|p| {
                    p.error(
                        "Error",
                        &format!("Error reading file {}: {}", outcome.path.display(), reason),
                    )
                });
            }
            FileStatus::Failed { stage, reason } => {
                self.print(|p| {
                    p.error(
                        "Failed",
                        &format!("{} ({} failed): {}", outcome.path.display(), stage, reason),
                    )
                });
            }
        }
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}
