//! Report generation for the memsentry security reviewer.
//!
//! This crate provides:
//! - The fixed-width text report envelope
//! - Report filename generation
//! - A writer that persists reports into an output directory
//! - The end-of-run batch summary

pub mod filename;
pub mod format;
pub mod summary;
pub mod validation;
pub mod writer;

pub use filename::{report_filename, REPORT_SUFFIX};
pub use format::format_report;
pub use summary::BatchSummary;
pub use validation::validate_output_directory;
pub use writer::{ReportError, ReportWriter};
