pub mod analyzer;
pub mod cli;
pub mod config;
pub mod llms;

// Re-export workspace crates for convenience
pub use memsentry_core::{Completion, FileOutcome, FileStatus, SourceKind, Stage};
pub use memsentry_prompt as prompt;
pub use memsentry_reports as reports;
pub use memsentry_utils as utils;
