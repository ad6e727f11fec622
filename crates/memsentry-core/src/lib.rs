//! Core types for the memsentry security reviewer.
//!
//! This crate provides the types shared by every memsentry component:
//! - Eligible source kinds (SourceKind)
//! - The completion returned by the language model (Completion)
//! - Per-file pipeline outcomes (FileOutcome, FileStatus, Stage)

mod completion;
mod outcome;
mod source_kind;

pub use completion::Completion;
pub use outcome::{FileOutcome, FileStatus, Stage};
pub use source_kind::SourceKind;
