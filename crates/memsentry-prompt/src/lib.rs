//! Review prompt construction for memsentry.
//!
//! The prompt asks the model for a security and memory-safety review of a
//! single C file. The wording is fixed; only the file content varies.
//!
//! # Example
//!
//! ```rust
//! use memsentry_prompt::{Prompt, SecurityAnalysisPrompt, SizePolicy};
//!
//! let prompt = SecurityAnalysisPrompt::new("int main(void) { return 0; }", SizePolicy::Unbounded);
//! let rendered = prompt.render();
//! assert!(rendered.contains("int main(void)"));
//! ```

mod builder;
mod security_analysis;
mod templates;
mod traits;
mod types;

pub use builder::PromptBuilder;
pub use security_analysis::SecurityAnalysisPrompt;
pub use traits::Prompt;
pub use types::{SizePolicy, SourceText};
