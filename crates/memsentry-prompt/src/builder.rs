//! PromptBuilder wrapper.
//!
//! Holds the size policy for a run so callers only pass file content.

use crate::Prompt;
use crate::SecurityAnalysisPrompt;
use crate::SizePolicy;

/// Builder for constructing review prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    size_policy: SizePolicy,
}

impl PromptBuilder {
    /// Create a new prompt builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many characters of each file are forwarded.
    pub fn with_max_chars(mut self, max_chars: Option<usize>) -> Self {
        self.size_policy = SizePolicy::from_limit(max_chars);
        self
    }

    /// Build the review prompt for one file's content.
    pub fn build_security_analysis_prompt(&self, content: &str) -> String {
        SecurityAnalysisPrompt::new(content, self.size_policy).render()
    }
}
