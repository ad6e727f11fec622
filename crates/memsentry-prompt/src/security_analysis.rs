//! Security and memory-safety review prompt.

use crate::templates;
use crate::traits::Prompt;
use crate::types::{SizePolicy, SourceText};

/// Review prompt for the contents of one C file.
#[derive(Debug, Clone)]
pub struct SecurityAnalysisPrompt<'a> {
    pub source: SourceText<'a>,
}

impl<'a> SecurityAnalysisPrompt<'a> {
    pub fn new(content: &'a str, policy: SizePolicy) -> Self {
        Self {
            source: SourceText::prepare(content, policy),
        }
    }
}

impl Prompt for SecurityAnalysisPrompt<'_> {
    fn render(&self) -> String {
        format!(
            "{role}\n{dimensions}\n\n{target}\n\n{fields}",
            role = templates::render_role(),
            dimensions = templates::render_dimensions(),
            target = templates::render_target(&self.source.text),
            fields = templates::render_required_fields(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_TEMPLATE: &str = "You are a security expert and code analyst. Analyze the following code for:
1. Security vulnerabilities (SQL injection, XSS, buffer overflow, etc.)
2. Memory leaks and resource management issues
3. Unsafe practices and potential exploits
4. Input validation issues
5. Error handling gaps

Code to analyze:
char *p = malloc(10);

Provide a detailed report with:
- Issue Type (Vulnerability/Memory Leak/Code Smell)
- Severity (Critical/High/Medium/Low)
- Location (line number if identifiable)
- Description
- Recommended Fix";

    #[test]
    fn test_render_matches_fixed_template() {
        let prompt = SecurityAnalysisPrompt::new("char *p = malloc(10);", SizePolicy::Unbounded);
        assert_eq!(prompt.render(), EXPECTED_TEMPLATE);
    }

    #[test]
    fn test_content_is_interpolated_once_and_verbatim() {
        let content = "/* {braces} and %s */\nint main(void) { gets(buf); }\n";
        let rendered = SecurityAnalysisPrompt::new(content, SizePolicy::Unbounded).render();
        assert_eq!(rendered.matches(content).count(), 1);
    }

    #[test]
    fn test_truncated_content_carries_marker() {
        let content = "a".repeat(50);
        let rendered = SecurityAnalysisPrompt::new(&content, SizePolicy::MaxChars(10)).render();
        assert!(rendered.contains(&format!("{}\n[... truncated", "a".repeat(10))));
        assert!(!rendered.contains(&"a".repeat(11)));
    }
}
