//! Core types for prompt construction.

use std::borrow::Cow;

/// How much of a file is forwarded to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Send the whole file no matter how large it is.
    #[default]
    Unbounded,
    /// Keep at most this many characters and mark the cut.
    MaxChars(usize),
}

impl SizePolicy {
    /// `None` means unbounded.
    pub fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(max) => SizePolicy::MaxChars(max),
            None => SizePolicy::Unbounded,
        }
    }
}

/// File content after the size policy has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText<'a> {
    pub text: Cow<'a, str>,
    /// Character count of the original content.
    pub total_chars: usize,
    /// Character count actually kept.
    pub kept_chars: usize,
}

impl<'a> SourceText<'a> {
    pub fn prepare(content: &'a str, policy: SizePolicy) -> Self {
        let total_chars = content.chars().count();

        match policy {
            SizePolicy::MaxChars(max) if total_chars > max => {
                // Cut on a char boundary, never inside a UTF-8 sequence.
                let end = content
                    .char_indices()
                    .nth(max)
                    .map(|(idx, _)| idx)
                    .unwrap_or(content.len());
                let text = format!(
                    "{}\n[... truncated: showing {} of {} characters ...]",
                    &content[..end],
                    max,
                    total_chars
                );
                Self {
                    text: Cow::Owned(text),
                    total_chars,
                    kept_chars: max,
                }
            }
            _ => Self {
                text: Cow::Borrowed(content),
                total_chars,
                kept_chars: total_chars,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_keeps_everything() {
        let content = "x".repeat(1_000_000);
        let source = SourceText::prepare(&content, SizePolicy::Unbounded);
        assert_eq!(source.kept_chars, source.total_chars);
        assert_eq!(source.text.len(), 1_000_000);
        assert!(matches!(source.text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_limit_larger_than_content_is_noop() {
        let source = SourceText::prepare("int x;", SizePolicy::MaxChars(100));
        assert_eq!(source.kept_chars, source.total_chars);
        assert_eq!(source.text, "int x;");
    }

    #[test]
    fn test_truncation_marks_the_cut() {
        let source = SourceText::prepare("abcdefghij", SizePolicy::MaxChars(4));
        assert_eq!(source.kept_chars, 4);
        assert_eq!(source.total_chars, 10);
        assert_eq!(
            source.text,
            "abcd\n[... truncated: showing 4 of 10 characters ...]"
        );
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // Each 'é' is two bytes.
        let source = SourceText::prepare("ééééé", SizePolicy::MaxChars(3));
        assert!(source.text.starts_with("ééé\n"));
    }

    #[test]
    fn test_from_limit() {
        assert_eq!(SizePolicy::from_limit(None), SizePolicy::Unbounded);
        assert_eq!(SizePolicy::from_limit(Some(10)), SizePolicy::MaxChars(10));
    }
}
