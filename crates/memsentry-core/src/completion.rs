//! Completion returned by the language model.

/// Generated text returned for one prompt.
///
/// The content is kept exactly as the service produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
}

impl Completion {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
