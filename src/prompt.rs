//! Prompt templates for summarisation.

/// A prompt template with a single `{document}` placeholder.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The default summarisation prompt, parameterised by the length cap so
    /// the model aims for the right size before truncation ever applies.
    pub fn summary_default(max_length: usize) -> Self {
        Self::new(format!(
            "Summarize the following document in clear, plain prose. \
             Keep the summary under {max_length} characters.\n\n{{document}}"
        ))
    }

    /// Render the template by substituting the document text.
    pub fn render(&self, document: &str) -> String {
        self.text.replace("{document}", document)
    }

    /// The raw, unrendered template text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
