//! Remote summarisation via an OpenAI-compatible chat-completions endpoint.
//!
//! The network seam is the [`CompletionBackend`] trait; [`XaiClient`] is the
//! production implementation and tests substitute a stub.

use crate::config::XaiConfig;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tracing::{info, warn};

/// Sampling temperature for every summarisation request.
const TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("LLM request rejected with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("LLM response contained no usable content")]
    EmptyResponse,
}

/// Generated text plus provider-reported token usage.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A text-generation service: rendered prompt in, completion out.
pub trait CompletionBackend {
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<Completion, GenerationError>> + Send;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Client for the xAI chat-completions API.
///
/// No local timeout is set: a hung remote call stalls the batch, which is the
/// documented behavior of this pipeline.
pub struct XaiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl XaiClient {
    pub fn new(config: &XaiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pdfbrief/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

impl CompletionBackend for XaiClient {
    async fn complete(&self, prompt: &str) -> Result<Completion, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let usage = parsed.usage.unwrap_or_default();
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(Completion {
            text,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        })
    }
}

/// The outcome of analysing one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Generated summary, already truncated to the configured cap
    pub summary: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Renders the prompt, calls the backend, and enforces the length cap.
///
/// Stateless across requests; one instance serves the whole batch.
pub struct Summarizer<B> {
    backend: B,
    template: PromptTemplate,
    max_length: usize,
}

impl<B: CompletionBackend> Summarizer<B> {
    pub fn new(backend: B, template: PromptTemplate, max_length: usize) -> Self {
        Self {
            backend,
            template,
            max_length,
        }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Summarise the given document text.
    ///
    /// Generated text longer than the cap is hard-cut to exactly
    /// `max_length` characters, with no ellipsis or word-boundary
    /// adjustment. Counting characters rather than bytes keeps the cut
    /// valid UTF-8 for non-ASCII output.
    pub async fn summarize(&self, text: &str) -> Result<Analysis, GenerationError> {
        info!("analyzing text with model");
        let prompt = self.template.render(text);
        let completion = self.backend.complete(&prompt).await?;
        info!(
            input_tokens = completion.prompt_tokens,
            output_tokens = completion.completion_tokens,
            "text analysis completed"
        );

        let mut summary = completion.text;
        if summary.chars().count() > self.max_length {
            summary = summary.chars().take(self.max_length).collect();
            warn!(
                max_length = self.max_length,
                "summary exceeded the maximum length and was truncated"
            );
        }

        Ok(Analysis {
            summary,
            input_tokens: completion.prompt_tokens,
            output_tokens: completion.completion_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubBackend {
        text: String,
        prompt_tokens: u32,
        completion_tokens: u32,
    }

    impl CompletionBackend for StubBackend {
        async fn complete(&self, _prompt: &str) -> Result<Completion, GenerationError> {
            Ok(Completion {
                text: self.text.clone(),
                prompt_tokens: self.prompt_tokens,
                completion_tokens: self.completion_tokens,
            })
        }
    }

    fn summarizer(text: &str, max_length: usize) -> Summarizer<StubBackend> {
        Summarizer::new(
            StubBackend {
                text: text.to_string(),
                prompt_tokens: 5,
                completion_tokens: 8,
            },
            PromptTemplate::new("Summarize: {document}"),
            max_length,
        )
    }

    #[tokio::test]
    async fn long_summary_truncated_to_exact_length() {
        let s = summarizer("This is a generated summary text", 20);
        let analysis = s.summarize("Hello world").await.unwrap();
        assert_eq!(analysis.summary, "This is a generated ");
        assert_eq!(analysis.summary.chars().count(), 20);
    }

    #[tokio::test]
    async fn short_summary_unchanged() {
        let s = summarizer("brief", 20);
        let analysis = s.summarize("Hello world").await.unwrap();
        assert_eq!(analysis.summary, "brief");
    }

    #[tokio::test]
    async fn summary_at_limit_unchanged() {
        let s = summarizer("exactly-twenty-chars", 20);
        let analysis = s.summarize("Hello world").await.unwrap();
        assert_eq!(analysis.summary, "exactly-twenty-chars");
    }

    #[tokio::test]
    async fn truncation_counts_characters_not_bytes() {
        let s = summarizer("résumé épée à gogo", 6);
        let analysis = s.summarize("doc").await.unwrap();
        assert_eq!(analysis.summary, "résumé");
    }

    #[tokio::test]
    async fn token_counts_passed_through() {
        let s = summarizer("brief", 20);
        let analysis = s.summarize("Hello world").await.unwrap();
        assert_eq!(analysis.input_tokens, 5);
        assert_eq!(analysis.output_tokens, 8);
    }
}
