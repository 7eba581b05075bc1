// src/summarizer/mod.rs
pub mod gemini;
pub mod prompts;

use async_trait::async_trait;

use crate::screener::models::DocumentKind;
use crate::utils::error::SummarizeError;

pub use gemini::GeminiClient;

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Everything the LLM client needs, handed over at construction.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// A hosted text-completion model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one prompt and returns the model's raw text.
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// Turns extracted document text into an analyst summary.
pub struct Summarizer<C> {
    client: C,
}

impl<C: LlmClient> Summarizer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The whole text goes into a single prompt; no truncation or chunking.
    pub async fn summarize(&self, kind: DocumentKind, text: &str) -> Result<String, SummarizeError> {
        tracing::info!("Analyzing {} with the language model...", kind.display_name());
        let prompt = prompts::build_prompt(kind, text);

        let response = self.client.generate(&prompt).await?;
        let summary = response.trim();
        if summary.is_empty() {
            tracing::warn!("No insights generated.");
            return Err(SummarizeError::EmptyResponse);
        }
        Ok(summary.to_string())
    }
}

#[cfg(test)]
impl<C> Summarizer<C> {
    pub(crate) fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// Canned LLM that records every prompt it receives.
    struct CannedClient {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmClient for CannedClient {
        async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|_| SummarizeError::MissingApiKey)
        }
    }

    fn canned(reply: Result<&str, ()>) -> CannedClient {
        CannedClient {
            reply: reply.map(str::to_string),
            prompts: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn returns_trimmed_response_with_text_in_prompt() {
        let transcript = "Q2 revenue rose 12%.\nManagement expects margin expansion.";
        let summarizer = Summarizer::new(canned(Ok("\n\n  * Revenue +12%\n* Margins up  \n")));

        let summary = assert_ok!(summarizer.summarize(DocumentKind::Concall, transcript).await);
        assert_eq!(summary, "* Revenue +12%\n* Margins up");

        let prompts = summarizer.client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(transcript));
    }

    #[tokio::test]
    async fn client_error_is_propagated() {
        let summarizer = Summarizer::new(canned(Err(())));
        let err = assert_err!(summarizer.summarize(DocumentKind::Presentation, "text").await);
        assert!(matches!(err, SummarizeError::MissingApiKey));
    }

    #[tokio::test]
    async fn whitespace_only_response_is_empty() {
        let summarizer = Summarizer::new(canned(Ok("  \n\t ")));
        let err = assert_err!(summarizer.summarize(DocumentKind::Concall, "text").await);
        assert!(matches!(err, SummarizeError::EmptyResponse));
    }
}
