// src/summarizer/gemini.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::summarizer::{LlmClient, SummarizerConfig};
use crate::utils::error::SummarizeError;

// --- Wire format for generateContent ---
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiApiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

/// Google Gemini text generation over the public REST API.
pub struct GeminiClient {
    config: SummarizerConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: SummarizerConfig) -> Result<Self, SummarizeError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { config, http })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Joins the text parts of the first candidate. `None` when the model produced no text.
fn response_text(response: GeminiResponse) -> Option<String> {
    let text: String = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(SummarizeError::MissingApiKey)?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        tracing::debug!("Calling Gemini model {} ({} prompt bytes)", self.config.model, prompt.len());
        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Error bodies are JSON with an error.message; fall back to the raw body
            let message = serde_json::from_str::<GeminiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(SummarizeError::Api { status, message });
        }

        let parsed: GeminiResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(SummarizeError::Api { status, message: error.message });
        }

        response_text(parsed).ok_or(SummarizeError::EmptyResponse)
    }
}
