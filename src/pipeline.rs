// src/pipeline.rs
use std::path::PathBuf;

use crate::extractors::PdfExtractor;
use crate::screener::models::{DocumentKind, Ticker};
use crate::screener::LinkFinder;
use crate::storage::PdfStore;
use crate::summarizer::{LlmClient, Summarizer};
use crate::utils::error::PipelineError;

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Insights {
    pub ticker: Ticker,
    pub kind: DocumentKind,
    pub pdf_path: PathBuf,
    pub summary: String,
}

/// Locate → download → extract → summarize, for either document kind.
pub struct Pipeline<F, C> {
    finder: F,
    store: PdfStore,
    http: reqwest::Client,
    extractor: PdfExtractor,
    summarizer: Summarizer<C>,
}

impl<F: LinkFinder, C: LlmClient> Pipeline<F, C> {
    pub fn new(finder: F, store: PdfStore, http: reqwest::Client, summarizer: Summarizer<C>) -> Self {
        Self {
            finder,
            store,
            http,
            extractor: PdfExtractor::new(),
            summarizer,
        }
    }

    /// Runs every stage in order. The first failing stage ends the run; nothing already
    /// written (e.g. a downloaded PDF) is cleaned up.
    pub async fn run(&self, ticker: &Ticker, kind: DocumentKind) -> Result<Insights, PipelineError> {
        // 1. Locate
        let link = match self.finder.find_link(ticker, kind).await {
            Ok(link) => link,
            Err(e) => {
                tracing::error!("Locating {} for {} failed: {}", kind.display_name(), ticker, e);
                return Err(PipelineError::NoDocument(kind));
            }
        };

        // 2. Download
        let pdf_path = self
            .store
            .download(&self.http, Some(&link), ticker, kind)
            .await
            .map_err(|e| {
                tracing::error!("Error downloading PDF: {}", e);
                PipelineError::DownloadFailed
            })?;

        // 3. Extract
        let text = self
            .extractor
            .extract_text_async(pdf_path.clone())
            .await
            .map_err(|e| {
                tracing::error!("Error extracting text from {}: {}", pdf_path.display(), e);
                PipelineError::Unreadable(e.to_string())
            })?;
        if text.is_empty() {
            return Err(PipelineError::NoText);
        }

        // 4. Summarize
        let summary = self.summarizer.summarize(kind, &text).await.map_err(|e| {
            tracing::error!("API error: {}", e);
            PipelineError::NoInsights
        })?;

        Ok(Insights {
            ticker: ticker.clone(),
            kind,
            pdf_path,
            summary,
        })
    }
}
