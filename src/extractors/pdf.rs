// src/extractors/pdf.rs
use std::path::{Path, PathBuf};

use lopdf::Document;

use crate::utils::error::ExtractError;

/// Page-by-page plain-text extraction from a PDF on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Extracts the text of every page, in page order, joined by newlines.
    ///
    /// Returns an empty string for a document with no pages or no text. A file that cannot
    /// be parsed as a PDF is an error; a single page whose content cannot be decoded only
    /// contributes an empty segment.
    pub fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        tracing::info!("Extracting text from {}", path.display());

        let document = Document::load(path).map_err(|e| {
            tracing::error!("Failed to open {} as PDF: {}", path.display(), e);
            ExtractError::Unreadable(e.to_string())
        })?;

        // get_pages is keyed by 1-based page number, so iteration is in page order
        let pages = document.get_pages();
        tracing::debug!("Document has {} pages", pages.len());

        let segments: Vec<String> = pages
            .keys()
            .map(|&page_number| match document.extract_text(&[page_number]) {
                Ok(text) => text.trim_end_matches(['\n', '\r']).to_string(),
                Err(e) => {
                    tracing::warn!("Could not extract text from page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        let text = segments.join("\n");
        if text.trim().is_empty() {
            tracing::warn!("No text found in {} ({} pages)", path.display(), segments.len());
            return Ok(String::new());
        }

        tracing::info!("Extracted {} characters from {} pages", text.len(), segments.len());
        Ok(text)
    }

    /// Runs [`Self::extract_text`] on the blocking pool; PDF decoding is CPU-bound.
    pub async fn extract_text_async(&self, path: PathBuf) -> Result<String, ExtractError> {
        let extractor = *self;
        tokio::task::spawn_blocking(move || extractor.extract_text(&path)).await?
    }
}
