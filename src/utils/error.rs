// src/utils/error.rs
use std::time::Duration;
use thiserror::Error;

use crate::screener::models::DocumentKind;

// Define specific error types for each pipeline stage
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Browser automation failed: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Invalid browser configuration: {0}")]
    BrowserConfig(String),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 for an unknown ticker

    #[error("Timed out after {0:?} waiting for the documents list")]
    Timeout(Duration),

    #[error("No documents list on the company page")]
    ListMissing,

    #[error("No {} link in the latest documents row", .0.link_label())]
    LinkMissing(DocumentKind),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No PDF link available")]
    MissingLink,

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unreadable PDF document: {0}")]
    Unreadable(String),

    #[error("Extraction worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("No Gemini API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Model returned no text")]
    EmptyResponse,
}

/// User-facing outcome of a failed run. Each variant names the stage that stopped the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No recent {} available.", .0.display_name())]
    NoDocument(DocumentKind),

    #[error("Failed to download PDF.")]
    DownloadFailed,

    #[error("Could not read PDF: {0}")]
    Unreadable(String),

    #[error("No text extracted from PDF.")]
    NoText,

    #[error("Failed to generate insights.")]
    NoInsights,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid ticker symbol: {0:?}")]
    InvalidTicker(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors
}
