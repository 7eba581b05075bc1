// src/screener/locator.rs
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::header;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::screener::models::{DocumentKind, DocumentLink, Ticker};
use crate::screener::DOWNLOAD_USER_AGENT;
use crate::utils::error::LocateError;

/// How long to wait for the documents list to render.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// CSS for the rows of the "Concalls" documents list. The newest disclosure is the first row.
pub const DOCUMENT_ROWS_CSS: &str = "div.documents.concalls ul.list-links > li";

// --- CSS Selectors (Lazy Static) ---
static DOCUMENT_ROWS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(DOCUMENT_ROWS_CSS).expect("Failed to compile DOCUMENT_ROWS_SELECTOR")
});

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to compile ANCHOR_SELECTOR")
});

/// Where and how patiently to look for documents.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub site: Url,
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
}

impl LocatorConfig {
    pub fn new(site: &str, wait_timeout: Duration) -> Result<Self, LocateError> {
        Ok(Self {
            site: Url::parse(site)?,
            wait_timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Constructs the consolidated company page URL for a ticker.
    pub fn company_url(&self, ticker: &Ticker) -> Result<Url, LocateError> {
        let path = format!("company/{}/consolidated/", ticker);
        Ok(self.site.join(&path)?)
    }
}

/// Finds the newest document of a given kind for a ticker.
#[async_trait]
pub trait LinkFinder: Send + Sync {
    async fn find_link(&self, ticker: &Ticker, kind: DocumentKind) -> Result<DocumentLink, LocateError>;
}

/// Picks the document link out of a rendered company page.
///
/// Only the first row of the documents list is considered: the transcript (or PPT) of the
/// latest call. An older row with the wanted link is not a "recent" document.
pub fn select_document_link(html: &str, page_url: &Url, kind: DocumentKind) -> Result<DocumentLink, LocateError> {
    let document = Html::parse_document(html);

    let first_row = document
        .select(&DOCUMENT_ROWS_SELECTOR)
        .next()
        .ok_or(LocateError::ListMissing)?;
    tracing::debug!("Located the first row of the documents list");

    let href = find_labelled_href(first_row, kind.link_label())
        .ok_or(LocateError::LinkMissing(kind))?;

    // Browsers report resolved hrefs; a raw parse has to resolve relative ones itself
    let url = page_url.join(href)?;
    Ok(DocumentLink::new(url))
}

fn find_labelled_href<'a>(row: ElementRef<'a>, label: &str) -> Option<&'a str> {
    row.select(&ANCHOR_SELECTOR)
        .find(|a| a.text().collect::<String>().contains(label))
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
}

/// Locator that fetches the company page with a plain GET and parses the served HTML.
/// Works whenever the documents list is server-rendered and needs no Chromium install.
pub struct HttpLinkFinder {
    config: LocatorConfig,
    client: reqwest::Client,
}

impl HttpLinkFinder {
    pub fn new(config: LocatorConfig) -> Result<Self, LocateError> {
        let client = reqwest::Client::builder()
            .user_agent(DOWNLOAD_USER_AGENT)
            .build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LinkFinder for HttpLinkFinder {
    async fn find_link(&self, ticker: &Ticker, kind: DocumentKind) -> Result<DocumentLink, LocateError> {
        let url = self.config.company_url(ticker)?;
        tracing::info!("Fetching company page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(LocateError::Http(status));
        }

        let html = response.text().await?;
        tracing::info!("Loaded company page for {} ({} bytes)", ticker, html.len());

        let link = select_document_link(&html, &url, kind)?;
        tracing::info!("Found latest {} PDF: {}", kind.display_name(), link);
        Ok(link)
    }
}
