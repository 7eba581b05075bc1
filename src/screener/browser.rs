// src/screener/browser.rs
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use url::Url;

use crate::screener::locator::{select_document_link, LinkFinder, LocatorConfig, DOCUMENT_ROWS_CSS};
use crate::screener::models::{DocumentKind, DocumentLink, Ticker};
use crate::utils::error::LocateError;

/// Locator backed by a headless Chromium session. One browser process per lookup.
pub struct BrowserLinkFinder {
    config: LocatorConfig,
}

impl BrowserLinkFinder {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    fn browser_config() -> Result<BrowserConfig, LocateError> {
        // Headless is the builder default
        BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox") // Often needed for headless in containers
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(LocateError::BrowserConfig)
    }

    /// Loads the page, waits for the documents list and runs the selection rule.
    async fn locate(&self, browser: &Browser, url: &Url, ticker: &Ticker, kind: DocumentKind) -> Result<DocumentLink, LocateError> {
        let page = browser.new_page(url.as_str()).await?;
        tracing::info!("Loaded company page for {}", ticker);

        let result = self.locate_on_page(&page, url, kind).await;
        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page: {}", e);
        }
        result
    }

    async fn locate_on_page(&self, page: &Page, url: &Url, kind: DocumentKind) -> Result<DocumentLink, LocateError> {
        self.wait_for_rows(page).await?;

        // The rendered DOM carries hrefs exactly as the browser sees them
        let html = page.content().await?;
        select_document_link(&html, url, kind)
    }

    /// Polls for the first documents row until the configured timeout expires.
    async fn wait_for_rows(&self, page: &Page) -> Result<(), LocateError> {
        let timeout = self.config.wait_timeout;
        let poll = self.config.poll_interval;

        let wait = async {
            loop {
                match page.find_element(DOCUMENT_ROWS_CSS).await {
                    Ok(_) => return,
                    Err(e) => tracing::trace!("Documents list not rendered yet: {}", e),
                }
                tokio::time::sleep(poll).await;
            }
        };

        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| LocateError::Timeout(timeout))
    }
}

#[async_trait]
impl LinkFinder for BrowserLinkFinder {
    async fn find_link(&self, ticker: &Ticker, kind: DocumentKind) -> Result<DocumentLink, LocateError> {
        let url = self.config.company_url(ticker)?;

        tracing::info!("Launching headless browser for {}", url);
        let (mut browser, mut handler) = Browser::launch(Self::browser_config()?).await?;

        // Spawn handler task; it ends when the browser connection closes
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let result = self.locate(&browser, &url, ticker, kind).await;

        // Tear the browser down on every path, success or failure
        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!("Failed to reap browser process: {}", e);
        }
        handler_task.abort();

        match &result {
            Ok(link) => tracing::info!("Found latest {} PDF: {}", kind.display_name(), link),
            Err(e) => tracing::warn!("No {} located for {}: {}", kind.display_name(), ticker, e),
        }
        result
    }
}
