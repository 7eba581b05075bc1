// src/storage/mod.rs
use std::path::{Path, PathBuf};

use reqwest::header;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::screener::models::{DocumentKind, DocumentLink, Ticker};
use crate::screener::DOWNLOAD_USER_AGENT;
use crate::utils::error::FetchError;

/// Exchange filings are served with a hotlink check on the referer.
const DOWNLOAD_REFERER: &str = "https://www.bseindia.com/";
/// Size of the write buffer the response body is streamed through.
const DOWNLOAD_CHUNK_SIZE: usize = 8192;

pub const DEFAULT_OUTPUT_DIR: &str = "pdfs";

/// Creates a reqwest client configured for document downloads.
pub fn build_download_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(DOWNLOAD_USER_AGENT) // Look like a desktop browser
        .build()
}

/// Writes downloaded PDFs into a single local folder.
pub struct PdfStore {
    base_dir: PathBuf,
}

impl PdfStore {
    /// Creates a new PdfStore rooted at the given directory. The directory is created lazily
    /// on the first download.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self { base_dir: base_dir.as_ref().to_path_buf() }
    }

    pub fn pdf_path(&self, ticker: &Ticker, kind: DocumentKind) -> PathBuf {
        self.base_dir.join(kind.file_name(ticker))
    }

    /// Streams the document at `link` to its deterministic path and returns that path.
    ///
    /// An existing file is overwritten. On a mid-stream failure the truncated file is left
    /// in place.
    pub async fn download(
        &self,
        client: &reqwest::Client,
        link: Option<&DocumentLink>,
        ticker: &Ticker,
        kind: DocumentKind,
    ) -> Result<PathBuf, FetchError> {
        let link = link.ok_or_else(|| {
            tracing::warn!("No PDF link available.");
            FetchError::MissingLink
        })?;

        tokio::fs::create_dir_all(&self.base_dir).await?;
        let pdf_path = self.pdf_path(ticker, kind);

        tracing::info!("Downloading {} to {}", link, pdf_path.display());
        let mut response = client
            .get(link.url().clone())
            .header(header::REFERER, DOWNLOAD_REFERER)
            .header(header::ACCEPT, "application/pdf,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, link);
            return Err(FetchError::Http(status));
        }

        let file = tokio::fs::File::create(&pdf_path).await?;
        let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
        let mut written: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        tracing::info!("PDF downloaded successfully: {} ({} bytes)", pdf_path.display(), written);
        Ok(pdf_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use url::Url;

    fn link_to(server: &mockito::ServerGuard, path: &str) -> DocumentLink {
        DocumentLink::new(Url::parse(&format!("{}{}", server.url(), path)).unwrap())
    }

    #[tokio::test]
    async fn writes_body_to_deterministic_path() {
        let body: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/t1.pdf")
            .match_header("referer", DOWNLOAD_REFERER)
            .match_header("user-agent", DOWNLOAD_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body(body.clone())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = PdfStore::new(dir.path().join("pdfs"));
        let client = build_download_client().unwrap();
        let ticker: Ticker = "tcs".parse().unwrap();
        let link = link_to(&server, "/t1.pdf");

        let path = assert_ok!(store.download(&client, Some(&link), &ticker, DocumentKind::Concall).await);
        assert_eq!(path, dir.path().join("pdfs").join("TCS_concall.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rerun_overwrites_previous_file() {
        let mut server = mockito::Server::new_async().await;
        let _first = server
            .mock("GET", "/old.pdf")
            .with_status(200)
            .with_body("a much longer first version of the document")
            .create_async()
            .await;
        let _second = server
            .mock("GET", "/new.pdf")
            .with_status(200)
            .with_body("second")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = PdfStore::new(dir.path());
        let client = build_download_client().unwrap();
        let ticker: Ticker = "INFY".parse().unwrap();

        let first = link_to(&server, "/old.pdf");
        let second = link_to(&server, "/new.pdf");
        let p1 = assert_ok!(store.download(&client, Some(&first), &ticker, DocumentKind::Presentation).await);
        let p2 = assert_ok!(store.download(&client, Some(&second), &ticker, DocumentKind::Presentation).await);

        assert_eq!(p1, p2);
        assert_eq!(std::fs::read_to_string(&p2).unwrap(), "second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn missing_link_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = PdfStore::new(dir.path().join("pdfs"));
        let client = build_download_client().unwrap();
        let ticker: Ticker = "TCS".parse().unwrap();

        let err = assert_err!(store.download(&client, None, &ticker, DocumentKind::Concall).await);
        assert!(matches!(err, FetchError::MissingLink));
        assert!(!dir.path().join("pdfs").exists());
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/gone.pdf").with_status(403).create_async().await;

        let dir = tempfile::tempdir().unwrap();
        let store = PdfStore::new(dir.path());
        let client = build_download_client().unwrap();
        let ticker: Ticker = "TCS".parse().unwrap();
        let link = link_to(&server, "/gone.pdf");

        let err = assert_err!(store.download(&client, Some(&link), &ticker, DocumentKind::Concall).await);
        assert!(matches!(err, FetchError::Http(status) if status == reqwest::StatusCode::FORBIDDEN));
        assert!(!store.pdf_path(&ticker, DocumentKind::Concall).exists());
    }
}
