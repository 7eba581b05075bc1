// src/screener/mod.rs
pub mod browser;
pub mod locator;
pub mod models;

pub use browser::BrowserLinkFinder;
pub use locator::{HttpLinkFinder, LinkFinder, LocatorConfig};

/// Disclosures site the company pages live on.
pub const DEFAULT_SITE: &str = "https://www.screener.in";

/// Desktop Chrome user agent; the exchange's document host rejects obvious bots.
pub const DOWNLOAD_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
