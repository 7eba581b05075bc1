// src/screener/models.rs
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::utils::AppError;

// Screener symbols look like TCS, M&M, BAJAJ-AUTO, 500325. The symbol ends up in a URL path
// and a file name, so anything outside this set is refused up front.
static TICKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9&._-]{1,32}$").expect("Failed to compile TICKER_RE")
});

/// Upper-cased company symbol, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker(String);

impl Ticker {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = AppError;

    /// Trims and upper-cases user input, then validates the character set.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let symbol = raw.trim().to_uppercase();
        // ".." would be a valid match but is never a real symbol and is unsafe in a path
        if !TICKER_RE.is_match(&symbol) || symbol.chars().all(|c| c == '.') {
            return Err(AppError::InvalidTicker(raw.trim().to_string()));
        }
        Ok(Self(symbol))
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which disclosure to look for. Everything that differs between the transcript and the
/// presentation run hangs off this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentKind {
    /// Conference-call transcript
    Concall,
    /// Investor presentation (the "PPT" link)
    Presentation,
}

impl DocumentKind {
    /// Text the anchor in the latest documents row must contain.
    pub fn link_label(self) -> &'static str {
        match self {
            Self::Concall => "Transcript",
            Self::Presentation => "PPT",
        }
    }

    /// Deterministic local file name. Reruns overwrite the same file.
    pub fn file_name(self, ticker: &Ticker) -> String {
        match self {
            Self::Concall => format!("{}_concall.pdf", ticker),
            Self::Presentation => format!("{}.pdf", ticker),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Concall => "conference call transcript",
            Self::Presentation => "investor presentation",
        }
    }

    pub fn insights_heading(self) -> &'static str {
        match self {
            Self::Concall => "Conference Call Insights",
            Self::Presentation => "Business Insights",
        }
    }
}

/// Absolute URL of a located PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink(Url);

impl DocumentLink {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
