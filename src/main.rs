// src/main.rs
mod utils;
mod screener;
mod storage;
mod extractors;
mod summarizer;
mod pipeline;
#[cfg(test)]
mod test_support;

use std::io::{BufRead, Write};
use std::time::Duration;

use clap::Parser;
use pipeline::{Insights, Pipeline};
use screener::models::{DocumentKind, Ticker};
use screener::{BrowserLinkFinder, HttpLinkFinder, LinkFinder, LocatorConfig};
use storage::PdfStore;
use summarizer::{GeminiClient, LlmClient, Summarizer, SummarizerConfig};
use utils::AppError;

/// Fetch the latest concall transcript or investor presentation for a company and summarize it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ticker symbol of the company (prompted for when omitted)
    #[arg(short, long)]
    ticker: Option<String>,

    /// Which document to fetch
    #[arg(short, long, value_enum, default_value_t = DocumentKind::Concall)]
    kind: DocumentKind,

    /// Output directory for downloaded PDFs
    #[arg(short, long, default_value = storage::DEFAULT_OUTPUT_DIR)]
    output_dir: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, default_value = summarizer::DEFAULT_MODEL)]
    model: String,

    /// Base URL of the disclosures site
    #[arg(long, default_value = screener::DEFAULT_SITE)]
    site: String,

    /// Seconds to wait for the documents list to render
    #[arg(long, default_value_t = screener::locator::DEFAULT_WAIT_TIMEOUT.as_secs())]
    wait_secs: u64,

    /// Fetch the company page with plain HTTP instead of a headless browser
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Pick up a local .env (GEMINI_API_KEY, RUST_LOG) before anything reads the environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {}", e);
        }
    }

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 3. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with kind={:?} output_dir={} site={}", args.kind, args.output_dir, args.site);

    // 4. Resolve the ticker, asking for it interactively if needed
    let ticker = match resolve_ticker(args.ticker.as_deref(), &mut std::io::stdin().lock(), &mut std::io::stdout()) {
        Ok(ticker) => ticker,
        Err(e @ AppError::InvalidTicker(_)) => {
            // Bad input is a user-facing outcome like any pipeline failure
            tracing::warn!("Not running the pipeline: {}", e);
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    // 5. Build explicit configuration for each stage
    let locator_config = LocatorConfig::new(&args.site, Duration::from_secs(args.wait_secs))
        .map_err(|e| AppError::Config(format!("Invalid --site {:?}: {}", args.site, e)))?;

    let summarizer_config = SummarizerConfig {
        api_key: args.api_key.clone(),
        model: args.model.clone(),
        ..SummarizerConfig::default()
    };
    if summarizer_config.api_key.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("GEMINI_API_KEY is not set; the summarization step will fail");
    }
    let llm = GeminiClient::new(summarizer_config)
        .map_err(|e| AppError::Config(format!("Failed to build Gemini client: {}", e)))?;

    // 6. Run the pipeline with the selected locator
    if args.no_browser {
        let finder = HttpLinkFinder::new(locator_config)
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        run(finder, llm, &args, &ticker).await
    } else {
        run(BrowserLinkFinder::new(locator_config), llm, &args, &ticker).await
    }
}

/// Runs one ticker through the pipeline and prints the outcome. Stage failures are reported
/// to the user, not returned: the process exits 0 whenever the pipeline ran.
async fn run<F: LinkFinder, C: LlmClient>(finder: F, llm: C, args: &Args, ticker: &Ticker) -> Result<(), AppError> {
    let http = storage::build_download_client()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
    let pipeline = Pipeline::new(finder, PdfStore::new(&args.output_dir), http, Summarizer::new(llm));

    tracing::info!("Processing {} for {}", args.kind.display_name(), ticker);
    match pipeline.run(ticker, args.kind).await {
        Ok(insights) => print_insights(&insights),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn print_insights(insights: &Insights) {
    tracing::info!("Insights for {} based on {}", insights.ticker, insights.pdf_path.display());
    println!("\n**{}:**\n", insights.kind.insights_heading());
    println!("{}", insights.summary);
}

/// Parses `--ticker` when given, otherwise asks for a symbol on `input`.
/// A closed input reads as an empty line and is rejected like one.
fn resolve_ticker<R: BufRead, W: Write>(arg: Option<&str>, input: &mut R, output: &mut W) -> Result<Ticker, AppError> {
    if let Some(raw) = arg {
        return raw.parse();
    }

    write!(output, "Enter company symbol (e.g., TCS, RELIANCE): ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        tracing::debug!("stdin closed before a symbol was entered");
    }
    line.parse()
}
