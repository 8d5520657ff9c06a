//! # feedspider
//!
//! Generates RSS 2.0 feeds for news sites that don't publish one. Each
//! supported source gets its own pipeline: fetch the listing page, extract
//! entries with source-specific structural rules, normalize them into a
//! canonical item shape, aggregate them, and serialize the aggregate as a
//! standards-compliant RSS 2.0 document.
//!
//! ## Usage
//!
//! ```sh
//! feedspider -f ./feeds -s hackernews,gebaeudeforum
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download each source's listing page
//! 2. **Extraction**: Pick entries out of the markup with per-source
//!    selectors and defensive fallback chains
//! 3. **Aggregation**: Buffer items per source, validate required fields,
//!    derive the feed language
//! 4. **Publishing**: Serialize each source's aggregate to `feeds/{source}.xml`
//!
//! Per-item and per-document anomalies are absorbed where they occur; a
//! malformed entry or a failed source never aborts the run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod dates;
mod extractors;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod utils;

use aggregator::FeedAggregator;
use cli::Cli;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feedspider starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.feed_output_dir, ?args.sources, ?args.max_items, "Parsed CLI arguments");

    // Early check: ensure the feed output dir is writable
    if let Err(e) = ensure_writable_dir(&args.feed_output_dir).await {
        error!(
            path = %args.feed_output_dir,
            error = %e,
            "Feed output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Select sources ----
    let selected = match &args.sources {
        Some(names) => {
            let mut selected = Vec::new();
            for name in names {
                match extractors::by_name(name) {
                    Some(extractor) => selected.push(extractor),
                    None => {
                        error!(%name, "Unknown source name");
                        return Err(format!("unknown source: {name}").into());
                    }
                }
            }
            selected
        }
        None => extractors::all(),
    };
    info!(
        sources = ?selected.iter().map(|e| e.name()).collect::<Vec<_>>(),
        "Selected sources"
    );

    // ---- Run one pipeline per source ----
    let mut aggregator = FeedAggregator::new();
    let mut failed = 0usize;
    for extractor in &selected {
        if let Err(e) = pipeline::run_source(
            extractor.as_ref(),
            &mut aggregator,
            &args.feed_output_dir,
            args.max_items,
        )
        .await
        {
            error!(
                source = extractor.name(),
                error = %e,
                "Source run failed; continuing with remaining sources"
            );
            failed += 1;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        sources = selected.len(),
        failed,
        "Execution complete"
    );

    Ok(())
}
