//! Source-agnostic pipeline orchestration.
//!
//! One pipeline run per source: fetch the listing page, extract items,
//! ingest them into the shared [`FeedAggregator`], then finalize and publish
//! the feed. Per-item anomalies are absorbed here: a dropped item is logged
//! and counted, never fatal. Only fetch and sink failures propagate, and a
//! failure in one source's run never touches another source's aggregate.

use crate::aggregator::FeedAggregator;
use crate::extractors::Extractor;
use crate::outputs::rss;
use crate::{dates, fetch};
use std::error::Error;
use tracing::{info, instrument, warn};
use url::Url;

/// Outcome of ingesting one document's extracted items.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Items admitted into the source's aggregate.
    pub ingested: usize,
    /// Items refused at the aggregation boundary.
    pub dropped: usize,
}

/// Extract a fetched document and ingest the results.
///
/// Items the aggregator refuses are logged with their drop reason and
/// counted; extraction of the remaining items continues. Synchronous,
/// computation-only work.
pub fn process_document(
    extractor: &dyn Extractor,
    html: &str,
    base: &Url,
    aggregator: &mut FeedAggregator,
) -> IngestSummary {
    let mut summary = IngestSummary::default();
    for item in extractor.extract(html, base) {
        let title = item.title.clone();
        match aggregator.ingest(extractor.name(), item) {
            Ok(()) => summary.ingested += 1,
            Err(reason) => {
                warn!(source = extractor.name(), %title, %reason, "Dropping item");
                summary.dropped += 1;
            }
        }
    }
    summary
}

/// Finalize a source's aggregate and write its feed file.
///
/// A source that collected no items produces no feed file; the prior run's
/// file, if any, is left untouched. Sink failures propagate to the caller.
#[instrument(level = "info", skip_all, fields(%source))]
pub async fn publish_source(
    source: &str,
    aggregator: &mut FeedAggregator,
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let feed = aggregator.finalize(source);
    if feed.items.is_empty() {
        info!(%source, "No items collected; skipping feed file");
        return Ok(());
    }

    let bytes = rss::render_feed(source, &feed.items, &feed.language, &dates::rfc822_now())?;
    rss::write_feed(output_dir, source, &bytes).await
}

/// Run one source end to end: fetch, extract, ingest, publish.
///
/// `max_items` is the per-run ceiling consulted between documents: once a
/// source's aggregate reaches it, no further pages are scheduled. It never
/// aborts extraction of a document already fetched, so a run can finish
/// slightly above the ceiling.
#[instrument(level = "info", skip_all, fields(source = extractor.name()))]
pub async fn run_source(
    extractor: &dyn Extractor,
    aggregator: &mut FeedAggregator,
    output_dir: &str,
    max_items: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let base = Url::parse(extractor.start_url())?;
    aggregator.open_source(extractor.name());

    info!(
        domain = extractor.allowed_domain(),
        url = extractor.start_url(),
        "Fetching listing page"
    );
    let html = fetch::fetch_document(extractor.start_url()).await?;
    let summary = process_document(extractor, &html, &base, aggregator);
    info!(
        ingested = summary.ingested,
        dropped = summary.dropped,
        "Document processed"
    );

    if let Some(limit) = max_items {
        if aggregator.len(extractor.name()) >= limit {
            info!(limit, "Reached max items; not scheduling further pages");
        }
    }

    publish_source(extractor.name(), aggregator, output_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedItem;

    /// Test double yielding a fixed set of items regardless of input.
    struct FixedItems(Vec<FeedItem>);

    impl Extractor for FixedItems {
        fn name(&self) -> &'static str {
            "demo"
        }
        fn allowed_domain(&self) -> &'static str {
            "example.com"
        }
        fn start_url(&self) -> &'static str {
            "http://example.com/"
        }
        fn default_language(&self) -> &'static str {
            "en-US"
        }
        fn extract(&self, _html: &str, _base: &Url) -> Vec<FeedItem> {
            self.0.clone()
        }
    }

    fn base() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    #[test]
    fn test_process_document_counts_ingested_and_dropped() {
        let extractor = FixedItems(vec![
            FeedItem::new("A", "http://x/1").normalized(),
            FeedItem::new("", "http://x/3"),
            FeedItem::new("B", "http://x/2").normalized(),
        ]);
        let mut aggregator = FeedAggregator::new();
        let summary = process_document(&extractor, "", &base(), &mut aggregator);
        assert_eq!(summary, IngestSummary { ingested: 2, dropped: 1 });
        assert_eq!(aggregator.len("demo"), 2);
    }

    #[test]
    fn test_dropped_item_never_reaches_feed() {
        let extractor = FixedItems(vec![FeedItem::new("", "http://x/3")]);
        let mut aggregator = FeedAggregator::new();
        process_document(&extractor, "", &base(), &mut aggregator);
        assert!(aggregator.finalize("demo").items.is_empty());
    }

    #[tokio::test]
    async fn test_publish_source_end_to_end() {
        let dir = std::env::temp_dir().join("feedspider-test-pipeline");
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let mut b = FeedItem::new("B", "http://x/2").normalized();
        b.language = Some("de-DE".to_string());
        let extractor = FixedItems(vec![FeedItem::new("A", "http://x/1").normalized(), b]);

        let mut aggregator = FeedAggregator::new();
        process_document(&extractor, "", &base(), &mut aggregator);
        publish_source("demo", &mut aggregator, dir.to_str().unwrap())
            .await
            .unwrap();

        let xml = tokio::fs::read_to_string(dir.join("demo.xml")).await.unwrap();
        assert!(xml.contains("<language>de-DE</language>"));
        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(xml.contains("<guid>http://x/1</guid>"));
        assert!(xml.contains("<guid>http://x/2</guid>"));
        let a_pos = xml.find("<guid>http://x/1</guid>").unwrap();
        let b_pos = xml.find("<guid>http://x/2</guid>").unwrap();
        assert!(a_pos < b_pos);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_publish_source_skips_empty_feed() {
        let dir = std::env::temp_dir().join("feedspider-test-pipeline-empty");
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let mut aggregator = FeedAggregator::new();
        aggregator.open_source("demo");
        publish_source("demo", &mut aggregator, dir.to_str().unwrap())
            .await
            .unwrap();

        assert!(!dir.join("demo.xml").exists());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
