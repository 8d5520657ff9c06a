//! Per-source item aggregation.
//!
//! [`FeedAggregator`] buffers extracted items per source for the lifetime of
//! one run and decides the feed-level metadata. The aggregator owns the only
//! mutable pipeline state: an ordered item buffer and a detected language per
//! source. Each source's buffer is written by exactly one pipeline, so no
//! locking is involved; the aggregator is passed by mutable reference to
//! every ingestion call.

use crate::models::FeedItem;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use tracing::debug;

/// Why an item was refused at the aggregation boundary.
///
/// A drop is a per-item signal, not a pipeline fault: the caller logs it and
/// keeps ingesting. The dropped item never appears in any feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The item's `title` was empty.
    MissingTitle,
    /// The item's `link` was empty.
    MissingLink,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingTitle => write!(f, "item has no title"),
            DropReason::MissingLink => write!(f, "item has no link"),
        }
    }
}

impl Error for DropReason {}

/// One source's completed aggregate, as returned by [`FeedAggregator::finalize`].
#[derive(Debug, Default)]
pub struct FinalizedFeed {
    /// Items in ingestion order. This order is preserved into the output feed.
    pub items: Vec<FeedItem>,
    /// The source's language tag, or `en-us` when none was ever observed.
    pub language: String,
}

#[derive(Debug, Default)]
struct SourceBuffer {
    items: Vec<FeedItem>,
    language: Option<String>,
}

/// Collects [`FeedItem`]s per source and derives feed-level metadata.
///
/// A source's buffer is created lazily on its first ingested item (or
/// explicitly via [`FeedAggregator::open_source`]) and consumed exactly once
/// by [`FeedAggregator::finalize`]. Buffers are never merged or reused
/// across runs.
#[derive(Debug, Default)]
pub struct FeedAggregator {
    buffers: HashMap<String, SourceBuffer>,
}

impl FeedAggregator {
    pub fn new() -> Self {
        FeedAggregator::default()
    }

    /// Create an empty buffer for a source before its crawl begins.
    ///
    /// Optional, since [`ingest`](FeedAggregator::ingest) creates buffers on
    /// demand, but opening up front makes "source ran but found nothing"
    /// distinguishable in logs from "source never ran".
    pub fn open_source(&mut self, source: &str) {
        self.buffers.entry(source.to_string()).or_default();
    }

    /// Validate an item and append it to its source's ordered buffer.
    ///
    /// Items missing a `title` or `link` are refused with a [`DropReason`]
    /// and discarded. Admitted items get `source_name` stamped. If the item
    /// carries a language and the source has none recorded yet, the item's
    /// language becomes the source's language (first observation wins;
    /// later items cannot change it).
    pub fn ingest(&mut self, source: &str, mut item: FeedItem) -> Result<(), DropReason> {
        if item.title.is_empty() {
            return Err(DropReason::MissingTitle);
        }
        if item.link.is_empty() {
            return Err(DropReason::MissingLink);
        }

        item.source_name = source.to_string();

        let buffer = self.buffers.entry(source.to_string()).or_default();
        if buffer.language.is_none() {
            if let Some(lang) = &item.language {
                debug!(source, language = %lang, "Recorded source language");
                buffer.language = Some(lang.clone());
            }
        }
        buffer.items.push(item);
        Ok(())
    }

    /// Number of items currently buffered for a source.
    pub fn len(&self, source: &str) -> usize {
        self.buffers.get(source).map_or(0, |b| b.items.len())
    }

    /// Consume a source's buffer, returning its items and language.
    ///
    /// The source's state is cleared: a second call without intervening
    /// ingestion returns an empty result. A source that never ingested
    /// anything finalizes to an empty item list with the `en-us` default
    /// language; whether to still publish a feed for it is the caller's
    /// decision.
    pub fn finalize(&mut self, source: &str) -> FinalizedFeed {
        let buffer = self.buffers.remove(source).unwrap_or_default();
        FinalizedFeed {
            items: buffer.items,
            language: buffer.language.unwrap_or_else(|| "en-us".to_string()),
        }
    }
}
