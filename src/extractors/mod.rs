//! Per-source item extractors.
//!
//! This module contains one submodule per supported source. Each source has
//! its own markup quirks, but every extractor implements the same
//! [`Extractor`] contract: given a fetched document and the URL it came
//! from, yield zero or more normalized [`FeedItem`]s.
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | Energieforschung | [`energieforschung`] | German energy research news |
//! | Gebäudeforum | [`gebaeudeforum`] | German building industry news archive |
//! | Hacker News | [`hackernews`] | Front page stories, first 10 |
//! | TechCrunch | [`techcrunch`] | Homepage articles, first 10 |
//!
//! # Common Patterns
//!
//! Extraction is purely defensive: a candidate block missing a resolvable
//! title or link is skipped, never aborting the rest of the document. Every
//! required field has a short, ordered fallback chain of at most two or
//! three strategies, no recursion. Relative hrefs are resolved against the
//! document's base URL. The page language comes from the `<html lang>`
//! attribute, falling back to a per-source default so it is never unset.

use crate::models::FeedItem;
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub mod energieforschung;
pub mod gebaeudeforum;
pub mod hackernews;
pub mod techcrunch;

/// The uniform extraction contract shared by all sources.
///
/// An implementation carries the source's identity (name, domain, start
/// URL, default language) and knows how to pick entries out of that
/// source's markup. Extraction is synchronous, computation-only work on an
/// already-fetched document; fetching is the orchestration layer's concern.
pub trait Extractor: Send + Sync {
    /// The source name. Names the output feed file and the channel metadata.
    fn name(&self) -> &'static str;

    /// The domain this source's entries are expected to live on.
    fn allowed_domain(&self) -> &'static str;

    /// The listing page extraction starts from.
    fn start_url(&self) -> &'static str;

    /// Language tag used when the page carries no `<html lang>` attribute.
    fn default_language(&self) -> &'static str;

    /// Extract entries from a fetched document.
    ///
    /// Returns the items found in document order, already normalized. A
    /// document without the expected structural anchor yields an empty
    /// vector, never an error.
    fn extract(&self, html: &str, base: &Url) -> Vec<FeedItem>;
}

/// All registered extractors, in the order they run.
pub fn all() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(energieforschung::Energieforschung),
        Box::new(gebaeudeforum::Gebaeudeforum),
        Box::new(hackernews::HackerNews),
        Box::new(techcrunch::TechCrunch),
    ]
}

/// Look up an extractor by source name.
pub fn by_name(name: &str) -> Option<Box<dyn Extractor>> {
    all().into_iter().find(|e| e.name() == name)
}

/// Read the page language from the root element's `lang` attribute,
/// falling back to the source default.
pub(crate) fn page_language(document: &Html, fallback: &str) -> String {
    document
        .root_element()
        .value()
        .attr("lang")
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Whitespace-trimmed text content of the first descendant matching `sel`.
///
/// Returns `None` when nothing matches or the match has no text.
pub(crate) fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// Whitespace-trimmed text content of an element.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Resolve an href against the document's base URL.
///
/// Absolute hrefs pass through unchanged; relative ones are joined onto the
/// base. Returns `None` for hrefs that cannot form a valid URL, in which
/// case the candidate is skipped.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(Into::into)
}
