//! Data models for extracted feed entries.
//!
//! This module defines [`FeedItem`], the canonical record shape that every
//! extractor produces. Whatever the source markup looks like, by the time an
//! item leaves its extractor it has this shape, with the defaulting rules of
//! [`FeedItem::normalized`] already applied. The aggregator validates items
//! but never re-derives fields; it trusts the canonical shape.

use crate::dates;
use serde::{Deserialize, Serialize};

/// One extracted news entry, normalized into the shape an RSS `<item>` needs.
///
/// # Invariants
///
/// * `title` and `link` are non-empty for every item admitted past the
///   aggregator boundary; an item missing either is dropped, never defaulted.
/// * `guid` and `pub_date` are always populated by the time the item reaches
///   the aggregator ([`FeedItem::normalized`] guarantees this).
/// * `link` is an absolute URL; extractors resolve relative hrefs against
///   the page's base URL before constructing an item.
///
/// # Fields
///
/// * `title` - The entry headline, whitespace-trimmed
/// * `link` - Absolute URL of the entry
/// * `description` - Entry summary; falls back to `title`
/// * `pub_date` - RFC-822-style timestamp (`Mon, 02 Jan 2006 15:04:05 +0000`)
/// * `guid` - Stable identifier; falls back to `link`
/// * `source_url` - URL of the page the entry was extracted from
/// * `source_name` - Name of the producing source, stamped by the aggregator
/// * `language` - Locale tag detected from the page (e.g. `de-DE`), if any
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedItem {
    /// The entry headline.
    pub title: String,
    /// Absolute URL of the entry.
    pub link: String,
    /// Entry summary text.
    pub description: String,
    /// Publication timestamp in RFC-822 style.
    pub pub_date: String,
    /// Stable identifier for the entry.
    pub guid: String,
    /// URL of the page the entry was extracted from.
    pub source_url: String,
    /// Name of the producing source; empty until the aggregator stamps it.
    pub source_name: String,
    /// Locale tag detected from the page.
    pub language: Option<String>,
}

impl FeedItem {
    /// Create an item carrying only the required fields.
    ///
    /// The remaining fields start empty and are filled in by the extractor
    /// or by [`FeedItem::normalized`].
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        FeedItem {
            title: title.into(),
            link: link.into(),
            ..FeedItem::default()
        }
    }

    /// Apply the canonical defaulting rules.
    ///
    /// * empty `description` becomes a copy of `title`
    /// * empty `pub_date` becomes the current time in UTC
    /// * empty `guid` becomes a copy of `link`
    ///
    /// Extractors call this on every item they yield, so the aggregator can
    /// rely on these three fields being populated.
    pub fn normalized(mut self) -> Self {
        if self.description.is_empty() {
            self.description = self.title.clone();
        }
        if self.pub_date.is_empty() {
            self.pub_date = dates::rfc822_now();
        }
        if self.guid.is_empty() {
            self.guid = self.link.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaves_optional_fields_empty() {
        let item = FeedItem::new("Title", "http://example.com/1");
        assert_eq!(item.title, "Title");
        assert_eq!(item.link, "http://example.com/1");
        assert!(item.description.is_empty());
        assert!(item.guid.is_empty());
        assert!(item.language.is_none());
    }

    #[test]
    fn test_normalized_defaults_description_to_title() {
        let item = FeedItem::new("Headline", "http://example.com/1").normalized();
        assert_eq!(item.description, "Headline");
    }

    #[test]
    fn test_normalized_defaults_guid_to_link() {
        let item = FeedItem::new("Headline", "http://example.com/1").normalized();
        assert_eq!(item.guid, "http://example.com/1");
    }

    #[test]
    fn test_normalized_fills_pub_date() {
        let item = FeedItem::new("Headline", "http://example.com/1").normalized();
        assert!(!item.pub_date.is_empty());
        assert!(dates::is_rfc822(&item.pub_date));
    }

    #[test]
    fn test_normalized_keeps_existing_values() {
        let mut item = FeedItem::new("Headline", "http://example.com/1");
        item.description = "Custom summary".to_string();
        item.guid = "custom-guid".to_string();
        item.pub_date = "Sun, 17 Mar 2024 00:00:00 +0000".to_string();
        let item = item.normalized();
        assert_eq!(item.description, "Custom summary");
        assert_eq!(item.guid, "custom-guid");
        assert_eq!(item.pub_date, "Sun, 17 Mar 2024 00:00:00 +0000");
    }
}
