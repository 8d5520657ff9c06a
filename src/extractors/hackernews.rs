//! Hacker News front page extractor.
//!
//! Scrapes the [Hacker News](https://news.ycombinator.com) front page. Each
//! story is a `tr.athing` row with the headline anchor in
//! `span.titleline > a`; extraction takes the first ten rows. The page
//! publishes no per-story timestamps, so items get the extraction time.
//!
//! Story hrefs are a mix of absolute URLs and site-relative ones like
//! `item?id=…`; both go through the same base-URL resolution.

use crate::extractors::{Extractor, element_text, page_language, resolve_link};
use crate::models::FeedItem;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

const MAX_STORIES: usize = 10;

static STORY_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.athing").unwrap());
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.titleline > a").unwrap());

/// Extractor for the Hacker News front page.
pub struct HackerNews;

impl Extractor for HackerNews {
    fn name(&self) -> &'static str {
        "hackernews"
    }

    fn allowed_domain(&self) -> &'static str {
        "news.ycombinator.com"
    }

    fn start_url(&self) -> &'static str {
        "https://news.ycombinator.com/"
    }

    fn default_language(&self) -> &'static str {
        "en-US"
    }

    fn extract(&self, html: &str, base: &Url) -> Vec<FeedItem> {
        let document = Html::parse_document(html);
        let language = page_language(&document, self.default_language());

        let mut items = Vec::new();
        for story in document.select(&STORY_ROW).take(MAX_STORIES) {
            let Some(anchor) = story.select(&TITLE_LINK).next() else {
                debug!("Story row without title anchor; skipping");
                continue;
            };
            let title = element_text(anchor);
            if title.is_empty() {
                debug!("Story anchor without text; skipping");
                continue;
            }
            let Some(link) = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_link(base, href))
            else {
                debug!(%title, "Story without resolvable link; skipping");
                continue;
            };

            debug!(%title, "Extracted story");
            let mut item = FeedItem::new(title.clone(), link);
            item.description = format!("Story from Hacker News: {}", title);
            item.source_url = base.to_string();
            item.language = Some(language.clone());
            items.push(item.normalized());
        }

        info!(count = items.len(), "Extracted Hacker News stories");
        items
    }
}
