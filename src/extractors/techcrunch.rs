//! TechCrunch homepage extractor.
//!
//! Scrapes the [TechCrunch](https://techcrunch.com) homepage. Articles are
//! `article.post-block` elements with the headline anchor in
//! `h2.post-block__title a` and an optional summary in
//! `div.post-block__content`; extraction takes the first ten articles.

use crate::extractors::{Extractor, element_text, first_text, page_language, resolve_link};
use crate::models::FeedItem;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

const MAX_ARTICLES: usize = 10;

static POST_BLOCK: Lazy<Selector> = Lazy::new(|| Selector::parse("article.post-block").unwrap());
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2.post-block__title a").unwrap());
static CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.post-block__content").unwrap());

/// Extractor for the TechCrunch homepage.
pub struct TechCrunch;

impl Extractor for TechCrunch {
    fn name(&self) -> &'static str {
        "techcrunch"
    }

    fn allowed_domain(&self) -> &'static str {
        "techcrunch.com"
    }

    fn start_url(&self) -> &'static str {
        "https://techcrunch.com/"
    }

    fn default_language(&self) -> &'static str {
        "en-US"
    }

    fn extract(&self, html: &str, base: &Url) -> Vec<FeedItem> {
        let document = Html::parse_document(html);
        let language = page_language(&document, self.default_language());

        let mut items = Vec::new();
        for article in document.select(&POST_BLOCK).take(MAX_ARTICLES) {
            let Some(anchor) = article.select(&TITLE_LINK).next() else {
                debug!("Post block without title anchor; skipping");
                continue;
            };
            let title = element_text(anchor);
            if title.is_empty() {
                debug!("Title anchor without text; skipping");
                continue;
            }
            let Some(link) = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_link(base, href))
            else {
                debug!(%title, "Article without resolvable link; skipping");
                continue;
            };

            let description = first_text(article, &CONTENT)
                .unwrap_or_else(|| format!("Article from TechCrunch: {}", title));

            debug!(%title, "Extracted article");
            let mut item = FeedItem::new(title, link);
            item.description = description;
            item.source_url = base.to_string();
            item.language = Some(language.clone());
            items.push(item.normalized());
        }

        info!(count = items.len(), "Extracted TechCrunch articles");
        items
    }
}
