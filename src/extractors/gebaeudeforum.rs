//! Gebäudeforum news archive extractor.
//!
//! Scrapes the archive listing of [Gebäudeforum klimaneutral](https://www.gebaeudeforum.de),
//! the German building industry knowledge portal. Entries are teaser cards
//! inside a single `#article` container; a page without that container is
//! reported as zero items, not as an error.
//!
//! Dates are embedded in the card's kicker line, typically in the form
//! `"Kategorie | DD.MM.YYYY"`.

use crate::dates;
use crate::extractors::{Extractor, first_text, page_language, resolve_link};
use crate::models::FeedItem;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("#article").unwrap());
static TEASER_CARD: Lazy<Selector> = Lazy::new(|| Selector::parse(".c-teaser--card").unwrap());
static HEADLINE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.c-teaser__headline").unwrap());
static SUMMARY_ADJACENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.c-teaser__headline + p").unwrap());
static SUMMARY_ANY: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static CARD_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".c-teaser__link").unwrap());
static KICKER: Lazy<Selector> = Lazy::new(|| Selector::parse("span.c-kicker").unwrap());

/// Extractor for the Gebäudeforum news archive.
pub struct Gebaeudeforum;

impl Extractor for Gebaeudeforum {
    fn name(&self) -> &'static str {
        "gebaeudeforum"
    }

    fn allowed_domain(&self) -> &'static str {
        "gebaeudeforum.de"
    }

    fn start_url(&self) -> &'static str {
        "https://www.gebaeudeforum.de/service/archiv-meldungen"
    }

    fn default_language(&self) -> &'static str {
        "de-DE"
    }

    fn extract(&self, html: &str, base: &Url) -> Vec<FeedItem> {
        let document = Html::parse_document(html);
        let language = page_language(&document, self.default_language());

        let Some(container) = document.select(&ARTICLE).next() else {
            warn!("No article container found");
            return Vec::new();
        };

        let cards: Vec<_> = container.select(&TEASER_CARD).collect();
        info!(count = cards.len(), "Found teaser cards");

        let mut items = Vec::new();
        for card in cards {
            let Some(title) = first_text(card, &HEADLINE) else {
                debug!("Teaser card without headline; skipping");
                continue;
            };

            let Some(href) = card
                .select(&CARD_LINK)
                .next()
                .and_then(|l| l.value().attr("href"))
            else {
                debug!(%title, "Teaser card without link; skipping");
                continue;
            };
            let Some(link) = resolve_link(base, href) else {
                debug!(href, "Unresolvable card href; skipping");
                continue;
            };

            let summary = first_text(card, &SUMMARY_ADJACENT)
                .or_else(|| first_text(card, &SUMMARY_ANY))
                .unwrap_or_else(|| title.clone());

            let pub_date = first_text(card, &KICKER)
                .as_deref()
                .and_then(dates::find_day_month_year)
                .and_then(dates::normalize_day_month_year)
                .unwrap_or_else(dates::rfc822_now);

            debug!(%title, "Extracted item");
            let mut item = FeedItem::new(title, link);
            item.description = format!("Gebäudeforum: {}", summary);
            item.pub_date = pub_date;
            item.source_url = base.to_string();
            item.language = Some(language.clone());
            items.push(item.normalized());
        }

        items
    }
}
