//! Energieforschung.de news extractor.
//!
//! Scrapes the news listing of [Energieforschung](https://www.energieforschung.de),
//! the German federal energy research portal. The listing has no dedicated
//! entry container, so extraction anchors on the `p.subline` date blocks and
//! walks up to each block's parent to find the headline and summary.
//!
//! Dates appear as `DD.MM.YYYY` inside `span.date` elements.

use crate::dates;
use crate::extractors::{Extractor, element_text, first_text, page_language, resolve_link};
use crate::models::FeedItem;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

static SUBLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("p.subline").unwrap());
static DATE_SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span.date").unwrap());
static HEADLINE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".headline-link").unwrap());
static HEADLINE_H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static SUMMARY_ADJACENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".headline-link + p").unwrap());
static SUMMARY_FOLLOWING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".headline-link ~ p").unwrap());

/// Extractor for German energy research news.
pub struct Energieforschung;

impl Extractor for Energieforschung {
    fn name(&self) -> &'static str {
        "energieforschung"
    }

    fn allowed_domain(&self) -> &'static str {
        "energieforschung.de"
    }

    fn start_url(&self) -> &'static str {
        "https://www.energieforschung.de/de/aktuelles/neuigkeiten"
    }

    fn default_language(&self) -> &'static str {
        "de-DE"
    }

    fn extract(&self, html: &str, base: &Url) -> Vec<FeedItem> {
        let document = Html::parse_document(html);
        let language = page_language(&document, self.default_language());

        let sublines: Vec<ElementRef> = document.select(&SUBLINE).collect();
        info!(count = sublines.len(), "Found subline elements");

        let mut items = Vec::new();
        for subline in sublines {
            let Some(parent) = subline.parent().and_then(ElementRef::wrap) else {
                continue;
            };

            let date_text = first_text(subline, &DATE_SPAN);
            let pub_date = date_text
                .as_deref()
                .and_then(dates::find_day_month_year)
                .and_then(dates::normalize_day_month_year)
                .unwrap_or_else(dates::rfc822_now);

            let Some(headline) = parent.select(&HEADLINE_LINK).next() else {
                debug!("Subline block without headline link; skipping");
                continue;
            };
            let Some(href) = headline.value().attr("href") else {
                debug!("Headline link without href; skipping");
                continue;
            };
            let Some(link) = resolve_link(base, href) else {
                debug!(href, "Unresolvable headline href; skipping");
                continue;
            };

            // Headline text lives in an h3; fall back to any text in the link.
            let title = first_text(headline, &HEADLINE_H3)
                .or_else(|| Some(element_text(headline)).filter(|t| !t.is_empty()));
            let Some(title) = title else {
                debug!("Headline link without text; skipping");
                continue;
            };

            let description = first_text(parent, &SUMMARY_ADJACENT)
                .or_else(|| first_text(parent, &SUMMARY_FOLLOWING))
                .unwrap_or_default();

            debug!(%title, "Extracted item");
            let mut item = FeedItem::new(title, link);
            item.description = description;
            item.pub_date = pub_date;
            item.source_url = base.to_string();
            item.language = Some(language.clone());
            items.push(item.normalized());
        }

        items
    }
}
