//! Publication-date normalization.
//!
//! RSS 2.0 wants RFC-822-style timestamps (`Sun, 17 Mar 2024 00:00:00 +0000`),
//! while the scraped pages carry locale-specific date text; the German
//! sources print `17.03.2024` buried inside kicker or subline elements. This
//! module isolates such fragments and converts them to the canonical format.
//!
//! No timezone inference is attempted: normalized dates get a fixed `+0000`
//! offset and a midnight time, because the pages publish no time of day.
//! When a fragment cannot be found or parsed, callers substitute the current
//! time via [`rfc822_now`].

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// The RFC-822-style timestamp format used throughout the generated feeds.
pub const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Matches a day.month.year date fragment, e.g. `17.03.2024` or `7.3.2024`.
static DAY_MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}\.\d{1,2}\.\d{4})").unwrap());

/// Isolate a `DD.MM.YYYY` fragment from surrounding text.
///
/// Returns the first match, or `None` when the text carries no such fragment.
/// Sources wrap their dates in category labels and separators
/// (e.g. `"Meldung | 17.03.2024"`), so callers pass the raw element text.
pub fn find_day_month_year(text: &str) -> Option<&str> {
    DAY_MONTH_YEAR_RE
        .find(text)
        .map(|m| m.as_str())
}

/// Normalize a `DD.MM.YYYY` date string into the RFC-822-style format.
///
/// The input is expected to already be isolated by [`find_day_month_year`].
/// Returns `None` when the string is not a valid calendar date (e.g.
/// `32.13.2024`); the caller then falls back to the current time.
pub fn normalize_day_month_year(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%d.%m.%Y").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.format(RFC822_FORMAT).to_string())
}

/// The current time in UTC, formatted RFC-822 style.
pub fn rfc822_now() -> String {
    Utc::now().format(RFC822_FORMAT).to_string()
}

/// Check whether a string parses as an RFC-822-style timestamp.
pub fn is_rfc822(s: &str) -> bool {
    DateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S %z").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_day_month_year_in_kicker_text() {
        assert_eq!(
            find_day_month_year("Meldung | 17.03.2024"),
            Some("17.03.2024")
        );
        assert_eq!(find_day_month_year("7.3.2024"), Some("7.3.2024"));
    }

    #[test]
    fn test_find_day_month_year_absent() {
        assert_eq!(find_day_month_year("Meldung vom Montag"), None);
        assert_eq!(find_day_month_year(""), None);
    }

    #[test]
    fn test_normalize_day_month_year() {
        assert_eq!(
            normalize_day_month_year("17.03.2024").as_deref(),
            Some("Sun, 17 Mar 2024 00:00:00 +0000")
        );
    }

    #[test]
    fn test_normalize_unpadded_date() {
        assert_eq!(
            normalize_day_month_year("7.3.2024").as_deref(),
            Some("Thu, 07 Mar 2024 00:00:00 +0000")
        );
    }

    #[test]
    fn test_normalize_invalid_date() {
        assert_eq!(normalize_day_month_year("32.13.2024"), None);
        assert_eq!(normalize_day_month_year("not a date"), None);
    }

    #[test]
    fn test_rfc822_now_is_well_formed() {
        assert!(is_rfc822(&rfc822_now()));
    }

    #[test]
    fn test_is_rfc822_rejects_garbage() {
        assert!(!is_rfc822("yesterday"));
        assert!(!is_rfc822("2024-03-17"));
    }
}
