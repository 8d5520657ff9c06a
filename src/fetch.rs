//! Document fetching boundary.
//!
//! The extraction core operates on already-fetched documents; this module is
//! the thin collaborator that supplies them. One GET per listing page, HTTP
//! errors surfaced to the caller. Politeness concerns (rate limiting,
//! robots.txt, concurrency caps) belong to whatever schedules the runs, not
//! here.

use std::error::Error;
use tracing::{info, instrument};

/// Fetch one HTML document.
///
/// # Returns
///
/// The response body as text, or an error when the request fails or the
/// server answers with a non-success status.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_document(url: &str) -> Result<String, Box<dyn Error>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let html = response.text().await?;
    info!(bytes = html.len(), "Fetched document");
    Ok(html)
}
