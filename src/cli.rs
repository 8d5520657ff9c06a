//! Command-line interface definitions for feedspider.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the feedspider application.
///
/// # Examples
///
/// ```sh
/// # Run all sources, writing feeds to ./feeds
/// feedspider
///
/// # Run a subset of sources into a custom directory
/// feedspider -f /var/www/feeds -s hackernews,techcrunch
///
/// # Stop scheduling further pages once a source has 25 items
/// feedspider --max-items 25
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the generated feed XML files
    #[arg(short, long, default_value = "feeds")]
    pub feed_output_dir: String,

    /// Comma-separated list of source names to run (default: all sources)
    #[arg(short, long, value_delimiter = ',')]
    pub sources: Option<Vec<String>>,

    /// Per-source ceiling on items collected in one run
    #[arg(long, env = "MAX_ITEMS")]
    pub max_items: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["feedspider"]);
        assert_eq!(cli.feed_output_dir, "feeds");
        assert!(cli.sources.is_none());
        assert!(cli.max_items.is_none());
    }

    #[test]
    fn test_cli_source_list() {
        let cli = Cli::parse_from(&["feedspider", "-s", "hackernews,techcrunch"]);
        assert_eq!(
            cli.sources,
            Some(vec!["hackernews".to_string(), "techcrunch".to_string()])
        );
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from(&[
            "feedspider",
            "--feed-output-dir",
            "/tmp/feeds",
            "--max-items",
            "25",
        ]);
        assert_eq!(cli.feed_output_dir, "/tmp/feeds");
        assert_eq!(cli.max_items, Some(25));
    }
}
