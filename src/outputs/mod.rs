//! Output generation for the per-source RSS documents.
//!
//! # Submodules
//!
//! - [`rss`]: Serializes a finalized aggregate to RSS 2.0 XML and writes it
//!   through the file sink
//!
//! # Output Structure
//!
//! ```text
//! feed_output_dir/
//! ├── energieforschung.xml
//! ├── gebaeudeforum.xml
//! ├── hackernews.xml
//! └── techcrunch.xml
//! ```
//!
//! One file per source, named by the source, overwritten on every run.

pub mod rss;
