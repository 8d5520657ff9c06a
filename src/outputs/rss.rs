//! RSS 2.0 serialization and the feed file sink.
//!
//! [`render_feed`] turns one source's finalized aggregate into a complete
//! RSS 2.0 document: XML declaration, `<rss version="2.0">` root, one
//! `<channel>` with title/description/language/lastBuildDate, then one
//! `<item>` per entry in ingestion order. The two-space indentation is
//! cosmetic but stable, so output files diff cleanly between runs.
//!
//! [`write_feed`] is the sink: it creates the output directory if needed and
//! overwrites `{dir}/{source}.xml`. Sink failures carry the source name and
//! propagate to the caller; they never touch another source's output.

use crate::models::FeedItem;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;
use std::io::Write;
use tokio::fs;
use tracing::{error, info, instrument};

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Serialize one source's items into an RSS 2.0 document.
///
/// # Arguments
///
/// * `source` - The source name; becomes part of the channel title and
///   description
/// * `items` - Finalized items in ingestion order
/// * `language` - The channel language tag
/// * `build_date` - RFC-822-style build timestamp for `<lastBuildDate>`
///
/// # Returns
///
/// The UTF-8 encoded document, starting with
/// `<?xml version="1.0" encoding="utf-8"?>` and a newline. Special
/// characters in item fields are XML-escaped by the writer.
pub fn render_feed(
    source: &str,
    items: &[FeedItem],
    language: &str,
    build_date: &str,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &format!("RSS Feed - {}", source))?;
    write_text_element(
        &mut writer,
        "description",
        &format!("Automatically generated RSS feed from {} spider", source),
    )?;
    write_text_element(&mut writer, "language", language)?;
    write_text_element(&mut writer, "lastBuildDate", build_date)?;

    for item in items {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &item.title)?;
        write_text_element(&mut writer, "link", &item.link)?;
        write_text_element(&mut writer, "description", &item.description)?;
        write_text_element(&mut writer, "pubDate", &item.pub_date)?;
        write_text_element(&mut writer, "guid", &item.guid)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner())
}

/// Write a rendered feed document to `{output_dir}/{source}.xml`.
///
/// Creates the output directory if it does not exist and overwrites any
/// prior file for the same source.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or the file cannot
/// be written; the error is logged with the source name so the orchestration
/// layer can decide how to proceed without affecting other sources.
#[instrument(level = "info", skip_all, fields(%source, output_dir = %output_dir))]
pub async fn write_feed(
    output_dir: &str,
    source: &str,
    bytes: &[u8],
) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%source, error = %e, "Failed to create feed output directory");
        return Err(e.into());
    }

    let path = format!("{}/{}.xml", output_dir.trim_end_matches('/'), source);
    if let Err(e) = fs::write(&path, bytes).await {
        error!(%source, path = %path, error = %e, "Failed to write feed file");
        return Err(e.into());
    }

    info!(path = %path, bytes = bytes.len(), "Wrote feed file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedItem;

    const BUILD_DATE: &str = "Sun, 17 Mar 2024 12:00:00 +0000";

    fn demo_items() -> Vec<FeedItem> {
        let a = FeedItem::new("A", "http://x/1").normalized();
        let mut b = FeedItem::new("B", "http://x/2").normalized();
        b.language = Some("de-DE".to_string());
        vec![a, b]
    }

    #[test]
    fn test_render_exact_document_shape() {
        let mut item = FeedItem::new("A", "http://x/1");
        item.description = "Summary".to_string();
        item.pub_date = "Sun, 17 Mar 2024 00:00:00 +0000".to_string();
        item.guid = "http://x/1".to_string();

        let bytes = render_feed("demo", &[item], "de-DE", BUILD_DATE).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        let expected = "\
<?xml version=\"1.0\" encoding=\"utf-8\"?>
<rss version=\"2.0\">
  <channel>
    <title>RSS Feed - demo</title>
    <description>Automatically generated RSS feed from demo spider</description>
    <language>de-DE</language>
    <lastBuildDate>Sun, 17 Mar 2024 12:00:00 +0000</lastBuildDate>
    <item>
      <title>A</title>
      <link>http://x/1</link>
      <description>Summary</description>
      <pubDate>Sun, 17 Mar 2024 00:00:00 +0000</pubDate>
      <guid>http://x/1</guid>
    </item>
  </channel>
</rss>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_render_item_count_and_order() {
        let bytes = render_feed("demo", &demo_items(), "de-DE", BUILD_DATE).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(xml.contains("<guid>http://x/1</guid>"));
        assert!(xml.contains("<guid>http://x/2</guid>"));
        let a_pos = xml.find("<title>A</title>").unwrap();
        let b_pos = xml.find("<title>B</title>").unwrap();
        assert!(a_pos < b_pos);
    }

    #[test]
    fn test_render_channel_metadata() {
        let bytes = render_feed("demo", &demo_items(), "de-DE", BUILD_DATE).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
        assert!(xml.contains("<language>de-DE</language>"));
        assert!(xml.contains(&format!("<lastBuildDate>{}</lastBuildDate>", BUILD_DATE)));
    }

    #[test]
    fn test_render_escapes_special_characters() {
        let mut item = FeedItem::new("Q&A <live>", "http://x/1?a=1&b=2").normalized();
        item.description = "Ampersands & angle <brackets>".to_string();
        let bytes = render_feed("demo", &[item], "en-us", BUILD_DATE).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert!(xml.contains("<title>Q&amp;A &lt;live&gt;</title>"));
        assert!(xml.contains("<link>http://x/1?a=1&amp;b=2</link>"));
        assert!(!xml.contains("<live>"));
    }

    #[test]
    fn test_render_is_parseable_xml() {
        let bytes = render_feed("demo", &demo_items(), "de-DE", BUILD_DATE).unwrap();
        let mut reader = quick_xml::Reader::from_str(std::str::from_utf8(&bytes).unwrap());
        let mut item_count = 0;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"item" => item_count += 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("generated feed is not well-formed: {e}"),
            }
        }
        assert_eq!(item_count, 2);
    }

    #[tokio::test]
    async fn test_write_feed_creates_directory_and_file() {
        let dir = std::env::temp_dir().join("feedspider-test-feeds");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        let dir_str = dir.to_str().unwrap();

        let bytes = render_feed("demo", &demo_items(), "de-DE", BUILD_DATE).unwrap();
        write_feed(dir_str, "demo", &bytes).await.unwrap();

        let written = tokio::fs::read(dir.join("demo.xml")).await.unwrap();
        assert_eq!(written, bytes);

        // Overwrites on a second run.
        let bytes2 = render_feed("demo", &[], "en-us", BUILD_DATE).unwrap();
        write_feed(dir_str, "demo", &bytes2).await.unwrap();
        let written2 = tokio::fs::read(dir.join("demo.xml")).await.unwrap();
        assert_eq!(written2, bytes2);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
