use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tempfile::NamedTempFile;

use crate::app::{GemsError, Result};
use crate::domain::FeedEntry;
use crate::feed::ChannelMeta;

fn xml_err<E: std::fmt::Display>(e: E) -> GemsError {
    GemsError::FeedWrite(e.to_string())
}

/// Serialize the channel and its entries (in order) as an RSS 2.0 document.
pub fn render_feed(channel: &ChannelMeta, entries: &[FeedEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss)).map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(xml_err)?;

    write_text(&mut writer, "title", &channel.title)?;
    write_text(&mut writer, "link", &channel.link)?;
    write_text(&mut writer, "description", &channel.description)?;
    write_text(&mut writer, "language", &channel.language)?;

    let last_build = entries.iter().filter_map(|e| e.published_at).max();
    if let Some(date) = last_build {
        write_text(&mut writer, "lastBuildDate", &rfc822(date))?;
    }

    for entry in entries {
        write_item(&mut writer, entry)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(xml_err)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
    xml.push('\n');
    Ok(xml)
}

/// Render the feed and replace `path` with it.
///
/// The document goes to a temporary file next to `path` first, so readers
/// never observe a half-written feed.
pub fn write_feed(path: &Path, channel: &ChannelMeta, entries: &[FeedEntry]) -> Result<()> {
    let xml = render_feed(channel, entries)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(xml.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| GemsError::Io(e.error))?;

    tracing::info!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

fn write_item(writer: &mut Writer<Vec<u8>>, entry: &FeedEntry) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("item")))
        .map_err(xml_err)?;

    write_text(writer, "title", &entry.title)?;
    write_text(writer, "link", &entry.link)?;
    write_text(writer, "description", &entry.description)?;
    if let Some(author) = &entry.author {
        write_text(writer, "author", author)?;
    }
    if let Some(date) = entry.published_at {
        write_text(writer, "pubDate", &rfc822(date))?;
    }

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    writer.write_event(Event::Start(guid)).map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(&entry.link)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("guid")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::End(BytesEnd::new("item")))
        .map_err(xml_err)?;
    Ok(())
}

fn write_text(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))
        .map_err(xml_err)?;
    Ok(())
}

fn rfc822(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    fn entry(id: u64) -> FeedEntry {
        FeedEntry {
            title: format!("HN Gem: foo.com - user{}", id),
            link: format!("https://news.ycombinator.com/context?id={}", id),
            description: "<p>visit <a href=\"http://foo.com\">foo</a> & more".into(),
            author: Some(format!("user{}", id)),
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, id as u32, 8, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_render_channel_and_items() {
        let xml = render_feed(&ChannelMeta::gems(), &[entry(1), entry(2)]).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<title>HN Gems: Commented URLs</title>"));
        assert!(xml.contains("<language>en</language>"));
        assert!(xml.contains("<lastBuildDate>Tue, 02 Jan 2024 08:30:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<pubDate>Mon, 01 Jan 2024 08:30:00 +0000</pubDate>"));
        assert!(xml.contains("<author>user2</author>"));

        let first = xml.find("context?id=1").unwrap();
        let second = xml.find("context?id=2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_escapes_markup() {
        let xml = render_feed(&ChannelMeta::gems(), &[entry(1)]).unwrap();
        assert!(xml.contains("&lt;p&gt;visit"));
        assert!(xml.contains("&amp; more"));
        assert!(!xml.contains("<p>visit"));
    }

    #[test]
    fn test_empty_feed_has_no_build_date() {
        let xml = render_feed(&ChannelMeta::top_comments(), &[]).unwrap();
        assert!(xml.contains("<title>Top HN Comments with URL</title>"));
        assert!(!xml.contains("lastBuildDate"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_write_feed_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.xml");
        fs::write(&path, "stale").unwrap();

        write_feed(&path, &ChannelMeta::gems(), &[entry(3)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("context?id=3"));
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_write_feed_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("feed.xml");

        write_feed(&path, &ChannelMeta::gems(), &[]).unwrap();
        assert!(path.exists());
    }
}
