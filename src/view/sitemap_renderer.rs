use std::io::Cursor;

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://cloudforgeops.com/services</loc>
    <lastmod>2026-03-01</lastmod>
    <changefreq>monthly</changefreq>
    <priority>0.9</priority>
  </url>
</urlset>
*/

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Site-relative path, `""` for the home page.
    pub path: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

impl SitemapEntry {
    pub fn new(path: &str, change_frequency: ChangeFrequency, priority: f64) -> SitemapEntry {
        SitemapEntry {
            path: path.to_string(),
            change_frequency,
            priority,
        }
    }
}

/// Pages that exist regardless of content.
pub fn static_entries() -> Vec<SitemapEntry> {
    vec![
        SitemapEntry::new("", ChangeFrequency::Monthly, 1.0),
        SitemapEntry::new("/services", ChangeFrequency::Monthly, 0.9),
        SitemapEntry::new("/case-studies", ChangeFrequency::Weekly, 0.85),
        SitemapEntry::new("/blog", ChangeFrequency::Weekly, 0.8),
        SitemapEntry::new("/free-review", ChangeFrequency::Monthly, 0.7),
    ]
}

pub fn case_study_entry(slug: &str) -> SitemapEntry {
    SitemapEntry::new(&format!("/case-studies/{}", slug), ChangeFrequency::Monthly, 0.8)
}

pub fn blog_entry(slug: &str) -> SitemapEntry {
    SitemapEntry::new(&format!("/blog/{}", slug), ChangeFrequency::Monthly, 0.7)
}

pub struct Sitemap<'a> {
    pub base_url: &'a str,
    pub last_modified: NaiveDate,
}

impl<'a> Sitemap<'a> {
    pub fn render(&self, entries: &[SitemapEntry]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let base_url = self.base_url.trim_end_matches('/');
        let last_modified = self.last_modified.format("%Y-%m-%d").to_string();

        // <?xml version="1.0" encoding="UTF-8"?>
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        // <urlset xmlns="...">
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for entry in entries {
            writer.write_event(Event::Start(BytesStart::new("url")))?;

            let loc = format!("{}{}", base_url, entry.path);
            push_text(&mut writer, "loc", &loc)?;
            push_text(&mut writer, "lastmod", &last_modified)?;
            push_text(&mut writer, "changefreq", entry.change_frequency.as_str())?;
            push_text(&mut writer, "priority", &entry.priority.to_string())?;

            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        // </urlset>
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
