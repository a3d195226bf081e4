//! Anchor ids and table of contents for rendered articles.
//!
//! Only `<h2>`/`<h3>` elements whose content is plain text take part.
//! A heading with nested markup (`<h2><em>x</em></h2>`) gets neither an id
//! nor a TOC entry, and two headings with the same text share an id.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};

lazy_static! {
    // Bare tags only: headings that already carry attributes are left alone.
    static ref PLAIN_HEADING_REGEX: Regex = Regex::new(r"(?i)<h([23])>([^<]+)</h[23]>").unwrap();
    static ref ANY_HEADING_REGEX: Regex = Regex::new(r"(?i)<h([23])[^>]*>([^<]+)</h[23]>").unwrap();
    static ref STRIP_REGEX: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS_REGEX: Regex = Regex::new(r"-+").unwrap();
}

/// Heading levels that take part in the TOC. Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    /// Level from the digit of an `h2`/`h3` tag name.
    pub fn from_digit(digit: &str) -> Option<HeadingLevel> {
        match digit {
            "2" => Some(HeadingLevel::H2),
            "3" => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    pub fn is_sub(self) -> bool {
        self == HeadingLevel::H3
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub label: String,
    pub level: HeadingLevel,
}

/// `"Getting Started!"` -> `"getting-started"`
pub fn heading_id(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let stripped = STRIP_REGEX.replace_all(&lower, "");
    let hyphenated = WHITESPACE_REGEX.replace_all(&stripped, "-");
    let collapsed = HYPHENS_REGEX.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

pub fn inject_heading_ids(html: &str) -> String {
    PLAIN_HEADING_REGEX
        .replace_all(html, |caps: &Captures| {
            let level = &caps[1];
            let text = caps[2].trim();
            format!(r#"<h{level} id="{}">{}</h{level}>"#, heading_id(text), text)
        })
        .into_owned()
}

pub fn extract_toc(html: &str) -> Vec<TocEntry> {
    ANY_HEADING_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let level = HeadingLevel::from_digit(&caps[1])?;
            let label = caps[2].trim().to_string();
            Some(TocEntry { id: heading_id(&label), label, level })
        })
        .collect()
}

/// Rendered article body with heading ids in place and the matching TOC.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

impl Article {
    /// Injects ids first and extracts the TOC from that same string, so
    /// every TOC anchor resolves.
    pub fn from_html(content_html: &str) -> Article {
        let html = inject_heading_ids(content_html);
        let toc = extract_toc(&html);
        Article { html, toc }
    }
}
