use chrono::{DateTime, NaiveDate, NaiveDateTime};

const WORDS_PER_MINUTE: f64 = 200.0;

/// Parses the `date` field of a content file into a sortable timestamp.
///
/// Accepted shapes: `2024-01-31`, RFC 3339 (`2024-01-31T10:00:00Z`) and
/// `2024-01-31T10:00:00` / `2024-01-31 10:00:00`. Anything else is `None`.
pub fn parse_content_date(buf: &str) -> Option<NaiveDateTime> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(buf, fmt).ok())
}

/// Formats a content date the way cards and article headers show it,
/// e.g. `February 3, 2026`. Unparsable dates are shown as written.
pub fn format_display_date(buf: &str) -> String {
    match parse_content_date(buf) {
        Some(date_time) => date_time.format("%B %-d, %Y").to_string(),
        None => buf.to_string(),
    }
}

/// Rough reading time at ~200 words per minute, never less than a minute.
pub fn estimate_read_time(text: &str) -> u32 {
    let words = text.split_whitespace().count() as f64;
    let minutes = (words / WORDS_PER_MINUTE).round() as u32;
    minutes.max(1)
}

/// Turns a title into an ASCII, hyphen separated slug.
pub fn slugify(title: &str) -> String {
    let ascii = unidecode::unidecode(title).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut prev_hyphen = true;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Whether `slug` can be used as a single path segment of a URL and of the
/// output tree: ASCII letters, digits, `-`, `_` and `.`, never starting with `.`.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
