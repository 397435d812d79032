//! Text helpers shared by the mappers: markup stripping, headline
//! splitting and date formatting.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Maximum number of headline lines produced by [`split_title_into_headline`].
pub const MAX_HEADLINE_LINES: usize = 4;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap_or_else(|e| unreachable!("tag regex: {e}")));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);")
        .unwrap_or_else(|e| unreachable!("entity regex: {e}"))
});

/// Removes HTML tags and entities and collapses whitespace.
///
/// Character references for printable characters and the basic named
/// entities (`&amp;`, `&quot;`, `&apos;`, `&lt;`, `&gt;`) are decoded;
/// `&nbsp;` and any other entity become a space.
#[must_use]
pub fn strip_markup(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, " ");
    let decoded = ENTITY_RE.replace_all(&without_tags, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| " ".to_string(), |c| c.to_string())
    });
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "lt" => '<',
        "gt" => '>',
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code).filter(|c| !c.is_whitespace() && !c.is_control())?
        }
    };
    Some(c)
}

/// Splits a press-release title into at most four display lines.
///
/// Greedy fill: with `n` words the target is `ceil(n / 4)` words per line;
/// a line is closed once it reaches the target or the last word has been
/// placed. The result rejoined with single spaces equals
/// [`strip_markup`] of the input.
#[must_use]
pub fn split_title_into_headline(title: &str) -> Vec<String> {
    let cleaned = strip_markup(title);
    let words: Vec<&str> = cleaned.split(' ').filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return Vec::new();
    }

    let per_line = words.len().div_ceil(MAX_HEADLINE_LINES);
    let mut lines = Vec::with_capacity(MAX_HEADLINE_LINES);
    let mut current: Vec<&str> = Vec::with_capacity(per_line);

    for (i, word) in words.iter().enumerate() {
        current.push(word);
        if current.len() >= per_line || i == words.len() - 1 {
            lines.push(current.join(" "));
            current.clear();
        }
    }

    lines.truncate(MAX_HEADLINE_LINES);
    lines
}

/// Lowercase, hyphen-separated slug derived from a title.
#[must_use]
pub fn slugify(title: &str) -> String {
    strip_markup(title)
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Parses the date formats the CMS emits: `YYYY-MM-DD`, RFC 3339, and
/// offset-less ISO timestamps. Timestamps keep the calendar date as written.
#[must_use]
pub fn parse_cms_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Formats a CMS date as `"September 17, 2025"`. Missing or unparseable
/// input yields an empty string.
#[must_use]
pub fn format_date(value: Option<&str>) -> String {
    value
        .and_then(parse_cms_date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Calendar year of a CMS date, as used by the year filter.
#[must_use]
pub fn year_of(value: Option<&str>) -> Option<i32> {
    value.and_then(parse_cms_date).map(|d| d.year())
}
