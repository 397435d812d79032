//! Press releases, perspectives and media-kit items.
//!
//! All three are collections whose entries carry a title, a slug and a
//! publication date (`publishedOn`, falling back to Strapi's `publishedAt`).

use serde_json::Value;

use crate::content::model::{MediaKitItem, Perspective, PressRelease};
use crate::content::probe::{self, Precedence};
use crate::content::text::{format_date, slugify, split_title_into_headline};

const PRECEDENCE: Precedence = Precedence::FlatFirst;

/// Raw publication date of an entry.
#[must_use]
pub fn published_on(entry: &Value) -> Option<String> {
    probe::text(entry, &["publishedOn", "PublishedOn", "date", "Date"], PRECEDENCE)
        .or_else(|| probe::text(entry, &["publishedAt"], PRECEDENCE))
}

fn title_and_slug(entry: &Value) -> Option<(String, String)> {
    let title = probe::text(entry, &["title", "Title", "headline", "Headline"], PRECEDENCE)?;
    let slug = probe::text(entry, &["slug", "Slug"], PRECEDENCE).unwrap_or_else(|| slugify(&title));
    Some((title, slug))
}

/// Maps one press-release entry. Entries without a title are dropped.
#[must_use]
pub fn map_press_release(entry: &Value) -> Option<PressRelease> {
    let (title, slug) = title_and_slug(entry)?;
    let published_on = published_on(entry);
    Some(PressRelease {
        headline: split_title_into_headline(&title),
        date: format_date(published_on.as_deref()),
        title,
        slug,
        published_on,
        excerpt: probe::text(
            entry,
            &["excerpt", "shortDescription", "ShortDescription", "summary"],
            PRECEDENCE,
        ),
        body: probe::text(entry, &["content", "Content", "body", "description"], PRECEDENCE),
        pdf_url: probe::media_url(entry, &["pdf", "Pdf", "PDF", "file", "attachment"], PRECEDENCE),
        image: probe::media(entry, &["image", "Image", "thumbnail", "cover"], PRECEDENCE),
    })
}

/// Maps the `press-releases` collection, preserving CMS order.
#[must_use]
pub fn map_press_releases(raw: &Value) -> Vec<PressRelease> {
    probe::entries(raw)
        .into_iter()
        .filter_map(map_press_release)
        .collect()
}

/// Finds the press release with `slug` in a collection response.
#[must_use]
pub fn find_press_release(raw: &Value, slug: &str) -> Option<PressRelease> {
    map_press_releases(raw).into_iter().find(|p| p.slug == slug)
}

/// Maps the `perspectives` collection.
#[must_use]
pub fn map_perspectives(raw: &Value) -> Vec<Perspective> {
    probe::entries(raw)
        .into_iter()
        .filter_map(|entry| {
            let (title, slug) = title_and_slug(entry)?;
            let published_on = published_on(entry);
            Some(Perspective {
                date: format_date(published_on.as_deref()),
                title,
                slug,
                author: probe::text(entry, &["author", "Author"], PRECEDENCE),
                published_on,
                excerpt: probe::text(
                    entry,
                    &["excerpt", "shortDescription", "summary"],
                    PRECEDENCE,
                ),
                image: probe::media(entry, &["image", "Image", "thumbnail"], PRECEDENCE),
                link: probe::text(entry, &["externalLink", "link", "url"], PRECEDENCE),
            })
        })
        .collect()
}

/// Maps the `media-kits` collection.
#[must_use]
pub fn map_media_kit(raw: &Value) -> Vec<MediaKitItem> {
    probe::entries(raw)
        .into_iter()
        .filter_map(|entry| {
            let (title, slug) = title_and_slug(entry)?;
            let published_on = published_on(entry);
            Some(MediaKitItem {
                date: format_date(published_on.as_deref()),
                title,
                slug,
                published_on,
                file_url: probe::media_url(entry, &["file", "File", "asset", "pdf"], PRECEDENCE),
                thumbnail: probe::media(entry, &["thumbnail", "Thumbnail", "image"], PRECEDENCE),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn releases() -> Value {
        json!({"data": [
            {"id": 1, "attributes": {
                "title": "Lupin Receives Positive CHMP Opinion for Biosimilar Ranibizumab",
                "slug": "chmp-ranibizumab",
                "publishedOn": "2025-09-17",
                "publishedAt": "2025-09-18T04:00:00.000Z",
                "pdf": {"data": {"attributes": {"url": "/uploads/chmp.pdf"}}}
            }},
            {"id": 2, "title": "Q1 FY26 Results", "publishedAt": "2025-08-06T10:00:00.000Z"},
            {"id": 3, "slug": "untitled"}
        ], "meta": {"pagination": {"total": 3}}})
    }

    #[test]
    fn maps_press_releases() {
        let items = map_press_releases(&releases());
        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.date, "September 17, 2025");
        assert_eq!(first.headline.len(), 4);
        assert_eq!(first.pdf_url.as_deref(), Some("/uploads/chmp.pdf"));
    }

    #[test]
    fn published_at_fallback_and_derived_slug() {
        let items = map_press_releases(&releases());
        assert_eq!(items[1].date, "August 6, 2025");
        assert_eq!(items[1].slug, "q1-fy26-results");
    }

    #[test]
    fn missing_date_is_empty_string() {
        let items = map_press_releases(&json!({"data": [{"title": "Undated"}]}));
        assert_eq!(items[0].date, "");
        assert_eq!(items[0].published_on, None);
    }

    #[test]
    fn find_by_slug() {
        assert!(find_press_release(&releases(), "chmp-ranibizumab").is_some());
        assert!(find_press_release(&releases(), "missing").is_none());
    }

    #[test]
    fn maps_perspectives_and_media_kit() {
        let raw = json!({"data": [{"title": "Access to Medicine", "author": "R. Shah", "publishedOn": "2024-11-02",
                                   "image": {"url": "https://cdn.example.com/a.jpg"}}]});
        let p = map_perspectives(&raw);
        assert_eq!(p[0].author.as_deref(), Some("R. Shah"));
        assert_eq!(p[0].date, "November 2, 2024");

        let raw = json!({"data": [{"attributes": {"title": "Corporate Logo", "slug": "logo",
                                   "file": {"data": {"attributes": {"url": "/uploads/logo.zip"}}}}}]});
        let k = map_media_kit(&raw);
        assert_eq!(k[0].file_url.as_deref(), Some("/uploads/logo.zip"));
    }
}
