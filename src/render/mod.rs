//! HTML rendering of assembled pages.
//!
//! Output is a complete, dependency-free HTML document: navigation, the
//! page hero, then every section in order.

pub mod escape;
pub mod sections;

use crate::error::RenderError;
use crate::pages::{LISTED, Page, Route, Section};

pub use escape::{escape_attr, escape_html};
pub use sections::{render_hero, render_section};

/// Settings that do not vary per page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// CMS origin that relative upload paths resolve against
    pub cms_base: String,
    /// Public origin of the site, for canonical links
    pub site_url: String,
    /// Suffix of every document title
    pub site_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cms_base: String::new(),
            site_url: String::new(),
            site_name: "Pharmasite".to_string(),
        }
    }
}

/// Renders `page` as an HTML document.
///
/// # Errors
///
/// [`RenderError::MissingData`] when a bannered route has no banner
/// section.
pub fn render_page(page: &Page, route: &Route, opts: &RenderOptions) -> Result<String, RenderError> {
    let mut body = Vec::new();

    if route.banner_key().is_some() {
        let banner = page.sections.iter().find_map(|s| match s {
            Section::TopBanner(b) => Some(b),
            _ => None,
        });
        body.push(render_hero(banner, opts)?);
    }
    for section in &page.sections {
        if matches!(section, Section::TopBanner(_)) {
            continue;
        }
        body.push(render_section(section, opts));
    }

    Ok(document(&page.title, Some(&page.path), Some(route), body, opts))
}

/// Renders the not-found document, linking `suggestion` when there is one.
#[must_use]
pub fn render_not_found(path: &str, suggestion: Option<&str>, opts: &RenderOptions) -> String {
    let mut body = vec![
        "<section class=\"not-found\">".to_string(),
        "<h1>Page not found</h1>".to_string(),
        format!("<p>There is no page at <code>{}</code>.</p>", escape_html(path)),
    ];
    if let Some(suggestion) = suggestion {
        body.push(format!(
            "<p>Did you mean <a href=\"{}\">{}</a>?</p>",
            escape_attr(suggestion),
            escape_html(suggestion)
        ));
    }
    body.push("</section>".to_string());
    document("Page not found", None, None, body, opts)
}

fn document(
    title: &str,
    canonical_path: Option<&str>,
    current: Option<&Route>,
    body: Vec<String>,
    opts: &RenderOptions,
) -> String {
    let mut html = Vec::new();
    html.push("<!DOCTYPE html>".to_string());
    html.push("<html lang=\"en\">".to_string());
    html.push("<head>".to_string());
    html.push("<meta charset=\"utf-8\">".to_string());
    html.push("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string());
    html.push(format!(
        "<title>{} | {}</title>",
        escape_html(title),
        escape_html(&opts.site_name)
    ));
    if let Some(path) = canonical_path.filter(|_| !opts.site_url.is_empty()) {
        html.push(format!(
            "<link rel=\"canonical\" href=\"{}{}\">",
            escape_attr(opts.site_url.trim_end_matches('/')),
            escape_attr(path)
        ));
    }
    html.push("</head>".to_string());
    html.push("<body>".to_string());
    html.push(navigation(current));
    html.push("<main>".to_string());
    html.extend(body);
    html.push("</main>".to_string());
    html.push("</body>".to_string());
    html.push("</html>".to_string());
    html.join("\n")
}

fn navigation(current: Option<&Route>) -> String {
    let mut items = Vec::new();
    for route in &LISTED {
        let active = current.is_some_and(|current| {
            route == current
                || (matches!(current, Route::PressReleaseDetail { .. })
                    && *route == Route::PressReleases)
        });
        items.push(format!(
            "<li><a href=\"{}\"{}>{}</a></li>",
            route.pattern(),
            if active { " aria-current=\"page\"" } else { "" },
            escape_html(route.title())
        ));
    }
    format!("<nav class=\"site-nav\"><ul>{}</ul></nav>", items.join(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::{BannerData, PressRelease};

    fn page(sections: Vec<Section>) -> Page {
        Page {
            path: "/about-us".into(),
            title: "About Us".into(),
            sections,
            fallbacks: Vec::new(),
        }
    }

    #[test]
    fn bannered_route_without_banner_fails() {
        let err = render_page(&page(Vec::new()), &Route::AboutUs, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingData { .. }));
    }

    #[test]
    fn document_shell() {
        let banner = Section::TopBanner(BannerData {
            title: "About Us".into(),
            ..BannerData::default()
        });
        let opts = RenderOptions {
            site_url: "https://www.example.com/".into(),
            ..RenderOptions::default()
        };
        let html = render_page(&page(vec![banner]), &Route::AboutUs, &opts).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>About Us | Pharmasite</title>"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://www.example.com/about-us\">"));
        assert!(html.contains("<a href=\"/about-us\" aria-current=\"page\">About Us</a>"));
        assert_eq!(html.matches("<h1>").count(), 1);
    }

    #[test]
    fn detail_page_needs_no_banner() {
        let route = Route::PressReleaseDetail { slug: "x".into() };
        let release = PressRelease {
            title: "X".into(),
            slug: "x".into(),
            body: Some("<p>Body</p>".into()),
            ..PressRelease::default()
        };
        let html = render_page(
            &page(vec![Section::PressReleaseDetail(release)]),
            &route,
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(html.contains("<div class=\"body\"><p>Body</p></div>"));
        assert!(html.contains("<a href=\"/media/press-releases\" aria-current=\"page\">"));
    }

    #[test]
    fn not_found_document() {
        let html = render_not_found("/about-su", Some("/about-us"), &RenderOptions::default());
        assert!(html.contains("<h1>Page not found</h1>"));
        assert!(html.contains("<code>/about-su</code>"));
        assert!(html.contains("Did you mean <a href=\"/about-us\">/about-us</a>?"));
        assert!(!html.contains("aria-current"));
        assert!(!html.contains("canonical"));
    }
}
