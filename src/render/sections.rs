//! One renderer per section component.

use std::fmt::Write;

use reqwest::Url;

use crate::contact::{ContactFormState, FormStatus};
use crate::content::model::{
    AboutData, BannerData, Card, CardGrid, ContactDetails, DividendData, ImageRef, MediaKitItem,
    Perspective, PressRelease, Product,
};
use crate::error::RenderError;
use crate::listing::{ListQuery, ListView};
use crate::pages::{LeaderSection, MediaHighlights, ProductSearch, Section};

use super::RenderOptions;
use super::escape::{anchor_id, escape_attr, escape_html};

/// Element id of the listing container; pagination links scroll to it.
pub const LIST_ANCHOR: &str = "listing";

/// Renders the page hero. Unlike every other section it has no empty
/// state: a bannered route without a banner is a bug.
///
/// # Errors
///
/// [`RenderError::MissingData`] when `banner` is `None`.
pub fn render_hero(banner: Option<&BannerData>, opts: &RenderOptions) -> Result<String, RenderError> {
    let banner = banner.ok_or(RenderError::MissingData {
        component: "TopBanner",
    })?;

    let mut out = String::from("<section class=\"top-banner\">\n");
    if let Some(image) = &banner.image {
        let _ = write!(out, "<picture>");
        if let Some(mobile) = &banner.mobile_image {
            let _ = write!(
                out,
                "<source media=\"(max-width: 767px)\" srcset=\"{}\">",
                escape_attr(&mobile.resolved_url(&opts.cms_base))
            );
        }
        let _ = writeln!(out, "{}</picture>", img(image, opts));
    }
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&banner.title));
    if let Some(subtitle) = &banner.subtitle {
        let _ = writeln!(out, "<h2>{}</h2>", escape_html(subtitle));
    }
    if let Some(description) = &banner.description {
        let _ = writeln!(out, "<p>{}</p>", escape_html(description));
    }
    if let Some(cta) = &banner.cta {
        let _ = writeln!(
            out,
            "<a class=\"cta\" href=\"{}\">{}</a>",
            escape_attr(&cta.href),
            escape_html(&cta.label)
        );
    }
    out.push_str("</section>");
    Ok(out)
}

/// Renders any section except the hero.
pub fn render_section(section: &Section, opts: &RenderOptions) -> String {
    match section {
        Section::TopBanner(b) => render_hero(Some(b), opts).unwrap_or_default(),
        Section::AboutIntro(a) => about_intro(a),
        Section::BoardOfDirectors(s) => leaders(s, "board", opts),
        Section::ManagementTeam(s) => leaders(s, "management", opts),
        Section::DividendTable(d) => dividend_table(d),
        Section::MediaHighlights(h) => media_highlights(h, opts),
        Section::PressReleaseList(view) => {
            listing(view, "/media/press-releases", |r| press_release_card(r, opts))
        }
        Section::PressReleaseDetail(r) => press_release_detail(r, opts),
        Section::PerspectiveList(view) => {
            listing(view, "/media/perspectives", |p| perspective_card(p, opts))
        }
        Section::MediaKitList(view) => listing(view, "/media/media-kit", |m| media_kit_card(m, opts)),
        Section::CardGrid(grid) => card_grid(grid, opts),
        Section::ProductSearch(search) => product_search(search),
        Section::ContactForm(form) => contact_form(form),
        Section::ContactDetails(details) => contact_details(details),
    }
}

fn img(image: &ImageRef, opts: &RenderOptions) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        escape_attr(&image.resolved_url(&opts.cms_base)),
        escape_attr(&image.alt)
    )
}

fn about_intro(about: &AboutData) -> String {
    let mut out = String::from("<section class=\"about-intro\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(&about.heading));
    let _ = writeln!(out, "<p>{}</p>", escape_html(&about.description));
    for block in [&about.vision, &about.mission].into_iter().flatten() {
        let _ = writeln!(
            out,
            "<div class=\"statement\"><h3>{}</h3><p>{}</p></div>",
            escape_html(&block.heading),
            escape_html(&block.body)
        );
    }
    if !about.stats.is_empty() {
        out.push_str("<ul class=\"stats\">\n");
        for stat in &about.stats {
            let _ = writeln!(
                out,
                "<li><strong>{}</strong> {}</li>",
                escape_html(&stat.value),
                escape_html(&stat.label)
            );
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</section>");
    out
}

fn leaders(section: &LeaderSection, class: &str, opts: &RenderOptions) -> String {
    let mut out = format!(
        "<section class=\"leaders {class}\" id=\"{}\">\n<h2>{}</h2>\n<ul>\n",
        anchor_id(&section.heading),
        escape_html(&section.heading)
    );
    for leader in &section.leaders {
        out.push_str("<li class=\"leader\">");
        if let Some(image) = &leader.image {
            out.push_str(&img(image, opts));
        }
        let _ = write!(
            out,
            "<h3>{}</h3><p class=\"designation\">{}</p>",
            escape_html(&leader.name),
            escape_html(&leader.designation)
        );
        if let Some(bio) = &leader.bio {
            let _ = write!(out, "<p class=\"bio\">{}</p>", escape_html(bio));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n</section>");
    out
}

fn dividend_table(table: &DividendData) -> String {
    let mut out = format!(
        "<section class=\"dividends\">\n<h2>{}</h2>\n<table>\n<thead><tr><th>Financial Year</th><th>Record Date</th><th>Dividend per Share</th><th>Dividend (%)</th></tr></thead>\n<tbody>\n",
        escape_html(&table.heading)
    );
    for row in &table.rows {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.financial_year),
            escape_html(&row.record_date),
            escape_html(&row.dividend_per_share),
            escape_html(&row.dividend_percent)
        );
    }
    out.push_str("</tbody>\n</table>\n");
    if let Some(note) = &table.note {
        let _ = writeln!(out, "<p class=\"note\">{}</p>", escape_html(note));
    }
    out.push_str("</section>");
    out
}

fn headline(lines: &[String], fallback: &str) -> String {
    if lines.is_empty() {
        return escape_html(fallback);
    }
    lines
        .iter()
        .map(|l| format!("<span>{}</span>", escape_html(l)))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn press_release_card(release: &PressRelease, opts: &RenderOptions) -> String {
    let mut out = String::from("<article class=\"press-release\">");
    if let Some(image) = &release.image {
        out.push_str(&img(image, opts));
    }
    let _ = write!(
        out,
        "<time>{}</time><h3><a href=\"/media/press-releases/{}\">{}</a></h3>",
        escape_html(&release.date),
        escape_attr(&release.slug),
        headline(&release.headline, &release.title)
    );
    if let Some(excerpt) = &release.excerpt {
        let _ = write!(out, "<p>{}</p>", escape_html(excerpt));
    }
    out.push_str("</article>");
    out
}

fn press_release_detail(release: &PressRelease, opts: &RenderOptions) -> String {
    let mut out = String::from("<article class=\"press-release-detail\">\n");
    let _ = writeln!(
        out,
        "<h1>{}</h1>\n<time>{}</time>",
        headline(&release.headline, &release.title),
        escape_html(&release.date)
    );
    if let Some(image) = &release.image {
        out.push_str(&img(image, opts));
        out.push('\n');
    }
    // CMS rich text is authored markup and is emitted as-is.
    if let Some(body) = &release.body {
        let _ = writeln!(out, "<div class=\"body\">{body}</div>");
    } else if let Some(excerpt) = &release.excerpt {
        let _ = writeln!(out, "<p>{}</p>", escape_html(excerpt));
    }
    if let Some(pdf) = &release.pdf_url {
        let _ = writeln!(
            out,
            "<a class=\"download\" href=\"{}\">Download PDF</a>",
            escape_attr(pdf)
        );
    }
    out.push_str("<a href=\"/media/press-releases\">Back to press releases</a>\n</article>");
    out
}

fn perspective_card(perspective: &Perspective, opts: &RenderOptions) -> String {
    let mut out = String::from("<article class=\"perspective\">");
    if let Some(image) = &perspective.image {
        out.push_str(&img(image, opts));
    }
    let title = escape_html(&perspective.title);
    match &perspective.link {
        Some(link) => {
            let _ = write!(
                out,
                "<h3><a href=\"{}\" rel=\"noopener\" target=\"_blank\">{title}</a></h3>",
                escape_attr(link)
            );
        }
        None => {
            let _ = write!(out, "<h3>{title}</h3>");
        }
    }
    let _ = write!(out, "<time>{}</time>", escape_html(&perspective.date));
    if let Some(author) = &perspective.author {
        let _ = write!(out, "<p class=\"author\">{}</p>", escape_html(author));
    }
    if let Some(excerpt) = &perspective.excerpt {
        let _ = write!(out, "<p>{}</p>", escape_html(excerpt));
    }
    out.push_str("</article>");
    out
}

fn media_kit_card(item: &MediaKitItem, opts: &RenderOptions) -> String {
    let mut out = String::from("<article class=\"media-kit-item\">");
    if let Some(thumbnail) = &item.thumbnail {
        out.push_str(&img(thumbnail, opts));
    }
    let _ = write!(
        out,
        "<h3>{}</h3><time>{}</time>",
        escape_html(&item.title),
        escape_html(&item.date)
    );
    if let Some(file) = &item.file_url {
        let _ = write!(
            out,
            "<a class=\"download\" href=\"{}\" download>Download</a>",
            escape_attr(&ImageRef {
                url: file.clone(),
                alt: String::new(),
            }
            .resolved_url(&opts.cms_base))
        );
    }
    out.push_str("</article>");
    out
}

fn media_highlights(highlights: &MediaHighlights, opts: &RenderOptions) -> String {
    let mut out = String::from("<section class=\"media-highlights\">\n");
    if !highlights.press_releases.is_empty() {
        out.push_str("<h2>Latest Press Releases</h2>\n<div class=\"grid\">\n");
        for release in &highlights.press_releases {
            out.push_str(&press_release_card(release, opts));
            out.push('\n');
        }
        out.push_str("</div>\n<a href=\"/media/press-releases\">View all press releases</a>\n");
    }
    if !highlights.perspectives.is_empty() {
        out.push_str("<h2>Perspectives</h2>\n<div class=\"grid\">\n");
        for perspective in &highlights.perspectives {
            out.push_str(&perspective_card(perspective, opts));
            out.push('\n');
        }
        out.push_str("</div>\n<a href=\"/media/perspectives\">View all perspectives</a>\n");
    }
    out.push_str("</section>");
    out
}

/// Link to `page` of a listing, keeping the current filters.
fn page_href(path: &str, query: &ListQuery, page: usize) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if !query.search_query.is_empty() {
        pairs.push(("q", query.search_query.clone()));
    }
    if !query.selected_year.is_empty() {
        pairs.push(("year", query.selected_year.clone()));
    }
    pairs.push(("page", page.to_string()));

    Url::parse_with_params(&format!("http://localhost{path}"), &pairs).map_or_else(
        |_| format!("{path}?page={page}#{LIST_ANCHOR}"),
        |url| {
            format!(
                "{}?{}#{LIST_ANCHOR}",
                url.path(),
                url.query().unwrap_or_default()
            )
        },
    )
}

fn listing<T>(view: &ListView<T>, path: &str, render_item: impl Fn(&T) -> String) -> String {
    let query = ListQuery {
        search_query: view.search_query.clone(),
        selected_year: view.selected_year.clone(),
        current_page: view.current_page,
    };

    let mut out = format!("<section class=\"listing\" id=\"{LIST_ANCHOR}\">\n");
    let _ = writeln!(
        out,
        "<form method=\"get\" action=\"{path}\" class=\"filters\">\n<input type=\"search\" name=\"q\" placeholder=\"Search\" value=\"{}\">",
        escape_attr(&view.search_query)
    );
    out.push_str("<select name=\"year\"><option value=\"\">All years</option>");
    for year in &view.years {
        let selected = if *year == view.selected_year { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{0}\"{selected}>{0}</option>",
            escape_attr(year)
        );
    }
    out.push_str("</select>\n<button type=\"submit\">Filter</button>\n</form>\n");

    if let Some(message) = &view.empty_message {
        let _ = writeln!(out, "<p class=\"no-results\">{}</p>", escape_html(message));
    } else {
        out.push_str("<div class=\"grid\">\n");
        for item in &view.items {
            out.push_str(&render_item(item));
            out.push('\n');
        }
        out.push_str("</div>\n");
    }

    if view.total_pages > 1 {
        out.push_str("<nav class=\"pagination\">");
        for page in 1..=view.total_pages {
            if page == view.current_page {
                let _ = write!(out, "<span aria-current=\"page\">{page}</span>");
            } else {
                let _ = write!(
                    out,
                    "<a href=\"{}\">{page}</a>",
                    escape_attr(&page_href(path, &query, page))
                );
            }
        }
        out.push_str("</nav>\n");
    }
    out.push_str("</section>");
    out
}

fn card(card: &Card, opts: &RenderOptions) -> String {
    let mut out = String::from("<div class=\"card\">");
    if let Some(image) = &card.image {
        out.push_str(&img(image, opts));
    }
    let _ = write!(
        out,
        "<h3>{}</h3><p>{}</p>",
        escape_html(&card.title),
        escape_html(&card.description)
    );
    if let Some(link) = &card.link {
        let _ = write!(
            out,
            "<a href=\"{}\">{}</a>",
            escape_attr(&link.href),
            escape_html(&link.label)
        );
    }
    out.push_str("</div>");
    out
}

fn card_grid(grid: &CardGrid, opts: &RenderOptions) -> String {
    let mut out = format!(
        "<section class=\"card-grid\" id=\"{}\">\n<h2>{}</h2>\n",
        anchor_id(&grid.heading),
        escape_html(&grid.heading)
    );
    if let Some(intro) = &grid.intro {
        let _ = writeln!(out, "<p>{}</p>", escape_html(intro));
    }
    out.push_str("<div class=\"grid\">\n");
    for c in &grid.cards {
        out.push_str(&card(c, opts));
        out.push('\n');
    }
    out.push_str("</div>\n</section>");
    out
}

fn product_row(product: &Product) -> String {
    let cell = |v: &Option<String>| escape_html(v.as_deref().unwrap_or("-"));
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&product.name),
        cell(&product.composition),
        cell(&product.dosage_form),
        cell(&product.therapy),
        cell(&product.geography)
    )
}

fn product_search(search: &ProductSearch) -> String {
    let mut out = format!(
        "<section class=\"product-search\" id=\"product-finder\" data-endpoint=\"{}\">\n<h2>Product Finder</h2>\n",
        escape_attr(&search.endpoint)
    );
    let _ = writeln!(
        out,
        "<form method=\"get\" action=\"{}\">\n<input type=\"search\" name=\"searchTerm\" placeholder=\"Search by name or composition\">\n<label><input type=\"checkbox\" name=\"oncology\" value=\"true\"> Oncology</label>\n<button type=\"submit\">Search</button>\n</form>",
        escape_attr(&search.endpoint)
    );
    out.push_str("<nav class=\"alphabet\">");
    for letter in 'A'..='Z' {
        let _ = write!(
            out,
            "<a href=\"{}?selectedLetter={letter}\">{letter}</a>",
            escape_attr(&search.endpoint)
        );
    }
    out.push_str("</nav>\n");
    if search.initial.is_empty() {
        out.push_str("<p class=\"no-results\">No products found</p>\n");
    } else {
        out.push_str("<table>\n<thead><tr><th>Name</th><th>Composition</th><th>Dosage Form</th><th>Therapy</th><th>Market</th></tr></thead>\n<tbody>\n");
        for product in &search.initial {
            out.push_str(&product_row(product));
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "</tbody>\n</table>\n<p class=\"total\">{} products</p>",
            search.total
        );
    }
    out.push_str("</section>");
    out
}

fn text_input(name: &str, label: &str, value: &str, kind: &str, required: bool) -> String {
    format!(
        "<label>{}{}<input type=\"{kind}\" name=\"{name}\" value=\"{}\"{}></label>",
        escape_html(label),
        if required { " *" } else { "" },
        escape_attr(value),
        if required { " required" } else { "" }
    )
}

fn contact_form(form: &ContactFormState) -> String {
    let v = &form.values;
    let mut out = String::from("<section class=\"contact-form\" id=\"enquiry\">\n<h2>Send us an enquiry</h2>\n");
    match &form.status {
        Some(FormStatus::Success(message)) => {
            let _ = writeln!(out, "<p class=\"status success\">{}</p>", escape_html(message));
        }
        Some(FormStatus::Error(message)) => {
            let _ = writeln!(out, "<p class=\"status error\" role=\"alert\">{}</p>", escape_html(message));
        }
        None => {}
    }
    out.push_str("<form method=\"post\" action=\"/contact-us\">\n");
    for field in [
        text_input("fullName", "Full name", &v.full_name, "text", true),
        text_input("email", "Email", &v.email, "email", true),
        text_input("phone", "Phone", &v.phone, "tel", false),
        text_input("organization", "Organization", &v.organization, "text", false),
        text_input("country", "Country", &v.country, "text", false),
        text_input("enquiryType", "Enquiry type", &v.enquiry_type, "text", false),
    ] {
        out.push_str(&field);
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "<label>Message *<textarea name=\"message\" required>{}</textarea></label>",
        escape_html(&v.message)
    );
    out.push_str("<button type=\"submit\">Submit</button>\n</form>\n</section>");
    out
}

fn contact_details(details: &ContactDetails) -> String {
    let mut out = format!(
        "<section class=\"contact-details\">\n<h2>{}</h2>\n<address>{}</address>\n",
        escape_html(&details.heading),
        escape_html(&details.address)
    );
    if let Some(phone) = &details.phone {
        let _ = writeln!(
            out,
            "<p>Phone: <a href=\"tel:{}\">{}</a></p>",
            escape_attr(&phone.replace(' ', "")),
            escape_html(phone)
        );
    }
    if let Some(email) = &details.email {
        let _ = writeln!(
            out,
            "<p>Email: <a href=\"mailto:{0}\">{1}</a></p>",
            escape_attr(email),
            escape_html(email)
        );
    }
    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::NO_RESULTS_MESSAGE;

    fn opts() -> RenderOptions {
        RenderOptions {
            cms_base: "https://cms.example.com".into(),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn hero_requires_data() {
        let err = render_hero(None, &opts()).unwrap_err();
        assert!(matches!(err, RenderError::MissingData { component: "TopBanner" }));
    }

    #[test]
    fn hero_resolves_cms_images_and_escapes() {
        let banner = BannerData {
            title: "R&D <Labs>".into(),
            image: Some(ImageRef {
                url: "/uploads/hero.jpg".into(),
                alt: "Lab \"bench\"".into(),
            }),
            ..BannerData::default()
        };
        let html = render_hero(Some(&banner), &opts()).unwrap();
        assert!(html.contains("<h1>R&amp;D &lt;Labs&gt;</h1>"));
        assert!(html.contains("src=\"https://cms.example.com/uploads/hero.jpg\""));
        assert!(html.contains("alt=\"Lab &quot;bench&quot;\""));
    }

    #[test]
    fn page_links_keep_filters() {
        let query = ListQuery {
            search_query: "q1 results".into(),
            selected_year: "2025".into(),
            current_page: 1,
        };
        assert_eq!(
            page_href("/media/press-releases", &query, 2),
            "/media/press-releases?q=q1+results&year=2025&page=2#listing"
        );
    }

    #[test]
    fn empty_listing_shows_message() {
        let view: ListView<PressRelease> = crate::listing::paginate(
            &[],
            &ListQuery::default(),
            6,
        );
        let html = render_section(&Section::PressReleaseList(view), &opts());
        assert!(html.contains(NO_RESULTS_MESSAGE));
        assert!(!html.contains("class=\"pagination\""));
    }

    #[test]
    fn contact_form_echoes_values() {
        let mut form = ContactFormState::default();
        form.values.full_name = "Asha \"AR\" Rao".into();
        form.status = Some(FormStatus::Error("Please enter a valid email address.".into()));
        let html = contact_form(&form);
        assert!(html.contains("value=\"Asha &quot;AR&quot; Rao\""));
        assert!(html.contains("role=\"alert\">Please enter a valid email address.</p>"));
    }
}
