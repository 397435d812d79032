//! View-models: the normalized, page-ready shapes the mappers produce and
//! the renderer consumes.
//!
//! The same types deserialize the fallback catalog, so every field either
//! has a serde default or is an `Option`.

use serde::{Deserialize, Serialize};

/// An image reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageRef {
    /// Absolute URL or CMS-relative path (`/uploads/...`)
    pub url: String,
    /// Alternative text
    pub alt: String,
}

impl ImageRef {
    /// Resolves a CMS-relative upload path against the CMS origin.
    #[must_use]
    pub fn resolved_url(&self, cms_base: &str) -> String {
        if self.url.starts_with('/') && !self.url.starts_with("//") {
            format!("{}{}", cms_base.trim_end_matches('/'), self.url)
        } else {
            self.url.clone()
        }
    }
}

/// A labelled link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    /// Visible label
    pub label: String,
    /// Target URL
    pub href: String,
}

/// Top banner shown on most pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerData {
    /// Banner heading
    pub title: String,
    /// Secondary heading
    pub subtitle: Option<String>,
    /// Body copy
    pub description: Option<String>,
    /// Desktop image
    pub image: Option<ImageRef>,
    /// Mobile image
    pub mobile_image: Option<ImageRef>,
    /// Call to action
    pub cta: Option<Link>,
}

/// Heading plus body copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentBlock {
    /// Block heading
    pub heading: String,
    /// Block body
    pub body: String,
}

/// A headline figure, e.g. `"100+" / "Countries"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stat {
    /// Displayed value
    pub value: String,
    /// Caption
    pub label: String,
}

/// About Us introduction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutData {
    /// Main heading
    pub heading: String,
    /// Introductory paragraph
    pub description: String,
    /// Vision statement
    pub vision: Option<ContentBlock>,
    /// Mission statement
    pub mission: Option<ContentBlock>,
    /// Key figures
    pub stats: Vec<Stat>,
}

/// One person on the leadership page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leader {
    /// Full name
    pub name: String,
    /// Role
    pub designation: String,
    /// Portrait
    pub image: Option<ImageRef>,
    /// Short biography
    pub bio: Option<String>,
}

/// Leadership split into the two page sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadersData {
    /// Board of directors
    pub board: Vec<Leader>,
    /// Management team
    pub management: Vec<Leader>,
}

impl LeadersData {
    /// `true` when neither section has anyone in it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.board.is_empty() && self.management.is_empty()
    }
}

/// One dividend declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividendRow {
    /// e.g. `"2024-25"`
    pub financial_year: String,
    /// Record date as displayed
    pub record_date: String,
    /// e.g. `"₹ 12.00"`
    pub dividend_per_share: String,
    /// e.g. `"600%"`
    pub dividend_percent: String,
}

/// Dividend history table on the investors page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividendData {
    /// Table heading
    pub heading: String,
    /// Footnote
    pub note: Option<String>,
    /// Table rows, newest first
    pub rows: Vec<DividendRow>,
}

/// A press release, for both the listing and the detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressRelease {
    /// Title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Title split into display lines
    pub headline: Vec<String>,
    /// Raw publication date (`publishedOn`, else `publishedAt`)
    pub published_on: Option<String>,
    /// Publication date as displayed
    pub date: String,
    /// Teaser text
    pub excerpt: Option<String>,
    /// Full body (HTML)
    pub body: Option<String>,
    /// Attached PDF
    pub pdf_url: Option<String>,
    /// Hero image
    pub image: Option<ImageRef>,
}

/// A perspective (opinion piece / article).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Perspective {
    /// Title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Author byline
    pub author: Option<String>,
    /// Raw publication date
    pub published_on: Option<String>,
    /// Publication date as displayed
    pub date: String,
    /// Teaser text
    pub excerpt: Option<String>,
    /// Card image
    pub image: Option<ImageRef>,
    /// External article link
    pub link: Option<String>,
}

/// A downloadable media-kit item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaKitItem {
    /// Title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Raw publication date
    pub published_on: Option<String>,
    /// Publication date as displayed
    pub date: String,
    /// Download URL
    pub file_url: Option<String>,
    /// Preview image
    pub thumbnail: Option<ImageRef>,
}

/// A generic card (community initiative, business segment).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    /// Card title
    pub title: String,
    /// Card body
    pub description: String,
    /// Card image
    pub image: Option<ImageRef>,
    /// Read-more link
    pub link: Option<Link>,
}

/// Heading, intro and a grid of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardGrid {
    /// Section heading
    pub heading: String,
    /// Section intro
    pub intro: Option<String>,
    /// Cards
    pub cards: Vec<Card>,
}

/// A product from the product finder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// CMS id
    pub id: Option<u64>,
    /// Brand or generic name
    pub name: String,
    /// Active ingredients
    pub composition: Option<String>,
    /// Tablet, injection, ...
    pub dosage_form: Option<String>,
    /// Strength
    pub strength: Option<String>,
    /// Pack size
    pub pack_size: Option<String>,
    /// Market
    pub geography: Option<String>,
    /// Product category
    pub category: Option<String>,
    /// Therapy area
    pub therapy: Option<String>,
}

/// Contact details on the Contact Us page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    /// Section heading
    pub heading: String,
    /// Postal address
    pub address: String,
    /// Switchboard number
    pub phone: Option<String>,
    /// General enquiries mailbox
    pub email: Option<String>,
}

/// Strapi pagination metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Number of pages
    pub page_count: u32,
    /// Number of items across all pages
    pub total: u64,
}
