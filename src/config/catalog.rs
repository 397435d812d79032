//! Fallback content catalog.
//!
//! One entry per page section. Assemblers clone from here whenever the CMS
//! is unreachable or returns nothing usable.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::content::model::{
    AboutData, BannerData, CardGrid, ContactDetails, DividendData, LeadersData, MediaKitItem,
    Perspective, PressRelease,
};
use crate::content::text::{format_date, split_title_into_headline};
use crate::error::{Severity, ValidationIssue};

/// Banner keys every catalog must define, one per bannered page.
pub const BANNER_KEYS: [&str; 10] = [
    "about-us",
    "leadership",
    "investors",
    "media",
    "press-releases",
    "perspectives",
    "media-kit",
    "our-business",
    "community",
    "contact-us",
];

/// Fallback content for every page section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FallbackCatalog {
    /// Top banners keyed by page (see [`BANNER_KEYS`])
    pub banners: BTreeMap<String, BannerData>,
    /// About Us introduction
    pub about: AboutData,
    /// Board of directors and management team
    pub leaders: LeadersData,
    /// Dividend history table
    pub dividends: DividendData,
    /// Press releases, newest first
    pub press_releases: Vec<PressRelease>,
    /// Perspectives, newest first
    pub perspectives: Vec<Perspective>,
    /// Media kit downloads
    pub media_kit: Vec<MediaKitItem>,
    /// Business segments grid
    pub business: CardGrid,
    /// Community initiatives grid
    pub community: CardGrid,
    /// Contact Us details
    pub contact: ContactDetails,
}

impl FallbackCatalog {
    /// Banner for `key`, if the catalog defines one.
    #[must_use]
    pub fn banner(&self, key: &str) -> Option<&BannerData> {
        self.banners.get(key)
    }

    /// Press release with the given slug.
    #[must_use]
    pub fn press_release(&self, slug: &str) -> Option<&PressRelease> {
        self.press_releases.iter().find(|r| r.slug == slug)
    }

    /// Fills display fields the YAML leaves out: headlines and long-form
    /// dates.
    pub fn normalize(&mut self) {
        for release in &mut self.press_releases {
            if release.headline.is_empty() {
                release.headline = split_title_into_headline(&release.title);
            }
            if release.date.is_empty() {
                release.date = format_date(release.published_on.as_deref());
            }
        }
        for perspective in &mut self.perspectives {
            if perspective.date.is_empty() {
                perspective.date = format_date(perspective.published_on.as_deref());
            }
        }
        for item in &mut self.media_kit {
            if item.date.is_empty() {
                item.date = format_date(item.published_on.as_deref());
            }
        }
    }

    /// Checks the catalog, collecting every issue rather than stopping at
    /// the first.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut v = CatalogValidator::default();
        v.banners(&self.banners);
        v.require(&self.about.heading, "about.heading");
        v.leaders(&self.leaders);
        v.dividends(&self.dividends);
        v.press_releases(&self.press_releases);
        v.slugs(
            "perspectives",
            self.perspectives.iter().map(|p| (p.title.as_str(), p.slug.as_str())),
        );
        v.slugs(
            "media_kit",
            self.media_kit.iter().map(|m| (m.title.as_str(), m.slug.as_str())),
        );
        v.card_grid(&self.business, "business");
        v.card_grid(&self.community, "community");
        v.require(&self.contact.address, "contact.address");
        v.issues
    }
}

#[derive(Default)]
struct CatalogValidator {
    issues: Vec<ValidationIssue>,
}

impl CatalogValidator {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>, severity: Severity) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity,
        });
    }

    fn require(&mut self, value: &str, path: &str) {
        if value.trim().is_empty() {
            self.push(path, "must not be empty", Severity::Error);
        }
    }

    fn banners(&mut self, banners: &BTreeMap<String, BannerData>) {
        for key in BANNER_KEYS {
            match banners.get(key) {
                None => self.push(format!("banners.{key}"), "missing banner", Severity::Error),
                Some(b) => {
                    self.require(&b.title, &format!("banners.{key}.title"));
                    if b.image.is_none() {
                        self.push(
                            format!("banners.{key}.image"),
                            "banner has no image",
                            Severity::Warning,
                        );
                    }
                }
            }
        }
        for key in banners.keys() {
            if !BANNER_KEYS.contains(&key.as_str()) {
                self.push(
                    format!("banners.{key}"),
                    "unknown banner key is never shown",
                    Severity::Warning,
                );
            }
        }
    }

    fn leaders(&mut self, leaders: &LeadersData) {
        for (group, people) in [("board", &leaders.board), ("management", &leaders.management)] {
            if people.is_empty() {
                self.push(format!("leaders.{group}"), "must list at least one person", Severity::Error);
            }
            for (i, person) in people.iter().enumerate() {
                self.require(&person.name, &format!("leaders.{group}[{i}].name"));
            }
        }
    }

    fn dividends(&mut self, dividends: &DividendData) {
        if dividends.rows.is_empty() {
            self.push("dividends.rows", "dividend table is empty", Severity::Warning);
        }
        for (i, row) in dividends.rows.iter().enumerate() {
            self.require(&row.financial_year, &format!("dividends.rows[{i}].financialYear"));
        }
    }

    fn press_releases(&mut self, releases: &[PressRelease]) {
        self.slugs(
            "press_releases",
            releases.iter().map(|r| (r.title.as_str(), r.slug.as_str())),
        );
        for (i, release) in releases.iter().enumerate() {
            if release.published_on.is_none() {
                self.push(
                    format!("press_releases[{i}].publishedOn"),
                    "undated release is excluded by every year filter",
                    Severity::Warning,
                );
            }
        }
    }

    fn slugs<'a>(&mut self, list: &str, items: impl Iterator<Item = (&'a str, &'a str)>) {
        let mut seen = HashSet::new();
        for (i, (title, slug)) in items.enumerate() {
            self.require(title, &format!("{list}[{i}].title"));
            self.require(slug, &format!("{list}[{i}].slug"));
            if !slug.is_empty() && !seen.insert(slug) {
                self.push(
                    format!("{list}[{i}].slug"),
                    format!("duplicate slug '{slug}'"),
                    Severity::Error,
                );
            }
        }
    }

    fn card_grid(&mut self, grid: &CardGrid, path: &str) {
        self.require(&grid.heading, &format!("{path}.heading"));
        for (i, card) in grid.cards.iter().enumerate() {
            self.require(&card.title, &format!("{path}.cards[{i}].title"));
        }
    }
}
