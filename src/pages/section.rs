//! Page sections: the ordered component list a page is made of.

use serde::Serialize;

use crate::contact::ContactFormState;
use crate::content::model::{
    AboutData, BannerData, CardGrid, ContactDetails, DividendData, Leader, MediaKitItem,
    Perspective, PressRelease, Product,
};
use crate::listing::ListView;

/// Heading plus a grid of people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderSection {
    /// Section heading
    pub heading: String,
    /// People in display order
    pub leaders: Vec<Leader>,
}

/// Latest items on the media landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaHighlights {
    /// Newest press releases
    pub press_releases: Vec<PressRelease>,
    /// Newest perspectives
    pub perspectives: Vec<Perspective>,
}

/// The product finder widget and its first page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearch {
    /// Endpoint the widget queries
    pub endpoint: String,
    /// Products shown before any filter is applied
    pub initial: Vec<Product>,
    /// Total number of products
    pub total: u64,
}

/// One component of a page, serialized as `{component, props}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "component", content = "props")]
pub enum Section {
    /// Page hero
    TopBanner(BannerData),
    /// About Us introduction
    AboutIntro(AboutData),
    /// Board of directors grid
    BoardOfDirectors(LeaderSection),
    /// Management team grid
    ManagementTeam(LeaderSection),
    /// Dividend history table
    DividendTable(DividendData),
    /// Media landing highlights
    MediaHighlights(MediaHighlights),
    /// Filterable press-release list
    PressReleaseList(ListView<PressRelease>),
    /// One press release
    PressReleaseDetail(PressRelease),
    /// Filterable perspectives list
    PerspectiveList(ListView<Perspective>),
    /// Filterable media-kit list
    MediaKitList(ListView<MediaKitItem>),
    /// Card grid (business segments, community initiatives)
    CardGrid(CardGrid),
    /// Product finder
    ProductSearch(ProductSearch),
    /// Enquiry form
    ContactForm(ContactFormState),
    /// Address and phone numbers
    ContactDetails(ContactDetails),
}

impl Section {
    /// Component name, as serialized.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TopBanner(_) => "TopBanner",
            Self::AboutIntro(_) => "AboutIntro",
            Self::BoardOfDirectors(_) => "BoardOfDirectors",
            Self::ManagementTeam(_) => "ManagementTeam",
            Self::DividendTable(_) => "DividendTable",
            Self::MediaHighlights(_) => "MediaHighlights",
            Self::PressReleaseList(_) => "PressReleaseList",
            Self::PressReleaseDetail(_) => "PressReleaseDetail",
            Self::PerspectiveList(_) => "PerspectiveList",
            Self::MediaKitList(_) => "MediaKitList",
            Self::CardGrid(_) => "CardGrid",
            Self::ProductSearch(_) => "ProductSearch",
            Self::ContactForm(_) => "ContactForm",
            Self::ContactDetails(_) => "ContactDetails",
        }
    }

    /// `true` when the section has nothing to show and should be omitted.
    ///
    /// Listings, the product finder and the form always render: an empty
    /// listing shows its "no results" message instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::TopBanner(b) => b.title.is_empty() && b.description.is_none() && b.image.is_none(),
            Self::AboutIntro(a) => a.heading.is_empty() && a.description.is_empty(),
            Self::BoardOfDirectors(s) | Self::ManagementTeam(s) => s.leaders.is_empty(),
            Self::DividendTable(d) => d.rows.is_empty(),
            Self::MediaHighlights(h) => h.press_releases.is_empty() && h.perspectives.is_empty(),
            Self::CardGrid(g) => g.cards.is_empty(),
            Self::ContactDetails(c) => c.address.is_empty(),
            Self::PressReleaseList(_)
            | Self::PressReleaseDetail(_)
            | Self::PerspectiveList(_)
            | Self::MediaKitList(_)
            | Self::ProductSearch(_)
            | Self::ContactForm(_) => false,
        }
    }
}

/// An assembled page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Request path
    pub path: String,
    /// Document title
    pub title: String,
    /// Components in display order
    pub sections: Vec<Section>,
    /// Sections served from fallback content
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<&'static str>,
}

impl Page {
    /// First section with the given component name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Component names in display order.
    #[must_use]
    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(Section::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::DividendRow;

    #[test]
    fn serializes_component_and_props() {
        let section = Section::TopBanner(BannerData {
            title: "About Us".into(),
            ..BannerData::default()
        });
        let v = serde_json::to_value(&section).unwrap();
        assert_eq!(v["component"], "TopBanner");
        assert_eq!(v["props"]["title"], "About Us");
        assert_eq!(section.name(), "TopBanner");
    }

    #[test]
    fn emptiness() {
        assert!(Section::TopBanner(BannerData::default()).is_empty());
        assert!(Section::DividendTable(DividendData::default()).is_empty());
        let table = DividendData {
            rows: vec![DividendRow::default()],
            ..DividendData::default()
        };
        assert!(!Section::DividendTable(table).is_empty());
        assert!(!Section::ContactForm(ContactFormState::default()).is_empty());
    }
}
