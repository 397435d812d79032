//! Site routes.

use std::fmt;

/// Path prefix of press-release detail pages.
const PRESS_RELEASE_PREFIX: &str = "/media/press-releases/";

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/about-us`
    AboutUs,
    /// `/about-us/leadership`
    Leadership,
    /// `/investors`
    Investors,
    /// `/media`
    Media,
    /// `/media/press-releases`
    PressReleases,
    /// `/media/press-releases/{slug}`
    PressReleaseDetail {
        /// Release slug
        slug: String,
    },
    /// `/media/perspectives`
    Perspectives,
    /// `/media/media-kit`
    MediaKit,
    /// `/our-business`
    OurBusiness,
    /// `/community`
    Community,
    /// `/contact-us`
    ContactUs,
}

/// Every route without a path parameter, in navigation order.
pub static LISTED: [Route; 10] = [
    Route::AboutUs,
    Route::Leadership,
    Route::Investors,
    Route::Media,
    Route::PressReleases,
    Route::Perspectives,
    Route::MediaKit,
    Route::OurBusiness,
    Route::Community,
    Route::ContactUs,
];

impl Route {
    /// Resolves a request path. Trailing slashes, query strings and
    /// fragments are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        if let Some(route) = LISTED.iter().find(|r| r.pattern() == path) {
            return Some(route.clone());
        }
        let slug = path.strip_prefix(PRESS_RELEASE_PREFIX)?;
        if slug.is_empty() || slug.contains('/') {
            return None;
        }
        Some(Self::PressReleaseDetail {
            slug: slug.to_string(),
        })
    }

    /// Path template, used as the metrics label.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        match self {
            Self::AboutUs => "/about-us",
            Self::Leadership => "/about-us/leadership",
            Self::Investors => "/investors",
            Self::Media => "/media",
            Self::PressReleases => "/media/press-releases",
            Self::PressReleaseDetail { .. } => "/media/press-releases/{slug}",
            Self::Perspectives => "/media/perspectives",
            Self::MediaKit => "/media/media-kit",
            Self::OurBusiness => "/our-business",
            Self::Community => "/community",
            Self::ContactUs => "/contact-us",
        }
    }

    /// Concrete request path.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::PressReleaseDetail { slug } => format!("{PRESS_RELEASE_PREFIX}{slug}"),
            other => other.pattern().to_string(),
        }
    }

    /// Key of the route's banner in the fallback catalog.
    #[must_use]
    pub const fn banner_key(&self) -> Option<&'static str> {
        match self {
            Self::AboutUs => Some("about-us"),
            Self::Leadership => Some("leadership"),
            Self::Investors => Some("investors"),
            Self::Media => Some("media"),
            Self::PressReleases => Some("press-releases"),
            Self::PressReleaseDetail { .. } => None,
            Self::Perspectives => Some("perspectives"),
            Self::MediaKit => Some("media-kit"),
            Self::OurBusiness => Some("our-business"),
            Self::Community => Some("community"),
            Self::ContactUs => Some("contact-us"),
        }
    }

    /// Default document title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::AboutUs => "About Us",
            Self::Leadership => "Leadership",
            Self::Investors => "Investors",
            Self::Media => "Media",
            Self::PressReleases | Self::PressReleaseDetail { .. } => "Press Releases",
            Self::Perspectives => "Perspectives",
            Self::MediaKit => "Media Kit",
            Self::OurBusiness => "Our Business",
            Self::Community => "Community",
            Self::ContactUs => "Contact Us",
        }
    }

    /// `true` for the filterable listings.
    #[must_use]
    pub const fn is_listing(&self) -> bool {
        matches!(self, Self::PressReleases | Self::Perspectives | Self::MediaKit)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Suggests the closest known path for a typo.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest_route(input: &str) -> Option<&'static str> {
    let input = input.trim_end_matches('/');
    LISTED
        .iter()
        .map(|r| (r.pattern(), strsim::damerau_levenshtein(input, r.pattern())))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(path, _)| path)
}
