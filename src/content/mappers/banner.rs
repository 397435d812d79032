//! Top banner mapper, shared by every page with a hero.

use serde_json::Value;

use crate::content::model::{BannerData, Link};
use crate::content::probe::{self, Precedence};

/// Single-type pages were authored against the legacy schema first.
const PRECEDENCE: Precedence = Precedence::AttributesFirst;

const BANNER_KEYS: [&str; 4] = ["TopBanner", "topBanner", "Banner", "banner"];

/// Maps `{data: {[attributes:] {TopBanner: {...}}}}` to a [`BannerData`].
///
/// Returns `None` when the banner component is absent or carries neither a
/// title, a description nor an image.
#[must_use]
pub fn map_top_banner_data(raw: &Value) -> Option<BannerData> {
    let entity = probe::single(raw)?;
    let component = probe::field_any(entity, &BANNER_KEYS, PRECEDENCE)?;
    let component = match component {
        Value::Array(items) => items.first()?,
        other => other,
    };
    banner_from_component(component)
}

/// Maps a bare banner component object.
#[must_use]
pub fn banner_from_component(component: &Value) -> Option<BannerData> {
    let p = Precedence::FlatFirst;
    let banner = BannerData {
        title: probe::text(component, &["Title", "Heading", "title", "heading"], p)
            .unwrap_or_default(),
        subtitle: probe::text(
            component,
            &["SubTitle", "Subtitle", "SubHeading", "subtitle", "subHeading"],
            p,
        ),
        description: probe::text(component, &["Description", "description"], p),
        image: probe::media(
            component,
            &["DesktopImage", "Image", "BannerImage", "desktopImage", "image"],
            p,
        ),
        mobile_image: probe::media(component, &["MobileImage", "mobileImage"], p),
        cta: cta(component),
    };

    if banner.title.is_empty() && banner.description.is_none() && banner.image.is_none() {
        return None;
    }
    Some(banner)
}

fn cta(component: &Value) -> Option<Link> {
    let p = Precedence::FlatFirst;
    if let Some(link) = probe::field_any(component, &["Cta", "CTA", "cta", "Button"], p) {
        let label = probe::text(link, &["Label", "Text", "label", "text"], p)?;
        let href = probe::text(link, &["Url", "URL", "Link", "url", "href"], p)?;
        return Some(Link { label, href });
    }
    let label = probe::text(component, &["CtaLabel", "ctaLabel"], p)?;
    let href = probe::text(component, &["CtaLink", "CtaUrl", "ctaLink"], p)?;
    Some(Link { label, href })
}
