//! Page assembly: fetch, map, fall back, compose.
//!
//! Each route has one assembler. It fetches the content types it needs
//! (independent fetches concurrently), maps every successful response, and
//! substitutes the route's fallback content for any section whose fetch
//! failed or mapped to nothing. A failed fetch never fails the page.

pub mod about;
pub mod business;
pub mod contact;
pub mod investors;
pub mod media;
pub mod route;
pub mod section;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cms::{CmsClient, CmsRequest};
use crate::config::FallbackCatalog;
use crate::contact::ContactFormState;
use crate::content::model::BannerData;
use crate::error::PageError;
use crate::listing::ListQuery;
use crate::observability::metrics::record_fallback;

pub use route::{LISTED, Route, suggest_route};
pub use section::{LeaderSection, MediaHighlights, Page, ProductSearch, Section};

/// Everything an assembler needs.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Content source
    pub cms: Arc<dyn CmsClient>,
    /// Fallback content
    pub catalog: Arc<FallbackCatalog>,
    /// Revalidation window for page fetches
    pub revalidate: Duration,
}

impl PageContext {
    /// Fetches a content type. Failures are logged and become `None`.
    pub async fn fetch(&self, request: CmsRequest) -> Option<Value> {
        let request = if request.revalidate.is_none() {
            request.revalidate(self.revalidate)
        } else {
            request
        };
        match self.cms.get(&request).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(endpoint = %request.endpoint, error = %e, "CMS fetch failed; using fallback content");
                None
            }
        }
    }
}

/// Per-request inputs beyond the route.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Search, year and page of listing routes
    pub list: ListQuery,
    /// Contact form state to show (after a submission)
    pub contact: Option<ContactFormState>,
}

/// Assembles the page for `route`.
///
/// # Errors
///
/// Returns [`PageError::NotFound`] for a press-release slug that resolves
/// neither in the CMS nor in the fallback content.
pub async fn assemble(
    ctx: &PageContext,
    route: &Route,
    request: &PageRequest,
) -> Result<Page, PageError> {
    debug!(route = %route, "assembling page");
    let page = match route {
        Route::AboutUs => about::about_us(ctx).await,
        Route::Leadership => about::leadership(ctx).await,
        Route::Investors => investors::investors(ctx).await,
        Route::Media => media::media(ctx).await,
        Route::PressReleases => media::press_releases(ctx, &request.list).await,
        Route::PressReleaseDetail { slug } => media::press_release_detail(ctx, slug).await?,
        Route::Perspectives => media::perspectives(ctx, &request.list).await,
        Route::MediaKit => media::media_kit(ctx, &request.list).await,
        Route::OurBusiness => business::our_business(ctx).await,
        Route::Community => business::community(ctx).await,
        Route::ContactUs => contact::contact_us(ctx, request.contact.clone()).await,
    };
    Ok(page)
}

/// Collects sections for one page and tracks which came from fallback
/// content.
#[derive(Debug)]
pub(crate) struct PageBuilder {
    route: Route,
    title: String,
    catalog: Arc<FallbackCatalog>,
    sections: Vec<Section>,
    fallbacks: Vec<&'static str>,
}

impl PageBuilder {
    pub(crate) fn new(ctx: &PageContext, route: Route) -> Self {
        Self {
            title: route.title().to_string(),
            route,
            catalog: Arc::clone(&ctx.catalog),
            sections: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    pub(crate) fn catalog(&self) -> &FallbackCatalog {
        &self.catalog
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// `mapped`, or a clone of `fallback` recorded against `section`.
    pub(crate) fn or_fallback<T: Clone>(
        &mut self,
        section: &'static str,
        mapped: Option<T>,
        fallback: impl FnOnce(&FallbackCatalog) -> T,
    ) -> T {
        mapped.unwrap_or_else(|| {
            record_fallback(section);
            self.fallbacks.push(section);
            fallback(&self.catalog)
        })
    }

    /// Looks `section` up in the catalog, recording the fallback only when
    /// the lookup finds something.
    pub(crate) fn find_fallback<T>(
        &mut self,
        section: &'static str,
        lookup: impl FnOnce(&FallbackCatalog) -> Option<T>,
    ) -> Option<T> {
        let found = lookup(&self.catalog)?;
        record_fallback(section);
        self.fallbacks.push(section);
        Some(found)
    }

    /// Pushes the route's banner: `mapped`, else the catalog banner.
    pub(crate) fn banner(&mut self, mapped: Option<BannerData>) {
        let banner = match mapped {
            Some(banner) => Some(banner),
            None => {
                let key = self.route.banner_key();
                let fallback = key.and_then(|k| self.catalog.banner(k)).cloned();
                if fallback.is_some() {
                    record_fallback("banner");
                    self.fallbacks.push("banner");
                }
                fallback
            }
        };
        if let Some(banner) = banner {
            self.push(Section::TopBanner(banner));
        }
    }

    /// Pushes the catalog banner without trying the CMS.
    pub(crate) fn static_banner(&mut self) {
        let banner = self
            .route
            .banner_key()
            .and_then(|k| self.catalog.banner(k))
            .cloned();
        if let Some(banner) = banner {
            self.push(Section::TopBanner(banner));
        }
    }

    /// Appends `section` unless it is empty.
    pub(crate) fn push(&mut self, section: Section) {
        if section.is_empty() {
            debug!(route = %self.route, section = section.name(), "omitting empty section");
            return;
        }
        self.sections.push(section);
    }

    pub(crate) fn finish(self) -> Page {
        Page {
            path: self.route.path(),
            title: self.title,
            sections: self.sections,
            fallbacks: self.fallbacks,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::cms::MemoryCms;
    use crate::config::CatalogLoader;

    pub(crate) fn catalog() -> Arc<FallbackCatalog> {
        CatalogLoader::default().load_embedded().unwrap().catalog
    }

    pub(crate) fn context(cms: MemoryCms) -> PageContext {
        PageContext {
            cms: Arc::new(cms),
            catalog: catalog(),
            revalidate: Duration::from_secs(60),
        }
    }

    pub(crate) fn offline() -> PageContext {
        context(MemoryCms::offline())
    }
}
