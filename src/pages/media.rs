//! Media: landing page, press releases, perspectives and media kit.
//!
//! Listings fetch the whole collection once and filter, search and page it
//! in memory.

use crate::cms::{CmsRequest, FilterOp, SortDir, StrapiQuery, endpoints};
use crate::content::mappers::{
    find_press_release, map_media_kit, map_perspectives, map_press_releases, map_top_banner_data,
};
use crate::error::PageError;
use crate::listing::{
    ListQuery, MEDIA_KIT_PAGE_SIZE, PERSPECTIVE_PAGE_SIZE, PRESS_RELEASE_PAGE_SIZE, paginate,
};

use super::{MediaHighlights, Page, PageBuilder, PageContext, Route, Section};

/// Items per kind on the media landing page.
pub const HIGHLIGHT_COUNT: u32 = 3;

/// Upper bound on a listing fetch.
const LISTING_FETCH_SIZE: u32 = 100;

fn newest_first(endpoint: &str, limit: u32) -> CmsRequest {
    CmsRequest::new(endpoint).with_query(
        StrapiQuery::new()
            .populate_all()
            .page_size(limit)
            .sort("publishedOn", SortDir::Desc),
    )
}

/// Filters an empty mapped list to `None` so the fallback applies.
fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

/// `/media`: banner plus the newest press releases and perspectives.
pub async fn media(ctx: &PageContext) -> Page {
    let (banner_raw, releases_raw, perspectives_raw) = tokio::join!(
        ctx.fetch(CmsRequest::new(endpoints::MEDIA).with_query(StrapiQuery::new().populate_all())),
        ctx.fetch(newest_first(endpoints::PRESS_RELEASES, HIGHLIGHT_COUNT)),
        ctx.fetch(newest_first(endpoints::PERSPECTIVES, HIGHLIGHT_COUNT)),
    );

    let mut page = PageBuilder::new(ctx, Route::Media);
    page.banner(banner_raw.as_ref().and_then(map_top_banner_data));

    let mut press_releases = page.or_fallback(
        "press_releases",
        releases_raw.as_ref().map(map_press_releases).and_then(non_empty),
        |c| c.press_releases.clone(),
    );
    press_releases.truncate(HIGHLIGHT_COUNT as usize);
    let mut perspectives = page.or_fallback(
        "perspectives",
        perspectives_raw.as_ref().map(map_perspectives).and_then(non_empty),
        |c| c.perspectives.clone(),
    );
    perspectives.truncate(HIGHLIGHT_COUNT as usize);

    page.push(Section::MediaHighlights(MediaHighlights {
        press_releases,
        perspectives,
    }));
    page.finish()
}

/// `/media/press-releases`: banner and the filterable list.
pub async fn press_releases(ctx: &PageContext, query: &ListQuery) -> Page {
    let raw = ctx
        .fetch(newest_first(endpoints::PRESS_RELEASES, LISTING_FETCH_SIZE))
        .await;

    let mut page = PageBuilder::new(ctx, Route::PressReleases);
    page.static_banner();
    let items = page.or_fallback(
        "press_releases",
        raw.as_ref().map(map_press_releases).and_then(non_empty),
        |c| c.press_releases.clone(),
    );
    page.push(Section::PressReleaseList(paginate(
        &items,
        query,
        PRESS_RELEASE_PAGE_SIZE,
    )));
    page.finish()
}

/// `/media/press-releases/{slug}`.
///
/// # Errors
///
/// [`PageError::NotFound`] when the slug is in neither the CMS nor the
/// fallback content.
pub async fn press_release_detail(ctx: &PageContext, slug: &str) -> Result<Page, PageError> {
    let request = CmsRequest::new(endpoints::PRESS_RELEASES).with_query(
        StrapiQuery::new()
            .populate_all()
            .filter(&["slug"], FilterOp::Eq, slug),
    );
    let raw = ctx.fetch(request).await;

    let route = Route::PressReleaseDetail {
        slug: slug.to_string(),
    };
    let path = route.path();
    let mut page = PageBuilder::new(ctx, route);
    let mapped = raw.as_ref().and_then(|r| find_press_release(r, slug));
    let release = match mapped {
        Some(release) => release,
        None => page
            .find_fallback("press_release", |c| c.press_release(slug).cloned())
            .ok_or(PageError::NotFound { path })?,
    };

    page.set_title(release.title.clone());
    page.push(Section::PressReleaseDetail(release));
    Ok(page.finish())
}

/// `/media/perspectives`: banner and the filterable list.
pub async fn perspectives(ctx: &PageContext, query: &ListQuery) -> Page {
    let raw = ctx
        .fetch(newest_first(endpoints::PERSPECTIVES, LISTING_FETCH_SIZE))
        .await;

    let mut page = PageBuilder::new(ctx, Route::Perspectives);
    page.static_banner();
    let items = page.or_fallback(
        "perspectives",
        raw.as_ref().map(map_perspectives).and_then(non_empty),
        |c| c.perspectives.clone(),
    );
    page.push(Section::PerspectiveList(paginate(
        &items,
        query,
        PERSPECTIVE_PAGE_SIZE,
    )));
    page.finish()
}

/// `/media/media-kit`: banner and the filterable list.
pub async fn media_kit(ctx: &PageContext, query: &ListQuery) -> Page {
    let raw = ctx
        .fetch(newest_first(endpoints::MEDIA_KITS, LISTING_FETCH_SIZE))
        .await;

    let mut page = PageBuilder::new(ctx, Route::MediaKit);
    page.static_banner();
    let items = page.or_fallback(
        "media_kit",
        raw.as_ref().map(map_media_kit).and_then(non_empty),
        |c| c.media_kit.clone(),
    );
    page.push(Section::MediaKitList(paginate(
        &items,
        query,
        MEDIA_KIT_PAGE_SIZE,
    )));
    page.finish()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, offline};
    use super::*;
    use crate::cms::MemoryCms;
    use crate::listing::NO_RESULTS_MESSAGE;
    use serde_json::json;

    fn releases(n: usize) -> serde_json::Value {
        let data: Vec<_> = (0..n)
            .map(|i| {
                json!({"id": i, "attributes": {
                    "title": format!("Release number {i}"),
                    "slug": format!("release-{i}"),
                    "publishedOn": format!("2025-01-{:02}", i + 1)
                }})
            })
            .collect();
        json!({ "data": data })
    }

    #[tokio::test]
    async fn landing_truncates_highlights() {
        let cms = MemoryCms::offline().with_response(endpoints::PRESS_RELEASES, releases(5));
        let page = media(&context(cms)).await;
        let Some(Section::MediaHighlights(h)) = page.section("MediaHighlights") else {
            panic!("missing highlights");
        };
        assert_eq!(h.press_releases.len(), HIGHLIGHT_COUNT as usize);
        assert_eq!(h.perspectives.len(), 2);
        assert_eq!(page.fallbacks, vec!["banner", "perspectives"]);
    }

    #[tokio::test]
    async fn list_paginates_cms_items() {
        let cms = MemoryCms::offline().with_response(endpoints::PRESS_RELEASES, releases(8));
        let query = ListQuery {
            current_page: 2,
            ..ListQuery::default()
        };
        let page = press_releases(&context(cms), &query).await;
        let Some(Section::PressReleaseList(view)) = page.section("PressReleaseList") else {
            panic!("missing list");
        };
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].headline, vec!["Release", "number", "6"]);
    }

    #[tokio::test]
    async fn list_requests_newest_first() {
        let cms = std::sync::Arc::new(MemoryCms::offline());
        let ctx = super::super::PageContext {
            cms: cms.clone(),
            ..offline()
        };
        let _ = press_releases(&ctx, &ListQuery::default()).await;
        let q = cms.requests()[0].query.to_display_string();
        assert!(q.contains("sort=publishedOn:desc"), "{q}");
        assert!(q.contains("pagination[pageSize]=100"), "{q}");
    }

    #[tokio::test]
    async fn list_search_without_match() {
        let query = ListQuery {
            search_query: "nothing like this".into(),
            ..ListQuery::default()
        };
        let page = press_releases(&offline(), &query).await;
        let Some(Section::PressReleaseList(view)) = page.section("PressReleaseList") else {
            panic!("missing list");
        };
        assert!(view.items.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn detail_from_cms() {
        let cms = MemoryCms::offline().with_response(endpoints::PRESS_RELEASES, releases(3));
        let page = press_release_detail(&context(cms), "release-1").await.unwrap();
        assert_eq!(page.title, "Release number 1");
        assert!(page.fallbacks.is_empty());
    }

    #[tokio::test]
    async fn detail_falls_back_to_catalog() {
        let page = press_release_detail(&offline(), "biosimilar-launch-europe")
            .await
            .unwrap();
        assert_eq!(page.title, "Company Launches Biosimilar in Europe");
        assert_eq!(page.fallbacks, vec!["press_release"]);
    }

    #[tokio::test]
    async fn perspectives_and_media_kit_offline() {
        let ctx = offline();
        let page = perspectives(&ctx, &ListQuery::default()).await;
        assert_eq!(page.section_names(), vec!["TopBanner", "PerspectiveList"]);
        let page = media_kit(&ctx, &ListQuery::default()).await;
        let Some(Section::MediaKitList(view)) = page.section("MediaKitList") else {
            panic!("missing list");
        };
        assert_eq!(view.total_items, 2);
    }
}
