//! About Us and Leadership.

use crate::cms::{CmsRequest, SortDir, StrapiQuery, endpoints};
use crate::content::mappers::{map_about_data, map_leaders_data, map_top_banner_data};

use super::{LeaderSection, Page, PageBuilder, PageContext, Route, Section};

/// Heading of the board section.
pub const BOARD_HEADING: &str = "Board of Directors";
/// Heading of the management section.
pub const MANAGEMENT_HEADING: &str = "Management Team";

/// `/about-us`: banner and introduction.
pub async fn about_us(ctx: &PageContext) -> Page {
    let raw = ctx
        .fetch(CmsRequest::new(endpoints::ABOUT_US).with_query(StrapiQuery::new().populate_all()))
        .await;

    let mut page = PageBuilder::new(ctx, Route::AboutUs);
    page.banner(raw.as_ref().and_then(map_top_banner_data));
    let about = page.or_fallback("about", raw.as_ref().and_then(map_about_data), |c| {
        c.about.clone()
    });
    page.push(Section::AboutIntro(about));
    page.finish()
}

/// `/about-us/leadership`: banner, board of directors, management team.
///
/// Board and management come from one collection but fall back
/// independently, so a CMS with only directors still shows the fallback
/// management team.
pub async fn leadership(ctx: &PageContext) -> Page {
    let banner_request = CmsRequest::new(endpoints::LEADERSHIP_PAGE)
        .with_query(StrapiQuery::new().populate_path(&["TopBanner"]));
    let leaders_request = CmsRequest::new(endpoints::LEADERS).with_query(
        StrapiQuery::new()
            .populate_all()
            .page_size(100)
            .sort("order", SortDir::Asc),
    );
    let (banner_raw, leaders_raw) =
        tokio::join!(ctx.fetch(banner_request), ctx.fetch(leaders_request));

    let mut page = PageBuilder::new(ctx, Route::Leadership);
    page.banner(banner_raw.as_ref().and_then(map_top_banner_data));
    let mapped = leaders_raw
        .as_ref()
        .and_then(map_leaders_data)
        .unwrap_or_default();
    let board = page.or_fallback(
        "board",
        (!mapped.board.is_empty()).then_some(mapped.board),
        |c| c.leaders.board.clone(),
    );
    let management = page.or_fallback(
        "management",
        (!mapped.management.is_empty()).then_some(mapped.management),
        |c| c.leaders.management.clone(),
    );
    page.push(Section::BoardOfDirectors(LeaderSection {
        heading: BOARD_HEADING.to_string(),
        leaders: board,
    }));
    page.push(Section::ManagementTeam(LeaderSection {
        heading: MANAGEMENT_HEADING.to_string(),
        leaders: management,
    }));
    page.finish()
}
