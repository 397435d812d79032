//! Our Business and Community.

use crate::cms::{CmsRequest, StrapiQuery, endpoints};
use crate::content::mappers::{
    map_business_segments, map_community_initiatives, map_top_banner_data,
};
use crate::products::{ProductQuery, search_products};

use super::{Page, PageBuilder, PageContext, ProductSearch, Route, Section};

/// Path of the product search endpoint served by this site.
pub const PRODUCT_SEARCH_ENDPOINT: &str = "/api/products";

/// `/our-business`: banner, business segments and the product finder with
/// its first page of results.
pub async fn our_business(ctx: &PageContext) -> Page {
    let query = ProductQuery::default();
    let (raw, products) = tokio::join!(
        ctx.fetch(
            CmsRequest::new(endpoints::OUR_BUSINESS).with_query(StrapiQuery::new().populate_all())
        ),
        search_products(ctx.cms.as_ref(), &query, ctx.revalidate),
    );

    let mut page = PageBuilder::new(ctx, Route::OurBusiness);
    page.banner(raw.as_ref().and_then(map_top_banner_data));
    let segments = page.or_fallback("business", raw.as_ref().and_then(map_business_segments), |c| {
        c.business.clone()
    });
    page.push(Section::CardGrid(segments));
    page.push(Section::ProductSearch(ProductSearch {
        endpoint: PRODUCT_SEARCH_ENDPOINT.to_string(),
        total: products.meta.pagination.total,
        initial: products.data,
    }));
    page.finish()
}

/// `/community`: banner and initiatives.
pub async fn community(ctx: &PageContext) -> Page {
    let raw = ctx
        .fetch(CmsRequest::new(endpoints::COMMUNITY).with_query(StrapiQuery::new().populate_all()))
        .await;

    let mut page = PageBuilder::new(ctx, Route::Community);
    page.banner(raw.as_ref().and_then(map_top_banner_data));
    let initiatives = page.or_fallback(
        "community",
        raw.as_ref().and_then(map_community_initiatives),
        |c| c.community.clone(),
    );
    page.push(Section::CardGrid(initiatives));
    page.finish()
}
