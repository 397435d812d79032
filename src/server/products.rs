//! `/api/products` proxy.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use tracing::{debug, warn};

use crate::products::{ProductPage, ProductParams, ProductQuery, search_products};

use super::SharedState;

/// `GET /api/products`: one page of the product finder.
///
/// Always answers 200. A failed CMS call yields an empty page carrying an
/// `error` message, so the client renders "no products" instead of
/// breaking.
pub async fn search(
    State(state): State<SharedState>,
    params: Result<Query<ProductParams>, QueryRejection>,
) -> Json<ProductPage> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(e) => {
            warn!(error = %e, "unreadable product query");
            return Json(ProductPage::failed(&ProductQuery::default()));
        }
    };
    let query = ProductQuery::from(&params);
    debug!(?query, "product search");
    let ctx = &state.pages;
    Json(search_products(ctx.cms.as_ref(), &query, ctx.revalidate).await)
}
