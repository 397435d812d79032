//! Page handlers: HTML documents and their JSON view-models.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::PageError;
use crate::listing::ListQuery;
use crate::observability::metrics::record_page_render;
use crate::pages::{self, PageRequest, Route, suggest_route};
use crate::render::{render_not_found, render_page};

use super::SharedState;

/// Metrics label for requests that match no route.
const UNMATCHED: &str = "unmatched";

/// Listing query string: `?q=...&year=...&page=...`.
///
/// Values stay text so a malformed page number falls back to page 1.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Free-text search
    pub q: Option<String>,
    /// Four-digit year
    pub year: Option<String>,
    /// 1-based page
    pub page: Option<String>,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        Self {
            search_query: params.q.unwrap_or_default(),
            selected_year: params.year.map(|y| y.trim().to_string()).unwrap_or_default(),
            current_page: params
                .page
                .and_then(|p| p.trim().parse::<usize>().ok())
                .filter(|p| *p >= 1)
                .unwrap_or(1),
        }
    }
}

fn list_query(params: Result<Query<ListParams>, QueryRejection>) -> ListQuery {
    params.map(|Query(p)| p).unwrap_or_default().into()
}

#[derive(Debug, Serialize)]
struct NotFoundBody<'a> {
    error: &'static str,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'static str>,
}

/// `GET <any site path>`: the rendered page.
pub async fn page_html(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let Some(route) = Route::parse(uri.path()) else {
        return not_found_html(&state, uri.path());
    };
    let request = PageRequest {
        list: list_query(params),
        contact: None,
    };
    render_route(&state, &route, &request).await
}

/// Assembles and renders `route`, mapping failures to error documents.
pub(crate) async fn render_route(
    state: &SharedState,
    route: &Route,
    request: &PageRequest,
) -> Response {
    render_route_with_status(state, route, request, StatusCode::OK).await
}

/// Like [`render_route`], answering a successful render with `status`.
pub(crate) async fn render_route_with_status(
    state: &SharedState,
    route: &Route,
    request: &PageRequest,
    status: StatusCode,
) -> Response {
    let page = match pages::assemble(&state.pages, route, request).await {
        Ok(page) => page,
        Err(PageError::NotFound { path }) => {
            record_page_render(route.pattern(), 404);
            return not_found_html(state, &path);
        }
    };
    if !page.fallbacks.is_empty() {
        debug!(route = %route, fallbacks = ?page.fallbacks, "page served with fallback content");
    }
    match render_page(&page, route, &state.render) {
        Ok(html) => {
            record_page_render(route.pattern(), status.as_u16());
            (status, Html(html)).into_response()
        }
        Err(e) => {
            error!(route = %route, error = %e, "page render failed");
            record_page_render(route.pattern(), 500);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

fn not_found_html(state: &SharedState, path: &str) -> Response {
    if Route::parse(path).is_none() {
        record_page_render(UNMATCHED, 404);
    }
    let html = render_not_found(path, suggest_route(path), &state.render);
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

/// `GET /api/pages/{*path}`: the assembled page as JSON.
pub async fn page_json(
    State(state): State<SharedState>,
    Path(path): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let path = format!("/{}", path.trim_start_matches('/'));
    let Some(route) = Route::parse(&path) else {
        record_page_render(UNMATCHED, 404);
        return not_found_json(&path);
    };
    let request = PageRequest {
        list: list_query(params),
        contact: None,
    };
    match pages::assemble(&state.pages, &route, &request).await {
        Ok(page) => {
            record_page_render(route.pattern(), 200);
            Json(page).into_response()
        }
        Err(PageError::NotFound { path }) => {
            record_page_render(route.pattern(), 404);
            not_found_json(&path)
        }
    }
}

fn not_found_json(path: &str) -> Response {
    let body = NotFoundBody {
        error: "page not found",
        path,
        suggestion: suggest_route(path),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
