//! HTTP surface of the site.
//!
//! Serves the rendered pages, their JSON view-models under `/api/pages`,
//! the `/api/products` proxy and the Contact Us form post. Every handler
//! shares one [`AppState`]; the CMS client inside it is the only I/O.

pub mod contact;
pub mod pages;
pub mod products;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::SiteError;
use crate::pages::PageContext;
use crate::render::RenderOptions;

/// Default request body limit (64 KiB). Contact submissions are the only
/// bodies the site accepts.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_BODY_SIZE`].
pub const MAX_BODY_SIZE_ENV: &str = "PHARMASITE_MAX_BODY_SIZE";

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// CMS client, fallback catalog and revalidation window
    pub pages: PageContext,
    /// Document-level rendering settings
    pub render: RenderOptions,
    /// Largest accepted request body in bytes
    pub max_body_size: usize,
}

impl AppState {
    /// State with the body limit taken from the environment.
    #[must_use]
    pub fn new(pages: PageContext, render: RenderOptions) -> Self {
        Self {
            pages,
            render,
            max_body_size: crate::config::env_or(MAX_BODY_SIZE_ENV, DEFAULT_MAX_BODY_SIZE),
        }
    }
}

/// Handle to shared state.
pub type SharedState = Arc<AppState>;

/// Builds the axum router.
pub fn build_router(state: SharedState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_size);

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/about-us") }))
        .route("/health", get(|| async { "ok" }))
        .route("/api/products", get(products::search))
        .route("/api/pages/{*path}", get(pages::page_json))
        .route("/contact-us", get(pages::page_html).post(contact::submit))
        .fallback(pages::page_html)
        .layer(body_limit)
        .with_state(state)
}

/// Binds `bind_addr` and serves until `cancel` fires.
///
/// Returns the server task and the actual bound address (useful when
/// binding to port 0 in tests).
///
/// # Errors
///
/// Returns [`SiteError::Io`] if the listener cannot bind.
pub async fn bind(
    bind_addr: &str,
    state: SharedState,
    cancel: CancellationToken,
) -> Result<(JoinHandle<()>, SocketAddr), SiteError> {
    let listener = TcpListener::bind(bind_addr).await?;
    let bound_addr = listener.local_addr()?;

    let service = build_router(state).into_make_service_with_connect_info::<SocketAddr>();
    let handle = tokio::spawn(async move {
        info!(%bound_addr, "site server started");
        axum::serve(listener, service)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await
            .ok();
        debug!("site server shut down");
    });

    Ok((handle, bound_addr))
}

/// Parses a bind address string into a full `host:port` form.
///
/// Accepts:
/// - `:3000` → `0.0.0.0:3000`
/// - `3000` → `0.0.0.0:3000`
/// - `127.0.0.1:3000` → as-is
///
/// # Errors
///
/// Returns [`SiteError::Usage`] if the result is not a socket address.
pub fn parse_bind_addr(input: &str) -> Result<String, SiteError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| SiteError::Usage(format!("invalid bind address \"{input}\": {e}")))?;
    Ok(addr)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::cms::MemoryCms;
    use axum::extract::connect_info::MockConnectInfo;

    pub(crate) fn state(cms: MemoryCms) -> SharedState {
        Arc::new(AppState {
            pages: crate::pages::test_support::context(cms),
            render: RenderOptions::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        })
    }

    /// Router with `ConnectInfo` support.
    pub(crate) fn router(cms: MemoryCms) -> Router {
        build_router(state(cms)).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9999))))
    }

    pub(crate) async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::router;
    use super::*;
    use crate::cms::MemoryCms;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::util::ServiceExt;

    #[test]
    fn parse_bind_addr_colon_port() {
        assert_eq!(parse_bind_addr(":3000").unwrap(), "0.0.0.0:3000");
    }

    #[test]
    fn parse_bind_addr_port_only() {
        assert_eq!(parse_bind_addr("3000").unwrap(), "0.0.0.0:3000");
    }

    #[test]
    fn parse_bind_addr_full() {
        assert_eq!(parse_bind_addr("127.0.0.1:8080").unwrap(), "127.0.0.1:8080");
    }

    #[test]
    fn parse_bind_addr_invalid() {
        assert!(matches!(
            parse_bind_addr("not-an-address"),
            Err(SiteError::Usage(_))
        ));
    }

    #[tokio::test]
    async fn root_redirects_to_about() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = router(MemoryCms::offline()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()[header::LOCATION], "/about-us");
    }

    #[tokio::test]
    async fn health() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = router(MemoryCms::offline()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bind_serves_and_shuts_down() {
        let cancel = CancellationToken::new();
        let state = super::test_support::state(MemoryCms::offline());
        let (handle, addr) = bind("127.0.0.1:0", state, cancel.clone()).await.unwrap();
        assert_ne!(addr.port(), 0);

        let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        cancel.cancel();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
