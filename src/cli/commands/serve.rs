//! `serve` command handler

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::args::ServeArgs;
use crate::cms::HttpCms;
use crate::error::SiteError;
use crate::pages::PageContext;
use crate::server::{self, AppState, parse_bind_addr};

use super::{load_catalog, render_options};

/// Serve the site until `cancel` fires.
///
/// # Errors
///
/// Returns a usage error for an invalid bind address, a config error if
/// the fallback content does not load, or an I/O error if the listener
/// cannot bind.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), SiteError> {
    let config = args.site.to_config();
    config.warn_if_token_missing();
    let bind_addr = parse_bind_addr(&args.bind)?;

    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        info!(port, "Prometheus metrics endpoint started");
    }

    let catalog = load_catalog(args.site.fallbacks.as_deref())?;
    let cms = HttpCms::new(config.http_cms_config())?;
    let pages = PageContext {
        cms: Arc::new(cms),
        catalog,
        revalidate: config.revalidate,
    };
    let state = Arc::new(AppState::new(pages, render_options(&config)));

    let (handle, bound_addr) = server::bind(&bind_addr, state, cancel).await?;
    info!(
        %bound_addr,
        cms = %config.cms_url,
        environment = %config.environment,
        "serving site"
    );

    handle
        .await
        .map_err(|e| SiteError::Io(std::io::Error::other(e.to_string())))
}
