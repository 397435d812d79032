//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check_fallbacks;
pub mod render;
pub mod routes;
pub mod serve;
pub mod version;

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::args::{Cli, Commands};
use crate::config::{CatalogLoader, FallbackCatalog, SiteConfig};
use crate::error::SiteError;
use crate::pages::suggest_route;
use crate::render::RenderOptions;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` fires on SIGINT/SIGTERM; long-running commands shut down
/// gracefully when it does.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), SiteError> {
    match cli.command {
        Commands::Serve(args) => serve::run(&args, cancel).await,
        Commands::Render(args) => render::run(&args).await,
        Commands::Routes(args) => routes::run(&args),
        Commands::CheckFallbacks(args) => check_fallbacks::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads the fallback catalog, logging every validation warning.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Arc<FallbackCatalog>, SiteError> {
    if let Some(path) = path {
        tracing::info!(fallbacks = %path.display(), "loading fallback overrides");
    }
    let result = CatalogLoader::default().load(path)?;
    for warning in &result.warnings {
        warn!(location = %warning.path, "{}", warning.message);
    }
    Ok(result.catalog)
}

/// Document settings derived from the site configuration.
pub(crate) fn render_options(config: &SiteConfig) -> RenderOptions {
    RenderOptions {
        cms_base: config.cms_url.clone(),
        site_url: config.site_url.clone(),
        ..RenderOptions::default()
    }
}

/// Usage error for a path that matches no route, with a suggestion when
/// a known path is close.
pub(crate) fn unknown_route(path: &str) -> SiteError {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    match suggest_route(bare) {
        Some(suggestion) => SiteError::Usage(format!(
            "unknown route '{bare}'; did you mean '{suggestion}'?"
        )),
        None => SiteError::Usage(format!(
            "unknown route '{bare}'; run `pharmasite routes` to list them"
        )),
    }
}
