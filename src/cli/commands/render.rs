//! `render` command handler
//!
//! Assembles and renders one page without starting a server. With
//! `--offline` no CMS is contacted and every section comes from the
//! fallback content.

use std::sync::Arc;

use reqwest::Url;
use tokio::io::AsyncWriteExt;

use crate::cli::args::{RenderArgs, RenderFormat};
use crate::cms::{CmsClient, HttpCms, MemoryCms};
use crate::error::SiteError;
use crate::listing::ListQuery;
use crate::pages::{self, PageContext, PageRequest, Route};
use crate::render::render_page;
use crate::server::pages::ListParams;

use super::{load_catalog, render_options, unknown_route};

/// Render one page to stdout or `--output`.
///
/// # Errors
///
/// Returns a usage error for an unknown route, a page error for an
/// unknown press release, or an I/O error if the output cannot be written.
pub async fn run(args: &RenderArgs) -> Result<(), SiteError> {
    let (route, list) = parse_target(&args.path)?;
    let config = args.site.to_config();

    let cms: Arc<dyn CmsClient> = if args.offline {
        Arc::new(MemoryCms::offline())
    } else {
        config.warn_if_token_missing();
        Arc::new(HttpCms::new(config.http_cms_config())?)
    };
    let ctx = PageContext {
        cms,
        catalog: load_catalog(args.site.fallbacks.as_deref())?,
        revalidate: config.revalidate,
    };

    let request = PageRequest {
        list,
        contact: None,
    };
    let page = pages::assemble(&ctx, &route, &request).await?;
    if !page.fallbacks.is_empty() {
        tracing::info!(route = %route, fallbacks = ?page.fallbacks, "rendered with fallback content");
    }

    let mut output = match args.format {
        RenderFormat::Html => render_page(&page, &route, &render_options(&config))?,
        RenderFormat::Json => serde_json::to_string_pretty(&page)?,
    };
    output.push('\n');

    if let Some(path) = &args.output {
        tokio::fs::write(path, output).await?;
    } else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(output.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

/// Splits `/path?q=..&year=..&page=..` into a route and listing query.
fn parse_target(target: &str) -> Result<(Route, ListQuery), SiteError> {
    let target = if target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{target}")
    };
    let url = Url::parse(&format!("http://localhost{target}"))
        .map_err(|e| SiteError::Usage(format!("invalid path '{target}': {e}")))?;
    let route = Route::parse(url.path()).ok_or_else(|| unknown_route(&target))?;

    let mut params = ListParams::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "q" => params.q = Some(value.into_owned()),
            "year" => params.year = Some(value.into_owned()),
            "page" => params.page = Some(value.into_owned()),
            _ => {}
        }
    }
    Ok((route, params.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_with_query() {
        let (route, list) = parse_target("/media/press-releases?q=launch&year=2025&page=2").unwrap();
        assert_eq!(route, Route::PressReleases);
        assert_eq!(list.search_query, "launch");
        assert_eq!(list.selected_year, "2025");
        assert_eq!(list.current_page, 2);
    }

    #[test]
    fn relative_target() {
        let (route, list) = parse_target("investors").unwrap();
        assert_eq!(route, Route::Investors);
        assert_eq!(list, ListQuery::default());
    }

    #[test]
    fn unknown_target() {
        assert!(matches!(parse_target("/careers"), Err(SiteError::Usage(_))));
    }
}
