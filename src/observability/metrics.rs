//! Prometheus metrics.
//!
//! Label values that come from request input (endpoints, routes) are
//! checked against known lists so a crawler cannot blow up cardinality.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::cms::endpoints;
use crate::error::SiteError;

/// Guard against double-installing the recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

const UNKNOWN: &str = "__unknown__";

/// Section names recorded by the fallback counter.
const KNOWN_SECTIONS: [&str; 12] = [
    "about",
    "banner",
    "board",
    "business",
    "community",
    "contact",
    "dividends",
    "management",
    "media_kit",
    "perspectives",
    "press_release",
    "press_releases",
];

/// Returns `endpoint` when it is a known CMS content type, else `"__unknown__"`.
#[must_use]
pub fn sanitize_endpoint_label(endpoint: &str) -> &str {
    if endpoints::ALL.contains(&endpoint) {
        endpoint
    } else {
        UNKNOWN
    }
}

/// Returns `section` when it is a known page section, else `"__unknown__"`.
#[must_use]
pub fn sanitize_section_label(section: &str) -> &str {
    if KNOWN_SECTIONS.contains(&section) {
        section
    } else {
        UNKNOWN
    }
}

/// Installs the global recorder.
///
/// With `port`, a Prometheus listener is bound on `127.0.0.1:<port>`;
/// without, metrics are recorded but not exported.
///
/// # Errors
///
/// Returns `SiteError::Io` if the recorder or listener cannot be installed.
pub fn init_metrics(port: Option<u16>) -> Result<(), SiteError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| SiteError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

fn describe_metrics() {
    describe_counter!(
        "pharmasite_cms_requests_total",
        "CMS fetches by endpoint and outcome"
    );
    describe_histogram!(
        "pharmasite_cms_request_duration_seconds",
        "CMS fetch latency in seconds"
    );
    describe_counter!(
        "pharmasite_fallback_used_total",
        "Sections rendered from fallback content"
    );
    describe_counter!(
        "pharmasite_page_renders_total",
        "Page renders by route and status"
    );
}

/// Records one CMS fetch. `outcome` is `"ok"`, `"cached"` or a
/// [`CmsError::outcome`](crate::error::CmsError::outcome) label.
pub fn record_cms_request(endpoint: &str, outcome: &'static str, elapsed: Duration) {
    let label = sanitize_endpoint_label(endpoint).to_owned();
    counter!(
        "pharmasite_cms_requests_total",
        "endpoint" => label.clone(),
        "outcome" => outcome,
    )
    .increment(1);
    histogram!("pharmasite_cms_request_duration_seconds", "endpoint" => label)
        .record(elapsed.as_secs_f64());
}

/// Records a section served from fallback content.
pub fn record_fallback(section: &str) {
    counter!(
        "pharmasite_fallback_used_total",
        "section" => sanitize_section_label(section).to_owned()
    )
    .increment(1);
}

/// Records a page render. `route` must already be a known route path.
pub fn record_page_render(route: &'static str, status: u16) {
    counter!(
        "pharmasite_page_renders_total",
        "route" => route,
        "status" => status.to_string(),
    )
    .increment(1);
}
