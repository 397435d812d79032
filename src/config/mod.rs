//! Site configuration and the fallback content catalog.
//!
//! Runtime settings come from CLI flags and their environment bindings;
//! fallback content is YAML, embedded at build time and optionally
//! overridden by an operator file, parsed and validated once at startup.

pub mod catalog;
pub mod loader;

use std::time::Duration;

use tracing::warn;

use crate::cms::HttpCmsConfig;

pub use catalog::FallbackCatalog;
pub use loader::{CatalogLoader, LoadResult, LoaderLimits};

/// Reads and parses an environment variable, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Environment name that tolerates a missing CMS token.
pub const DEVELOPMENT: &str = "development";

/// Runtime settings shared by every request.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// CMS origin, e.g. `https://cms.example.com`
    pub cms_url: String,
    /// Read token for the CMS API
    pub cms_token: Option<String>,
    /// Public origin of this site, used for canonical links
    pub site_url: String,
    /// Default revalidation window for CMS reads
    pub revalidate: Duration,
    /// Deployment environment (`development`, `staging`, `production`)
    pub environment: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cms_url: "http://localhost:1337".to_string(),
            cms_token: None,
            site_url: "http://localhost:3000".to_string(),
            revalidate: Duration::from_secs(60),
            environment: DEVELOPMENT.to_string(),
        }
    }
}

impl SiteConfig {
    /// `true` in the development environment.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEVELOPMENT)
    }

    /// Logs a warning when no CMS token is configured outside development.
    /// Returns whether the warning fired.
    pub fn warn_if_token_missing(&self) -> bool {
        let missing = self.cms_token.as_deref().is_none_or(str::is_empty);
        if missing && !self.is_development() {
            warn!(
                environment = %self.environment,
                "no CMS token configured; requests will be unauthenticated"
            );
            return true;
        }
        false
    }

    /// Client settings for [`HttpCms`](crate::cms::HttpCms).
    #[must_use]
    pub fn http_cms_config(&self) -> HttpCmsConfig {
        HttpCmsConfig {
            base_url: self.cms_url.clone(),
            token: self.cms_token.clone(),
            default_revalidate: self.revalidate,
            max_cached_responses: env_or(
                crate::cms::http::MAX_CACHED_RESPONSES_ENV,
                crate::cms::http::DEFAULT_MAX_CACHED_RESPONSES,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_warns_outside_development() {
        let config = SiteConfig {
            environment: "production".into(),
            ..SiteConfig::default()
        };
        assert!(config.warn_if_token_missing());
    }

    #[test]
    fn development_tolerates_missing_token() {
        assert!(!SiteConfig::default().warn_if_token_missing());
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let config = SiteConfig {
            cms_token: Some(String::new()),
            environment: "staging".into(),
            ..SiteConfig::default()
        };
        assert!(config.warn_if_token_missing());
    }

    #[test]
    fn http_config_carries_settings() {
        let config = SiteConfig {
            cms_token: Some("t0k3n".into()),
            revalidate: Duration::from_secs(5),
            ..SiteConfig::default()
        };
        let http = config.http_cms_config();
        assert_eq!(http.base_url, "http://localhost:1337");
        assert_eq!(http.token.as_deref(), Some("t0k3n"));
        assert_eq!(http.default_revalidate, Duration::from_secs(5));
    }
}
