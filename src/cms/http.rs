//! Live CMS client over HTTP.
//!
//! Requests go to `{base_url}/api/{endpoint}` with an optional bearer token.
//! A successful response is kept for its revalidation window and served
//! from memory until the window elapses, which mirrors the
//! revalidate-by-seconds hint the pages were written against.
//!
//! Cache keys carry visitor input (product searches, press-release slugs),
//! so the map is bounded: stale entries are swept once it fills, and the
//! oldest entry goes when everything left is still fresh.

use std::time::Duration;

use dashmap::DashMap;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::{CmsClient, CmsRequest, strapi_error_message};
use crate::error::CmsError;
use crate::observability::metrics::record_cms_request;

/// Default bound on remembered responses.
pub const DEFAULT_MAX_CACHED_RESPONSES: usize = 1024;

/// Environment variable overriding [`DEFAULT_MAX_CACHED_RESPONSES`].
pub const MAX_CACHED_RESPONSES_ENV: &str = "PHARMASITE_CMS_CACHE_ENTRIES";

/// Settings for [`HttpCms`].
#[derive(Debug, Clone)]
pub struct HttpCmsConfig {
    /// CMS origin, e.g. `https://cms.example.com`
    pub base_url: String,
    /// Bearer token sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
    /// Revalidation window applied when a request does not set one.
    /// Zero disables response reuse.
    pub default_revalidate: Duration,
    /// Most responses kept at once. Zero disables response reuse.
    pub max_cached_responses: usize,
}

#[derive(Debug, Clone)]
struct CachedResponse {
    fetched_at: Instant,
    window: Duration,
    body: Value,
}

impl CachedResponse {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.fetched_at) < self.window
    }
}

/// HTTP implementation of [`CmsClient`].
pub struct HttpCms {
    client: reqwest::Client,
    config: HttpCmsConfig,
    responses: DashMap<String, CachedResponse>,
}

impl HttpCms {
    /// Builds a client for the given CMS.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::InvalidUrl`] if `base_url` is not an absolute
    /// URL, or [`CmsError::Network`] if the HTTP client cannot be built.
    pub fn new(config: HttpCmsConfig) -> Result<Self, CmsError> {
        Url::parse(&config.base_url)
            .map_err(|e| CmsError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config,
            responses: DashMap::new(),
        })
    }

    /// Full URL for a request, query parameters percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::InvalidUrl`] if the joined URL does not parse.
    pub fn request_url(&self, request: &CmsRequest) -> Result<Url, CmsError> {
        let raw = format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            request.endpoint.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| CmsError::InvalidUrl(format!("{raw}: {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.pairs());
        }
        Ok(url)
    }

    /// Number of responses currently remembered.
    #[must_use]
    pub fn cached_responses(&self) -> usize {
        self.responses.len()
    }

    /// Stores `entry`, making room first when the map is full.
    fn remember(&self, key: String, entry: CachedResponse) {
        let limit = self.config.max_cached_responses;
        if limit == 0 {
            return;
        }
        if self.responses.len() >= limit && !self.responses.contains_key(&key) {
            let now = entry.fetched_at;
            self.responses.retain(|_, e| e.is_fresh(now));
            while self.responses.len() >= limit {
                let oldest = self
                    .responses
                    .iter()
                    .min_by_key(|e| e.fetched_at)
                    .map(|e| e.key().clone());
                let Some(oldest) = oldest else { break };
                self.responses.remove(&oldest);
            }
            trace!(remaining = self.responses.len(), "evicted CMS responses");
        }
        self.responses.insert(key, entry);
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.token.as_deref() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn fetch(&self, request: &CmsRequest, url: Url) -> Result<Value, CmsError> {
        let response = self.authorize(self.client.get(url)).send().await?;
        read_json(&request.endpoint, response).await
    }
}

impl std::fmt::Debug for HttpCms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCms")
            .field("base_url", &self.config.base_url)
            .field("has_token", &self.config.token.is_some())
            .field("remembered", &self.responses.len())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl CmsClient for HttpCms {
    async fn get(&self, request: &CmsRequest) -> Result<Value, CmsError> {
        let url = self.request_url(request)?;
        let key = url.as_str().to_string();
        let window = request.revalidate.unwrap_or(self.config.default_revalidate);

        if let Some(entry) = self.responses.get(&key) {
            if entry.is_fresh(Instant::now()) {
                trace!(endpoint = %request.endpoint, "serving CMS response within revalidation window");
                return Ok(entry.body.clone());
            }
        }

        debug!(endpoint = %request.endpoint, query = %request.query.to_display_string(), "fetching from CMS");
        let started = Instant::now();
        let result = self.fetch(request, url).await;
        let outcome = result.as_ref().map_or_else(CmsError::outcome, |_| "ok");
        record_cms_request(&request.endpoint, outcome, started.elapsed());

        let body = result?;
        if window.is_zero() {
            self.responses.remove(&key);
        } else {
            self.remember(
                key,
                CachedResponse {
                    fetched_at: Instant::now(),
                    window,
                    body: body.clone(),
                },
            );
        }
        Ok(body)
    }

    async fn create(&self, endpoint: &str, body: &Value) -> Result<Value, CmsError> {
        let request = CmsRequest::new(endpoint);
        let url = self.request_url(&request)?;
        debug!(endpoint, "creating CMS entry");
        let started = Instant::now();
        let result = async {
            let response = self.authorize(self.client.post(url).json(body)).send().await?;
            read_json(endpoint, response).await
        }
        .await;
        let outcome = result.as_ref().map_or_else(CmsError::outcome, |_| "ok");
        record_cms_request(endpoint, outcome, started.elapsed());
        result
    }
}

/// Reads a response body as JSON, turning non-2xx statuses into errors.
async fn read_json(endpoint: &str, response: reqwest::Response) -> Result<Value, CmsError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .as_ref()
            .and_then(strapi_error_message);
        return Err(CmsError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|e| CmsError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::query::{FilterOp, StrapiQuery};

    fn client(base: &str) -> HttpCms {
        HttpCms::new(HttpCmsConfig {
            base_url: base.to_string(),
            token: None,
            default_revalidate: Duration::from_secs(60),
            max_cached_responses: DEFAULT_MAX_CACHED_RESPONSES,
        })
        .unwrap()
    }

    fn entry(fetched_at: Instant, window: Duration) -> CachedResponse {
        CachedResponse {
            fetched_at,
            window,
            body: Value::Null,
        }
    }

    fn bounded(limit: usize) -> HttpCms {
        HttpCms::new(HttpCmsConfig {
            base_url: "http://cms.local".to_string(),
            token: None,
            default_revalidate: Duration::from_secs(60),
            max_cached_responses: limit,
        })
        .unwrap()
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = HttpCms::new(HttpCmsConfig {
            base_url: "cms.local".to_string(),
            token: None,
            default_revalidate: Duration::ZERO,
            max_cached_responses: DEFAULT_MAX_CACHED_RESPONSES,
        })
        .unwrap_err();
        assert!(matches!(err, CmsError::InvalidUrl(_)));
    }

    #[test]
    fn request_url_joins_api_prefix() {
        let cms = client("http://cms.local:1337/");
        let url = cms.request_url(&CmsRequest::new("leaders")).unwrap();
        assert_eq!(url.as_str(), "http://cms.local:1337/api/leaders");
    }

    #[test]
    fn request_url_keeps_base_path() {
        let cms = client("https://example.com/cms");
        let url = cms.request_url(&CmsRequest::new("about-us")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/cms/api/about-us");
    }

    #[test]
    fn request_url_encodes_brackets() {
        let cms = client("http://cms.local");
        let req = CmsRequest::new("product-finders").with_query(
            StrapiQuery::new().filter(&["name"], FilterOp::StartsWithI, "A"),
        );
        let url = cms.request_url(&req).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("filters[name][$startsWithi]".to_string(), "A".to_string())]
        );
    }

    #[test]
    fn cached_response_freshness() {
        let now = Instant::now();
        let entry = CachedResponse {
            fetched_at: now,
            window: Duration::from_secs(10),
            body: Value::Null,
        };
        assert!(entry.is_fresh(now));
        assert!(entry.is_fresh(now + Duration::from_secs(9)));
        assert!(!entry.is_fresh(now + Duration::from_secs(10)));
    }

    #[test]
    fn full_cache_sweeps_stale_entries() {
        let cms = bounded(4);
        let start = Instant::now();
        for i in 0..4 {
            cms.remember(format!("stale-{i}"), entry(start, Duration::from_millis(1)));
        }
        assert_eq!(cms.cached_responses(), 4);

        let later = start + Duration::from_secs(1);
        cms.remember("fresh".into(), entry(later, Duration::from_secs(60)));
        assert_eq!(cms.cached_responses(), 1);
        assert!(cms.responses.contains_key("fresh"));
    }

    #[test]
    fn full_cache_of_fresh_entries_drops_the_oldest() {
        let cms = bounded(3);
        let start = Instant::now();
        for i in 0..5u64 {
            cms.remember(
                format!("key-{i}"),
                entry(start + Duration::from_secs(i), Duration::from_secs(600)),
            );
        }
        assert_eq!(cms.cached_responses(), 3);
        assert!(!cms.responses.contains_key("key-0"));
        assert!(!cms.responses.contains_key("key-1"));
        assert!(cms.responses.contains_key("key-4"));
    }

    #[test]
    fn refreshing_a_key_never_evicts() {
        let cms = bounded(2);
        let start = Instant::now();
        cms.remember("a".into(), entry(start, Duration::from_secs(60)));
        cms.remember("b".into(), entry(start, Duration::from_secs(60)));
        cms.remember("a".into(), entry(start + Duration::from_secs(1), Duration::from_secs(60)));
        assert_eq!(cms.cached_responses(), 2);
    }

    #[test]
    fn zero_limit_remembers_nothing() {
        let cms = bounded(0);
        cms.remember("a".into(), entry(Instant::now(), Duration::from_secs(60)));
        assert_eq!(cms.cached_responses(), 0);
    }

    #[tokio::test]
    async fn unreachable_cms_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let cms = client("http://127.0.0.1:9");
        let err = cms.get(&CmsRequest::new("leaders")).await.unwrap_err();
        assert!(matches!(err, CmsError::Network(_)), "got {err:?}");
    }
}
