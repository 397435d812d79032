//! Headless CMS access.
//!
//! Page assemblers talk to the CMS through the [`CmsClient`] trait so that
//! the live HTTP client, the offline client and test doubles are
//! interchangeable.

pub mod http;
pub mod memory;
pub mod query;

use std::time::Duration;

use serde_json::Value;

use crate::error::CmsError;

pub use http::{HttpCms, HttpCmsConfig};
pub use memory::MemoryCms;
pub use query::{FilterOp, SortDir, StrapiQuery};

/// Content-type endpoints consumed by the site, relative to `/api/`.
pub mod endpoints {
    /// About Us single type
    pub const ABOUT_US: &str = "about-us";
    /// Leadership page single type (banner)
    pub const LEADERSHIP_PAGE: &str = "leadership-page";
    /// Leaders collection
    pub const LEADERS: &str = "leaders";
    /// Investor relations single type (banner + dividend history)
    pub const INVESTORS: &str = "investor";
    /// Media landing single type (banner)
    pub const MEDIA: &str = "media";
    /// Press releases collection
    pub const PRESS_RELEASES: &str = "press-releases";
    /// Perspectives collection
    pub const PERSPECTIVES: &str = "perspectives";
    /// Media kit collection
    pub const MEDIA_KITS: &str = "media-kits";
    /// Our Business single type
    pub const OUR_BUSINESS: &str = "our-business";
    /// Product catalogue collection
    pub const PRODUCTS: &str = "product-finders";
    /// Community single type
    pub const COMMUNITY: &str = "community";
    /// Contact Us single type
    pub const CONTACT_US: &str = "contact-us";
    /// Lead capture collection written by the Contact Us form
    pub const ENQUIRY_LEADS: &str = "enquiry-leads";

    /// Every endpoint above, used for metrics label protection.
    pub const ALL: [&str; 13] = [
        ABOUT_US,
        LEADERSHIP_PAGE,
        LEADERS,
        INVESTORS,
        MEDIA,
        PRESS_RELEASES,
        PERSPECTIVES,
        MEDIA_KITS,
        OUR_BUSINESS,
        PRODUCTS,
        COMMUNITY,
        CONTACT_US,
        ENQUIRY_LEADS,
    ];
}

/// One read request against a CMS content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsRequest {
    /// Content-type endpoint, e.g. `"press-releases"`
    pub endpoint: String,
    /// Query parameters
    pub query: StrapiQuery,
    /// Revalidation window; `None` uses the client default
    pub revalidate: Option<Duration>,
}

impl CmsRequest {
    /// Creates a request with no query parameters.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: StrapiQuery::new(),
            revalidate: None,
        }
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: StrapiQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the revalidation window for this request.
    #[must_use]
    pub const fn revalidate(mut self, window: Duration) -> Self {
        self.revalidate = Some(window);
        self
    }
}

/// Read/write access to the CMS.
#[async_trait::async_trait]
pub trait CmsClient: Send + Sync + std::fmt::Debug {
    /// Fetches a content type and returns the raw JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`CmsError`] on network failure, non-2xx status or a body
    /// that is not JSON.
    async fn get(&self, request: &CmsRequest) -> Result<Value, CmsError>;

    /// Creates an entry in a collection. `body` is the full request body
    /// (already wrapped in `{"data": ...}`).
    ///
    /// # Errors
    ///
    /// Returns a [`CmsError`] when the entry is rejected or the CMS cannot
    /// be reached.
    async fn create(&self, endpoint: &str, body: &Value) -> Result<Value, CmsError>;
}

/// Extracts `error.message` from a Strapi error envelope.
#[must_use]
pub fn strapi_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
