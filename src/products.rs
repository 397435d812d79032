//! Product finder: query parameters, Strapi filter construction and the
//! response envelope of `GET /api/products`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cms::{CmsClient, CmsRequest, FilterOp, SortDir, StrapiQuery, endpoints};
use crate::content::mappers::{map_pagination, map_products};
use crate::content::model::{Pagination, Product};
use crate::error::CmsError;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Error text of a failed search.
pub const FETCH_ERROR: &str = "Failed to fetch products";
/// Therapy area matched by the oncology toggle.
pub const ONCOLOGY: &str = "Oncology";

/// Raw query string of `/api/products`. Every value is kept as text so a
/// malformed parameter is ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductParams {
    /// 1-based page
    pub page: Option<String>,
    /// Items per page
    pub page_size: Option<String>,
    /// Matches name or composition
    pub search_term: Option<String>,
    /// A–Z index letter
    pub selected_letter: Option<String>,
    /// Market name
    pub geography: Option<String>,
    /// Category name
    pub category: Option<String>,
    /// `"true"` or `"false"`
    pub oncology: Option<String>,
}

/// Normalized product search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// 1-based page
    pub page: u32,
    /// Items per page, `1..=MAX_PAGE_SIZE`
    pub page_size: u32,
    /// Case-insensitive substring of name or composition
    pub search_term: Option<String>,
    /// Name prefix letter
    pub letter: Option<char>,
    /// Exact (case-insensitive) market
    pub geography: Option<String>,
    /// Exact (case-insensitive) category
    pub category: Option<String>,
    /// Only oncology (`true`) or everything but oncology (`false`)
    pub oncology: Option<bool>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: None,
            letter: None,
            geography: None,
            category: None,
            oncology: None,
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl From<&ProductParams> for ProductQuery {
    fn from(params: &ProductParams) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let page_size = params
            .page_size
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .map_or(DEFAULT_PAGE_SIZE, |s| s.clamp(1, MAX_PAGE_SIZE));

        let letter = params.selected_letter.as_deref().and_then(|l| {
            let mut chars = l.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphanumeric() => Some(c),
                _ => None,
            }
        });
        let oncology = match params.oncology.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") => Some(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        };

        Self {
            page,
            page_size,
            search_term: non_blank(params.search_term.as_ref()),
            letter,
            geography: non_blank(params.geography.as_ref()),
            category: non_blank(params.category.as_ref()),
            oncology,
        }
    }
}

impl ProductQuery {
    /// Strapi query for the product collection, sorted by name.
    #[must_use]
    pub fn to_strapi(&self) -> StrapiQuery {
        let mut q = StrapiQuery::new()
            .populate_all()
            .page(self.page)
            .page_size(self.page_size)
            .sort("name", SortDir::Asc);

        if let Some(term) = &self.search_term {
            q = q
                .or_filter(0, &["name"], FilterOp::ContainsI, term.as_str())
                .or_filter(1, &["composition"], FilterOp::ContainsI, term.as_str());
        }
        if let Some(letter) = self.letter {
            q = q.filter(&["name"], FilterOp::StartsWithI, letter.to_string());
        }
        if let Some(geography) = &self.geography {
            q = q.filter(&["geography", "name"], FilterOp::EqI, geography.as_str());
        }
        if let Some(category) = &self.category {
            q = q.filter(&["category", "name"], FilterOp::EqI, category.as_str());
        }
        if let Some(oncology) = self.oncology {
            let op = if oncology { FilterOp::EqI } else { FilterOp::NeI };
            q = q.filter(&["therapy", "name"], op, ONCOLOGY);
        }
        q
    }
}

/// `meta` of a product response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMeta {
    /// Pagination of the result set
    pub pagination: Pagination,
}

/// Body of `GET /api/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page
    pub data: Vec<Product>,
    /// Pagination metadata
    pub meta: ProductMeta,
    /// Set only when the search failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductPage {
    /// Empty result reported for a failed search.
    #[must_use]
    pub fn failed(query: &ProductQuery) -> Self {
        Self {
            data: Vec::new(),
            meta: ProductMeta {
                pagination: Pagination {
                    page: query.page,
                    page_size: query.page_size,
                    page_count: 0,
                    total: 0,
                },
            },
            error: Some(FETCH_ERROR.to_string()),
        }
    }
}

/// Runs a product search against the CMS.
///
/// # Errors
///
/// Returns the [`CmsError`] of the underlying fetch.
pub async fn fetch_products(
    cms: &dyn CmsClient,
    query: &ProductQuery,
    revalidate: Duration,
) -> Result<ProductPage, CmsError> {
    let request = CmsRequest::new(endpoints::PRODUCTS)
        .with_query(query.to_strapi())
        .revalidate(revalidate);
    let raw = cms.get(&request).await?;
    let data = map_products(&raw);

    let pagination = map_pagination(&raw).unwrap_or_else(|| {
        let total = data.len() as u64;
        Pagination {
            page: query.page,
            page_size: query.page_size,
            page_count: u32::from(total > 0),
            total,
        }
    });

    Ok(ProductPage {
        data,
        meta: ProductMeta { pagination },
        error: None,
    })
}

/// Like [`fetch_products`], but a failure becomes [`ProductPage::failed`].
pub async fn search_products(
    cms: &dyn CmsClient,
    query: &ProductQuery,
    revalidate: Duration,
) -> ProductPage {
    match fetch_products(cms, query, revalidate).await {
        Ok(page) => page,
        Err(e) => {
            warn!(endpoint = endpoints::PRODUCTS, error = %e, "product search failed");
            ProductPage::failed(query)
        }
    }
}
