//! Strapi query-string construction.
//!
//! Strapi encodes nested options as bracketed keys:
//! `populate[TopBanner][populate]=*`, `pagination[page]=2`,
//! `filters[name][$startsWithi]=A`, `filters[$or][0][name][$containsi]=x`.
//! [`StrapiQuery`] keeps the pairs in insertion order; percent-encoding is
//! left to the URL builder.

use std::fmt::Write as _;

/// Strapi filter operators used by this site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact match
    Eq,
    /// Case-insensitive exact match
    EqI,
    /// Case-insensitive inequality
    NeI,
    /// Case-insensitive substring
    ContainsI,
    /// Case-insensitive prefix
    StartsWithI,
}

impl FilterOp {
    /// Operator token as Strapi expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::EqI => "$eqi",
            Self::NeI => "$nei",
            Self::ContainsI => "$containsi",
            Self::StartsWithI => "$startsWithi",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortDir {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordered list of Strapi query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrapiQuery {
    params: Vec<(String, String)>,
}

impl StrapiQuery {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Adds a raw parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// `populate=*`
    #[must_use]
    pub fn populate_all(self) -> Self {
        self.param("populate", "*")
    }

    /// `populate[<a>][populate][<b>]...[populate]=*` for a nested component
    /// path, e.g. `["TopBanner", "DesktopImage"]`.
    #[must_use]
    pub fn populate_path(self, path: &[&str]) -> Self {
        let mut key = String::from("populate");
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                key.push_str("[populate]");
            }
            let _ = write!(key, "[{segment}]");
        }
        key.push_str("[populate]");
        self.param(key, "*")
    }

    /// `pagination[page]=<page>`
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param("pagination[page]", page.to_string())
    }

    /// `pagination[pageSize]=<size>`
    #[must_use]
    pub fn page_size(self, size: u32) -> Self {
        self.param("pagination[pageSize]", size.to_string())
    }

    /// `filters[<path...>][<op>]=<value>`
    #[must_use]
    pub fn filter(self, path: &[&str], op: FilterOp, value: impl Into<String>) -> Self {
        let key = filter_key("filters", path, op);
        self.param(key, value)
    }

    /// `filters[$or][<index>][<path...>][<op>]=<value>`
    #[must_use]
    pub fn or_filter(
        self,
        index: usize,
        path: &[&str],
        op: FilterOp,
        value: impl Into<String>,
    ) -> Self {
        let key = filter_key(&format!("filters[$or][{index}]"), path, op);
        self.param(key, value)
    }

    /// `sort=<field>:<dir>`; repeated calls become `sort[0]`, `sort[1]`, ...
    #[must_use]
    pub fn sort(mut self, field: &str, dir: SortDir) -> Self {
        let value = format!("{field}:{}", dir.as_str());
        let existing = self
            .params
            .iter()
            .filter(|(k, _)| k == "sort" || k.starts_with("sort["))
            .count();
        if existing == 0 {
            return self.param("sort", value);
        }
        if existing == 1 {
            for (k, _) in &mut self.params {
                if k == "sort" {
                    *k = "sort[0]".to_string();
                }
            }
        }
        self.param(format!("sort[{existing}]"), value)
    }

    /// Parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns `true` if no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Human-readable `k=v&k=v` form without percent-encoding.
    ///
    /// Used for logs and test assertions, never for the wire.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn filter_key(prefix: &str, path: &[&str], op: FilterOp) -> String {
    let mut key = String::from(prefix);
    for segment in path {
        let _ = write!(key, "[{segment}]");
    }
    let _ = write!(key, "[{}]", op.as_str());
    key
}
