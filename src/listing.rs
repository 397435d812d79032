//! In-memory search, year filter and pagination for content listings.
//!
//! The full list is fetched once; every keystroke or click re-filters and
//! re-slices it without another CMS round-trip.

use serde::{Deserialize, Serialize};

use crate::content::model::{MediaKitItem, Perspective, PressRelease};
use crate::content::text::year_of;

/// Page size of the press-release listing.
pub const PRESS_RELEASE_PAGE_SIZE: usize = 6;
/// Page size of the perspectives listing.
pub const PERSPECTIVE_PAGE_SIZE: usize = 6;
/// Page size of the media-kit listing.
pub const MEDIA_KIT_PAGE_SIZE: usize = 6;
/// Shown instead of an empty grid.
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// An item that can appear in a filtered listing.
pub trait Listable {
    /// Title matched by the search box.
    fn title(&self) -> &str;
    /// URL slug, also matched by the search box.
    fn slug(&self) -> &str;
    /// Raw publication date used by the year filter.
    fn published_on(&self) -> Option<&str>;
    /// Display headline, when it differs from the title.
    fn headline(&self) -> Option<String> {
        None
    }
}

impl Listable for PressRelease {
    fn title(&self) -> &str {
        &self.title
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn published_on(&self) -> Option<&str> {
        self.published_on.as_deref()
    }
    fn headline(&self) -> Option<String> {
        (!self.headline.is_empty()).then(|| self.headline.join(" "))
    }
}

impl Listable for Perspective {
    fn title(&self) -> &str {
        &self.title
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn published_on(&self) -> Option<&str> {
        self.published_on.as_deref()
    }
}

impl Listable for MediaKitItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn published_on(&self) -> Option<&str> {
        self.published_on.as_deref()
    }
}

/// Search box, year dropdown and current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    /// Free-text search; empty matches everything
    pub search_query: String,
    /// Four-digit year; empty matches every year
    pub selected_year: String,
    /// 1-based page number
    pub current_page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_year: String::new(),
            current_page: 1,
        }
    }
}

impl ListQuery {
    /// Whether `item` passes both the search and the year filter.
    #[must_use]
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_year(item)
    }

    fn matches_search<T: Listable>(&self, item: &T) -> bool {
        let needle = self.search_query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        item.title().to_lowercase().contains(&needle)
            || item.slug().to_lowercase().contains(&needle)
            || item
                .headline()
                .is_some_and(|h| h.to_lowercase().contains(&needle))
    }

    fn matches_year<T: Listable>(&self, item: &T) -> bool {
        let year = self.selected_year.trim();
        if year.is_empty() {
            return true;
        }
        year_of(item.published_on()).is_some_and(|y| y.to_string() == year)
    }
}

/// One rendered page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Page actually shown (clamped into range)
    pub current_page: usize,
    /// `ceil(filtered / page_size)`
    pub total_pages: usize,
    /// Number of items after filtering
    pub total_items: usize,
    /// Years offered by the year dropdown, newest first
    pub years: Vec<String>,
    /// Echo of the search box
    pub search_query: String,
    /// Echo of the year dropdown
    pub selected_year: String,
    /// Set when nothing matched
    pub empty_message: Option<String>,
}

impl<T> ListView<T> {
    /// `true` when the filters matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `ceil(count / page_size)`; zero items means zero pages.
#[must_use]
pub const fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Items matching `query`, in input order.
#[must_use]
pub fn filter_items<'a, T: Listable>(items: &'a [T], query: &ListQuery) -> Vec<&'a T> {
    items.iter().filter(|item| query.matches(*item)).collect()
}

/// Distinct publication years, newest first.
#[must_use]
pub fn available_years<T: Listable>(items: &[T]) -> Vec<String> {
    let mut years: Vec<i32> = items.iter().filter_map(|i| year_of(i.published_on())).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years.into_iter().map(|y| y.to_string()).collect()
}

/// Filters, then slices out the requested page.
///
/// Pages below 1 show page 1; pages past the end show the last page.
#[must_use]
pub fn paginate<T: Listable + Clone>(items: &[T], query: &ListQuery, page_size: usize) -> ListView<T> {
    let filtered = filter_items(items, query);
    let total_items = filtered.len();
    let total_pages = total_pages(total_items, page_size);
    let current_page = query.current_page.clamp(1, total_pages.max(1));
    let start = (current_page - 1) * page_size;

    let page_items: Vec<T> = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();
    let empty_message = page_items.is_empty().then(|| NO_RESULTS_MESSAGE.to_string());

    ListView {
        items: page_items,
        current_page,
        total_pages,
        total_items,
        years: available_years(items),
        search_query: query.search_query.clone(),
        selected_year: query.selected_year.clone(),
        empty_message,
    }
}

/// Listing state with the reset and scroll rules of the interactive list:
/// a changed search query or year sends the reader back to page 1, and a
/// changed page asks for the list container to be scrolled into view.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    page_size: usize,
    anchor: &'static str,
    query: ListQuery,
}

impl<T: Listable + Clone> ListState<T> {
    /// New state over the full list. `anchor` is the element id of the list
    /// container.
    #[must_use]
    pub fn new(items: Vec<T>, page_size: usize, anchor: &'static str) -> Self {
        Self {
            items,
            page_size,
            anchor,
            query: ListQuery::default(),
        }
    }

    /// Restores a state from a query (e.g. URL parameters) without
    /// triggering the reset rule.
    #[must_use]
    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    /// Current filters and page.
    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Updates the search box. A different value resets to page 1.
    pub fn set_search_query(&mut self, value: &str) {
        if self.query.search_query != value {
            value.clone_into(&mut self.query.search_query);
            self.query.current_page = 1;
        }
    }

    /// Updates the year dropdown. A different value resets to page 1.
    pub fn set_selected_year(&mut self, value: &str) {
        if self.query.selected_year != value {
            value.clone_into(&mut self.query.selected_year);
            self.query.current_page = 1;
        }
    }

    /// Moves to `page`. Returns the anchor to scroll into view when the
    /// page actually changed.
    pub fn set_page(&mut self, page: usize) -> Option<&'static str> {
        let page = page.max(1);
        if self.query.current_page == page {
            return None;
        }
        self.query.current_page = page;
        Some(self.anchor)
    }

    /// The page currently shown.
    #[must_use]
    pub fn view(&self) -> ListView<T> {
        paginate(&self.items, &self.query, self.page_size)
    }
}
