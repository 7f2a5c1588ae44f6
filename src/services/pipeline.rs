//! Filter, sort and paginate a catalog snapshot.

use crate::services::filter::SeriesFilter;
use crate::services::sort::{comparator, SortKey, Sortable};
use serde::Serialize;

/// Derives the visible sequence from `source`. `source` is left untouched
/// and the same inputs always produce the same output.
pub fn run<T>(source: &[T], filter: &SeriesFilter, sort: SortKey) -> Vec<T>
where
    T: Sortable + Clone,
{
    let mut visible: Vec<T> = source
        .iter()
        .filter(|item| filter.matches(item.series()))
        .cloned()
        .collect();
    // `sort_by` is stable: equal keys keep their source order.
    visible.sort_by(comparator(sort));
    visible
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Clamps paging parameters into range. Returns `(page, per_page, offset)`.
pub fn page_window(
    page: Option<usize>,
    per_page: Option<usize>,
    default_size: usize,
    max_size: usize,
) -> (usize, usize, usize) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(default_size).min(max_size).max(1);
    let offset = (page - 1).saturating_mul(per_page);
    (page, per_page, offset)
}

/// Cuts one page out of an already-ordered sequence. A page past the end
/// yields an empty item list with correct totals.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let offset = (page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(offset).take(per_page).collect();
    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}
