//! Pagination stage.
//!
//! A table either pages its rows itself ([`PaginationMode::Local`]) or
//! renders one page handed over by the caller, who owns paging
//! ([`PaginationMode::Delegated`]). The mode is chosen once per table.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::debug;

use crate::error::{GridError, Result};

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Default choices offered by the page-size selector.
pub const DEFAULT_PER_PAGE_OPTIONS: &[usize] = &[5, 10, 20, 50];

/// Up to this many pages the pager lists every page number.
const INLINE_PAGE_LIMIT: usize = 5;

/// How a table is paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// The engine slices the rows it was given.
    Local {
        /// Rows per page.
        per_page: usize,
    },
    /// The caller fetches one page at a time; the engine renders it as is.
    Delegated {
        /// Current page as known by the caller (1-based).
        page: usize,
        /// Rows per page.
        per_page: usize,
        /// Page count reported by the caller.
        total_pages: Option<usize>,
        /// Row count across all pages reported by the caller.
        total_rows: Option<usize>,
    },
}

impl Default for PaginationMode {
    fn default() -> Self {
        Self::Local {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PaginationMode {
    /// Local paging with the given page size.
    #[must_use]
    pub const fn local(per_page: usize) -> Self {
        Self::Local { per_page }
    }

    /// Delegated paging starting at `page`, totals unknown.
    #[must_use]
    pub const fn delegated(page: usize, per_page: usize) -> Self {
        Self::Delegated {
            page,
            per_page,
            total_pages: None,
            total_rows: None,
        }
    }

    /// Sets the page count reported by the caller. No effect on local mode.
    #[must_use]
    pub const fn with_total_pages(mut self, n: usize) -> Self {
        if let Self::Delegated { total_pages, .. } = &mut self {
            *total_pages = Some(n);
        }
        self
    }

    /// Sets the row count reported by the caller. No effect on local mode.
    #[must_use]
    pub const fn with_total_rows(mut self, n: usize) -> Self {
        if let Self::Delegated { total_rows, .. } = &mut self {
            *total_rows = Some(n);
        }
        self
    }
}

/// An entry of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page(usize),
    /// A gap in the page numbers.
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageSource {
    Local,
    Delegated {
        total_pages: Option<usize>,
        total_rows: Option<usize>,
    },
}

/// Paging state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
    source: PageSource,
}

impl Pagination {
    /// Creates the paging state for a mode.
    ///
    /// # Errors
    ///
    /// Fails with [`GridError::InvalidPerPage`] for a zero page size.
    pub fn new(mode: PaginationMode) -> Result<Self> {
        let (page, per_page, source) = match mode {
            PaginationMode::Local { per_page } => (1, per_page, PageSource::Local),
            PaginationMode::Delegated {
                page,
                per_page,
                total_pages,
                total_rows,
            } => (
                page.max(1),
                per_page,
                PageSource::Delegated {
                    total_pages,
                    total_rows,
                },
            ),
        };
        if per_page == 0 {
            return Err(GridError::InvalidPerPage);
        }
        Ok(Self {
            page,
            per_page,
            source,
        })
    }

    /// Returns whether the caller owns paging.
    #[must_use]
    pub const fn is_delegated(&self) -> bool {
        matches!(self.source, PageSource::Delegated { .. })
    }

    /// Returns the requested page, before clamping to the page count.
    #[must_use]
    pub const fn requested_page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the page count for `row_count` rows after searching.
    ///
    /// In delegated mode `row_count` is the size of the page at hand and
    /// only matters when the caller did not report a page count.
    #[must_use]
    pub fn total_pages(&self, row_count: usize) -> usize {
        match self.source {
            PageSource::Local => page_count(row_count, self.per_page),
            PageSource::Delegated {
                total_pages: Some(total),
                ..
            } => total.max(1),
            PageSource::Delegated { total_rows, .. } => {
                page_count(row_count.max(total_rows.unwrap_or(0)), self.per_page)
            }
        }
    }

    /// Returns the current page, clamped into `1..=total_pages`.
    #[must_use]
    pub fn current_page(&self, row_count: usize) -> usize {
        self.page.clamp(1, self.total_pages(row_count))
    }

    /// Moves to `page`.
    ///
    /// Returns `false` without changing anything when `page` is the current
    /// page or out of range.
    pub fn go_to(&mut self, page: usize, row_count: usize) -> bool {
        let total = self.total_pages(row_count);
        if page == 0 || page > total || page == self.current_page(row_count) {
            return false;
        }
        debug!(from = self.page, to = page, total, "page changed");
        self.page = page;
        true
    }

    /// Moves back to the first page. Returns whether the page moved.
    pub const fn reset(&mut self) -> bool {
        let moved = self.page != 1;
        self.page = 1;
        moved
    }

    /// Changes the page size and returns to the first page.
    ///
    /// Returns `false` for a zero or unchanged size.
    pub fn set_per_page(&mut self, per_page: usize) -> bool {
        if per_page == 0 || per_page == self.per_page {
            return false;
        }
        debug!(from = self.per_page, to = per_page, "page size changed");
        self.per_page = per_page;
        self.page = 1;
        true
    }

    /// Mirrors the caller's view of delegated paging after a refetch.
    ///
    /// Ignored in local mode.
    pub fn sync(&mut self, page: usize, total_pages: Option<usize>, total_rows: Option<usize>) {
        if let PageSource::Delegated {
            total_pages: pages,
            total_rows: rows,
        } = &mut self.source
        {
            self.page = page.max(1);
            *pages = total_pages;
            *rows = total_rows;
        } else {
            debug!("ignoring delegated paging sync on a locally paged table");
        }
    }

    /// Returns the range of rows to display out of `row_count`.
    ///
    /// Delegated tables display everything they were given.
    #[must_use]
    pub fn window(&self, row_count: usize) -> Range<usize> {
        match self.source {
            PageSource::Local => {
                let start = self.offset(row_count).min(row_count);
                start..start.saturating_add(self.per_page).min(row_count)
            }
            PageSource::Delegated { .. } => 0..row_count,
        }
    }

    /// Returns the global index of the first row on the current page.
    ///
    /// Saturates at `usize::MAX` for very large delegated page numbers.
    #[must_use]
    pub fn offset(&self, row_count: usize) -> usize {
        (self.current_page(row_count) - 1).saturating_mul(self.per_page)
    }

    /// Returns the row count across all pages.
    #[must_use]
    pub fn total_rows(&self, row_count: usize) -> usize {
        match self.source {
            PageSource::Local => row_count,
            PageSource::Delegated { total_rows, .. } => total_rows
                .unwrap_or(0)
                .max(self.offset(row_count).saturating_add(row_count)),
        }
    }
}

/// Returns `max(1, ceil(rows / per_page))`.
#[must_use]
pub fn page_count(rows: usize, per_page: usize) -> usize {
    rows.div_ceil(per_page.max(1)).max(1)
}

/// Lays out the pager.
///
/// Short page counts are listed in full. Longer ones show the first page,
/// a window of three pages around `current` and the last page, with
/// ellipses over the gaps.
#[must_use]
pub fn pager_items(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    if total <= INLINE_PAGE_LIMIT {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total);
    let (start, end) = if current <= 2 {
        (2, 4)
    } else if current >= total - 1 {
        (total - 3, total - 1)
    } else {
        (current - 1, current + 1)
    };

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

/// Returns the page-size choices, always including `current`.
///
/// Sorted ascending, without duplicates or zero.
#[must_use]
pub fn per_page_options(options: &[usize], current: usize) -> Vec<usize> {
    options
        .iter()
        .copied()
        .chain(std::iter::once(current))
        .filter(|n| *n > 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(items: &[PageItem]) -> String {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page(n) => n.to_string(),
                PageItem::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_page_count_bounds() {
        for per_page in 1..=12 {
            for rows in 0..=60 {
                let total = page_count(rows, per_page);
                assert_eq!(total, std::cmp::max(1, rows.div_ceil(per_page)));

                let mut paging = Pagination::new(PaginationMode::local(per_page)).unwrap();
                paging.go_to(total, rows);
                let window = paging.window(rows);
                if rows > 0 {
                    assert!(!window.is_empty(), "rows={rows} per_page={per_page}");
                    assert!(window.len() <= per_page);
                    assert_eq!(window.end, rows);
                } else {
                    assert!(window.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_zero_per_page_rejected() {
        assert_eq!(
            Pagination::new(PaginationMode::local(0)).unwrap_err(),
            GridError::InvalidPerPage
        );
    }

    #[test]
    fn test_go_to_ignores_current_and_out_of_range() {
        let mut paging = Pagination::new(PaginationMode::local(10)).unwrap();
        assert!(!paging.go_to(1, 25));
        assert!(!paging.go_to(0, 25));
        assert!(!paging.go_to(4, 25));
        assert!(paging.go_to(3, 25));
        assert_eq!(paging.current_page(25), 3);
        assert_eq!(paging.window(25), 20..25);
    }

    #[test]
    fn test_current_page_clamped_when_rows_shrink() {
        let mut paging = Pagination::new(PaginationMode::local(10)).unwrap();
        paging.go_to(3, 30);
        assert_eq!(paging.current_page(12), 2);
        assert_eq!(paging.window(12), 10..12);
    }

    #[test]
    fn test_set_per_page_resets_page() {
        let mut paging = Pagination::new(PaginationMode::local(10)).unwrap();
        paging.go_to(2, 30);
        assert!(paging.set_per_page(20));
        assert_eq!(paging.current_page(30), 1);
        assert!(!paging.set_per_page(20));
        assert!(!paging.set_per_page(0));
    }

    #[test]
    fn test_delegated_totals() {
        let paging = Pagination::new(PaginationMode::delegated(3, 10).with_total_pages(7)).unwrap();
        assert_eq!(paging.total_pages(10), 7);
        assert_eq!(paging.current_page(10), 3);
        assert_eq!(paging.window(10), 0..10);
        assert_eq!(paging.offset(10), 20);

        let derived =
            Pagination::new(PaginationMode::delegated(1, 10).with_total_rows(45)).unwrap();
        assert_eq!(derived.total_pages(10), 5);
        assert_eq!(derived.total_rows(10), 45);
    }

    #[test]
    fn test_huge_delegated_page_saturates() {
        let huge = usize::MAX / 2;
        let paging =
            Pagination::new(PaginationMode::delegated(huge, 100).with_total_pages(huge)).unwrap();
        assert_eq!(paging.current_page(3), huge);
        assert_eq!(paging.offset(3), usize::MAX);
        assert_eq!(paging.total_rows(3), usize::MAX);
        assert_eq!(paging.window(3), 0..3);
    }

    #[test]
    fn test_sync_only_applies_to_delegated() {
        let mut local = Pagination::new(PaginationMode::local(10)).unwrap();
        local.sync(4, Some(9), None);
        assert_eq!(local.current_page(100), 1);

        let mut delegated = Pagination::new(PaginationMode::delegated(1, 10)).unwrap();
        delegated.sync(4, Some(9), Some(88));
        assert_eq!(delegated.current_page(10), 4);
        assert_eq!(delegated.total_pages(10), 9);
    }

    #[test]
    fn test_pager_items() {
        assert_eq!(pages(&pager_items(1, 1)), "1");
        assert_eq!(pages(&pager_items(2, 5)), "1 2 3 4 5");
        assert_eq!(pages(&pager_items(1, 10)), "1 2 3 4 … 10");
        assert_eq!(pages(&pager_items(5, 10)), "1 … 4 5 6 … 10");
        assert_eq!(pages(&pager_items(10, 10)), "1 … 7 8 9 10");
        assert_eq!(pages(&pager_items(3, 6)), "1 2 3 4 … 6");
        assert_eq!(pages(&pager_items(4, 6)), "1 … 3 4 5 6");
    }

    #[test]
    fn test_per_page_options_include_current() {
        assert_eq!(per_page_options(&[5, 10, 20], 15), vec![5, 10, 15, 20]);
        assert_eq!(per_page_options(&[20, 10, 10], 10), vec![10, 20]);
        assert_eq!(per_page_options(&[], 25), vec![25]);
    }
}
