//! # souq-grid
//!
//! A tabular data-grid engine for admin screens.
//!
//! A [`DataTable`] reconciles four axes over a slice of rows:
//!
//! - Visible columns, switched from a column menu
//! - Free-text search, committed on demand or debounced while typing
//! - Single-column sorting with a three-state header cycle
//! - Pagination with a page-size selector
//!
//! Tables run in one of two modes, picked once when the table is built:
//!
//! - **Local**: all rows are in memory. The engine filters, sorts and
//!   slices them.
//! - **Delegated**: the caller owns filtering and paging and hands over one
//!   page at a time. The engine renders it as is and reports interactions
//!   through [`Callbacks`].
//!
//! ## Quick Start
//!
//! ```
//! use souq_grid::{Column, DataTable, TableOptions};
//!
//! struct City {
//!     name: String,
//!     ads: i64,
//! }
//!
//! let columns = vec![
//!     Column::new("name", "City", |c: &City| c.name.clone()),
//!     Column::new("ads", "Ads", |c: &City| c.ads).sortable(true),
//! ];
//! let rows = vec![
//!     City { name: "Riyadh".into(), ads: 12 },
//!     City { name: "Jeddah".into(), ads: 7 },
//! ];
//!
//! let mut table = DataTable::new(&columns, TableOptions::new()).unwrap();
//! table.click_header("ads");
//!
//! let view = table.view(&rows);
//! assert_eq!(view.column_text("name"), vec!["Jeddah", "Riyadh"]);
//! ```
//!
//! Rendering is left to the front end: [`DataTable::view`] returns a
//! [`TableView`] with headers, cells, toolbar and pager already computed.

pub mod column;
pub mod error;
pub mod pagination;
pub mod search;
pub mod sort;
pub mod table;
pub mod value;
pub mod view;
pub mod visibility;

pub use column::{prepare_columns, Align, CellContext, Column, PreparedColumn};
pub use error::{GridError, Result};
pub use pagination::{
    page_count, pager_items, PageItem, Pagination, PaginationMode, DEFAULT_PER_PAGE,
    DEFAULT_PER_PAGE_OPTIONS,
};
pub use search::{filter_rows, RowFilter, SearchBox, DEFAULT_SEARCH_DEBOUNCE};
pub use sort::{ActiveSort, SortDirection, SortState};
pub use table::{Callbacks, DataTable, TableOptions};
pub use value::{CellContent, CellValue};
pub use view::{
    BodyCell, BodyRow, ColumnToggle, EmptyAction, EmptyState, HeaderCell, Pager, RowKeyContext,
    TableView, Toolbar,
};
pub use visibility::VisibilityStore;
