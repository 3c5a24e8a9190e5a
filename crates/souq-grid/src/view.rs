//! Derived, renderer-neutral view of a table.
//!
//! [`crate::DataTable::view`] produces a [`TableView`]; HTML, terminal or
//! any other front end turns it into output without redoing search, sort
//! or pagination math.

use std::sync::Arc;

use crate::column::{Align, CellContext};
use crate::pagination::PageItem;
use crate::sort::SortDirection;
use crate::value::CellContent;

/// Position handed to row key functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowKeyContext {
    /// Index of the row across all pages (0-based).
    pub index: usize,
}

/// Computes a stable key for a row.
pub type RowKeyFn<T> = Arc<dyn Fn(&T, RowKeyContext) -> String + Send + Sync>;

/// Call to action shown in the empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyAction {
    /// Button label.
    pub label: String,
    /// Link target.
    pub href: String,
}

/// What to show when no row survives search and paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Icon class.
    pub icon: String,
    /// Headline.
    pub title: String,
    /// Optional explanation.
    pub description: Option<String>,
    /// Optional call to action.
    pub action: Option<EmptyAction>,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            icon: "bi bi-inbox".to_string(),
            title: "No records found".to_string(),
            description: None,
            action: None,
        }
    }
}

impl EmptyState {
    /// Creates an empty state with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the icon class.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets the call to action.
    #[must_use]
    pub fn action(mut self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.action = Some(EmptyAction {
            label: label.into(),
            href: href.into(),
        });
        self
    }
}

/// A header cell of a visible column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column id.
    pub id: String,
    /// Label.
    pub label: String,
    /// Alignment.
    pub align: Align,
    /// Extra CSS classes.
    pub class: Option<String>,
    /// Whether clicking sorts.
    pub sortable: bool,
    /// Direction shown by the sort indicator.
    pub sort: Option<SortDirection>,
}

/// A body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCell {
    /// Column id.
    pub column_id: String,
    /// Rendered content.
    pub content: CellContent,
    /// Alignment.
    pub align: Align,
    /// Extra CSS classes.
    pub class: Option<String>,
}

/// A body row.
#[derive(Debug, Clone)]
pub struct BodyRow<'a, T> {
    /// Stable key.
    pub key: String,
    /// The row itself.
    pub row: &'a T,
    /// Position of the row.
    pub context: CellContext,
    /// Cells of the visible columns.
    pub cells: Vec<BodyCell>,
}

/// An entry of the column visibility menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToggle {
    /// Column id.
    pub id: String,
    /// Label.
    pub label: String,
    /// Whether the column is shown.
    pub visible: bool,
    /// Whether the entry can be switched.
    pub toggleable: bool,
}

/// Toolbar state: search box, column menu and page-size selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    /// Whether the search box is shown.
    pub search_enabled: bool,
    /// Placeholder of the search box.
    pub search_placeholder: String,
    /// Text in the search box.
    pub search_draft: String,
    /// Committed query.
    pub query: String,
    /// Column menu entries in declaration order.
    pub columns: Vec<ColumnToggle>,
    /// Current page size.
    pub per_page: usize,
    /// Page-size choices.
    pub per_page_options: Vec<usize>,
}

/// Pager state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// Current page (1-based).
    pub page: usize,
    /// Page count.
    pub total_pages: usize,
    /// Page numbers and gaps.
    pub items: Vec<PageItem>,
    /// Whether "previous" is enabled.
    pub has_previous: bool,
    /// Whether "next" is enabled.
    pub has_next: bool,
    /// 1-based number of the first displayed row, 0 when empty.
    pub first_row: usize,
    /// 1-based number of the last displayed row, 0 when empty.
    pub last_row: usize,
    /// Rows across all pages.
    pub total_rows: usize,
}

/// Everything needed to draw a table.
#[derive(Debug, Clone)]
pub struct TableView<'a, T> {
    /// Headers of the visible columns.
    pub headers: Vec<HeaderCell>,
    /// Displayed rows.
    pub rows: Vec<BodyRow<'a, T>>,
    /// Set when there is no row to display.
    pub empty: Option<EmptyState>,
    /// Toolbar.
    pub toolbar: Toolbar,
    /// Pager.
    pub pager: Pager,
}

impl<T> TableView<'_, T> {
    /// Returns whether no row is displayed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the keys of the displayed rows.
    #[must_use]
    pub fn row_keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }

    /// Returns the text of one column for every displayed row.
    #[must_use]
    pub fn column_text(&self, column_id: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|r| r.cells.iter().find(|c| c.column_id == column_id))
            .map(|c| c.content.as_str())
            .collect()
    }
}
