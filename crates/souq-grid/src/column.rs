//! Column descriptors and the column model builder.
//!
//! Callers declare [`Column`]s with optional settings; [`prepare_columns`]
//! materializes every default into a [`PreparedColumn`] that the rest of
//! the engine works with.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::value::{CellContent, CellValue};

/// Reads a value out of a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Produces the content of a cell.
pub type CellRenderer<T> = Arc<dyn Fn(&T, &CellContext) -> CellContent + Send + Sync>;

/// Position information handed to cell renderers.
///
/// Enough to compute running counters without redoing pagination math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext {
    /// Index of the row on the current page (0-based).
    pub index: usize,
    /// Index of the row across all pages (0-based).
    pub global_index: usize,
    /// Current page (1-based).
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned, the natural start of a right-to-left script.
    #[default]
    Right,
}

impl Align {
    /// Returns the CSS `text-align` value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// A column as declared by the caller.
///
/// Every column needs a typed accessor. Sort and search values default to
/// the accessor when not given separately.
pub struct Column<T> {
    /// Unique id within the table.
    pub id: String,
    /// Header label.
    pub label: String,
    /// Reads the cell value.
    pub accessor: Accessor<T>,
    /// Custom cell renderer.
    pub render: Option<CellRenderer<T>>,
    /// Value used for sorting.
    pub sort_value: Option<Accessor<T>>,
    /// Value used for searching.
    pub search_value: Option<Accessor<T>>,
    /// Whether clicking the header sorts (default false).
    pub sortable: Option<bool>,
    /// Whether the search stage looks at this column (default true).
    pub searchable: Option<bool>,
    /// Whether the column menu can hide this column (default true).
    pub toggleable: Option<bool>,
    /// Initial visibility (default true).
    pub initial_visible: Option<bool>,
    /// Hidden until the user shows it. Overrides `initial_visible`.
    pub default_hidden: bool,
    /// Alignment (default right).
    pub align: Option<Align>,
    /// Extra CSS classes for the header cell.
    pub header_class: Option<String>,
    /// Extra CSS classes for body cells.
    pub cell_class: Option<String>,
}

impl<T: 'static> Column<T> {
    /// Creates a column reading its value with `accessor`.
    #[must_use]
    pub fn new<F, V>(id: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue> + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            accessor: Arc::new(move |row: &T| -> CellValue { accessor(row).into() }),
            render: None,
            sort_value: None,
            search_value: None,
            sortable: None,
            searchable: None,
            toggleable: None,
            initial_visible: None,
            default_hidden: false,
            align: None,
            header_class: None,
            cell_class: None,
        }
    }

    /// Sets a custom cell renderer.
    #[must_use]
    pub fn render<F, C>(mut self, render: F) -> Self
    where
        F: Fn(&T, &CellContext) -> C + Send + Sync + 'static,
        C: Into<CellContent> + 'static,
    {
        self.render = Some(Arc::new(move |row: &T, ctx: &CellContext| -> CellContent {
            render(row, ctx).into()
        }));
        self
    }

    /// Sets the value used for sorting.
    #[must_use]
    pub fn sort_value<F, V>(mut self, extract: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue> + 'static,
    {
        self.sort_value = Some(Arc::new(move |row: &T| -> CellValue { extract(row).into() }));
        self
    }

    /// Sets the value used for searching.
    #[must_use]
    pub fn search_value<F, V>(mut self, extract: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue> + 'static,
    {
        self.search_value = Some(Arc::new(move |row: &T| -> CellValue { extract(row).into() }));
        self
    }
}

impl<T> Column<T> {
    /// Sets whether the column is sortable.
    #[must_use]
    pub const fn sortable(mut self, v: bool) -> Self {
        self.sortable = Some(v);
        self
    }

    /// Sets whether the column is searchable.
    #[must_use]
    pub const fn searchable(mut self, v: bool) -> Self {
        self.searchable = Some(v);
        self
    }

    /// Sets whether the column can be hidden.
    #[must_use]
    pub const fn toggleable(mut self, v: bool) -> Self {
        self.toggleable = Some(v);
        self
    }

    /// Sets the initial visibility.
    #[must_use]
    pub const fn initially_visible(mut self, v: bool) -> Self {
        self.initial_visible = Some(v);
        self
    }

    /// Hides the column until the user shows it.
    #[must_use]
    pub const fn default_hidden(mut self) -> Self {
        self.default_hidden = true;
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub const fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Adds CSS classes to the header cell.
    #[must_use]
    pub fn header_class(mut self, class: impl Into<String>) -> Self {
        self.header_class = Some(class.into());
        self
    }

    /// Adds CSS classes to body cells.
    #[must_use]
    pub fn cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = Some(class.into());
        self
    }
}

// Manual Clone implementation to avoid T: Clone bound
impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
            sort_value: self.sort_value.clone(),
            search_value: self.search_value.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            toggleable: self.toggleable,
            initial_visible: self.initial_visible,
            default_hidden: self.default_hidden,
            align: self.align,
            header_class: self.header_class.clone(),
            cell_class: self.cell_class.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("toggleable", &self.toggleable)
            .finish_non_exhaustive()
    }
}

/// A column with every default materialized.
#[allow(clippy::struct_excessive_bools)]
pub struct PreparedColumn<T> {
    /// Unique id within the table.
    pub id: String,
    /// Header label.
    pub label: String,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    /// Whether the search stage looks at this column.
    pub searchable: bool,
    /// Whether the column menu can hide this column.
    pub toggleable: bool,
    /// Visibility before any user choice.
    pub initial_visible: bool,
    /// Alignment.
    pub align: Align,
    /// Extra CSS classes for the header cell.
    pub header_class: Option<String>,
    /// Extra CSS classes for body cells.
    pub cell_class: Option<String>,
    accessor: Accessor<T>,
    render: Option<CellRenderer<T>>,
    sort_value: Accessor<T>,
    search_value: Accessor<T>,
}

impl<T> PreparedColumn<T> {
    fn from_column(column: &Column<T>) -> Self {
        let initial_visible = if column.default_hidden {
            false
        } else {
            column.initial_visible.unwrap_or(true)
        };

        Self {
            id: column.id.clone(),
            label: column.label.clone(),
            sortable: column.sortable.unwrap_or(false),
            searchable: column.searchable.unwrap_or(true),
            toggleable: column.toggleable.unwrap_or(true),
            initial_visible,
            align: column.align.unwrap_or_default(),
            header_class: column.header_class.clone(),
            cell_class: column.cell_class.clone(),
            accessor: Arc::clone(&column.accessor),
            render: column.render.clone(),
            sort_value: column
                .sort_value
                .clone()
                .unwrap_or_else(|| Arc::clone(&column.accessor)),
            search_value: column
                .search_value
                .clone()
                .unwrap_or_else(|| Arc::clone(&column.accessor)),
        }
    }

    /// Reads the display value of this column.
    #[must_use]
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Reads the sort key of this column.
    #[must_use]
    pub fn sort_key(&self, row: &T) -> CellValue {
        (self.sort_value)(row)
    }

    /// Returns the lower-cased search text of this column.
    #[must_use]
    pub fn search_text(&self, row: &T) -> String {
        (self.search_value)(row).search_text()
    }

    /// Renders the cell, falling back to the value's text or `-`.
    #[must_use]
    pub fn render_cell(&self, row: &T, ctx: &CellContext) -> CellContent {
        if let Some(render) = &self.render {
            return render(row, ctx);
        }
        match self.value(row) {
            CellValue::Null => CellContent::text("-"),
            value => CellContent::Text(value.to_string()),
        }
    }
}

// Manual Clone implementation to avoid T: Clone bound
impl<T> Clone for PreparedColumn<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            toggleable: self.toggleable,
            initial_visible: self.initial_visible,
            align: self.align,
            header_class: self.header_class.clone(),
            cell_class: self.cell_class.clone(),
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
            sort_value: Arc::clone(&self.sort_value),
            search_value: Arc::clone(&self.search_value),
        }
    }
}

impl<T> fmt::Debug for PreparedColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedColumn")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("toggleable", &self.toggleable)
            .field("initial_visible", &self.initial_visible)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

/// Materializes defaults for a list of declared columns.
///
/// # Errors
///
/// Fails with [`GridError::DuplicateColumn`] when two columns share an id.
pub fn prepare_columns<T>(columns: &[Column<T>]) -> Result<Vec<PreparedColumn<T>>> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .map(|column| {
            if !seen.insert(column.id.as_str()) {
                return Err(GridError::DuplicateColumn(column.id.clone()));
            }
            Ok(PreparedColumn::from_column(column))
        })
        .collect()
}

/// Finds a prepared column by id.
#[must_use]
pub fn find_column<'c, T>(
    columns: &'c [PreparedColumn<T>],
    id: &str,
) -> Option<&'c PreparedColumn<T>> {
    columns.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing {
        title: String,
        price: Option<i64>,
    }

    fn listing(title: &str, price: Option<i64>) -> Listing {
        Listing {
            title: title.to_string(),
            price,
        }
    }

    #[test]
    fn test_defaults_materialized() {
        let columns = vec![Column::new("title", "Title", |l: &Listing| l.title.clone())];
        let prepared = prepare_columns(&columns).unwrap();

        let title = &prepared[0];
        assert!(!title.sortable);
        assert!(title.searchable);
        assert!(title.toggleable);
        assert!(title.initial_visible);
        assert_eq!(title.align, Align::Right);
    }

    #[test]
    fn test_default_hidden_wins_over_initial_visible() {
        let columns = vec![
            Column::new("price", "Price", |l: &Listing| l.price)
                .initially_visible(true)
                .default_hidden(),
            Column::new("title", "Title", |l: &Listing| l.title.clone()).initially_visible(false),
        ];
        let prepared = prepare_columns(&columns).unwrap();

        assert!(!prepared[0].initial_visible);
        assert!(!prepared[1].initial_visible);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let columns = vec![
            Column::new("title", "Title", |l: &Listing| l.title.clone()),
            Column::new("title", "Other", |l: &Listing| l.title.clone()),
        ];
        let err = prepare_columns(&columns).unwrap_err();
        assert_eq!(err, GridError::DuplicateColumn("title".to_string()));
    }

    #[test]
    fn test_sort_and_search_fall_back_to_accessor() {
        let columns = vec![Column::new("title", "Title", |l: &Listing| l.title.clone())];
        let prepared = prepare_columns(&columns).unwrap();
        let row = listing("Red Bicycle", None);

        assert_eq!(prepared[0].sort_key(&row), CellValue::from("Red Bicycle"));
        assert_eq!(prepared[0].search_text(&row), "red bicycle");
    }

    #[test]
    fn test_render_fallbacks() {
        let columns = vec![
            Column::new("price", "Price", |l: &Listing| l.price),
            Column::new("title", "Title", |l: &Listing| l.title.clone())
                .render(|l: &Listing, ctx: &CellContext| {
                    format!("{}. {}", ctx.global_index + 1, l.title)
                }),
        ];
        let prepared = prepare_columns(&columns).unwrap();
        let row = listing("Sofa", None);
        let ctx = CellContext {
            index: 0,
            global_index: 10,
            page: 2,
            page_size: 10,
        };

        assert_eq!(prepared[0].render_cell(&row, &ctx), CellContent::text("-"));
        assert_eq!(prepared[1].render_cell(&row, &ctx), CellContent::text("11. Sofa"));
    }
}
