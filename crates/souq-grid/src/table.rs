//! The data table: column model, visibility, search, sort and pagination
//! wired together behind one interaction API.
//!
//! A [`DataTable`] owns its state and never owns rows. Every call that
//! needs rows borrows them, so the caller can refresh its data between
//! interactions without telling the table.
//!
//! ```ignore
//! let mut table = DataTable::new(&columns, TableOptions::new().per_page(20))?
//!     .with_callbacks(Callbacks::new().on_row_click(|user: &User| open(user.id)));
//! table.search_input("ali", Instant::now());
//! table.submit_search();
//! let view = table.view(&users);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::column::{find_column, prepare_columns, CellContext, Column, PreparedColumn};
use crate::error::{GridError, Result};
use crate::pagination::{
    pager_items, per_page_options, Pagination, PaginationMode, DEFAULT_PER_PAGE_OPTIONS,
};
use crate::search::{filter_rows, RowFilter, SearchBox, DEFAULT_SEARCH_DEBOUNCE};
use crate::sort::{sort_rows, ActiveSort, SortDirection, SortState};
use crate::view::{
    BodyCell, BodyRow, ColumnToggle, EmptyState, HeaderCell, Pager, RowKeyContext, RowKeyFn,
    TableView, Toolbar,
};
use crate::visibility::VisibilityStore;

/// Receives a committed search query.
pub type SearchCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Receives a page number or a page size.
pub type PageCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Receives the new sort column and direction, both `None` when unsorted.
pub type SortCallback = Arc<dyn Fn(Option<&str>, Option<SortDirection>) + Send + Sync>;

/// Receives a clicked row.
pub type RowCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Configuration of a table.
pub struct TableOptions<T> {
    /// Whether the search box is shown.
    pub enable_search: bool,
    /// Placeholder of the search box.
    pub search_placeholder: String,
    /// Commit the query while typing, after [`TableOptions::search_debounce`].
    pub real_time_search: bool,
    /// Debounce delay in real-time mode.
    pub search_debounce: Duration,
    /// The caller filters rows; committed queries go to `on_server_search`.
    pub server_side_search: bool,
    /// Local or delegated paging.
    pub pagination: PaginationMode,
    /// Choices of the page-size selector.
    pub per_page_options: Vec<usize>,
    /// Sort applied before any header click.
    pub initial_sort: Option<ActiveSort>,
    /// Shown when no row is displayed.
    pub empty_state: EmptyState,
    /// Computes row keys. Defaults to the global row index.
    pub row_key: Option<RowKeyFn<T>>,
    /// Replaces the default search predicate.
    pub filter_rows: Option<RowFilter<T>>,
}

impl<T> Default for TableOptions<T> {
    fn default() -> Self {
        Self {
            enable_search: true,
            search_placeholder: "Search...".to_string(),
            real_time_search: false,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            server_side_search: false,
            pagination: PaginationMode::default(),
            per_page_options: DEFAULT_PER_PAGE_OPTIONS.to_vec(),
            initial_sort: None,
            empty_state: EmptyState::default(),
            row_key: None,
            filter_rows: None,
        }
    }
}

impl<T> Clone for TableOptions<T> {
    fn clone(&self) -> Self {
        Self {
            enable_search: self.enable_search,
            search_placeholder: self.search_placeholder.clone(),
            real_time_search: self.real_time_search,
            search_debounce: self.search_debounce,
            server_side_search: self.server_side_search,
            pagination: self.pagination,
            per_page_options: self.per_page_options.clone(),
            initial_sort: self.initial_sort.clone(),
            empty_state: self.empty_state.clone(),
            row_key: self.row_key.clone(),
            filter_rows: self.filter_rows.clone(),
        }
    }
}

impl<T> fmt::Debug for TableOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("enable_search", &self.enable_search)
            .field("real_time_search", &self.real_time_search)
            .field("search_debounce", &self.search_debounce)
            .field("server_side_search", &self.server_side_search)
            .field("pagination", &self.pagination)
            .field("per_page_options", &self.per_page_options)
            .field("initial_sort", &self.initial_sort)
            .field("row_key", &self.row_key.is_some())
            .field("filter_rows", &self.filter_rows.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> TableOptions<T> {
    /// Creates the default options: search on, local paging by 10.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows or hides the search box.
    #[must_use]
    pub const fn enable_search(mut self, enabled: bool) -> Self {
        self.enable_search = enabled;
        self
    }

    /// Sets the search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    /// Commits the query while typing.
    #[must_use]
    pub const fn real_time_search(mut self, enabled: bool) -> Self {
        self.real_time_search = enabled;
        self
    }

    /// Sets the debounce delay of real-time search.
    #[must_use]
    pub const fn search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Hands search over to the caller.
    #[must_use]
    pub const fn server_side_search(mut self, enabled: bool) -> Self {
        self.server_side_search = enabled;
        self
    }

    /// Sets the paging mode.
    #[must_use]
    pub const fn pagination(mut self, mode: PaginationMode) -> Self {
        self.pagination = mode;
        self
    }

    /// Sets the page size, keeping the paging mode.
    #[must_use]
    pub const fn per_page(mut self, n: usize) -> Self {
        match &mut self.pagination {
            PaginationMode::Local { per_page } | PaginationMode::Delegated { per_page, .. } => {
                *per_page = n;
            }
        }
        self
    }

    /// Sets the page-size choices.
    #[must_use]
    pub fn per_page_options(mut self, options: &[usize]) -> Self {
        self.per_page_options = options.to_vec();
        self
    }

    /// Sorts by `column` until the user clicks a header.
    #[must_use]
    pub fn initial_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.initial_sort = Some(ActiveSort {
            column: column.into(),
            direction,
        });
        self
    }

    /// Sets the empty state.
    #[must_use]
    pub fn empty_state(mut self, empty: EmptyState) -> Self {
        self.empty_state = empty;
        self
    }

    /// Sets the row key function.
    #[must_use]
    pub fn row_key<F>(mut self, key: F) -> Self
    where
        F: Fn(&T, RowKeyContext) -> String + Send + Sync + 'static,
    {
        self.row_key = Some(Arc::new(key));
        self
    }

    /// Replaces the default search predicate.
    #[must_use]
    pub fn filter_rows<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_rows = Some(Arc::new(filter));
        self
    }
}

/// Hooks into the caller. All optional.
pub struct Callbacks<T> {
    on_server_search: Option<SearchCallback>,
    on_page_change: Option<PageCallback>,
    on_per_page_change: Option<PageCallback>,
    on_sort_change: Option<SortCallback>,
    on_row_click: Option<RowCallback<T>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_server_search: None,
            on_page_change: None,
            on_per_page_change: None,
            on_sort_change: None,
            on_row_click: None,
        }
    }
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_server_search: self.on_server_search.clone(),
            on_page_change: self.on_page_change.clone(),
            on_per_page_change: self.on_per_page_change.clone(),
            on_sort_change: self.on_sort_change.clone(),
            on_row_click: self.on_row_click.clone(),
        }
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_server_search", &self.on_server_search.is_some())
            .field("on_page_change", &self.on_page_change.is_some())
            .field("on_per_page_change", &self.on_per_page_change.is_some())
            .field("on_sort_change", &self.on_sort_change.is_some())
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}

impl<T> Callbacks<T> {
    /// Creates an empty set of callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with each committed query when search is server side.
    #[must_use]
    pub fn on_server_search<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_server_search = Some(Arc::new(f));
        self
    }

    /// Called with the new page when paging is delegated.
    #[must_use]
    pub fn on_page_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    /// Called with the new page size when paging is delegated.
    #[must_use]
    pub fn on_per_page_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_per_page_change = Some(Arc::new(f));
        self
    }

    /// Called on every sort change.
    ///
    /// On a delegated table this also makes the caller responsible for
    /// ordering the rows it hands over.
    #[must_use]
    pub fn on_sort_change<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&str>, Option<SortDirection>) + Send + Sync + 'static,
    {
        self.on_sort_change = Some(Arc::new(f));
        self
    }

    /// Called with a clicked row.
    #[must_use]
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(f));
        self
    }
}

/// An interactive table over rows of type `T`.
pub struct DataTable<T> {
    columns: Vec<PreparedColumn<T>>,
    visibility: VisibilityStore,
    search: SearchBox,
    sort: SortState,
    pagination: Pagination,
    options: TableOptions<T>,
    callbacks: Callbacks<T>,
}

impl<T> Clone for DataTable<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            visibility: self.visibility.clone(),
            search: self.search.clone(),
            sort: self.sort.clone(),
            pagination: self.pagination.clone(),
            options: self.options.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("visibility", &self.visibility)
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("options", &self.options)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

impl<T> DataTable<T> {
    /// Creates a table.
    ///
    /// # Errors
    ///
    /// Fails on duplicate column ids or a zero page size. An initial sort
    /// must name an existing sortable column.
    pub fn new(columns: &[Column<T>], options: TableOptions<T>) -> Result<Self> {
        let columns = prepare_columns(columns)?;
        let pagination = Pagination::new(options.pagination)?;
        let sort = match &options.initial_sort {
            Some(initial) => {
                ensure_sortable(&columns, &initial.column)?;
                SortState::by(initial.column.clone(), initial.direction)
            }
            None => SortState::none(),
        };
        debug!(
            columns = columns.len(),
            delegated = pagination.is_delegated(),
            server_side_search = options.server_side_search,
            "table created"
        );

        Ok(Self {
            visibility: VisibilityStore::new(&columns),
            search: SearchBox::new(options.real_time_search, options.search_debounce),
            columns,
            sort,
            pagination,
            options,
            callbacks: Callbacks::default(),
        })
    }

    /// Installs the caller's callbacks.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks<T>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Returns the prepared columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[PreparedColumn<T>] {
        &self.columns
    }

    /// Returns the options the table was created with.
    #[must_use]
    pub const fn options(&self) -> &TableOptions<T> {
        &self.options
    }

    /// Replaces the column list.
    ///
    /// Visibility choices survive for ids that still exist. A sort on a
    /// column that disappeared or stopped being sortable is dropped.
    ///
    /// # Errors
    ///
    /// Fails with [`GridError::DuplicateColumn`] and leaves the table
    /// untouched when two columns share an id.
    pub fn set_columns(&mut self, columns: &[Column<T>]) -> Result<()> {
        let columns = prepare_columns(columns)?;
        self.visibility.reconcile(&columns);

        if let Some(active) = self.sort.column() {
            if !matches!(find_column(&columns, active), Some(c) if c.sortable) {
                debug!(column = active, "sort dropped with its column");
                self.sort.clear();
            }
        }

        self.columns = columns;
        debug!(columns = self.columns.len(), "columns replaced");
        Ok(())
    }

    // Visibility

    /// Returns the visibility store.
    #[must_use]
    pub const fn visibility(&self) -> &VisibilityStore {
        &self.visibility
    }

    /// Flips a toggleable column. Returns `false` for pinned or unknown ids.
    pub fn toggle_column(&mut self, id: &str) -> bool {
        self.visibility.toggle(id)
    }

    /// Shows or hides every toggleable column.
    pub fn set_all_columns_visible(&mut self, visible: bool) {
        self.visibility.set_all(visible);
    }

    /// Returns whether a column is shown.
    #[must_use]
    pub fn is_column_visible(&self, id: &str) -> bool {
        self.visibility.is_visible(id)
    }

    // Search

    /// Returns the search box.
    #[must_use]
    pub const fn search_box(&self) -> &SearchBox {
        &self.search
    }

    /// Returns the committed query.
    #[must_use]
    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Records a keystroke in the search box.
    pub fn search_input(&mut self, text: &str, now: Instant) {
        self.search.input(text, now);
    }

    /// Commits a debounced query whose delay has passed.
    ///
    /// Returns whether the query changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        let committed = self.search.poll(now);
        self.apply_query(committed)
    }

    /// Commits the draft (Enter key or search button).
    pub fn submit_search(&mut self) -> bool {
        let committed = self.search.submit();
        self.apply_query(committed)
    }

    /// Commits the draft when the search box loses focus.
    pub fn blur_search(&mut self) -> bool {
        let committed = self.search.blur();
        self.apply_query(committed)
    }

    /// Empties the search box and commits the empty query.
    pub fn clear_search(&mut self) -> bool {
        let committed = self.search.clear();
        self.apply_query(committed)
    }

    /// Sets the query on behalf of the caller, for example from a URL.
    pub fn set_search_query(&mut self, text: &str) -> bool {
        let committed = self.search.set_query(text);
        self.apply_query(committed)
    }

    fn apply_query(&mut self, committed: Option<String>) -> bool {
        let Some(query) = committed else {
            return false;
        };
        if self.options.server_side_search {
            if let Some(cb) = &self.callbacks.on_server_search {
                cb(&query);
            }
        }
        if self.pagination.reset() {
            debug!("page reset to 1");
        }
        // A delegated caller refetches page 1 for every new query, even
        // when the table already shows page 1.
        if self.pagination.is_delegated() {
            self.emit_page_change(1);
        }
        true
    }

    // Sort

    /// Returns the sort state.
    #[must_use]
    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Advances the sort cycle of a column header.
    ///
    /// Returns `false` and does nothing for unknown or unsortable columns.
    pub fn click_header(&mut self, id: &str) -> bool {
        if !matches!(find_column(&self.columns, id), Some(c) if c.sortable) {
            return false;
        }
        self.sort.cycle(id);
        if let Some(cb) = &self.callbacks.on_sort_change {
            cb(self.sort.column(), self.sort.direction());
        }
        true
    }

    /// Sets the sort directly, `None` clearing it.
    ///
    /// Used to restore a sort from outside, so no callback fires.
    ///
    /// # Errors
    ///
    /// Fails when `column` is unknown or not sortable.
    pub fn set_sort(&mut self, column: &str, direction: Option<SortDirection>) -> Result<()> {
        match direction {
            Some(direction) => {
                ensure_sortable(&self.columns, column)?;
                self.sort = SortState::by(column, direction);
            }
            None => self.sort.clear(),
        }
        Ok(())
    }

    const fn sorts_locally(&self) -> bool {
        !(self.pagination.is_delegated() && self.callbacks.on_sort_change.is_some())
    }

    // Pagination

    /// Returns the paging state.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Returns the current page for `rows`, clamped into range.
    #[must_use]
    pub fn current_page(&self, rows: &[T]) -> usize {
        self.pagination.current_page(self.matched_count(rows))
    }

    /// Returns the page count for `rows`.
    #[must_use]
    pub fn total_pages(&self, rows: &[T]) -> usize {
        self.pagination.total_pages(self.matched_count(rows))
    }

    /// Moves to `page`.
    ///
    /// Returns `false` for the current page or a page out of range.
    /// Delegated tables report the move through `on_page_change`.
    pub fn go_to_page(&mut self, rows: &[T], page: usize) -> bool {
        let count = self.matched_count(rows);
        if !self.pagination.go_to(page, count) {
            return false;
        }
        if self.pagination.is_delegated() {
            self.emit_page_change(page);
        }
        true
    }

    /// Moves to the next page, if any.
    pub fn next_page(&mut self, rows: &[T]) -> bool {
        let current = self.current_page(rows);
        self.go_to_page(rows, current.saturating_add(1))
    }

    /// Moves to the previous page, if any.
    pub fn previous_page(&mut self, rows: &[T]) -> bool {
        let current = self.current_page(rows);
        self.go_to_page(rows, current - 1)
    }

    /// Moves to the first page.
    pub fn first_page(&mut self, rows: &[T]) -> bool {
        self.go_to_page(rows, 1)
    }

    /// Moves to the last page.
    pub fn last_page(&mut self, rows: &[T]) -> bool {
        let last = self.total_pages(rows);
        self.go_to_page(rows, last)
    }

    /// Changes the page size and returns to the first page.
    ///
    /// Returns `false` for a zero or unchanged size. Delegated tables
    /// report the new size, and page 1 if the page moved.
    pub fn set_per_page(&mut self, per_page: usize) -> bool {
        let moved = self.pagination.requested_page() != 1;
        if !self.pagination.set_per_page(per_page) {
            return false;
        }
        if self.pagination.is_delegated() {
            if let Some(cb) = &self.callbacks.on_per_page_change {
                cb(per_page);
            }
            if moved {
                self.emit_page_change(1);
            }
        }
        true
    }

    /// Mirrors the caller's paging after a delegated refetch.
    pub fn sync_delegated(
        &mut self,
        page: usize,
        total_pages: Option<usize>,
        total_rows: Option<usize>,
    ) {
        self.pagination.sync(page, total_pages, total_rows);
    }

    /// Returns the page-size choices, including the current size.
    #[must_use]
    pub fn per_page_options(&self) -> Vec<usize> {
        per_page_options(&self.options.per_page_options, self.pagination.per_page())
    }

    fn emit_page_change(&self, page: usize) {
        if let Some(cb) = &self.callbacks.on_page_change {
            cb(page);
        }
    }

    // Rendering

    /// Returns the rows that pass the search, sorted, across all pages.
    #[must_use]
    pub fn ordered_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        let mut ordered = filter_rows(
            rows,
            &self.columns,
            self.search.query(),
            self.options.server_side_search,
            self.options.filter_rows.as_ref(),
        );
        if self.sorts_locally() {
            if let Some(active) = self.sort.active() {
                if let Some(column) = find_column(&self.columns, &active.column) {
                    sort_rows(&mut ordered, column, active.direction);
                }
            }
        }
        ordered
    }

    /// Returns the rows displayed on the current page.
    #[must_use]
    pub fn page_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        let ordered = self.ordered_rows(rows);
        let window = self.pagination.window(ordered.len());
        ordered[window].to_vec()
    }

    fn matched_count(&self, rows: &[T]) -> usize {
        filter_rows(
            rows,
            &self.columns,
            self.search.query(),
            self.options.server_side_search,
            self.options.filter_rows.as_ref(),
        )
        .len()
    }

    /// Runs search, sort and pagination over `rows` and lays out the result.
    #[must_use]
    pub fn view<'a>(&self, rows: &'a [T]) -> TableView<'a, T> {
        let ordered = self.ordered_rows(rows);
        let matched = ordered.len();
        let page = self.pagination.current_page(matched);
        let per_page = self.pagination.per_page();
        let total_pages = self.pagination.total_pages(matched);
        let offset = self.pagination.offset(matched);
        let window = self.pagination.window(matched);
        let visible = self.visibility.visible_columns(&self.columns);

        let headers = self.header_cells(&visible);

        let body: Vec<BodyRow<'a, T>> = ordered[window]
            .iter()
            .copied()
            .enumerate()
            .map(|(index, row)| {
                let context = CellContext {
                    index,
                    global_index: offset.saturating_add(index),
                    page,
                    page_size: per_page,
                };
                let key = self.options.row_key.as_ref().map_or_else(
                    || context.global_index.to_string(),
                    |key| {
                        key(
                            row,
                            RowKeyContext {
                                index: context.global_index,
                            },
                        )
                    },
                );
                let cells = visible
                    .iter()
                    .map(|c| BodyCell {
                        column_id: c.id.clone(),
                        content: c.render_cell(row, &context),
                        align: c.align,
                        class: c.cell_class.clone(),
                    })
                    .collect();
                BodyRow {
                    key,
                    row,
                    context,
                    cells,
                }
            })
            .collect();

        let shown = body.len();
        let pager = Pager {
            page,
            total_pages,
            items: pager_items(page, total_pages),
            has_previous: page > 1,
            has_next: page < total_pages,
            first_row: if shown == 0 { 0 } else { offset.saturating_add(1) },
            last_row: if shown == 0 { 0 } else { offset.saturating_add(shown) },
            total_rows: self.pagination.total_rows(matched),
        };

        let toolbar = self.toolbar();
        let empty = body
            .is_empty()
            .then(|| self.options.empty_state.clone());

        TableView {
            headers,
            rows: body,
            empty,
            toolbar,
            pager,
        }
    }

    fn header_cells(&self, visible: &[&PreparedColumn<T>]) -> Vec<HeaderCell> {
        visible
            .iter()
            .map(|c| HeaderCell {
                id: c.id.clone(),
                label: c.label.clone(),
                align: c.align,
                class: c.header_class.clone(),
                sortable: c.sortable,
                sort: if c.sortable {
                    self.sort.direction_for(&c.id)
                } else {
                    None
                },
            })
            .collect()
    }

    fn toolbar(&self) -> Toolbar {
        Toolbar {
            search_enabled: self.options.enable_search,
            search_placeholder: self.options.search_placeholder.clone(),
            search_draft: self.search.draft().to_string(),
            query: self.search.query().to_string(),
            columns: self
                .columns
                .iter()
                .map(|c| ColumnToggle {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    visible: self.visibility.is_visible(&c.id),
                    toggleable: c.toggleable,
                })
                .collect(),
            per_page: self.pagination.per_page(),
            per_page_options: self.per_page_options(),
        }
    }

    /// Reports a click on the row at `index` of the current page.
    ///
    /// Returns `false` when there is no such row.
    #[must_use]
    pub fn click_row(&self, rows: &[T], index: usize) -> bool {
        let page = self.page_rows(rows);
        let Some(row) = page.get(index) else {
            return false;
        };
        if let Some(cb) = &self.callbacks.on_row_click {
            cb(row);
        }
        true
    }
}

fn ensure_sortable<T>(columns: &[PreparedColumn<T>], id: &str) -> Result<()> {
    match find_column(columns, id) {
        Some(c) if c.sortable => Ok(()),
        Some(_) => Err(GridError::NotSortable(id.to_string())),
        None => Err(GridError::UnknownColumn(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageItem;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct User {
        id: u32,
        name: String,
        city: Option<String>,
        ads: i64,
    }

    fn user(id: u32, name: &str, city: Option<&str>, ads: i64) -> User {
        User {
            id,
            name: name.to_string(),
            city: city.map(str::to_string),
            ads,
        }
    }

    fn users() -> Vec<User> {
        vec![
            user(1, "Sara", Some("Riyadh"), 4),
            user(2, "Ali", Some("Jeddah"), 1),
            user(3, "Omar", None, 9),
            user(4, "Khalid", Some("Dammam"), 1),
        ]
    }

    fn columns() -> Vec<Column<User>> {
        vec![
            Column::new("name", "Name", |u: &User| u.name.clone())
                .sortable(true)
                .toggleable(false),
            Column::new("city", "City", |u: &User| u.city.clone()),
            Column::new("ads", "Ads", |u: &User| u.ads).sortable(true),
        ]
    }

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl Fn(usize) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::<usize>::new()));
        let sink = Arc::clone(&calls);
        (calls, move |n: usize| sink.lock().unwrap().push(n))
    }

    fn names(table: &DataTable<User>, rows: &[User]) -> Vec<String> {
        table
            .view(rows)
            .column_text("name")
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_construction_errors() {
        let duplicate = vec![
            Column::new("name", "Name", |u: &User| u.name.clone()),
            Column::new("name", "Again", |u: &User| u.id),
        ];
        assert_eq!(
            DataTable::new(&duplicate, TableOptions::new()).unwrap_err(),
            GridError::DuplicateColumn("name".to_string())
        );
        assert_eq!(
            DataTable::new(&columns(), TableOptions::new().per_page(0)).unwrap_err(),
            GridError::InvalidPerPage
        );
        assert_eq!(
            DataTable::new(
                &columns(),
                TableOptions::new().initial_sort("city", SortDirection::Asc)
            )
            .unwrap_err(),
            GridError::NotSortable("city".to_string())
        );
        assert_eq!(
            DataTable::new(
                &columns(),
                TableOptions::new().initial_sort("email", SortDirection::Asc)
            )
            .unwrap_err(),
            GridError::UnknownColumn("email".to_string())
        );
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let rows = users();
        let mut table = DataTable::new(&columns(), TableOptions::new()).unwrap();

        table.search_input("a", Instant::now());
        assert!(table.submit_search());
        let first = names(&table, &rows);

        table.search_input("a", Instant::now());
        assert!(!table.submit_search());
        assert!(!table.blur_search());
        assert_eq!(names(&table, &rows), first);
    }

    #[test]
    fn test_sort_cycle_restores_order() {
        let rows = users();
        let mut table = DataTable::new(&columns(), TableOptions::new()).unwrap();
        let original = names(&table, &rows);

        assert!(table.click_header("ads"));
        assert_eq!(names(&table, &rows), vec!["Ali", "Khalid", "Sara", "Omar"]);
        assert!(table.click_header("ads"));
        assert_eq!(names(&table, &rows), vec!["Omar", "Sara", "Ali", "Khalid"]);
        assert!(table.click_header("ads"));
        assert_eq!(names(&table, &rows), original);
        assert_eq!(table.sort_state(), &SortState::none());
    }

    #[test]
    fn test_click_on_unsortable_header_is_ignored() {
        let sorts = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&sorts);
        let mut table = DataTable::new(&columns(), TableOptions::new())
            .unwrap()
            .with_callbacks(Callbacks::new().on_sort_change(move |_, _| {
                *counter.lock().unwrap() += 1;
            }));

        assert!(!table.click_header("city"));
        assert!(!table.click_header("missing"));
        assert_eq!(*sorts.lock().unwrap(), 0);

        assert!(table.click_header("name"));
        assert_eq!(*sorts.lock().unwrap(), 1);
    }

    #[test]
    fn test_header_indicator_only_on_sorted_column() {
        let rows = users();
        let mut table = DataTable::new(&columns(), TableOptions::new()).unwrap();
        table.click_header("name");
        table.click_header("name");

        let view = table.view(&rows);
        let sorts: Vec<Option<SortDirection>> = view.headers.iter().map(|h| h.sort).collect();
        assert_eq!(sorts, vec![Some(SortDirection::Desc), None, None]);
    }

    #[test]
    fn test_local_page_clamped_when_rows_shrink() {
        let mut rows: Vec<User> = (0..12)
            .map(|i| user(i, &format!("user{i:02}"), None, 0))
            .collect();
        let mut table = DataTable::new(&columns(), TableOptions::new().per_page(5)).unwrap();
        assert!(table.last_page(&rows));
        assert_eq!(table.view(&rows).rows.len(), 2);

        rows.truncate(4);
        let view = table.view(&rows);
        assert_eq!(view.pager.page, 1);
        assert_eq!(view.pager.total_pages, 1);
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn test_search_resets_local_page() {
        let rows: Vec<User> = (0..30)
            .map(|i| user(i, &format!("user{i:02}"), None, 0))
            .collect();
        let mut table = DataTable::new(&columns(), TableOptions::new()).unwrap();
        assert!(table.go_to_page(&rows, 3));
        assert_eq!(table.current_page(&rows), 3);

        table.search_input("user", Instant::now());
        table.submit_search();
        assert_eq!(table.current_page(&rows), 1);
    }

    #[test]
    fn test_search_resets_delegated_page_with_callback() {
        let rows = users();
        let (pages, on_page) = recorder();
        let queries = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&queries);
        let options = TableOptions::new()
            .server_side_search(true)
            .pagination(PaginationMode::delegated(3, 10).with_total_pages(5));
        let mut table = DataTable::new(&columns(), options)
            .unwrap()
            .with_callbacks(
                Callbacks::new()
                    .on_page_change(on_page)
                    .on_server_search(move |q| sink.lock().unwrap().push(q.to_string())),
            );

        table.search_input(" zzz ", Instant::now());
        assert!(table.submit_search());

        assert_eq!(*pages.lock().unwrap(), vec![1]);
        assert_eq!(*queries.lock().unwrap(), vec!["zzz".to_string()]);
        // The caller filters; the page at hand is shown untouched.
        assert_eq!(table.view(&rows).rows.len(), 4);
    }

    #[test]
    fn test_new_query_on_first_delegated_page_reports_page_one() {
        let (pages, on_page) = recorder();
        let options = TableOptions::new()
            .server_side_search(true)
            .pagination(PaginationMode::delegated(1, 10).with_total_pages(5));
        let mut table = DataTable::new(&columns(), options)
            .unwrap()
            .with_callbacks(Callbacks::new().on_page_change(on_page));

        table.search_input("ali", Instant::now());
        assert!(table.submit_search());
        assert!(!table.submit_search());

        assert_eq!(*pages.lock().unwrap(), vec![1]);
        assert_eq!(table.pagination().requested_page(), 1);
    }

    #[test]
    fn test_delegated_next_page_fires_once_without_slicing() {
        let rows: Vec<User> = (0..10)
            .map(|i| user(i, &format!("user{i}"), None, 0))
            .collect();
        let (pages, on_page) = recorder();
        let options =
            TableOptions::new().pagination(PaginationMode::delegated(3, 10).with_total_pages(10));
        let mut table = DataTable::new(&columns(), options)
            .unwrap()
            .with_callbacks(Callbacks::new().on_page_change(on_page));

        assert!(table.next_page(&rows));
        assert_eq!(*pages.lock().unwrap(), vec![4]);

        let view = table.view(&rows);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.pager.page, 4);
        assert_eq!(view.pager.first_row, 31);
        assert_eq!(view.pager.last_row, 40);
    }

    #[test]
    fn test_delegated_per_page_change() {
        let (pages, on_page) = recorder();
        let (sizes, on_size) = recorder();
        let options =
            TableOptions::new().pagination(PaginationMode::delegated(2, 10).with_total_pages(4));
        let mut table = DataTable::new(&columns(), options).unwrap().with_callbacks(
            Callbacks::new()
                .on_page_change(on_page)
                .on_per_page_change(on_size),
        );

        assert!(table.set_per_page(20));
        assert!(!table.set_per_page(20));
        assert!(table.set_per_page(50));

        assert_eq!(*sizes.lock().unwrap(), vec![20, 50]);
        assert_eq!(*pages.lock().unwrap(), vec![1]);
        assert_eq!(table.per_page_options(), vec![5, 10, 20, 50]);
    }

    #[test]
    fn test_delegated_sort_left_to_caller() {
        let rows = users();
        let options = TableOptions::new().pagination(PaginationMode::delegated(1, 10));
        let mut table = DataTable::new(&columns(), options)
            .unwrap()
            .with_callbacks(Callbacks::new().on_sort_change(|_, _| {}));

        table.click_header("ads");
        assert_eq!(names(&table, &rows), vec!["Sara", "Ali", "Omar", "Khalid"]);
        assert_eq!(
            table.view(&rows).headers[2].sort,
            Some(SortDirection::Asc)
        );
    }

    #[test]
    fn test_visibility_survives_column_refresh() {
        let rows = users();
        let mut table = DataTable::new(&columns(), TableOptions::new()).unwrap();
        assert!(table.toggle_column("city"));
        assert!(!table.toggle_column("name"));
        table.click_header("ads");

        let mut next = columns();
        next.push(Column::new("id", "Id", |u: &User| u.id));
        next[2] = Column::new("ads", "Ads", |u: &User| u.ads);
        table.set_columns(&next).unwrap();

        assert!(!table.is_column_visible("city"));
        assert!(table.is_column_visible("id"));
        assert_eq!(table.sort_state().column(), None);

        let view = table.view(&rows);
        let headers: Vec<&str> = view.headers.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(headers, vec!["name", "ads", "id"]);
        assert_eq!(view.toolbar.columns.len(), 4);
    }

    #[test]
    fn test_row_keys_and_click() {
        let rows = users();
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        let mut table = DataTable::new(
            &columns(),
            TableOptions::new()
                .per_page(2)
                .row_key(|u: &User, _| format!("user-{}", u.id)),
        )
        .unwrap()
        .with_callbacks(Callbacks::new().on_row_click(move |u: &User| {
            sink.lock().unwrap().push(u.id);
        }));

        table.next_page(&rows);
        assert_eq!(table.view(&rows).row_keys(), vec!["user-3", "user-4"]);
        assert!(table.click_row(&rows, 1));
        assert!(!table.click_row(&rows, 2));
        assert_eq!(*clicked.lock().unwrap(), vec![4]);
    }

    #[test]
    fn test_empty_view() {
        let rows = users();
        let mut table = DataTable::new(
            &columns(),
            TableOptions::new().empty_state(EmptyState::new("No users yet")),
        )
        .unwrap();
        table.set_search_query("nobody");

        let view = table.view(&rows);
        assert!(view.is_empty());
        assert_eq!(view.empty.map(|e| e.title), Some("No users yet".to_string()));
        assert_eq!(view.pager.first_row, 0);
        assert_eq!(view.pager.items, vec![PageItem::Page(1)]);
        assert!(!view.pager.has_next);
    }

    #[test]
    fn test_null_cells_render_dash() {
        let rows = users();
        let table = DataTable::new(&columns(), TableOptions::new()).unwrap();
        let view = table.view(&rows);
        assert_eq!(view.column_text("city"), vec!["Riyadh", "Jeddah", "-", "Dammam"]);
    }
}
