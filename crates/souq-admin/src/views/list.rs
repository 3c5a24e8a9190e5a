//! Admin list view.
//!
//! The whole table state lives in the query string, so every link of the
//! rendered page leads to the next state of the table:
//!
//! | Parameter  | Meaning                                         |
//! |------------|-------------------------------------------------|
//! | `page`     | Current page (1-based)                          |
//! | `q`        | Search query                                    |
//! | `o`        | Sort column, `-` prefix for descending          |
//! | `per_page` | Page size                                       |
//! | `toggle`   | Comma-separated columns flipped from default    |

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::de::DeserializeOwned;
use souq_grid::{DataTable, SortDirection};
use tracing::{debug, warn};

use crate::api::{ApiResponse, RowsPayload};
use crate::error::Result;
use crate::screens::{
    advertisings_screen, categories_screen, category_features_screen, users_screen, Resource,
    Screen,
};
use crate::site::AdminSite;
use crate::templates::{render_data_table, TableLinks};

use super::render_admin_page;

/// Parameters for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewParams {
    /// Current page number (1-indexed).
    pub page: usize,
    /// Search query.
    pub search: Option<String>,
    /// Sort column (prefix with - for descending).
    pub ordering: Option<String>,
    /// Page size, the screen default when unset.
    pub per_page: Option<usize>,
    /// Columns whose visibility is flipped from their default.
    pub toggled: Vec<String>,
}

impl Default for ListViewParams {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            ordering: None,
            per_page: None,
            toggled: Vec::new(),
        }
    }
}

impl ListViewParams {
    /// Parses list view parameters from decoded query pairs.
    #[must_use]
    pub fn from_query<S: BuildHasher>(query: &HashMap<String, String, S>) -> Self {
        let page = query
            .get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1)
            .max(1);

        let search = query
            .get("q")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let ordering = query.get("o").cloned().filter(|s| !s.is_empty());

        let per_page = query
            .get("per_page")
            .and_then(|p| p.parse().ok())
            .filter(|n: &usize| *n > 0);

        let toggled = query
            .get("toggle")
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            page,
            search,
            ordering,
            per_page,
            toggled,
        }
    }

    /// Parses a raw query string such as `?page=2&q=ali`.
    #[must_use]
    pub fn parse(query_string: &str) -> Self {
        let query: HashMap<String, String> = query_string
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                pair.split_once('=').map_or_else(
                    || (urldecoding_simple(pair), String::new()),
                    |(k, v)| (urldecoding_simple(k), urldecoding_simple(v)),
                )
            })
            .collect();
        Self::from_query(&query)
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        if let Some(ref q) = self.search {
            pairs.push(("q", q.clone()));
        }
        if let Some(ref o) = self.ordering {
            pairs.push(("o", o.clone()));
        }
        if let Some(n) = self.per_page {
            pairs.push(("per_page", n.to_string()));
        }
        if !self.toggled.is_empty() {
            pairs.push(("toggle", self.toggled.join(",")));
        }
        pairs
    }

    /// Builds a query string from parameters.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let parts: Vec<String> = self
            .pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding_simple(&v)))
            .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }

    /// Returns the requested sort.
    #[must_use]
    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        let ordering = self.ordering.as_deref()?;
        Some(
            ordering
                .strip_prefix('-')
                .map_or((ordering, SortDirection::Asc), |column| {
                    (column, SortDirection::Desc)
                }),
        )
    }

    /// Returns the ordering after a click on the header of `column`:
    /// ascending, then descending, then none.
    #[must_use]
    pub fn next_ordering(&self, column: &str) -> Option<String> {
        match self.sort() {
            Some((current, SortDirection::Asc)) if current == column => Some(format!("-{column}")),
            Some((current, SortDirection::Desc)) if current == column => None,
            _ => Some(column.to_string()),
        }
    }

    /// Same parameters on another page.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Same parameters with `column` flipped in the toggle list.
    #[must_use]
    pub fn with_toggled(&self, column: &str) -> Self {
        let mut next = self.clone();
        let before = next.toggled.len();
        next.toggled.retain(|c| c != column);
        if next.toggled.len() == before {
            next.toggled.push(column.to_string());
        }
        next
    }

    /// Applies search, sort and column toggles to a table.
    ///
    /// Unknown or unsortable columns in the parameters are skipped: links
    /// may outlive a change of the screen's columns.
    pub fn apply_view_state<T>(&self, table: &mut DataTable<T>) {
        table.set_search_query(self.search.as_deref().unwrap_or(""));

        if let Some((column, direction)) = self.sort() {
            if let Err(e) = table.set_sort(column, Some(direction)) {
                warn!(error = %e, "ignoring sort parameter");
            }
        }

        for column in &self.toggled {
            if !table.toggle_column(column) {
                warn!(column = %column, "ignoring toggle of a fixed or unknown column");
            }
        }
    }

    /// Applies every parameter to a locally paged table.
    pub fn apply<T>(&self, table: &mut DataTable<T>, rows: &[T]) {
        if let Some(n) = self.per_page {
            table.set_per_page(n);
        }
        self.apply_view_state(table);
        if self.page > 1 && !table.go_to_page(rows, self.page) {
            debug!(page = self.page, "requested page out of range, staying on page 1");
        }
    }
}

/// Links of a list page, built from its current parameters.
#[derive(Debug, Clone)]
pub struct ListLinks<'a> {
    /// URL of the list page.
    pub list_url: &'a str,
    /// Current parameters.
    pub params: &'a ListViewParams,
}

impl ListLinks<'_> {
    fn url(&self, params: &ListViewParams) -> String {
        format!("{}{}", self.list_url, params.to_query_string())
    }
}

impl TableLinks for ListLinks<'_> {
    fn page(&self, page: usize) -> String {
        self.url(&self.params.with_page(page))
    }

    fn sort(&self, column: &str) -> String {
        self.url(&ListViewParams {
            ordering: self.params.next_ordering(column),
            ..self.params.clone()
        })
    }

    fn toggle(&self, column: &str) -> String {
        self.url(&self.params.with_toggled(column))
    }

    fn clear_search(&self) -> String {
        self.url(&ListViewParams {
            page: 1,
            search: None,
            ..self.params.clone()
        })
    }

    fn hidden_fields(&self, edited: &str) -> Vec<(String, String)> {
        self.params
            .pairs()
            .into_iter()
            .filter(|(k, _)| *k != edited && *k != "page")
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn row(&self, key: &str) -> Option<String> {
        Some(format!("{}{}/change/", self.list_url, urlencoding_simple(key)))
    }
}

/// Renders a list page for rows already run through `table`.
#[must_use]
pub fn list_view<T>(
    site: &AdminSite,
    resource: Resource,
    table: &DataTable<T>,
    rows: &[T],
    params: &ListViewParams,
) -> String {
    let list_url = site.list_url(resource);
    let links = ListLinks {
        list_url: &list_url,
        params,
    };
    let content = render_data_table(&table.view(rows), &links);

    let breadcrumbs = vec![
        ("Home".to_string(), Some(site.home_url())),
        (resource.title().to_string(), None),
    ];

    render_admin_page(
        site,
        resource.title(),
        Some(list_url.clone()),
        content,
        breadcrumbs,
        Vec::new(),
    )
}

/// Renders a screen from an API response body.
///
/// A paginated payload switches the screen to server paging and keeps the
/// page the server sent. A plain list is searched, sorted and paged here.
///
/// # Errors
///
/// Returns [`crate::AdminError::Json`] for a body that does not parse,
/// [`crate::AdminError::Api`] for a failed response and
/// [`crate::AdminError::Grid`] when the screen's table cannot be built.
pub fn render_screen<T: DeserializeOwned>(
    site: &AdminSite,
    screen: Screen<T>,
    body: &str,
    params: &ListViewParams,
) -> Result<String> {
    let response: ApiResponse<RowsPayload<T>> = serde_json::from_str(body)?;
    let payload = response.into_result()?;
    let resource = screen.resource;

    debug!(
        resource = %resource,
        rows = payload.rows().len(),
        paged = payload.is_paged(),
        "rendering list"
    );

    match payload {
        RowsPayload::Page(page) => {
            let screen = screen.delegated(page.pagination_mode());
            let mut table = screen.table()?;
            params.apply_view_state(&mut table);
            page.sync(&mut table);
            Ok(list_view(site, resource, &table, &page.data, params))
        }
        RowsPayload::All(rows) => {
            let mut table = screen.table()?;
            params.apply(&mut table, &rows);
            Ok(list_view(site, resource, &table, &rows, params))
        }
    }
}

/// Renders the screen of `resource` from an API response body.
///
/// # Errors
///
/// Fails like [`render_screen`].
pub fn render_resource(
    site: &AdminSite,
    resource: Resource,
    body: &str,
    params: &ListViewParams,
) -> Result<String> {
    match resource {
        Resource::Users => render_screen(site, users_screen(), body, params),
        Resource::Categories => render_screen(site, categories_screen(), body, params),
        Resource::CategoryFeatures => {
            render_screen(site, category_features_screen(), body, params)
        }
        Resource::Advertisings => render_screen(site, advertisings_screen(), body, params),
    }
}

/// Simple URL encoding.
fn urlencoding_simple(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Decodes `+` and `%XX` escapes. Malformed escapes are kept as is.
fn urldecoding_simple(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                out.push(hex.unwrap_or(b'%'));
                if hex.is_some() {
                    i += 2;
                }
            }
            byte => out.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
