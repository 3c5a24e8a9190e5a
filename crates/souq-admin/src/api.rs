//! Payload envelopes returned by the marketplace API.
//!
//! Every endpoint answers `{ "success": bool, "data": ..., "message": ... }`.
//! List endpoints return either every row at once or one page of a
//! server-paginated result.

use serde::{Deserialize, Serialize};
use souq_grid::{DataTable, PaginationMode};

use crate::error::{AdminError, Result};

/// The `{success, data, message}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload, absent on failure.
    pub data: Option<T>,
    /// Human-readable message, usually set on failure.
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Builds a failed response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwraps the payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] with the server message when the request
    /// failed or succeeded without data.
    pub fn into_result(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(AdminError::Api(
                self.message
                    .unwrap_or_else(|| "response carries no data".to_string()),
            )),
            (false, _) => Err(AdminError::Api(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            )),
        }
    }
}

/// One page of a server-paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePayload<T> {
    /// Rows of the page.
    pub data: Vec<T>,
    /// Page number (1-based).
    pub current_page: usize,
    /// Number of the last page.
    pub last_page: usize,
    /// Page size used by the server.
    pub per_page: usize,
    /// Row count across all pages.
    pub total: usize,
}

impl<T> PagePayload<T> {
    /// Returns the delegated paging mode matching this page.
    #[must_use]
    pub const fn pagination_mode(&self) -> PaginationMode {
        PaginationMode::delegated(self.current_page, self.per_page)
            .with_total_pages(self.last_page)
            .with_total_rows(self.total)
    }

    /// Mirrors this page into a delegated table after a refetch.
    pub fn sync(&self, table: &mut DataTable<T>) {
        table.sync_delegated(self.current_page, Some(self.last_page), Some(self.total));
    }
}

/// Rows of a list endpoint: everything at once, or one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowsPayload<T> {
    /// One page of a server-paginated result.
    Page(PagePayload<T>),
    /// The complete list.
    All(Vec<T>),
}

impl<T> RowsPayload<T> {
    /// Returns the rows at hand.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Page(page) => &page.data,
            Self::All(rows) => rows,
        }
    }

    /// Returns whether paging is owned by the server.
    #[must_use]
    pub const fn is_paged(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}
