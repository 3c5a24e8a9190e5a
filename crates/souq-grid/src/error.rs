//! Error types for the grid engine.

use thiserror::Error;

/// Errors raised while configuring a table.
///
/// Interactions on an already configured table never fail; they either
/// apply or are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Two column descriptors share the same id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    /// A column id does not name any column of the table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Sorting was requested on a column that is not sortable.
    #[error("column is not sortable: {0}")]
    NotSortable(String),

    /// The page size is zero.
    #[error("rows per page must be at least 1")]
    InvalidPerPage,
}

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
