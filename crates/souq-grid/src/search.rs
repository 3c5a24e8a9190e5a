//! Search stage: query commit policy and row filtering.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::column::PreparedColumn;

/// Delay between the last keystroke and the commit in real-time mode.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// A caller-supplied predicate replacing the default row matcher.
///
/// Receives the trimmed query as typed (case preserved).
pub type RowFilter<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Returns whether a row matches a lower-cased needle on any searchable
/// column. An empty needle matches everything.
#[must_use]
pub fn row_matches<T>(row: &T, columns: &[PreparedColumn<T>], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .filter(|c| c.searchable)
        .any(|c| c.search_text(row).contains(needle))
}

/// Reduces `rows` by `query`.
///
/// With `server_side` set the rows are trusted to be filtered already and
/// only a `custom` filter is applied. Without it the custom filter, if
/// any, replaces the default substring matcher.
#[must_use]
pub fn filter_rows<'a, T>(
    rows: &'a [T],
    columns: &[PreparedColumn<T>],
    query: &str,
    server_side: bool,
    custom: Option<&RowFilter<T>>,
) -> Vec<&'a T> {
    let query = query.trim();

    if let Some(custom) = custom {
        return rows.iter().filter(|row| custom(*row, query)).collect();
    }
    if server_side {
        return rows.iter().collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(*row, columns, &needle))
        .collect()
}

/// The search input and its commit policy.
///
/// Keystrokes only change the draft. The draft becomes the committed
/// query on blur, Enter or the search button, or, in real-time mode, once
/// the debounce delay has passed since the last keystroke. Time is passed
/// in by the caller so the debounce can be driven by any clock.
#[derive(Debug, Clone)]
pub struct SearchBox {
    draft: String,
    query: String,
    real_time: bool,
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(false, DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchBox {
    /// Creates an empty search box.
    #[must_use]
    pub const fn new(real_time: bool, delay: Duration) -> Self {
        Self {
            draft: String::new(),
            query: String::new(),
            real_time,
            delay,
            deadline: None,
        }
    }

    /// Returns the text currently in the input.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns the committed, trimmed query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns whether a debounced commit is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records a keystroke. In real-time mode this (re)schedules a commit.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.draft = text.to_string();
        if self.real_time {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Commits the draft if the debounce delay has elapsed.
    ///
    /// Returns the new query when it changed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.commit()
            }
            _ => None,
        }
    }

    /// Commits the draft immediately (Enter key or search button).
    pub fn submit(&mut self) -> Option<String> {
        self.deadline = None;
        self.commit()
    }

    /// Commits the draft when the input loses focus.
    pub fn blur(&mut self) -> Option<String> {
        self.submit()
    }

    /// Empties the input and commits the empty query.
    pub fn clear(&mut self) -> Option<String> {
        self.draft.clear();
        self.submit()
    }

    /// Replaces both draft and query on behalf of the caller.
    pub fn set_query(&mut self, text: &str) -> Option<String> {
        self.draft = text.to_string();
        self.submit()
    }

    fn commit(&mut self) -> Option<String> {
        let next = self.draft.trim();
        if next == self.query {
            return None;
        }
        self.query = next.to_string();
        debug!(query = %self.query, "search query committed");
        Some(self.query.clone())
    }
}
