//! Column visibility store.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::column::PreparedColumn;

/// Tracks which columns are shown.
///
/// Columns that are not toggleable are always visible, whatever the
/// store is asked to do.
#[derive(Debug, Clone, Default)]
pub struct VisibilityStore {
    /// Visibility of each toggleable column.
    toggles: HashMap<String, bool>,
    /// Columns that can never be hidden.
    pinned: HashSet<String>,
}

impl VisibilityStore {
    /// Seeds the store from the columns' initial visibility.
    #[must_use]
    pub fn new<T>(columns: &[PreparedColumn<T>]) -> Self {
        let mut store = Self::default();
        store.reconcile(columns);
        store
    }

    /// Returns whether a column is visible.
    ///
    /// Unknown ids are not visible.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.pinned.contains(id) || self.toggles.get(id).copied().unwrap_or(false)
    }

    /// Flips the visibility of a toggleable column.
    ///
    /// Returns `false` and does nothing for pinned or unknown ids.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(visible) = self.toggles.get_mut(id) else {
            return false;
        };
        *visible = !*visible;
        debug!(column = id, visible = *visible, "column visibility toggled");
        true
    }

    /// Shows or hides every toggleable column at once.
    pub fn set_all(&mut self, visible: bool) {
        for value in self.toggles.values_mut() {
            *value = visible;
        }
        debug!(visible, count = self.toggles.len(), "all toggleable columns set");
    }

    /// Brings the store in line with a new column set.
    ///
    /// Choices made for columns that still exist are kept, new columns
    /// start at their default, and ids that disappeared are forgotten.
    pub fn reconcile<T>(&mut self, columns: &[PreparedColumn<T>]) {
        let mut toggles = HashMap::new();
        let mut pinned = HashSet::new();

        for column in columns {
            if column.toggleable {
                let visible = self
                    .toggles
                    .get(&column.id)
                    .copied()
                    .unwrap_or(column.initial_visible);
                toggles.insert(column.id.clone(), visible);
            } else {
                pinned.insert(column.id.clone());
            }
        }

        let dropped = self
            .toggles
            .keys()
            .filter(|id| !toggles.contains_key(*id) && !pinned.contains(*id))
            .count();
        if dropped > 0 {
            debug!(dropped, "stale column visibility dropped");
        }

        self.toggles = toggles;
        self.pinned = pinned;
    }

    /// Returns the visible columns, in declaration order.
    #[must_use]
    pub fn visible_columns<'c, T>(
        &self,
        columns: &'c [PreparedColumn<T>],
    ) -> Vec<&'c PreparedColumn<T>> {
        columns.iter().filter(|c| self.is_visible(&c.id)).collect()
    }

    /// Returns the ids of the visible columns, in declaration order.
    #[must_use]
    pub fn visible_ids<T>(&self, columns: &[PreparedColumn<T>]) -> Vec<String> {
        columns
            .iter()
            .filter(|c| self.is_visible(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Returns the number of toggleable columns currently hidden.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.toggles.values().filter(|v| !**v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{prepare_columns, Column};

    struct Ad {
        title: String,
        city: String,
        views: i64,
    }

    fn columns() -> Vec<PreparedColumn<Ad>> {
        prepare_columns(&[
            Column::new("title", "Title", |a: &Ad| a.title.clone()).toggleable(false),
            Column::new("city", "City", |a: &Ad| a.city.clone()),
            Column::new("views", "Views", |a: &Ad| a.views).default_hidden(),
        ])
        .unwrap()
    }

    #[test]
    fn test_seeded_from_defaults() {
        let store = VisibilityStore::new(&columns());
        assert!(store.is_visible("title"));
        assert!(store.is_visible("city"));
        assert!(!store.is_visible("views"));
        assert!(!store.is_visible("missing"));
    }

    #[test]
    fn test_toggle_ignores_pinned_columns() {
        let mut store = VisibilityStore::new(&columns());
        assert!(!store.toggle("title"));
        assert!(store.is_visible("title"));

        assert!(store.toggle("city"));
        assert!(!store.is_visible("city"));
        assert!(store.toggle("city"));
        assert!(store.is_visible("city"));
    }

    #[test]
    fn test_set_all_keeps_pinned_visible() {
        let cols = columns();
        let mut store = VisibilityStore::new(&cols);

        store.set_all(false);
        let visible: Vec<&str> = store
            .visible_columns(&cols)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(visible, vec!["title"]);
        assert_eq!(store.hidden_count(), 2);

        store.set_all(true);
        assert_eq!(store.visible_ids(&cols), vec!["title", "city", "views"]);
    }

    #[test]
    fn test_reconcile_preserves_survivors() {
        let mut store = VisibilityStore::new(&columns());
        store.toggle("city");
        store.toggle("views");

        let next = prepare_columns(&[
            Column::new("title", "Title", |a: &Ad| a.title.clone()).toggleable(false),
            Column::new("city", "City", |a: &Ad| a.city.clone()),
            Column::new("created", "Created", |a: &Ad| a.views).default_hidden(),
        ])
        .unwrap();
        store.reconcile(&next);

        assert!(!store.is_visible("city"));
        assert!(!store.is_visible("created"));
        assert!(!store.is_visible("views"));
        assert_eq!(store.hidden_count(), 2);
    }
}
