//! Sort stage: single-column, three-state sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::column::PreparedColumn;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns `"asc"` or `"desc"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses `"asc"` / `"desc"` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSort {
    /// Id of the sorted column.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Sort state of a table. Either unsorted or sorted by exactly one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<ActiveSort>,
}

impl SortState {
    /// Creates an unsorted state.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a state sorted by `column`.
    #[must_use]
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active: Some(ActiveSort {
                column: column.into(),
                direction,
            }),
        }
    }

    /// Returns the active sort, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveSort> {
        self.active.as_ref()
    }

    /// Returns the sorted column id.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.column.as_str())
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|a| a.direction)
    }

    /// Returns the direction if `column` is the sorted column.
    #[must_use]
    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        self.active
            .as_ref()
            .filter(|a| a.column == column)
            .map(|a| a.direction)
    }

    /// Advances the cycle for a header click on `column`.
    ///
    /// The same column goes ascending, descending, then unsorted. Another
    /// column always starts at ascending.
    pub fn cycle(&mut self, column: &str) {
        self.active = match self.active.take() {
            Some(active) if active.column == column => match active.direction {
                SortDirection::Asc => Some(ActiveSort {
                    direction: SortDirection::Desc,
                    ..active
                }),
                SortDirection::Desc => None,
            },
            _ => Some(ActiveSort {
                column: column.to_string(),
                direction: SortDirection::Asc,
            }),
        };
        debug!(
            column = self.column().unwrap_or("-"),
            direction = self.direction().map_or("-", SortDirection::as_str),
            "sort changed"
        );
    }

    /// Clears the sort.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Compares two sort keys.
///
/// Null keys go last in both directions; only the order of present
/// values flips.
#[must_use]
pub fn compare_keys(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Stable-sorts rows by a column.
///
/// Each key is read once per row.
pub fn sort_rows<T>(rows: &mut Vec<&T>, column: &PreparedColumn<T>, direction: SortDirection) {
    let mut keyed: Vec<(CellValue, &T)> = rows
        .drain(..)
        .map(|r| (column.sort_key(r), r))
        .collect();
    keyed.sort_by(|a, b| compare_keys(&a.0, &b.0, direction));
    rows.extend(keyed.into_iter().map(|(_, r)| r));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{prepare_columns, Column};

    struct Feature {
        name: String,
        order: Option<i64>,
    }

    fn feature(name: &str, order: Option<i64>) -> Feature {
        Feature {
            name: name.to_string(),
            order,
        }
    }

    #[test]
    fn test_cycle_closes_after_three_clicks() {
        let mut state = SortState::none();
        state.cycle("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Asc));
        state.cycle("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Desc));
        state.cycle("name");
        assert_eq!(state, SortState::none());
        state.cycle("name");
        assert_eq!(state, SortState::by("name", SortDirection::Asc));
    }

    #[test]
    fn test_other_column_starts_ascending() {
        let mut state = SortState::by("name", SortDirection::Desc);
        state.cycle("order");
        assert_eq!(state.column(), Some("order"));
        assert_eq!(state.direction(), Some(SortDirection::Asc));
        assert_eq!(state.direction_for("name"), None);
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let rows = vec![
            feature("b", None),
            feature("c", Some(3)),
            feature("a", Some(1)),
            feature("d", None),
        ];
        let columns =
            prepare_columns(&[Column::new("order", "Order", |f: &Feature| f.order)]).unwrap();

        let mut asc: Vec<&Feature> = rows.iter().collect();
        sort_rows(&mut asc, &columns[0], SortDirection::Asc);
        let names: Vec<&str> = asc.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "b", "d"]);

        let mut desc: Vec<&Feature> = rows.iter().collect();
        sort_rows(&mut desc, &columns[0], SortDirection::Desc);
        let names: Vec<&str> = desc.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let rows = vec![
            feature("first", Some(1)),
            feature("second", Some(0)),
            feature("third", Some(1)),
        ];
        let columns =
            prepare_columns(&[Column::new("order", "Order", |f: &Feature| f.order)]).unwrap();

        let mut sorted: Vec<&Feature> = rows.iter().collect();
        sort_rows(&mut sorted, &columns[0], SortDirection::Desc);
        let names: Vec<&str> = sorted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third", "second"]);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("up"), None);
        assert_eq!(SortDirection::Asc.as_str(), "asc");
    }
}
