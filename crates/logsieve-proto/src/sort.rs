//! Column sort configuration.

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The other direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Which column a view is sorted by. A `None` key keeps input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// Field to sort by.
    pub key: Option<FieldPath>,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Input order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Ascending by `key`.
    pub fn asc(key: impl Into<FieldPath>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Asc,
        }
    }

    /// Descending by `key`.
    pub fn desc(key: impl Into<FieldPath>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Configuration after a click on `column`'s header.
    ///
    /// Selecting the current ascending column flips it to descending; any
    /// other selection (a new column, or the current one while descending)
    /// sorts ascending.
    pub fn toggled(&self, column: impl Into<FieldPath>) -> Self {
        let column = column.into();
        let direction = if self.key.as_ref() == Some(&column) && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self {
            key: Some(column),
            direction,
        }
    }

    /// Check if a sort key is set.
    pub fn is_sorted(&self) -> bool {
        self.key.is_some()
    }
}
