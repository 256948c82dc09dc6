//! Allocation results.

use std::collections::BTreeMap;

use colfit_core::Px;
use serde::{Deserialize, Serialize};

/// How the allocated widths relate to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Fit {
    /// Widths sum to the container width exactly.
    Exact,
    /// Nothing could absorb the leftover: no grow columns, or every grow
    /// column is at its maximum. `slack` pixels of the container stay empty.
    Underfilled { slack: Px },
    /// Minimum sizes (or fixed sizes) do not fit. Columns overflow the
    /// container by `overflow` pixels and the table scrolls horizontally.
    Overflow { overflow: Px },
}

impl Fit {
    /// Whether every column fits inside the container.
    #[inline]
    #[must_use]
    pub const fn is_feasible(self) -> bool {
        !matches!(self, Self::Overflow { .. })
    }
}

/// One entry of an [`Allocation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnWidth {
    pub id: String,
    pub width: Px,
}

/// Allocated widths for every input column, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    container_width: Px,
    columns: Vec<ColumnWidth>,
    fit: Fit,
}

impl Allocation {
    pub(crate) fn new(container_width: Px, columns: Vec<ColumnWidth>, fit: Fit) -> Self {
        Self {
            container_width,
            columns,
            fit,
        }
    }

    /// Container width this allocation was computed for.
    #[must_use]
    pub const fn container_width(&self) -> Px {
        self.container_width
    }

    /// Fit status.
    #[must_use]
    pub const fn fit(&self) -> Fit {
        self.fit
    }

    /// Pixels by which the columns overflow the container (0 when feasible).
    #[must_use]
    pub const fn overflow(&self) -> Px {
        match self.fit {
            Fit::Overflow { overflow } => overflow,
            _ => 0,
        }
    }

    /// Width allocated to the column with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Px> {
        self.columns.iter().find(|c| c.id == id).map(|c| c.width)
    }

    /// Entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnWidth> {
        self.columns.iter()
    }

    /// Widths in input order.
    #[must_use]
    pub fn widths(&self) -> Vec<Px> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Sum of all allocated widths.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.columns.iter().map(|c| u64::from(c.width)).sum()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The id → width mapping, the shape a table's sizing state expects.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Px> {
        self.columns
            .iter()
            .map(|c| (c.id.clone(), c.width))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = &'a ColumnWidth;
    type IntoIter = std::slice::Iter<'a, ColumnWidth>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
