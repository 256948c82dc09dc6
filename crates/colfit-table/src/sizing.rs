//! The mutable column-sizing store a table renders from.

use std::collections::BTreeMap;

use colfit_core::Px;
use colfit_layout::Allocation;
use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;

/// Per-column width overrides, keyed by column id.
///
/// Columns without an entry render at their definition's size (floored by
/// its minimum). Allocations are copied in verbatim by [`apply`](Self::apply);
/// the allocator itself never touches this store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSizing {
    widths: BTreeMap<String, Px>,
}

impl ColumnSizing {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry an allocation covers with its allocated width.
    pub fn apply(&mut self, allocation: &Allocation) {
        for entry in allocation {
            self.widths.insert(entry.id.clone(), entry.width);
        }
    }

    /// Record a width for one column.
    pub fn set(&mut self, id: impl Into<String>, width: Px) {
        self.widths.insert(id.into(), width);
    }

    /// Drop the override for one column. Returns the removed width.
    pub fn reset(&mut self, id: &str) -> Option<Px> {
        self.widths.remove(id)
    }

    /// Drop every override.
    pub fn clear(&mut self) {
        self.widths.clear();
    }

    /// Stored width for a column, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Px> {
        self.widths.get(id).copied()
    }

    /// Width a column renders at: the stored width, or the definition's size,
    /// floored by its minimum either way.
    #[must_use]
    pub fn size_of(&self, column: &ColumnDef) -> Px {
        column.clamp(self.get(&column.id).unwrap_or(column.size))
    }

    /// Total table width for a set of columns.
    #[must_use]
    pub fn total_size(&self, columns: &[ColumnDef]) -> u64 {
        columns.iter().map(|c| u64::from(self.size_of(c))).sum()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// The raw id → width map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, Px> {
        &self.widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colfit_layout::{ColumnSpec, allocate};

    #[test]
    fn apply_copies_allocation() {
        let alloc = allocate(
            &[ColumnSpec::fixed("a", 100), ColumnSpec::grow("b")],
            300,
        )
        .expect("valid columns");
        let mut sizing = ColumnSizing::new();
        sizing.set("stale", 7);
        sizing.apply(&alloc);
        assert_eq!(sizing.get("a"), Some(100));
        assert_eq!(sizing.get("b"), Some(200));
        assert_eq!(sizing.get("stale"), Some(7));
        assert_eq!(sizing.len(), 3);
    }

    #[test]
    fn size_of_falls_back_to_definition() {
        let mut sizing = ColumnSizing::new();
        let age = ColumnDef::new("age").size(100);
        let name = ColumnDef::new("name").min_size(30);
        assert_eq!(sizing.size_of(&age), 100);
        assert_eq!(sizing.size_of(&name), 30);

        sizing.set("age", 140);
        assert_eq!(sizing.size_of(&age), 140);
        assert_eq!(sizing.total_size(&[age.clone(), name]), 170);

        assert_eq!(sizing.reset("age"), Some(140));
        assert_eq!(sizing.size_of(&age), 100);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut sizing = ColumnSizing::new();
        sizing.set("b", 2);
        sizing.set("a", 1);
        assert_eq!(
            serde_json::to_string(&sizing).expect("serialize"),
            r#"{"a":1,"b":2}"#
        );
        sizing.clear();
        assert!(sizing.is_empty());
    }
}
