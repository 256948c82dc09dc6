//! Column definitions as a table declares them.

use colfit_core::Px;
use colfit_layout::{AllocationError, ColumnSpec, SizingMeta, classify_meta};
use serde::{Deserialize, Serialize};

/// A table column definition.
///
/// Mirrors the shape table libraries use: a base `size` and `min_size`
/// (both defaulting to 0), an optional `max_size`, and free-form sizing
/// metadata that says whether the column is a percentage or grow column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub size: Px,
    #[serde(default)]
    pub min_size: Px,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<Px>,
    #[serde(default)]
    pub meta: SizingMeta,
}

impl ColumnDef {
    /// A column with no explicit size. Without metadata it is a fixed column
    /// that defers to its minimum.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            size: 0,
            min_size: 0,
            max_size: None,
            meta: SizingMeta::default(),
        }
    }

    /// Set the header label.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the base size.
    #[must_use]
    pub fn size(mut self, size: Px) -> Self {
        self.size = size;
        self
    }

    /// Set the minimum size.
    #[must_use]
    pub fn min_size(mut self, min_size: Px) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the maximum size.
    #[must_use]
    pub fn max_size(mut self, max_size: Px) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Mark the column as absorbing leftover width.
    #[must_use]
    pub fn grow(mut self) -> Self {
        self.meta.is_grow = true;
        self
    }

    /// Set the grow weight (implies [`grow`](Self::grow)).
    #[must_use]
    pub fn grow_weight(mut self, weight: u32) -> Self {
        self.meta.grow_weight = Some(weight);
        self
    }

    /// Size the column as a percentage (0 to 100) of the container.
    #[must_use]
    pub fn width_percentage(mut self, percent: f32) -> Self {
        self.meta.width_percentage = Some(percent);
        self
    }

    /// Clamp a width into this column's bounds.
    #[must_use]
    pub fn clamp(&self, width: Px) -> Px {
        let width = self.max_size.map_or(width, |max| width.min(max));
        width.max(self.min_size)
    }

    /// The allocator's view of this column, with `size` as declared size.
    ///
    /// # Errors
    ///
    /// Fails when the metadata is contradictory or out of range.
    pub fn to_spec(&self) -> Result<ColumnSpec, AllocationError> {
        self.to_spec_with_size(self.size)
    }

    /// The allocator's view of this column with an explicit declared size
    /// (the column's current width in the sizing state).
    ///
    /// # Errors
    ///
    /// Fails when the metadata is contradictory or out of range.
    pub fn to_spec_with_size(&self, declared: Px) -> Result<ColumnSpec, AllocationError> {
        Ok(ColumnSpec {
            id: self.id.clone(),
            declared_size: declared,
            min_size: self.min_size,
            max_size: self.max_size,
            policy: classify_meta(&self.id, &self.meta)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colfit_layout::SizingPolicy;

    #[test]
    fn builder_to_spec() {
        let spec = ColumnDef::new("message")
            .header("Message")
            .min_size(100)
            .width_percentage(20.0)
            .to_spec()
            .expect("valid column");
        assert_eq!(spec.policy, SizingPolicy::Percentage { percent: 20.0 });
        assert_eq!(spec.min_size, 100);
        assert_eq!(spec.declared_size, 0);
    }

    #[test]
    fn weight_makes_grow() {
        let spec = ColumnDef::new("info").grow_weight(2).to_spec().expect("valid");
        assert_eq!(spec.policy, SizingPolicy::Grow { weight: 2 });
    }

    #[test]
    fn conflicting_meta_is_rejected() {
        let err = ColumnDef::new("x")
            .grow()
            .width_percentage(10.0)
            .to_spec()
            .unwrap_err();
        assert_eq!(err, AllocationError::ConfigConflict { column: "x".into() });
    }

    #[test]
    fn clamp_applies_bounds() {
        let col = ColumnDef::new("age").min_size(40).max_size(120);
        assert_eq!(col.clamp(10), 40);
        assert_eq!(col.clamp(90), 90);
        assert_eq!(col.clamp(500), 120);
    }

    #[test]
    fn deserializes_definition_shape() {
        let col: ColumnDef = serde_json::from_str(
            r#"{"id":"message","header":"Message","minSize":100,"meta":{"widthPercentage":20}}"#,
        )
        .expect("valid json");
        assert_eq!(
            col,
            ColumnDef::new("message")
                .header("Message")
                .min_size(100)
                .width_percentage(20.0)
        );
    }
}
