//! Column specifications: identity, declared size, bounds and sizing policy.

use colfit_core::Px;
use serde::{Deserialize, Serialize};

/// How a column takes its width.
///
/// The variants are mutually exclusive. Columns whose metadata carries neither
/// a percentage nor the grow flag are [`SizingPolicy::Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Exactly the declared size (floored by the minimum).
    #[default]
    Fixed,
    /// A share of the container width, as a whole-number percent (0.0 to 100.0).
    Percentage { percent: f32 },
    /// A share of whatever width fixed and percentage columns leave over,
    /// proportional to `weight` among all grow columns.
    Grow { weight: u32 },
}

impl SizingPolicy {
    /// Grow with the default weight of 1.
    pub const GROW: Self = Self::Grow { weight: 1 };

    /// Whether this is a grow policy.
    #[inline]
    #[must_use]
    pub const fn is_grow(self) -> bool {
        matches!(self, Self::Grow { .. })
    }
}

/// Untyped sizing metadata as carried on a column definition.
///
/// This is the loose shape table column definitions use (`widthPercentage`,
/// `isGrow`). [`classify_meta`](crate::classify_meta) turns it into a
/// [`SizingPolicy`], rejecting combinations that make no sense.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingMeta {
    /// Width as a whole-number percent of the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_percentage: Option<f32>,
    /// Absorb leftover width.
    #[serde(default)]
    pub is_grow: bool,
    /// Relative share of leftover width. Setting it implies `is_grow`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grow_weight: Option<u32>,
}

impl SizingMeta {
    /// Metadata for a grow column.
    #[must_use]
    pub const fn grow() -> Self {
        Self {
            width_percentage: None,
            is_grow: true,
            grow_weight: None,
        }
    }

    /// Metadata for a percentage column.
    #[must_use]
    pub const fn percentage(percent: f32) -> Self {
        Self {
            width_percentage: Some(percent),
            is_grow: false,
            grow_weight: None,
        }
    }
}

/// One table column as seen by the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Stable unique identifier.
    pub id: String,
    /// Author-specified width. `0` means "no explicit size".
    #[serde(default)]
    pub declared_size: Px,
    /// Lower bound on the allocated width.
    #[serde(default)]
    pub min_size: Px,
    /// Upper bound on the allocated width, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<Px>,
    /// Sizing policy.
    #[serde(default)]
    pub policy: SizingPolicy,
}

impl ColumnSpec {
    /// A fixed column with the given declared size.
    pub fn fixed(id: impl Into<String>, size: Px) -> Self {
        Self {
            id: id.into(),
            declared_size: size,
            min_size: 0,
            max_size: None,
            policy: SizingPolicy::Fixed,
        }
    }

    /// A percentage column (`percent` in 0.0 to 100.0).
    pub fn percentage(id: impl Into<String>, percent: f32) -> Self {
        Self {
            id: id.into(),
            declared_size: 0,
            min_size: 0,
            max_size: None,
            policy: SizingPolicy::Percentage { percent },
        }
    }

    /// A grow column with weight 1.
    pub fn grow(id: impl Into<String>) -> Self {
        Self::grow_weighted(id, 1)
    }

    /// A grow column with an explicit weight.
    pub fn grow_weighted(id: impl Into<String>, weight: u32) -> Self {
        Self {
            id: id.into(),
            declared_size: 0,
            min_size: 0,
            max_size: None,
            policy: SizingPolicy::Grow { weight },
        }
    }

    /// Set the minimum size.
    #[must_use]
    pub fn min(mut self, min_size: Px) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the maximum size.
    #[must_use]
    pub fn max(mut self, max_size: Px) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Set the declared size.
    #[must_use]
    pub fn declared(mut self, size: Px) -> Self {
        self.declared_size = size;
        self
    }

    /// Upper bound, with "unbounded" as [`Px::MAX`].
    #[inline]
    #[must_use]
    pub fn ceiling(&self) -> Px {
        self.max_size.unwrap_or(Px::MAX)
    }

    /// Clamp a real width into `min_size..=max_size`. The floor wins if the
    /// bounds are inverted.
    #[inline]
    pub(crate) fn clamp(&self, width: f64) -> f64 {
        let width = match self.max_size {
            Some(max) => width.min(f64::from(max)),
            None => width,
        };
        width.max(f64::from(self.min_size))
    }
}
