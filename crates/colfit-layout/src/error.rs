//! Configuration errors raised while validating column specifications.

use std::fmt;

use colfit_core::Px;

/// A column definition the allocator refuses to lay out.
///
/// These are caller bugs (bad column definitions), so they abort the
/// computation. An infeasible layout is *not* an error: it is reported as
/// [`Fit::Overflow`](crate::Fit::Overflow) on a successful allocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// The column declares both a width percentage and the grow flag.
    ConfigConflict { column: String },
    /// The width percentage is NaN or outside `0..=100`.
    InvalidPercentage { column: String, value: f32 },
    /// The maximum size is below the minimum size.
    InvalidBounds { column: String, min: Px, max: Px },
    /// A grow column with weight zero would never receive width.
    ZeroGrowWeight { column: String },
    /// Two columns share an id, so the output mapping would be ambiguous.
    DuplicateColumnId { column: String },
}

impl AllocationError {
    /// Id of the offending column.
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::ConfigConflict { column }
            | Self::InvalidPercentage { column, .. }
            | Self::InvalidBounds { column, .. }
            | Self::ZeroGrowWeight { column }
            | Self::DuplicateColumnId { column } => column,
        }
    }
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigConflict { column } => write!(
                f,
                "column {column:?} declares both a width percentage and the grow flag"
            ),
            Self::InvalidPercentage { column, value } => write!(
                f,
                "column {column:?} has width percentage {value}, expected 0..=100"
            ),
            Self::InvalidBounds { column, min, max } => write!(
                f,
                "column {column:?} has max size {max} below min size {min}"
            ),
            Self::ZeroGrowWeight { column } => {
                write!(f, "column {column:?} has grow weight 0")
            }
            Self::DuplicateColumnId { column } => {
                write!(f, "column id {column:?} appears more than once")
            }
        }
    }
}

impl std::error::Error for AllocationError {}
