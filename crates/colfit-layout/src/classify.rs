//! Policy classification and column validation.

use std::collections::BTreeSet;

use crate::column::{ColumnSpec, SizingMeta, SizingPolicy};
use crate::error::AllocationError;

/// Columns partitioned by policy.
///
/// Each group holds indices into the classified slice, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub fixed: Vec<usize>,
    pub percentage: Vec<usize>,
    pub grow: Vec<usize>,
}

impl Classification {
    /// Fixed and percentage indices, the columns sized before any leftover
    /// is shared out.
    pub fn base(&self) -> impl Iterator<Item = usize> + '_ {
        self.fixed.iter().chain(&self.percentage).copied()
    }
}

/// Turn loose column metadata into a sizing policy.
///
/// A width percentage makes the column [`SizingPolicy::Percentage`]; the grow
/// flag (or a grow weight) makes it [`SizingPolicy::Grow`]; neither leaves it
/// [`SizingPolicy::Fixed`]. Carrying both is rejected rather than resolved.
pub fn classify_meta(column: &str, meta: &SizingMeta) -> Result<SizingPolicy, AllocationError> {
    let grows = meta.is_grow || meta.grow_weight.is_some();
    match (meta.width_percentage, grows) {
        (Some(_), true) => Err(AllocationError::ConfigConflict {
            column: column.to_owned(),
        }),
        (Some(percent), false) => {
            check_percentage(column, percent)?;
            Ok(SizingPolicy::Percentage { percent })
        }
        (None, true) => {
            let weight = meta.grow_weight.unwrap_or(1);
            if weight == 0 {
                return Err(AllocationError::ZeroGrowWeight {
                    column: column.to_owned(),
                });
            }
            Ok(SizingPolicy::Grow { weight })
        }
        (None, false) => Ok(SizingPolicy::Fixed),
    }
}

/// Validate columns and partition them by policy.
///
/// Rejects duplicate ids, out-of-range percentages, inverted bounds and zero
/// grow weights. The first offending column (in input order) is reported.
pub fn classify(columns: &[ColumnSpec]) -> Result<Classification, AllocationError> {
    let mut seen = BTreeSet::new();
    let mut classes = Classification::default();

    for (i, column) in columns.iter().enumerate() {
        if !seen.insert(column.id.as_str()) {
            return Err(AllocationError::DuplicateColumnId {
                column: column.id.clone(),
            });
        }
        if let Some(max) = column.max_size
            && max < column.min_size
        {
            return Err(AllocationError::InvalidBounds {
                column: column.id.clone(),
                min: column.min_size,
                max,
            });
        }
        match column.policy {
            SizingPolicy::Fixed => classes.fixed.push(i),
            SizingPolicy::Percentage { percent } => {
                check_percentage(&column.id, percent)?;
                classes.percentage.push(i);
            }
            SizingPolicy::Grow { weight } => {
                if weight == 0 {
                    return Err(AllocationError::ZeroGrowWeight {
                        column: column.id.clone(),
                    });
                }
                classes.grow.push(i);
            }
        }
    }

    Ok(classes)
}

fn check_percentage(column: &str, percent: f32) -> Result<(), AllocationError> {
    if (0.0..=100.0).contains(&percent) {
        Ok(())
    } else {
        Err(AllocationError::InvalidPercentage {
            column: column.to_owned(),
            value: percent,
        })
    }
}
