//! The allocation pipeline: base sizes, remainder distribution, floor
//! clamping with reclaim, and pixel reconciliation.

use colfit_core::{Px, debug, debug_span, px_round, trace, warn};

use crate::allocation::{Allocation, ColumnWidth, Fit};
use crate::classify::{Classification, classify};
use crate::column::{ColumnSpec, SizingPolicy};
use crate::error::AllocationError;
use crate::reconcile::reconcile;

/// Float comparisons between real-valued widths use this slack.
const EPSILON: f64 = 1e-9;

/// Allocator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocatorConfig {
    /// Overshoot (in pixels) small enough to skip the proportional reclaim.
    /// With the default of 0 every grow column with surplus gives back its
    /// share. Overshoot within the tolerance is instead trimmed from the last
    /// grow columns, leaving earlier ones at their even share. The layout
    /// stays feasible either way.
    pub overflow_tolerance: Px,
}

impl AllocatorConfig {
    /// Set the overflow tolerance.
    #[must_use]
    pub fn overflow_tolerance(mut self, tolerance: Px) -> Self {
        self.overflow_tolerance = tolerance;
        self
    }
}

/// Computes column widths for a container.
///
/// Stateless: every call recomputes from its inputs, so identical inputs
/// always give identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Allocator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator with explicit settings.
    #[must_use]
    pub const fn with_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> AllocatorConfig {
        self.config
    }

    /// Allocate widths for `columns` inside a container `container_width`
    /// pixels wide.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] for invalid column definitions. Layouts
    /// whose floors do not fit are not errors; see [`Fit::Overflow`].
    pub fn allocate(
        &self,
        columns: &[ColumnSpec],
        container_width: Px,
    ) -> Result<Allocation, AllocationError> {
        let span = debug_span!(
            "column_allocation",
            columns = columns.len(),
            container = container_width
        );
        let _guard = span.enter();

        let classes = classify(columns)?;
        trace!(
            fixed = classes.fixed.len(),
            percentage = classes.percentage.len(),
            grow = classes.grow.len(),
            "classified columns"
        );

        if columns.is_empty() {
            return Ok(Allocation::new(container_width, Vec::new(), Fit::Exact));
        }

        // Not measured yet: nothing to share, every column sits at its floor.
        if container_width == 0 {
            debug!("container width is 0, allocating minimum sizes");
            let widths: Vec<Px> = columns.iter().map(|c| c.min_size).collect();
            let total: u64 = widths.iter().map(|&w| u64::from(w)).sum();
            let fit = if total == 0 {
                Fit::Exact
            } else {
                Fit::Overflow {
                    overflow: saturate(total),
                }
            };
            return Ok(finish(columns, widths, container_width, fit));
        }

        let container = f64::from(container_width);
        let mut sizes = vec![0.0f64; columns.len()];

        allocate_base(columns, &classes, container, &mut sizes);
        let remaining = container - classes.base().map(|i| sizes[i]).sum::<f64>();
        trace!(remaining, "base allocation done");

        distribute_remainder(columns, &classes.grow, remaining, &mut sizes);
        let overshoot = reclaim_overshoot(
            columns,
            &classes.grow,
            container,
            f64::from(self.config.overflow_tolerance),
            &mut sizes,
        );
        let unabsorbed = trim_overshoot(columns, &classes.grow, overshoot, &mut sizes);
        if unabsorbed > 0.0 {
            debug!(unabsorbed, "overshoot left after reclaim");
        }

        let total: f64 = sizes.iter().sum();
        let (target, fit) = settle_fit(total, container_width);
        if !fit.is_feasible() {
            warn!(
                overflow = target - container_width,
                container = container_width,
                "column minimum sizes exceed the container"
            );
        }

        let floors: Vec<Px> = columns.iter().map(|c| c.min_size).collect();
        let ceilings: Vec<Px> = columns.iter().map(ColumnSpec::ceiling).collect();
        let widths = reconcile(&sizes, &floors, &ceilings, target);

        Ok(finish(columns, widths, container_width, fit))
    }
}

/// Allocate widths with the default [`Allocator`].
///
/// # Errors
///
/// See [`Allocator::allocate`].
pub fn allocate(columns: &[ColumnSpec], container_width: Px) -> Result<Allocation, AllocationError> {
    Allocator::new().allocate(columns, container_width)
}

/// Fixed columns get their declared size, percentage columns their share of
/// the container; both clamped into their bounds.
fn allocate_base(
    columns: &[ColumnSpec],
    classes: &Classification,
    container: f64,
    sizes: &mut [f64],
) {
    for &i in &classes.fixed {
        sizes[i] = columns[i].clamp(f64::from(columns[i].declared_size));
    }
    for &i in &classes.percentage {
        if let SizingPolicy::Percentage { percent } = columns[i].policy {
            sizes[i] = columns[i].clamp(container * f64::from(percent) / 100.0);
        }
    }
}

/// Share `remaining` among grow columns by weight, then raise each one to its
/// floor.
///
/// A column whose share would pass its maximum is frozen at the maximum and
/// the rest is re-shared among the others. Each pass either commits or
/// freezes at least one column, so this ends after at most `grow.len()`
/// passes.
fn distribute_remainder(columns: &[ColumnSpec], grow: &[usize], remaining: f64, sizes: &mut [f64]) {
    for &i in grow {
        sizes[i] = 0.0;
    }

    if remaining > EPSILON {
        let mut active: Vec<usize> = grow.to_vec();
        let mut left = remaining;

        while !active.is_empty() {
            let total_weight: f64 = active.iter().map(|&i| grow_weight(&columns[i])).sum();
            let share = |i: usize| left * grow_weight(&columns[i]) / total_weight;

            let frozen: Vec<usize> = active
                .iter()
                .copied()
                .filter(|&i| columns[i].max_size.is_some_and(|max| share(i) > f64::from(max)))
                .collect();

            if frozen.is_empty() {
                for &i in &active {
                    sizes[i] = share(i);
                }
                break;
            }

            for &i in &frozen {
                let max = f64::from(columns[i].ceiling());
                sizes[i] = max;
                left -= max;
            }
            active.retain(|i| !frozen.contains(i));
            trace!(frozen = frozen.len(), left, "grow columns frozen at max");
        }
    }

    for &i in grow {
        sizes[i] = sizes[i].max(f64::from(columns[i].min_size));
    }
}

/// Pull back width that floors pushed past the container.
///
/// Fixed-point relaxation over the grow columns that still sit above their
/// floor: each pass reclaims the overshoot in proportion to each column's
/// surplus (`size − min`). Stops when the overshoot is within `tolerance`,
/// when no column has surplus left, or after `grow.len()` passes. Returns the
/// overshoot that remains.
fn reclaim_overshoot(
    columns: &[ColumnSpec],
    grow: &[usize],
    container: f64,
    tolerance: f64,
    sizes: &mut [f64],
) -> f64 {
    let floor = |i: usize| f64::from(columns[i].min_size);
    let mut surplus: Vec<usize> = grow
        .iter()
        .copied()
        .filter(|&i| sizes[i] > floor(i) + EPSILON)
        .collect();

    for _ in 0..grow.len() {
        let overshoot = sizes.iter().sum::<f64>() - container;
        if overshoot <= tolerance + EPSILON || surplus.is_empty() {
            break;
        }

        let total_surplus: f64 = surplus.iter().map(|&i| sizes[i] - floor(i)).sum();
        if total_surplus <= overshoot {
            for &i in &surplus {
                sizes[i] = floor(i);
            }
            surplus.clear();
        } else {
            let ratio = overshoot / total_surplus;
            for &i in &surplus {
                sizes[i] -= (sizes[i] - floor(i)) * ratio;
            }
            surplus.retain(|&i| sizes[i] > floor(i) + EPSILON);
        }
    }

    (sizes.iter().sum::<f64>() - container).max(0.0)
}

/// Take `overshoot` out of grow column surplus, last column first. Returns
/// the part no column could give.
fn trim_overshoot(columns: &[ColumnSpec], grow: &[usize], overshoot: f64, sizes: &mut [f64]) -> f64 {
    let mut left = overshoot;
    for &i in grow.iter().rev() {
        if left <= EPSILON {
            break;
        }
        let surplus = sizes[i] - f64::from(columns[i].min_size);
        if surplus > EPSILON {
            let take = surplus.min(left);
            sizes[i] -= take;
            left -= take;
        }
    }
    left.max(0.0)
}

/// Decide the pixel total the reconciler must hit and the resulting fit.
fn settle_fit(total: f64, container_width: Px) -> (Px, Fit) {
    let container = f64::from(container_width);
    if (total - container).abs() <= 1e-6 {
        return (container_width, Fit::Exact);
    }

    let target = px_round(total);
    let fit = match target.cmp(&container_width) {
        std::cmp::Ordering::Equal => Fit::Exact,
        std::cmp::Ordering::Less => Fit::Underfilled {
            slack: container_width - target,
        },
        std::cmp::Ordering::Greater => Fit::Overflow {
            overflow: target - container_width,
        },
    };
    (target, fit)
}

fn grow_weight(column: &ColumnSpec) -> f64 {
    match column.policy {
        SizingPolicy::Grow { weight } => f64::from(weight),
        _ => 1.0,
    }
}

fn saturate(value: u64) -> Px {
    value.min(u64::from(Px::MAX)) as Px
}

fn finish(columns: &[ColumnSpec], widths: Vec<Px>, container_width: Px, fit: Fit) -> Allocation {
    let entries = columns
        .iter()
        .zip(widths)
        .map(|(column, width)| ColumnWidth {
            id: column.id.clone(),
            width,
        })
        .collect();
    Allocation::new(container_width, entries, fit)
}
