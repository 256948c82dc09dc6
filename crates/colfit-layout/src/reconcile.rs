//! Rounding real-valued widths to whole pixels with exact sum conservation.

use std::cmp::Ordering;

use colfit_core::Px;

/// Targets within this distance below an integer round up to it, so float
/// noise such as `99.99999999` cannot drop a column under its floor.
const SNAP_EPSILON: f64 = 1e-6;

/// Round real-valued widths to whole pixels that sum to `total`.
///
/// # Algorithm: Largest Remainder
///
/// 1. **Floor phase**: `x_i = floor(r_i)`, then clamped into
///    `floors[i]..=ceilings[i]`.
/// 2. **Deficit**: `D = total − Σ x_i` pixels are still unassigned.
/// 3. **Priority sort**: rank columns by remainder `r_i − x_i` (descending),
///    ties broken by smaller index, so leftover pixels go to earlier columns.
/// 4. **Distribute**: one extra pixel to each of the top `D` columns that
///    are still below their ceiling.
///
/// If the floored sum already exceeds `total` (only possible through
/// snapping), pixels are taken back from the most over-rounded columns that
/// are above their floor.
///
/// # Properties
///
/// 1. **Sum conservation**: `Σ x_i = total` whenever `total` is within one
///    pixel per column of `Σ r_i` and the bounds leave room.
/// 2. **Bounded displacement**: each `x_i` is `floor(r_i)` or `ceil(r_i)`.
/// 3. **Bounds**: `floors[i] ≤ x_i ≤ ceilings[i]`.
/// 4. **Deterministic**: the index tie-break makes the order total.
///
/// # Example
///
/// ```
/// use colfit_layout::reconcile;
///
/// // Two grow columns sharing 101 pixels: the first one gets the odd pixel.
/// let widths = reconcile(&[50.5, 50.5], &[0, 0], &[u32::MAX, u32::MAX], 101);
/// assert_eq!(widths, vec![51, 50]);
/// ```
pub fn reconcile(targets: &[f64], floors: &[Px], ceilings: &[Px], total: Px) -> Vec<Px> {
    debug_assert_eq!(targets.len(), floors.len());
    debug_assert_eq!(targets.len(), ceilings.len());

    let n = targets.len();
    if n == 0 {
        return Vec::new();
    }

    // Step 1: floor and clamp
    let mut result: Vec<Px> = (0..n)
        .map(|i| {
            let down = (targets[i].max(0.0) + SNAP_EPSILON).floor();
            let down = down.min(f64::from(Px::MAX)) as Px;
            down.min(ceilings[i]).max(floors[i])
        })
        .collect();

    let floor_sum: u64 = result.iter().map(|&w| u64::from(w)).sum();
    let total = u64::from(total);

    match floor_sum.cmp(&total) {
        Ordering::Equal => {}
        Ordering::Less => {
            // Steps 2-4: hand out the deficit by largest remainder
            let deficit = (total - floor_sum) as usize;
            let mut priority: Vec<(usize, f64)> = (0..n)
                .filter(|&i| result[i] < ceilings[i])
                .map(|i| (i, targets[i] - f64::from(result[i])))
                .collect();
            priority.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            for &(i, _) in priority.iter().take(deficit) {
                result[i] += 1;
            }
        }
        Ordering::Greater => shed_excess(&mut result, targets, floors, floor_sum - total),
    }

    result
}

/// Take `excess` pixels back, one at a time, from the column rounded furthest
/// above its target. Columns at their floor are never reduced.
fn shed_excess(result: &mut [Px], targets: &[f64], floors: &[Px], excess: u64) {
    for _ in 0..excess {
        let candidate = (0..result.len())
            .filter(|&i| result[i] > floors[i])
            .min_by(|&a, &b| {
                let over_a = targets[a] - f64::from(result[a]);
                let over_b = targets[b] - f64::from(result[b]);
                over_a
                    .partial_cmp(&over_b)
                    .unwrap_or(Ordering::Equal)
                    // Later columns give up pixels first.
                    .then_with(|| b.cmp(&a))
            });
        match candidate {
            Some(i) => result[i] -= 1,
            None => break,
        }
    }
}
