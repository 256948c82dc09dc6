#![forbid(unsafe_code)]

//! Core: shared units and logging for the colfit crates.

pub mod logging;

// Call sites import these as `colfit_core::debug` and friends.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};

/// A width in whole pixels.
///
/// Container widths, declared sizes, bounds and allocated widths all use this
/// unit. Intermediate arithmetic inside the allocator runs in `f64` and is
/// rounded back to `Px` by the reconciler.
pub type Px = u32;

/// Convert a non-negative real width to [`Px`], rounding to nearest and
/// saturating at the representable range.
#[inline]
#[must_use]
pub fn px_round(value: f64) -> Px {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(Px::MAX)) as Px
}
