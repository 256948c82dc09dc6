#![forbid(unsafe_code)]

//! Column-width allocation for tables.
//!
//! Given an ordered list of [`ColumnSpec`]s and a container width, the
//! [`Allocator`] produces one whole-pixel width per column:
//!
//! - [`SizingPolicy::Fixed`] columns take their declared size.
//! - [`SizingPolicy::Percentage`] columns take a share of the container.
//! - [`SizingPolicy::Grow`] columns split whatever is left, by weight.
//!
//! Every column is held at or above its minimum size. When floors push the
//! total past the container, width is reclaimed from grow columns that have
//! room to give; when nothing can give, the result reports
//! [`Fit::Overflow`] instead of failing. Widths are finally rounded with the
//! largest-remainder method so a feasible layout fills the container to the
//! pixel.
//!
//! The allocator is a pure function of its inputs. It holds no state between
//! calls and is safe to run on every container resize.
//!
//! # Example
//!
//! ```
//! use colfit_layout::{ColumnSpec, Fit, allocate};
//!
//! let columns = [
//!     ColumnSpec::fixed("age", 100),
//!     ColumnSpec::grow("name"),
//!     ColumnSpec::grow("info"),
//! ];
//! let alloc = allocate(&columns, 400).unwrap();
//! assert_eq!(alloc.get("name"), Some(150));
//! assert_eq!(alloc.fit(), Fit::Exact);
//! ```

pub mod allocate;
pub mod allocation;
pub mod classify;
pub mod column;
pub mod error;
pub mod reconcile;

pub use allocate::{Allocator, AllocatorConfig, allocate};
pub use allocation::{Allocation, ColumnWidth, Fit};
pub use classify::{Classification, classify, classify_meta};
pub use colfit_core::Px;
pub use column::{ColumnSpec, SizingMeta, SizingPolicy};
pub use error::AllocationError;
pub use reconcile::reconcile;
