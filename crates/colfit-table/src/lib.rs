#![forbid(unsafe_code)]

//! Table-side glue for colfit.
//!
//! The allocator in `colfit-layout` is a pure function. This crate is the
//! thin adapter around it:
//!
//! - [`ColumnDef`] - column definitions with loose sizing metadata
//! - [`ColumnSizing`] - the mutable id → width store a table renders from
//! - [`SizingController`] - runs the allocator on mount, container resize
//!   and explicit request, and copies each result into the store

pub mod column;
pub mod controller;
pub mod error;
pub mod sizing;

pub use column::ColumnDef;
pub use controller::{SizingController, SizingOptions, SizingSnapshot, SizingTrigger};
pub use error::SizingError;
pub use sizing::ColumnSizing;

pub use colfit_layout::{Allocation, AllocatorConfig, Fit, Px, SizingMeta};
