//! Deciding when to re-run the allocator and applying its output.
//!
//! The controller owns the column definitions and the sizing store. It runs
//! the allocator on three triggers:
//!
//! - [`mount`](SizingController::mount): the first layout measurement.
//! - [`container_resized`](SizingController::container_resized): only when
//!   [`SizingOptions::recalculate_on_resize`] is on and the width changed.
//! - [`recalculate`](SizingController::recalculate): an explicit request.
//!
//! Each run builds fresh specs from the definitions, allocates, and copies the
//! result into the store. Allocator output is never fed back: only widths
//! recorded by [`resize_column`](SizingController::resize_column) replace a
//! definition's `size`, so a fixed column resized by the user keeps that
//! width across reruns.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use colfit_core::{Px, debug, info};
use colfit_layout::{Allocation, Allocator, AllocatorConfig, ColumnSpec, Fit, classify};
use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;
use crate::error::SizingError;
use crate::sizing::ColumnSizing;

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizingOptions {
    /// Re-run the allocator whenever the container width changes. Off by
    /// default: widths are computed on mount and on explicit request only.
    pub recalculate_on_resize: bool,
    /// Settings passed to the allocator.
    pub allocator: AllocatorConfig,
}

impl SizingOptions {
    /// Set whether container resizes trigger a recalculation.
    #[must_use]
    pub fn recalculate_on_resize(mut self, enabled: bool) -> Self {
        self.recalculate_on_resize = enabled;
        self
    }

    /// Set the allocator settings.
    #[must_use]
    pub fn allocator(mut self, config: AllocatorConfig) -> Self {
        self.allocator = config;
        self
    }
}

/// What caused a recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingTrigger {
    Mount,
    ContainerResize,
    Manual,
    ColumnsChanged,
}

impl SizingTrigger {
    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::ContainerResize => "container_resize",
            Self::Manual => "manual",
            Self::ColumnsChanged => "columns_changed",
        }
    }
}

impl fmt::Display for SizingTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serializable view of the sizing state, for debug dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingSnapshot {
    pub container_width: Option<Px>,
    pub column_sizing: BTreeMap<String, Px>,
    pub total_size: u64,
    pub fit: Option<Fit>,
    pub last_trigger: Option<SizingTrigger>,
}

/// Owns column definitions and sizing state; runs the allocator on triggers.
#[derive(Debug, Clone)]
pub struct SizingController {
    columns: Vec<ColumnDef>,
    sizing: ColumnSizing,
    options: SizingOptions,
    container_width: Option<Px>,
    /// Columns whose stored width came from a user resize.
    user_sized: BTreeSet<String>,
    last: Option<Allocation>,
    last_trigger: Option<SizingTrigger>,
}

impl SizingController {
    /// Create a controller, validating the column definitions up front.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Allocation`] for contradictory metadata,
    /// inverted bounds or duplicate ids.
    pub fn new(columns: Vec<ColumnDef>, options: SizingOptions) -> Result<Self, SizingError> {
        validate(&columns)?;
        Ok(Self {
            columns,
            sizing: ColumnSizing::new(),
            options,
            container_width: None,
            user_sized: BTreeSet::new(),
            last: None,
            last_trigger: None,
        })
    }

    /// Column definitions.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Current sizing state.
    #[must_use]
    pub fn sizing(&self) -> &ColumnSizing {
        &self.sizing
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> SizingOptions {
        self.options
    }

    /// Change options. Takes effect on the next trigger.
    pub fn set_options(&mut self, options: SizingOptions) {
        self.options = options;
    }

    /// Last container width seen, if any.
    #[must_use]
    pub const fn container_width(&self) -> Option<Px> {
        self.container_width
    }

    /// Result of the most recent run.
    #[must_use]
    pub fn last_allocation(&self) -> Option<&Allocation> {
        self.last.as_ref()
    }

    /// Whether [`mount`](Self::mount) has completed.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.last.is_some()
    }

    /// Width a column currently renders at.
    #[must_use]
    pub fn column_size(&self, id: &str) -> Option<Px> {
        self.find(id).map(|c| self.sizing.size_of(c))
    }

    /// Total table width.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.sizing.total_size(&self.columns)
    }

    /// Whether a column's width was set by [`resize_column`](Self::resize_column).
    #[must_use]
    pub fn is_user_sized(&self, id: &str) -> bool {
        self.user_sized.contains(id)
    }

    /// Allocator specs for the current state: each definition's `size` as
    /// declared size, or the user's width for user-sized columns.
    ///
    /// # Errors
    ///
    /// Fails when a definition's metadata is invalid.
    pub fn specs(&self) -> Result<Vec<ColumnSpec>, SizingError> {
        self.columns
            .iter()
            .map(|c| {
                let declared = self
                    .user_sized
                    .contains(&c.id)
                    .then(|| self.sizing.get(&c.id))
                    .flatten()
                    .unwrap_or(c.size);
                c.to_spec_with_size(declared).map_err(SizingError::from)
            })
            .collect()
    }

    /// First layout pass with the measured container width.
    ///
    /// # Errors
    ///
    /// See [`specs`](Self::specs).
    pub fn mount(&mut self, width: Px) -> Result<&Allocation, SizingError> {
        self.run(width, SizingTrigger::Mount)
    }

    /// The container changed width.
    ///
    /// The width is always remembered (so [`recalculate`](Self::recalculate)
    /// uses it), but the allocator only runs if the controller is mounted,
    /// resize recalculation is enabled and the width actually changed.
    ///
    /// # Errors
    ///
    /// See [`specs`](Self::specs).
    pub fn container_resized(&mut self, width: Px) -> Result<Option<&Allocation>, SizingError> {
        let previous = self.container_width.replace(width);
        if !self.is_mounted() || !self.options.recalculate_on_resize || previous == Some(width) {
            debug!(width, "container resize ignored");
            return Ok(None);
        }
        self.run(width, SizingTrigger::ContainerResize).map(Some)
    }

    /// Recalculate at the last known width. Returns `None` before any width
    /// is known.
    ///
    /// # Errors
    ///
    /// See [`specs`](Self::specs).
    pub fn recalculate(&mut self) -> Result<Option<&Allocation>, SizingError> {
        match self.container_width {
            Some(width) => self.run(width, SizingTrigger::Manual).map(Some),
            None => Ok(None),
        }
    }

    /// Replace the column definitions. Stored widths for columns that no
    /// longer exist are dropped; a mounted controller recalculates.
    ///
    /// # Errors
    ///
    /// Rejects invalid definitions, leaving the previous ones in place.
    pub fn set_columns(
        &mut self,
        columns: Vec<ColumnDef>,
    ) -> Result<Option<&Allocation>, SizingError> {
        validate(&columns)?;
        let stale: Vec<String> = self
            .sizing
            .as_map()
            .keys()
            .filter(|id| !columns.iter().any(|c| &c.id == *id))
            .cloned()
            .collect();
        for id in &stale {
            self.sizing.reset(id);
            self.user_sized.remove(id);
        }
        self.columns = columns;

        match (self.is_mounted(), self.container_width) {
            (true, Some(width)) => self.run(width, SizingTrigger::ColumnsChanged).map(Some),
            _ => Ok(None),
        }
    }

    /// Record a user resize of one column, clamped to its bounds. Returns the
    /// stored width.
    ///
    /// # Errors
    ///
    /// [`SizingError::UnknownColumn`] if no column has this id.
    pub fn resize_column(&mut self, id: &str, width: Px) -> Result<Px, SizingError> {
        let column = self.find(id).ok_or_else(|| unknown(id))?;
        let width = column.clamp(width);
        self.sizing.set(id, width);
        self.user_sized.insert(id.to_owned());
        Ok(width)
    }

    /// Drop a column's stored width and any user resize, so it renders at
    /// its definition's size until the next run.
    ///
    /// # Errors
    ///
    /// [`SizingError::UnknownColumn`] if no column has this id.
    pub fn reset_column(&mut self, id: &str) -> Result<(), SizingError> {
        self.find(id).ok_or_else(|| unknown(id))?;
        self.sizing.reset(id);
        self.user_sized.remove(id);
        Ok(())
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SizingSnapshot {
        SizingSnapshot {
            container_width: self.container_width,
            column_sizing: self.sizing.as_map().clone(),
            total_size: self.total_size(),
            fit: self.last.as_ref().map(Allocation::fit),
            last_trigger: self.last_trigger,
        }
    }

    fn find(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn run(&mut self, width: Px, trigger: SizingTrigger) -> Result<&Allocation, SizingError> {
        let specs = self.specs()?;
        let allocation = Allocator::with_config(self.options.allocator).allocate(&specs, width)?;
        info!(
            trigger = trigger.label(),
            width,
            overflow = allocation.overflow(),
            "column sizing recalculated"
        );
        self.sizing.apply(&allocation);
        self.container_width = Some(width);
        self.last_trigger = Some(trigger);
        let allocation: &Allocation = self.last.insert(allocation);
        Ok(allocation)
    }
}

fn validate(columns: &[ColumnDef]) -> Result<(), SizingError> {
    let specs = columns
        .iter()
        .map(ColumnDef::to_spec)
        .collect::<Result<Vec<_>, _>>()?;
    classify(&specs)?;
    Ok(())
}

fn unknown(id: &str) -> SizingError {
    SizingError::UnknownColumn { id: id.to_owned() }
}
