#![forbid(unsafe_code)]

//! Placeholder ("empty cell") reconciliation.
//!
//! After every structural change the set of 1x1 placeholder widgets must be
//! exactly the set of in-bounds cells not covered by any item. Reconciling is
//! a pure diff: [`reconcile`] compares the live set with the wanted set and
//! returns what to tear down and what to create. Applying the plan is up to
//! the inventory, which owns the presentation host.
//!
//! # Invariants
//!
//! 1. A placeholder whose cell is now occupied, out of bounds, or whose widget
//!    went stale is always in `to_remove`.
//! 2. A free cell with a live placeholder is left alone (no churn).
//! 3. Running reconcile on the result of applying a plan yields an empty plan.

use std::collections::{BTreeMap, BTreeSet};

use gridinv_core::CellCoord;
use gridinv_layout::GridConfig;

use crate::host::WidgetId;
use crate::occupancy::OccupancyIndex;

/// Live placeholders keyed by cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSet {
    cells: BTreeMap<CellCoord, WidgetId>,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, cell: CellCoord) -> Option<WidgetId> {
        self.cells.get(&cell).copied()
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, WidgetId)> + '_ {
        self.cells.iter().map(|(cell, widget)| (*cell, *widget))
    }

    pub(crate) fn insert(&mut self, cell: CellCoord, widget: WidgetId) -> Option<WidgetId> {
        self.cells.insert(cell, widget)
    }

    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<WidgetId> {
        self.cells.remove(&cell)
    }

    pub(crate) fn drain(&mut self) -> Vec<(CellCoord, WidgetId)> {
        std::mem::take(&mut self.cells).into_iter().collect()
    }
}

/// Work needed to bring placeholders in line with occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_remove: BTreeSet<CellCoord>,
    pub to_add: BTreeSet<CellCoord>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Outcome of applying a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub kept: usize,
    pub removed: usize,
    pub added: usize,
    /// Placeholders the host failed to create. Those cells stay empty until
    /// the next reconcile.
    pub failed: usize,
}

/// Row-major occupancy bitmap over the grid.
struct OccupancyMask {
    columns: usize,
    bits: Vec<bool>,
}

impl OccupancyMask {
    fn build(config: &GridConfig, index: &OccupancyIndex) -> Self {
        let columns = config.columns().max(0) as usize;
        let rows = config.rows().max(0) as usize;
        let mut bits = vec![false; rows * columns];
        for cell in index.occupied_cells(&config.bounds()) {
            bits[cell.row as usize * columns + cell.column as usize] = true;
        }
        Self { columns, bits }
    }

    fn is_set(&self, cell: CellCoord) -> bool {
        self.bits[cell.row as usize * self.columns + cell.column as usize]
    }
}

/// Diff the live placeholders against the free cells of the grid.
pub fn reconcile(
    config: &GridConfig,
    index: &OccupancyIndex,
    current: &PlaceholderSet,
    is_valid: impl Fn(WidgetId) -> bool,
) -> ReconcilePlan {
    let bounds = config.bounds();
    let mask = OccupancyMask::build(config, index);
    let mut plan = ReconcilePlan::default();

    for (cell, widget) in current.iter() {
        let keep = bounds.contains(cell.row, cell.column) && !mask.is_set(cell) && is_valid(widget);
        if !keep {
            plan.to_remove.insert(cell);
        }
    }

    for cell in bounds.cells() {
        if mask.is_set(cell) {
            continue;
        }
        let alive = current
            .get(cell)
            .is_some_and(|widget| !plan.to_remove.contains(&cell) && is_valid(widget));
        if !alive {
            plan.to_add.insert(cell);
        }
    }

    plan
}
