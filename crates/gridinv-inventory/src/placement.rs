#![forbid(unsafe_code)]

//! Placement decisions: first-fit search, area validation, move validation.
//!
//! The engine is a read-only view over a config and an occupancy index. It
//! never mutates anything; the inventory commits whatever it approves.
//!
//! # Search order
//!
//! Candidates are visited row-major: row 0 left to right, then row 1, and so
//! on. The first candidate whose whole footprint is inside the grid and clear
//! of every item wins, so the result is the lowest row, then lowest column,
//! that fits.

use gridinv_core::{CellCoord, CellRect};
use gridinv_layout::GridConfig;

use crate::error::PlacementError;
use crate::item::ItemId;
use crate::occupancy::OccupancyIndex;

/// Read-only placement oracle.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'a> {
    config: &'a GridConfig,
    index: &'a OccupancyIndex,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a GridConfig, index: &'a OccupancyIndex) -> Self {
        Self { config, index }
    }

    /// Spans must both be at least 1.
    pub fn validate_dimensions(rows: i32, columns: i32) -> Result<(), PlacementError> {
        if rows < 1 || columns < 1 {
            return Err(PlacementError::BadDimensions { rows, columns });
        }
        Ok(())
    }

    /// First free top-left cell for a `rows x columns` item, if any.
    ///
    /// Returns `None` for non-positive spans or spans larger than the grid.
    pub fn find_free_slot(&self, rows: i32, columns: i32) -> Option<CellCoord> {
        if rows < 1 || columns < 1 {
            return None;
        }
        let last_row = self.config.rows() - rows;
        let last_column = self.config.columns() - columns;
        if last_row < 0 || last_column < 0 {
            return None;
        }

        for row in 0..=last_row {
            let mut column = 0;
            while column <= last_column {
                let candidate = CellRect::new(row, column, rows, columns);
                match self.index.first_collision(&candidate, None) {
                    None => return Some(CellCoord::new(row, column)),
                    // Every column up to the blocker's right edge overlaps it too.
                    Some(blocker) => column = column.max(blocker.rect().right()),
                }
            }
        }
        None
    }

    /// Whether `rect` is inside the grid and clear of every item.
    pub fn is_area_clear(&self, rect: &CellRect) -> bool {
        self.validate_placement(rect).is_ok()
    }

    /// Check a fresh placement at `rect`.
    pub fn validate_placement(&self, rect: &CellRect) -> Result<(), PlacementError> {
        Self::validate_dimensions(rect.row_span, rect.column_span)?;
        if !self.config.bounds().contains_rect(rect) {
            return Err(PlacementError::OutOfBounds { rect: *rect });
        }
        if let Some(blocker) = self.index.first_collision(rect, None) {
            return Err(PlacementError::Occupied {
                rect: *rect,
                by: blocker.id,
            });
        }
        Ok(())
    }

    /// Check moving `id` so its top-left lands on `(row, column)`, ignoring
    /// the item's own current footprint. Returns the target rectangle.
    pub fn validate_move(&self, id: ItemId, row: i32, column: i32) -> Result<CellRect, PlacementError> {
        let item = self
            .index
            .find(id)
            .ok_or(PlacementError::NotFound { id })?;
        let target = item.rect().moved_to(row, column);
        if !self.config.bounds().contains_rect(&target) {
            return Err(PlacementError::OutOfBounds { rect: target });
        }
        if let Some(blocker) = self.index.first_collision(&target, Some(id)) {
            return Err(PlacementError::Occupied {
                rect: target,
                by: blocker.id,
            });
        }
        Ok(target)
    }
}
