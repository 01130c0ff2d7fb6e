#![forbid(unsafe_code)]

//! Placed-item data model.

use std::fmt;

use gridinv_core::{CellRect, ItemPayload};

use crate::host::WidgetId;

/// Identity of a placed item: the handle of the widget that represents it.
pub type ItemId = WidgetId;

/// Caller-side identity of the object an item was created for (e.g. an item
/// definition or an inventory slot record). Used for reverse lookup only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataSourceId(pub u64);

impl fmt::Display for DataSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

impl From<u64> for DataSourceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Top-left cell and spans of an item.
///
/// Bounds are not a standing invariant of this struct; they are checked when
/// the footprint is placed or moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemFootprint {
    pub row: i32,
    pub column: i32,
    pub row_span: i32,
    pub column_span: i32,
}

impl ItemFootprint {
    pub const fn new(row: i32, column: i32, row_span: i32, column_span: i32) -> Self {
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }

    /// Covered cells: `[column, column + column_span) x [row, row + row_span)`.
    #[inline]
    pub const fn rect(&self) -> CellRect {
        CellRect::new(self.row, self.column, self.row_span, self.column_span)
    }

    #[inline]
    pub const fn contains_cell(&self, row: i32, column: i32) -> bool {
        self.rect().contains(row, column)
    }

    /// Same spans, new top-left cell.
    #[inline]
    pub const fn moved_to(&self, row: i32, column: i32) -> Self {
        Self::new(row, column, self.row_span, self.column_span)
    }
}

impl From<CellRect> for ItemFootprint {
    fn from(rect: CellRect) -> Self {
        Self::new(rect.row, rect.column, rect.row_span, rect.column_span)
    }
}

impl fmt::Display for ItemFootprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rect(), f)
    }
}

/// Everything the grid knows about a placed item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInfo {
    pub footprint: ItemFootprint,
    pub data_source: Option<DataSourceId>,
    pub payload: Option<ItemPayload>,
    /// Last on-screen center reported by the presentation layer, `(-1, -1)` if never set.
    pub last_center: (f32, f32),
}

impl ItemInfo {
    pub fn new(
        footprint: ItemFootprint,
        data_source: Option<DataSourceId>,
        payload: Option<ItemPayload>,
    ) -> Self {
        Self {
            footprint,
            data_source,
            payload,
            last_center: (-1.0, -1.0),
        }
    }

    #[inline]
    pub fn contains_cell(&self, row: i32, column: i32) -> bool {
        self.footprint.contains_cell(row, column)
    }
}

/// An entry of the occupancy index.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub info: ItemInfo,
}

impl PlacedItem {
    #[inline]
    pub fn rect(&self) -> CellRect {
        self.info.footprint.rect()
    }
}
