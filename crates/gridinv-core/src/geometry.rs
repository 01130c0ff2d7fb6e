#![forbid(unsafe_code)]

//! Geometric primitives for cell grids and layout areas.
//!
//! Cell coordinates are signed so that callers can hand the grid arbitrary
//! (possibly negative) positions and get a clean bounds rejection instead of
//! an integer wrap. All edge arithmetic saturates.

use std::fmt;

/// A single grid cell, addressed by column and row (0-indexed, origin top-left).
///
/// Ordering is row-major (`row` first, then `column`), which is the traversal
/// order used for free-slot search and placeholder materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    /// Column index.
    pub column: i32,
    /// Row index.
    pub row: i32,
}

impl CellCoord {
    /// Create a coordinate from `(row, column)`.
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { column, row }
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.column)
    }
}

/// A rectangle of cells with half-open extents:
/// `[column, column + column_span) x [row, row + row_span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRect {
    /// Left column (inclusive).
    pub column: i32,
    /// Top row (inclusive).
    pub row: i32,
    /// Width in cells.
    pub column_span: i32,
    /// Height in cells.
    pub row_span: i32,
}

impl CellRect {
    /// Create a rectangle from its top-left cell and spans.
    #[inline]
    pub const fn new(row: i32, column: i32, row_span: i32, column_span: i32) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
        }
    }

    /// A rectangle covering a whole `rows x columns` grid.
    #[inline]
    pub const fn grid(rows: i32, columns: i32) -> Self {
        Self::new(0, 0, rows, columns)
    }

    /// Top-left cell.
    #[inline]
    pub const fn origin(&self) -> CellCoord {
        CellCoord::new(self.row, self.column)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.column.saturating_add(self.column_span)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.row.saturating_add(self.row_span)
    }

    /// Number of cells covered, zero for degenerate spans.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.column_span as u64 * self.row_span as u64
        }
    }

    /// True when either span is non-positive.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.column_span <= 0 || self.row_span <= 0
    }

    /// Check whether the cell at `(row, column)` lies inside.
    #[inline]
    pub const fn contains(&self, row: i32, column: i32) -> bool {
        column >= self.column && column < self.right() && row >= self.row && row < self.bottom()
    }

    /// Check whether `other` lies entirely inside this rectangle.
    ///
    /// An empty `other` is never considered contained.
    #[inline]
    pub const fn contains_rect(&self, other: &CellRect) -> bool {
        !other.is_empty()
            && other.column >= self.column
            && other.row >= self.row
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Half-open overlap test: both axis projections must overlap with
    /// nonzero length. Touching edges do not intersect.
    #[inline]
    pub const fn intersects(&self, other: &CellRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.column < other.right()
            && other.column < self.right()
            && self.row < other.bottom()
            && other.row < self.bottom()
    }

    /// Intersection with another rectangle, or `None` if they do not overlap.
    pub fn intersection(&self, other: &CellRect) -> Option<CellRect> {
        if !self.intersects(other) {
            return None;
        }
        let column = self.column.max(other.column);
        let row = self.row.max(other.row);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(CellRect::new(row, column, bottom - row, right - column))
    }

    /// Same rectangle with a new top-left cell.
    #[inline]
    pub const fn moved_to(&self, row: i32, column: i32) -> CellRect {
        CellRect::new(row, column, self.row_span, self.column_span)
    }

    /// Iterate covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let (row, bottom) = (self.row, self.bottom());
        let (column, right) = (self.column, self.right());
        (row..bottom).flat_map(move |r| (column..right).map(move |c| CellCoord::new(r, c)))
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] span {}x{}",
            self.row, self.column, self.row_span, self.column_span
        )
    }
}

/// A layout size in presentation units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Sentinel for "never observed"; differs from any real size.
    pub const UNSET: Self = Self::new(-1.0, -1.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component-wise comparison within `tolerance`.
    #[inline]
    pub fn nearly_equals(&self, other: &Size, tolerance: f32) -> bool {
        (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }

    /// True when either dimension is at or below `epsilon`.
    #[inline]
    pub fn is_degenerate(&self, epsilon: f32) -> bool {
        self.width <= epsilon || self.height <= epsilon
    }
}
