#![forbid(unsafe_code)]

//! Grid configuration.

use gridinv_core::{CellRect, Rgba};

/// Smallest allowed cell edge length.
pub const MIN_CELL_SIZE: f32 = 1.0;

/// Rows, columns, cell size, and line styling of an inventory grid.
///
/// Fields are private so every assignment goes through a clamping setter:
/// rows and columns are at least 1, the cell size is at least
/// [`MIN_CELL_SIZE`], thicknesses are non-negative. A config that arrived
/// through deserialization should be passed through [`GridConfig::sanitized`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    rows: i32,
    columns: i32,
    cell_size: f32,
    grid_line_color: Rgba,
    grid_line_thickness: f32,
    border_line_color: Rgba,
    border_line_thickness: f32,
    show_debug_label: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            cell_size: 50.0,
            grid_line_color: Rgba::rgba(26, 26, 26, 128),
            grid_line_thickness: 1.0,
            border_line_color: Rgba::rgba(26, 26, 26, 255),
            border_line_thickness: 1.0,
            show_debug_label: true,
        }
    }
}

impl GridConfig {
    /// A `rows x columns` grid with the given cell size and default styling.
    pub fn new(rows: i32, columns: i32, cell_size: f32) -> Self {
        Self::default()
            .with_rows(rows)
            .with_columns(columns)
            .with_cell_size(cell_size)
    }

    /// Re-apply every clamp. Use after deserializing.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let Self {
            rows,
            columns,
            cell_size,
            grid_line_color,
            grid_line_thickness,
            border_line_color,
            border_line_thickness,
            show_debug_label,
        } = self;
        Self {
            grid_line_color,
            border_line_color,
            show_debug_label,
            ..Self::default()
        }
        .with_rows(rows)
        .with_columns(columns)
        .with_cell_size(cell_size)
        .with_grid_line_thickness(grid_line_thickness)
        .with_border_line_thickness(border_line_thickness)
    }

    #[must_use]
    pub fn with_rows(mut self, rows: i32) -> Self {
        self.set_rows(rows);
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: i32) -> Self {
        self.set_columns(columns);
        self
    }

    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.set_cell_size(cell_size);
        self
    }

    #[must_use]
    pub fn with_grid_line(mut self, color: Rgba, thickness: f32) -> Self {
        self.grid_line_color = color;
        self.grid_line_thickness = clamp_thickness(thickness);
        self
    }

    #[must_use]
    pub fn with_grid_line_thickness(mut self, thickness: f32) -> Self {
        self.grid_line_thickness = clamp_thickness(thickness);
        self
    }

    #[must_use]
    pub fn with_border_line(mut self, color: Rgba, thickness: f32) -> Self {
        self.border_line_color = color;
        self.border_line_thickness = clamp_thickness(thickness);
        self
    }

    #[must_use]
    pub fn with_border_line_thickness(mut self, thickness: f32) -> Self {
        self.border_line_thickness = clamp_thickness(thickness);
        self
    }

    #[must_use]
    pub fn with_debug_label(mut self, show: bool) -> Self {
        self.show_debug_label = show;
        self
    }

    /// Set the row count, clamped to at least 1.
    pub fn set_rows(&mut self, rows: i32) {
        self.rows = rows.max(1);
    }

    /// Set the column count, clamped to at least 1.
    pub fn set_columns(&mut self, columns: i32) {
        self.columns = columns.max(1);
    }

    /// Set the cell size, clamped to at least [`MIN_CELL_SIZE`]. NaN maps to the minimum.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        // `f32::max` ignores NaN operands.
        self.cell_size = cell_size.max(MIN_CELL_SIZE);
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn grid_line_color(&self) -> Rgba {
        self.grid_line_color
    }

    #[inline]
    pub fn grid_line_thickness(&self) -> f32 {
        self.grid_line_thickness
    }

    #[inline]
    pub fn border_line_color(&self) -> Rgba {
        self.border_line_color
    }

    #[inline]
    pub fn border_line_thickness(&self) -> f32 {
        self.border_line_thickness
    }

    #[inline]
    pub fn show_debug_label(&self) -> bool {
        self.show_debug_label
    }

    /// The whole grid as a cell rectangle.
    #[inline]
    pub fn bounds(&self) -> CellRect {
        CellRect::grid(self.rows, self.columns)
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows.max(0) as usize * self.columns.max(0) as usize
    }
}

fn clamp_thickness(thickness: f32) -> f32 {
    thickness.max(0.0)
}
