#![forbid(unsafe_code)]

//! Scaled grid and border line descriptors.
//!
//! Output order is fixed: every vertical line left to right (`x = 0..=columns`),
//! then every horizontal line top to bottom (`y = 0..=rows`). Lines on the
//! outer edge are [`LineKind::Border`]; the rest are [`LineKind::Grid`].
//! Thickness is `configured * scale`, floored at [`MIN_LINE_THICKNESS`].
//! Grid lines are dropped when the grid line color is fully transparent;
//! border lines likewise for the border color.

use gridinv_core::Rgba;

use crate::config::GridConfig;

/// Minimum drawn thickness after scaling.
pub const MIN_LINE_THICKNESS: f32 = 1.0;

/// Upper bound on the up-front reservation for the output vector.
const MAX_RESERVED_LINES: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Interior separator between cells.
    Grid,
    /// Outer edge of the grid.
    Border,
}

/// One line segment to draw, in scaled presentation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub orientation: Orientation,
    pub kind: LineKind,
    /// Column index for vertical lines, row index for horizontal ones.
    pub index: i32,
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub thickness: f32,
    pub color: Rgba,
}

/// Compute every visible line of `config` drawn at `scale`.
pub fn compute_scaled_lines(config: &GridConfig, scale: f32) -> Vec<GridLine> {
    let columns = config.columns();
    let rows = config.rows();
    if columns <= 0 || rows <= 0 {
        return Vec::new();
    }

    let grid_color = config.grid_line_color();
    let border_color = config.border_line_color();
    if grid_color.is_transparent() && border_color.is_transparent() {
        return Vec::new();
    }

    let cell = config.cell_size() * scale;
    let max_x = columns as f32 * cell;
    let max_y = rows as f32 * cell;
    let grid_thickness = (config.grid_line_thickness() * scale).max(MIN_LINE_THICKNESS);
    let border_thickness = (config.border_line_thickness() * scale).max(MIN_LINE_THICKNESS);

    let style = |is_border: bool| -> Option<(LineKind, f32, Rgba)> {
        let (kind, thickness, color) = if is_border {
            (LineKind::Border, border_thickness, border_color)
        } else {
            (LineKind::Grid, grid_thickness, grid_color)
        };
        (!color.is_transparent()).then_some((kind, thickness, color))
    };

    // With interior lines hidden only the two edges of each axis are visited.
    let interior = !grid_color.is_transparent();
    let stride = |n: i32| if interior { 1 } else { n as usize };
    let capacity = if interior {
        columns as usize + rows as usize + 2
    } else {
        4
    };

    let mut lines = Vec::with_capacity(capacity.min(MAX_RESERVED_LINES));
    for x in (0..=columns).step_by(stride(columns)) {
        if let Some((kind, thickness, color)) = style(x == 0 || x == columns) {
            let pos = x as f32 * cell;
            lines.push(GridLine {
                orientation: Orientation::Vertical,
                kind,
                index: x,
                start: (pos, 0.0),
                end: (pos, max_y),
                thickness,
                color,
            });
        }
    }
    for y in (0..=rows).step_by(stride(rows)) {
        if let Some((kind, thickness, color)) = style(y == 0 || y == rows) {
            let pos = y as f32 * cell;
            lines.push(GridLine {
                orientation: Orientation::Horizontal,
                kind,
                index: y,
                start: (0.0, pos),
                end: (max_x, pos),
                thickness,
                color,
            });
        }
    }
    lines
}
