#![forbid(unsafe_code)]

//! Uniform scale fitting of a grid into an available layout area.
//!
//! # Invariants
//!
//! 1. The returned scale preserves aspect ratio: both axes use the same factor.
//! 2. The scaled grid never exceeds the available area on either axis.
//! 3. At least one axis exactly fills the available area.
//!
//! # Failure Modes
//!
//! | Condition | Result |
//! |-----------|--------|
//! | rows/columns <= 0 or cell size <= epsilon | `None` |
//! | available width or height <= epsilon, or non-finite | `None` |
//! | target size <= epsilon | `None` |

use gridinv_core::{SMALL_NUMBER, Size};

use crate::config::GridConfig;

/// Unscaled pixel size of the grid: `columns * cell` by `rows * cell`.
pub fn target_size(config: &GridConfig) -> Size {
    Size::new(
        config.columns() as f32 * config.cell_size(),
        config.rows() as f32 * config.cell_size(),
    )
}

/// Pixel size of the grid at `scale`.
pub fn scaled_size(config: &GridConfig, scale: f32) -> Size {
    let target = target_size(config);
    Size::new(target.width * scale, target.height * scale)
}

/// Largest uniform scale at which the grid fits inside `available`.
pub fn compute_scale(config: &GridConfig, available: Size) -> Option<f32> {
    if config.rows() <= 0 || config.columns() <= 0 || config.cell_size() <= SMALL_NUMBER {
        return None;
    }
    if !available.width.is_finite()
        || !available.height.is_finite()
        || available.is_degenerate(SMALL_NUMBER)
    {
        return None;
    }
    let target = target_size(config);
    if target.is_degenerate(SMALL_NUMBER) {
        return None;
    }
    let scale_x = available.width / target.width;
    let scale_y = available.height / target.height;
    Some(scale_x.min(scale_y))
}
