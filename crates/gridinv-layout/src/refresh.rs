#![forbid(unsafe_code)]

//! Level-triggered layout refresh.
//!
//! The presentation layer reports its allocated size every frame. A refresh
//! (scale recomputation plus size override) is only due when the size moved
//! by more than [`RESIZE_TOLERANCE`] on some axis since the last refresh.
//!
//! ```
//! use gridinv_core::Size;
//! use gridinv_layout::refresh::LayoutRefresh;
//!
//! let mut refresh = LayoutRefresh::new();
//! assert!(refresh.observe(Size::new(800.0, 600.0)));
//! assert!(!refresh.observe(Size::new(800.3, 600.0)));
//! assert!(refresh.observe(Size::new(820.0, 600.0)));
//! ```

use gridinv_core::Size;

/// Size delta, per axis, below which two layout sizes count as equal.
pub const RESIZE_TOLERANCE: f32 = 0.5;

/// Tracks the last layout size that triggered a refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRefresh {
    last_known: Size,
    tolerance: f32,
}

impl Default for LayoutRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutRefresh {
    /// A tracker that has seen nothing; the first observation always refreshes.
    pub const fn new() -> Self {
        Self::with_tolerance(RESIZE_TOLERANCE)
    }

    pub const fn with_tolerance(tolerance: f32) -> Self {
        Self {
            last_known: Size::UNSET,
            tolerance,
        }
    }

    /// Record `current`; returns `true` when a refresh is due.
    pub fn observe(&mut self, current: Size) -> bool {
        if current.nearly_equals(&self.last_known, self.tolerance) {
            return false;
        }
        self.last_known = current;
        true
    }

    /// Forget the last size so the next observation refreshes.
    pub fn reset(&mut self) {
        self.last_known = Size::UNSET;
    }

    pub fn last_known(&self) -> Size {
        self.last_known
    }
}

/// Whether a size override at `current` should be replaced by `wanted`.
pub fn override_differs(current: Size, wanted: Size) -> bool {
    !current.nearly_equals(&wanted, RESIZE_TOLERANCE)
}
