#![forbid(unsafe_code)]

//! Core: cell geometry, colors, item payloads, and logging.

pub mod color;
pub mod geometry;
pub mod logging;
pub mod payload;

pub use color::Rgba;
pub use geometry::{CellCoord, CellRect, Size};
pub use payload::ItemPayload;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Tolerance below which a float length is treated as zero.
pub const SMALL_NUMBER: f32 = 1.0e-4;
