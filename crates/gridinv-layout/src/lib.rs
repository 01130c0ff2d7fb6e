#![forbid(unsafe_code)]

//! Grid geometry for the inventory widget.
//!
//! Everything here is a pure function of a [`GridConfig`] and the layout area
//! the presentation layer hands us:
//!
//! - [`compute_scale`] fits the grid into the available area.
//! - [`compute_scaled_lines`] describes grid and border lines at that scale.
//! - [`LayoutRefresh`] decides when a new layout size warrants a refresh.
//! - [`debug_label`] builds the design-time owner/size overlay.
//!
//! # Example
//!
//! ```
//! use gridinv_core::Size;
//! use gridinv_layout::{GridConfig, compute_scale, compute_scaled_lines};
//!
//! let config = GridConfig::new(10, 10, 50.0);
//! let scale = compute_scale(&config, Size::new(1000.0, 400.0)).unwrap();
//! assert!((scale - 0.8).abs() < 1e-6);
//!
//! let lines = compute_scaled_lines(&config, scale);
//! assert_eq!(lines.len(), 22);
//! ```

pub mod config;
pub mod label;
pub mod lines;
pub mod refresh;
pub mod scale;

pub use config::{GridConfig, MIN_CELL_SIZE};
pub use label::{DebugLabel, debug_label};
pub use lines::{GridLine, LineKind, MIN_LINE_THICKNESS, Orientation, compute_scaled_lines};
pub use refresh::{LayoutRefresh, RESIZE_TOLERANCE, override_differs};
pub use scale::{compute_scale, scaled_size, target_size};
