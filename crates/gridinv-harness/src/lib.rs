#![forbid(unsafe_code)]

//! Test support for the grid inventory.
//!
//! - **Recording host**: [`RecordingHost`] is an in-memory [`WidgetHost`]
//!   that logs every call and can be told to fail.
//! - **Snapshots**: [`grid_to_text`] renders occupancy as text, compared
//!   against stored `.snap` files by [`assert_grid_snapshot!`].
//!
//! # Quick Start
//!
//! ```
//! use gridinv_harness::{RecordingHost, grid_to_text};
//! use gridinv_inventory::{AddRequest, InventoryGrid, InventoryOptions};
//! use gridinv_layout::GridConfig;
//!
//! let options = InventoryOptions::new()
//!     .with_item_class("Tile")
//!     .with_placeholder_class("Empty");
//! let mut grid = InventoryGrid::new(GridConfig::new(2, 3, 50.0), options, RecordingHost::new());
//! grid.add_auto(AddRequest::sized(2, 2)).unwrap();
//! assert_eq!(grid_to_text(&grid), "AA.\nAA.");
//! ```
//!
//! # Updating Snapshots
//!
//! Run tests with `BLESS=1` to create or update snapshot files:
//!
//! ```sh
//! BLESS=1 cargo test
//! ```
//!
//! Snapshot files are stored under `tests/snapshots/` relative to the
//! crate's `CARGO_MANIFEST_DIR`.

pub mod recording;
pub mod snapshot;

pub use gridinv_core::{CellCoord, CellRect, Size};
pub use gridinv_inventory::WidgetHost;
pub use recording::{HostCall, RecordingHost, WidgetRecord};
pub use snapshot::{
    assert_grid_snapshot_at, diff_text, grid_to_text, host_layout_text, item_glyph,
};
