#![forbid(unsafe_code)]

//! Grid inventory public facade crate.
//!
//! Re-exports the types most callers need from the internal crates and
//! offers a small prelude.
//!
//! ```
//! use gridinv::prelude::*;
//! use gridinv_harness::RecordingHost;
//!
//! fn stash(grid: &mut InventoryGrid<RecordingHost>) -> gridinv::Result<ItemId> {
//!     let id = grid.add_auto(AddRequest::sized(1, 2).with_data_source(DataSourceId(9)))?;
//!     Ok(id)
//! }
//!
//! let options = InventoryOptions::new().with_item_class("ItemTile");
//! let mut grid = InventoryGrid::new(GridConfig::new(2, 2, 64.0), options, RecordingHost::new());
//! let id = stash(&mut grid).unwrap();
//! assert_eq!(grid.find_by_data_source(DataSourceId(9)), Some(id));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use gridinv_core::{CellCoord, CellRect, ItemPayload, Rgba, Size};

// --- Layout re-exports -----------------------------------------------------

pub use gridinv_layout::{
    DebugLabel, GridConfig, GridLine, LayoutRefresh, LineKind, Orientation, compute_scale,
    compute_scaled_lines, scaled_size, target_size,
};

// --- Inventory re-exports --------------------------------------------------

pub use gridinv_inventory::{
    AddRequest, DataSourceId, HostError, InventoryEvent, InventoryGrid, InventoryOptions,
    ItemFootprint, ItemId, ItemInfo, OccupancyIndex, PlaceholderSet, PlacementEngine,
    PlacementError, ReconcileStats, SubscriptionId, WidgetClass, WidgetHost, WidgetId,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for grid inventory callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A placement, move, or lookup was refused.
    Placement(PlacementError),
    /// The presentation host failed outside of a grid operation.
    Host(HostError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(err) => write!(f, "{err}"),
            Self::Host(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Placement(err) => Some(err),
            Self::Host(err) => Some(err),
        }
    }
}

impl From<PlacementError> for Error {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

/// Standard result type for grid inventory APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AddRequest, CellCoord, CellRect, DataSourceId, Error, GridConfig, InventoryEvent,
        InventoryGrid, InventoryOptions, ItemId, ItemInfo, ItemPayload, PlacementError, Result,
        Rgba, Size, WidgetClass, WidgetHost, WidgetId,
    };

    pub use crate::{core, inventory, layout};
}

pub use gridinv_core as core;
pub use gridinv_inventory as inventory;
pub use gridinv_layout as layout;
