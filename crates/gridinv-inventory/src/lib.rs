#![forbid(unsafe_code)]

//! Grid inventory engine.
//!
//! Items occupy rectangles of cells on a fixed grid. This crate keeps the
//! authoritative occupancy record, decides where items may go, keeps empty
//! cells filled with placeholder widgets, and drives a [`WidgetHost`] that
//! owns the actual widgets.
//!
//! - [`occupancy`]: which item covers which cells, plus data-source lookup.
//! - [`placement`]: first-fit search and placement/move validation.
//! - [`placeholder`]: set-difference reconciliation of empty-cell widgets.
//! - [`inventory`]: the [`InventoryGrid`] facade tying it together.
//!
//! With the `tracing` feature, mutating operations open `inventory.*` debug
//! spans.

pub mod error;
pub mod events;
pub mod host;
pub mod inventory;
pub mod item;
pub mod occupancy;
pub mod placeholder;
pub mod placement;

pub use error::PlacementError;
pub use events::{EventBus, InventoryEvent, SubscriptionId};
pub use host::{HostError, WidgetClass, WidgetHost, WidgetId};
pub use inventory::{AddRequest, InventoryGrid, InventoryOptions};
pub use item::{DataSourceId, ItemFootprint, ItemId, ItemInfo, PlacedItem};
pub use occupancy::OccupancyIndex;
pub use placeholder::{PlaceholderSet, ReconcilePlan, ReconcileStats, reconcile};
pub use placement::PlacementEngine;
