#![forbid(unsafe_code)]

//! Why a placement, move, or lookup was refused.

use std::fmt;

use gridinv_core::CellRect;

use crate::host::HostError;
use crate::item::ItemId;

/// Reason an inventory operation did not go through.
///
/// Every variant leaves the grid exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Row or column span below 1.
    BadDimensions { rows: i32, columns: i32 },
    /// The target rectangle does not lie fully inside the grid.
    OutOfBounds { rect: CellRect },
    /// The target rectangle overlaps an existing item.
    Occupied { rect: CellRect, by: ItemId },
    /// Neither a per-call nor a default item widget class was available.
    NoWidgetClass,
    /// The item is not tracked by this grid.
    NotFound { id: ItemId },
    /// First-fit search found no position for an item of this size.
    NoFreeSlot { rows: i32, columns: i32 },
    /// The presentation layer failed to materialize or slot the widget.
    Presentation(HostError),
}

impl PlacementError {
    /// Whether the failure came from the target area being taken.
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Occupied { .. } | Self::NoFreeSlot { .. })
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDimensions { rows, columns } => write!(
                f,
                "item spans must be at least 1x1, got {rows}x{columns}"
            ),
            Self::OutOfBounds { rect } => write!(f, "area {rect} lies outside the grid"),
            Self::Occupied { rect, by } => write!(f, "area {rect} overlaps {by}"),
            Self::NoWidgetClass => write!(
                f,
                "no item widget class configured and none supplied with the request"
            ),
            Self::NotFound { id } => write!(f, "{id} is not tracked by this grid"),
            Self::NoFreeSlot { rows, columns } => {
                write!(f, "no free space for an item of size {rows}x{columns}")
            }
            Self::Presentation(err) => write!(f, "presentation failure: {err}"),
        }
    }
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Presentation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HostError> for PlacementError {
    fn from(err: HostError) -> Self {
        Self::Presentation(err)
    }
}
