#![forbid(unsafe_code)]

//! The presentation-layer boundary.
//!
//! The grid never owns widgets. It asks a [`WidgetHost`] to create them, slot
//! them into the cell layout, and take them out again, and it only ever keeps
//! the [`WidgetId`] handles the host returns. A handle can go stale at any
//! time (the UI framework may destroy the widget on its own), so every use is
//! preceded by [`WidgetHost::is_widget_valid`].

use std::fmt;

use gridinv_core::{CellRect, Size};

use crate::item::ItemInfo;

/// Non-owning handle to a widget living in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// Name of a widget class the host knows how to instantiate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetClass(String);

impl WidgetClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetClass {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host could not instantiate a widget of this class.
    CreateFailed { class: WidgetClass },
    /// The layout refused to put the widget into the requested slot.
    SlotRejected { widget: WidgetId, rect: CellRect },
    /// The handle no longer refers to a live widget.
    StaleWidget { widget: WidgetId },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFailed { class } => write!(f, "failed to create widget of class {class}"),
            Self::SlotRejected { widget, rect } => {
                write!(f, "layout rejected {widget} at slot {rect}")
            }
            Self::StaleWidget { widget } => write!(f, "{widget} is no longer valid"),
        }
    }
}

impl std::error::Error for HostError {}

/// Calls the grid makes into the presentation layer.
///
/// Slots always fill their cells on both axes. Implementations are driven
/// from the UI thread only; none of these calls may re-enter the grid.
pub trait WidgetHost {
    /// Instantiate a widget of `class` and return a handle to it.
    fn create_widget(&mut self, class: &WidgetClass) -> Result<WidgetId, HostError>;

    /// Place `widget` in the layout covering `rect`.
    fn insert_into_slot(&mut self, widget: WidgetId, rect: CellRect) -> Result<(), HostError>;

    /// Move an already-slotted widget so its top-left cell is `(row, column)`.
    fn move_slot(&mut self, widget: WidgetId, row: i32, column: i32) -> Result<(), HostError>;

    /// Take `widget` out of the layout. Returns `false` if it was not there.
    fn remove_from_layout(&mut self, widget: WidgetId) -> bool;

    /// Throw away a widget that was created but never made it into a slot.
    fn discard_widget(&mut self, widget: WidgetId);

    /// Whether the handle still refers to a live widget.
    fn is_widget_valid(&self, widget: WidgetId) -> bool;

    /// Item initialization hook, called once right after a successful placement.
    fn initialize_item(&mut self, _widget: WidgetId, _info: &ItemInfo) {}

    /// Give every row and column an equal share of the layout.
    fn configure_tracks(&mut self, _rows: i32, _columns: i32) {}

    /// Size currently allocated to the grid by the surrounding layout.
    fn allocated_size(&self) -> Size;

    /// Current width/height override of the sizing container.
    fn size_override(&self) -> Size;

    fn set_size_override(&mut self, size: Size);

    /// Ask the layout to recompute child geometry.
    fn invalidate_layout(&mut self) {}
}
