#![forbid(unsafe_code)]

//! In-memory presentation host with a call log and fault injection.

use std::collections::{BTreeMap, BTreeSet};

use gridinv_core::{CellRect, Size};
use gridinv_inventory::{HostError, ItemInfo, WidgetClass, WidgetHost, WidgetId};

/// One call the grid made into the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create { class: WidgetClass, widget: Option<WidgetId> },
    Insert { widget: WidgetId, rect: CellRect, accepted: bool },
    Move { widget: WidgetId, row: i32, column: i32, accepted: bool },
    Remove { widget: WidgetId },
    Discard { widget: WidgetId },
    Initialize { widget: WidgetId },
    ConfigureTracks { rows: i32, columns: i32 },
    SetSizeOverride(Size),
    Invalidate,
}

/// What the host knows about one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRecord {
    pub class: WidgetClass,
    /// Cells covered while slotted in the layout.
    pub slot: Option<CellRect>,
    pub alive: bool,
    pub initialized: bool,
}

/// A [`WidgetHost`] that keeps everything in maps.
///
/// Widget ids start at 1 and are never reused.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    next_id: u64,
    widgets: BTreeMap<WidgetId, WidgetRecord>,
    failing_classes: BTreeSet<WidgetClass>,
    failing_inserts: usize,
    failing_moves: usize,
    allocated: Size,
    size_override: Size,
    tracks: Option<(i32, i32)>,
    invalidations: usize,
    calls: Vec<HostCall>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            widgets: BTreeMap::new(),
            failing_classes: BTreeSet::new(),
            failing_inserts: 0,
            failing_moves: 0,
            allocated: Size::default(),
            size_override: Size::default(),
            tracks: None,
            invalidations: 0,
            calls: Vec::new(),
        }
    }

    /// Report `size` from [`WidgetHost::allocated_size`].
    #[must_use]
    pub fn with_allocated_size(mut self, size: Size) -> Self {
        self.allocated = size;
        self
    }

    pub fn set_allocated_size(&mut self, size: Size) {
        self.allocated = size;
    }

    // -- Fault injection -----------------------------------------------------

    /// Make every future creation of `class` fail.
    pub fn fail_class(&mut self, class: impl Into<WidgetClass>) {
        self.failing_classes.insert(class.into());
    }

    pub fn heal_class(&mut self, class: impl Into<WidgetClass>) {
        self.failing_classes.remove(&class.into());
    }

    /// Reject the next `count` slot insertions.
    pub fn fail_next_inserts(&mut self, count: usize) {
        self.failing_inserts = count;
    }

    /// Reject the next `count` slot moves.
    pub fn fail_next_moves(&mut self, count: usize) {
        self.failing_moves = count;
    }

    /// Destroy a widget behind the grid's back, as a UI framework might.
    pub fn destroy_widget(&mut self, widget: WidgetId) -> bool {
        match self.widgets.get_mut(&widget) {
            Some(record) if record.alive => {
                record.alive = false;
                record.slot = None;
                true
            }
            _ => false,
        }
    }

    // -- Inspection ----------------------------------------------------------

    pub fn widget(&self, widget: WidgetId) -> Option<&WidgetRecord> {
        self.widgets.get(&widget)
    }

    /// Live widgets currently in the layout, by id.
    pub fn slotted(&self) -> impl Iterator<Item = (WidgetId, &WidgetRecord)> + '_ {
        self.widgets
            .iter()
            .filter(|(_, record)| record.alive && record.slot.is_some())
            .map(|(id, record)| (*id, record))
    }

    /// Number of live, slotted widgets of `class`.
    pub fn slotted_count(&self, class: &str) -> usize {
        self.slotted()
            .filter(|(_, record)| record.class.name() == class)
            .count()
    }

    /// Widgets that were ever created, dead or alive.
    pub fn created_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn tracks(&self) -> Option<(i32, i32)> {
        self.tracks
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Return and forget the call log.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    fn record_mut(&mut self, widget: WidgetId) -> Result<&mut WidgetRecord, HostError> {
        self.widgets
            .get_mut(&widget)
            .filter(|record| record.alive)
            .ok_or(HostError::StaleWidget { widget })
    }
}

impl WidgetHost for RecordingHost {
    fn create_widget(&mut self, class: &WidgetClass) -> Result<WidgetId, HostError> {
        if self.failing_classes.contains(class) {
            self.calls.push(HostCall::Create {
                class: class.clone(),
                widget: None,
            });
            return Err(HostError::CreateFailed {
                class: class.clone(),
            });
        }
        let widget = WidgetId(self.next_id);
        self.next_id += 1;
        self.widgets.insert(
            widget,
            WidgetRecord {
                class: class.clone(),
                slot: None,
                alive: true,
                initialized: false,
            },
        );
        self.calls.push(HostCall::Create {
            class: class.clone(),
            widget: Some(widget),
        });
        Ok(widget)
    }

    fn insert_into_slot(&mut self, widget: WidgetId, rect: CellRect) -> Result<(), HostError> {
        let accepted = self.failing_inserts == 0;
        self.calls.push(HostCall::Insert {
            widget,
            rect,
            accepted,
        });
        if !accepted {
            self.failing_inserts -= 1;
            return Err(HostError::SlotRejected { widget, rect });
        }
        self.record_mut(widget)?.slot = Some(rect);
        Ok(())
    }

    fn move_slot(&mut self, widget: WidgetId, row: i32, column: i32) -> Result<(), HostError> {
        let accepted = self.failing_moves == 0;
        self.calls.push(HostCall::Move {
            widget,
            row,
            column,
            accepted,
        });
        if !accepted {
            self.failing_moves -= 1;
            return Err(HostError::StaleWidget { widget });
        }
        let record = self.record_mut(widget)?;
        let slot = record.slot.ok_or(HostError::StaleWidget { widget })?;
        record.slot = Some(slot.moved_to(row, column));
        Ok(())
    }

    fn remove_from_layout(&mut self, widget: WidgetId) -> bool {
        self.calls.push(HostCall::Remove { widget });
        match self.widgets.get_mut(&widget) {
            Some(record) if record.alive => {
                record.alive = false;
                record.slot.take().is_some()
            }
            _ => false,
        }
    }

    fn discard_widget(&mut self, widget: WidgetId) {
        self.calls.push(HostCall::Discard { widget });
        if let Some(record) = self.widgets.get_mut(&widget) {
            record.alive = false;
            record.slot = None;
        }
    }

    fn is_widget_valid(&self, widget: WidgetId) -> bool {
        self.widgets.get(&widget).is_some_and(|record| record.alive)
    }

    fn initialize_item(&mut self, widget: WidgetId, _info: &ItemInfo) {
        self.calls.push(HostCall::Initialize { widget });
        if let Some(record) = self.widgets.get_mut(&widget) {
            record.initialized = true;
        }
    }

    fn configure_tracks(&mut self, rows: i32, columns: i32) {
        self.calls.push(HostCall::ConfigureTracks { rows, columns });
        self.tracks = Some((rows, columns));
    }

    fn allocated_size(&self) -> Size {
        self.allocated
    }

    fn size_override(&self) -> Size {
        self.size_override
    }

    fn set_size_override(&mut self, size: Size) {
        self.calls.push(HostCall::SetSizeOverride(size));
        self.size_override = size;
    }

    fn invalidate_layout(&mut self) {
        self.calls.push(HostCall::Invalidate);
        self.invalidations += 1;
    }
}
