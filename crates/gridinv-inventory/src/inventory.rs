#![forbid(unsafe_code)]

//! The grid inventory: public operations over occupancy, placement,
//! placeholders, and the presentation host.
//!
//! # Invariants
//!
//! 1. Item footprints are pairwise disjoint and inside the grid.
//! 2. After every public operation, placeholders cover exactly the free cells
//!    (or nothing when no placeholder class is configured).
//! 3. A failed operation leaves index, placeholders, and host slots as they
//!    were.
//! 4. Notifications fire after the mutation and reconciliation complete.
//!
//! # Usage
//!
//! ```
//! use gridinv_inventory::{AddRequest, InventoryGrid, InventoryOptions};
//! use gridinv_harness::RecordingHost;
//! use gridinv_layout::GridConfig;
//!
//! let options = InventoryOptions::new()
//!     .with_item_class("ItemTile")
//!     .with_placeholder_class("EmptyCell");
//! let mut grid = InventoryGrid::new(GridConfig::new(4, 4, 50.0), options, RecordingHost::new());
//! grid.on_initialized();
//!
//! let sword = grid.add_auto(AddRequest::sized(2, 2)).unwrap();
//! let potion = grid.add_auto(AddRequest::new()).unwrap();
//! assert_eq!(grid.item_info(potion).unwrap().footprint.column, 2);
//! assert!(grid.remove(sword));
//! assert_eq!(grid.placeholders().len(), 15);
//! ```

use std::collections::BTreeSet;

use gridinv_core::{CellCoord, CellRect, ItemPayload, Size};
use gridinv_layout::{
    DebugLabel, GridConfig, GridLine, LayoutRefresh, compute_scale, compute_scaled_lines,
    debug_label, override_differs, scaled_size, target_size,
};

use crate::error::PlacementError;
use crate::events::{EventBus, InventoryEvent, SubscriptionId};
use crate::host::{WidgetClass, WidgetHost};
use crate::item::{DataSourceId, ItemFootprint, ItemId, ItemInfo};
use crate::occupancy::OccupancyIndex;
use crate::placeholder::{self, PlaceholderSet, ReconcilePlan, ReconcileStats};
use crate::placement::PlacementEngine;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-grid settings that are not part of the geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryOptions {
    item_class: Option<WidgetClass>,
    placeholder_class: Option<WidgetClass>,
    owner_name: Option<String>,
    design_time: bool,
}

impl InventoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widget class used for items when a request does not name one.
    #[must_use]
    pub fn with_item_class(mut self, class: impl Into<WidgetClass>) -> Self {
        self.item_class = Some(class.into());
        self
    }

    /// Widget class for empty-cell placeholders. Without one, no placeholders
    /// are created.
    #[must_use]
    pub fn with_placeholder_class(mut self, class: impl Into<WidgetClass>) -> Self {
        self.placeholder_class = Some(class.into());
        self
    }

    /// Name shown in the design-time label.
    #[must_use]
    pub fn with_owner_name(mut self, name: impl Into<String>) -> Self {
        self.owner_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_design_time(mut self, design_time: bool) -> Self {
        self.design_time = design_time;
        self
    }

    pub fn item_class(&self) -> Option<&WidgetClass> {
        self.item_class.as_ref()
    }

    pub fn placeholder_class(&self) -> Option<&WidgetClass> {
        self.placeholder_class.as_ref()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    pub fn is_design_time(&self) -> bool {
        self.design_time
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// What to add: spans, optional data source and payload, optional class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub rows: i32,
    pub columns: i32,
    pub data_source: Option<DataSourceId>,
    pub payload: Option<ItemPayload>,
    pub widget_class: Option<WidgetClass>,
}

impl Default for AddRequest {
    fn default() -> Self {
        Self::sized(1, 1)
    }
}

impl AddRequest {
    /// A 1x1 item with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sized(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            data_source: None,
            payload: None,
            widget_class: None,
        }
    }

    #[must_use]
    pub fn with_data_source(mut self, source: DataSourceId) -> Self {
        self.data_source = Some(source);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: ItemPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub fn with_widget_class(mut self, class: impl Into<WidgetClass>) -> Self {
        self.widget_class = Some(class.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-cell inventory grid driving a presentation host.
#[derive(Debug)]
pub struct InventoryGrid<H: WidgetHost> {
    config: GridConfig,
    options: InventoryOptions,
    host: H,
    index: OccupancyIndex,
    placeholders: PlaceholderSet,
    events: EventBus,
    scale: f32,
    refresh: LayoutRefresh,
}

impl<H: WidgetHost> InventoryGrid<H> {
    /// Create a grid. Nothing is sent to the host until the first mutation
    /// or [`on_initialized`](Self::on_initialized).
    pub fn new(config: GridConfig, options: InventoryOptions, host: H) -> Self {
        Self {
            config: config.sanitized(),
            options,
            host,
            index: OccupancyIndex::new(),
            placeholders: PlaceholderSet::new(),
            events: EventBus::new(),
            scale: 1.0,
            refresh: LayoutRefresh::new(),
        }
    }

    // -- Mutations ----------------------------------------------------------

    /// Place an item at the first free position in row-major order.
    pub fn add_auto(&mut self, request: AddRequest) -> Result<ItemId, PlacementError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "inventory.add",
            rows = request.rows,
            columns = request.columns,
            mode = "auto"
        )
        .entered();

        let class = self.precheck(&request)?;
        let engine = PlacementEngine::new(&self.config, &self.index);
        let Some(origin) = engine.find_free_slot(request.rows, request.columns) else {
            return Err(rejected(PlacementError::NoFreeSlot {
                rows: request.rows,
                columns: request.columns,
            }));
        };
        let rect = CellRect::new(origin.row, origin.column, request.rows, request.columns);
        self.place(class, rect, request.data_source, request.payload)
    }

    /// Place an item with its top-left cell at `(row, column)`.
    pub fn add_at(
        &mut self,
        request: AddRequest,
        row: i32,
        column: i32,
    ) -> Result<ItemId, PlacementError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "inventory.add",
            rows = request.rows,
            columns = request.columns,
            row,
            column
        )
        .entered();

        let class = self.precheck(&request)?;
        let rect = CellRect::new(row, column, request.rows, request.columns);
        PlacementEngine::new(&self.config, &self.index)
            .validate_placement(&rect)
            .map_err(rejected)?;
        self.place(class, rect, request.data_source, request.payload)
    }

    /// Take an item out of the grid. Returns `false` if it was not tracked.
    pub fn remove(&mut self, id: ItemId) -> bool {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("inventory.remove", id = id.get()).entered();

        if self.index.remove(id).is_none() {
            gridinv_core::debug!(item = %id, "remove ignored: not tracked");
            return false;
        }
        self.detach_widget(id);
        self.reconcile_placeholders();
        self.events.emit(&InventoryEvent::ItemRemoved { id });
        true
    }

    /// Move an item so its top-left cell lands on `(row, column)`.
    ///
    /// The item's own footprint does not block the move. On any failure the
    /// item stays where it was.
    pub fn move_item(&mut self, id: ItemId, row: i32, column: i32) -> Result<(), PlacementError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("inventory.move", id = id.get(), row, column).entered();

        let target = PlacementEngine::new(&self.config, &self.index)
            .validate_move(id, row, column)
            .map_err(rejected)?;
        if let Err(err) = self.host.move_slot(id, row, column) {
            gridinv_core::error!(item = %id, error = %err, "host refused to move slot");
            return Err(err.into());
        }
        let previous = self
            .index
            .set_footprint(id, ItemFootprint::from(target))
            .ok_or(PlacementError::NotFound { id })?;
        self.reconcile_placeholders();
        if let Some(item) = self.index.find(id) {
            let event = InventoryEvent::ItemMoved {
                id,
                previous,
                info: item.info.clone(),
            };
            self.events.emit(&event);
        }
        Ok(())
    }

    /// Remove every item in one step.
    ///
    /// The index is reset at once and placeholders are reconciled a single
    /// time; then one [`InventoryEvent::ItemRemoved`] fires per item in
    /// ascending id order. Returns how many items were removed.
    pub fn clear(&mut self) -> usize {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("inventory.clear", items = self.index.len()).entered();

        let removed = self.index.clear();
        for item in &removed {
            self.detach_widget(item.id);
        }
        self.reconcile_placeholders();
        for item in &removed {
            self.events.emit(&InventoryEvent::ItemRemoved { id: item.id });
        }
        removed.len()
    }

    /// Clear every item, drop every placeholder, reset the tracks, and
    /// repopulate placeholders from scratch.
    pub fn rebuild(&mut self) {
        self.clear();
        for (_, widget) in self.placeholders.drain() {
            self.detach_widget(widget);
        }
        self.host
            .configure_tracks(self.config.rows(), self.config.columns());
        self.reconcile_placeholders();
    }

    /// Change the row count (clamped to at least 1). Returns evicted items.
    pub fn set_rows(&mut self, rows: i32) -> Vec<ItemId> {
        self.resize(|config| config.set_rows(rows))
    }

    /// Change the column count (clamped to at least 1). Returns evicted items.
    pub fn set_columns(&mut self, columns: i32) -> Vec<ItemId> {
        self.resize(|config| config.set_columns(columns))
    }

    /// Change the unscaled cell size (clamped to at least 1.0).
    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.config.set_cell_size(cell_size);
        self.rescale();
    }

    /// Record where the presentation layer last drew an item.
    pub fn set_item_last_center(&mut self, id: ItemId, center: (f32, f32)) -> bool {
        self.index.set_last_center(id, center)
    }

    /// Bring placeholders in line with occupancy. Runs automatically after
    /// every mutation; calling it again without a mutation is a no-op.
    pub fn reconcile_placeholders(&mut self) -> ReconcileStats {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("inventory.reconcile").entered();

        let plan = match self.options.placeholder_class {
            Some(_) => placeholder::reconcile(&self.config, &self.index, &self.placeholders, |w| {
                self.host.is_widget_valid(w)
            }),
            None => ReconcilePlan {
                to_remove: self.placeholders.cells().collect(),
                to_add: BTreeSet::new(),
            },
        };

        let mut stats = ReconcileStats {
            kept: self.placeholders.len() - plan.to_remove.len(),
            ..ReconcileStats::default()
        };
        if plan.is_empty() {
            return stats;
        }

        for cell in &plan.to_remove {
            if let Some(widget) = self.placeholders.remove(*cell) {
                self.detach_widget(widget);
                stats.removed += 1;
            }
        }
        if let Some(class) = self.options.placeholder_class.clone() {
            for cell in &plan.to_add {
                if self.spawn_placeholder(&class, *cell) {
                    stats.added += 1;
                } else {
                    stats.failed += 1;
                }
            }
        }

        gridinv_core::debug!(
            kept = stats.kept,
            removed = stats.removed,
            added = stats.added,
            failed = stats.failed,
            "placeholders reconciled"
        );
        stats
    }

    // -- Lifecycle ----------------------------------------------------------

    /// First-time setup once the host widget tree exists.
    pub fn on_initialized(&mut self) {
        gridinv_core::info!(
            rows = self.config.rows(),
            columns = self.config.columns(),
            cell_size = self.config.cell_size(),
            "grid initialized"
        );
        if self.options.item_class.is_none() {
            gridinv_core::warn!("no default item widget class; requests must name one");
        }
        if self.options.placeholder_class.is_none() {
            gridinv_core::warn!("no placeholder widget class; empty cells stay blank");
        }
        self.scale = 1.0;
        self.refresh.reset();
        self.host.set_size_override(target_size(&self.config));
        self.host
            .configure_tracks(self.config.rows(), self.config.columns());
        self.reconcile_placeholders();
    }

    /// Design-time preview: size and tracks only, no layout tracking.
    pub fn on_design_preview(&mut self) {
        if !self.options.design_time {
            return;
        }
        self.host
            .configure_tracks(self.config.rows(), self.config.columns());
        self.host.set_size_override(target_size(&self.config));
    }

    /// React to a new allocated size. Returns `true` when a refresh ran.
    ///
    /// Changes within half a unit on both axes are ignored. When the size is
    /// too small to fit into, the previous scale is kept.
    pub fn on_layout_changed(&mut self, available: Size) -> bool {
        if !self.refresh.observe(available) {
            return false;
        }
        let Some(scale) = compute_scale(&self.config, available) else {
            gridinv_core::warn!(
                width = available.width,
                height = available.height,
                "allocated size too small; scale unchanged"
            );
            return false;
        };
        self.scale = scale;
        gridinv_core::info!(scale, "layout refreshed");
        self.apply_size_override();
        true
    }

    /// Per-frame hook: pull the allocated size from the host and refresh
    /// if it moved.
    pub fn sync_layout(&mut self) -> bool {
        let available = self.host.allocated_size();
        self.on_layout_changed(available)
    }

    // -- Queries ------------------------------------------------------------

    /// Whether a `rows x columns` item could be added at `(row, column)`.
    pub fn is_area_clear(&self, row: i32, column: i32, rows: i32, columns: i32) -> bool {
        PlacementEngine::new(&self.config, &self.index)
            .is_area_clear(&CellRect::new(row, column, rows, columns))
    }

    /// Where [`add_auto`](Self::add_auto) would put a `rows x columns` item.
    pub fn find_free_slot(&self, rows: i32, columns: i32) -> Option<CellCoord> {
        PlacementEngine::new(&self.config, &self.index).find_free_slot(rows, columns)
    }

    /// The item whose top-left cell is exactly `(row, column)`.
    pub fn item_at(&self, row: i32, column: i32) -> Option<(ItemId, &ItemInfo)> {
        self.index
            .find_at(row, column)
            .map(|item| (item.id, &item.info))
    }

    /// The item covering `(row, column)` anywhere in its footprint.
    pub fn item_covering(&self, row: i32, column: i32) -> Option<(ItemId, &ItemInfo)> {
        self.index
            .find_covering(row, column)
            .map(|item| (item.id, &item.info))
    }

    pub fn item_info(&self, id: ItemId) -> Option<&ItemInfo> {
        self.index.find(id).map(|item| &item.info)
    }

    pub fn item_payload(&self, id: ItemId) -> Option<&ItemPayload> {
        self.item_info(id).and_then(|info| info.payload.as_ref())
    }

    /// Ids of tracked items whose widgets are still alive, ascending.
    pub fn all_items(&self) -> Vec<ItemId> {
        let mut ids = self.index.all_ids();
        ids.retain(|id| self.host.is_widget_valid(*id));
        ids
    }

    pub fn find_by_data_source(&self, source: DataSourceId) -> Option<ItemId> {
        self.index.find_by_data_source(source)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn placeholders(&self) -> &PlaceholderSet {
        &self.placeholders
    }

    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.index
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn options(&self) -> &InventoryOptions {
        &self.options
    }

    /// Current fit-to-area scale, 1.0 until a layout refresh ran.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Grid size in layout units at the current scale.
    pub fn scaled_size(&self) -> Size {
        scaled_size(&self.config, self.scale)
    }

    /// Line descriptors to paint at the current scale.
    pub fn lines(&self) -> Vec<GridLine> {
        compute_scaled_lines(&self.config, self.scale)
    }

    /// Design-time label, drawn one layer above `base_layer`.
    pub fn debug_label(&self, base_layer: i32) -> Option<DebugLabel> {
        debug_label(
            &self.config,
            self.options.owner_name(),
            self.options.design_time,
            base_layer,
        )
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // -- Notifications ------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl FnMut(&InventoryEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // -- Internals ----------------------------------------------------------

    /// Checks shared by both add paths: class and spans.
    fn precheck(&self, request: &AddRequest) -> Result<WidgetClass, PlacementError> {
        let class = request
            .widget_class
            .clone()
            .or_else(|| self.options.item_class.clone())
            .ok_or(PlacementError::NoWidgetClass)
            .map_err(rejected)?;
        PlacementEngine::validate_dimensions(request.rows, request.columns).map_err(rejected)?;
        Ok(class)
    }

    /// Commit an already-validated placement.
    fn place(
        &mut self,
        class: WidgetClass,
        rect: CellRect,
        data_source: Option<DataSourceId>,
        payload: Option<ItemPayload>,
    ) -> Result<ItemId, PlacementError> {
        let widget = self.host.create_widget(&class).map_err(|err| {
            gridinv_core::error!(class = %class, error = %err, "item widget creation failed");
            PlacementError::from(err)
        })?;
        if let Err(err) = self.host.insert_into_slot(widget, rect) {
            gridinv_core::error!(item = %widget, error = %err, "item slot insertion failed");
            self.host.discard_widget(widget);
            return Err(err.into());
        }

        #[cfg(feature = "tracing")]
        if let Some(source) = data_source
            && let Some(holder) = self.index.find_by_data_source(source)
        {
            tracing::debug!(item = %widget, previous = %holder, source = %source, "data source rebound");
        }
        let info = self
            .index
            .insert(widget, ItemFootprint::from(rect), data_source, payload)
            .info
            .clone();
        self.host.initialize_item(widget, &info);
        self.reconcile_placeholders();
        gridinv_core::debug!(item = %widget, area = %rect, "item placed");
        self.events
            .emit(&InventoryEvent::ItemAdded { id: widget, info });
        Ok(widget)
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn spawn_placeholder(&mut self, class: &WidgetClass, cell: CellCoord) -> bool {
        let widget = match self.host.create_widget(class) {
            Ok(widget) => widget,
            Err(err) => {
                gridinv_core::error!(cell = %cell, error = %err, "placeholder creation failed");
                return false;
            }
        };
        let slot = CellRect::new(cell.row, cell.column, 1, 1);
        if let Err(err) = self.host.insert_into_slot(widget, slot) {
            gridinv_core::error!(cell = %cell, error = %err, "placeholder slot insertion failed");
            self.host.discard_widget(widget);
            return false;
        }
        self.placeholders.insert(cell, widget);
        true
    }

    /// Take a widget out of the layout unless it is already gone.
    fn detach_widget(&mut self, widget: ItemId) {
        if self.host.is_widget_valid(widget) {
            self.host.remove_from_layout(widget);
        }
    }

    fn resize(&mut self, apply: impl FnOnce(&mut GridConfig)) -> Vec<ItemId> {
        apply(&mut self.config);

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "inventory.resize",
            rows = self.config.rows(),
            columns = self.config.columns()
        )
        .entered();

        self.host
            .configure_tracks(self.config.rows(), self.config.columns());
        let evicted = self.index.ids_outside(&self.config.bounds());
        for id in &evicted {
            self.index.remove(*id);
            self.detach_widget(*id);
        }
        self.reconcile_placeholders();
        for id in &evicted {
            gridinv_core::debug!(item = %id, "item evicted by resize");
            self.events.emit(&InventoryEvent::ItemRemoved { id: *id });
        }
        self.rescale();
        evicted
    }

    /// Recompute scale against the last observed size, if any, and push the
    /// new size override to the host.
    fn rescale(&mut self) {
        let last = self.refresh.last_known();
        if let Some(scale) = compute_scale(&self.config, last) {
            self.scale = scale;
        }
        self.apply_size_override();
    }

    fn apply_size_override(&mut self) {
        let wanted = scaled_size(&self.config, self.scale);
        if override_differs(self.host.size_override(), wanted) {
            self.host.set_size_override(wanted);
        }
        self.host.invalidate_layout();
    }
}

/// Log a refused request at debug level and hand the error back.
fn rejected(err: PlacementError) -> PlacementError {
    gridinv_core::debug!(reason = %err, "request rejected");
    err
}
