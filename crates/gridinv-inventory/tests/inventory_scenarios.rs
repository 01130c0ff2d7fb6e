#![forbid(unsafe_code)]

//! End-to-end behavior of `InventoryGrid` against the recording host.

use std::cell::RefCell;
use std::rc::Rc;

use gridinv_core::{CellCoord, ItemPayload, Rgba, Size};
use gridinv_harness::{
    HostCall, RecordingHost, assert_grid_snapshot, grid_to_text, host_layout_text,
};
use gridinv_inventory::{
    AddRequest, DataSourceId, HostError, InventoryEvent, InventoryGrid, InventoryOptions,
    ItemFootprint, PlacementError, WidgetHost, WidgetId,
};
use gridinv_layout::GridConfig;

const ITEM: &str = "ItemTile";
const EMPTY: &str = "EmptyCell";

fn options() -> InventoryOptions {
    InventoryOptions::new()
        .with_item_class(ITEM)
        .with_placeholder_class(EMPTY)
}

fn grid(rows: i32, columns: i32) -> InventoryGrid<RecordingHost> {
    let mut grid = InventoryGrid::new(
        GridConfig::new(rows, columns, 50.0),
        options(),
        RecordingHost::new(),
    );
    grid.on_initialized();
    grid
}

fn record_events(grid: &mut InventoryGrid<RecordingHost>) -> Rc<RefCell<Vec<InventoryEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

/// The host's slots must always mirror the grid's own bookkeeping.
fn assert_host_in_sync(grid: &InventoryGrid<RecordingHost>) {
    let config = grid.config();
    assert_eq!(
        host_layout_text(grid.host(), config.rows(), config.columns(), EMPTY),
        grid_to_text(grid)
    );
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn four_by_four_add_remove_move_scenario() {
    let mut grid = grid(4, 4);
    assert_eq!(grid.placeholders().len(), 16);

    let big = grid.add_auto(AddRequest::sized(2, 2)).unwrap();
    let small = grid.add_auto(AddRequest::new()).unwrap();
    assert_eq!(
        grid.item_info(big).unwrap().footprint,
        ItemFootprint::new(0, 0, 2, 2)
    );
    assert_eq!(
        grid.item_info(small).unwrap().footprint,
        ItemFootprint::new(0, 2, 1, 1)
    );
    assert_grid_snapshot!("scenario_after_adds", &grid);
    assert_host_in_sync(&grid);

    assert!(grid.remove(big));
    for (row, column) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        assert!(grid.placeholders().contains(CellCoord::new(row, column)));
    }
    assert_eq!(grid_to_text(&grid), "..A.\n....\n....\n....");
    assert_host_in_sync(&grid);

    grid.move_item(small, 0, 0).unwrap();
    assert_eq!(grid.item_at(0, 0).map(|(id, _)| id), Some(small));

    let blocker = grid.add_at(AddRequest::new(), 0, 2).unwrap();
    let index_before = grid.occupancy().clone();
    let placeholders_before = grid.placeholders().clone();
    assert_eq!(
        grid.move_item(small, 0, 2),
        Err(PlacementError::Occupied {
            rect: gridinv_core::CellRect::new(0, 2, 1, 1),
            by: blocker
        })
    );
    assert_eq!(grid.occupancy(), &index_before);
    assert_eq!(grid.placeholders(), &placeholders_before);
    assert_grid_snapshot!("scenario_after_refused_move", &grid);
    assert_host_in_sync(&grid);
}

#[test]
fn first_fit_fills_the_top_row_first() {
    let mut grid = grid(3, 3);
    let a = grid.add_auto(AddRequest::new()).unwrap();
    let b = grid.add_auto(AddRequest::new()).unwrap();
    assert_eq!(grid.item_info(a).unwrap().footprint.rect().origin(), CellCoord::new(0, 0));
    assert_eq!(grid.item_info(b).unwrap().footprint.rect().origin(), CellCoord::new(0, 1));
}

#[test]
fn full_grid_reports_no_free_slot() {
    let mut grid = grid(2, 2);
    grid.add_auto(AddRequest::sized(2, 2)).unwrap();
    let created = grid.host().created_count();
    assert_eq!(
        grid.add_auto(AddRequest::new()),
        Err(PlacementError::NoFreeSlot { rows: 1, columns: 1 })
    );
    assert_eq!(
        grid.add_auto(AddRequest::sized(3, 1)),
        Err(PlacementError::NoFreeSlot { rows: 3, columns: 1 })
    );
    assert_eq!(grid.host().created_count(), created);
}

// ============================================================================
// Rejections leave state untouched
// ============================================================================

#[test]
fn bounds_rejection_has_no_side_effects() {
    let mut grid = grid(3, 3);
    grid.add_auto(AddRequest::new()).unwrap();
    let calls = grid.host().calls().len();
    let index = grid.occupancy().clone();

    assert!(matches!(
        grid.add_at(AddRequest::new(), -1, 0),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert!(matches!(
        grid.add_at(AddRequest::sized(2, 2), 2, 2),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert!(matches!(
        grid.add_at(AddRequest::new(), 0, 3),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert_eq!(grid.occupancy(), &index);
    assert_eq!(grid.host().calls().len(), calls);
}

#[test]
fn failed_moves_are_atomic() {
    let mut grid = grid(3, 3);
    let a = grid.add_auto(AddRequest::sized(1, 2)).unwrap();
    let b = grid.add_at(AddRequest::new(), 2, 2).unwrap();
    let events = record_events(&mut grid);
    let index = grid.occupancy().clone();
    let placeholders = grid.placeholders().clone();
    let calls = grid.host().calls().len();

    assert!(matches!(
        grid.move_item(a, 0, 2),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert!(matches!(
        grid.move_item(a, 2, 1),
        Err(PlacementError::Occupied { by, .. }) if by == b
    ));
    assert_eq!(
        grid.move_item(WidgetId(999), 0, 0),
        Err(PlacementError::NotFound { id: WidgetId(999) })
    );

    assert_eq!(grid.occupancy(), &index);
    assert_eq!(grid.placeholders(), &placeholders);
    assert_eq!(grid.host().calls().len(), calls);
    assert!(events.borrow().is_empty());
}

#[test]
fn moving_onto_own_footprint_is_allowed() {
    let mut grid = grid(3, 3);
    let a = grid.add_auto(AddRequest::sized(2, 2)).unwrap();
    grid.move_item(a, 1, 1).unwrap();
    assert_eq!(grid_to_text(&grid), "...\n.AA\n.AA");
    assert_host_in_sync(&grid);
}

#[test]
fn remove_unknown_item_returns_false() {
    let mut grid = grid(2, 2);
    let events = record_events(&mut grid);
    assert!(!grid.remove(WidgetId(77)));
    assert!(events.borrow().is_empty());
}

// ============================================================================
// Presentation failures
// ============================================================================

#[test]
fn slot_rejection_discards_the_widget() {
    let mut grid = grid(2, 2);
    let placeholders = grid.placeholders().clone();
    grid.host_mut().fail_next_inserts(1);

    let err = grid.add_auto(AddRequest::new()).unwrap_err();
    let PlacementError::Presentation(HostError::SlotRejected { widget, .. }) = err else {
        panic!("expected slot rejection, got {err:?}");
    };
    assert!(grid.is_empty());
    assert!(!grid.host().widget(widget).unwrap().alive);
    assert!(grid.host().calls().contains(&HostCall::Discard { widget }));
    assert_eq!(grid.placeholders(), &placeholders);

    let id = grid.add_auto(AddRequest::new()).unwrap();
    assert!(grid.host().widget(id).unwrap().initialized);
}

#[test]
fn creation_failure_reports_presentation_error() {
    let mut grid = grid(2, 2);
    grid.host_mut().fail_class(ITEM);
    assert_eq!(
        grid.add_auto(AddRequest::new()),
        Err(PlacementError::Presentation(HostError::CreateFailed {
            class: ITEM.into()
        }))
    );
    let id = grid
        .add_auto(AddRequest::new().with_widget_class("SpecialTile"))
        .unwrap();
    assert_eq!(grid.host().widget(id).unwrap().class.name(), "SpecialTile");
}

#[test]
fn host_move_failure_keeps_the_old_footprint() {
    let mut grid = grid(3, 3);
    let a = grid.add_auto(AddRequest::new()).unwrap();
    grid.host_mut().fail_next_moves(1);
    assert!(matches!(
        grid.move_item(a, 2, 2),
        Err(PlacementError::Presentation(_))
    ));
    assert_eq!(grid.item_info(a).unwrap().footprint, ItemFootprint::new(0, 0, 1, 1));
    assert_host_in_sync(&grid);
}

#[test]
fn placeholder_creation_failures_heal_on_next_reconcile() {
    let mut grid = grid(2, 2);
    let a = grid.add_auto(AddRequest::sized(2, 1)).unwrap();
    grid.host_mut().fail_class(EMPTY);
    assert!(grid.remove(a));
    assert_eq!(grid.placeholders().len(), 2);
    assert_eq!(grid_to_text(&grid), " .\n .");

    grid.host_mut().heal_class(EMPTY);
    let stats = grid.reconcile_placeholders();
    assert_eq!((stats.kept, stats.added, stats.failed), (2, 2, 0));
    assert_eq!(grid_to_text(&grid), "..\n..");
}

// ============================================================================
// Externally invalidated widgets
// ============================================================================

#[test]
fn destroyed_placeholder_is_replaced() {
    let mut grid = grid(2, 2);
    let cell = CellCoord::new(1, 0);
    let old = grid.placeholders().get(cell).unwrap();
    assert!(grid.host_mut().destroy_widget(old));

    let stats = grid.reconcile_placeholders();
    assert_eq!((stats.kept, stats.removed, stats.added), (3, 1, 1));
    let new = grid.placeholders().get(cell).unwrap();
    assert_ne!(new, old);
    assert!(grid.reconcile_placeholders().added == 0);
}

#[test]
fn destroyed_item_drops_out_of_queries() {
    let mut grid = grid(2, 2);
    let a = grid.add_auto(AddRequest::new()).unwrap();
    let b = grid.add_auto(AddRequest::new()).unwrap();
    grid.host_mut().destroy_widget(a);
    assert_eq!(grid.all_items(), vec![b]);

    grid.host_mut().take_calls();
    assert!(grid.remove(a));
    assert!(!grid.host().calls().contains(&HostCall::Remove { widget: a }));
    assert_eq!(grid.placeholders().len(), 3);
}

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn lookups_by_cell_source_and_payload() {
    let mut grid = grid(3, 3);
    let id = grid
        .add_at(
            AddRequest::sized(2, 1)
                .with_data_source(DataSourceId(5))
                .with_payload(ItemPayload::new("item/def", vec![1, 2, 3])),
            1,
            1,
        )
        .unwrap();

    let (found, info) = grid.item_at(1, 1).unwrap();
    assert_eq!(found, id);
    assert_eq!(info.data_source, Some(DataSourceId(5)));
    assert!(grid.item_at(2, 1).is_none());
    assert_eq!(grid.item_covering(2, 1).map(|(found, _)| found), Some(id));
    assert_eq!(grid.find_by_data_source(DataSourceId(5)), Some(id));
    assert_eq!(grid.item_payload(id).map(|p| p.data.clone()), Some(vec![1, 2, 3]));
    assert!(grid.item_info(id).unwrap().contains_cell(2, 1));

    assert!(!grid.is_area_clear(0, 0, 2, 2));
    assert!(grid.is_area_clear(0, 2, 3, 1));
    assert!(!grid.is_area_clear(0, 2, 4, 1));

    assert!(grid.set_item_last_center(id, (75.0, 100.0)));
    assert_eq!(grid.item_info(id).unwrap().last_center, (75.0, 100.0));
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn notifications_follow_mutation_order() {
    let mut grid = grid(3, 3);
    let events = record_events(&mut grid);

    let a = grid.add_auto(AddRequest::new()).unwrap();
    let b = grid.add_auto(AddRequest::new()).unwrap();
    grid.move_item(b, 2, 2).unwrap();
    grid.remove(a);

    let kinds: Vec<(&str, WidgetId)> = events
        .borrow()
        .iter()
        .map(|event| {
            let kind = match event {
                InventoryEvent::ItemAdded { .. } => "added",
                InventoryEvent::ItemRemoved { .. } => "removed",
                InventoryEvent::ItemMoved { .. } => "moved",
            };
            (kind, event.id())
        })
        .collect();
    assert_eq!(
        kinds,
        vec![("added", a), ("added", b), ("moved", b), ("removed", a)]
    );
}

#[test]
fn clear_emits_one_removal_per_item_in_id_order() {
    let mut grid = grid(3, 3);
    let ids: Vec<_> = (0..3)
        .map(|_| grid.add_auto(AddRequest::new()).unwrap())
        .collect();
    let events = record_events(&mut grid);

    assert_eq!(grid.clear(), 3);
    let removed: Vec<_> = events.borrow().iter().map(InventoryEvent::id).collect();
    assert_eq!(removed, ids);
    assert!(grid.is_empty());
    assert_eq!(grid.placeholders().len(), 9);
    assert_host_in_sync(&grid);
}

#[test]
fn rebuild_recreates_every_placeholder() {
    let mut grid = grid(2, 2);
    grid.add_auto(AddRequest::new()).unwrap();
    let before: Vec<_> = grid.placeholders().iter().map(|(_, w)| w).collect();

    grid.rebuild();
    assert!(grid.is_empty());
    assert_eq!(grid.placeholders().len(), 4);
    assert!(grid.placeholders().iter().all(|(_, w)| !before.contains(&w)));
    assert_host_in_sync(&grid);
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn shrinking_evicts_items_that_no_longer_fit() {
    let mut grid = grid(4, 4);
    let keep = grid.add_at(AddRequest::new(), 0, 0).unwrap();
    let corner = grid.add_at(AddRequest::new(), 3, 3).unwrap();
    let wide = grid.add_at(AddRequest::sized(2, 2), 0, 2).unwrap();
    let events = record_events(&mut grid);

    let evicted = grid.set_columns(3);
    assert_eq!(evicted, vec![corner, wide]);
    assert_eq!(grid.all_items(), vec![keep]);
    assert_eq!(grid.host().tracks(), Some((4, 3)));
    assert_eq!(grid.placeholders().len(), 11);
    assert!(grid.placeholders().cells().all(|c| c.column < 3));

    let removed: Vec<_> = events.borrow().iter().map(InventoryEvent::id).collect();
    assert_eq!(removed, vec![corner, wide]);
    assert_host_in_sync(&grid);
}

#[test]
fn growing_keeps_items_and_fills_new_cells() {
    let mut grid = grid(2, 2);
    let a = grid.add_at(AddRequest::new(), 1, 1).unwrap();
    assert!(grid.set_rows(3).is_empty());
    assert_eq!(grid.item_info(a).unwrap().footprint, ItemFootprint::new(1, 1, 1, 1));
    assert_eq!(grid_to_text(&grid), "..\n.A\n..");
}

#[test]
fn row_and_column_counts_clamp_to_one() {
    let mut grid = grid(2, 2);
    grid.set_rows(0);
    grid.set_columns(-4);
    assert_eq!((grid.config().rows(), grid.config().columns()), (1, 1));
    assert_eq!(grid.placeholders().len(), 1);
}

#[test]
fn huge_row_count_still_yields_border_lines() {
    let config = GridConfig::new(2, 2, 50.0).with_grid_line(Rgba::TRANSPARENT, 1.0);
    let mut grid = InventoryGrid::new(
        config,
        InventoryOptions::new().with_item_class(ITEM),
        RecordingHost::new(),
    );
    grid.add_auto(AddRequest::new()).unwrap();
    assert!(grid.set_rows(i32::MAX).is_empty());
    let edges: Vec<i32> = grid.lines().iter().map(|line| line.index).collect();
    assert_eq!(edges, vec![0, 2, 0, i32::MAX]);
}

#[test]
fn reused_data_source_follows_the_newest_item() {
    let mut grid = grid(2, 2);
    let events = record_events(&mut grid);
    let old = grid
        .add_auto(AddRequest::new().with_data_source(DataSourceId(7)))
        .unwrap();
    let new = grid
        .add_auto(AddRequest::new().with_data_source(DataSourceId(7)))
        .unwrap();

    assert_eq!(grid.find_by_data_source(DataSourceId(7)), Some(new));
    assert_eq!(grid.item_info(old).unwrap().data_source, None);
    assert_eq!(grid.all_items(), vec![old, new]);
    assert_eq!(events.borrow().len(), 2);
    assert_eq!(grid_to_text(&grid), "AB\n..");
}

// ============================================================================
// Layout lifecycle
// ============================================================================

#[test]
fn initialization_sizes_and_configures_the_host() {
    let grid = grid(4, 3);
    assert_eq!(grid.host().size_override(), Size::new(150.0, 200.0));
    assert_eq!(grid.host().tracks(), Some((4, 3)));
    assert_eq!(grid.scale(), 1.0);
}

#[test]
fn layout_refresh_fits_and_ignores_jitter() {
    let mut grid = grid(10, 10);
    grid.host_mut().set_allocated_size(Size::new(1000.0, 400.0));

    assert!(grid.sync_layout());
    assert!((grid.scale() - 0.8).abs() < 1e-6);
    assert_eq!(grid.host().size_override(), Size::new(400.0, 400.0));
    let invalidations = grid.host().invalidations();

    grid.host_mut().set_allocated_size(Size::new(1000.3, 399.8));
    assert!(!grid.sync_layout());
    assert_eq!(grid.host().invalidations(), invalidations);

    grid.host_mut().set_allocated_size(Size::new(500.0, 1000.0));
    assert!(grid.sync_layout());
    assert!((grid.scale() - 1.0).abs() < 1e-6);
}

#[test]
fn cell_size_change_rescales_against_last_layout() {
    let mut grid = grid(10, 10);
    grid.on_layout_changed(Size::new(1000.0, 400.0));
    grid.set_cell_size(20.0);
    assert!((grid.scale() - 2.0).abs() < 1e-6);
    assert_eq!(grid.scaled_size(), Size::new(400.0, 400.0));
}

#[test]
fn lines_and_debug_label_follow_config() {
    let config = GridConfig::new(4, 4, 50.0).with_grid_line(Rgba::TRANSPARENT, 1.0);
    let design = options().with_owner_name("Backpack").with_design_time(true);
    let mut grid = InventoryGrid::new(config, design, RecordingHost::new());
    grid.on_design_preview();
    assert_eq!(grid.host().tracks(), Some((4, 4)));

    assert_eq!(grid.lines().len(), 4);
    let label = grid.debug_label(3).unwrap();
    assert_eq!(label.text, "Owner: Backpack\nWxH: 200.0 x 200.0");
    assert_eq!(label.layer, 4);

    let runtime = InventoryGrid::new(GridConfig::default(), options(), RecordingHost::new());
    assert!(runtime.debug_label(0).is_none());
}

#[test]
fn without_placeholder_class_cells_stay_blank() {
    let mut grid = InventoryGrid::new(
        GridConfig::new(2, 2, 10.0),
        InventoryOptions::new().with_item_class(ITEM),
        RecordingHost::new(),
    );
    grid.on_initialized();
    grid.add_auto(AddRequest::new()).unwrap();
    assert!(grid.placeholders().is_empty());
    assert_eq!(grid_to_text(&grid), "A \n  ");
}
