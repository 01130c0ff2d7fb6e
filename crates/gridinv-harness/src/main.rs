#![forbid(unsafe_code)]

//! Scenario replay for the grid inventory.
//!
//! Drives a 4x4 grid through add, remove, and move, printing the grid after
//! each step and every notification as a JSON line.
//!
//! # Running
//!
//! ```sh
//! cargo run -p gridinv-harness
//! cargo run -p gridinv-harness --features tracing-json   # plus JSON logs on stderr
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use gridinv_core::Size;
use gridinv_harness::{RecordingHost, grid_to_text, host_layout_text};
use gridinv_inventory::{
    AddRequest, DataSourceId, InventoryEvent, InventoryGrid, InventoryOptions, ItemFootprint,
    PlacementError,
};
use gridinv_layout::GridConfig;

const PLACEHOLDER_CLASS: &str = "EmptyCell";

fn footprint_json(fp: &ItemFootprint) -> serde_json::Value {
    serde_json::json!({
        "row": fp.row,
        "column": fp.column,
        "row_span": fp.row_span,
        "column_span": fp.column_span,
    })
}

fn event_json(event: &InventoryEvent) -> serde_json::Value {
    match event {
        InventoryEvent::ItemAdded { id, info } => serde_json::json!({
            "event": "item_added",
            "id": id.get(),
            "footprint": footprint_json(&info.footprint),
            "data_source": info.data_source.map(|s| s.0),
        }),
        InventoryEvent::ItemRemoved { id } => serde_json::json!({
            "event": "item_removed",
            "id": id.get(),
        }),
        InventoryEvent::ItemMoved { id, previous, info } => serde_json::json!({
            "event": "item_moved",
            "id": id.get(),
            "from": footprint_json(previous),
            "to": footprint_json(&info.footprint),
        }),
    }
}

fn show(step: &str, grid: &InventoryGrid<RecordingHost>, events: &RefCell<Vec<InventoryEvent>>) {
    println!("== {step}");
    for event in events.borrow_mut().drain(..) {
        println!("{}", event_json(&event));
    }
    println!("{}\n", grid_to_text(grid));
}

fn main() -> Result<(), PlacementError> {
    #[cfg(feature = "tracing-json")]
    let _ = gridinv_core::logging::init_json_subscriber();

    let options = InventoryOptions::new()
        .with_item_class("ItemTile")
        .with_placeholder_class(PLACEHOLDER_CLASS)
        .with_owner_name("demo");
    let host = RecordingHost::new().with_allocated_size(Size::new(320.0, 200.0));
    let mut grid = InventoryGrid::new(GridConfig::new(4, 4, 50.0), options, host);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    grid.on_initialized();
    grid.sync_layout();
    println!("scale {:.3}, size {:?}", grid.scale(), grid.scaled_size());
    show("initialized", &grid, &events);

    let chest = grid.add_auto(AddRequest::sized(2, 2).with_data_source(DataSourceId(1)))?;
    let gem = grid.add_auto(AddRequest::new().with_data_source(DataSourceId(2)))?;
    show("added 2x2 and 1x1", &grid, &events);

    grid.remove(chest);
    show("removed 2x2", &grid, &events);

    grid.move_item(gem, 0, 0)?;
    show("moved 1x1 to (0, 0)", &grid, &events);

    grid.add_at(AddRequest::new(), 0, 2)?;
    match grid.move_item(gem, 0, 2) {
        Ok(()) => println!("unexpected: move onto an occupied cell succeeded"),
        Err(err) => println!("move refused: {err}"),
    }
    show("after refused move", &grid, &events);

    let config = grid.config();
    let host_view = host_layout_text(
        grid.host(),
        config.rows(),
        config.columns(),
        PLACEHOLDER_CLASS,
    );
    println!("host layout matches grid: {}", host_view == grid_to_text(&grid));
    Ok(())
}
