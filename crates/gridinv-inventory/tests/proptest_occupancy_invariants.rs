//! Property-based invariants for the inventory grid.
//!
//! Arbitrary sequences of add / add-at / move / remove / resize / clear are
//! applied to a grid backed by the recording host. After every step:
//!
//! 1. Item footprints are pairwise disjoint.
//! 2. Every footprint lies inside the grid.
//! 3. A cell has a placeholder iff it is in bounds and not covered.
//! 4. Reconciling again changes nothing.
//! 5. The host's slotted widgets mirror the grid's bookkeeping.
//! 6. Failed operations leave occupancy and placeholders unchanged.

use std::collections::BTreeSet;

use gridinv_core::CellCoord;
use gridinv_harness::{RecordingHost, grid_to_text, host_layout_text};
use gridinv_inventory::{AddRequest, InventoryGrid, InventoryOptions, ItemId};
use gridinv_layout::GridConfig;
use proptest::prelude::*;

const EMPTY: &str = "EmptyCell";

#[derive(Debug, Clone)]
enum Op {
    AddAuto { rows: i32, columns: i32 },
    AddAt { rows: i32, columns: i32, row: i32, column: i32 },
    Move { pick: usize, row: i32, column: i32 },
    Remove { pick: usize },
    SetRows(i32),
    SetColumns(i32),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i32..4, 0i32..4).prop_map(|(rows, columns)| Op::AddAuto { rows, columns }),
        4 => (1i32..4, 1i32..4, -1i32..7, -1i32..7)
            .prop_map(|(rows, columns, row, column)| Op::AddAt { rows, columns, row, column }),
        4 => (any::<usize>(), -1i32..7, -1i32..7)
            .prop_map(|(pick, row, column)| Op::Move { pick, row, column }),
        2 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
        1 => (1i32..8).prop_map(Op::SetRows),
        1 => (1i32..8).prop_map(Op::SetColumns),
        1 => Just(Op::Clear),
    ]
}

fn pick(ids: &[ItemId], pick: usize) -> Option<ItemId> {
    (!ids.is_empty()).then(|| ids[pick % ids.len()])
}

fn check_invariants(grid: &mut InventoryGrid<RecordingHost>) -> Result<(), TestCaseError> {
    let bounds = grid.config().bounds();
    let items: Vec<_> = grid.occupancy().iter().cloned().collect();

    for (i, a) in items.iter().enumerate() {
        prop_assert!(bounds.contains_rect(&a.rect()), "{} outside grid", a.rect());
        for b in &items[i + 1..] {
            prop_assert!(
                !a.rect().intersects(&b.rect()),
                "{} overlaps {}",
                a.rect(),
                b.rect()
            );
        }
    }

    let free: BTreeSet<CellCoord> = bounds
        .cells()
        .filter(|cell| !items.iter().any(|item| item.info.contains_cell(cell.row, cell.column)))
        .collect();
    let placeholders: BTreeSet<CellCoord> = grid.placeholders().cells().collect();
    prop_assert_eq!(&placeholders, &free);

    let stats = grid.reconcile_placeholders();
    prop_assert_eq!((stats.removed, stats.added, stats.failed), (0, 0, 0));

    let config = grid.config();
    prop_assert_eq!(
        host_layout_text(grid.host(), config.rows(), config.columns(), EMPTY),
        grid_to_text(grid)
    );
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_across_operation_sequences(
        rows in 1i32..7,
        columns in 1i32..7,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let options = InventoryOptions::new()
            .with_item_class("ItemTile")
            .with_placeholder_class(EMPTY);
        let mut grid = InventoryGrid::new(
            GridConfig::new(rows, columns, 40.0),
            options,
            RecordingHost::new(),
        );
        grid.on_initialized();
        check_invariants(&mut grid)?;

        for op in ops {
            let index_before = grid.occupancy().clone();
            let placeholders_before = grid.placeholders().clone();
            let ids = grid.all_items();

            let failed = match op {
                Op::AddAuto { rows, columns } => {
                    grid.add_auto(AddRequest::sized(rows, columns)).is_err()
                }
                Op::AddAt { rows, columns, row, column } => {
                    grid.add_at(AddRequest::sized(rows, columns), row, column).is_err()
                }
                Op::Move { pick: p, row, column } => match pick(&ids, p) {
                    Some(id) => grid.move_item(id, row, column).is_err(),
                    None => false,
                },
                Op::Remove { pick: p } => {
                    if let Some(id) = pick(&ids, p) {
                        prop_assert!(grid.remove(id));
                        prop_assert!(grid.item_info(id).is_none());
                    }
                    false
                }
                Op::SetRows(n) => {
                    for id in grid.set_rows(n) {
                        prop_assert!(grid.item_info(id).is_none());
                    }
                    false
                }
                Op::SetColumns(n) => {
                    for id in grid.set_columns(n) {
                        prop_assert!(grid.item_info(id).is_none());
                    }
                    false
                }
                Op::Clear => {
                    prop_assert_eq!(grid.clear(), ids.len());
                    false
                }
            };

            if failed {
                prop_assert_eq!(grid.occupancy(), &index_before);
                prop_assert_eq!(grid.placeholders(), &placeholders_before);
            }
            check_invariants(&mut grid)?;
        }
    }

    #[test]
    fn first_fit_never_skips_a_free_position(
        rows in 1i32..6,
        columns in 1i32..6,
        sizes in prop::collection::vec((1i32..4, 1i32..4), 1..12),
    ) {
        let mut grid = InventoryGrid::new(
            GridConfig::new(rows, columns, 40.0),
            InventoryOptions::new().with_item_class("ItemTile"),
            RecordingHost::new(),
        );
        for (r, c) in sizes {
            let expected = (0..=rows - r)
                .flat_map(|row| (0..=columns - c).map(move |column| (row, column)))
                .find(|&(row, column)| grid.is_area_clear(row, column, r, c));
            match grid.add_auto(AddRequest::sized(r, c)) {
                Ok(id) => {
                    let fp = grid.item_info(id).map(|info| info.footprint);
                    prop_assert_eq!(fp.map(|fp| (fp.row, fp.column)), expected);
                }
                Err(_) => prop_assert_eq!(expected, None),
            }
        }
    }
}
