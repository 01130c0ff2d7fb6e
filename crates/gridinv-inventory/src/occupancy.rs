#![forbid(unsafe_code)]

//! Authoritative record of which item covers which cells.
//!
//! # Invariants
//!
//! 1. No two entries' footprints intersect (half-open rectangles).
//! 2. `by_source[s] == id` iff `items[id].info.data_source == Some(s)`.
//!
//! The index does not check (1) on insert; callers validate through
//! [`PlacementEngine`](crate::placement::PlacementEngine) first. Debug
//! builds assert it.
//!
//! Entries are kept in a `BTreeMap` so iteration, and everything derived from
//! it (queries, notifications), is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use gridinv_core::{CellCoord, CellRect, ItemPayload};

use crate::item::{DataSourceId, ItemFootprint, ItemId, ItemInfo, PlacedItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupancyIndex {
    items: BTreeMap<ItemId, PlacedItem>,
    by_source: BTreeMap<DataSourceId, ItemId>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// True iff `rect` overlaps any tracked footprint.
    pub fn intersects(&self, rect: &CellRect) -> bool {
        self.first_collision(rect, None).is_some()
    }

    /// Like [`intersects`](Self::intersects) but skipping `excluded`.
    pub fn intersects_ignoring(&self, rect: &CellRect, excluded: ItemId) -> bool {
        self.first_collision(rect, Some(excluded)).is_some()
    }

    /// Lowest-id item overlapping `rect`, skipping `excluded` if given.
    pub fn first_collision(&self, rect: &CellRect, excluded: Option<ItemId>) -> Option<&PlacedItem> {
        self.items
            .values()
            .filter(|item| Some(item.id) != excluded)
            .find(|item| item.rect().intersects(rect))
    }

    /// Track a new item. The caller has already ruled out collisions.
    ///
    /// A data source already bound to another item moves to the new one; the
    /// previous holder keeps its footprint but loses its data source.
    pub fn insert(
        &mut self,
        id: ItemId,
        footprint: ItemFootprint,
        data_source: Option<DataSourceId>,
        payload: Option<ItemPayload>,
    ) -> &PlacedItem {
        debug_assert!(
            !self.intersects_ignoring(&footprint.rect(), id),
            "insert would break disjointness at {footprint}"
        );
        if let Some(previous) = self.items.get(&id).and_then(|p| p.info.data_source) {
            self.by_source.remove(&previous);
        }
        if let Some(source) = data_source
            && let Some(holder) = self.by_source.insert(source, id)
            && holder != id
            && let Some(item) = self.items.get_mut(&holder)
        {
            item.info.data_source = None;
        }
        let item = PlacedItem {
            id,
            info: ItemInfo::new(footprint, data_source, payload),
        };
        self.items.insert(id, item);
        &self.items[&id]
    }

    /// Stop tracking `id`, dropping its reverse-index entry too.
    pub fn remove(&mut self, id: ItemId) -> Option<PlacedItem> {
        let item = self.items.remove(&id)?;
        if let Some(source) = item.info.data_source
            && self.by_source.get(&source) == Some(&id)
        {
            self.by_source.remove(&source);
        }
        Some(item)
    }

    /// Replace the footprint of `id`, returning the previous one.
    pub fn set_footprint(&mut self, id: ItemId, footprint: ItemFootprint) -> Option<ItemFootprint> {
        if !self.items.contains_key(&id) {
            return None;
        }
        debug_assert!(
            !self.intersects_ignoring(&footprint.rect(), id),
            "move would break disjointness at {footprint}"
        );
        let item = self.items.get_mut(&id)?;
        Some(std::mem::replace(&mut item.info.footprint, footprint))
    }

    pub fn set_last_center(&mut self, id: ItemId, center: (f32, f32)) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.info.last_center = center;
                true
            }
            None => false,
        }
    }

    /// Drop every entry, returning them in id order.
    pub fn clear(&mut self) -> Vec<PlacedItem> {
        self.by_source.clear();
        std::mem::take(&mut self.items).into_values().collect()
    }

    pub fn find(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.get(&id)
    }

    pub fn find_by_data_source(&self, source: DataSourceId) -> Option<ItemId> {
        self.by_source.get(&source).copied()
    }

    /// Item whose top-left cell is exactly `(row, column)`.
    pub fn find_at(&self, row: i32, column: i32) -> Option<&PlacedItem> {
        self.items.values().find(|item| {
            let fp = item.info.footprint;
            fp.row == row && fp.column == column
        })
    }

    /// Item whose footprint covers `(row, column)`.
    pub fn find_covering(&self, row: i32, column: i32) -> Option<&PlacedItem> {
        self.items
            .values()
            .find(|item| item.info.contains_cell(row, column))
    }

    /// All tracked ids in ascending order.
    pub fn all_ids(&self) -> Vec<ItemId> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedItem> {
        self.items.values()
    }

    /// Ids of items not fully inside `bounds`.
    pub fn ids_outside(&self, bounds: &CellRect) -> Vec<ItemId> {
        self.items
            .values()
            .filter(|item| !bounds.contains_rect(&item.rect()))
            .map(|item| item.id)
            .collect()
    }

    /// Union of all footprints clipped to `bounds`.
    pub fn occupied_cells(&self, bounds: &CellRect) -> BTreeSet<CellCoord> {
        self.items
            .values()
            .filter_map(|item| item.rect().intersection(bounds))
            .flat_map(|clipped| clipped.cells().collect::<Vec<_>>())
            .collect()
    }
}
