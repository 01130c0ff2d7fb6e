#![forbid(unsafe_code)]

//! Synchronous multicast notifications.
//!
//! Subscribers are called in subscription order, on the caller's thread,
//! after the mutation and its placeholder reconciliation have completed. A
//! subscriber therefore always observes a consistent grid. Subscribers cannot
//! reach the grid from inside the callback; they receive the event by
//! reference and copy out what they need.

use std::collections::BTreeMap;
use std::fmt;

use crate::item::{ItemFootprint, ItemId, ItemInfo};

/// Something that happened to an item.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    ItemAdded { id: ItemId, info: ItemInfo },
    ItemRemoved { id: ItemId },
    /// `info` carries the new footprint; `previous` the one it left.
    ItemMoved {
        id: ItemId,
        previous: ItemFootprint,
        info: ItemInfo,
    },
}

impl InventoryEvent {
    pub fn id(&self) -> ItemId {
        match self {
            Self::ItemAdded { id, .. } | Self::ItemRemoved { id } | Self::ItemMoved { id, .. } => {
                *id
            }
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&InventoryEvent)>;

/// Ordered set of listeners.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Listener>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&InventoryEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: &InventoryEvent) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}
