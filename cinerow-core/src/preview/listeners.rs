//! Resize listener bookkeeping for open modals.
//!
//! Opening a modal attaches a resize listener scoped to its title card so the
//! recorded rect stays current; closing detaches the exact handle returned by
//! the attach. The host owns the real listeners (a DOM bridge, a windowing
//! toolkit, or the in-memory [`ListenerRegistry`]).

use std::collections::BTreeMap;
use std::fmt::Debug;

use cinerow_model::ElementId;
use serde::{Deserialize, Serialize};

/// Stable handle of an attached resize listener.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListenerId(pub u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

pub trait ResizeListenerHost: Debug {
    /// Start observing `element`; the returned id is passed back to `detach`.
    fn attach(&mut self, element: &ElementId) -> ListenerId;

    fn detach(&mut self, listener: ListenerId);
}

/// In-memory host that only records which listeners are attached.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    next_id: u64,
    attached: BTreeMap<ListenerId, ElementId>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, listener: ListenerId) -> Option<&ElementId> {
        self.attached.get(&listener)
    }

    pub fn is_attached(&self, listener: ListenerId) -> bool {
        self.attached.contains_key(&listener)
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn attached(&self) -> impl Iterator<Item = (ListenerId, &ElementId)> {
        self.attached.iter().map(|(id, element)| (*id, element))
    }
}

impl ResizeListenerHost for ListenerRegistry {
    fn attach(&mut self, element: &ElementId) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.attached.insert(id, element.clone());
        id
    }

    fn detach(&mut self, listener: ListenerId) {
        if self.attached.remove(&listener).is_none() {
            tracing::debug!(%listener, "detach for unknown resize listener");
        }
    }
}
