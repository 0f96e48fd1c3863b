//! Per-card hover state: the hovering flag and at most one pending open timer.

use std::collections::HashMap;

use cinerow_model::ElementId;

use crate::timeline::TimerHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HoverSlot {
    hovering: bool,
    pending: Option<TimerHandle>,
}

#[derive(Debug, Default, Clone)]
pub struct HoverTracker {
    cards: HashMap<ElementId, HoverSlot>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `element` hovered with a freshly scheduled timer. Returns the
    /// timer it replaces, which the caller must cancel.
    pub fn enter(
        &mut self,
        element: &ElementId,
        timer: TimerHandle,
    ) -> Option<TimerHandle> {
        let slot = self.cards.entry(element.clone()).or_default();
        slot.hovering = true;
        slot.pending.replace(timer)
    }

    /// Clear hovering and hand back the pending timer, if any.
    pub fn leave(&mut self, element: &ElementId) -> Option<TimerHandle> {
        self.cards.remove(element).and_then(|slot| slot.pending)
    }

    /// Take the pending timer without touching the hovering flag.
    pub fn take_pending(&mut self, element: &ElementId) -> Option<TimerHandle> {
        self.cards
            .get_mut(element)
            .and_then(|slot| slot.pending.take())
    }

    /// Consume a fired timer. Returns `false` when `timer` is not the card's
    /// current pending timer.
    pub fn fire(&mut self, element: &ElementId, timer: TimerHandle) -> bool {
        match self.cards.get_mut(element) {
            Some(slot) if slot.pending == Some(timer) => {
                slot.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_hovering(&self, element: &ElementId) -> bool {
        self.cards.get(element).is_some_and(|slot| slot.hovering)
    }

    pub fn pending(&self, element: &ElementId) -> Option<TimerHandle> {
        self.cards.get(element).and_then(|slot| slot.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.cards
            .values()
            .filter(|slot| slot.pending.is_some())
            .count()
    }
}
