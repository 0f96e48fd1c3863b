//! PreviewCoordinator: turns title-card input into preview modal commits.
//!
//! Hover opens are queued on a [`Timeline`] and committed from [`tick`] once
//! the delay elapses; clicks and Enter commit immediately. All commits go
//! through the [`PreviewModalStore`], which closes every other open entry
//! before opening the new one.
//!
//! [`tick`]: PreviewCoordinator::tick

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use cinerow_config::PreviewConfig;
use cinerow_model::{ElementId, MediaItem, Rect, VideoId};

use super::hover::HoverTracker;
use super::listeners::{ListenerId, ListenerRegistry, ResizeListenerHost};
use super::store::PreviewModalStore;
use super::types::{
    ClickOutcome, CloseOptions, ModalState, OpenRequest, PreviewEvent,
    PreviewModalEntry, PreviewModalPatch,
};
use crate::error::{CoreError, Result};
use crate::timeline::{Timeline, TimerHandle};

/// A mounted title card as seen by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCard {
    pub element: ElementId,
    pub video: Arc<MediaItem>,
    pub rect: Rect,
    /// Peek and offscreen cards ignore hover.
    pub tabbable: bool,
}

#[derive(Debug)]
pub struct PreviewCoordinator<H = ListenerRegistry> {
    store: PreviewModalStore<H>,
    hover: HoverTracker,
    timers: Timeline<ElementId>,
    cards: HashMap<ElementId, TitleCard>,
    config: PreviewConfig,
    scroll_position: f32,
}

impl Default for PreviewCoordinator<ListenerRegistry> {
    fn default() -> Self {
        Self::new(PreviewConfig::default(), ListenerRegistry::new())
    }
}

impl<H: ResizeListenerHost> PreviewCoordinator<H> {
    pub fn new(config: PreviewConfig, host: H) -> Self {
        Self {
            store: PreviewModalStore::new(host),
            hover: HoverTracker::new(),
            timers: Timeline::new(),
            cards: HashMap::new(),
            config,
            scroll_position: 0.0,
        }
    }

    // Cards

    pub fn mount_card(&mut self, card: TitleCard) {
        self.cards.insert(card.element.clone(), card);
    }

    /// Forget a card. A hover timer still pending for it is left to fire and
    /// is dropped by the commit path.
    pub fn unmount_card(&mut self, element: &ElementId) -> Option<TitleCard> {
        self.cards.remove(element)
    }

    pub fn set_card_rect(&mut self, element: &ElementId, rect: Rect) -> Result<()> {
        let card = self.card_mut(element)?;
        card.rect = rect;
        Ok(())
    }

    pub fn set_card_tabbable(
        &mut self,
        element: &ElementId,
        tabbable: bool,
    ) -> Result<()> {
        let card = self.card_mut(element)?;
        card.tabbable = tabbable;
        Ok(())
    }

    pub fn card(&self, element: &ElementId) -> Option<&TitleCard> {
        self.cards.get(element)
    }

    pub fn cards(&self) -> impl Iterator<Item = &TitleCard> {
        self.cards.values()
    }

    /// Page scroll offset recorded on modals opened from now on.
    pub fn set_scroll_position(&mut self, scroll_position: f32) {
        self.scroll_position = scroll_position;
    }

    // Input

    /// Queue a mini modal open for `element`. Returns the scheduled timer, or
    /// `None` when the card is not tabbable or its modal is already open.
    pub fn pointer_enter(
        &mut self,
        element: &ElementId,
        now: Instant,
    ) -> Result<Option<TimerHandle>> {
        let card = self
            .cards
            .get(element)
            .ok_or_else(|| CoreError::CardNotMounted(element.clone()))?;
        if !card.tabbable || self.is_open(card.video.id) {
            return Ok(None);
        }

        let delay = self.config.hover_delay(self.store.was_open());
        let timer = self.timers.schedule(now, delay, element.clone());
        if let Some(replaced) = self.hover.enter(element, timer) {
            self.timers.cancel(replaced);
        }
        tracing::trace!(
            %element,
            %timer,
            delay_ms = delay.as_millis() as u64,
            "hover open queued"
        );
        Ok(Some(timer))
    }

    /// Cancel the queued open for `element`. Returns whether one was pending.
    pub fn pointer_leave(&mut self, element: &ElementId) -> bool {
        match self.hover.leave(element) {
            Some(timer) => self.timers.cancel(timer).is_some(),
            None => false,
        }
    }

    /// Click or Enter on a title card: open its detail modal right away.
    ///
    /// Rejected while a detail modal is open. An open mini modal is preempted,
    /// or expanded in place when it belongs to the same video.
    pub fn click(&mut self, element: &ElementId) -> Result<ClickOutcome> {
        let card = self
            .cards
            .get(element)
            .cloned()
            .ok_or_else(|| CoreError::CardNotMounted(element.clone()))?;
        if let Some(timer) = self.hover.take_pending(element) {
            self.timers.cancel(timer);
        }

        let video = card.video.id;
        if let Some((open, entry)) = self.store.open_entry() {
            if entry.is_detail() {
                tracing::debug!(
                    requested = %video,
                    %open,
                    "detail modal already open, click rejected"
                );
                return Ok(ClickOutcome::Rejected {
                    requested: video,
                    open,
                });
            }
            if open == video {
                self.store.upgrade(video);
                return Ok(ClickOutcome::Upgraded { video });
            }
        }

        let request = self.open_request(&card, ModalState::DetailModal);
        let closed = self.store.open(request);
        Ok(ClickOutcome::Opened { video, closed })
    }

    /// Fire every hover timer due at `now` and commit the opens that are
    /// still valid.
    pub fn tick(&mut self, now: Instant) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        for (timer, element) in self.timers.drain_due(now) {
            if !self.hover.fire(&element, timer) {
                continue;
            }
            let Some(card) = self.cards.get(&element).cloned() else {
                tracing::debug!(%element, %timer, "hover timer fired for unmounted card");
                self.hover.leave(&element);
                events.push(PreviewEvent::OrphanedTimer { element });
                continue;
            };
            let video = card.video.id;
            if !card.tabbable {
                tracing::debug!(%element, "hover open dropped, card left the visible page");
                continue;
            }
            if self.store.is_detail_open() {
                tracing::debug!(
                    %video,
                    "hover open dropped while a detail modal is open"
                );
                continue;
            }
            if self.is_open(video) {
                continue;
            }

            let request = self.open_request(&card, ModalState::MiniModal);
            let closed = self.store.open(request);
            events.extend(closed.into_iter().map(|closed| PreviewEvent::Closed {
                video: closed,
                without_animation: true,
            }));
            events.push(PreviewEvent::Opened {
                video,
                element,
                modal_state: ModalState::MiniModal,
            });
        }
        events
    }

    /// Earliest pending hover deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // Modal operations

    pub fn close(
        &mut self,
        video: VideoId,
        options: CloseOptions,
    ) -> Option<PreviewEvent> {
        self.store
            .close(video, options)
            .then_some(PreviewEvent::Closed {
                video,
                without_animation: options.without_animation,
            })
    }

    /// Close whichever modal is open.
    pub fn close_open(&mut self, options: CloseOptions) -> Option<PreviewEvent> {
        let (video, _) = self.store.open_entry()?;
        self.close(video, options)
    }

    pub fn update(&mut self, video: VideoId, patch: PreviewModalPatch) -> bool {
        self.store.update(video, patch)
    }

    /// Resize notification from the host for an attached listener.
    pub fn on_resize(
        &mut self,
        listener: ListenerId,
        rect: Rect,
    ) -> Option<PreviewEvent> {
        let video = self.store.video_for_listener(listener)?;
        if let Some(card) = self
            .store
            .entry(video)
            .and_then(|entry| entry.element.as_ref())
            .and_then(|element| self.cards.get_mut(element))
        {
            card.rect = rect;
        }
        self.store.update(video, PreviewModalPatch::rect(rect));
        Some(PreviewEvent::RectUpdated { video, rect })
    }

    pub fn on_close<F>(&mut self, video: VideoId, hook: F)
    where
        F: FnOnce(VideoId) + Send + 'static,
    {
        self.store.on_close(video, hook);
    }

    // Queries

    pub fn is_any_open(&self) -> bool {
        self.store.is_any_open()
    }

    pub fn is_detail_open(&self) -> bool {
        self.store.is_detail_open()
    }

    pub fn open_entry(&self) -> Option<(VideoId, &PreviewModalEntry)> {
        self.store.open_entry()
    }

    pub fn entry(&self, video: VideoId) -> Option<&PreviewModalEntry> {
        self.store.entry(video)
    }

    pub fn is_hovering(&self, element: &ElementId) -> bool {
        self.hover.is_hovering(element)
    }

    pub fn pending_hover(&self, element: &ElementId) -> Option<TimerHandle> {
        self.hover.pending(element)
    }

    pub fn store(&self) -> &PreviewModalStore<H> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PreviewModalStore<H> {
        &mut self.store
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    fn is_open(&self, video: VideoId) -> bool {
        self.store.entry(video).is_some_and(|entry| entry.is_open)
    }

    fn card_mut(&mut self, element: &ElementId) -> Result<&mut TitleCard> {
        self.cards
            .get_mut(element)
            .ok_or_else(|| CoreError::CardNotMounted(element.clone()))
    }

    fn open_request(&self, card: &TitleCard, modal_state: ModalState) -> OpenRequest {
        OpenRequest {
            video: Arc::clone(&card.video),
            element: card.element.clone(),
            modal_state,
            title_card_rect: Some(card.rect),
            scroll_position: self.scroll_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cinerow_model::{MediaType, RowId};

    use super::*;

    fn card(id: u64) -> TitleCard {
        TitleCard {
            element: ElementId::new(RowId(0), format!("movie-{id}")),
            video: Arc::new(
                MediaItem::new(VideoId(id), MediaType::Movie, format!("Movie {id}"))
                    .unwrap(),
            ),
            rect: Rect::new(id as f32 * 10.0, 0.0, 200.0, 112.0),
            tabbable: true,
        }
    }

    #[test]
    fn hover_uses_shorter_delay_after_first_open() {
        let start = Instant::now();
        let mut coordinator = PreviewCoordinator::default();
        let a = card(1);
        let b = card(2);
        coordinator.mount_card(a.clone());
        coordinator.mount_card(b.clone());

        coordinator.pointer_enter(&a.element, start).unwrap();
        assert!(coordinator.tick(start + Duration::from_millis(399)).is_empty());
        assert_eq!(coordinator.tick(start + Duration::from_millis(400)).len(), 1);

        let later = start + Duration::from_secs(5);
        coordinator.pointer_enter(&b.element, later).unwrap();
        let events = coordinator.tick(later + Duration::from_millis(200));
        assert_eq!(events, vec![
            PreviewEvent::Closed {
                video: VideoId(1),
                without_animation: true
            },
            PreviewEvent::Opened {
                video: VideoId(2),
                element: b.element.clone(),
                modal_state: ModalState::MiniModal,
            },
        ]);
    }

    #[test]
    fn peek_cards_do_not_queue_hover() {
        let mut coordinator = PreviewCoordinator::default();
        let mut peek = card(3);
        peek.tabbable = false;
        coordinator.mount_card(peek.clone());
        assert_eq!(
            coordinator.pointer_enter(&peek.element, Instant::now()).unwrap(),
            None
        );
    }

    #[test]
    fn unknown_cards_are_errors() {
        let mut coordinator = PreviewCoordinator::default();
        let element = ElementId::new(RowId(0), "movie-404");
        assert_eq!(
            coordinator.click(&element).unwrap_err(),
            CoreError::CardNotMounted(element.clone())
        );
        assert!(coordinator.pointer_enter(&element, Instant::now()).is_err());
    }
}
