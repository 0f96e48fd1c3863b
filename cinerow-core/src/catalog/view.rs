//! CatalogView: rows, title cards, preview modals and timers behind one
//! message-driven surface.
//!
//! Every call to [`CatalogView::update`] first fires the timers that are due
//! on the view's clock, then handles the message. Effects come back in the
//! order the rendering layer must apply them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use cinerow_config::CinerowConfig;
use cinerow_model::{ElementId, MediaItem, Rect, RowId, VideoId};

use super::focus::CatalogFocus;
use super::messages::{CatalogEffect, CatalogMessage};
use crate::error::{CoreError, Result};
use crate::preview::{
    ClickOutcome, CloseOptions, ListenerRegistry, ModalState, PreviewCoordinator,
    PreviewEvent, ResizeListenerHost, TitleCard,
};
use crate::slider::{CommittedMove, Direction, SliderState, TransitionId};
use crate::timeline::{SystemClock, TimeProvider, Timeline, TimerHandle};

/// Card height relative to width (16:9 artwork).
const CARD_ASPECT: f32 = 9.0 / 16.0;
/// Vertical space between two rows, header included.
const ROW_GAP: f32 = 48.0;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SliderTimer {
    Refocus { row: RowId, key: String },
    TransitionTimeout { row: RowId, transition: TransitionId },
}

#[derive(Debug)]
struct CatalogRow {
    title: String,
    state: SliderState,
    /// Deadline timer of the in-flight transition.
    timeout: Option<TimerHandle>,
    started_at: Option<Instant>,
    /// Cards currently registered with the coordinator.
    mounted: BTreeSet<ElementId>,
}

#[derive(Debug)]
pub struct CatalogView<C = SystemClock, H = ListenerRegistry> {
    clock: C,
    config: CinerowConfig,
    rows: BTreeMap<RowId, CatalogRow>,
    preview: PreviewCoordinator<H>,
    timers: Timeline<SliderTimer>,
    focus: CatalogFocus,
    viewport_width: f32,
    items_per_row: usize,
    autoplay: bool,
    /// Effects produced but not yet returned.
    outbox: Vec<CatalogEffect>,
}

impl<C: TimeProvider, H: ResizeListenerHost> CatalogView<C, H> {
    pub fn new(
        config: CinerowConfig,
        clock: C,
        host: H,
        viewport_width: f32,
    ) -> Result<Self> {
        config.validate()?;
        let items_per_row = config.breakpoints.items_per_row(viewport_width);
        if items_per_row == 0 {
            return Err(CoreError::InvalidItemsPerRow);
        }
        Ok(Self {
            clock,
            preview: PreviewCoordinator::new(config.preview.clone(), host),
            config,
            rows: BTreeMap::new(),
            timers: Timeline::new(),
            focus: CatalogFocus::new(),
            viewport_width,
            items_per_row,
            autoplay: true,
            outbox: Vec::new(),
        })
    }

    // Rows

    pub fn add_row(
        &mut self,
        id: RowId,
        title: impl Into<String>,
        items: Vec<Arc<MediaItem>>,
    ) -> Result<()> {
        if self.rows.contains_key(&id) {
            return Err(CoreError::DuplicateRow(id));
        }
        let state = SliderState::new(
            id,
            items,
            self.items_per_row,
            self.config.slider.loop_enabled,
        )?;
        self.rows.insert(id, CatalogRow {
            title: title.into(),
            state,
            timeout: None,
            started_at: None,
            mounted: BTreeSet::new(),
        });
        self.sync_cards(id);
        tracing::debug!(row = %id, "row added");
        Ok(())
    }

    /// Replace a row's items after a data refresh.
    pub fn set_row_items(
        &mut self,
        id: RowId,
        items: Vec<Arc<MediaItem>>,
    ) -> Result<Vec<CatalogEffect>> {
        let row = self.rows.get_mut(&id).ok_or(CoreError::UnknownRow(id))?;
        row.state.set_items(items);
        let pagination = row.state.pagination();
        self.sync_cards(id);
        Ok(vec![CatalogEffect::PaginationChanged {
            row: id,
            pagination,
        }])
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<()> {
        let row = self.rows.remove(&id).ok_or(CoreError::UnknownRow(id))?;
        if let Some(timeout) = row.timeout {
            self.timers.cancel(timeout);
        }
        for element in &row.mounted {
            self.preview.unmount_card(element);
        }
        self.focus.forget_row(id);
        Ok(())
    }

    pub fn row(&self, id: RowId) -> Option<&SliderState> {
        self.rows.get(&id).map(|row| &row.state)
    }

    pub fn row_title(&self, id: RowId) -> Option<&str> {
        self.rows.get(&id).map(|row| row.title.as_str())
    }

    pub fn row_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.keys().copied()
    }

    // Input

    /// Handle one input message.
    ///
    /// On error the effects of timers fired before the failure are kept and
    /// returned by the next successful call.
    pub fn update(&mut self, message: CatalogMessage) -> Result<Vec<CatalogEffect>> {
        let now = self.clock.now();
        let fired = self.fire_due(now);
        self.outbox.extend(fired);

        let handled = self.handle(message, now)?;
        self.outbox.extend(handled);
        let autoplay = self.autoplay_change();
        self.outbox.extend(autoplay);
        Ok(std::mem::take(&mut self.outbox))
    }

    /// Fire due timers without any other input.
    pub fn tick(&mut self) -> Vec<CatalogEffect> {
        let now = self.clock.now();
        let fired = self.fire_due(now);
        self.outbox.extend(fired);
        let autoplay = self.autoplay_change();
        self.outbox.extend(autoplay);
        std::mem::take(&mut self.outbox)
    }

    fn handle(
        &mut self,
        message: CatalogMessage,
        now: Instant,
    ) -> Result<Vec<CatalogEffect>> {
        let mut effects = Vec::new();
        match message {
            CatalogMessage::Navigate { row, direction } => {
                self.focus.set_keyboard_active(Some(row));
                effects.extend(self.navigate(row, direction, now)?);
            }
            CatalogMessage::NavigateActive { direction } => {
                if let Some(row) = self.focus.active_row() {
                    effects.extend(self.navigate(row, direction, now)?);
                }
            }
            CatalogMessage::TransitionEnded { row, transition } => {
                effects.extend(self.complete_transition(row, transition, now)?);
            }
            CatalogMessage::PointerEnter { element } => {
                self.focus.set_hovered(Some(element.row));
                self.preview.pointer_enter(&element, now)?;
            }
            CatalogMessage::PointerLeave { element } => {
                self.preview.pointer_leave(&element);
            }
            CatalogMessage::Click { element } | CatalogMessage::KeyEnter { element } => {
                let outcome = self.preview.click(&element)?;
                effects.extend(click_effects(element, outcome));
            }
            CatalogMessage::CardMeasured { element, rect } => {
                self.preview.set_card_rect(&element, rect)?;
            }
            CatalogMessage::RowHovered { row } => {
                self.focus.set_hovered(row);
            }
            CatalogMessage::CloseModal {
                video,
                without_animation,
            } => {
                let options = CloseOptions { without_animation };
                let event = match video {
                    Some(video) => self.preview.close(video, options),
                    None => self.preview.close_open(options),
                };
                effects.extend(event.map(CatalogEffect::from));
            }
            CatalogMessage::ResizeObserved { listener, rect } => {
                effects.extend(
                    self.preview
                        .on_resize(listener, rect)
                        .map(CatalogEffect::from),
                );
            }
            CatalogMessage::ViewportResized { width } => {
                effects.extend(self.resize(width)?);
            }
            CatalogMessage::Scrolled { position } => {
                self.preview.set_scroll_position(position);
            }
            CatalogMessage::Tick => {}
        }
        Ok(effects)
    }

    // Queries

    /// The hero billboard may autoplay only while no preview modal is open.
    pub fn can_autoplay(&self) -> bool {
        !self.preview.is_any_open()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timers.next_deadline(), self.preview.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn preview(&self) -> &PreviewCoordinator<H> {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut PreviewCoordinator<H> {
        &mut self.preview
    }

    pub fn focus(&self) -> &CatalogFocus {
        &self.focus
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &CinerowConfig {
        &self.config
    }

    /// Element id of the card showing `video` in `row`, if mounted.
    pub fn element_for(&self, row: RowId, video: VideoId) -> Option<ElementId> {
        self.rows.get(&row).and_then(|r| {
            r.state
                .positioned_items()
                .iter()
                .find(|item| item.item.id == video && item.tabbable)
                .map(|item| ElementId::new(row, item.key.clone()))
        })
    }

    // Slider handling

    fn navigate(
        &mut self,
        id: RowId,
        direction: Direction,
        now: Instant,
    ) -> Result<Vec<CatalogEffect>> {
        let row = self.rows.get_mut(&id).ok_or(CoreError::UnknownRow(id))?;
        let Some(transition) = row.state.advance(direction) else {
            tracing::trace!(row = %id, ?direction, "navigation ignored");
            return Ok(Vec::new());
        };

        let timeout = self.timers.schedule(
            now,
            self.config.slider.transition_timeout(),
            SliderTimer::TransitionTimeout {
                row: id,
                transition: transition.id,
            },
        );
        row.timeout = Some(timeout);
        row.started_at = Some(now);

        tracing::debug!(
            row = %id,
            transition = %transition.id,
            from = transition.from_index,
            to = transition.to_index,
            "slide started"
        );
        Ok(vec![CatalogEffect::StartTransition {
            row: id,
            transition,
            duration_ms: self.config.slider.transition_duration_ms,
        }])
    }

    fn complete_transition(
        &mut self,
        id: RowId,
        transition: TransitionId,
        now: Instant,
    ) -> Result<Vec<CatalogEffect>> {
        let row = self.rows.get_mut(&id).ok_or(CoreError::UnknownRow(id))?;
        let Some(committed) = row.state.complete_transition(transition) else {
            return Ok(Vec::new());
        };
        if let Some(timeout) = row.timeout.take() {
            self.timers.cancel(timeout);
        }
        row.started_at = None;
        Ok(self.after_commit(id, committed, now))
    }

    fn expire_transition(
        &mut self,
        id: RowId,
        transition: TransitionId,
        now: Instant,
    ) -> Vec<CatalogEffect> {
        let Some(row) = self.rows.get_mut(&id) else {
            return Vec::new();
        };
        row.timeout = None;
        let waited = row
            .started_at
            .take()
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default();
        let Some((committed, fault)) =
            row.state.expire_transition(transition, waited)
        else {
            return Vec::new();
        };

        tracing::warn!(row = %id, %transition, "{fault}");
        let mut effects = vec![CatalogEffect::StalledTransition {
            row: id,
            transition,
            waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
        }];
        effects.extend(self.after_commit(id, committed, now));
        effects
    }

    fn after_commit(
        &mut self,
        id: RowId,
        committed: CommittedMove,
        now: Instant,
    ) -> Vec<CatalogEffect> {
        self.sync_cards(id);
        let mut effects = vec![CatalogEffect::SnapOffset {
            row: id,
            lowest_index: committed.lowest_index,
            offset_percent: committed.settled_offset,
        }];
        if let Some(row) = self.rows.get(&id) {
            effects.push(CatalogEffect::PaginationChanged {
                row: id,
                pagination: row.state.pagination(),
            });
        }
        if let Some(key) = committed.refocus_key {
            self.timers.schedule(
                now,
                self.config.slider.refocus_delay(),
                SliderTimer::Refocus { row: id, key },
            );
        }
        effects
    }

    fn refocus(&mut self, id: RowId, key: String) -> Option<CatalogEffect> {
        let row = self.rows.get(&id)?;
        let still_visible = row
            .state
            .positioned_items()
            .iter()
            .any(|item| item.key == key && item.tabbable);
        if !still_visible || row.state.is_animating() {
            tracing::trace!(row = %id, %key, "refocus target gone");
            return None;
        }
        let element = ElementId::new(id, key);
        self.focus.focus_element(element.clone());
        Some(CatalogEffect::FocusItem { element })
    }

    /// Rejects a zero items-per-row breakpoint before touching any state.
    fn resize(&mut self, width: f32) -> Result<Vec<CatalogEffect>> {
        let items_per_row = self.config.breakpoints.items_per_row(width);
        if items_per_row == 0 {
            return Err(CoreError::InvalidItemsPerRow);
        }
        self.viewport_width = width;
        if items_per_row == self.items_per_row {
            self.sync_all_cards();
            return Ok(Vec::new());
        }
        self.items_per_row = items_per_row;

        let mut effects = vec![CatalogEffect::ItemsPerRowChanged { items_per_row }];
        for (id, row) in self.rows.iter_mut() {
            row.state.set_items_per_row(items_per_row)?;
            if let Some(timeout) = row.timeout.take() {
                self.timers.cancel(timeout);
            }
            row.started_at = None;
            effects.push(CatalogEffect::SnapOffset {
                row: *id,
                lowest_index: row.state.lowest_visible_index(),
                offset_percent: row.state.settled_offset(),
            });
            effects.push(CatalogEffect::PaginationChanged {
                row: *id,
                pagination: row.state.pagination(),
            });
        }
        self.sync_all_cards();
        tracing::debug!(width, items_per_row, "viewport breakpoint changed");
        Ok(effects)
    }

    // Timers

    fn fire_due(&mut self, now: Instant) -> Vec<CatalogEffect> {
        let mut effects = Vec::new();
        for (_, timer) in self.timers.drain_due(now) {
            match timer {
                SliderTimer::TransitionTimeout { row, transition } => {
                    effects.extend(self.expire_transition(row, transition, now));
                }
                SliderTimer::Refocus { row, key } => {
                    effects.extend(self.refocus(row, key));
                }
            }
        }
        effects.extend(
            self.preview
                .tick(now)
                .into_iter()
                .map(CatalogEffect::from),
        );
        effects
    }

    fn autoplay_change(&mut self) -> Option<CatalogEffect> {
        let enabled = self.can_autoplay();
        if enabled == self.autoplay {
            return None;
        }
        self.autoplay = enabled;
        Some(CatalogEffect::BillboardAutoplay { enabled })
    }

    // Cards

    fn sync_all_cards(&mut self) {
        let ids: Vec<RowId> = self.rows.keys().copied().collect();
        for id in ids {
            self.sync_cards(id);
        }
    }

    /// Register the row's mounted items as title cards and unregister the
    /// ones that left the slice.
    fn sync_cards(&mut self, id: RowId) {
        let position = self.rows.keys().position(|key| *key == id).unwrap_or(0);
        let Some(row) = self.rows.get_mut(&id) else {
            return;
        };

        let card_width = self.viewport_width / self.items_per_row as f32;
        let card_height = card_width * CARD_ASPECT;
        let top = position as f32 * (card_height + ROW_GAP);
        let lead = row.state.mounted().lead as f32;

        let mut next = BTreeSet::new();
        for (slot, item) in row.state.positioned_items().iter().enumerate() {
            let element = ElementId::new(id, item.key.clone());
            let estimated = Rect::new(
                (slot as f32 - lead) * card_width,
                top,
                card_width,
                card_height,
            );
            // Known cards are replaced with fresh geometry.
            self.preview.mount_card(TitleCard {
                element: element.clone(),
                video: Arc::clone(&item.item),
                rect: estimated,
                tabbable: item.tabbable,
            });
            next.insert(element);
        }

        for gone in row.mounted.difference(&next) {
            self.preview.unmount_card(gone);
        }
        row.mounted = next;
    }
}

fn click_effects(element: ElementId, outcome: ClickOutcome) -> Vec<CatalogEffect> {
    match outcome {
        ClickOutcome::Opened { video, closed } => closed
            .into_iter()
            .map(|closed| PreviewEvent::Closed {
                video: closed,
                without_animation: true,
            })
            .chain(std::iter::once(PreviewEvent::Opened {
                video,
                element,
                modal_state: ModalState::DetailModal,
            }))
            .map(CatalogEffect::from)
            .collect(),
        ClickOutcome::Upgraded { video } => {
            vec![PreviewEvent::Upgraded { video }.into()]
        }
        ClickOutcome::Rejected { requested, open } => {
            vec![PreviewEvent::Rejected { requested, open }.into()]
        }
    }
}
