//! Session replay.
//!
//! A [`Session`] owns a catalog view plus a stand-in animation layer: every
//! started slide gets a [`SlideAnimator`] that reports completion once the
//! configured duration has passed. Drivers decide how time moves: [`replay`]
//! jumps a virtual clock from deadline to deadline, [`replay_realtime`] sleeps
//! on the tokio timer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Context;
use cinerow_config::CinerowConfig;
use cinerow_core::catalog::CatalogView;
use cinerow_core::preview::{ListenerRegistry, ModalState};
use cinerow_core::slider::{Easing, Frame, Pagination, SlideAnimator};
use cinerow_core::timeline::{TimeProvider, VirtualClock};
use cinerow_core::{CatalogEffect, CatalogMessage};
use cinerow_model::{Rect, RowId, VideoId};
use serde::Serialize;

use crate::script::{CatalogFile, Script};

/// Reads the tokio clock, so paused-time tests drive the catalog too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl TimeProvider for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    pub viewport_width: f32,
    /// Report slide completion after the transition duration. Disable to
    /// exercise stalled-transition recovery.
    pub auto_complete: bool,
    pub easing: Easing,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            auto_complete: true,
            easing: Easing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedEffect {
    pub at_ms: u64,
    pub effect: CatalogEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSummary {
    pub id: RowId,
    pub title: String,
    pub lowest_index: usize,
    pub pagination: Pagination,
    /// Render keys of the fully visible items, left to right.
    pub visible: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalSummary {
    pub video: VideoId,
    pub modal_state: ModalState,
    pub title_card_rect: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub effects: Vec<TimedEffect>,
    pub rows: Vec<RowSummary>,
    pub open_modal: Option<ModalSummary>,
    pub can_autoplay: bool,
    pub rejected_steps: usize,
}

#[derive(Debug)]
pub struct Session<C: TimeProvider> {
    view: CatalogView<C, ListenerRegistry>,
    animators: HashMap<RowId, SlideAnimator>,
    origin: Instant,
    options: ReplayOptions,
    effects: Vec<TimedEffect>,
    rejected_steps: usize,
}

impl<C: TimeProvider> Session<C> {
    pub fn new(
        config: CinerowConfig,
        clock: C,
        catalog: &CatalogFile,
        options: ReplayOptions,
    ) -> anyhow::Result<Self> {
        let origin = clock.now();
        let mut view = CatalogView::new(
            config,
            clock,
            ListenerRegistry::new(),
            options.viewport_width,
        )
        .context("create catalog view")?;
        for row in &catalog.rows {
            view.add_row(row.id, row.title.clone(), row.shared_items())
                .with_context(|| format!("add {}", row.id))?;
        }
        tracing::info!(
            rows = catalog.rows.len(),
            items_per_row = view.items_per_row(),
            "session ready"
        );
        Ok(Self {
            view,
            animators: HashMap::new(),
            origin,
            options,
            effects: Vec::new(),
            rejected_steps: 0,
        })
    }

    pub fn view(&self) -> &CatalogView<C, ListenerRegistry> {
        &self.view
    }

    /// Apply one scripted message. Messages the view rejects are logged and
    /// counted, not fatal.
    pub fn apply(&mut self, message: CatalogMessage) {
        match self.view.update(message.clone()) {
            Ok(effects) => self.record(effects),
            Err(err) => {
                tracing::warn!(error = %err, ?message, "step rejected");
                self.rejected_steps += 1;
            }
        }
    }

    /// Earliest instant at which [`pump`](Self::pump) has work to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.animators
            .values()
            .filter_map(SlideAnimator::deadline)
            .chain(self.view.next_deadline())
            .min()
    }

    /// Finish due slides and fire due timers.
    pub fn pump(&mut self) {
        let now = self.view.clock().now();
        let mut finished = Vec::new();
        for (row, animator) in self.animators.iter_mut() {
            if let Some(Frame::Finished(transition, _)) = animator.tick(now) {
                finished.push((*row, transition));
            }
        }
        finished.sort();
        for (row, transition) in finished {
            self.apply(CatalogMessage::TransitionEnded { row, transition });
        }
        let effects = self.view.tick();
        self.record(effects);
    }

    pub fn finish(self) -> Report {
        let rows = self
            .view
            .row_ids()
            .filter_map(|id| {
                let state = self.view.row(id)?;
                let mounted = state.mounted();
                Some(RowSummary {
                    id,
                    title: self.view.row_title(id).unwrap_or_default().to_string(),
                    lowest_index: state.lowest_visible_index(),
                    pagination: state.pagination(),
                    visible: (0..mounted.visible)
                        .filter_map(|i| mounted.visible_item(i))
                        .map(|item| item.key.clone())
                        .collect(),
                })
            })
            .collect();
        let open_modal =
            self.view
                .preview()
                .open_entry()
                .map(|(video, entry)| ModalSummary {
                    video,
                    modal_state: entry.modal_state,
                    title_card_rect: entry.title_card_rect,
                });
        Report {
            effects: self.effects,
            rows,
            open_modal,
            can_autoplay: self.view.can_autoplay(),
            rejected_steps: self.rejected_steps,
        }
    }

    fn record(&mut self, effects: Vec<CatalogEffect>) {
        let now = self.view.clock().now();
        let at_ms = u64::try_from(now.saturating_duration_since(self.origin).as_millis())
            .unwrap_or(u64::MAX);
        for effect in effects {
            match &effect {
                CatalogEffect::StartTransition {
                    row,
                    transition,
                    duration_ms,
                } if self.options.auto_complete => {
                    let animator = self.animators.entry(*row).or_insert_with(|| {
                        SlideAnimator::new(
                            Duration::from_millis(*duration_ms),
                            self.options.easing,
                        )
                    });
                    animator.start(transition, now);
                }
                CatalogEffect::ItemsPerRowChanged { .. } => {
                    self.animators.values_mut().for_each(SlideAnimator::cancel);
                }
                _ => {}
            }
            tracing::debug!(at_ms, ?effect, "effect");
            self.effects.push(TimedEffect { at_ms, effect });
        }
    }
}

/// Replay `script` on a virtual clock. Runs as fast as the CPU allows.
pub fn replay(
    config: CinerowConfig,
    catalog: &CatalogFile,
    script: &Script,
    options: ReplayOptions,
) -> anyhow::Result<Report> {
    let clock = VirtualClock::new();
    let mut session = Session::new(config, clock.clone(), catalog, options)?;
    for step in &script.steps {
        advance_virtual(&mut session, &clock, Duration::from_millis(step.wait_ms));
        session.apply(step.message.clone());
    }
    advance_virtual(&mut session, &clock, Duration::from_millis(script.settle_ms));
    Ok(session.finish())
}

fn advance_virtual(
    session: &mut Session<VirtualClock>,
    clock: &VirtualClock,
    by: Duration,
) {
    let target = clock.now() + by;
    while let Some(wake) = session.next_wakeup().filter(|wake| *wake <= target) {
        clock.advance(wake.saturating_duration_since(clock.now()));
        session.pump();
    }
    clock.advance(target.saturating_duration_since(clock.now()));
    session.pump();
}

/// Replay `script` in wall-clock time on the tokio timer.
pub async fn replay_realtime(
    config: CinerowConfig,
    catalog: &CatalogFile,
    script: &Script,
    options: ReplayOptions,
) -> anyhow::Result<Report> {
    let mut session = Session::new(config, TokioClock, catalog, options)?;
    for step in &script.steps {
        advance_realtime(&mut session, Duration::from_millis(step.wait_ms)).await;
        session.apply(step.message.clone());
    }
    advance_realtime(&mut session, Duration::from_millis(script.settle_ms)).await;
    Ok(session.finish())
}

async fn advance_realtime(session: &mut Session<TokioClock>, by: Duration) {
    let target = tokio::time::Instant::now() + by;
    while let Some(wake) = session
        .next_wakeup()
        .map(tokio::time::Instant::from_std)
        .filter(|wake| *wake <= target)
    {
        tokio::time::sleep_until(wake).await;
        session.pump();
    }
    tokio::time::sleep_until(target).await;
    session.pump();
}
