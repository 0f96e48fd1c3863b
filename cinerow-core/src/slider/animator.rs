//! Time-based tween for renderers without CSS transitions.
//!
//! Drives a row's offset from a transition's start to its end and tells the
//! caller when to report completion.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::types::{Transition, TransitionId};

/// Easing curve for the slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// One animator frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Still moving; translate the slice to this offset.
    Moving(f32),
    /// Reached the target; report completion of this transition.
    Finished(TransitionId, f32),
}

#[derive(Debug, Clone)]
struct Active {
    transition: TransitionId,
    start: f32,
    target: f32,
    started_at: Instant,
}

#[derive(Debug, Clone)]
pub struct SlideAnimator {
    active: Option<Active>,
    duration: Duration,
    easing: Easing,
}

impl SlideAnimator {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            active: None,
            duration,
            easing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, transition: &Transition, now: Instant) {
        self.active = Some(Active {
            transition: transition.id,
            start: transition.from_offset,
            target: transition.to_offset,
            started_at: now,
        });
    }

    /// Returns `None` when idle. The finishing frame is returned exactly once.
    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        let active = self.active.as_ref()?;
        let elapsed = now.saturating_duration_since(active.started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            let done = Frame::Finished(active.transition, active.target);
            self.active = None;
            return Some(done);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = self.easing.apply(t);
        Some(Frame::Moving(
            active.start + (active.target - active.start) * eased,
        ))
    }

    /// Instant at which the current slide finishes.
    pub fn deadline(&self) -> Option<Instant> {
        self.active
            .as_ref()
            .map(|active| active.started_at + self.duration)
    }

    /// Drop the current slide without reporting completion.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
