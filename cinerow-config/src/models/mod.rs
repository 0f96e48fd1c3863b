use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{breakpoints, preview, slider};

/// Top-level configuration for the catalog core.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CinerowConfig {
    pub slider: SliderConfig,
    pub preview: PreviewConfig,
    pub breakpoints: BreakpointConfig,
}

/// Row carousel behavior. Use these to tune how long a page slide takes and
/// how patient a row is before it gives up on a missing completion signal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Splice items from the opposite end so the row appears infinite.
    /// Only takes effect when a row holds more than one page of titles.
    pub loop_enabled: bool,
    /// Slide transition duration (ms) handed to the animation layer.
    pub transition_duration_ms: u64,
    /// Deadline (ms) for the completion signal. When it passes, the move is
    /// committed anyway and a stalled-transition fault is reported. Keep it
    /// comfortably above `transition_duration_ms`.
    pub transition_timeout_ms: u64,
    /// Delay (ms) between a committed move and restoring keyboard focus.
    pub refocus_delay_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            loop_enabled: slider::LOOP_ENABLED,
            transition_duration_ms: slider::TRANSITION_DURATION_MS,
            transition_timeout_ms: slider::TRANSITION_TIMEOUT_MS,
            refocus_delay_ms: slider::REFOCUS_DELAY_MS,
        }
    }
}

impl SliderConfig {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn transition_timeout(&self) -> Duration {
        Duration::from_millis(self.transition_timeout_ms)
    }

    pub fn refocus_delay(&self) -> Duration {
        Duration::from_millis(self.refocus_delay_ms)
    }
}

/// Preview modal timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Hover hold (ms) before the first mini modal of a session opens.
    pub first_open_delay_ms: u64,
    /// Shorter hover hold (ms) once a modal has been open, so repeated
    /// browsing feels responsive.
    pub repeat_open_delay_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            first_open_delay_ms: preview::FIRST_OPEN_DELAY_MS,
            repeat_open_delay_ms: preview::REPEAT_OPEN_DELAY_MS,
        }
    }
}

impl PreviewConfig {
    /// Hover delay given whether any modal was open earlier in the session.
    pub fn hover_delay(&self, was_open: bool) -> Duration {
        if was_open {
            Duration::from_millis(self.repeat_open_delay_ms)
        } else {
            Duration::from_millis(self.first_open_delay_ms)
        }
    }
}

/// One responsive breakpoint: viewports narrower than `max_width` show
/// `items_per_row` titles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Breakpoint {
    pub max_width: f32,
    pub items_per_row: usize,
}

/// Width-to-items-per-row table, checked in ascending `max_width` order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakpointConfig {
    pub steps: Vec<Breakpoint>,
    /// Items per row when the viewport is wider than every step.
    pub wide_items_per_row: usize,
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            steps: breakpoints::DEFAULT_TABLE
                .iter()
                .map(|&(max_width, items_per_row)| Breakpoint {
                    max_width,
                    items_per_row,
                })
                .collect(),
            wide_items_per_row: breakpoints::WIDE_ITEMS_PER_ROW,
        }
    }
}

impl BreakpointConfig {
    /// Items per row for a viewport of `width` logical pixels.
    pub fn items_per_row(&self, width: f32) -> usize {
        self.steps
            .iter()
            .find(|step| width < step.max_width)
            .map(|step| step.items_per_row)
            .unwrap_or(self.wide_items_per_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_breakpoints_follow_the_table() {
        let bp = BreakpointConfig::default();
        assert_eq!(bp.items_per_row(320.0), 2);
        assert_eq!(bp.items_per_row(500.0), 3);
        assert_eq!(bp.items_per_row(1099.0), 4);
        assert_eq!(bp.items_per_row(1280.0), 5);
        assert_eq!(bp.items_per_row(1920.0), 6);
    }

    #[test]
    fn hover_delay_shortens_after_first_open() {
        let cfg = PreviewConfig::default();
        assert_eq!(cfg.hover_delay(false), Duration::from_millis(400));
        assert_eq!(cfg.hover_delay(true), Duration::from_millis(200));
    }
}
