use thiserror::Error;

use crate::models::CinerowConfig;

/// Settings that would leave the catalog core in a broken state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error(
        "slider.transition_timeout_ms ({timeout_ms}) must exceed slider.transition_duration_ms ({duration_ms})"
    )]
    TimeoutNotAfterTransition { timeout_ms: u64, duration_ms: u64 },

    #[error("breakpoint {index} has zero items per row")]
    ZeroItemsPerRow { index: usize },

    #[error("breakpoints.wide_items_per_row must be at least 1")]
    ZeroWideItemsPerRow,

    #[error("breakpoint widths must be strictly ascending (step {index})")]
    UnorderedBreakpoints { index: usize },

    #[error(
        "preview.repeat_open_delay_ms ({repeat_ms}) must not exceed preview.first_open_delay_ms ({first_ms})"
    )]
    RepeatDelayLongerThanFirst { repeat_ms: u64, first_ms: u64 },
}

impl CinerowConfig {
    /// Check the guard rails, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        let slider = &self.slider;
        if slider.transition_timeout_ms <= slider.transition_duration_ms {
            return Err(ConfigGuardRailError::TimeoutNotAfterTransition {
                timeout_ms: slider.transition_timeout_ms,
                duration_ms: slider.transition_duration_ms,
            });
        }

        let bp = &self.breakpoints;
        if bp.wide_items_per_row == 0 {
            return Err(ConfigGuardRailError::ZeroWideItemsPerRow);
        }
        for (index, step) in bp.steps.iter().enumerate() {
            if step.items_per_row == 0 {
                return Err(ConfigGuardRailError::ZeroItemsPerRow { index });
            }
            if index > 0 && step.max_width <= bp.steps[index - 1].max_width {
                return Err(ConfigGuardRailError::UnorderedBreakpoints {
                    index,
                });
            }
        }

        let preview = &self.preview;
        if preview.repeat_open_delay_ms > preview.first_open_delay_ms {
            return Err(ConfigGuardRailError::RepeatDelayLongerThanFirst {
                repeat_ms: preview.repeat_open_delay_ms,
                first_ms: preview.first_open_delay_ms,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Breakpoint;

    #[test]
    fn defaults_pass_guard_rails() {
        CinerowConfig::default().validate().unwrap();
    }

    #[test]
    fn timeout_must_outlast_transition() {
        let mut cfg = CinerowConfig::default();
        cfg.slider.transition_timeout_ms = cfg.slider.transition_duration_ms;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigGuardRailError::TimeoutNotAfterTransition { .. })
        ));
    }

    #[test]
    fn zero_items_per_row_is_rejected() {
        let mut cfg = CinerowConfig::default();
        cfg.breakpoints.steps[1] = Breakpoint {
            max_width: 800.0,
            items_per_row: 0,
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigGuardRailError::ZeroItemsPerRow { index: 1 })
        );
    }

    #[test]
    fn breakpoints_must_ascend() {
        let mut cfg = CinerowConfig::default();
        cfg.breakpoints.steps.swap(0, 1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigGuardRailError::UnorderedBreakpoints { index: 1 })
        );
    }
}
