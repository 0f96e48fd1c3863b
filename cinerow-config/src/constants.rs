//! Compiled defaults. Tuning should happen here so every row and card
//! picks up the same values.

/// Slider (row carousel) defaults.
pub mod slider {
    /// Duration (ms) of the CSS-style slide transition.
    pub const TRANSITION_DURATION_MS: u64 = 750;
    /// Deadline (ms) after which an unfinished transition is force-committed.
    /// Must exceed the transition duration.
    pub const TRANSITION_TIMEOUT_MS: u64 = 1_500;
    /// Delay (ms) before focus is restored after a committed move.
    pub const REFOCUS_DELAY_MS: u64 = 50;
    /// Rows loop by default, like the browse page.
    pub const LOOP_ENABLED: bool = true;
}

/// Preview modal defaults.
pub mod preview {
    /// Hover delay (ms) before the first mini modal of a session opens.
    pub const FIRST_OPEN_DELAY_MS: u64 = 400;
    /// Hover delay (ms) once any modal has been open in this session.
    pub const REPEAT_OPEN_DELAY_MS: u64 = 200;
}

/// Responsive breakpoints: `(max_width_exclusive, items_per_row)`.
pub mod breakpoints {
    pub const DEFAULT_TABLE: &[(f32, usize)] =
        &[(500.0, 2), (800.0, 3), (1100.0, 4), (1400.0, 5)];
    /// Items per row above the widest breakpoint.
    pub const WIDE_ITEMS_PER_ROW: usize = 6;
}

/// Candidate config files checked when no env override is present.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "cinerow.toml",
    "cinerow.json",
    "config/cinerow.toml",
    "config/cinerow.json",
];

/// Env var naming a TOML or JSON config file.
pub const ENV_CONFIG_PATH: &str = "CINEROW_CONFIG_PATH";
/// Env var carrying an inline JSON config.
pub const ENV_CONFIG_JSON: &str = "CINEROW_CONFIG_JSON";
