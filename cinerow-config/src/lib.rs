//! Shared configuration library for Cinerow.
//!
//! This crate centralizes the tunables of the catalog core: slider geometry
//! and timing, preview modal hover delays, and the responsive breakpoints that
//! decide how many titles fit in a row. Both the core and the CLI read their
//! defaults from here so there is a single source of truth.

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigSource};
pub use models::{
    Breakpoint, BreakpointConfig, CinerowConfig, PreviewConfig, SliderConfig,
};
pub use validation::ConfigGuardRailError;
