//! Replay scripted browsing sessions against the Cinerow catalog core.
//!
//! The binary wraps three pieces exposed here for tests and embedding:
//! [`script`] parses catalog and session files, [`runner`] drives a
//! [`CatalogView`](cinerow_core::CatalogView) through a script, and
//! [`output`] renders the resulting report.

pub mod output;
pub mod runner;
pub mod script;

pub use runner::{
    ModalSummary, ReplayOptions, Report, RowSummary, Session, TimedEffect,
    TokioClock, replay, replay_realtime,
};
pub use script::{CatalogFile, RowSpec, Script, Step};
