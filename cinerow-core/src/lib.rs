//! Browsing core of the Cinerow catalog client.
//!
//! - [`slider`]: per-row viewport windowing, looping and paging.
//! - [`preview`]: hover and click driven preview modals with a single-open
//!   store.
//! - [`catalog`]: the page-level view composing rows, cards and modals.
//! - [`timeline`]: clocks and cancellable timers shared by all of the above.
//!
//! The crate does no I/O. Time is read from a [`TimeProvider`] and every
//! deferred action sits on a [`Timeline`], so a host drives the core by
//! feeding messages and calling `tick` when the next deadline passes.

pub mod catalog;
pub mod error;
pub mod preview;
pub mod slider;
pub mod timeline;

pub use catalog::{CatalogEffect, CatalogMessage, CatalogView};
pub use error::{CoreError, Result, SliderFault};
pub use preview::{
    ClickOutcome, CloseOptions, ListenerId, ListenerRegistry, ModalState,
    PreviewCoordinator, PreviewEvent, PreviewModalEntry, PreviewModalPatch,
    PreviewModalStore, ResizeListenerHost, TitleCard,
};
pub use slider::{
    Direction, Pagination, PositionedItem, SliderState, Transition, TransitionId,
    ViewportPosition, ViewportWindow,
};
pub use timeline::{SystemClock, TimeProvider, Timeline, TimerHandle, VirtualClock};
