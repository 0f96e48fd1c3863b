//! Preview modal coordination
//!
//! Hovering a title card long enough opens a mini modal; clicking (or Enter)
//! opens a detail modal. At most one modal is open at a time.

pub mod coordinator;
pub mod hover;
pub mod listeners;
pub mod store;
pub mod types;

pub use coordinator::{PreviewCoordinator, TitleCard};
pub use hover::HoverTracker;
pub use listeners::{ListenerId, ListenerRegistry, ResizeListenerHost};
pub use store::{CloseHook, PreviewModalStore};
pub use types::*;
