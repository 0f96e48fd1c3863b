//! Deferred work: clocks and cancellable timers.

pub mod clock;
pub mod queue;

pub use clock::{SystemClock, TimeProvider, VirtualClock};
pub use queue::{Timeline, TimerHandle};
