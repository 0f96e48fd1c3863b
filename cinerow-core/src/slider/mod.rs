//! Row slider
//!
//! Windowing engine for one horizontally paged row of titles. A row mounts a
//! bounded slice of its items around the cursor, tags each mounted item with
//! its viewport role, and pages left or right one transition at a time. Moves
//! commit only when the animation layer reports completion (or the transition
//! times out).

pub mod animator;
pub mod navigation;
pub mod state;
pub mod types;
pub mod window;

pub use animator::{Easing, Frame, SlideAnimator};
pub use state::SliderState;
pub use types::*;
pub use window::MountedWindow;
