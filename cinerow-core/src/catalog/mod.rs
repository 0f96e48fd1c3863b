//! Catalog view: composes slider rows and the preview coordinator behind a
//! message-in, effects-out interface.

pub mod focus;
pub mod messages;
pub mod view;

pub use focus::{CatalogFocus, FocusSource};
pub use messages::{CatalogEffect, CatalogMessage};
pub use view::CatalogView;
