//! Core data model definitions shared across Cinerow crates.
#![allow(missing_docs)]

pub mod error;
pub mod geometry;
pub mod ids;
pub mod media;
pub mod media_type;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use geometry::Rect;
pub use ids::{ElementId, RowId, VideoId};
pub use media::{ImageRef, MediaItem, UserFlags};
pub use media_type::MediaType;
