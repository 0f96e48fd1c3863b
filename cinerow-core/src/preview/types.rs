use std::sync::Arc;

use cinerow_model::{ElementId, MediaItem, Rect, VideoId};
use serde::{Deserialize, Serialize};

use super::listeners::ListenerId;

/// Display mode of an open preview modal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    /// Small hover card anchored on the title card.
    #[default]
    MiniModal,
    /// Expanded detail view, opened by click or Enter.
    DetailModal,
}

/// Preview modal state for one video id.
///
/// Entries are replaced as a whole on every store operation; the `Default`
/// value is the closed state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewModalEntry {
    pub is_open: bool,
    pub modal_state: ModalState,
    pub title_card_rect: Option<Rect>,
    pub scroll_position: f32,
    pub video: Option<Arc<MediaItem>>,
    /// Set when the entry was closed to make room for another modal.
    pub close_without_animation: bool,
    /// Title card the modal is anchored on.
    pub element: Option<ElementId>,
    /// Resize listener attached for `element` while open.
    pub listener: Option<ListenerId>,
}

impl PreviewModalEntry {
    pub fn is_detail(&self) -> bool {
        self.is_open && self.modal_state == ModalState::DetailModal
    }

    pub fn is_mini(&self) -> bool {
        self.is_open && self.modal_state == ModalState::MiniModal
    }
}

/// Partial update merged into an existing entry. `None` fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewModalPatch {
    pub title_card_rect: Option<Rect>,
    pub scroll_position: Option<f32>,
    pub video: Option<Arc<MediaItem>>,
}

impl PreviewModalPatch {
    pub fn rect(rect: Rect) -> Self {
        Self {
            title_card_rect: Some(rect),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, entry: &PreviewModalEntry) -> PreviewModalEntry {
        PreviewModalEntry {
            title_card_rect: self.title_card_rect.or(entry.title_card_rect),
            scroll_position: self
                .scroll_position
                .unwrap_or(entry.scroll_position),
            video: self.video.or_else(|| entry.video.clone()),
            ..entry.clone()
        }
    }
}

/// Everything needed to commit a modal open.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRequest {
    pub video: Arc<MediaItem>,
    pub element: ElementId,
    pub modal_state: ModalState,
    pub title_card_rect: Option<Rect>,
    pub scroll_position: f32,
}

impl OpenRequest {
    pub fn video_id(&self) -> VideoId {
        self.video.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseOptions {
    pub without_animation: bool,
}

impl CloseOptions {
    pub const ANIMATED: Self = Self {
        without_animation: false,
    };
    pub const IMMEDIATE: Self = Self {
        without_animation: true,
    };
}

/// Result of a click or Enter on a title card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// A detail modal was opened, preempting `closed`.
    Opened { video: VideoId, closed: Vec<VideoId> },
    /// The card's own mini modal was expanded in place.
    Upgraded { video: VideoId },
    /// A detail modal is already open; nothing changed.
    Rejected { requested: VideoId, open: VideoId },
}

/// State changes reported by the coordinator, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PreviewEvent {
    Opened {
        video: VideoId,
        element: ElementId,
        modal_state: ModalState,
    },
    Upgraded {
        video: VideoId,
    },
    Closed {
        video: VideoId,
        without_animation: bool,
    },
    Rejected {
        requested: VideoId,
        open: VideoId,
    },
    RectUpdated {
        video: VideoId,
        rect: Rect,
    },
    /// A hover timer fired for a card that is no longer mounted.
    OrphanedTimer {
        element: ElementId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinerow_model::MediaType;

    #[test]
    fn patch_keeps_open_state_and_unset_fields() {
        let video = Arc::new(
            MediaItem::new(VideoId(42), MediaType::Movie, "Heat").unwrap(),
        );
        let entry = PreviewModalEntry {
            is_open: true,
            modal_state: ModalState::DetailModal,
            title_card_rect: Some(Rect::new(0.0, 0.0, 100.0, 56.0)),
            scroll_position: 120.0,
            video: Some(video),
            ..PreviewModalEntry::default()
        };
        let rect = Rect::new(10.0, 0.0, 120.0, 67.5);
        let merged = PreviewModalPatch::rect(rect).apply(&entry);
        assert!(merged.is_open);
        assert_eq!(merged.modal_state, ModalState::DetailModal);
        assert_eq!(merged.title_card_rect, Some(rect));
        assert_eq!(merged.scroll_position, 120.0);
        assert!(merged.video.is_some());
    }

    #[test]
    fn default_entry_is_closed() {
        let entry = PreviewModalEntry::default();
        assert!(!entry.is_open);
        assert!(!entry.is_detail());
        assert!(!entry.is_mini());
    }
}
