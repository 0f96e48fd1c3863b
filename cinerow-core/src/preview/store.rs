//! PreviewModalStore: the per-session map of preview modal entries.
//!
//! The store is the only shared mutable structure in the catalog. Every
//! operation replaces whole entries and the single-open invariant holds after
//! each call: at most one entry has `is_open == true`.

use std::collections::HashMap;
use std::fmt;

use cinerow_model::VideoId;

use super::listeners::{ListenerId, ListenerRegistry, ResizeListenerHost};
use super::types::{
    CloseOptions, ModalState, OpenRequest, PreviewModalEntry, PreviewModalPatch,
};

/// Callback invoked once when a video's modal closes.
pub type CloseHook = Box<dyn FnOnce(VideoId) + Send>;

pub struct PreviewModalStore<H = ListenerRegistry> {
    entries: HashMap<VideoId, PreviewModalEntry>,
    close_hooks: HashMap<VideoId, CloseHook>,
    host: H,
    /// Any modal has been open during this session.
    was_open: bool,
}

impl<H: fmt::Debug> fmt::Debug for PreviewModalStore<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewModalStore")
            .field("entries", &self.entries)
            .field("close_hooks", &self.close_hooks.len())
            .field("host", &self.host)
            .field("was_open", &self.was_open)
            .finish()
    }
}

impl Default for PreviewModalStore<ListenerRegistry> {
    fn default() -> Self {
        Self::new(ListenerRegistry::new())
    }
}

impl<H: ResizeListenerHost> PreviewModalStore<H> {
    pub fn new(host: H) -> Self {
        Self {
            entries: HashMap::new(),
            close_hooks: HashMap::new(),
            host,
            was_open: false,
        }
    }

    /// Close every other open entry without animation, then open `request`.
    ///
    /// Returns the ids that were closed to make room.
    pub fn open(&mut self, request: OpenRequest) -> Vec<VideoId> {
        let video_id = request.video_id();
        let mut others: Vec<VideoId> = self
            .entries
            .iter()
            .filter(|(id, entry)| entry.is_open && **id != video_id)
            .map(|(id, _)| *id)
            .collect();
        others.sort();
        for id in &others {
            self.close(*id, CloseOptions::IMMEDIATE);
        }

        // Reopening the same id re-anchors the listener on the new card.
        if let Some(listener) =
            self.entries.get(&video_id).and_then(|entry| entry.listener)
        {
            self.host.detach(listener);
        }

        let listener = self.host.attach(&request.element);
        tracing::debug!(
            video = %video_id,
            element = %request.element,
            modal_state = ?request.modal_state,
            %listener,
            preempted = others.len(),
            "preview modal opened"
        );
        self.entries.insert(video_id, PreviewModalEntry {
            is_open: true,
            modal_state: request.modal_state,
            title_card_rect: request.title_card_rect,
            scroll_position: request.scroll_position,
            video: Some(request.video),
            close_without_animation: false,
            element: Some(request.element),
            listener: Some(listener),
        });
        self.was_open = true;
        others
    }

    /// Expand an open mini modal into a detail modal in place.
    pub fn upgrade(&mut self, video: VideoId) -> bool {
        let Some(entry) = self.entries.get(&video).filter(|e| e.is_mini())
        else {
            return false;
        };
        let upgraded = PreviewModalEntry {
            modal_state: ModalState::DetailModal,
            ..entry.clone()
        };
        self.entries.insert(video, upgraded);
        tracing::debug!(video = %video, "preview modal expanded to detail");
        true
    }

    /// Reset `video` to closed defaults. Defaults are written even when no
    /// entry existed. Returns whether the entry was open.
    pub fn close(&mut self, video: VideoId, options: CloseOptions) -> bool {
        let previous = self.entries.insert(video, PreviewModalEntry {
            close_without_animation: options.without_animation,
            ..PreviewModalEntry::default()
        });
        let was_open = previous.as_ref().is_some_and(|entry| entry.is_open);

        if let Some(listener) = previous.and_then(|entry| entry.listener) {
            self.host.detach(listener);
        }
        if let Some(hook) = self.close_hooks.remove(&video) {
            hook(video);
        }
        if was_open {
            tracing::debug!(
                video = %video,
                without_animation = options.without_animation,
                "preview modal closed"
            );
        }
        was_open
    }

    /// Merge `patch` into the existing entry without touching its open state.
    /// Returns `false` when `video` has no entry.
    pub fn update(&mut self, video: VideoId, patch: PreviewModalPatch) -> bool {
        let Some(entry) = self.entries.get(&video) else {
            return false;
        };
        let merged = patch.apply(entry);
        self.entries.insert(video, merged);
        true
    }

    /// Register a hook run once when `video` next closes. Replaces any
    /// previous hook for the same id.
    pub fn on_close<F>(&mut self, video: VideoId, hook: F)
    where
        F: FnOnce(VideoId) + Send + 'static,
    {
        self.close_hooks.insert(video, Box::new(hook));
    }

    pub fn is_any_open(&self) -> bool {
        self.entries.values().any(|entry| entry.is_open)
    }

    pub fn is_detail_open(&self) -> bool {
        self.entries.values().any(PreviewModalEntry::is_detail)
    }

    pub fn open_entry(&self) -> Option<(VideoId, &PreviewModalEntry)> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.is_open)
            .map(|(id, entry)| (*id, entry))
    }

    pub fn open_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_open).count()
    }

    pub fn entry(&self, video: VideoId) -> Option<&PreviewModalEntry> {
        self.entries.get(&video)
    }

    pub fn entries(&self) -> &HashMap<VideoId, PreviewModalEntry> {
        &self.entries
    }

    /// Video whose open modal owns `listener`.
    pub fn video_for_listener(&self, listener: ListenerId) -> Option<VideoId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.is_open && entry.listener == Some(listener))
            .map(|(id, _)| *id)
    }

    pub fn was_open(&self) -> bool {
        self.was_open
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
