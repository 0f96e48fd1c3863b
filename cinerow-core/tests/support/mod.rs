#![allow(dead_code)]

use std::sync::Arc;

use cinerow_core::TitleCard;
use cinerow_model::{ElementId, MediaItem, MediaType, Rect, RowId, VideoId};

/// `n` movies with ids `1..=n`.
pub fn movies(n: usize) -> Vec<Arc<MediaItem>> {
    (1..=n as u64).map(movie).collect()
}

pub fn movie(id: u64) -> Arc<MediaItem> {
    Arc::new(
        MediaItem::new(VideoId(id), MediaType::Movie, format!("Movie {id}"))
            .expect("valid title"),
    )
}

pub fn element(row: u32, key: &str) -> ElementId {
    ElementId::new(RowId(row), key)
}

/// A tabbable card for movie `id` in row 0.
pub fn card(id: u64) -> TitleCard {
    TitleCard {
        element: element(0, &format!("movie-{id}")),
        video: movie(id),
        rect: Rect::new(id as f32 * 220.0, 0.0, 210.0, 118.0),
        tabbable: true,
    }
}
