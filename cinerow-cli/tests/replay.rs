mod support;

use cinerow_cli::{ReplayOptions, replay, replay_realtime};
use cinerow_config::CinerowConfig;
use cinerow_core::preview::{ModalState, PreviewEvent};
use cinerow_core::slider::Pagination;
use cinerow_core::CatalogEffect;
use cinerow_model::{ElementId, RowId, VideoId};

use support::{HOVER_THEN_CLICK, PAGE_FORWARD, catalog, script};

fn effect_names(report: &cinerow_cli::Report) -> Vec<(u64, &'static str)> {
    report
        .effects
        .iter()
        .map(|timed| {
            let name = match &timed.effect {
                CatalogEffect::StartTransition { .. } => "start",
                CatalogEffect::SnapOffset { .. } => "snap",
                CatalogEffect::StalledTransition { .. } => "stalled",
                CatalogEffect::PaginationChanged { .. } => "page",
                CatalogEffect::ItemsPerRowChanged { .. } => "items_per_row",
                CatalogEffect::FocusItem { .. } => "focus",
                CatalogEffect::Preview(_) => "preview",
                CatalogEffect::BillboardAutoplay { .. } => "autoplay",
            };
            (timed.at_ms, name)
        })
        .collect()
}

#[test]
fn page_forward_completes_and_refocuses() {
    let report = replay(
        CinerowConfig::default(),
        &catalog(20),
        &script(PAGE_FORWARD),
        ReplayOptions::default(),
    )
    .unwrap();

    assert_eq!(effect_names(&report), vec![
        (0, "start"),
        (750, "snap"),
        (750, "page"),
        (800, "focus"),
    ]);
    assert_eq!(
        report.effects[3].effect,
        CatalogEffect::FocusItem {
            element: ElementId::new(RowId(0), "movie-8"),
        }
    );

    let row = &report.rows[0];
    assert_eq!(row.lowest_index, 6);
    assert_eq!(row.pagination, Pagination {
        current_page: 1,
        total_pages: 4,
    });
    assert_eq!(row.visible.first().map(String::as_str), Some("movie-7"));
    assert_eq!(row.visible.len(), 6);
    assert_eq!(report.rejected_steps, 0);
}

#[test]
fn missing_completion_is_recovered_by_the_timeout() {
    let report = replay(
        CinerowConfig::default(),
        &catalog(20),
        &script(PAGE_FORWARD),
        ReplayOptions {
            auto_complete: false,
            ..ReplayOptions::default()
        },
    )
    .unwrap();

    assert_eq!(&effect_names(&report)[..3], &[
        (0, "start"),
        (1_500, "stalled"),
        (1_500, "snap"),
    ]);
    assert_eq!(report.rows[0].lowest_index, 6);
}

#[test]
fn click_replaces_the_hover_preview() {
    let report = replay(
        CinerowConfig::default(),
        &catalog(20),
        &script(HOVER_THEN_CLICK),
        ReplayOptions::default(),
    )
    .unwrap();

    let previews: Vec<&PreviewEvent> = report
        .effects
        .iter()
        .filter_map(|timed| match &timed.effect {
            CatalogEffect::Preview(event) => Some(event),
            _ => None,
        })
        .collect();
    assert_eq!(previews, vec![
        &PreviewEvent::Opened {
            video: VideoId(2),
            element: ElementId::new(RowId(0), "movie-2"),
            modal_state: ModalState::MiniModal,
        },
        &PreviewEvent::Closed {
            video: VideoId(2),
            without_animation: true,
        },
        &PreviewEvent::Opened {
            video: VideoId(4),
            element: ElementId::new(RowId(0), "movie-4"),
            modal_state: ModalState::DetailModal,
        },
    ]);

    let modal = report.open_modal.as_ref().unwrap();
    assert_eq!(modal.video, VideoId(4));
    assert_eq!(modal.modal_state, ModalState::DetailModal);
    assert!(!report.can_autoplay);
}

#[test]
fn rejected_steps_are_counted_not_fatal() {
    let report = replay(
        CinerowConfig::default(),
        &catalog(20),
        &script(
            r#"{"steps":[
                {"message":{"type":"navigate","row":7,"direction":"next"}},
                {"message":{"type":"navigate","row":0,"direction":"next"}}
            ]}"#,
        ),
        ReplayOptions::default(),
    )
    .unwrap();

    assert_eq!(report.rejected_steps, 1);
    assert_eq!(report.rows[0].lowest_index, 6);
}

#[tokio::test(start_paused = true)]
async fn realtime_replay_follows_the_tokio_clock() {
    let report = replay_realtime(
        CinerowConfig::default(),
        &catalog(20),
        &script(PAGE_FORWARD),
        ReplayOptions::default(),
    )
    .await
    .unwrap();

    let names: Vec<&str> = effect_names(&report).into_iter().map(|(_, n)| n).collect();
    assert_eq!(names, vec!["start", "snap", "page", "focus"]);
    // The timer wheel rounds deadlines up to the next millisecond.
    let snap_at = report.effects[1].at_ms;
    assert!((750..=752).contains(&snap_at), "snap at {snap_at}ms");
    assert_eq!(report.rows[0].lowest_index, 6);
}
