use std::fmt::Write as _;

use cinerow_core::CatalogEffect;
use cinerow_core::preview::PreviewEvent;

use crate::runner::Report;

/// Human readable rendering of a replay report.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for timed in &report.effects {
        let _ = writeln!(out, "{:>7}ms  {}", timed.at_ms, describe(&timed.effect));
    }
    if !report.effects.is_empty() {
        out.push('\n');
    }

    for row in &report.rows {
        let _ = writeln!(
            out,
            "{} {:?}  page {}/{}  from #{}  [{}]",
            row.id,
            row.title,
            row.pagination.current_page + 1,
            row.pagination.total_pages,
            row.lowest_index,
            row.visible.join(", ")
        );
    }

    match &report.open_modal {
        Some(modal) => {
            let _ = writeln!(out, "open: {} ({:?})", modal.video, modal.modal_state);
        }
        None => out.push_str("open: none\n"),
    }
    let _ = writeln!(out, "billboard autoplay: {}", report.can_autoplay);
    if report.rejected_steps > 0 {
        let _ = writeln!(out, "rejected steps: {}", report.rejected_steps);
    }
    out
}

fn describe(effect: &CatalogEffect) -> String {
    match effect {
        CatalogEffect::StartTransition {
            row,
            transition,
            duration_ms,
        } => format!(
            "{row} slide {:?} {} -> {} over {duration_ms}ms",
            transition.direction, transition.from_index, transition.to_index
        ),
        CatalogEffect::SnapOffset {
            row,
            lowest_index,
            offset_percent,
        } => format!("{row} settle at #{lowest_index} (-{offset_percent:.2}%)"),
        CatalogEffect::StalledTransition {
            row,
            transition,
            waited_ms,
        } => format!("{row} {transition} stalled after {waited_ms}ms"),
        CatalogEffect::PaginationChanged { row, pagination } => format!(
            "{row} page {}/{}",
            pagination.current_page + 1,
            pagination.total_pages
        ),
        CatalogEffect::ItemsPerRowChanged { items_per_row } => {
            format!("{items_per_row} items per row")
        }
        CatalogEffect::FocusItem { element } => format!("focus {element}"),
        CatalogEffect::Preview(event) => describe_preview(event),
        CatalogEffect::BillboardAutoplay { enabled } => {
            format!("billboard autoplay {}", if *enabled { "on" } else { "off" })
        }
    }
}

fn describe_preview(event: &PreviewEvent) -> String {
    match event {
        PreviewEvent::Opened {
            video,
            element,
            modal_state,
        } => format!("open {video} {modal_state:?} from {element}"),
        PreviewEvent::Upgraded { video } => format!("expand {video}"),
        PreviewEvent::Closed {
            video,
            without_animation,
        } => {
            if *without_animation {
                format!("close {video} (immediate)")
            } else {
                format!("close {video}")
            }
        }
        PreviewEvent::Rejected { requested, open } => {
            format!("reject {requested}, {open} is open")
        }
        PreviewEvent::RectUpdated { video, rect } => format!(
            "track {video} at {:.0},{:.0} {:.0}x{:.0}",
            rect.x, rect.y, rect.width, rect.height
        ),
        PreviewEvent::OrphanedTimer { element } => {
            format!("drop hover timer for unmounted {element}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinerow_core::slider::Pagination;
    use cinerow_model::RowId;

    use crate::runner::{RowSummary, TimedEffect};

    #[test]
    fn renders_effects_and_rows() {
        let report = Report {
            effects: vec![TimedEffect {
                at_ms: 400,
                effect: CatalogEffect::BillboardAutoplay { enabled: false },
            }],
            rows: vec![RowSummary {
                id: RowId(0),
                title: "Trending Now".into(),
                lowest_index: 6,
                pagination: Pagination {
                    current_page: 1,
                    total_pages: 4,
                },
                visible: vec!["movie-7".into(), "movie-8".into()],
            }],
            open_modal: None,
            can_autoplay: false,
            rejected_steps: 0,
        };
        let text = render_text(&report);
        assert!(text.contains("    400ms  billboard autoplay off"));
        assert!(text.contains("row-0 \"Trending Now\"  page 2/4  from #6"));
        assert!(text.contains("open: none"));
        assert!(!text.contains("rejected"));
    }
}
