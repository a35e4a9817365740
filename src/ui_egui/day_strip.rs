//! The 24-hour day strip.
//!
//! Renders hour rules, the current-time indicator and the day's event
//! blocks (positioned from the column layout and the coordinate mapper),
//! and routes pointer input into the drag controller. During a gesture the
//! dragged event renders from its tentative interval; every other block
//! keeps its stored one, and the column layout is recomputed against that
//! substituted view each frame.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use egui::{Color32, CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};

use super::event_block::{render_event_block, BlockState};
use crate::interaction::drag::{DragController, DragMode, DragOutcome};
use crate::layout::columns::{assign_columns, SlotAssignment};
use crate::layout::coordinates::CoordinateMapper;
use crate::models::event::Event;

/// Width reserved for the hour labels on the left.
pub const TIME_LABEL_WIDTH: f32 = 50.0;

/// Horizontal gap between side-by-side blocks.
pub const COLUMN_GAP: f32 = 2.0;

/// Resize-handle hit zone at the top/bottom edge of a native block.
pub const HANDLE_ZONE_PX: f32 = 6.0;

/// What the strip reported this frame.
#[derive(Debug, Default)]
pub struct StripResponse {
    /// A block was clicked without dragging; open its detail view.
    pub clicked: Option<String>,
    /// A gesture finished.
    pub outcome: Option<DragOutcome>,
}

struct BlockHit {
    event_id: String,
    rect: Rect,
    native: bool,
}

/// Render the strip for `date` and drive the drag controller.
///
/// `scroll_offset` is the enclosing scroll area's current offset; the
/// controller needs it to compensate for auto-scroll during a gesture.
pub fn show(
    ui: &mut egui::Ui,
    date: NaiveDate,
    events: &[Event],
    mapper: &CoordinateMapper,
    drag: &mut DragController,
    selected: Option<&str>,
    scroll_offset: f32,
) -> StripResponse {
    let mut result = StripResponse::default();

    let strip_size = Vec2::new(ui.available_width(), mapper.day_height());
    let (strip_rect, response) = ui.allocate_exact_size(strip_size, Sense::click_and_drag());
    let viewport = ui.clip_rect();

    draw_hour_grid(ui, strip_rect, mapper);

    // Substitute the tentative interval for the dragged event only, then
    // lay out against that view.
    let display: Vec<Event> = events
        .iter()
        .map(|event| {
            let mut shown = event.clone();
            if let Some(tentative) = drag.tentative_for(&event.id) {
                shown.set_interval(tentative);
            }
            shown
        })
        .collect();
    let layout = assign_columns(&display);

    let content_left = strip_rect.left() + TIME_LABEL_WIDTH;
    let content_width = (strip_rect.width() - TIME_LABEL_WIDTH - 8.0).max(0.0);

    let mut hits: Vec<BlockHit> = Vec::new();
    for event in &display {
        let Some(rect) = block_rect(event, date, strip_rect, content_left, content_width, mapper, &layout)
        else {
            continue;
        };

        let state = BlockState {
            selected: selected == Some(event.id.as_str()),
            dragging: drag.active_event() == Some(event.id.as_str()),
        };
        render_event_block(ui, rect, event, state);

        hits.push(BlockHit {
            event_id: event.id.clone(),
            rect,
            native: event.is_native(),
        });
    }

    if date == Local::now().date_naive() {
        draw_current_time_indicator(ui, strip_rect, mapper);
    }

    // Cursor feedback over native blocks.
    if !drag.is_active() {
        if let Some(pos) = response.hover_pos() {
            if let Some(hit) = hits.iter().rev().find(|hit| hit.rect.contains(pos)) {
                if hit.native {
                    let cursor = match hit_mode(hit.rect, pos) {
                        DragMode::Move => CursorIcon::Grab,
                        _ => CursorIcon::ResizeVertical,
                    };
                    ui.ctx().set_cursor_icon(cursor);
                }
            }
        }
    }

    // Gesture lifecycle.
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(hit) = hits.iter().rev().find(|hit| hit.rect.contains(pos)) {
                if let Some(event) = events.iter().find(|event| event.id == hit.event_id) {
                    drag.begin(event, hit_mode(hit.rect, pos), pos.y, scroll_offset);
                }
            }
        }
    }

    if drag.is_active() {
        let pointer = ui.input(|i| i.pointer.latest_pos());
        if let Some(pos) = pointer {
            drag.pointer_moved(pos.y, scroll_offset, mapper);
            drag.update_autoscroll(pos.y, viewport.top(), viewport.bottom());
        }
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        ui.ctx().request_repaint();

        let released = ui.input(|i| i.pointer.any_released());
        let pointer_left = pointer.map_or(true, |pos| !viewport.contains(pos));
        // Leaving the strip finishes exactly like pointer-up.
        if released || pointer_left {
            result.outcome = drag.finish();
        }
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            result.clicked = hits
                .iter()
                .rev()
                .find(|hit| hit.rect.contains(pos))
                .map(|hit| hit.event_id.clone());
        }
    }

    result
}

/// Which gesture a pointer-down at `pos` starts on a block.
fn hit_mode(rect: Rect, pos: Pos2) -> DragMode {
    let zone = HANDLE_ZONE_PX.min(rect.height() / 3.0);
    if pos.y <= rect.top() + zone {
        DragMode::ResizeTop
    } else if pos.y >= rect.bottom() - zone {
        DragMode::ResizeBottom
    } else {
        DragMode::Move
    }
}

fn block_rect(
    event: &Event,
    date: NaiveDate,
    strip_rect: Rect,
    content_left: f32,
    content_width: f32,
    mapper: &CoordinateMapper,
    layout: &HashMap<String, SlotAssignment>,
) -> Option<Rect> {
    if event.start.date_naive() > date || event.end.date_naive() < date {
        return None;
    }
    let assignment = layout.get(&event.id)?;

    // Clamp multi-day spans to this day's window.
    let top = if event.start.date_naive() == date {
        mapper.time_to_y(event.start.time())
    } else {
        0.0
    };
    let bottom = if event.end.date_naive() == date {
        mapper.time_to_y(event.end.time())
    } else {
        mapper.day_height()
    };
    let height = (bottom - top).max(mapper.block_height(0));

    let (left_frac, width_frac) = assignment.geometry();
    Some(Rect::from_min_size(
        Pos2::new(
            content_left + left_frac * content_width,
            strip_rect.top() + top,
        ),
        Vec2::new(
            (width_frac * content_width - COLUMN_GAP).max(4.0),
            height,
        ),
    ))
}

fn draw_hour_grid(ui: &mut egui::Ui, strip_rect: Rect, mapper: &CoordinateMapper) {
    let painter = ui.painter();
    let line_color = Color32::from_gray(60);

    for hour in 0..24 {
        let y = strip_rect.top() + hour as f32 * mapper.pixels_per_hour();
        painter.line_segment(
            [
                Pos2::new(strip_rect.left() + TIME_LABEL_WIDTH, y),
                Pos2::new(strip_rect.right(), y),
            ],
            Stroke::new(0.5, line_color),
        );
        painter.text(
            Pos2::new(strip_rect.left() + TIME_LABEL_WIDTH - 6.0, y),
            egui::Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            egui::FontId::proportional(12.0),
            Color32::GRAY,
        );
    }
}

/// Red line plus dot at the current wall-clock time.
fn draw_current_time_indicator(ui: &mut egui::Ui, strip_rect: Rect, mapper: &CoordinateMapper) {
    let now = Local::now();
    let y = strip_rect.top() + mapper.time_to_y(now.time());

    let painter = ui.painter();
    let line_color = Color32::from_rgb(255, 100, 100);
    let x_start = strip_rect.left() + TIME_LABEL_WIDTH;

    painter.circle_filled(Pos2::new(x_start - 4.0, y), 3.0, line_color);
    painter.line_segment(
        [Pos2::new(x_start, y), Pos2::new(strip_rect.right(), y)],
        Stroke::new(2.0, line_color),
    );
}
