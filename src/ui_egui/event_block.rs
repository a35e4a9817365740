//! Visual rendering of individual event blocks on the day strip.
//!
//! Draws a coloured background with accent bar, title and time range.
//! Completed and past quests are dimmed; external events carry a lock
//! marker since they cannot be dragged here.

use chrono::Local;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::models::event::Event;

const DEFAULT_BLOCK_COLOR: Color32 = Color32::from_rgb(100, 150, 200);

/// Parse a hex color string to Color32.
///
/// Accepts an optional `#` prefix; `None` for empty or malformed input.
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Presentation flags for one block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockState {
    pub selected: bool,
    /// Rendering from a tentative interval during a gesture.
    pub dragging: bool,
}

/// Render one event block into `rect`.
pub fn render_event_block(ui: &mut egui::Ui, rect: Rect, event: &Event, state: BlockState) {
    let now = Local::now();
    let is_dimmed = event.completed || event.end < now;

    let base_color = event
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(DEFAULT_BLOCK_COLOR);

    let fill = if is_dimmed {
        Color32::from_rgba_unmultiplied(
            (base_color.r() as f32 * 0.4) as u8,
            (base_color.g() as f32 * 0.4) as u8,
            (base_color.b() as f32 * 0.4) as u8,
            140,
        )
    } else if state.dragging {
        base_color.gamma_multiply(0.85)
    } else {
        base_color
    };

    ui.painter().rect_filled(rect, 2.0, fill);

    if state.selected || state.dragging {
        ui.painter()
            .rect_stroke(rect, 2.0, Stroke::new(1.5, Color32::WHITE));
    }

    // Accent bar on the left edge
    let bar_rect = Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
    ui.painter()
        .rect_filled(bar_rect, 2.0, fill.linear_multiply(0.7));

    let text_color = if is_dimmed {
        Color32::from_rgba_unmultiplied(255, 255, 255, 180)
    } else {
        Color32::WHITE
    };

    let title = if event.is_native() {
        if event.completed {
            format!("✔ {}", event.title)
        } else {
            event.title.clone()
        }
    } else {
        format!("🔒 {}", event.title)
    };

    let text_left = bar_rect.right() + 5.0;
    let available_width = (rect.right() - text_left - 4.0).max(0.0);

    let time_str = format!(
        "{} - {}",
        event.start.format("%H:%M"),
        event.end.format("%H:%M")
    );
    ui.painter().text(
        Pos2::new(text_left, rect.top() + 2.0),
        egui::Align2::LEFT_TOP,
        time_str,
        egui::FontId::proportional(10.0),
        text_color,
    );

    let layout_job = egui::text::LayoutJob::simple(
        title,
        egui::FontId::proportional(13.0),
        text_color,
        available_width,
    );
    let galley = ui.fonts(|f| f.layout_job(layout_job));
    ui.painter().galley(
        Pos2::new(text_left, rect.top() + 14.0),
        galley,
        text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_with_hash() {
        let color = parse_color("#FF5500").unwrap();
        assert_eq!(color, Color32::from_rgb(255, 85, 0));
    }

    #[test]
    fn test_parse_color_without_hash() {
        let color = parse_color("00FF00").unwrap();
        assert_eq!(color, Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert!(parse_color("").is_none());
        assert!(parse_color("FF5").is_none());
        assert!(parse_color("GGGGGG").is_none());
    }
}
