//! Drawing the overlay.

use crate::color::Color;
use crate::config::OverlayConfig;
use crate::controller::OverlayState;
use crate::marker::Marker;
use crate::rect::Rect;
use crate::surface::{CompositeOp, Surface, TextAttributes};

/// Paints the overlay state onto a surface.
///
/// Draws nothing unless markers are showing. This only reads the state, so it’s fine to call as
/// often as the host wants to redraw.
pub fn render<S: Surface + ?Sized>(surface: &mut S, state: &OverlayState, config: &OverlayConfig) {
    let highlight_frame = match state.highlight_frame() {
        Some(frame) if state.is_showing() => frame,
        _ => return,
    };

    surface.fill_rect(highlight_frame, config.highlight_color, CompositeOp::Overlay);

    for marker in state.markers() {
        draw_marker(surface, marker, config);
    }
}

fn draw_marker<S: Surface + ?Sized>(surface: &mut S, marker: &Marker, config: &OverlayConfig) {
    let outline = marker
        .frame
        .outset(config.outline_offset, config.outline_offset);
    surface.stroke_rect(outline, marker.outline_color, config.stroke_width);

    let title = marker.title();
    let attributes = TextAttributes::label(marker.font.clone(), marker.outline_color);
    let text_size = surface.measure_text(&title, &attributes);

    // right above the frame, centered over it, and never narrower than the text
    let label_width = text_size.x.max(marker.frame.size.x);
    let label_rect = Rect::from_coords(
        marker.frame.min_x() + (marker.frame.size.x - label_width) / 2.,
        marker.frame.min_y() - config.label_gap - text_size.y,
        label_width,
        text_size.y,
    );
    surface.fill_rect(label_rect, Color::CLEAR, CompositeOp::Copy);
    surface.draw_text(&title, label_rect, &attributes);
}
