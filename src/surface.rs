//! Drawing surfaces.
//!
//! The overlay doesn’t rasterize anything itself; it issues a handful of shape and text calls to
//! whatever [`Surface`] the host hands it during a redraw.

use crate::color::Color;
use crate::marker::Font;
use crate::rect::Rect;
use cgmath::Vector2;

/// How a fill combines with what’s already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeOp {
    /// Replaces the destination, alpha included.
    Copy,
    /// Tints the destination instead of covering it.
    Overlay,
}

/// Label text attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttributes {
    pub font: Font,
    pub color: Color,
}

impl TextAttributes {
    pub fn label(font: Font, color: Color) -> TextAttributes {
        TextAttributes { font, color }
    }
}

/// A 2D drawing surface.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color, op: CompositeOp);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    /// Size the text would take up when drawn on a single line.
    fn measure_text(&self, text: &str, attributes: &TextAttributes) -> Vector2<f64>;

    /// Draws a single line of text centered in `rect`, cutting off the end with an ellipsis if
    /// it doesn’t fit.
    fn draw_text(&mut self, text: &str, rect: Rect, attributes: &TextAttributes);
}

/// A draw call recorded by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
        op: CompositeOp,
    },
    Stroke {
        rect: Rect,
        color: Color,
        width: f64,
    },
    Text {
        text: String,
        rect: Rect,
        attributes: TextAttributes,
    },
}

/// A surface that records draw calls instead of drawing.
///
/// Text is measured with fixed metrics: every character is 0.6 em wide and a line is 1.2 em tall.
#[derive(Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the recorded commands and starts over.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::replace(&mut self.commands, Vec::new())
    }
}

impl Surface for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color, op: CompositeOp) {
        self.commands.push(DrawCommand::Fill { rect, color, op });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(DrawCommand::Stroke { rect, color, width });
    }

    fn measure_text(&self, text: &str, attributes: &TextAttributes) -> Vector2<f64> {
        let size = attributes.font.size;
        Vector2::new(text.chars().count() as f64 * size * 0.6, size * 1.2)
    }

    fn draw_text(&mut self, text: &str, rect: Rect, attributes: &TextAttributes) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            rect,
            attributes: attributes.clone(),
        });
    }
}
