use crate::color::Color;
use crate::rect::Rect;

/// Font weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontWeight {
    Regular,
    Medium,
    Bold,
}

/// A system font style.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Point size.
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    /// The system font at the given size.
    pub fn system(size: f64, weight: FontWeight) -> Font {
        Font { size, weight }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::system(12., FontWeight::Medium)
    }
}

/// One element’s position in a key-view loop, as drawn by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Element frame in overlay space.
    pub frame: Rect,
    /// Zero-based position in the loop.
    pub ordinal: usize,
    pub outline_color: Color,
    pub font: Font,
}

impl Marker {
    /// The label text.
    pub fn title(&self) -> String {
        self.ordinal.to_string()
    }
}
