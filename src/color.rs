/// An RGBA color with components in 0–1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Fully transparent.
    pub const CLEAR: Color = Color::rgba(0., 0., 0., 0.);

    pub const BLUE: Color = Color::rgba(0., 0., 1., 1.);

    /// Translucent red used to tint the element the loop starts from.
    pub const HIGHLIGHT: Color = Color::rgba(1., 0., 0., 0.35);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }
}
