//! Rectangles.

use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use std::ops;

/// A rectangle.
///
/// The y-axis points down, like the window coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a rectangle from its origin and size components.
    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns true if a mouse location is inside the rectangle.
    ///
    /// Mirrors the toolkit rule for pointer hits: in a flipped (y-down) coordinate space the top
    /// edge belongs to the rectangle and the bottom edge doesn’t; in an unflipped space it’s the
    /// other way around. The left edge is always inside and the right edge never is.
    pub fn contains_mouse(&self, point: Point2<f64>, flipped: bool) -> bool {
        if point.x < self.min_x() || point.x >= self.max_x() {
            return false;
        }

        if flipped {
            point.y >= self.min_y() && point.y < self.max_y()
        } else {
            point.y > self.min_y() && point.y <= self.max_y()
        }
    }

    /// Returns a new rectangle inset by the specified amount.
    pub fn inset(&self, horiz: f64, vert: f64) -> Rect {
        Rect {
            origin: (self.origin.x + horiz, self.origin.y + vert).into(),
            size: (self.size.x - 2. * horiz, self.size.y - 2. * vert).into(),
        }
    }

    /// Returns a new rectangle grown by the specified amount on every side.
    pub fn outset(&self, horiz: f64, vert: f64) -> Rect {
        self.inset(-horiz, -vert)
    }
}

impl ops::Add<Point2<f64>> for Rect {
    type Output = Rect;
    fn add(self, point: Point2<f64>) -> Rect {
        Rect {
            origin: self.origin + point.to_vec(),
            size: self.size,
        }
    }
}

impl ops::Sub<Point2<f64>> for Rect {
    type Output = Rect;
    fn sub(self, point: Point2<f64>) -> Rect {
        Rect {
            origin: self.origin - point.to_vec(),
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_edges_depend_on_flippedness() {
        let rect = Rect::from_coords(0., 0., 10., 10.);

        assert!(rect.contains_mouse(Point2::new(5., 0.), true));
        assert!(!rect.contains_mouse(Point2::new(5., 10.), true));

        assert!(!rect.contains_mouse(Point2::new(5., 0.), false));
        assert!(rect.contains_mouse(Point2::new(5., 10.), false));

        assert!(rect.contains_mouse(Point2::new(0., 5.), false));
        assert!(!rect.contains_mouse(Point2::new(10., 5.), true));
    }

    #[test]
    fn outset_grows_every_side() {
        let rect = Rect::from_coords(10., 10., 20., 20.).outset(1., 2.);
        assert_eq!(rect, Rect::from_coords(9., 8., 22., 24.));
    }

    #[test]
    fn translation_round_trips() {
        let rect = Rect::from_coords(1., 2., 3., 4.);
        let p = Point2::new(10., 20.);
        assert_eq!((rect + p) - p, rect);
        assert_eq!(rect + p, Rect::from_coords(11., 22., 3., 4.));
    }
}
