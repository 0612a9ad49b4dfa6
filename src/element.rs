//! The host-facing element model.
//!
//! The overlay never owns elements. Everything it knows about the host’s view tree comes through
//! the queries on [`ElementTree`], and everything it does to the window goes through [`Host`].

use crate::rect::Rect;
use cgmath::Point2;
use uuid::Uuid;

/// A unique identifier for an element.
///
/// (this is just a UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Creates a new, never-before-seen identifier.
    pub fn new() -> ElementId {
        ElementId(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        ElementId::new()
    }
}

/// Identifies a window in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u32);

/// Read-only access to the host’s element tree.
///
/// Every query takes an id that may have gone stale since it was obtained; implementations return
/// `None` in that case instead of panicking. Key-view links in particular are weak: a link whose
/// target has been removed resolves to `None`.
pub trait ElementTree {
    /// Child elements, front-most first.
    ///
    /// The hit tester picks the first child that contains the pointer, so a host that stores its
    /// children back-to-front must reverse them here.
    fn children(&self, id: ElementId) -> Vec<ElementId>;

    /// The element containing this one.
    fn superview(&self, id: ElementId) -> Option<ElementId>;

    /// Frame in the superview’s coordinate space.
    fn frame(&self, id: ElementId) -> Option<Rect>;

    /// Bounds in the element’s own coordinate space.
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    /// Whether the element’s coordinate space has the y-axis pointing down.
    fn is_flipped(&self, id: ElementId) -> bool;

    /// Converts a point from window space into the element’s space.
    fn convert_point_from_window(&self, id: ElementId, point: Point2<f64>) -> Option<Point2<f64>>;

    /// Converts a rectangle from the element’s space into window space.
    fn convert_rect_to_window(&self, id: ElementId, rect: Rect) -> Option<Rect>;

    /// Converts a rectangle from window space into the element’s space.
    fn convert_rect_from_window(&self, id: ElementId, rect: Rect) -> Option<Rect>;

    /// The element focus moves to when tabbing forward.
    fn next_key_view(&self, id: ElementId) -> Option<ElementId>;

    /// The element focus moves to when tabbing backward.
    fn previous_key_view(&self, id: ElementId) -> Option<ElementId>;
}

/// Window-level capabilities of the host framework.
pub trait Host: ElementTree {
    /// The window an element is currently shown in.
    fn window_of(&self, id: ElementId) -> Option<WindowId>;

    /// The top-level element of a window’s content area.
    fn content_view(&self, window: WindowId) -> Option<ElementId>;

    /// The current pointer location in window space.
    ///
    /// This is read at the time of the call, not taken from any event.
    fn mouse_location(&self, window: WindowId) -> Option<Point2<f64>>;

    /// Adds `child` as the top-most subview of `parent` with the given frame.
    ///
    /// The host creates the element if it doesn’t know `child` yet.
    fn add_subview_topmost(&mut self, parent: ElementId, child: ElementId, frame: Rect);

    /// Detaches an element from its superview. Does nothing if it has none.
    fn remove_from_superview(&mut self, id: ElementId);

    /// Marks an element as needing a redraw.
    fn set_needs_display(&mut self, id: ElementId);
}
