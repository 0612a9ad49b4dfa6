//! An in-memory host.
//!
//! [`MemoryTree`] implements [`Host`] without any native toolkit behind it. It’s what the tests
//! drive the overlay with, and it’s handy for embedding the overlay in a renderer that keeps its
//! own element tree.

use crate::element::{ElementId, ElementTree, Host, WindowId};
use crate::rect::Rect;
use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use core::fmt;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Errors that may occur when building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    NoSuchElement(ElementId),
    NoSuchWindow(WindowId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeError::NoSuchElement(id) => write!(f, "no such element: {:?}", id),
            TreeError::NoSuchWindow(id) => write!(f, "no such window: {:?}", id),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug)]
struct Node {
    frame: Rect,
    flipped: bool,
    superview: Option<ElementId>,
    /// Back-to-front, like the toolkit stores them.
    subviews: Vec<ElementId>,
    /// Set on content views only.
    window: Option<WindowId>,
    next_key_view: Option<ElementId>,
    previous_key_view: Option<ElementId>,
}

impl Node {
    fn new(frame: Rect, superview: Option<ElementId>) -> Node {
        Node {
            frame,
            flipped: true,
            superview,
            subviews: Vec::new(),
            window: None,
            next_key_view: None,
            previous_key_view: None,
        }
    }
}

#[derive(Debug)]
struct Window {
    content_view: ElementId,
    mouse_location: Point2<f64>,
}

/// A tree of elements living in windows.
///
/// All coordinate spaces are y-down and element bounds always sit at the origin, so conversions
/// between spaces are pure translations.
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: HashMap<ElementId, Node>,
    windows: HashMap<WindowId, Window>,
    next_window: u32,
    needs_display: HashSet<ElementId>,
}

impl MemoryTree {
    pub fn new() -> MemoryTree {
        MemoryTree::default()
    }

    /// Creates a window and returns it along with its content view.
    ///
    /// `content_frame` is the content area in window space.
    pub fn add_window(&mut self, content_frame: Rect) -> (WindowId, ElementId) {
        let window = WindowId(self.next_window);
        self.next_window += 1;

        let content_view = ElementId::new();
        let mut node = Node::new(content_frame, None);
        node.window = Some(window);
        self.nodes.insert(content_view, node);
        self.windows.insert(
            window,
            Window {
                content_view,
                mouse_location: Point2::new(0., 0.),
            },
        );

        (window, content_view)
    }

    /// Creates a detached element that isn’t part of any window.
    pub fn add_detached(&mut self, frame: Rect) -> ElementId {
        let id = ElementId::new();
        self.nodes.insert(id, Node::new(frame, None));
        id
    }

    /// Creates an element as the top-most subview of `parent`.
    pub fn add_element(&mut self, parent: ElementId, frame: Rect) -> Result<ElementId, TreeError> {
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(TreeError::NoSuchElement(parent))?;

        let id = ElementId::new();
        parent_node.subviews.push(id);
        self.nodes.insert(id, Node::new(frame, Some(parent)));
        Ok(id)
    }

    /// Removes an element and all of its descendants.
    pub fn remove(&mut self, id: ElementId) -> Result<(), TreeError> {
        self.detach(id);
        self.remove_subtree(id)
    }

    fn remove_subtree(&mut self, id: ElementId) -> Result<(), TreeError> {
        let node = self.nodes.remove(&id).ok_or(TreeError::NoSuchElement(id))?;
        self.needs_display.remove(&id);
        for subview in node.subviews {
            self.remove_subtree(subview)?;
        }
        Ok(())
    }

    fn detach(&mut self, id: ElementId) {
        let superview = match self.nodes.get_mut(&id) {
            Some(node) => node.superview.take(),
            None => return,
        };
        if let Some(superview) = superview.and_then(|id| self.nodes.get_mut(&id)) {
            superview.subviews.retain(|subview| *subview != id);
        }
    }

    /// Links `id` forward to `next`, and `next` backward to `id`.
    pub fn set_next_key_view(&mut self, id: ElementId, next: ElementId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(&next) {
            return Err(TreeError::NoSuchElement(next));
        }
        self.node_mut(id)?.next_key_view = Some(next);
        self.node_mut(next)?.previous_key_view = Some(id);
        Ok(())
    }

    /// Links `id` backward to `previous` without touching `previous` itself.
    pub fn set_previous_key_view(
        &mut self,
        id: ElementId,
        previous: ElementId,
    ) -> Result<(), TreeError> {
        self.node_mut(id)?.previous_key_view = Some(previous);
        Ok(())
    }

    /// Links the given elements into a closed loop, in order.
    pub fn link_loop(&mut self, elements: &[ElementId]) -> Result<(), TreeError> {
        for (i, id) in elements.iter().enumerate() {
            let next = elements[(i + 1) % elements.len()];
            self.set_next_key_view(*id, next)?;
        }
        Ok(())
    }

    pub fn set_flipped(&mut self, id: ElementId, flipped: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.flipped = flipped;
        Ok(())
    }

    pub fn set_frame(&mut self, id: ElementId, frame: Rect) -> Result<(), TreeError> {
        self.node_mut(id)?.frame = frame;
        Ok(())
    }

    /// Moves the pointer, in window space.
    pub fn set_mouse_location(
        &mut self,
        window: WindowId,
        location: Point2<f64>,
    ) -> Result<(), TreeError> {
        let window_state = self
            .windows
            .get_mut(&window)
            .ok_or(TreeError::NoSuchWindow(window))?;
        window_state.mouse_location = location;
        Ok(())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Subviews back-to-front; the last one is drawn on top.
    pub fn subviews(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(&id)
            .map(|node| &node.subviews[..])
            .unwrap_or(&[])
    }

    pub fn needs_display(&self, id: ElementId) -> bool {
        self.needs_display.contains(&id)
    }

    /// Clears the redraw flag, as a display pass would; returns whether it was set.
    pub fn take_needs_display(&mut self, id: ElementId) -> bool {
        self.needs_display.remove(&id)
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::NoSuchElement(id))
    }

    /// The element at the top of `id`’s superview chain.
    fn top_level(&self, id: ElementId) -> Option<ElementId> {
        let mut current = id;
        // bounded in case the superview links were corrupted into a cycle
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(&current)?.superview {
                Some(superview) => current = superview,
                None => return Some(current),
            }
        }
        None
    }

    /// Origin of the element’s space, expressed in window space.
    fn window_offset(&self, id: ElementId) -> Option<Vector2<f64>> {
        let mut offset = Vector2::zero();
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(id) = current {
            if steps > self.nodes.len() {
                return None;
            }
            let node = self.nodes.get(&id)?;
            offset += node.frame.origin.to_vec();
            current = node.superview;
            steps += 1;
        }
        Some(offset)
    }
}

impl ElementTree for MemoryTree {
    fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.subviews(id).iter().rev().copied().collect()
    }

    fn superview(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(&id)?.superview
    }

    fn frame(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.frame)
    }

    fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.nodes
            .get(&id)
            .map(|node| Rect::new(Point2::new(0., 0.), node.frame.size))
    }

    fn is_flipped(&self, id: ElementId) -> bool {
        self.nodes.get(&id).map_or(true, |node| node.flipped)
    }

    fn convert_point_from_window(&self, id: ElementId, point: Point2<f64>) -> Option<Point2<f64>> {
        Some(point - self.window_offset(id)?)
    }

    fn convert_rect_to_window(&self, id: ElementId, rect: Rect) -> Option<Rect> {
        Some(rect + Point2::from_vec(self.window_offset(id)?))
    }

    fn convert_rect_from_window(&self, id: ElementId, rect: Rect) -> Option<Rect> {
        Some(rect - Point2::from_vec(self.window_offset(id)?))
    }

    fn next_key_view(&self, id: ElementId) -> Option<ElementId> {
        self.nodes
            .get(&id)?
            .next_key_view
            .filter(|next| self.nodes.contains_key(next))
    }

    fn previous_key_view(&self, id: ElementId) -> Option<ElementId> {
        self.nodes
            .get(&id)?
            .previous_key_view
            .filter(|previous| self.nodes.contains_key(previous))
    }
}

impl Host for MemoryTree {
    fn window_of(&self, id: ElementId) -> Option<WindowId> {
        let top = self.top_level(id)?;
        self.nodes.get(&top)?.window
    }

    fn content_view(&self, window: WindowId) -> Option<ElementId> {
        self.windows.get(&window).map(|window| window.content_view)
    }

    fn mouse_location(&self, window: WindowId) -> Option<Point2<f64>> {
        self.windows.get(&window).map(|window| window.mouse_location)
    }

    fn add_subview_topmost(&mut self, parent: ElementId, child: ElementId, frame: Rect) {
        if !self.nodes.contains_key(&parent) || parent == child {
            debug!(?parent, ?child, "cannot add subview to missing parent");
            return;
        }

        self.detach(child);
        let node = self
            .nodes
            .entry(child)
            .or_insert_with(|| Node::new(frame, None));
        node.frame = frame;
        node.superview = Some(parent);

        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.subviews.push(child);
        }
    }

    fn remove_from_superview(&mut self, id: ElementId) {
        self.detach(id);
    }

    fn set_needs_display(&mut self, id: ElementId) {
        if self.nodes.contains_key(&id) {
            self.needs_display.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_front_most_first() {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 100., 100.));
        let back = tree.add_element(content, Rect::from_coords(0., 0., 10., 10.)).unwrap();
        let front = tree.add_element(content, Rect::from_coords(0., 0., 10., 10.)).unwrap();

        assert_eq!(tree.subviews(content), &[back, front]);
        assert_eq!(tree.children(content), vec![front, back]);
    }

    #[test]
    fn conversions_compose_frame_origins() {
        let mut tree = MemoryTree::new();
        let (window, content) = tree.add_window(Rect::from_coords(0., 20., 200., 200.));
        let outer = tree.add_element(content, Rect::from_coords(10., 10., 100., 100.)).unwrap();
        let inner = tree.add_element(outer, Rect::from_coords(5., 5., 20., 20.)).unwrap();

        assert_eq!(
            tree.convert_point_from_window(inner, Point2::new(20., 40.)),
            Some(Point2::new(5., 5.))
        );
        assert_eq!(
            tree.convert_rect_to_window(inner, tree.bounds(inner).unwrap()),
            Some(Rect::from_coords(15., 35., 20., 20.))
        );
        assert_eq!(tree.window_of(inner), Some(window));
    }

    #[test]
    fn next_key_view_sets_previous_on_target() {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 100., 100.));
        let a = tree.add_element(content, Rect::zero()).unwrap();
        let b = tree.add_element(content, Rect::zero()).unwrap();
        tree.set_next_key_view(a, b).unwrap();

        assert_eq!(tree.next_key_view(a), Some(b));
        assert_eq!(tree.previous_key_view(b), Some(a));
        assert_eq!(tree.next_key_view(b), None);
    }

    #[test]
    fn removed_targets_are_dangling() {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 100., 100.));
        let a = tree.add_element(content, Rect::zero()).unwrap();
        let b = tree.add_element(content, Rect::zero()).unwrap();
        let c = tree.add_element(b, Rect::zero()).unwrap();
        tree.set_next_key_view(a, c).unwrap();

        tree.remove(b).unwrap();

        assert!(!tree.contains(c));
        assert_eq!(tree.next_key_view(a), None);
        assert_eq!(tree.subviews(content), &[a]);
        assert_eq!(tree.remove(b), Err(TreeError::NoSuchElement(b)));
    }

    #[test]
    fn moving_an_element_moves_its_descendants() {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 200., 200.));
        let outer = tree.add_element(content, Rect::from_coords(10., 10., 100., 100.)).unwrap();
        let inner = tree.add_element(outer, Rect::from_coords(5., 5., 20., 20.)).unwrap();

        tree.set_frame(outer, Rect::from_coords(50., 60., 100., 100.)).unwrap();

        assert_eq!(
            tree.convert_rect_to_window(inner, tree.bounds(inner).unwrap()),
            Some(Rect::from_coords(55., 65., 20., 20.))
        );
        let gone = ElementId::new();
        assert_eq!(tree.set_frame(gone, Rect::zero()), Err(TreeError::NoSuchElement(gone)));
    }

    #[test]
    fn redraw_requests_are_taken_once() {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 100., 100.));
        assert!(!tree.needs_display(content));

        tree.set_needs_display(content);
        assert!(tree.needs_display(content));
        assert!(tree.take_needs_display(content));
        assert!(!tree.take_needs_display(content));

        tree.set_needs_display(ElementId::new());
        assert!(tree.needs_display.is_empty(), "unknown elements can't be marked");
    }

    #[test]
    fn detached_elements_have_no_window() {
        let mut tree = MemoryTree::new();
        let lonely = tree.add_detached(Rect::from_coords(0., 0., 10., 10.));
        assert_eq!(tree.window_of(lonely), None);
    }

    #[test]
    fn adding_existing_subview_moves_it_to_the_top() {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 100., 100.));
        let overlay = ElementId::new();
        tree.add_subview_topmost(content, overlay, Rect::zero());
        let other = tree.add_element(content, Rect::zero()).unwrap();
        assert_eq!(tree.subviews(content), &[overlay, other]);

        tree.add_subview_topmost(content, overlay, Rect::from_coords(0., 0., 5., 5.));
        assert_eq!(tree.subviews(content), &[other, overlay]);
        assert_eq!(tree.frame(overlay), Some(Rect::from_coords(0., 0., 5., 5.)));

        tree.remove_from_superview(overlay);
        assert_eq!(tree.subviews(content), &[other]);
        assert_eq!(tree.superview(overlay), None);
    }
}
