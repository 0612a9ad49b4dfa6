//! Finding the element under the pointer.

use crate::element::{ElementId, ElementTree};
use cgmath::Point2;
use std::collections::HashSet;
use tracing::{trace, warn};

/// Returns the most deeply nested element under `pointer`, starting from `root`.
///
/// `pointer` is in window space. At every level the first child (in [`ElementTree::children`]
/// order) whose frame contains the pointer is descended into; `exclude` is never considered, so
/// an overlay can’t hit itself. If no child is hit, the current element is the result, which means
/// this always returns at least `root`, even when the pointer is outside of it.
pub fn hit_test<T: ElementTree + ?Sized>(
    tree: &T,
    pointer: Point2<f64>,
    root: ElementId,
    exclude: ElementId,
) -> ElementId {
    let mut hit = root;
    let mut visited = HashSet::new();
    visited.insert(root);

    loop {
        let location = match tree.convert_point_from_window(hit, pointer) {
            Some(location) => location,
            None => break,
        };
        let flipped = tree.is_flipped(hit);

        let subview = tree.children(hit).into_iter().find(|child| {
            *child != exclude
                && tree
                    .frame(*child)
                    .map_or(false, |frame| frame.contains_mouse(location, flipped))
        });

        match subview {
            Some(subview) => {
                if !visited.insert(subview) {
                    warn!(?subview, "element tree contains a cycle; stopping hit test");
                    break;
                }
                trace!(?subview, x = location.x, y = location.y, "hit subview");
                hit = subview;
            }
            None => break,
        }
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Host;
    use crate::rect::Rect;
    use crate::tree::MemoryTree;
    use proptest::prelude::*;

    fn window() -> (MemoryTree, ElementId) {
        let mut tree = MemoryTree::new();
        let (_, content) = tree.add_window(Rect::from_coords(0., 0., 400., 300.));
        (tree, content)
    }

    #[test]
    fn descends_to_deepest_element() {
        let (mut tree, content) = window();
        let panel = tree.add_element(content, Rect::from_coords(50., 50., 200., 100.)).unwrap();
        let button = tree.add_element(panel, Rect::from_coords(10., 10., 80., 20.)).unwrap();

        assert_eq!(hit_test(&tree, Point2::new(70., 70.), content, ElementId::new()), button);
        assert_eq!(hit_test(&tree, Point2::new(200., 120.), content, ElementId::new()), panel);
        assert_eq!(hit_test(&tree, Point2::new(10., 10.), content, ElementId::new()), content);
    }

    #[test]
    fn pointer_outside_root_returns_root() {
        let (mut tree, content) = window();
        tree.add_element(content, Rect::from_coords(0., 0., 10., 10.)).unwrap();
        assert_eq!(hit_test(&tree, Point2::new(-50., 900.), content, ElementId::new()), content);
    }

    #[test]
    fn front_most_sibling_wins() {
        let (mut tree, content) = window();
        let frame = Rect::from_coords(0., 0., 100., 100.);
        let _back = tree.add_element(content, frame).unwrap();
        let front = tree.add_element(content, frame).unwrap();
        assert_eq!(hit_test(&tree, Point2::new(5., 5.), content, ElementId::new()), front);
    }

    #[test]
    fn never_hits_excluded_element() {
        let (mut tree, content) = window();
        let below = tree.add_element(content, Rect::from_coords(0., 0., 100., 100.)).unwrap();
        let overlay = ElementId::new();
        tree.add_subview_topmost(content, overlay, Rect::from_coords(0., 0., 400., 300.));

        assert_eq!(hit_test(&tree, Point2::new(5., 5.), content, overlay), below);
        assert_eq!(hit_test(&tree, Point2::new(300., 250.), content, overlay), content);
    }

    #[test]
    fn child_frames_use_parent_flippedness() {
        let (mut tree, content) = window();
        let child = tree.add_element(content, Rect::from_coords(0., 0., 100., 100.)).unwrap();

        assert_eq!(hit_test(&tree, Point2::new(5., 0.), content, ElementId::new()), child);
        tree.set_flipped(content, false).unwrap();
        assert_eq!(hit_test(&tree, Point2::new(5., 0.), content, ElementId::new()), content);
        assert_eq!(hit_test(&tree, Point2::new(5., 100.), content, ElementId::new()), child);
    }

    proptest! {
        #[test]
        fn leaf_is_returned_anywhere(x in -1000.0..1000.0f64, y in -1000.0..1000.0f64) {
            let (mut tree, content) = window();
            let leaf = tree.add_element(content, Rect::from_coords(10., 10., 30., 30.)).unwrap();
            prop_assert_eq!(hit_test(&tree, Point2::new(x, y), leaf, ElementId::new()), leaf);
        }

        #[test]
        fn excluded_element_is_never_returned(x in 0.0..400.0f64, y in 0.0..300.0f64) {
            let (mut tree, content) = window();
            let overlay = tree.add_element(content, Rect::from_coords(0., 0., 400., 300.)).unwrap();
            tree.add_element(overlay, Rect::from_coords(0., 0., 400., 300.)).unwrap();
            prop_assert_eq!(hit_test(&tree, Point2::new(x, y), content, overlay), content);
        }
    }
}
