//! Walking key-view loops.
//!
//! Key-view links usually form a closed loop over every focusable element, but nothing stops a
//! host from producing chains that dead-end, loop back halfway, or point at themselves. Walks end
//! at the first element without a link or at the first element that has already been visited,
//! so every walk terminates after at most one visit per element.

use crate::element::{ElementId, ElementTree};
use core::fmt;
use std::collections::HashSet;

/// Which way to walk a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follows next-key-view links.
    Forward,
    /// Follows previous-key-view links.
    Backward,
}

impl Direction {
    /// Follows one link in this direction.
    pub fn step<T: ElementTree + ?Sized>(self, tree: &T, id: ElementId) -> Option<ElementId> {
        match self {
            Direction::Forward => tree.next_key_view(id),
            Direction::Backward => tree.previous_key_view(id),
        }
    }
}

/// Errors that may occur when walking a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkError {
    /// There was no element to start from.
    MissingStart,
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalkError::MissingStart => write!(f, "cannot walk a key-view loop without a start element"),
        }
    }
}

impl std::error::Error for WalkError {}

/// A lazy walk along a key-view loop.
///
/// Yields the start element first, then every element reachable through `step` until the chain
/// ends or comes back to an element it already yielded.
pub struct KeyLoop<F> {
    pending: Option<ElementId>,
    visited: HashSet<ElementId>,
    step: F,
}

impl<F> KeyLoop<F>
where
    F: FnMut(ElementId) -> Option<ElementId>,
{
    pub fn new(start: ElementId, step: F) -> Self {
        KeyLoop {
            pending: Some(start),
            visited: HashSet::new(),
            step,
        }
    }
}

impl<F> Iterator for KeyLoop<F>
where
    F: FnMut(ElementId) -> Option<ElementId>,
{
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.pending.take()?;
        self.visited.insert(current);
        self.pending = (self.step)(current).filter(|next| !self.visited.contains(next));
        Some(current)
    }
}

impl<F> fmt::Debug for KeyLoop<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyLoop")
            .field("pending", &self.pending)
            .field("visited", &self.visited.len())
            .finish()
    }
}

/// Collects a whole loop, in visiting order.
pub fn walk<F>(start: Option<ElementId>, step: F) -> Result<Vec<ElementId>, WalkError>
where
    F: FnMut(ElementId) -> Option<ElementId>,
{
    let start = start.ok_or(WalkError::MissingStart)?;
    Ok(KeyLoop::new(start, step).collect())
}

/// Collects the loop through `start` in the given direction.
pub fn walk_direction<T: ElementTree + ?Sized>(
    tree: &T,
    start: ElementId,
    direction: Direction,
) -> Vec<ElementId> {
    KeyLoop::new(start, |id| direction.step(tree, id)).collect()
}
