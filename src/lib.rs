//! Key-view loop debugging overlay.
//!
//! # Conceptual overview
//! Every window has a key-view loop: the chain of elements keyboard focus moves through when the
//! user tabs forward or backward. Loops are easy to get wrong and hard to see, so this overlay
//! draws them. Hold option with the pointer over an element and the overlay outlines every
//! element in its forward loop, numbered in tabbing order; hold shift for the backward loop.
//! Letting go of the modifiers hides it again.
//!
//! ## Host
//! The overlay doesn’t know about any particular UI toolkit. It talks to the host through two
//! traits: [`ElementTree`] for reading the element tree (children, frames, coordinate
//! conversions, key-view links) and [`Host`] for the few window-level operations it needs
//! (pointer location, inserting and removing its own element, requesting a redraw).
//! [`MemoryTree`] is a complete in-memory host.
//!
//! Elements are identified by [`ElementId`]s and are never owned by the overlay. Key-view links
//! are weak lookups; a link to an element that no longer exists simply ends the loop.
//!
//! ## Flow
//! ```text
//!   Notifications::post(FlagsChanged)
//!       │
//!       ▼
//!   OverlayController::poll / handle
//!       │
//!       ├─► hit_test(pointer, root, overlay) ──► start element
//!       │
//!       ├─► KeyLoop(start, next | previous) ──► elements in loop order
//!       │
//!       ▼
//!   OverlayState { markers, highlight_frame } ──► set_needs_display
//!       │
//!       ▼
//!   OverlayController::draw ──► render ──► Surface
//! ```
//!
//! ## Threading
//! Everything runs synchronously on whichever thread drives the controller, which should be the
//! UI thread. Notifications may be posted from anywhere; they’re queued until the next `poll`, and
//! an overlay that isn’t polled for a while only keeps the most recent ones.
//!
//! ## Coordinate System
//! Like the windows it draws on, the overlay uses a top-left origin with positive y pointing down.

pub mod color;
pub mod config;
pub mod controller;
pub mod element;
pub mod events;
pub mod hit_test;
pub mod key_loop;
pub mod marker;
mod rect;
pub mod render;
pub mod surface;
mod tree;

pub use color::Color;
pub use config::{ConfigError, OverlayConfig};
pub use controller::{OverlayController, OverlayState, Phase};
pub use element::{ElementId, ElementTree, Host, WindowId};
pub use events::{FlagsChanged, ModifierFlags, Notifications, Subscription};
pub use hit_test::hit_test;
pub use key_loop::{walk, walk_direction, Direction, KeyLoop, WalkError};
pub use marker::{Font, FontWeight, Marker};
pub use rect::Rect;
pub use surface::{Recorder, Surface};
pub use tree::{MemoryTree, TreeError};
