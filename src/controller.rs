//! The overlay controller.
//!
//! An [`OverlayController`] is explicitly created and owned by whatever coordinates debugging
//! tools in the application. While enabled, it listens for modifier changes; when the tracked
//! modifiers are held, it finds the element under the pointer, walks its key-view loop, and puts
//! itself on top of the window with one marker per element in the loop.
//!
//! All of this happens synchronously on the thread that calls [`OverlayController::handle`] or
//! [`OverlayController::poll`], which should be the UI thread. A recomputation always replaces the
//! whole marker list before the redraw is requested, so a draw never sees a partial update.

use crate::config::{ConfigError, OverlayConfig};
use crate::element::{ElementId, ElementTree, Host, WindowId};
use crate::events::{FlagsChanged, Notifications, Subscription};
use crate::hit_test::hit_test;
use crate::key_loop::{walk_direction, Direction};
use crate::marker::Marker;
use crate::rect::Rect;
use crate::render;
use crate::surface::Surface;
use core::fmt;
use tracing::debug;

/// What the overlay is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    root: Option<ElementId>,
    markers: Vec<Marker>,
    highlight_frame: Option<Rect>,
}

impl OverlayState {
    /// The element subtree being observed.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Markers in loop order. Empty unless showing.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Frame of the element the loop starts from, in overlay space. Present only while showing.
    pub fn highlight_frame(&self) -> Option<Rect> {
        self.highlight_frame
    }

    pub fn is_showing(&self) -> bool {
        !self.markers.is_empty()
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.highlight_frame = None;
    }
}

/// Controller lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not observing anything.
    Disabled,
    /// Observing, but nothing is shown.
    Idle,
    /// Markers are populated and the overlay is in the window.
    Showing,
}

/// The key-view loop overlay.
pub struct OverlayController {
    /// The overlay’s own element in the host tree.
    id: ElementId,
    config: OverlayConfig,
    state: OverlayState,
    subscription: Option<Subscription>,
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("state", &self.state)
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        OverlayController::new()
    }
}

impl OverlayController {
    /// Creates a disabled overlay with the default configuration.
    pub fn new() -> OverlayController {
        OverlayController {
            id: ElementId::new(),
            config: OverlayConfig::default(),
            state: OverlayState::default(),
            subscription: None,
        }
    }

    /// Creates a disabled overlay with a custom configuration.
    pub fn with_config(config: OverlayConfig) -> Result<OverlayController, ConfigError> {
        config.validate()?;
        Ok(OverlayController {
            config,
            ..OverlayController::new()
        })
    }

    /// The element id the overlay uses in the host tree.
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.root.is_none() {
            Phase::Disabled
        } else if self.state.is_showing() {
            Phase::Showing
        } else {
            Phase::Idle
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.root.is_some()
    }

    /// Starts observing `root` and subscribes to modifier changes.
    ///
    /// Enabling again replaces the root and the subscription.
    pub fn enable(&mut self, root: ElementId, notifications: &Notifications) {
        debug!(?root, "enabling key-view loop overlay");
        self.state.root = Some(root);
        self.subscription = Some(notifications.subscribe());
    }

    /// Stops observing, hides the overlay, and unsubscribes. Does nothing if already disabled.
    pub fn disable<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.is_enabled() {
            debug!("disabling key-view loop overlay");
        }
        self.state.root = None;
        self.clear(host);
        self.subscription = None;
    }

    /// Handles every notification that arrived since the last poll.
    ///
    /// Returns how many were handled.
    pub fn poll<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        let events: Vec<FlagsChanged> = match &self.subscription {
            Some(subscription) => subscription.try_iter().collect(),
            None => return 0,
        };

        for event in &events {
            self.handle(host, event);
        }
        events.len()
    }

    /// Handles one modifier change and returns the resulting phase.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, event: &FlagsChanged) -> Phase {
        let root = match self.state.root {
            Some(root) => root,
            None => return Phase::Disabled,
        };

        let modifiers = event.modifiers;
        if !modifiers.intersects(self.config.trigger_mask) {
            self.clear(host);
            return self.phase();
        }

        let direction = if modifiers.intersects(self.config.forward_modifier) {
            Direction::Forward
        } else if modifiers.intersects(self.config.backward_modifier) {
            Direction::Backward
        } else {
            debug!(?modifiers, "no direction modifier held");
            return self.phase();
        };

        let window = match host.window_of(root) {
            Some(window) => window,
            None => {
                debug!(?root, "root element is not in a window");
                return self.phase();
            }
        };
        let pointer = match host.mouse_location(window) {
            Some(pointer) => pointer,
            None => {
                debug!(?window, "window has no pointer location");
                return self.phase();
            }
        };

        let start = hit_test(&*host, pointer, root, self.id);
        self.show_loop(host, window, start, direction)
    }

    /// Draws the overlay.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        render::render(surface, &self.state, &self.config);
    }

    fn show_loop<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        window: WindowId,
        start: ElementId,
        direction: Direction,
    ) -> Phase {
        let content_view = match host.content_view(window) {
            Some(content_view) => content_view,
            None => {
                debug!(?window, "window has no content view");
                return self.phase();
            }
        };
        self.insert_into_window(host, content_view);

        let highlight_frame = match self.frame_in_overlay(&*host, start) {
            Some(frame) => frame,
            None => {
                debug!(?start, "start element has no frame");
                self.clear(host);
                return self.phase();
            }
        };

        let markers: Vec<Marker> = walk_direction(&*host, start, direction)
            .into_iter()
            .filter_map(|id| self.frame_in_overlay(&*host, id))
            .enumerate()
            .map(|(ordinal, frame)| Marker {
                frame,
                ordinal,
                outline_color: self.config.outline_color,
                font: self.config.font.clone(),
            })
            .collect();

        debug!(?start, ?direction, len = markers.len(), "showing key-view loop");
        self.state.markers = markers;
        self.state.highlight_frame = Some(highlight_frame);
        host.set_needs_display(self.id);
        Phase::Showing
    }

    /// Hides the overlay. The root stays as it is.
    fn clear<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state.is_showing() {
            debug!("hiding key-view loop overlay");
        }
        self.state.clear_markers();
        if host.superview(self.id).is_some() {
            host.remove_from_superview(self.id);
        }
    }

    /// Puts the overlay on top of everything else in the window, covering the content area.
    fn insert_into_window<H: Host + ?Sized>(&mut self, host: &mut H, content_view: ElementId) {
        if host.superview(self.id).is_some() {
            host.remove_from_superview(self.id);
        }
        let frame = host.bounds(content_view).unwrap_or_else(Rect::zero);
        host.add_subview_topmost(content_view, self.id, frame);
    }

    /// Converts an element’s bounds into overlay space.
    fn frame_in_overlay<T: ElementTree + ?Sized>(&self, tree: &T, id: ElementId) -> Option<Rect> {
        let bounds = tree.bounds(id)?;
        let in_window = tree.convert_rect_to_window(id, bounds)?;
        tree.convert_rect_from_window(self.id, in_window)
    }
}
