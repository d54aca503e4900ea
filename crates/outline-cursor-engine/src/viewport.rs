//! Keeping the caret's line on screen.

use log::debug;

use crate::dom::NodeId;

/// Height kept clear at the top of the viewport for the floating header.
pub const DEFAULT_FLOATING_OVERLAY_HEIGHT: f64 = 30.0;

/// Vertical extent of a node relative to the top of the viewport, growing
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

pub trait Viewport {
    fn viewport_height(&self) -> f64;

    /// `None` when the node is not laid out.
    fn bounding_box(&self, node: NodeId) -> Option<Rect>;

    /// Positive `dy` scrolls the content up, revealing what is below.
    fn scroll_by(&mut self, dy: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    /// The node reached or crossed the bottom edge.
    BelowFold { dy: f64 },
    /// The node's top was hidden under the floating overlay.
    AboveOverlay { dy: f64 },
}

impl ScrollAction {
    pub fn dy(&self) -> f64 {
        match *self {
            ScrollAction::BelowFold { dy } | ScrollAction::AboveOverlay { dy } => dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPolicy {
    pub floating_overlay_height: f64,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FLOATING_OVERLAY_HEIGHT)
    }
}

impl ViewportPolicy {
    pub fn new(floating_overlay_height: f64) -> Self {
        Self {
            floating_overlay_height,
        }
    }

    /// The single scroll needed to show `rect`, if any. Checks, in order:
    /// crossing the bottom edge, then hiding under the overlay.
    pub fn decide(&self, rect: Rect, viewport_height: f64) -> Option<ScrollAction> {
        let beyond_fold =
            rect.top >= viewport_height || (rect.top < viewport_height && rect.bottom > viewport_height);
        if beyond_fold {
            return Some(ScrollAction::BelowFold {
                dy: rect.bottom - viewport_height,
            });
        }

        if rect.top < self.floating_overlay_height {
            return Some(ScrollAction::AboveOverlay {
                dy: rect.top - self.floating_overlay_height,
            });
        }

        None
    }

    /// Scrolls `viewport` at most once so that `node` is fully visible below
    /// the overlay.
    pub fn ensure_visible<V>(&self, viewport: &mut V, node: NodeId) -> Option<ScrollAction>
    where
        V: Viewport + ?Sized,
    {
        let Some(rect) = viewport.bounding_box(node) else {
            debug!("{node:?} has no layout, not scrolling");
            return None;
        };

        let action = self.decide(rect, viewport.viewport_height())?;
        debug!("scrolling {action:?} to reveal {node:?} at {rect:?}");
        viewport.scroll_by(action.dy());
        Some(action)
    }
}
