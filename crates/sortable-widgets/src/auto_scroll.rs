#![forbid(unsafe_code)]

//! Edge auto-scroll while dragging.
//!
//! When the pointer comes within `edge_threshold` pixels of the top or bottom
//! of the viewport, the viewport scrolls by a fixed `step` per move event. No
//! acceleration, no smoothing. Scrolling only changes what later geometry
//! reads return; it never touches the placeholder itself.

use sortable_core::Rect;

use crate::surface::Surface;

/// Default distance from a viewport edge that triggers scrolling.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 20.0;

/// Default scroll distance per move event.
pub const DEFAULT_SCROLL_STEP: f32 = 10.0;

/// Fixed-step edge scroller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScroll {
    /// Distance in pixels from a viewport edge that activates scrolling.
    pub edge_threshold: f32,
    /// Pixels scrolled per qualifying move event.
    pub step: f32,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            step: DEFAULT_SCROLL_STEP,
        }
    }
}

impl AutoScroll {
    #[must_use]
    pub const fn new(edge_threshold: f32, step: f32) -> Self {
        Self {
            edge_threshold,
            step,
        }
    }

    /// Scroll delta for a pointer at `pointer_y`, or `None` outside both edge
    /// bands.
    #[must_use]
    pub fn delta(&self, pointer_y: f32, viewport: Rect) -> Option<f32> {
        if pointer_y < viewport.top() + self.edge_threshold {
            Some(-self.step)
        } else if pointer_y > viewport.bottom() - self.edge_threshold {
            Some(self.step)
        } else {
            None
        }
    }

    /// Scroll `surface` if the pointer is in an edge band. Returns the delta
    /// that was requested.
    pub fn maybe_scroll<S: Surface + ?Sized>(&self, surface: &mut S, pointer_y: f32) -> Option<f32> {
        let dy = self.delta(pointer_y, surface.viewport())?;
        #[cfg(feature = "tracing")]
        tracing::trace!(pointer_y, dy, "sortable auto-scroll");
        surface.scroll_by(dy);
        Some(dy)
    }
}
