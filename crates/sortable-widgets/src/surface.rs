#![forbid(unsafe_code)]

//! Rendering surface capability.
//!
//! The sortable list never touches a concrete scene graph. Everything it
//! needs from the host (geometry reads, sibling-sequence edits, pointer
//! capture, scrolling) goes through [`Surface`]. A browser host maps these onto
//! DOM calls; [`crate::headless::HeadlessSurface`] implements them in memory.
//!
//! # Contract
//!
//! - `children()` is the ordered child sequence of the list root, including
//!   the placeholder and the floating dragged item while a drag is active.
//! - Sequence edits move an existing node: inserting a node that is already a
//!   child first removes it from its old position.
//! - Bounding boxes are in viewport coordinates and reflect the current scroll
//!   offset, so a `scroll_by` is visible on the next geometry read.

use sortable_core::{NodeId, Point, Rect, Size};

/// Visual state of an item while it is being dragged: pinned to its original
/// size and raised above its siblings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStyle {
    pub size: Size,
}

impl DragStyle {
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self { size }
    }
}

/// Host capability the sortable list is written against.
pub trait Surface {
    /// Ordered children of the list root.
    fn children(&self) -> Vec<NodeId>;

    /// Bounding box of a child in viewport coordinates.
    fn bounding_box(&self, node: NodeId) -> Rect;

    /// Bounding box of the list root in viewport coordinates.
    fn container_box(&self) -> Rect;

    /// The visible viewport in viewport coordinates.
    fn viewport(&self) -> Rect;

    /// Scroll the viewport vertically by `dy` pixels (negative scrolls up).
    fn scroll_by(&mut self, dy: f32);

    /// Create a detached, content-free placeholder node of the given size.
    fn create_placeholder(&mut self, size: Size) -> NodeId;

    /// Move `node` so it sits immediately before `reference`.
    fn insert_before(&mut self, node: NodeId, reference: NodeId);

    /// Move `node` so it sits immediately after `reference`.
    fn insert_after(&mut self, node: NodeId, reference: NodeId);

    /// Move `node` to the end of the child sequence.
    fn append(&mut self, node: NodeId);

    /// Put `new` where `old` is and discard `old`.
    fn replace_with(&mut self, old: NodeId, new: NodeId);

    /// Remove and discard a child.
    fn remove(&mut self, node: NodeId);

    /// Apply (`Some`) or clear (`None`) the dragging visual state. Clearing
    /// restores the node's original inline state, including its position.
    fn set_drag_style(&mut self, node: NodeId, style: Option<DragStyle>);

    /// Position a floating node's top-left corner in viewport coordinates.
    fn set_position(&mut self, node: NodeId, origin: Point);

    /// Start receiving pointer move/up events from anywhere, not only over the
    /// list.
    fn capture_pointer(&mut self);

    /// Stop receiving global pointer events.
    fn release_pointer(&mut self);

    /// Detach the list root from its parent.
    fn detach_root(&mut self);

    /// Position of `node` in the child sequence.
    fn index_of(&self, node: NodeId) -> Option<usize> {
        self.children().iter().position(|&child| child == node)
    }
}
