#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! # Design Notes
//!
//! - Coordinates are viewport (client) pixels, matching [`crate::geometry`].
//! - Hosts resolve the originating target of a pointer-down themselves and
//!   report it as a [`HitTarget`]: the owning list item plus the marker region
//!   that was hit. Grab and delete are variants of one enum, so a single event
//!   can never carry both.

use crate::geometry::Point;

/// Marker attribute identifying a grab handle inside an item.
pub const GRAB_HANDLE_ATTRIBUTE: &str = "data-grab-handle";

/// Marker attribute identifying a delete handle inside an item.
pub const DELETE_HANDLE_ATTRIBUTE: &str = "data-delete-handle";

/// Stable identity of a visual node owned by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Left mouse button, pen contact, or primary touch.
    #[default]
    Primary,

    /// Right mouse button.
    Secondary,

    /// Middle mouse button (scroll wheel click).
    Auxiliary,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Pointer moved.
    Move,

    /// Button released.
    Up(PointerButton),
}

/// Which marked region of an item the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    /// Region carrying [`GRAB_HANDLE_ATTRIBUTE`].
    GrabHandle,

    /// Region carrying [`DELETE_HANDLE_ATTRIBUTE`].
    DeleteHandle,

    /// Anywhere else inside the item.
    #[default]
    Content,
}

impl Marker {
    /// Resolve a marker from the attribute name found on the closest marked
    /// ancestor of the event target.
    pub fn from_attribute(name: &str) -> Self {
        match name {
            GRAB_HANDLE_ATTRIBUTE => Self::GrabHandle,
            DELETE_HANDLE_ATTRIBUTE => Self::DeleteHandle,
            _ => Self::Content,
        }
    }
}

/// Originating target of a pointer event, resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitTarget {
    /// The list item that contains the hit region.
    pub node: NodeId,
    pub marker: Marker,
}

impl HitTarget {
    #[must_use]
    pub const fn new(node: NodeId, marker: Marker) -> Self {
        Self { node, marker }
    }

    #[must_use]
    pub const fn grab(node: NodeId) -> Self {
        Self::new(node, Marker::GrabHandle)
    }

    #[must_use]
    pub const fn delete(node: NodeId) -> Self {
        Self::new(node, Marker::DeleteHandle)
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate in viewport pixels.
    pub x: f32,

    /// Y coordinate in viewport pixels.
    pub y: f32,

    /// Originating target, when the event started inside a list item.
    pub target: Option<HitTarget>,
}

impl PointerEvent {
    /// Create a new pointer event with no resolved target.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            target: None,
        }
    }

    /// Primary-button press.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary-button release.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    /// Attach a resolved target.
    #[must_use]
    pub const fn with_target(mut self, target: HitTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Get the position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
