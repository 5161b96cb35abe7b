#![forbid(unsafe_code)]

//! State of one active drag gesture.
//!
//! # Lifecycle
//!
//! [`DragSession::start`] records the dragged item's index and the pointer
//! offset inside it, pins the item to its original size, puts a placeholder of
//! that size where the item was, moves the item to the end of the sequence
//! (so it draws above its siblings), positions it under the pointer, and
//! captures the pointer. [`DragSession::stop`] consumes the session: it
//! restores the item's inline state, swaps it back in for the placeholder,
//! and releases the pointer.
//!
//! # Invariants
//!
//! 1. The dragged item is tagged explicitly and filtered out of every sibling
//!    query. Its position at the end of the sequence is cosmetic.
//! 2. Exactly one placeholder exists between `start` and `stop`, and it is
//!    never the dragged item.
//! 3. Indices are measured over the sequence without the dragged item, so the
//!    placeholder index is always in `[0, item_count - 1]`.

use std::fmt;

use sortable_core::{NodeId, Point, Size};

use crate::surface::{DragStyle, Surface};

/// Why a drag could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRejected {
    /// The item is not a direct child of the list root.
    NotAListItem(NodeId),
}

impl fmt::Display for DragRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAListItem(node) => write!(f, "node {node} is not a direct child of the list"),
        }
    }
}

impl std::error::Error for DragRejected {}

/// Index change produced by ending a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropIndices {
    /// Index of the item when the drag started.
    pub from: usize,
    /// Index of the placeholder when the drag ended.
    pub to: usize,
}

impl DropIndices {
    /// True when the item ends where it started.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// One active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    dragged: NodeId,
    placeholder: NodeId,
    start_index: usize,
    offset: Point,
    size: Size,
}

impl DragSession {
    /// Begin dragging `item`, grabbed at viewport position `pointer`.
    pub fn start<S: Surface + ?Sized>(
        surface: &mut S,
        item: NodeId,
        pointer: Point,
    ) -> Result<Self, DragRejected> {
        let start_index = surface
            .index_of(item)
            .ok_or(DragRejected::NotAListItem(item))?;
        let rect = surface.bounding_box(item);
        let offset = pointer - rect.origin();
        let size = rect.size();

        surface.set_drag_style(item, Some(DragStyle::new(size)));
        let placeholder = surface.create_placeholder(size);
        surface.insert_before(placeholder, item);
        surface.append(item);

        let session = Self {
            dragged: item,
            placeholder,
            start_index,
            offset,
            size,
        };
        session.track(surface, pointer);
        surface.capture_pointer();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            item = item.get(),
            start_index,
            offset_x = offset.x,
            offset_y = offset.y,
            "sortable drag started"
        );
        Ok(session)
    }

    /// The item being dragged.
    #[inline]
    pub const fn dragged(&self) -> NodeId {
        self.dragged
    }

    #[inline]
    pub const fn placeholder(&self) -> NodeId {
        self.placeholder
    }

    /// Index of the dragged item when the drag started.
    #[inline]
    pub const fn start_index(&self) -> usize {
        self.start_index
    }

    /// Pointer position relative to the item's top-left corner at grab time.
    #[inline]
    pub const fn offset(&self) -> Point {
        self.offset
    }

    /// Size the item had when the drag started.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Move the floating item so the grab point stays under the pointer. Pure
    /// translation; no clamping to the container.
    pub fn track<S: Surface + ?Sized>(&self, surface: &mut S, pointer: Point) {
        surface.set_position(self.dragged, pointer - self.offset);
    }

    /// Child sequence with the dragged item filtered out.
    pub fn siblings<S: Surface + ?Sized>(&self, surface: &S) -> Vec<NodeId> {
        surface
            .children()
            .into_iter()
            .filter(|&node| node != self.dragged)
            .collect()
    }

    /// Current placeholder index among the siblings.
    pub fn placeholder_index<S: Surface + ?Sized>(&self, surface: &S) -> Option<usize> {
        self.siblings(surface)
            .iter()
            .position(|&node| node == self.placeholder)
    }

    /// End the drag and put the item where the placeholder is.
    pub fn stop<S: Surface + ?Sized>(self, surface: &mut S) -> DropIndices {
        let final_index = self.placeholder_index(surface);
        surface.set_drag_style(self.dragged, None);
        let to = match final_index {
            Some(index) => {
                surface.replace_with(self.placeholder, self.dragged);
                index
            }
            // The host dropped the placeholder; leave the item where it is.
            None => surface
                .index_of(self.dragged)
                .unwrap_or(self.start_index),
        };
        surface.release_pointer();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            item = self.dragged.get(),
            from = self.start_index,
            to,
            "sortable drag stopped"
        );
        DropIndices {
            from: self.start_index,
            to,
        }
    }
}
