#![forbid(unsafe_code)]

//! Core: geometry and pointer event vocabulary for sortable lists.
//!
//! # Role in the workspace
//! `sortable-core` carries no behaviour. It defines the value types shared by
//! hosts (which translate their native pointer events and layout boxes into
//! them) and by `sortable-widgets` (which consumes them).
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Rect`], [`geometry::Point`], [`geometry::Size`]
//!   in viewport pixels.
//! - **Events**: [`event::PointerEvent`] plus the resolved [`event::HitTarget`]
//!   that routes a pointer-down to a grab or delete handle.

pub mod event;
pub mod geometry;

pub use event::{HitTarget, Marker, NodeId, PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{Point, Rect, Size};
