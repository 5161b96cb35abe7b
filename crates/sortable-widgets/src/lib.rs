#![forbid(unsafe_code)]

//! Pointer-driven sortable list.
//!
//! # Role in the workspace
//! `sortable-widgets` holds all behaviour: it consumes `sortable-core` pointer
//! events, drives a host [`surface::Surface`], and reports reorders.
//!
//! # Modules
//! - [`sortable_list`]: the widget, event routing, lifecycle.
//! - [`drag_session`]: state of one active drag.
//! - [`placement`]: where the placeholder goes on each move.
//! - [`auto_scroll`]: fixed-step edge scrolling.
//! - [`reorder`]: reorder events and their observers.
//! - [`surface`]: the host capability everything is written against.
//! - [`headless`]: an in-memory surface for tests and headless hosts.

pub mod auto_scroll;
pub mod drag_session;
pub mod headless;
pub mod placement;
pub mod reorder;
pub mod sortable_list;
pub mod surface;

pub use auto_scroll::AutoScroll;
pub use drag_session::{DragSession, DropIndices};
pub use headless::HeadlessSurface;
pub use placement::Placement;
pub use reorder::{REORDER_EVENT_NAME, ReorderEvent, ReorderNotifier, SubscriptionId};
pub use sortable_list::{
    DispatchOutcome, IgnoredReason, PointerPhase, SortableConfigError, SortableDispatch,
    SortableList, SortableListConfig,
};
pub use surface::{DragStyle, Surface};
