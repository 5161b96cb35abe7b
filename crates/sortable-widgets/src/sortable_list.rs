#![forbid(unsafe_code)]

//! Pointer-driven sortable list.
//!
//! [`SortableList`] owns a [`Surface`], an optional [`DragSession`], and a
//! [`ReorderNotifier`]. Hosts feed it every pointer event they receive for the
//! list root (and, while [`SortableList::is_dragging`], every global pointer
//! move/up as requested through [`Surface::capture_pointer`]). Each call
//! returns a [`SortableDispatch`] describing what happened, so hosts can honour
//! `prevent_default` and tests can assert on outcomes directly.
//!
//! # State machine
//!
//! ```text
//!            down on grab handle
//!   Idle ───────────────────────────▶ Dragging
//!    ▲  ◀──────────────────────────── │  ▲
//!    │           up (notify)          │  │ move (place / scroll)
//!    │                                └──┘
//!    └── down on delete handle removes the item, stays Idle
//! ```
//!
//! A pointer-down while dragging is ignored. Moves and ups while idle are
//! ignored.

use std::fmt;
use std::sync::mpsc;

use sortable_core::{HitTarget, Marker, NodeId, Point, PointerButton, PointerEvent, PointerEventKind};

use crate::auto_scroll::{AutoScroll, DEFAULT_EDGE_THRESHOLD, DEFAULT_SCROLL_STEP};
use crate::drag_session::DragSession;
use crate::placement::{self, MoveEffect};
use crate::reorder::{ReorderEvent, ReorderNotifier, SubscriptionId};
use crate::surface::Surface;

/// Sortable list configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortableListConfig {
    /// Edge auto-scroll parameters.
    pub auto_scroll: AutoScroll,
    /// Button required to start a drag or trigger a delete.
    pub activation_button: PointerButton,
}

impl Default for SortableListConfig {
    fn default() -> Self {
        Self {
            auto_scroll: AutoScroll::new(DEFAULT_EDGE_THRESHOLD, DEFAULT_SCROLL_STEP),
            activation_button: PointerButton::Primary,
        }
    }
}

impl SortableListConfig {
    #[must_use]
    pub fn with_edge_threshold(mut self, edge_threshold: f32) -> Self {
        self.auto_scroll.edge_threshold = edge_threshold;
        self
    }

    #[must_use]
    pub fn with_scroll_step(mut self, step: f32) -> Self {
        self.auto_scroll.step = step;
        self
    }

    #[must_use]
    pub fn with_activation_button(mut self, button: PointerButton) -> Self {
        self.activation_button = button;
        self
    }

    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<(), SortableConfigError> {
        let threshold = self.auto_scroll.edge_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SortableConfigError::InvalidEdgeThreshold(threshold));
        }
        let step = self.auto_scroll.step;
        if !step.is_finite() || step <= 0.0 {
            return Err(SortableConfigError::InvalidScrollStep(step));
        }
        Ok(())
    }
}

/// Configuration rejected by [`SortableListConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortableConfigError {
    /// Edge threshold must be finite and non-negative.
    InvalidEdgeThreshold(f32),
    /// Scroll step must be finite and positive.
    InvalidScrollStep(f32),
}

impl fmt::Display for SortableConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEdgeThreshold(value) => write!(
                f,
                "auto-scroll edge threshold must be finite and >= 0 (got {value})"
            ),
            Self::InvalidScrollStep(value) => {
                write!(f, "auto-scroll step must be finite and > 0 (got {value})")
            }
        }
    }
}

impl std::error::Error for SortableConfigError {}

/// Pointer lifecycle phase of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    PointerDown,
    PointerMove,
    PointerUp,
}

impl From<PointerEventKind> for PointerPhase {
    fn from(kind: PointerEventKind) -> Self {
        match kind {
            PointerEventKind::Down(_) => Self::PointerDown,
            PointerEventKind::Move => Self::PointerMove,
            PointerEventKind::Up(_) => Self::PointerUp,
        }
    }
}

/// Why an incoming pointer event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Pointer-down with a button other than the activation button.
    ButtonNotAllowed,
    /// Pointer-down without a resolved target.
    NoTarget,
    /// Pointer-down on an item outside its grab and delete handles.
    NotAHandle,
    /// Target node is not a direct child of the list.
    NotAListItem,
    /// Pointer-down while a drag is already active.
    DragAlreadyActive,
    /// Move or up without an active drag.
    NoActiveDrag,
}

/// What one dispatch did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    /// A drag started on `node`, which was at `index`.
    DragStarted { node: NodeId, index: usize },
    /// A placement rule matched; the placeholder is at `index`.
    PlaceholderPlaced { index: usize, changed: bool },
    /// No placement rule matched and the viewport scrolled.
    Scrolled { dy: f32 },
    /// No placement rule matched and nothing scrolled.
    Unchanged,
    /// The drag ended. `reorder` is `None` for a drop at the start index.
    DragEnded {
        from: usize,
        to: usize,
        reorder: Option<ReorderEvent>,
    },
    /// A delete handle removed `node` from `index`.
    ItemDeleted { node: NodeId, index: usize },
    Ignored(IgnoredReason),
}

/// Result of one pointer dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortableDispatch {
    pub phase: PointerPhase,
    pub outcome: DispatchOutcome,
    /// The host should suppress its default pointer behaviour (text selection,
    /// native drag images).
    pub prevent_default: bool,
}

impl SortableDispatch {
    const fn new(phase: PointerPhase, outcome: DispatchOutcome) -> Self {
        Self {
            phase,
            outcome,
            prevent_default: false,
        }
    }

    const fn handled(phase: PointerPhase, outcome: DispatchOutcome) -> Self {
        Self {
            phase,
            outcome,
            prevent_default: true,
        }
    }

    const fn ignored(phase: PointerPhase, reason: IgnoredReason) -> Self {
        Self::new(phase, DispatchOutcome::Ignored(reason))
    }

    /// The reorder event emitted by this dispatch, if any.
    #[must_use]
    pub const fn reorder(&self) -> Option<ReorderEvent> {
        match self.outcome {
            DispatchOutcome::DragEnded { reorder, .. } => reorder,
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Ignored(_))
    }
}

/// A vertical list whose items can be reordered by dragging their grab handle.
pub struct SortableList<S: Surface> {
    surface: S,
    config: SortableListConfig,
    session: Option<DragSession>,
    notifier: ReorderNotifier,
}

impl<S: Surface + fmt::Debug> fmt::Debug for SortableList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableList")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl<S: Surface> SortableList<S> {
    /// Build a list on `surface` and append `items` to its root in order.
    pub fn new<I>(surface: S, items: I, config: SortableListConfig) -> Result<Self, SortableConfigError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        config.validate()?;
        let mut list = Self {
            surface,
            config,
            session: None,
            notifier: ReorderNotifier::new(),
        };
        list.add_items(items);
        Ok(list)
    }

    /// Build a list with [`SortableListConfig::default`].
    pub fn with_defaults<I>(surface: S, items: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut list = Self {
            surface,
            config: SortableListConfig::default(),
            session: None,
            notifier: ReorderNotifier::new(),
        };
        list.add_items(items);
        list
    }

    /// Append items to the end of the list. While a drag is active the items
    /// are inserted before the floating item so they take part in placement.
    pub fn add_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for item in items {
            match &self.session {
                Some(session) => self.surface.insert_before(item, session.dragged()),
                None => self.surface.append(item),
            }
        }
    }

    #[inline]
    pub fn config(&self) -> &SortableListConfig {
        &self.config
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. for host-driven layout changes.
    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Item order as it would be if the pointer were released now.
    pub fn order(&self) -> Vec<NodeId> {
        match &self.session {
            Some(session) => session
                .siblings(&self.surface)
                .into_iter()
                .map(|node| {
                    if node == session.placeholder() {
                        session.dragged()
                    } else {
                        node
                    }
                })
                .collect(),
            None => self.surface.children(),
        }
    }

    /// Number of items, counting the dragged item once.
    pub fn len(&self) -> usize {
        self.order().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a reorder observer.
    pub fn on_reorder<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ReorderEvent) + 'static,
    {
        self.notifier.subscribe(observer)
    }

    /// Remove a reorder observer.
    pub fn off_reorder(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Receive reorder events over a channel.
    pub fn reorder_channel(&mut self) -> (SubscriptionId, mpsc::Receiver<ReorderEvent>) {
        self.notifier.subscribe_channel()
    }

    /// Route one pointer event.
    pub fn handle_event(&mut self, event: &PointerEvent) -> SortableDispatch {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "sortable.dispatch",
            phase = ?PointerPhase::from(event.kind),
            x = event.x,
            y = event.y,
            dragging = self.session.is_some()
        )
        .entered();

        let dispatch = match event.kind {
            PointerEventKind::Down(button) => {
                self.pointer_down(button, event.position(), event.target)
            }
            PointerEventKind::Move => self.pointer_move(event.position()),
            PointerEventKind::Up(_) => self.pointer_up(),
        };

        #[cfg(feature = "tracing")]
        {
            if let DispatchOutcome::Ignored(reason) = dispatch.outcome {
                tracing::trace!(?reason, "pointer event ignored");
            }
        }
        dispatch
    }

    /// Handle a pointer-down dispatched at the list root.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        position: Point,
        target: Option<HitTarget>,
    ) -> SortableDispatch {
        let phase = PointerPhase::PointerDown;
        if button != self.config.activation_button {
            return SortableDispatch::ignored(phase, IgnoredReason::ButtonNotAllowed);
        }
        let Some(target) = target else {
            return SortableDispatch::ignored(phase, IgnoredReason::NoTarget);
        };
        if self.session.is_some() {
            return SortableDispatch::ignored(phase, IgnoredReason::DragAlreadyActive);
        }
        let Some(index) = self.surface.index_of(target.node) else {
            return SortableDispatch::ignored(phase, IgnoredReason::NotAListItem);
        };

        match target.marker {
            Marker::GrabHandle => match DragSession::start(&mut self.surface, target.node, position)
            {
                Ok(session) => {
                    let index = session.start_index();
                    self.session = Some(session);
                    SortableDispatch::handled(
                        phase,
                        DispatchOutcome::DragStarted {
                            node: target.node,
                            index,
                        },
                    )
                }
                Err(_) => SortableDispatch::ignored(phase, IgnoredReason::NotAListItem),
            },
            Marker::DeleteHandle => {
                self.surface.remove(target.node);
                #[cfg(feature = "tracing")]
                tracing::debug!(item = target.node.get(), index, "sortable item deleted");
                SortableDispatch::handled(
                    phase,
                    DispatchOutcome::ItemDeleted {
                        node: target.node,
                        index,
                    },
                )
            }
            Marker::Content => SortableDispatch::ignored(phase, IgnoredReason::NotAHandle),
        }
    }

    /// Handle a pointer-move (global while dragging).
    pub fn pointer_move(&mut self, position: Point) -> SortableDispatch {
        let phase = PointerPhase::PointerMove;
        let Some(session) = &self.session else {
            return SortableDispatch::ignored(phase, IgnoredReason::NoActiveDrag);
        };
        let outcome = match placement::on_pointer_move(
            &mut self.surface,
            session,
            position,
            &self.config.auto_scroll,
        ) {
            MoveEffect::Placed { index, changed, .. } => {
                DispatchOutcome::PlaceholderPlaced { index, changed }
            }
            MoveEffect::Scrolled { dy } => DispatchOutcome::Scrolled { dy },
            MoveEffect::Unchanged => DispatchOutcome::Unchanged,
        };
        SortableDispatch::new(phase, outcome)
    }

    /// Handle a pointer-up (global while dragging). Ends the drag and notifies
    /// observers when the index changed.
    pub fn pointer_up(&mut self) -> SortableDispatch {
        let phase = PointerPhase::PointerUp;
        let Some(session) = self.session.take() else {
            return SortableDispatch::ignored(phase, IgnoredReason::NoActiveDrag);
        };
        let indices = session.stop(&mut self.surface);
        let reorder = self.notifier.notify(indices.from, indices.to);
        SortableDispatch::new(
            phase,
            DispatchOutcome::DragEnded {
                from: indices.from,
                to: indices.to,
                reorder,
            },
        )
    }

    /// Detach the list root. Nothing else changes.
    pub fn remove(&mut self) {
        self.surface.detach_root();
    }

    /// Tear the list down and hand back the surface.
    ///
    /// A drag in flight is ended without notifying observers: the item goes
    /// back into the placeholder slot and pointer capture is released.
    pub fn destroy(mut self) -> S {
        if let Some(session) = self.session.take() {
            let _indices = session.stop(&mut self.surface);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = _indices.from,
                to = _indices.to,
                "sortable drag abandoned by destroy"
            );
        }
        self.surface.detach_root();
        self.surface
    }
}
