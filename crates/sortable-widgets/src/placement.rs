#![forbid(unsafe_code)]

//! Placeholder placement.
//!
//! On every pointer move the engine reads the geometry around the placeholder
//! and picks one of the following, first match wins:
//!
//! 1. Translate the floating item under the pointer (always).
//! 2. Pointer above the first sibling's top edge: placeholder becomes first.
//! 3. Pointer below the container's bottom edge: placeholder becomes last.
//! 4. Pointer above the previous sibling's vertical midpoint: placeholder
//!    moves before that sibling.
//! 5. Pointer below the next sibling's vertical midpoint: placeholder moves
//!    after that sibling.
//! 6. Otherwise the placeholder stays and edge auto-scroll is evaluated.
//!
//! Only the immediate neighbours are compared, so a move costs O(1) geometry
//! reads, and the placeholder crosses a neighbour only once the pointer passes
//! that neighbour's centre. Neighbours with a degenerate box never match.

use sortable_core::{NodeId, Point, Rect};

use crate::auto_scroll::AutoScroll;
use crate::drag_session::DragSession;
use crate::surface::Surface;

/// Where the placeholder should go on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
    Before(NodeId),
    After(NodeId),
    /// No rule matched.
    Stay,
}

/// Geometry snapshot the placement rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neighborhood {
    /// Top edge of the first sibling.
    pub first_top: Option<f32>,
    /// Bottom edge of the list root.
    pub container_bottom: f32,
    /// Sibling immediately before the placeholder.
    pub previous: Option<(NodeId, Rect)>,
    /// Sibling immediately after the placeholder.
    pub next: Option<(NodeId, Rect)>,
}

impl Neighborhood {
    /// Read the geometry around the session's placeholder. The dragged item
    /// never appears as a neighbour.
    pub fn observe<S: Surface + ?Sized>(surface: &S, session: &DragSession) -> Self {
        let siblings = session.siblings(surface);
        let first_top = siblings
            .first()
            .map(|&node| surface.bounding_box(node).top());
        let container_bottom = surface.container_box().bottom();

        let (previous, next) = match siblings
            .iter()
            .position(|&node| node == session.placeholder())
        {
            Some(index) => (
                index
                    .checked_sub(1)
                    .and_then(|prev| siblings.get(prev))
                    .map(|&node| (node, surface.bounding_box(node))),
                siblings
                    .get(index + 1)
                    .map(|&node| (node, surface.bounding_box(node))),
            ),
            None => (None, None),
        };

        Self {
            first_top,
            container_bottom,
            previous,
            next,
        }
    }
}

/// Evaluate the placement rules for a pointer at `pointer_y`.
#[must_use]
pub fn decide(pointer_y: f32, neighborhood: &Neighborhood) -> Placement {
    if let Some(top) = neighborhood.first_top
        && pointer_y < top
    {
        return Placement::First;
    }
    if pointer_y > neighborhood.container_bottom {
        return Placement::Last;
    }
    if let Some((node, rect)) = neighborhood.previous
        && !rect.is_degenerate()
        && pointer_y < rect.mid_y()
    {
        return Placement::Before(node);
    }
    if let Some((node, rect)) = neighborhood.next
        && !rect.is_degenerate()
        && pointer_y > rect.mid_y()
    {
        return Placement::After(node);
    }
    Placement::Stay
}

/// Move the placeholder according to `placement`. Returns `true` if the
/// sequence changed.
pub fn apply<S: Surface + ?Sized>(
    surface: &mut S,
    session: &DragSession,
    placement: Placement,
) -> bool {
    let placeholder = session.placeholder();
    match placement {
        Placement::First => {
            let siblings = session.siblings(surface);
            match siblings.first() {
                Some(&first) if first != placeholder => {
                    surface.insert_before(placeholder, first);
                    true
                }
                _ => false,
            }
        }
        Placement::Last => {
            let siblings = session.siblings(surface);
            match siblings.last() {
                Some(&last) if last != placeholder => {
                    surface.insert_after(placeholder, last);
                    true
                }
                _ => false,
            }
        }
        Placement::Before(node) => {
            surface.insert_before(placeholder, node);
            true
        }
        Placement::After(node) => {
            surface.insert_after(placeholder, node);
            true
        }
        Placement::Stay => false,
    }
}

/// Result of processing one pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveEffect {
    /// A placement rule matched; `index` is the placeholder index afterwards.
    Placed {
        placement: Placement,
        index: usize,
        changed: bool,
    },
    /// No rule matched and the viewport scrolled by `dy`.
    Scrolled { dy: f32 },
    /// No rule matched and the pointer is away from the viewport edges.
    Unchanged,
}

/// Run one full move tick: translate the floating item, evaluate the rules,
/// and fall back to auto-scroll.
pub fn on_pointer_move<S: Surface + ?Sized>(
    surface: &mut S,
    session: &DragSession,
    pointer: Point,
    auto_scroll: &AutoScroll,
) -> MoveEffect {
    session.track(surface, pointer);
    let neighborhood = Neighborhood::observe(surface, session);
    match decide(pointer.y, &neighborhood) {
        Placement::Stay => match auto_scroll.maybe_scroll(surface, pointer.y) {
            Some(dy) => MoveEffect::Scrolled { dy },
            None => MoveEffect::Unchanged,
        },
        placement => {
            let changed = apply(surface, session, placement);
            let index = session
                .placeholder_index(surface)
                .unwrap_or(session.start_index());
            #[cfg(feature = "tracing")]
            {
                if changed {
                    tracing::debug!(?placement, index, pointer_y = pointer.y, "placeholder moved");
                }
            }
            MoveEffect::Placed {
                placement,
                index,
                changed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;
    use sortable_core::Size;

    const PREV: NodeId = NodeId(10);
    const NEXT: NodeId = NodeId(11);

    fn neighborhood() -> Neighborhood {
        // prev spans 40..80, placeholder 80..120, next 120..160.
        Neighborhood {
            first_top: Some(0.0),
            container_bottom: 200.0,
            previous: Some((PREV, Rect::new(0.0, 40.0, 100.0, 40.0))),
            next: Some((NEXT, Rect::new(0.0, 120.0, 100.0, 40.0))),
        }
    }

    #[test]
    fn above_first_item_goes_first() {
        assert_eq!(decide(-0.5, &neighborhood()), Placement::First);
    }

    #[test]
    fn below_container_goes_last() {
        assert_eq!(decide(200.5, &neighborhood()), Placement::Last);
    }

    #[test]
    fn crossing_previous_midpoint_moves_before() {
        assert_eq!(decide(59.0, &neighborhood()), Placement::Before(PREV));
        assert_eq!(decide(60.0, &neighborhood()), Placement::Stay);
    }

    #[test]
    fn crossing_next_midpoint_moves_after() {
        assert_eq!(decide(141.0, &neighborhood()), Placement::After(NEXT));
        assert_eq!(decide(140.0, &neighborhood()), Placement::Stay);
    }

    #[test]
    fn between_midpoints_stays() {
        for y in [61.0, 80.0, 100.0, 139.0] {
            assert_eq!(decide(y, &neighborhood()), Placement::Stay);
        }
    }

    #[test]
    fn edge_rules_take_priority_over_neighbours() {
        let mut n = neighborhood();
        n.first_top = Some(70.0);
        // Also above the previous midpoint, but the first-item rule wins.
        assert_eq!(decide(50.0, &n), Placement::First);

        let mut n = neighborhood();
        n.container_bottom = 130.0;
        assert_eq!(decide(150.0, &n), Placement::Last);
    }

    #[test]
    fn degenerate_neighbours_never_match() {
        let n = Neighborhood {
            first_top: Some(0.0),
            container_bottom: 200.0,
            previous: Some((PREV, Rect::new(0.0, 40.0, 100.0, 0.0))),
            next: Some((NEXT, Rect::new(0.0, f32::NAN, 100.0, 40.0))),
        };
        assert_eq!(decide(10.0, &n), Placement::Stay);
        assert_eq!(decide(190.0, &n), Placement::Stay);
    }

    #[test]
    fn missing_neighbours_stay() {
        let n = Neighborhood {
            first_top: Some(0.0),
            container_bottom: 40.0,
            previous: None,
            next: None,
        };
        assert_eq!(decide(20.0, &n), Placement::Stay);
    }

    #[test]
    fn nan_pointer_stays() {
        assert_eq!(decide(f32::NAN, &neighborhood()), Placement::Stay);
    }

    fn dragging(labels: &[&str], index: usize) -> (HeadlessSurface, Vec<NodeId>, DragSession) {
        let mut surface = HeadlessSurface::new(Size::new(200.0, 1000.0));
        let ids = surface.create_items(labels.iter().copied(), 40.0);
        for &id in &ids {
            surface.append(id);
        }
        let y = index as f32 * 40.0 + 20.0;
        let session = DragSession::start(&mut surface, ids[index], Point::new(10.0, y))
            .expect("item is a child");
        (surface, ids, session)
    }

    #[test]
    fn observe_skips_dragged_item() {
        let (surface, ids, session) = dragging(&["a", "b", "c"], 2);
        let n = Neighborhood::observe(&surface, &session);
        assert_eq!(n.first_top, Some(0.0));
        assert_eq!(n.container_bottom, 120.0);
        assert_eq!(n.previous.map(|(node, _)| node), Some(ids[1]));
        // The dragged item sits after the placeholder in the sequence but is
        // not a neighbour.
        assert_eq!(n.next, None);
    }

    #[test]
    fn first_and_last_are_idempotent() {
        let (mut surface, _, session) = dragging(&["a", "b", "c"], 0);
        assert!(!apply(&mut surface, &session, Placement::First));
        assert!(apply(&mut surface, &session, Placement::Last));
        assert_eq!(session.placeholder_index(&surface), Some(2));
        assert!(!apply(&mut surface, &session, Placement::Last));
        assert!(apply(&mut surface, &session, Placement::First));
        assert_eq!(session.placeholder_index(&surface), Some(0));
    }

    #[test]
    fn move_tick_translates_then_places() {
        let (mut surface, ids, session) = dragging(&["a", "b", "c"], 0);
        let effect = on_pointer_move(
            &mut surface,
            &session,
            Point::new(10.0, 61.0),
            &AutoScroll::default(),
        );
        assert_eq!(
            effect,
            MoveEffect::Placed {
                placement: Placement::After(ids[1]),
                index: 1,
                changed: true,
            }
        );
        assert_eq!(surface.position(ids[0]), Some(Point::new(0.0, 41.0)));
    }

    #[test]
    fn move_tick_falls_back_to_scroll() {
        let mut surface = HeadlessSurface::new(Size::new(200.0, 100.0));
        let ids = surface.create_items(["a", "b", "c", "d", "e"], 40.0);
        for &id in &ids {
            surface.append(id);
        }
        let session = DragSession::start(&mut surface, ids[1], Point::new(10.0, 60.0))
            .expect("b is a child");
        let effect = on_pointer_move(
            &mut surface,
            &session,
            Point::new(10.0, 79.0),
            &AutoScroll::default(),
        );
        assert_eq!(effect, MoveEffect::Unchanged);
        let effect = on_pointer_move(
            &mut surface,
            &session,
            Point::new(10.0, 85.0),
            &AutoScroll::default(),
        );
        assert_eq!(effect, MoveEffect::Scrolled { dy: 10.0 });
        assert_eq!(surface.scroll_y(), 10.0);
    }
}
