//! End-to-end drag scenarios against the headless surface.
//!
//! Every item is 40px tall and the list root starts at the document origin, so
//! item `i` spans `[40 * i, 40 * i + 40)` and its midpoint is `40 * i + 20`.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sortable_core::{HitTarget, NodeId, PointerEvent, Size};
use sortable_widgets::{
    DispatchOutcome, DragStyle, HeadlessSurface, ReorderEvent, SortableList, SortableListConfig,
    Surface,
};

const ITEM_HEIGHT: f32 = 40.0;

struct Harness {
    list: SortableList<HeadlessSurface>,
    ids: Vec<NodeId>,
    events: Rc<RefCell<Vec<ReorderEvent>>>,
}

impl Harness {
    fn new(labels: &[&str]) -> Self {
        Self::with_viewport(labels, 600.0)
    }

    fn with_viewport(labels: &[&str], viewport_height: f32) -> Self {
        let mut surface = HeadlessSurface::new(Size::new(240.0, viewport_height));
        let ids = surface.create_items(labels.iter().copied(), ITEM_HEIGHT);
        let mut list = SortableList::new(surface, ids.clone(), SortableListConfig::default())
            .expect("default config is valid");
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        list.on_reorder(move |event| sink.borrow_mut().push(*event));
        Self { list, ids, events }
    }

    fn grab(&mut self, index: usize) -> DispatchOutcome {
        let y = index as f32 * ITEM_HEIGHT + ITEM_HEIGHT / 2.0;
        self.list
            .handle_event(&PointerEvent::down(12.0, y).with_target(HitTarget::grab(self.ids[index])))
            .outcome
    }

    fn move_to(&mut self, y: f32) -> DispatchOutcome {
        self.list.handle_event(&PointerEvent::moved(12.0, y)).outcome
    }

    fn release(&mut self, y: f32) -> DispatchOutcome {
        self.list.handle_event(&PointerEvent::up(12.0, y)).outcome
    }

    fn placeholder_index(&self) -> Option<usize> {
        let session = self.list.session()?;
        session.placeholder_index(self.list.surface())
    }

    fn labels(&self) -> Vec<&str> {
        self.list.surface().labels()
    }
}

#[test]
fn drag_first_item_to_end() {
    let mut h = Harness::new(&["A", "B", "C"]);
    assert_eq!(
        h.grab(0),
        DispatchOutcome::DragStarted {
            node: h.ids[0],
            index: 0
        }
    );
    assert_eq!(
        h.move_to(61.0),
        DispatchOutcome::PlaceholderPlaced {
            index: 1,
            changed: true
        }
    );
    assert_eq!(
        h.move_to(101.0),
        DispatchOutcome::PlaceholderPlaced {
            index: 2,
            changed: true
        }
    );
    assert_eq!(
        h.release(101.0),
        DispatchOutcome::DragEnded {
            from: 0,
            to: 2,
            reorder: Some(ReorderEvent::new(0, 2)),
        }
    );
    assert_eq!(h.labels(), vec!["B", "C", "A"]);
    assert_eq!(*h.events.borrow(), vec![ReorderEvent { from: 0, to: 2 }]);
    assert!(!h.list.surface().is_pointer_captured());
    assert_eq!(h.list.surface().placeholder_count(), 0);
}

#[test]
fn drop_without_crossing_midpoint_emits_nothing() {
    let mut h = Harness::new(&["A", "B", "C"]);
    h.grab(1);
    for y in [25.0, 45.0, 60.0, 80.0, 99.0] {
        assert_eq!(h.move_to(y), DispatchOutcome::Unchanged, "pointer at {y}");
        assert_eq!(h.placeholder_index(), Some(1));
    }
    assert_eq!(
        h.release(60.0),
        DispatchOutcome::DragEnded {
            from: 1,
            to: 1,
            reorder: None,
        }
    );
    assert_eq!(h.labels(), vec!["A", "B", "C"]);
    assert!(h.events.borrow().is_empty());
}

#[test]
fn delete_handle_removes_item_without_drag_or_event() {
    let mut h = Harness::new(&["A", "B", "C"]);
    let target = HitTarget::delete(h.ids[2]);
    let dispatch = h
        .list
        .handle_event(&PointerEvent::down(200.0, 100.0).with_target(target));
    assert_eq!(
        dispatch.outcome,
        DispatchOutcome::ItemDeleted {
            node: h.ids[2],
            index: 2
        }
    );
    assert!(dispatch.prevent_default);
    assert!(!h.list.is_dragging());
    assert!(!h.list.surface().is_pointer_captured());
    assert_eq!(h.labels(), vec!["A", "B"]);
    assert!(h.events.borrow().is_empty());
}

#[test]
fn placeholder_advances_monotonically_without_oscillation() {
    let mut h = Harness::new(&["A", "B", "C", "D", "E"]);
    h.grab(0);

    let mut last = 0;
    for y in (20..=200).step_by(5) {
        h.move_to(y as f32);
        let index = h.placeholder_index().expect("dragging");
        assert!(index >= last, "placeholder went back at y={y}");
        last = index;
    }
    assert_eq!(last, 4);

    // Reversing by less than half an item never crosses back.
    h.move_to(200.0);
    let before = h.placeholder_index();
    h.move_to(150.0);
    h.move_to(180.0);
    h.move_to(141.0);
    assert_eq!(h.placeholder_index(), before);

    // Passing the previous item's midpoint does.
    h.move_to(139.0);
    assert_eq!(h.placeholder_index(), Some(3));
}

#[test]
fn pointer_above_first_item_goes_to_index_zero_regardless_of_x() {
    for x in [-400.0, 0.0, 120.0, 5000.0] {
        let mut h = Harness::new(&["A", "B", "C", "D"]);
        h.grab(3);
        h.list.handle_event(&PointerEvent::moved(x, -1.0));
        assert_eq!(h.placeholder_index(), Some(0), "x = {x}");
        h.release(-1.0);
        assert_eq!(h.labels(), vec!["D", "A", "B", "C"]);
        assert_eq!(*h.events.borrow(), vec![ReorderEvent::new(3, 0)]);
    }
}

#[test]
fn pointer_below_container_goes_to_last_index() {
    let mut h = Harness::new(&["A", "B", "C", "D"]);
    h.grab(1);
    let bottom = h.list.surface().container_box().bottom();
    assert_eq!(
        h.move_to(bottom + 0.5),
        DispatchOutcome::PlaceholderPlaced {
            index: 3,
            changed: true
        }
    );
    // Already last: the rule still matches, nothing moves.
    assert_eq!(
        h.move_to(bottom + 300.0),
        DispatchOutcome::PlaceholderPlaced {
            index: 3,
            changed: false
        }
    );
    h.release(bottom + 300.0);
    assert_eq!(h.labels(), vec!["A", "C", "D", "B"]);
}

#[test]
fn floating_item_follows_pointer_with_grab_offset() {
    let mut h = Harness::new(&["A", "B", "C"]);
    h.list.handle_event(
        &PointerEvent::down(30.0, 47.0).with_target(HitTarget::grab(h.ids[1])),
    );
    h.move_to(300.0);
    let rect = h.list.surface().bounding_box(h.ids[1]);
    // Grabbed 30px from the left and 7px from the top.
    assert_eq!((rect.x, rect.y), (-18.0, 293.0));
    assert_eq!(rect.height, ITEM_HEIGHT);
}

#[test]
fn narrow_root_pins_floating_item_and_placeholder_to_root_width() {
    let mut surface = HeadlessSurface::new(Size::new(400.0, 600.0)).with_width(120.0);
    let ids = surface.create_items(["A", "B", "C"], ITEM_HEIGHT);
    let mut list = SortableList::with_defaults(surface, ids.clone());

    list.handle_event(&PointerEvent::down(100.0, 60.0).with_target(HitTarget::grab(ids[1])));
    let session = list.session().expect("dragging").clone();
    let surface = list.surface();
    assert_eq!(surface.label(session.dragged()), Some("B"));
    assert_eq!(
        surface.drag_style(ids[1]),
        Some(DragStyle::new(Size::new(120.0, ITEM_HEIGHT)))
    );
    assert_eq!(
        surface.bounding_box(session.placeholder()).size(),
        Size::new(120.0, ITEM_HEIGHT)
    );

    // The floating item is not clamped to the root horizontally.
    list.handle_event(&PointerEvent::moved(390.0, 60.0));
    let rect = list.surface().bounding_box(ids[1]);
    assert_eq!((rect.left(), rect.right()), (290.0, 410.0));
    assert_eq!(list.surface().container_box().right(), 120.0);

    list.handle_event(&PointerEvent::up(390.0, 60.0));
    assert_eq!(list.surface().drag_style(ids[1]), None);
    assert_eq!(list.surface().labels(), vec!["A", "B", "C"]);
}

#[test]
fn sibling_count_is_conserved() {
    let mut h = Harness::new(&["A", "B", "C", "D", "E", "F"]);
    for (grab, path) in [
        (0usize, vec![70.0, 130.0, 250.0, 10.0]),
        (5, vec![-50.0, 90.0, 95.0]),
        (2, vec![101.0, 99.0, 300.0, 0.0, 200.0]),
    ] {
        h.grab(grab);
        for y in path {
            h.move_to(y);
            assert_eq!(h.list.len(), 6);
            assert_eq!(h.list.surface().placeholder_count(), 1);
        }
        h.release(0.0);
        assert_eq!(h.list.len(), 6);
        assert_eq!(h.list.surface().children().len(), 6);
        assert_eq!(h.list.surface().placeholder_count(), 0);
    }
}

#[test]
fn edge_auto_scroll_reveals_items_below() {
    // 10 items in a 100px viewport: max scroll is 300px.
    let labels = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let mut h = Harness::with_viewport(&labels, 100.0);
    h.grab(1);

    // Hover in the bottom band: each move scrolls one step while the
    // neighbours' midpoints drift upward past the pointer.
    let mut scrolled = 0.0;
    let mut placed = false;
    for _ in 0..20 {
        match h.move_to(85.0) {
            DispatchOutcome::Scrolled { dy } => scrolled += dy,
            DispatchOutcome::PlaceholderPlaced { .. } => placed = true,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert!(scrolled > 0.0);
    assert!(placed);
    assert_eq!(h.list.surface().scroll_y(), scrolled);
    assert!(h.placeholder_index().expect("dragging") > 1);
}

#[test]
fn edge_auto_scroll_near_top_scrolls_up() {
    let labels = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let mut h = Harness::with_viewport(&labels, 100.0);
    h.list.surface_mut().scroll_by(100.0);

    // Item 3 spans 20..60 in the viewport after scrolling.
    let target = HitTarget::grab(h.ids[3]);
    h.list.handle_event(&PointerEvent::down(12.0, 40.0).with_target(target));
    assert_eq!(h.move_to(15.0), DispatchOutcome::Scrolled { dy: -10.0 });
    assert_eq!(h.list.surface().scroll_y(), 90.0);
    assert_eq!(h.placeholder_index(), Some(3));
}

#[test]
fn channel_and_callback_observers_both_receive() {
    let mut h = Harness::new(&["A", "B"]);
    let (_, rx) = h.list.reorder_channel();
    h.grab(1);
    h.move_to(-10.0);
    let up = h.list.handle_event(&PointerEvent::up(0.0, -10.0));
    assert_eq!(up.reorder(), Some(ReorderEvent::new(1, 0)));
    assert_eq!(rx.try_recv(), Ok(ReorderEvent::new(1, 0)));
    assert_eq!(*h.events.borrow(), vec![ReorderEvent::new(1, 0)]);
}

#[test]
fn destroy_leaves_no_capture_behind() {
    let mut h = Harness::new(&["A", "B", "C"]);
    h.grab(2);
    h.move_to(10.0);
    let events = Rc::clone(&h.events);
    let surface = h.list.destroy();
    assert!(!surface.is_pointer_captured());
    assert!(!surface.is_attached());
    assert_eq!(surface.placeholder_count(), 0);
    assert!(events.borrow().is_empty());
}
