#![forbid(unsafe_code)]

//! In-memory [`Surface`] for tests, benches, and headless hosts.
//!
//! Items are laid out as a single vertical column starting at the container
//! origin (document coordinates). Nodes carrying a [`DragStyle`] are taken out
//! of flow and drawn at their explicit position, the way a fixed-position
//! element behaves in a browser. Geometry is reported in viewport coordinates,
//! i.e. document y minus the current scroll offset.

use ahash::AHashMap;
use sortable_core::{NodeId, Point, Rect, Size};

use crate::surface::{DragStyle, Surface};

/// Kind of a node owned by a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Item,
    Placeholder,
}

#[derive(Debug, Clone)]
struct NodeState {
    kind: NodeKind,
    label: String,
    size: Size,
    drag: Option<DragStyle>,
    position: Option<Point>,
}

/// Headless rendering surface with deterministic layout.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    nodes: AHashMap<NodeId, NodeState>,
    children: Vec<NodeId>,
    next_id: u64,
    origin: Point,
    width: f32,
    viewport: Size,
    scroll_y: f32,
    attached: bool,
    pointer_captured: bool,
}

impl HeadlessSurface {
    /// Create an empty surface whose list root sits at the document origin and
    /// spans the viewport width.
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: AHashMap::new(),
            children: Vec::new(),
            next_id: 1,
            origin: Point::ORIGIN,
            width: viewport.width,
            viewport,
            scroll_y: 0.0,
            attached: true,
            pointer_captured: false,
        }
    }

    /// Move the list root to `origin` (document coordinates).
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the list root width.
    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Create a detached item node. Hand it to the list to make it a child.
    pub fn create_item(&mut self, label: impl Into<String>, height: f32) -> NodeId {
        self.insert_node(NodeState {
            kind: NodeKind::Item,
            label: label.into(),
            size: Size::new(self.width, height),
            drag: None,
            position: None,
        })
    }

    /// Create one detached item per label, all of the same height.
    pub fn create_items<I, L>(&mut self, labels: I, height: f32) -> Vec<NodeId>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        labels
            .into_iter()
            .map(|label| self.create_item(label, height))
            .collect()
    }

    fn insert_node(&mut self, state: NodeState) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, state);
        id
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|state| state.kind)
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|state| state.label.as_str())
    }

    /// Labels of the item children in sequence order (placeholders skipped).
    pub fn labels(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|state| state.kind == NodeKind::Item)
            .map(|state| state.label.as_str())
            .collect()
    }

    /// Number of placeholder nodes currently in the child sequence.
    pub fn placeholder_count(&self) -> usize {
        self.children
            .iter()
            .filter(|id| self.kind(**id) == Some(NodeKind::Placeholder))
            .count()
    }

    /// Whether `node` still exists on the surface (attached or not).
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn drag_style(&self, node: NodeId) -> Option<DragStyle> {
        self.nodes.get(&node).and_then(|state| state.drag)
    }

    /// Explicit floating position, if one was set.
    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.nodes.get(&node).and_then(|state| state.position)
    }

    #[inline]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    #[inline]
    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Whether the list root is still attached to its parent.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Sum of in-flow child heights.
    pub fn content_height(&self) -> f32 {
        self.children
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|state| state.drag.is_none())
            .map(|state| state.size.height)
            .sum()
    }

    /// Largest scroll offset that still shows the bottom of the list.
    pub fn max_scroll(&self) -> f32 {
        (self.origin.y + self.content_height() - self.viewport.height).max(0.0)
    }

    fn detach(&mut self, node: NodeId) {
        self.children.retain(|&child| child != node);
    }

    fn flow_top(&self, node: NodeId) -> Option<f32> {
        let mut y = self.origin.y;
        for id in &self.children {
            let state = self.nodes.get(id)?;
            if *id == node {
                return Some(y);
            }
            if state.drag.is_none() {
                y += state.size.height;
            }
        }
        None
    }
}

impl Surface for HeadlessSurface {
    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }

    fn bounding_box(&self, node: NodeId) -> Rect {
        let Some(state) = self.nodes.get(&node) else {
            return Rect::default();
        };
        if let Some(drag) = state.drag {
            let origin = state.position.or_else(|| {
                self.flow_top(node)
                    .map(|y| Point::new(self.origin.x, y - self.scroll_y))
            });
            return origin
                .map(|origin| Rect::from_origin_size(origin, drag.size))
                .unwrap_or_default();
        }
        match self.flow_top(node) {
            Some(y) => Rect::new(
                self.origin.x,
                y - self.scroll_y,
                state.size.width,
                state.size.height,
            ),
            None => Rect::default(),
        }
    }

    fn container_box(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y - self.scroll_y,
            self.width,
            self.content_height(),
        )
    }

    fn viewport(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.viewport)
    }

    fn scroll_by(&mut self, dy: f32) {
        if !dy.is_finite() {
            return;
        }
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.max_scroll());
    }

    fn create_placeholder(&mut self, size: Size) -> NodeId {
        self.insert_node(NodeState {
            kind: NodeKind::Placeholder,
            label: String::new(),
            size,
            drag: None,
            position: None,
        })
    }

    fn insert_before(&mut self, node: NodeId, reference: NodeId) {
        if node == reference || !self.children.contains(&reference) {
            return;
        }
        self.detach(node);
        if let Some(index) = self.children.iter().position(|&c| c == reference) {
            self.children.insert(index, node);
        }
    }

    fn insert_after(&mut self, node: NodeId, reference: NodeId) {
        if node == reference || !self.children.contains(&reference) {
            return;
        }
        self.detach(node);
        if let Some(index) = self.children.iter().position(|&c| c == reference) {
            self.children.insert(index + 1, node);
        }
    }

    fn append(&mut self, node: NodeId) {
        if !self.nodes.contains_key(&node) {
            return;
        }
        self.detach(node);
        self.children.push(node);
    }

    fn replace_with(&mut self, old: NodeId, new: NodeId) {
        if old == new || !self.children.contains(&old) {
            return;
        }
        self.detach(new);
        if let Some(index) = self.children.iter().position(|&c| c == old) {
            self.children[index] = new;
        }
        self.nodes.remove(&old);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
        self.nodes.remove(&node);
    }

    fn set_drag_style(&mut self, node: NodeId, style: Option<DragStyle>) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.drag = style;
            if style.is_none() {
                state.position = None;
            }
        }
    }

    fn set_position(&mut self, node: NodeId, origin: Point) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.position = Some(origin);
        }
    }

    fn capture_pointer(&mut self) {
        self.pointer_captured = true;
    }

    fn release_pointer(&mut self) {
        self.pointer_captured = false;
    }

    fn detach_root(&mut self) {
        self.attached = false;
    }
}
