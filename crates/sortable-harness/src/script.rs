#![forbid(unsafe_code)]

//! Gesture scripts and their replay against a headless list.

use serde::{Deserialize, Serialize};
use sortable_core::{HitTarget, Marker, NodeId, PointerButton, PointerEvent, PointerEventKind, Size};
use sortable_widgets::{HeadlessSurface, ReorderEvent, SortableList, SortableListConfig};

use crate::error::{HarnessError, Result};

const DEFAULT_ITEM_HEIGHT: f32 = 40.0;

/// One list item in a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub label: String,
    #[serde(default = "default_item_height")]
    pub height: f32,
}

fn default_item_height() -> f32 {
    DEFAULT_ITEM_HEIGHT
}

/// Which handle a scripted pointer-down lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    #[default]
    Grab,
    Delete,
    Content,
}

impl From<Handle> for Marker {
    fn from(handle: Handle) -> Self {
        match handle {
            Handle::Grab => Marker::GrabHandle,
            Handle::Delete => Marker::DeleteHandle,
            Handle::Content => Marker::Content,
        }
    }
}

/// One scripted pointer event. `item` indexes the script's `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Down {
        item: usize,
        #[serde(default)]
        handle: Handle,
        x: f32,
        y: f32,
    },
    Move {
        x: f32,
        y: f32,
    },
    Up {
        x: f32,
        y: f32,
    },
}

/// A list plus the gesture to replay on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub items: Vec<ItemSpec>,
    pub steps: Vec<Step>,
}

impl Script {
    /// Three items; drag the first past both midpoints and drop it last.
    pub fn demo() -> Self {
        let items = ["A", "B", "C"]
            .into_iter()
            .map(|label| ItemSpec {
                label: label.to_string(),
                height: DEFAULT_ITEM_HEIGHT,
            })
            .collect();
        Self {
            items,
            steps: vec![
                Step::Down {
                    item: 0,
                    handle: Handle::Grab,
                    x: 12.0,
                    y: 20.0,
                },
                Step::Move { x: 12.0, y: 61.0 },
                Step::Move { x: 12.0, y: 101.0 },
                Step::Up { x: 12.0, y: 101.0 },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Final item labels, top to bottom.
    pub order: Vec<String>,
    /// Reorder events in emission order.
    pub events: Vec<ReorderEvent>,
    /// Steps the list acted on.
    pub handled: usize,
    /// Steps the list ignored.
    pub ignored: usize,
    pub scroll_y: f32,
}

/// Replay `script` on a fresh headless list.
pub fn replay(script: &Script, viewport: Size, config: SortableListConfig) -> Result<Report> {
    let mut surface = HeadlessSurface::new(viewport);
    let ids: Vec<NodeId> = script
        .items
        .iter()
        .map(|item| surface.create_item(item.label.clone(), item.height))
        .collect();
    let mut list = SortableList::new(surface, ids.clone(), config)?;
    let (_, rx) = list.reorder_channel();

    let mut handled = 0;
    let mut ignored = 0;
    for (index, step) in script.steps.iter().enumerate() {
        let event = match *step {
            Step::Down { item, handle, x, y } => {
                let node = ids.get(item).copied().ok_or(HarnessError::UnknownItem {
                    step: index,
                    item,
                    count: ids.len(),
                })?;
                PointerEvent::new(PointerEventKind::Down(PointerButton::Primary), x, y)
                    .with_target(HitTarget::new(node, handle.into()))
            }
            Step::Move { x, y } => PointerEvent::moved(x, y),
            Step::Up { x, y } => PointerEvent::up(x, y),
        };
        let dispatch = list.handle_event(&event);
        tracing::info!(
            step = index,
            phase = ?dispatch.phase,
            outcome = ?dispatch.outcome,
            prevent_default = dispatch.prevent_default,
            "dispatched"
        );
        if dispatch.is_ignored() {
            ignored += 1;
        } else {
            handled += 1;
        }
    }

    if list.is_dragging() {
        tracing::warn!("script ended mid-drag; abandoning the drag");
    }
    let scroll_y = list.surface().scroll_y();
    let surface = list.destroy();
    let order = surface
        .labels()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Report {
        order,
        events: rx.try_iter().collect(),
        handled,
        ignored,
        scroll_y,
    })
}
