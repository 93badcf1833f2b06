//! Interaction modes of the board.

use crate::geometry::{Bounds, Side};
use crate::layers::{Layer, LayerId, LayerKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What the pointer is currently doing. Exactly one mode is active.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CanvasMode {
    /// Idle.
    #[default]
    None,
    /// Pointer went down on empty canvas; not yet a drag.
    Pressing { origin: Point },
    /// Marquee drag.
    SelectionNet { origin: Point, current: Point },
    /// Dragging the selection.
    Translating { current: Point },
    /// Dragging a resize handle of layer `id`. Every move resizes
    /// `initial_layer`, the layer as it was when the handle was pressed.
    Resizing {
        initial_bounds: Bounds,
        corner: Side,
        id: LayerId,
        initial_layer: Box<Layer>,
    },
    /// Next click places a layer of `kind`.
    Inserting { kind: LayerKind },
    /// Freehand drawing.
    Pencil,
    /// A Text or Note layer is being edited.
    TextEditing { id: LayerId },
}

impl CanvasMode {
    /// Modes with a pointer gesture in progress.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            CanvasMode::Pressing { .. }
                | CanvasMode::SelectionNet { .. }
                | CanvasMode::Translating { .. }
                | CanvasMode::Resizing { .. }
        )
    }

    pub fn is_text_editing(&self) -> bool {
        matches!(self, CanvasMode::TextEditing { .. })
    }

    /// Marquee rectangle while in [`CanvasMode::SelectionNet`].
    pub fn marquee(&self) -> Option<Bounds> {
        match self {
            CanvasMode::SelectionNet { origin, current } => {
                Some(Bounds::from_corners(*origin, *current))
            }
            _ => None,
        }
    }
}
