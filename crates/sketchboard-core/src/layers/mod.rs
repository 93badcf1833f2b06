//! Layer definitions for the board.

mod ellipse;
mod path;
mod rectangle;
mod text;

pub use ellipse::EllipseLayer;
pub use path::{PATH_STROKE_SIZE, PathLayer, StrokePoint};
pub use rectangle::RectangleLayer;
pub use text::{MAX_FONT_SIZE, NoteLayer, TextLayer, font_size_for};

use crate::color::Color;
use crate::geometry::Bounds;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = String;

/// Generate a fresh layer id.
pub fn new_layer_id() -> LayerId {
    Uuid::new_v4().to_string()
}

/// Discriminant of [`Layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Rectangle,
    Ellipse,
    Text,
    Note,
    Path,
}

impl LayerKind {
    /// Kinds that can be placed with a single click (everything but Path).
    pub fn is_insertable(self) -> bool {
        !matches!(self, LayerKind::Path)
    }

    /// Kinds that carry editable text.
    pub fn is_textual(self) -> bool {
        matches!(self, LayerKind::Text | LayerKind::Note)
    }
}

/// Common behavior of every layer variant.
pub trait LayerTrait {
    /// Bounding box in canvas coordinates.
    fn bounds(&self) -> Bounds;

    fn fill(&self) -> Color;

    fn set_fill(&mut self, fill: Color);

    /// Move and scale the layer so its bounds become `bounds`.
    fn set_bounds(&mut self, bounds: Bounds);

    fn translate(&mut self, delta: Vec2);

    /// Check if a canvas-space point hits this layer.
    fn hit_test(&self, point: Point) -> bool;

    /// Outline (or centerline, for strokes) in canvas coordinates.
    fn to_path(&self) -> BezPath;
}

/// A drawable board object. Serialized as a record tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    Rectangle(RectangleLayer),
    Ellipse(EllipseLayer),
    Text(TextLayer),
    Note(NoteLayer),
    Path(PathLayer),
}

impl Layer {
    /// Create a box-shaped layer of `kind`. Returns `None` for [`LayerKind::Path`],
    /// which can only come from a recorded stroke.
    pub fn from_kind(kind: LayerKind, bounds: Bounds, fill: Color) -> Option<Layer> {
        match kind {
            LayerKind::Rectangle => Some(Layer::Rectangle(RectangleLayer::new(bounds, fill))),
            LayerKind::Ellipse => Some(Layer::Ellipse(EllipseLayer::new(bounds, fill))),
            LayerKind::Text => Some(Layer::Text(TextLayer::new(bounds, fill))),
            LayerKind::Note => Some(Layer::Note(NoteLayer::new(bounds, fill))),
            LayerKind::Path => None,
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Rectangle(_) => LayerKind::Rectangle,
            Layer::Ellipse(_) => LayerKind::Ellipse,
            Layer::Text(_) => LayerKind::Text,
            Layer::Note(_) => LayerKind::Note,
            Layer::Path(_) => LayerKind::Path,
        }
    }

    fn inner(&self) -> &dyn LayerTrait {
        match self {
            Layer::Rectangle(l) => l,
            Layer::Ellipse(l) => l,
            Layer::Text(l) => l,
            Layer::Note(l) => l,
            Layer::Path(l) => l,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn LayerTrait {
        match self {
            Layer::Rectangle(l) => l,
            Layer::Ellipse(l) => l,
            Layer::Text(l) => l,
            Layer::Note(l) => l,
            Layer::Path(l) => l,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.inner().bounds()
    }

    pub fn fill(&self) -> Color {
        self.inner().fill()
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.inner().hit_test(point)
    }

    pub fn to_path(&self) -> BezPath {
        self.inner().to_path()
    }

    /// Text content of Text and Note layers.
    pub fn text(&self) -> Option<&str> {
        match self {
            Layer::Text(l) => Some(&l.text),
            Layer::Note(l) => Some(&l.text),
            Layer::Rectangle(_) | Layer::Ellipse(_) | Layer::Path(_) => None,
        }
    }

    // Copy-on-write edits: the stored value is never modified in place; the
    // store swaps in the returned layer.

    pub fn translated(&self, delta: Vec2) -> Layer {
        let mut next = self.clone();
        next.inner_mut().translate(delta);
        next
    }

    pub fn resized(&self, bounds: Bounds) -> Layer {
        let mut next = self.clone();
        next.inner_mut().set_bounds(bounds);
        next
    }

    pub fn with_fill(&self, fill: Color) -> Layer {
        let mut next = self.clone();
        next.inner_mut().set_fill(fill);
        next
    }

    /// Replace the text of a Text/Note layer. Other kinds come back unchanged.
    pub fn with_text(&self, text: impl Into<String>) -> Layer {
        let mut next = self.clone();
        match &mut next {
            Layer::Text(l) => l.text = text.into(),
            Layer::Note(l) => l.text = text.into(),
            Layer::Rectangle(_) | Layer::Ellipse(_) | Layer::Path(_) => {}
        }
        next
    }
}
