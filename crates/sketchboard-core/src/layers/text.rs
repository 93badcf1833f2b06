//! Text and sticky-note layers.

use super::LayerTrait;
use crate::color::Color;
use crate::geometry::Bounds;
use kurbo::{BezPath, Point, RoundedRect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// Largest font size a text box will scale up to.
pub const MAX_FONT_SIZE: f64 = 96.0;

/// Corner radius of a note's background.
const NOTE_CORNER_RADIUS: f64 = 4.0;

/// Font size that fits a box of the given size.
pub fn font_size_for(bounds: Bounds) -> f64 {
    (bounds.width.min(bounds.height) * 0.5).min(MAX_FONT_SIZE)
}

/// Free-standing text, `fill` colors the glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    #[serde(default)]
    pub text: String,
}

impl TextLayer {
    pub fn new(bounds: Bounds, fill: Color) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            fill,
            text: String::new(),
        }
    }
}

impl LayerTrait for TextLayer {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn fill(&self) -> Color {
        self.fill
    }

    fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_rect().to_path(0.1)
    }
}

/// Sticky note: a filled card with text drawn on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteLayer {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    #[serde(default)]
    pub text: String,
}

impl NoteLayer {
    pub fn new(bounds: Bounds, fill: Color) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            fill,
            text: String::new(),
        }
    }
}

impl LayerTrait for NoteLayer {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn fill(&self) -> Color {
        self.fill
    }

    fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    fn to_path(&self) -> BezPath {
        let radius = NOTE_CORNER_RADIUS.min(self.width / 2.0).min(self.height / 2.0);
        RoundedRect::from_rect(self.bounds().to_rect(), radius).to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_for() {
        assert!((font_size_for(Bounds::new(0.0, 0.0, 100.0, 40.0)) - 20.0).abs() < f64::EPSILON);
        assert!((font_size_for(Bounds::new(0.0, 0.0, 500.0, 500.0)) - MAX_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_text_defaults_empty() {
        let note: NoteLayer = serde_json::from_str(
            r#"{"x":0.0,"y":0.0,"width":10.0,"height":10.0,"fill":{"r":0,"g":0,"b":0}}"#,
        )
        .unwrap();
        assert!(note.text.is_empty());
    }

    #[test]
    fn test_note_hit_test() {
        let note = NoteLayer::new(Bounds::new(10.0, 10.0, 20.0, 20.0), Color::white());
        assert!(note.hit_test(Point::new(15.0, 25.0)));
        assert!(!note.hit_test(Point::new(5.0, 25.0)));
    }
}
