//! Rectangle layer.

use super::LayerTrait;
use crate::color::Color;
use crate::geometry::Bounds;
use kurbo::{BezPath, Point, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned filled rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleLayer {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

impl RectangleLayer {
    pub fn new(bounds: Bounds, fill: Color) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            fill,
        }
    }
}

impl LayerTrait for RectangleLayer {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test() {
        let rect = RectangleLayer::new(Bounds::new(0.0, 0.0, 100.0, 100.0), Color::black());
        assert!(rect.hit_test(Point::new(50.0, 50.0)));
        assert!(rect.hit_test(Point::new(100.0, 0.0)));
        assert!(!rect.hit_test(Point::new(150.0, 50.0)));
    }

    #[test]
    fn test_set_bounds() {
        let mut rect = RectangleLayer::new(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::black());
        rect.set_bounds(Bounds::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(rect.bounds(), Bounds::new(5.0, 6.0, 7.0, 8.0));
    }
}
