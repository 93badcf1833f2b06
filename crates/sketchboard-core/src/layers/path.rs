//! Freehand pencil strokes.

use super::LayerTrait;
use crate::color::Color;
use crate::geometry::{Bounds, point_to_segment_dist};
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Nominal stroke width of a Path layer, in canvas units.
pub const PATH_STROKE_SIZE: f64 = 16.0;

/// One pointer sample of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Pen pressure in `0.0..=1.0`.
    pub pressure: f64,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A stroke anchored at `(x, y)`. `points` are relative to the anchor, so the
/// layer moves by changing `x`/`y` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLayer {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub points: Vec<StrokePoint>,
    pub fill: Color,
}

impl PathLayer {
    /// Sample positions in canvas coordinates.
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        let anchor = Vec2::new(self.x, self.y);
        self.points.iter().map(move |p| p.position() + anchor)
    }
}

impl LayerTrait for PathLayer {
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
        // Scale the relative samples into the new box. A collapsed source axis
        // has nothing to scale, so its samples stay put.
        let sx = if self.width > 0.0 {
            bounds.width / self.width
        } else {
            1.0
        };
        let sy = if self.height > 0.0 {
            bounds.height / self.height
        } else {
            1.0
        };
        for point in &mut self.points {
            point.x *= sx;
            point.y *= sy;
        }
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
        let tolerance = PATH_STROKE_SIZE / 2.0;
        let points: Vec<Point> = self.absolute_points().collect();
        match points.as_slice() {
            [] => false,
            [only] => (point - *only).hypot() <= tolerance,
            _ => points
                .windows(2)
                .any(|w| point_to_segment_dist(point, w[0], w[1]) <= tolerance),
        }
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.absolute_points();
        if let Some(first) = points.next() {
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PathLayer {
        PathLayer {
            x: 100.0,
            y: 100.0,
            width: 20.0,
            height: 10.0,
            points: vec![
                StrokePoint::new(0.0, 0.0, 0.5),
                StrokePoint::new(20.0, 10.0, 0.5),
            ],
            fill: Color::black(),
        }
    }

    #[test]
    fn test_hit_test_near_stroke() {
        let path = sample();
        assert!(path.hit_test(Point::new(110.0, 105.0)));
        assert!(path.hit_test(Point::new(100.0, 106.0)));
        assert!(!path.hit_test(Point::new(100.0, 130.0)));
    }

    #[test]
    fn test_translate_keeps_relative_points() {
        let mut path = sample();
        path.translate(Vec2::new(5.0, 5.0));
        assert_eq!(path.points, sample().points);
        assert_eq!(path.bounds().origin(), Point::new(105.0, 105.0));
    }

    #[test]
    fn test_set_bounds_scales_points() {
        let mut path = sample();
        path.set_bounds(Bounds::new(0.0, 0.0, 40.0, 5.0));
        assert_eq!(path.points[1], StrokePoint::new(40.0, 5.0, 0.5));
        assert_eq!(path.points[0], StrokePoint::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_to_path_absolute() {
        let path = sample().to_path();
        let elements: Vec<_> = path.elements().to_vec();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], kurbo::PathEl::MoveTo(Point::new(100.0, 100.0)));
        assert_eq!(elements[1], kurbo::PathEl::LineTo(Point::new(120.0, 110.0)));
    }
}
