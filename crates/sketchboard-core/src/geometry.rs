//! Pure geometry helpers: bounds, marquee intersection, stroke normalization
//! and handle-driven resizing.

use crate::color::Color;
use crate::layers::{Layer, LayerId, PathLayer, StrokePoint};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Geometry errors. These indicate caller bugs, not runtime conditions.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("a stroke needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// Axis-aligned box in canvas space (XYWH). `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Box spanned by two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn union(&self, other: Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Open-interval overlap test: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }

    /// Closed containment test (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn translate(&self, delta: Vec2) -> Bounds {
        Bounds::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Bounds::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        bounds.to_rect()
    }
}

/// One of the eight resize handles around a selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Side {
    pub const ALL: [Side; 8] = [
        Side::TopLeft,
        Side::Top,
        Side::TopRight,
        Side::Right,
        Side::BottomRight,
        Side::Bottom,
        Side::BottomLeft,
        Side::Left,
    ];

    pub fn has_top(self) -> bool {
        matches!(self, Side::Top | Side::TopLeft | Side::TopRight)
    }

    pub fn has_bottom(self) -> bool {
        matches!(self, Side::Bottom | Side::BottomLeft | Side::BottomRight)
    }

    pub fn has_left(self) -> bool {
        matches!(self, Side::Left | Side::TopLeft | Side::BottomLeft)
    }

    pub fn has_right(self) -> bool {
        matches!(self, Side::Right | Side::TopRight | Side::BottomRight)
    }
}

/// Handle positions for a selection box, in [`Side::ALL`] order.
pub fn resize_handle_points(bounds: Bounds) -> [(Side, Point); 8] {
    Side::ALL.map(|side| {
        let x = if side.has_left() {
            bounds.x
        } else if side.has_right() {
            bounds.right()
        } else {
            bounds.center().x
        };
        let y = if side.has_top() {
            bounds.y
        } else if side.has_bottom() {
            bounds.bottom()
        } else {
            bounds.center().y
        };
        (side, Point::new(x, y))
    })
}

/// New bounds for dragging `side` of `initial` to `point`.
///
/// The edges opposite to the dragged ones stay fixed. Dragging past a fixed
/// edge mirrors the box to the other side of it (the dragged edge and the
/// fixed edge swap roles), so width and height are `|point - fixed edge|` and
/// never negative. Dropping the handle exactly on the fixed edge collapses
/// that dimension to zero.
pub fn resize_from_handle(initial: Bounds, side: Side, point: Point) -> Bounds {
    let mut result = initial;

    if side.has_left() {
        let fixed = initial.right();
        result.x = point.x.min(fixed);
        result.width = (fixed - point.x).abs();
    }
    if side.has_right() {
        let fixed = initial.x;
        result.x = point.x.min(fixed);
        result.width = (point.x - fixed).abs();
    }
    if side.has_top() {
        let fixed = initial.bottom();
        result.y = point.y.min(fixed);
        result.height = (fixed - point.y).abs();
    }
    if side.has_bottom() {
        let fixed = initial.y;
        result.y = point.y.min(fixed);
        result.height = (point.y - fixed).abs();
    }

    result
}

/// Union of the bounds of every given layer, `None` for no layers.
pub fn compute_bounds<'a>(layers: impl IntoIterator<Item = &'a Layer>) -> Option<Bounds> {
    layers
        .into_iter()
        .map(Layer::bounds)
        .reduce(|acc, bounds| acc.union(bounds))
}

/// Marquee test: does the box spanned by `origin`/`current` overlap the layer?
pub fn rect_intersects_layer(origin: Point, current: Point, layer: &Layer) -> bool {
    Bounds::from_corners(origin, current).intersects(&layer.bounds())
}

/// Ids (in z-order) of every layer the marquee overlaps.
pub fn find_intersecting_layers(
    order: &[LayerId],
    layers: &HashMap<LayerId, Layer>,
    origin: Point,
    current: Point,
) -> Vec<LayerId> {
    order
        .iter()
        .filter(|id| {
            layers
                .get(*id)
                .is_some_and(|layer| rect_intersects_layer(origin, current, layer))
        })
        .cloned()
        .collect()
}

/// Turn a recorded canvas-space stroke into a Path layer anchored at the
/// stroke's bounding-box minimum, with points stored relative to it.
pub fn path_to_layer(points: &[StrokePoint], fill: Color) -> Result<Layer, GeometryError> {
    if points.len() < 2 {
        return Err(GeometryError::TooFewPoints(points.len()));
    }

    let mut left = f64::INFINITY;
    let mut top = f64::INFINITY;
    let mut right = f64::NEG_INFINITY;
    let mut bottom = f64::NEG_INFINITY;
    for point in points {
        left = left.min(point.x);
        top = top.min(point.y);
        right = right.max(point.x);
        bottom = bottom.max(point.y);
    }

    let local = points
        .iter()
        .map(|p| StrokePoint::new(p.x - left, p.y - top, p.pressure))
        .collect();

    Ok(Layer::Path(PathLayer {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
        points: local,
        fill,
    }))
}

/// Ramer-Douglas-Peucker thinning. Endpoints always survive; retained samples
/// keep their pressure. A non-positive tolerance returns the input unchanged.
pub fn simplify_stroke(points: &[StrokePoint], tolerance: f64) -> Vec<StrokePoint> {
    if points.len() < 3 || tolerance <= 0.0 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(point.position(), first.position(), last.position());
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = simplify_stroke(&points[..=max_index], tolerance);
        let right = simplify_stroke(&points[max_index..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `point` to the infinite line through `start` and `end`.
fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    let line = end - start;
    let len_sq = line.hypot2();
    if len_sq < f64::EPSILON {
        return (point - start).hypot();
    }
    ((point - start).cross(line)).abs() / len_sq.sqrt()
}

/// Distance from a point to the segment `a`-`b`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{EllipseLayer, RectangleLayer};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Layer {
        Layer::Rectangle(RectangleLayer::new(Bounds::new(x, y, w, h), Color::black()))
    }

    #[test]
    fn test_bounds_from_corners_any_direction() {
        let b = Bounds::from_corners(Point::new(60.0, 60.0), Point::new(-10.0, -10.0));
        assert_eq!(b, Bounds::new(-10.0, -10.0, 70.0, 70.0));
    }

    #[test]
    fn test_compute_bounds() {
        assert_eq!(compute_bounds(std::iter::empty::<&Layer>()), None);

        let layers = [rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 5.0, 10.0, 20.0)];
        assert_eq!(
            compute_bounds(&layers),
            Some(Bounds::new(0.0, 0.0, 30.0, 25.0))
        );
    }

    #[test]
    fn test_marquee_example() {
        let mut layers = HashMap::new();
        layers.insert("r".to_string(), rect(0.0, 0.0, 50.0, 50.0));
        layers.insert(
            "e".to_string(),
            Layer::Ellipse(EllipseLayer::new(
                Bounds::new(200.0, 200.0, 50.0, 50.0),
                Color::black(),
            )),
        );
        let order = vec!["r".to_string(), "e".to_string()];

        let hits = find_intersecting_layers(
            &order,
            &layers,
            Point::new(-10.0, -10.0),
            Point::new(60.0, 60.0),
        );
        assert_eq!(hits, vec!["r".to_string()]);

        // Dragging up-left from below-right selects the same thing.
        let hits = find_intersecting_layers(
            &order,
            &layers,
            Point::new(60.0, 60.0),
            Point::new(-10.0, -10.0),
        );
        assert_eq!(hits, vec!["r".to_string()]);

        let hits = find_intersecting_layers(
            &order,
            &layers,
            Point::new(0.0, 0.0),
            Point::new(300.0, 300.0),
        );
        assert_eq!(hits, order);
    }

    #[test]
    fn test_resize_bottom_right_grows() {
        let initial = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let result = resize_from_handle(initial, Side::BottomRight, Point::new(80.0, 70.0));
        assert_eq!(result, Bounds::new(0.0, 0.0, 80.0, 70.0));
    }

    #[test]
    fn test_resize_past_fixed_corner_mirrors() {
        let initial = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let result = resize_from_handle(initial, Side::BottomRight, Point::new(-10.0, -10.0));
        assert_eq!(result, Bounds::new(-10.0, -10.0, 10.0, 10.0));
        assert!(result.width >= 0.0 && result.height >= 0.0);
    }

    #[test]
    fn test_resize_collapsed_on_fixed_edge() {
        let initial = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let result = resize_from_handle(initial, Side::BottomRight, Point::new(0.0, 0.0));
        assert_eq!(result, Bounds::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_resize_edge_keeps_other_axis() {
        let initial = Bounds::new(10.0, 10.0, 50.0, 40.0);
        let result = resize_from_handle(initial, Side::Left, Point::new(0.0, 999.0));
        assert_eq!(result, Bounds::new(0.0, 10.0, 60.0, 40.0));

        let result = resize_from_handle(initial, Side::Top, Point::new(-5.0, 30.0));
        assert_eq!(result, Bounds::new(10.0, 30.0, 50.0, 20.0));
    }

    #[test]
    fn test_handle_points() {
        let handles = resize_handle_points(Bounds::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(handles[0], (Side::TopLeft, Point::new(0.0, 0.0)));
        assert_eq!(handles[1], (Side::Top, Point::new(50.0, 0.0)));
        assert_eq!(handles[4], (Side::BottomRight, Point::new(100.0, 50.0)));
        assert_eq!(handles[7], (Side::Left, Point::new(0.0, 25.0)));
    }

    #[test]
    fn test_path_to_layer_normalizes() {
        let points = [
            StrokePoint::new(10.0, 10.0, 0.5),
            StrokePoint::new(15.0, 12.0, 0.6),
            StrokePoint::new(20.0, 10.0, 0.4),
        ];
        let Layer::Path(path) = path_to_layer(&points, Color::black()).unwrap() else {
            panic!("Expected Path layer");
        };
        assert_eq!((path.x, path.y), (10.0, 10.0));
        assert_eq!((path.width, path.height), (10.0, 2.0));
        assert_eq!(
            path.points,
            vec![
                StrokePoint::new(0.0, 0.0, 0.5),
                StrokePoint::new(5.0, 2.0, 0.6),
                StrokePoint::new(10.0, 0.0, 0.4),
            ]
        );
    }

    #[test]
    fn test_path_to_layer_rejects_single_point() {
        let points = [StrokePoint::new(1.0, 1.0, 0.5)];
        assert_eq!(
            path_to_layer(&points, Color::black()),
            Err(GeometryError::TooFewPoints(1))
        );
    }

    #[test]
    fn test_simplify_stroke() {
        let points = [
            StrokePoint::new(0.0, 0.0, 0.5),
            StrokePoint::new(1.0, 0.1, 0.5),
            StrokePoint::new(2.0, 0.0, 0.5),
            StrokePoint::new(3.0, 0.1, 0.5),
            StrokePoint::new(4.0, 0.0, 0.7),
        ];
        let simplified = simplify_stroke(&points, 0.5);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[1].pressure, 0.7);

        assert_eq!(simplify_stroke(&points, 0.0).len(), 5);
    }

    #[test]
    fn test_point_to_segment_dist() {
        let d = point_to_segment_dist(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-10);
    }
}
