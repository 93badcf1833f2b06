//! Lowering of layers into drawable primitives.

use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Shape, Vec2};
use peniko::Color;
use sketchboard_core::color::Color as LayerColor;
use sketchboard_core::layers::{Layer, PATH_STROKE_SIZE, StrokePoint, font_size_for};

use crate::renderer::DrawCommand;

/// Font size of free text layers.
pub const TEXT_FONT_SIZE: f64 = 18.0;

/// Corner radius of sticky notes.
pub const NOTE_CORNER_RADIUS: f64 = 4.0;

const NOTE_SHADOW_OFFSET: Vec2 = Vec2::new(0.0, 2.0);
const NOTE_SHADOW_ALPHA: u8 = 40;

/// Geometry tolerance for curve flattening.
const TOLERANCE: f64 = 0.1;

/// A layer reduced to what a backend needs to draw it, in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        rect: Rect,
        color: Color,
    },
    Ellipse {
        path: BezPath,
        color: Color,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        font_size: f64,
    },
    Note {
        rect: Rect,
        text: String,
        fill: Color,
        text_color: Color,
        font_size: f64,
    },
    /// Filled outline of a pressure-sensitive stroke.
    Path {
        outline: BezPath,
        color: Color,
    },
}

impl Primitive {
    pub fn from_layer(layer: &Layer) -> Self {
        let rect = layer.bounds().to_rect();
        match layer {
            Layer::Rectangle(l) => Primitive::Rect {
                rect,
                color: l.fill.into(),
            },
            Layer::Ellipse(l) => Primitive::Ellipse {
                path: l.as_kurbo().to_path(TOLERANCE),
                color: l.fill.into(),
            },
            Layer::Text(l) => Primitive::Text {
                rect,
                text: l.text.clone(),
                color: l.fill.into(),
                font_size: TEXT_FONT_SIZE,
            },
            Layer::Note(l) => Primitive::Note {
                rect,
                text: l.text.clone(),
                fill: l.fill.into(),
                text_color: contrasting_text_color(l.fill),
                font_size: font_size_for(layer.bounds()),
            },
            Layer::Path(l) => Primitive::Path {
                outline: stroke_outline(&l.points, Point::new(l.x, l.y)),
                color: l.fill.into(),
            },
        }
    }

    /// Draw commands in screen space.
    pub fn to_commands(&self, transform: Affine) -> Vec<DrawCommand> {
        match self {
            Primitive::Rect { rect, color } => vec![DrawCommand::Fill {
                path: transform * rect.to_path(TOLERANCE),
                color: *color,
            }],
            Primitive::Ellipse { path, color } => vec![DrawCommand::Fill {
                path: transform * path.clone(),
                color: *color,
            }],
            Primitive::Text {
                rect,
                text,
                color,
                font_size,
            } => text_command(transform, *rect, text, *color, *font_size)
                .into_iter()
                .collect(),
            Primitive::Note {
                rect,
                text,
                fill,
                text_color,
                font_size,
            } => {
                let shape = RoundedRect::from_rect(*rect, NOTE_CORNER_RADIUS).to_path(TOLERANCE);
                let mut commands = vec![
                    DrawCommand::Fill {
                        path: transform * Affine::translate(NOTE_SHADOW_OFFSET) * shape.clone(),
                        color: Color::from_rgba8(0, 0, 0, NOTE_SHADOW_ALPHA),
                    },
                    DrawCommand::Fill {
                        path: transform * shape,
                        color: *fill,
                    },
                ];
                commands.extend(text_command(transform, *rect, text, *text_color, *font_size));
                commands
            }
            Primitive::Path { outline, color } => vec![DrawCommand::Fill {
                path: transform * outline.clone(),
                color: *color,
            }],
        }
    }
}

fn text_command(
    transform: Affine,
    rect: Rect,
    text: &str,
    color: Color,
    font_size: f64,
) -> Option<DrawCommand> {
    if text.is_empty() {
        return None;
    }
    Some(DrawCommand::Text {
        rect: transform.transform_rect_bbox(rect),
        text: text.to_string(),
        color,
        font_size,
    })
}

/// Black or white, whichever reads better on `fill`.
pub fn contrasting_text_color(fill: LayerColor) -> Color {
    let luminance = 0.299 * fill.r as f64 + 0.587 * fill.g as f64 + 0.114 * fill.b as f64;
    if luminance > 182.0 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Half width of a stroke at `pressure`. `PATH_STROKE_SIZE / 2` at 0.5.
pub fn stroke_radius(pressure: f64) -> f64 {
    PATH_STROKE_SIZE * (0.5 - 0.5 * (0.5 - pressure.clamp(0.0, 1.0)))
}

/// Closed outline around the samples of a stroke, offset by `origin`.
///
/// Each sample is pushed out along the normal of its neighbours by its
/// pressure radius; a lone sample becomes a dot.
pub fn stroke_outline(points: &[StrokePoint], origin: Point) -> BezPath {
    let origin = origin.to_vec2();
    let centers: Vec<Point> = points.iter().map(|p| p.position() + origin).collect();
    match centers.len() {
        0 => return BezPath::new(),
        1 => {
            return Circle::new(centers[0], stroke_radius(points[0].pressure)).to_path(TOLERANCE);
        }
        _ => {}
    }

    let last = centers.len() - 1;
    let mut left = Vec::with_capacity(centers.len());
    let mut right = Vec::with_capacity(centers.len());
    let mut normal = Vec2::new(0.0, 1.0);
    for (i, center) in centers.iter().enumerate() {
        let direction = centers[(i + 1).min(last)] - centers[i.saturating_sub(1)];
        let length = direction.hypot();
        if length > f64::EPSILON {
            normal = Vec2::new(-direction.y, direction.x) / length;
        }
        let offset = normal * stroke_radius(points[i].pressure);
        left.push(*center + offset);
        right.push(*center - offset);
    }

    let mut path = BezPath::new();
    path.move_to(left[0]);
    for point in &left[1..] {
        path.line_to(*point);
    }
    for point in right.iter().rev() {
        path.line_to(*point);
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard_core::geometry::{Bounds, path_to_layer};
    use sketchboard_core::layers::LayerKind;

    fn layer(kind: LayerKind) -> Layer {
        Layer::from_kind(kind, Bounds::new(10.0, 20.0, 100.0, 60.0), LayerColor::new(250, 230, 80))
            .unwrap()
    }

    #[test]
    fn test_stroke_radius() {
        assert_eq!(stroke_radius(0.5), PATH_STROKE_SIZE / 2.0);
        assert_eq!(stroke_radius(1.0), 12.0);
        assert_eq!(stroke_radius(0.0), 4.0);
        assert_eq!(stroke_radius(7.0), 12.0);
    }

    #[test]
    fn test_outline_surrounds_stroke() {
        let points = [
            StrokePoint::new(0.0, 0.0, 0.5),
            StrokePoint::new(50.0, 0.0, 0.5),
            StrokePoint::new(100.0, 0.0, 0.5),
        ];
        let outline = stroke_outline(&points, Point::new(10.0, 10.0));
        let bbox = outline.bounding_box();
        assert_eq!(bbox, Rect::new(10.0, 2.0, 110.0, 18.0));
        assert!(outline.contains(Point::new(60.0, 10.0)));
        assert!(!outline.contains(Point::new(60.0, 30.0)));
    }

    #[test]
    fn test_outline_degenerate() {
        assert_eq!(stroke_outline(&[], Point::ZERO), BezPath::new());

        let dot = stroke_outline(&[StrokePoint::new(5.0, 5.0, 0.5)], Point::ZERO);
        assert!(dot.contains(Point::new(5.0, 5.0)));

        // Repeated samples keep the last usable normal instead of dividing by zero.
        let points = [
            StrokePoint::new(0.0, 0.0, 0.5),
            StrokePoint::new(0.0, 0.0, 0.5),
        ];
        let outline = stroke_outline(&points, Point::ZERO);
        assert!(outline.bounding_box().is_finite());
    }

    #[test]
    fn test_note_primitive() {
        let note = layer(LayerKind::Note).with_text("hello");
        let Primitive::Note {
            rect,
            text,
            text_color,
            font_size,
            ..
        } = Primitive::from_layer(&note)
        else {
            panic!("Expected note primitive");
        };
        assert_eq!(rect, Rect::new(10.0, 20.0, 110.0, 80.0));
        assert_eq!(text, "hello");
        // Light yellow gets dark text.
        assert_eq!(text_color, Color::BLACK);
        assert_eq!(font_size, 30.0);

        let commands = Primitive::from_layer(&note).to_commands(Affine::IDENTITY);
        assert_eq!(commands.len(), 3);
        assert!(matches!(&commands[2], DrawCommand::Text { text, .. } if text == "hello"));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let text = layer(LayerKind::Text);
        assert!(Primitive::from_layer(&text)
            .to_commands(Affine::IDENTITY)
            .is_empty());

        let commands = Primitive::from_layer(&text.with_text("x"))
            .to_commands(Affine::translate((5.0, 0.0)));
        let [DrawCommand::Text { rect, font_size, .. }] = commands.as_slice() else {
            panic!("Expected one text command");
        };
        assert_eq!(*rect, Rect::new(15.0, 20.0, 115.0, 80.0));
        assert_eq!(*font_size, TEXT_FONT_SIZE);
    }

    #[test]
    fn test_path_primitive_uses_anchor() {
        let points = [
            StrokePoint::new(100.0, 100.0, 0.5),
            StrokePoint::new(140.0, 100.0, 0.5),
        ];
        let layer = path_to_layer(&points, LayerColor::black()).unwrap();
        let Primitive::Path { outline, color } = Primitive::from_layer(&layer) else {
            panic!("Expected path primitive");
        };
        assert_eq!(color, Color::from_rgba8(0, 0, 0, 255));
        assert!(outline.contains(Point::new(120.0, 100.0)));
    }

    #[test]
    fn test_contrasting_text_color() {
        assert_eq!(contrasting_text_color(LayerColor::white()), Color::BLACK);
        assert_eq!(contrasting_text_color(LayerColor::black()), Color::WHITE);
    }
}
