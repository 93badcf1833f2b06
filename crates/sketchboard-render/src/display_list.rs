//! Renderer that records a flat list of draw commands.
//!
//! Frame order, back to front: layers in z-order with their highlight
//! outlines, the selection box and its handles, the marquee, the pencil
//! draft, then collaborators' cursors.

use kurbo::{Affine, BezPath, Point, Rect, Shape};
use peniko::Color;
use sketchboard_core::geometry::resize_handle_points;
use sketchboard_core::layers::Layer;
use sketchboard_core::{Board, actor_color};

use crate::primitive::{Primitive, stroke_outline};
use crate::renderer::{DrawCommand, RenderContext, Renderer};

const TOLERANCE: f64 = 0.1;

/// Width of selection outlines, in screen units.
const OUTLINE_WIDTH: f64 = 1.0;

/// Alpha of the marquee fill.
const MARQUEE_FILL_ALPHA: f32 = 0.1;

/// Records the commands of the last built frame.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn render_layer(&mut self, layer: &Layer, highlight: Option<Color>, transform: Affine) {
        let primitive = Primitive::from_layer(layer);
        self.commands.extend(primitive.to_commands(transform));

        if let Some(color) = highlight {
            let outline = match &primitive {
                Primitive::Path { outline, .. } => outline.clone(),
                _ => layer.to_path(),
            };
            self.commands.push(DrawCommand::Stroke {
                path: transform * outline,
                color,
                width: OUTLINE_WIDTH,
            });
        }
    }

    fn render_selection(&mut self, ctx: &RenderContext, transform: Affine) {
        let board = ctx.board;
        let Some(bounds) = board.selection_bounds() else {
            return;
        };
        self.commands.push(DrawCommand::Stroke {
            path: transform * bounds.to_rect().to_path(TOLERANCE),
            color: ctx.selection_color,
            width: OUTLINE_WIDTH,
        });

        // Resizing applies to a single layer only.
        if board.selection().len() != 1 {
            return;
        }
        let half = ctx.handle_size / 2.0;
        for (_, handle) in resize_handle_points(bounds) {
            let center = transform * handle;
            let square = Rect::new(center.x - half, center.y - half, center.x + half, center.y + half)
                .to_path(TOLERANCE);
            self.commands.push(DrawCommand::Fill {
                path: square.clone(),
                color: Color::WHITE,
            });
            self.commands.push(DrawCommand::Stroke {
                path: square,
                color: ctx.selection_color,
                width: OUTLINE_WIDTH,
            });
        }
    }

    fn render_marquee(&mut self, ctx: &RenderContext, transform: Affine) {
        let Some(marquee) = ctx.board.mode().marquee() else {
            return;
        };
        let path = transform * marquee.to_rect().to_path(TOLERANCE);
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color: ctx.selection_color.with_alpha(MARQUEE_FILL_ALPHA),
        });
        self.commands.push(DrawCommand::Stroke {
            path,
            color: ctx.selection_color,
            width: OUTLINE_WIDTH,
        });
    }

    fn render_draft(&mut self, board: &Board, transform: Affine) {
        let Some(draft) = board.pencil_draft() else {
            return;
        };
        if draft.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Fill {
            path: transform * stroke_outline(draft, Point::ZERO),
            color: board.pen_color().into(),
        });
    }

    fn render_cursors(&mut self, board: &Board) {
        for (actor, presence) in board.presence().actors() {
            if actor == board.local_actor() {
                continue;
            }
            if let Some(cursor) = presence.cursor {
                let tip = board.camera().canvas_to_screen(cursor);
                self.draw_cursor(tip, actor_color(actor).into());
            }
        }
    }

    /// Arrow pointer with its tip at `tip`.
    fn draw_cursor(&mut self, tip: Point, color: Color) {
        let mut path = BezPath::new();
        path.move_to(tip);
        path.line_to((tip.x, tip.y + 18.0));
        path.line_to((tip.x + 14.0, tip.y + 14.0));
        path.close_path();

        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
        self.commands.push(DrawCommand::Stroke {
            path,
            color: Color::WHITE,
            width: 1.5,
        });
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        let board = ctx.board;
        let transform = board.camera().transform();

        let highlights = board.highlights();
        for (id, layer) in board.scene().layers_ordered() {
            let highlight = highlights.get(id).map(|color| (*color).into());
            self.render_layer(layer, highlight, transform);
        }

        self.render_selection(ctx, transform);
        self.render_marquee(ctx, transform);
        self.render_draft(board, transform);
        if ctx.show_cursors {
            self.render_cursors(board);
        }
    }
}
