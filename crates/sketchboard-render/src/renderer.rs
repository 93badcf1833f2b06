//! Renderer trait abstraction.

use kurbo::{BezPath, Rect, Size};
use peniko::Color;
use sketchboard_core::Board;

/// One backend-neutral drawing operation, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
    },
    /// Text centered in `rect`.
    Text {
        rect: Rect,
        text: String,
        color: Color,
        font_size: f64,
    },
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The board to render.
    pub board: &'a Board,
    /// Viewport size in screen units.
    pub viewport_size: Size,
    pub background_color: Color,
    /// Color of the selection box, its handles and the marquee.
    pub selection_color: Color,
    /// Side of a resize handle square, in screen units.
    pub handle_size: f64,
    /// Whether collaborators' cursors are drawn.
    pub show_cursors: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(board: &'a Board, viewport_size: Size) -> Self {
        Self {
            board,
            viewport_size,
            background_color: Color::from_rgba8(245, 245, 245, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            handle_size: 8.0,
            show_cursors: true,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_handle_size(mut self, size: f64) -> Self {
        self.handle_size = size;
        self
    }

    pub fn with_cursors(mut self, show: bool) -> Self {
        self.show_cursors = show;
        self
    }

    /// Visible area in screen space.
    pub fn viewport(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.viewport_size)
    }
}

/// Trait for rendering backends.
///
/// Implementations can draw to a GPU scene, an SVG document, or a plain list
/// of commands.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame. Called once per frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
