//! Camera module for the viewport pan transform.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the viewport offset of the board.
///
/// The board only pans; a canvas point is drawn at `canvas + offset` on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen units.
    pub offset: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas -> screen transform, for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset)
    }

    /// Screen -> canvas transform, for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.offset)
    }

    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        screen_point - self.offset
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        canvas_point + self.offset
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Scroll the view. Content follows the wheel in the opposite direction.
    pub fn scroll(&mut self, wheel_delta: Vec2) {
        self.offset -= wheel_delta;
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }
}
