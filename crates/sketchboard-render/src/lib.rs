//! Sketchboard Render Library
//!
//! Turns a [`Board`](sketchboard_core::Board) into backend-neutral draw
//! commands. GPU or SVG backends implement [`Renderer`] on top of the same
//! primitives.

pub mod display_list;
pub mod primitive;
pub mod renderer;

pub use display_list::DisplayListRenderer;
pub use primitive::{Primitive, stroke_outline};
pub use renderer::{DrawCommand, RenderContext, Renderer};
