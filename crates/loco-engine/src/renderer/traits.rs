//! Render target contract.
//!
//! Mirrors the subset of a 2D canvas the game draws with: a clear, a
//! save/restore transform stack, translate/scale, and sprite blits.
//! Implemented by `RenderBuffer` for the host bridge and by test doubles.

use crate::components::sprite::SpriteComponent;

pub trait RenderTarget {
    /// Start a new frame.
    fn clear(&mut self);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop back to the last saved transform.
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    /// Blit `sprite` into the rectangle (x, y, w, h) under the current transform.
    fn draw_sprite(&mut self, sprite: &SpriteComponent, x: f32, y: f32, w: f32, h: f32);
}
