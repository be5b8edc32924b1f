use bytemuck::{Pod, Zeroable};
use crate::components::sprite::SpriteComponent;
use crate::renderer::traits::RenderTarget;

/// Per-sprite render record written to the shared buffer for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Coordinates are final screen-space values; camera translation and
/// mirroring have already been applied.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Left edge on screen.
    pub x: f32,
    /// Top edge on screen.
    pub y: f32,
    /// Width on screen (always positive).
    pub width: f32,
    /// Height on screen (always positive).
    pub height: f32,
    /// Sprite sheet index.
    pub atlas: f32,
    /// Atlas column.
    pub col: f32,
    /// Atlas row.
    pub row: f32,
    /// 1.0 when the image is drawn mirrored horizontally.
    pub flip_x: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn is_flipped(&self) -> bool {
        self.flip_x != 0.0
    }
}

/// Affine 2D transform limited to translate + axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    sx: f32,
    sy: f32,
    tx: f32,
    ty: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform { sx: 1.0, sy: 1.0, tx: 0.0, ty: 0.0 };
}

/// Render buffer recording sprite instances in draw order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    current: Transform,
    stack: Vec<Transform>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            current: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Number of unmatched `save` calls.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the current transform is the identity.
    pub fn is_identity(&self) -> bool {
        self.current == Transform::IDENTITY
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl RenderTarget for RenderBuffer {
    fn clear(&mut self) {
        self.instances.clear();
        self.current = Transform::IDENTITY;
        self.stack.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(t) => self.current = t,
            None => log::debug!("render: restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.current.tx += self.current.sx * dx;
        self.current.ty += self.current.sy * dy;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.current.sx *= sx;
        self.current.sy *= sy;
    }

    fn draw_sprite(&mut self, sprite: &SpriteComponent, x: f32, y: f32, w: f32, h: f32) {
        let t = self.current;
        let x0 = t.sx * x + t.tx;
        let x1 = t.sx * (x + w) + t.tx;
        let y0 = t.sy * y + t.ty;
        let y1 = t.sy * (y + h) + t.ty;
        self.instances.push(RenderInstance {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
            atlas: sprite.atlas.0 as f32,
            col: sprite.col,
            row: sprite.row,
            flip_x: if t.sx < 0.0 { 1.0 } else { 0.0 },
        });
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
    }

    #[test]
    fn translate_moves_draws() {
        let mut buf = RenderBuffer::new();
        buf.translate(-300.0, 0.0);
        buf.draw_sprite(&SpriteComponent::default(), 400.0, 50.0, 100.0, 80.0);
        let inst = buf.instances[0];
        assert_eq!((inst.x, inst.y, inst.width, inst.height), (100.0, 50.0, 100.0, 80.0));
        assert!(!inst.is_flipped());
    }

    #[test]
    fn mirrored_draw_covers_the_same_rect() {
        let mut buf = RenderBuffer::new();
        buf.save();
        buf.translate(120.0, 0.0);
        buf.scale(-1.0, 1.0);
        buf.draw_sprite(&SpriteComponent::default(), -300.0, 170.0, 120.0, 250.0);
        buf.restore();
        let inst = buf.instances[0];
        assert_eq!((inst.x, inst.width), (300.0, 120.0));
        assert!(inst.is_flipped());
        assert_eq!(buf.stack_depth(), 0);
        assert!(buf.is_identity());
    }

    #[test]
    fn unmatched_restore_is_ignored() {
        let mut buf = RenderBuffer::new();
        buf.translate(5.0, 0.0);
        buf.restore();
        assert!(!buf.is_identity());
        buf.clear();
        assert!(buf.is_identity());
        assert_eq!(buf.instance_count(), 0);
    }
}
