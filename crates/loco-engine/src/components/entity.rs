use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::animation::Animator;
use crate::components::health::{Health, HitOutcome};
use crate::components::sprite::SpriteComponent;
use crate::core::collision::{Collider, HitBox, Inset};
use crate::core::physics::{self, Body};

/// Fat Entity: a single struct with optional capability components.
/// Systems act on whichever capabilities an entity carries.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for logs and lookups.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Top-left corner in world space (y grows downward).
    pub pos: Vec2,
    /// Rendered size in world units.
    pub size: Vec2,
    /// Collision inset relative to the sprite bounds.
    pub inset: Inset,
    /// Drawn mirrored horizontally.
    pub facing_left: bool,
    /// Sprite component (optional; entities without sprites are invisible).
    pub sprite: Option<SpriteComponent>,
    /// Velocity and gravity (optional; static entities have none).
    pub body: Option<Body>,
    /// Energy and hit timers (optional).
    pub health: Option<Health>,
    /// Clip player (optional).
    pub animator: Option<Animator>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            inset: Inset::ZERO,
            facing_left: false,
            sprite: None,
            body: None,
            health: None,
            animator: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_inset(mut self, inset: Inset) -> Self {
        self.inset = inset;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    // -- Movement --

    /// Step right by the body's horizontal speed and face right.
    pub fn move_right(&mut self) {
        if let Some(body) = &self.body {
            self.pos.x += body.speed_x;
            self.facing_left = false;
        }
    }

    /// Step left by the body's horizontal speed. Facing is left to the caller.
    pub fn move_left(&mut self) {
        if let Some(body) = &self.body {
            self.pos.x -= body.speed_x;
        }
    }

    /// Entities without a body are always on the ground.
    pub fn is_above_ground(&self) -> bool {
        self.body
            .as_ref()
            .map(|b| b.is_above_ground(self.pos.y))
            .unwrap_or(false)
    }

    /// One gravity step; a no-op for bodiless entities.
    pub fn apply_gravity(&mut self) -> bool {
        match &mut self.body {
            Some(body) => physics::apply_gravity(&mut self.pos, body),
            None => false,
        }
    }

    // -- Health --

    pub fn energy(&self) -> u32 {
        self.health.as_ref().map(|h| h.energy()).unwrap_or(0)
    }

    /// Entities without health never die.
    pub fn is_dead(&self) -> bool {
        self.health.as_ref().map(|h| h.is_dead()).unwrap_or(false)
    }

    pub fn is_hurt(&self, now_ms: u64) -> bool {
        self.health.as_ref().map(|h| h.is_hurt(now_ms)).unwrap_or(false)
    }

    pub fn hit(&mut self, now_ms: u64) -> HitOutcome {
        match &mut self.health {
            Some(h) => h.hit(now_ms),
            None => HitOutcome::Ignored,
        }
    }
}

impl Collider for Entity {
    fn hit_box(&self) -> HitBox {
        HitBox::new(self.pos, self.size, self.inset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::Ground;

    #[test]
    fn movement_uses_body_speed_and_sets_facing() {
        let mut e = Entity::new(EntityId(1))
            .with_pos(Vec2::new(100.0, 170.0))
            .with_body(Body::new(5.0, 2.0, Ground::Floor(170.0)));
        e.facing_left = true;
        e.move_right();
        assert_eq!(e.pos.x, 105.0);
        assert!(!e.facing_left);
        e.move_left();
        assert_eq!(e.pos.x, 100.0);
    }

    #[test]
    fn bodiless_entities_stay_put() {
        let mut e = Entity::new(EntityId(2)).with_pos(Vec2::new(10.0, 10.0));
        e.move_right();
        assert!(!e.apply_gravity());
        assert!(!e.is_above_ground());
        assert_eq!(e.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn collision_uses_inset_boxes() {
        let a = Entity::new(EntityId(1))
            .with_size(Vec2::new(100.0, 100.0))
            .with_inset(Inset::uniform(35.0));
        let b = Entity::new(EntityId(2))
            .with_pos(Vec2::new(60.0, 0.0))
            .with_size(Vec2::new(100.0, 100.0))
            .with_inset(Inset::uniform(35.0));
        // Sprites overlap by 40, inset boxes (35..65 and 95..125) do not.
        assert!(!a.is_colliding(&b));
        assert!(!b.is_colliding(&a));
    }

    #[test]
    fn health_capability_drives_death() {
        let mut e = Entity::new(EntityId(3)).with_health(Health::new(1));
        assert!(!e.is_dead());
        assert_eq!(e.hit(10), HitOutcome::Killed);
        assert!(e.is_dead());
        assert!(!Entity::new(EntityId(4)).is_dead());
    }
}
