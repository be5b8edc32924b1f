//! Thrown bottles.

use glam::Vec2;
use loco_engine::{play_clip, Animator, Body, Clip, Entity, EntityId, Ground, SpriteComponent};

use crate::constants::*;
use crate::sheets::{cells, Sheets};

#[derive(Debug, Clone)]
pub struct Projectile {
    pub entity: Entity,
    splashing: bool,
    last_impact_ms: Option<u64>,
    remove_at_ms: Option<u64>,
}

impl Projectile {
    /// Launch from the thrower's hand in the direction it faces.
    pub fn throw(id: EntityId, thrower: &Entity, sheets: &Sheets) -> Self {
        let (spin_row, spin_frames) = cells::BOTTLE_SPIN;
        let (splash_row, splash_frames) = cells::BOTTLE_SPLASH;
        let mut entity = Entity::new(id)
            .with_tag("projectile")
            .with_pos(thrower.pos + Vec2::new(THROW_OFFSET_X, THROW_OFFSET_Y))
            .with_size(Vec2::splat(PROJECTILE_SIZE))
            .with_inset(PROJECTILE_INSET)
            .with_sprite(SpriteComponent::at_cell(sheets.bottle, 0.0, spin_row))
            .with_body(Body::new(THROW_SPEED_X, GRAVITY, Ground::AlwaysAirborne).with_speed_y(THROW_SPEED_Y))
            .with_animator(
                Animator::new()
                    .with_clip("spin", Clip::horizontal_strip(spin_row, 0.0, spin_frames))
                    .with_clip("splash", Clip::terminal_strip(splash_row, 0.0, splash_frames)),
            );
        entity.facing_left = thrower.facing_left;
        Self {
            entity,
            splashing: false,
            last_impact_ms: None,
            remove_at_ms: None,
        }
    }

    pub fn is_splashing(&self) -> bool {
        self.splashing
    }

    pub fn last_impact_ms(&self) -> Option<u64> {
        self.last_impact_ms
    }

    /// Horizontal flight step; a splashing bottle stays where it broke.
    pub fn fly(&mut self) {
        if self.splashing {
            return;
        }
        if self.entity.facing_left {
            self.entity.move_left();
        } else {
            self.entity.move_right();
        }
    }

    /// Gravity step while in flight.
    pub fn fall(&mut self) {
        if !self.splashing {
            self.entity.apply_gravity();
        }
    }

    /// Whether the bottle's top edge is inside the floor band.
    pub fn hits_ground(&self) -> bool {
        let (top, bottom) = GROUND_BAND;
        self.entity.pos.y > top && self.entity.pos.y < bottom
    }

    /// Record an impact. Returns true for the first one, which breaks the
    /// bottle and schedules its removal.
    pub fn impact(&mut self, now_ms: u64) -> bool {
        self.last_impact_ms = Some(now_ms);
        if self.splashing {
            return false;
        }
        self.splashing = true;
        self.remove_at_ms = Some(now_ms + SPLASH_REMOVE_MS);
        if let Some(body) = self.entity.body.as_mut() {
            body.speed_x = 0.0;
            body.speed_y = 0.0;
        }
        true
    }

    pub fn spin(&mut self) {
        if !self.splashing {
            play_clip(&mut self.entity, "spin");
        }
    }

    pub fn splash_frame(&mut self) {
        if self.splashing {
            play_clip(&mut self.entity, "splash");
        }
    }

    /// Splash finished, or the bottle left the bottom of the screen.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        let expired = self.remove_at_ms.is_some_and(|at| now_ms >= at);
        expired || self.entity.pos.y > VIEW_H
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loco_engine::Collider;

    fn thrower(x: f32, facing_left: bool) -> Entity {
        let mut e = Entity::new(EntityId(0)).with_pos(Vec2::new(x, CHARACTER_GROUND_Y));
        e.facing_left = facing_left;
        e
    }

    #[test]
    fn throw_direction_follows_facing() {
        let sheets = Sheets::default();
        let mut right = Projectile::throw(EntityId(1), &thrower(100.0, false), &sheets);
        assert_eq!(right.entity.pos, Vec2::new(110.0, CHARACTER_GROUND_Y + 100.0));
        right.fly();
        assert_eq!(right.entity.pos.x, 110.0 + THROW_SPEED_X);

        let mut left = Projectile::throw(EntityId(2), &thrower(100.0, true), &sheets);
        left.fly();
        assert_eq!(left.entity.pos.x, 110.0 - THROW_SPEED_X);
        assert!(left.entity.facing_left);
    }

    #[test]
    fn arc_reaches_the_ground_band() {
        let mut p = Projectile::throw(EntityId(1), &thrower(100.0, false), &Sheets::default());
        let start_y = p.entity.pos.y;
        p.fall();
        assert!(p.entity.pos.y < start_y);
        let mut steps = 0;
        while !p.hits_ground() {
            p.fall();
            steps += 1;
            assert!(steps < 60, "bottle never reached the floor band");
        }
        assert!(p.entity.pos.y > start_y);
    }

    #[test]
    fn first_impact_breaks_and_freezes() {
        let mut p = Projectile::throw(EntityId(1), &thrower(100.0, false), &Sheets::default());
        assert!(p.impact(1000));
        assert!(p.is_splashing());
        let pos = p.entity.pos;
        p.fly();
        p.fall();
        assert_eq!(p.entity.pos, pos);

        assert!(!p.impact(1020));
        assert_eq!(p.last_impact_ms(), Some(1020));
        assert!(!p.is_finished(1499));
        assert!(p.is_finished(1500));
    }

    #[test]
    fn splash_clip_holds_last_frame() {
        let mut p = Projectile::throw(EntityId(1), &thrower(100.0, false), &Sheets::default());
        p.spin();
        p.impact(0);
        for _ in 0..10 {
            p.splash_frame();
            p.spin();
        }
        let sprite = p.entity.sprite.as_ref().unwrap();
        assert_eq!((sprite.col, sprite.row), (5.0, cells::BOTTLE_SPLASH.0));
    }

    #[test]
    fn falling_off_screen_finishes() {
        let mut p = Projectile::throw(EntityId(1), &thrower(100.0, false), &Sheets::default());
        p.entity.pos.y = VIEW_H + 1.0;
        assert!(p.is_finished(0));
    }

    #[test]
    fn hit_box_is_inset() {
        let p = Projectile::throw(EntityId(1), &thrower(0.0, false), &Sheets::default());
        let hb = p.entity.hit_box();
        assert_eq!(hb.width(), PROJECTILE_SIZE - 10.0);
    }
}
