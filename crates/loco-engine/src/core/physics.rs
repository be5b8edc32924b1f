//! Gravity integration for side-scroller bodies.
//!
//! Coordinates are screen-like: y grows downward, so a positive `speed_y`
//! moves a body up. Integration is a fixed-step update meant to be driven by
//! a fixed cadence (25 Hz in the stock game), never by frame time.

use glam::Vec2;

/// Where a body comes to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ground {
    /// Rests on a floor at this y (the top edge of the sprite).
    Floor(f32),
    /// Never considered grounded (projectiles); gravity always applies.
    AlwaysAirborne,
}

/// Velocity state of a movable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Horizontal speed per movement step (direction comes from the move call).
    pub speed_x: f32,
    /// Vertical speed per gravity step; positive is upward.
    pub speed_y: f32,
    /// Gravity magnitude subtracted from `speed_y` every gravity step.
    pub acceleration: f32,
    pub ground: Ground,
}

impl Body {
    pub fn new(speed_x: f32, acceleration: f32, ground: Ground) -> Self {
        Self {
            speed_x,
            speed_y: 0.0,
            acceleration,
            ground,
        }
    }

    /// A grounded walker that never leaves the floor on its own.
    pub fn walker(speed_x: f32, floor_y: f32) -> Self {
        Self::new(speed_x, 0.0, Ground::Floor(floor_y))
    }

    pub fn with_speed_y(mut self, speed_y: f32) -> Self {
        self.speed_y = speed_y;
        self
    }

    /// Whether a body at `y` is above its floor.
    pub fn is_above_ground(&self, y: f32) -> bool {
        match self.ground {
            Ground::Floor(floor) => y < floor,
            Ground::AlwaysAirborne => true,
        }
    }
}

/// Run one gravity step. Returns true if the body moved.
///
/// Applies while the body is above ground or still rising. A body that
/// crosses its floor on the way down is clamped to the floor and its vertical
/// speed zeroed.
pub fn apply_gravity(pos: &mut Vec2, body: &mut Body) -> bool {
    if !(body.is_above_ground(pos.y) || body.speed_y > 0.0) {
        return false;
    }
    pos.y -= body.speed_y;
    body.speed_y -= body.acceleration;

    if let Ground::Floor(floor) = body.ground {
        if pos.y >= floor && body.speed_y < 0.0 {
            pos.y = floor;
            body.speed_y = 0.0;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 170.0;

    fn launch(v0: f32, g: f32) -> (Vec2, Body) {
        let pos = Vec2::new(0.0, GROUND);
        let body = Body::new(5.0, g, Ground::Floor(GROUND)).with_speed_y(v0);
        (pos, body)
    }

    #[test]
    fn resting_body_does_not_move() {
        let mut pos = Vec2::new(0.0, GROUND);
        let mut body = Body::new(5.0, 2.0, Ground::Floor(GROUND));
        assert!(!apply_gravity(&mut pos, &mut body));
        assert_eq!(pos.y, GROUND);
    }

    #[test]
    fn jump_peaks_then_only_falls_until_landing() {
        for &(v0, g) in &[(20.0f32, 2.0f32), (35.0, 2.0), (10.0, 3.0)] {
            let (mut pos, mut body) = launch(v0, g);
            let apex_ticks = (v0 / g).ceil() as u32;
            for _ in 0..apex_ticks {
                apply_gravity(&mut pos, &mut body);
            }
            assert!(body.speed_y <= 0.0, "v0={} still rising", v0);
            assert!(pos.y < GROUND);

            let mut guard = 0;
            while body.is_above_ground(pos.y) {
                apply_gravity(&mut pos, &mut body);
                assert!(body.speed_y <= 0.0);
                guard += 1;
                assert!(guard < 1000);
            }
            assert_eq!(pos.y, GROUND);
            assert_eq!(body.speed_y, 0.0);
        }
    }

    #[test]
    fn symmetric_jump_lands_after_full_arc() {
        let (mut pos, mut body) = launch(20.0, 2.0);
        let mut ticks = 0;
        while apply_gravity(&mut pos, &mut body) {
            ticks += 1;
        }
        // 20, 18, ..., 0, ..., -20 : 21 steps up and back down.
        assert_eq!(ticks, 21);
        assert_eq!(pos.y, GROUND);
    }

    #[test]
    fn projectile_never_grounds() {
        let mut pos = Vec2::new(0.0, 270.0);
        let mut body = Body::new(5.0, 2.0, Ground::AlwaysAirborne).with_speed_y(18.0);
        for _ in 0..22 {
            assert!(apply_gravity(&mut pos, &mut body));
        }
        // Parabola: 270 - (19k - k^2) at k = 22.
        assert_eq!(pos.y, 336.0);
        assert!(body.is_above_ground(10_000.0));
    }
}
