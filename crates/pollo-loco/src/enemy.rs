//! Enemy roster entries and the walker AI shared by both chicken kinds.

use glam::Vec2;
use loco_engine::{
    play_clip, Animator, AtlasId, Body, Clip, Entity, EntityId, Health, Rng, SpriteComponent,
};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::endboss::Endboss;
use crate::sheets::{cells, Sheets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Chicken,
    MiniChicken,
    Endboss,
}

/// Per-kind behaviour state.
#[derive(Debug, Clone)]
pub enum Brain {
    Walker(Walker),
    Boss(Endboss),
}

/// Walker state: the death cue is announced exactly once.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    death_announced: bool,
}

impl Walker {
    pub fn death_announced(&self) -> bool {
        self.death_announced
    }
}

/// One slot of the level's enemy roster. Dead enemies stay in the roster as
/// inert draw targets.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub entity: Entity,
    pub brain: Brain,
}

impl Enemy {
    /// Spawn an enemy; walkers without an explicit x get one from their
    /// kind's spawn band, and every walker rolls its own speed.
    pub fn spawn(id: EntityId, kind: EnemyKind, x: Option<f32>, sheets: &Sheets, rng: &mut Rng) -> Self {
        match kind {
            EnemyKind::Chicken => {
                let x = x.unwrap_or_else(|| rng.in_band(CHICKEN_SPAWN_MIN_X, CHICKEN_SPAWN_SPAN));
                let speed = rng.in_band(WALKER_SPEED_MIN, WALKER_SPEED_SPAN);
                Self::walker(
                    walker_entity(id, "chicken", sheets.chicken, cells::CHICKEN_DEAD)
                        .with_pos(Vec2::new(x, CHICKEN_Y))
                        .with_size(Vec2::splat(CHICKEN_SIZE))
                        .with_inset(CHICKEN_INSET)
                        .with_body(Body::walker(speed, CHICKEN_Y)),
                    kind,
                )
            }
            EnemyKind::MiniChicken => {
                let x = x.unwrap_or_else(|| rng.in_band(MINI_CHICKEN_SPAWN_MIN_X, MINI_CHICKEN_SPAWN_SPAN));
                let speed = rng.in_band(WALKER_SPEED_MIN, WALKER_SPEED_SPAN);
                Self::walker(
                    walker_entity(id, "mini_chicken", sheets.mini_chicken, cells::MINI_CHICKEN_DEAD)
                        .with_pos(Vec2::new(x, MINI_CHICKEN_Y))
                        .with_size(Vec2::splat(MINI_CHICKEN_SIZE))
                        .with_inset(MINI_CHICKEN_INSET)
                        .with_body(Body::walker(speed, MINI_CHICKEN_Y)),
                    kind,
                )
            }
            EnemyKind::Endboss => {
                let x = x.unwrap_or(BOSS_SPAWN_X);
                Self {
                    kind,
                    entity: Endboss::entity(id, x, sheets),
                    brain: Brain::Boss(Endboss::new(x)),
                }
            }
        }
    }

    fn walker(entity: Entity, kind: EnemyKind) -> Self {
        Self {
            kind,
            entity,
            brain: Brain::Walker(Walker::default()),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.entity.is_dead()
    }

    pub fn as_boss(&self) -> Option<&Endboss> {
        match &self.brain {
            Brain::Boss(boss) => Some(boss),
            Brain::Walker(_) => None,
        }
    }

    /// The boss state and its entity, borrowed together.
    pub fn boss_parts_mut(&mut self) -> Option<(&mut Endboss, &mut Entity)> {
        match &mut self.brain {
            Brain::Boss(boss) => Some((boss, &mut self.entity)),
            Brain::Walker(_) => None,
        }
    }

    /// Sheet this enemy is drawn from.
    pub fn sheet(&self, sheets: &Sheets) -> AtlasId {
        match self.kind {
            EnemyKind::Chicken => sheets.chicken,
            EnemyKind::MiniChicken => sheets.mini_chicken,
            EnemyKind::Endboss => sheets.endboss,
        }
    }
}

fn walker_entity(id: EntityId, tag: &str, atlas: AtlasId, dead: (f32, u32)) -> Entity {
    let (walk_row, walk_frames) = cells::CHICKEN_WALK;
    Entity::new(id)
        .with_tag(tag)
        .with_sprite(SpriteComponent::at_cell(atlas, 0.0, walk_row))
        .with_health(Health::new(WALKER_ENERGY))
        .with_animator(
            Animator::new()
                .with_clip("walk", Clip::horizontal_strip(walk_row, 0.0, walk_frames))
                .with_clip("dead", Clip::terminal_strip(dead.0, 0.0, dead.1)),
        )
}

/// Movement step: walk left while alive. Returns true the first time the
/// walker is found dead, so the caller can play its death cue once.
pub fn walker_step(enemy: &mut Enemy) -> bool {
    let Brain::Walker(walker) = &mut enemy.brain else {
        return false;
    };
    if !enemy.entity.is_dead() {
        enemy.entity.move_left();
        false
    } else if !walker.death_announced {
        walker.death_announced = true;
        true
    } else {
        false
    }
}

/// Animation step: walk clip while alive, latched death clip afterwards.
pub fn walker_animate(enemy: &mut Enemy) {
    if !matches!(enemy.brain, Brain::Walker(_)) {
        return;
    }
    let clip = if enemy.entity.is_dead() { "dead" } else { "walk" };
    play_clip(&mut enemy.entity, clip);
}
