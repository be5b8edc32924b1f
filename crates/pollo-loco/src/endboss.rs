//! Endboss phase machine.
//!
//! ```text
//! Alert --(one full alert cycle)--> Walking <--> Attacking
//!   any phase --(energy 0)--> Dead
//! ```
//!
//! Alert is left exactly once. Attacking is entered only from Walking, by a
//! damaging hit, and falls back to Walking after one attack clip. Hurt is an
//! overlay on Walking (flinch clip while the hurt window lasts). Dead is
//! terminal: speed drops to zero and the death clip latches.

use glam::Vec2;
use loco_engine::{
    play_clip, Animator, Body, Clip, Collider, Entity, EntityId, Health, HitOutcome, Rng,
    SpriteComponent,
};

use crate::constants::*;
use crate::sheets::{cells, Sheets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    Alert,
    Walking,
    Attacking,
    Dead,
}

/// Hit decal drawn over the boss for a short while.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitmarker {
    pub pos: Vec2,
    pub until_ms: u64,
}

/// What a bottle hit did to the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHit {
    pub outcome: HitOutcome,
    /// The hit cue is off cooldown and should play.
    pub hit_sound: bool,
}

#[derive(Debug, Clone)]
pub struct Endboss {
    phase: BossPhase,
    spawn_x: f32,
    alert_done: bool,
    revealed: bool,
    attack_until_ms: u64,
    hit_sound_ready_ms: u64,
    hitmarker: Option<Hitmarker>,
}

impl Endboss {
    pub fn new(spawn_x: f32) -> Self {
        Self {
            phase: BossPhase::Alert,
            spawn_x,
            alert_done: false,
            revealed: false,
            attack_until_ms: 0,
            hit_sound_ready_ms: 0,
            hitmarker: None,
        }
    }

    /// The boss's roster entity.
    pub fn entity(id: EntityId, x: f32, sheets: &Sheets) -> Entity {
        let strip = |(row, frames): (f32, u32)| Clip::horizontal_strip(row, 0.0, frames);
        let (dead_row, dead_frames) = cells::BOSS_DEAD;
        Entity::new(id)
            .with_tag("endboss")
            .with_pos(Vec2::new(x, BOSS_Y))
            .with_size(Vec2::splat(BOSS_SIZE))
            .with_inset(BOSS_INSET)
            .with_sprite(SpriteComponent::at_cell(sheets.endboss, 0.0, cells::BOSS_ALERT.0))
            .with_body(Body::walker(BOSS_SPEED, BOSS_Y))
            .with_health(Health::new(BOSS_ENERGY))
            .with_animator(
                Animator::new()
                    .with_clip("alert", strip(cells::BOSS_ALERT))
                    .with_clip("walk", strip(cells::BOSS_WALK))
                    .with_clip("attack", strip(cells::BOSS_ATTACK))
                    .with_clip("hurt", strip(cells::BOSS_HURT))
                    .with_clip("dead", Clip::terminal_strip(dead_row, 0.0, dead_frames)),
            )
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    /// Whether the alert cycle has completed (movement is armed).
    pub fn alert_done(&self) -> bool {
        self.alert_done
    }

    /// Whether the boss has started walking, which reveals its status bar.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn hitmarker(&self) -> Option<Hitmarker> {
        self.hitmarker
    }

    /// Once engaged the boss keeps closing in until it dies.
    pub fn is_engaged(&self, entity: &Entity, character_x: f32) -> bool {
        let max_energy = entity.health.as_ref().map(|h| h.max_energy()).unwrap_or(0);
        character_x > BOSS_ENGAGE_X || entity.pos.x < self.spawn_x || entity.energy() < max_energy
    }

    /// One phase step; runs every boss frame.
    pub fn step_phase(&mut self, entity: &mut Entity, character_x: f32, now_ms: u64) {
        if entity.is_dead() {
            self.die(entity);
            play_clip(entity, "dead");
            return;
        }
        if self.phase == BossPhase::Attacking && now_ms >= self.attack_until_ms {
            self.phase = BossPhase::Walking;
        }

        match self.phase {
            BossPhase::Alert => {
                play_clip(entity, "alert");
                let cycled = entity
                    .animator
                    .as_ref()
                    .map(|a| a.completed_cycle("alert"))
                    .unwrap_or(false);
                if cycled {
                    self.alert_done = true;
                    self.phase = BossPhase::Walking;
                    log::debug!("endboss: alert finished, movement armed");
                }
            }
            BossPhase::Attacking => {
                play_clip(entity, "attack");
            }
            BossPhase::Walking => {
                if self.is_engaged(entity, character_x) {
                    let clip = if entity.is_hurt(now_ms) { "hurt" } else { "walk" };
                    play_clip(entity, clip);
                    self.revealed = true;
                }
            }
            BossPhase::Dead => {}
        }
    }

    /// One movement step; runs at the movement rate once the alert is over.
    pub fn step_movement(&self, entity: &mut Entity, character_x: f32) {
        if !self.alert_done || entity.is_dead() {
            return;
        }
        if self.is_engaged(entity, character_x) {
            entity.move_left();
        }
    }

    /// Apply one bottle hit.
    pub fn hit(&mut self, entity: &mut Entity, now_ms: u64, rng: &mut Rng) -> BossHit {
        let outcome = entity.hit(now_ms);
        let mut hit_sound = false;
        match outcome {
            HitOutcome::Killed => self.die(entity),
            HitOutcome::Hurt => {
                if self.phase == BossPhase::Walking {
                    self.phase = BossPhase::Attacking;
                    self.attack_until_ms = now_ms + BOSS_ATTACK_MS;
                }
                if self.phase == BossPhase::Attacking {
                    if now_ms >= self.hit_sound_ready_ms {
                        hit_sound = true;
                        self.hit_sound_ready_ms = now_ms + BOSS_HIT_SOUND_COOLDOWN_MS;
                    }
                    self.show_hitmarker(entity, now_ms, rng);
                }
            }
            HitOutcome::Ignored => {}
        }
        BossHit { outcome, hit_sound }
    }

    /// Drop an expired hitmarker.
    pub fn expire(&mut self, now_ms: u64) {
        if matches!(self.hitmarker, Some(m) if now_ms >= m.until_ms) {
            self.hitmarker = None;
        }
    }

    fn show_hitmarker(&mut self, entity: &Entity, now_ms: u64, rng: &mut Rng) {
        if self.hitmarker.is_some() {
            return;
        }
        let hit_box = entity.hit_box();
        let pad = entity.size * HITMARKER_PADDING;
        let x = rng.in_band(hit_box.left + pad.x / 2.0, (hit_box.width() - pad.x).max(0.0));
        let y = rng.in_band(hit_box.top + pad.y / 2.0, (hit_box.height() - pad.y).max(0.0));
        self.hitmarker = Some(Hitmarker {
            pos: Vec2::new(x, y),
            until_ms: now_ms + HITMARKER_MS,
        });
    }

    fn die(&mut self, entity: &mut Entity) {
        if self.phase == BossPhase::Dead {
            return;
        }
        self.phase = BossPhase::Dead;
        if let Some(body) = entity.body.as_mut() {
            body.speed_x = 0.0;
        }
        log::info!("endboss: defeated");
    }
}
