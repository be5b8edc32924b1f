//! Player character: input to movement, jump and animation state.

use glam::Vec2;
use loco_engine::{
    play_clip, Animator, Body, Clip, ControlState, Entity, EntityId, Ground, Health, HitOutcome,
    SoundEvent, SoundKind, SpriteComponent,
};

use crate::constants::*;
use crate::sheets::{cells, Sheets};

/// Animation state, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Dead,
    Hurt,
    Airborne,
    Moving,
    Sleeping,
    Waiting,
}

impl CharacterState {
    fn clip(self) -> &'static str {
        match self {
            CharacterState::Dead => "dead",
            CharacterState::Hurt => "hurt",
            CharacterState::Airborne => "jump",
            CharacterState::Moving => "walk",
            CharacterState::Sleeping => "sleep",
            CharacterState::Waiting => "wait",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Character {
    pub entity: Entity,
    last_action_ms: u64,
    last_footstep_ms: Option<u64>,
    snoring: bool,
}

impl Character {
    pub fn new(id: EntityId, sheets: &Sheets) -> Self {
        let strip = |(row, frames): (f32, u32)| Clip::horizontal_strip(row, 0.0, frames);
        let (dead_row, dead_frames) = cells::DEAD;
        let entity = Entity::new(id)
            .with_tag("character")
            .with_pos(Vec2::new(CHARACTER_START_X, CHARACTER_GROUND_Y))
            .with_size(Vec2::new(CHARACTER_W, CHARACTER_H))
            .with_inset(CHARACTER_INSET)
            .with_sprite(SpriteComponent::at_cell(sheets.character, 0.0, cells::WAIT.0))
            .with_body(Body::new(CHARACTER_SPEED, GRAVITY, Ground::Floor(CHARACTER_GROUND_Y)))
            .with_health(Health::new(CHARACTER_ENERGY))
            .with_animator(
                Animator::new()
                    .with_clip("walk", strip(cells::WALK))
                    .with_clip("jump", strip(cells::JUMP))
                    .with_clip("hurt", strip(cells::HURT))
                    .with_clip("sleep", strip(cells::SLEEP))
                    .with_clip("wait", strip(cells::WAIT))
                    .with_clip("dead", Clip::terminal_strip(dead_row, 0.0, dead_frames)),
            );
        Self {
            entity,
            last_action_ms: 0,
            last_footstep_ms: None,
            snoring: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.entity.pos.x
    }

    /// One movement step. Rightward movement stops at `max_x` (the boss),
    /// leftward at the world origin.
    pub fn step_movement(
        &mut self,
        controls: &ControlState,
        max_x: f32,
        now_ms: u64,
        cues: &mut Vec<SoundEvent>,
    ) {
        if self.entity.is_dead() {
            return;
        }
        let mut walked = false;
        if controls.move_right && self.entity.pos.x < max_x {
            self.entity.move_right();
            walked = true;
        }
        if controls.move_left && self.entity.pos.x > 0.0 {
            self.entity.move_left();
            self.entity.facing_left = true;
            walked = true;
        }

        let grounded = !self.entity.is_above_ground();
        if walked && grounded {
            let quiet = self
                .last_footstep_ms
                .map_or(true, |at| now_ms.saturating_sub(at) >= FOOTSTEP_INTERVAL_MS);
            if quiet {
                self.last_footstep_ms = Some(now_ms);
                cues.push(SoundEvent::play(SoundKind::Footstep, VOLUME_FOOTSTEP));
            }
        }
        if controls.jump && grounded {
            self.jump();
            cues.push(SoundEvent::play(SoundKind::Jump, VOLUME_JUMP));
        }
    }

    fn jump(&mut self) {
        if let Some(body) = self.entity.body.as_mut() {
            body.speed_y = JUMP_SPEED;
        }
    }

    /// Upward kick after stomping an enemy.
    pub fn bounce(&mut self) {
        if let Some(body) = self.entity.body.as_mut() {
            body.speed_y = STOMP_BOUNCE_SPEED;
        }
    }

    /// Inactivity monitor: any input, or being airborne, hurt or dead, counts
    /// as activity.
    pub fn watch_activity(&mut self, controls: &ControlState, now_ms: u64) {
        if controls.any_action()
            || self.entity.is_above_ground()
            || self.entity.is_hurt(now_ms)
            || self.entity.is_dead()
        {
            self.last_action_ms = now_ms;
        }
    }

    pub fn state(&self, controls: &ControlState, now_ms: u64) -> CharacterState {
        let airborne = self.entity.is_above_ground();
        if self.entity.is_dead() {
            CharacterState::Dead
        } else if self.entity.is_hurt(now_ms) {
            CharacterState::Hurt
        } else if airborne {
            CharacterState::Airborne
        } else if controls.move_right || (controls.move_left && !airborne) {
            CharacterState::Moving
        } else if now_ms.saturating_sub(self.last_action_ms) > SLEEP_AFTER_MS {
            CharacterState::Sleeping
        } else {
            CharacterState::Waiting
        }
    }

    /// One animation step. Falling asleep snores once.
    pub fn animate(&mut self, controls: &ControlState, now_ms: u64, cues: &mut Vec<SoundEvent>) {
        let state = self.state(controls, now_ms);
        if state == CharacterState::Sleeping {
            if !self.snoring {
                self.snoring = true;
                cues.push(SoundEvent::play(SoundKind::Snore, VOLUME_SNORE));
            }
        } else {
            self.snoring = false;
        }
        play_clip(&mut self.entity, state.clip());
    }

    /// Take one enemy hit. A hurt cue plays only when the hit starts a new
    /// flinch; the death cue when it was the last point of energy.
    pub fn hit(&mut self, now_ms: u64, cues: &mut Vec<SoundEvent>) -> HitOutcome {
        let was_hurt = self.entity.is_hurt(now_ms);
        let outcome = self.entity.hit(now_ms);
        match outcome {
            HitOutcome::Hurt if !was_hurt => {
                cues.push(SoundEvent::play(SoundKind::Hurt, VOLUME_HURT));
            }
            HitOutcome::Killed => {
                log::info!("character: out of energy");
                cues.push(SoundEvent::play(SoundKind::Death, VOLUME_DEATH));
            }
            _ => {}
        }
        outcome
    }
}
