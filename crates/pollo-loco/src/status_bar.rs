//! Screen-fixed status bars. Each bar is one cell of the status sheet; the
//! column is the fill level.

use glam::Vec2;
use loco_engine::{AtlasId, Entity, SpriteComponent};

use crate::level::EntityIds;
use crate::sheets::cells;

const BAR_W: f32 = 200.0;
const BAR_H: f32 = 60.0;
const BOSS_BAR_POS: Vec2 = Vec2::new(450.0, 0.0);
const BOSS_BAR_SIZE: Vec2 = Vec2::new(250.0, 70.0);
const HEART_POS: Vec2 = Vec2::new(430.0, 5.0);
const HEART_SIZE: Vec2 = Vec2::new(80.0, 80.0);

/// Health bar fill level for the character's energy (0..=1000).
pub fn health_index(energy: u32) -> u32 {
    match energy {
        1000.. => 5,
        801..=999 => 4,
        601..=800 => 3,
        401..=600 => 2,
        201..=400 => 1,
        _ => 0,
    }
}

pub fn coin_index(collected: usize) -> u32 {
    (collected / 2).min(5) as u32
}

/// Like the coin bar, but a single bottle already shows.
pub fn bottle_index(collected: usize) -> u32 {
    match collected {
        0 => 0,
        1 => 1,
        n => (n / 2).min(5) as u32,
    }
}

pub fn boss_index(energy: u32) -> u32 {
    match energy {
        150.. => 5,
        120..=149 => 4,
        90..=119 => 3,
        50..=89 => 2,
        30..=49 => 1,
        _ => 0,
    }
}

/// What the bars mirror, sampled once per bar refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BarSnapshot {
    pub character_energy: u32,
    pub coins: usize,
    pub bottles: usize,
    pub boss_energy: u32,
    pub boss_revealed: bool,
}

#[derive(Debug, Clone)]
pub struct StatusBars {
    pub health: Entity,
    pub coins: Entity,
    pub bottles: Entity,
    pub boss: Entity,
    pub heart: Entity,
}

impl StatusBars {
    pub fn new(ids: &mut EntityIds, atlas: AtlasId) -> Self {
        let mut bar = |row: f32, pos: Vec2, size: Vec2| {
            Entity::new(ids.next())
                .with_tag("status_bar")
                .with_pos(pos)
                .with_size(size)
                .with_sprite(SpriteComponent::at_cell(atlas, 5.0, row))
        };
        let hidden = Vec2::new(0.0, BOSS_BAR_SIZE.y);
        Self {
            health: bar(cells::BAR_HEALTH_ROW, Vec2::new(20.0, 0.0), Vec2::new(BAR_W, BAR_H)),
            coins: bar(cells::BAR_COIN_ROW, Vec2::new(20.0, 50.0), Vec2::new(BAR_W, BAR_H)),
            bottles: bar(cells::BAR_BOTTLE_ROW, Vec2::new(20.0, 100.0), Vec2::new(BAR_W, BAR_H)),
            boss: bar(cells::BAR_BOSS_ROW, BOSS_BAR_POS, hidden),
            heart: bar(cells::BAR_HEART_ROW, HEART_POS, Vec2::new(0.0, HEART_SIZE.y)),
        }
    }

    pub fn update(&mut self, snapshot: &BarSnapshot) {
        set_fill(&mut self.health, health_index(snapshot.character_energy));
        set_fill(&mut self.coins, coin_index(snapshot.coins));
        set_fill(&mut self.bottles, bottle_index(snapshot.bottles));
        set_fill(&mut self.boss, boss_index(snapshot.boss_energy));
        if snapshot.boss_revealed {
            self.boss.size = BOSS_BAR_SIZE;
            self.heart.size = HEART_SIZE;
        }
    }

    pub fn set_atlas(&mut self, atlas: AtlasId) {
        for bar in self.iter_mut() {
            if let Some(sprite) = bar.sprite.as_mut() {
                sprite.atlas = atlas;
            }
        }
    }

    /// Draw order: the boss bar sits under its heart.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        [&self.health, &self.coins, &self.bottles, &self.boss, &self.heart].into_iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        [
            &mut self.health,
            &mut self.coins,
            &mut self.bottles,
            &mut self.boss,
            &mut self.heart,
        ]
        .into_iter()
    }
}

fn set_fill(bar: &mut Entity, index: u32) {
    if let Some(sprite) = bar.sprite.as_mut() {
        sprite.col = index as f32;
    }
}
