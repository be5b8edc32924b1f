//! Level manifest and the placement roster built from it.

use glam::Vec2;
use loco_engine::{Body, EngineError, Entity, EntityId, Rng, SpriteComponent};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enemy::{Enemy, EnemyKind};
use crate::sheets::{cells, Sheets};

/// Rows of the background sheet: air, then the three parallax layers.
pub const BACKGROUND_LAYERS: u32 = 4;
/// Columns of the background sheet (the two alternating tile variants).
pub const BACKGROUND_VARIANTS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    /// Explicit spawn x; walkers roll one from their band when absent.
    #[serde(default)]
    pub x: Option<f32>,
}

/// Pickup placement; missing coordinates are rolled from the pickup's band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTile {
    pub layer: u32,
    pub x: f32,
    #[serde(default)]
    pub variant: u32,
}

/// Static description of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelManifest {
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub coins: Vec<Placement>,
    #[serde(default)]
    pub bottles: Vec<Placement>,
    #[serde(default)]
    pub clouds: usize,
    #[serde(default)]
    pub backgrounds: Vec<BackgroundTile>,
    pub level_end_x: f32,
}

impl LevelManifest {
    /// The stock level.
    pub fn level_one() -> Self {
        let mut enemies = Vec::with_capacity(7);
        enemies.extend((0..3).map(|_| EnemySpawn { kind: EnemyKind::Chicken, x: None }));
        enemies.extend((0..3).map(|_| EnemySpawn { kind: EnemyKind::MiniChicken, x: None }));
        enemies.push(EnemySpawn { kind: EnemyKind::Endboss, x: None });

        let backgrounds = (-1..=3i32)
            .flat_map(|i| {
                (0..BACKGROUND_LAYERS).map(move |layer| BackgroundTile {
                    layer,
                    x: i as f32 * BACKGROUND_STRIDE,
                    variant: i.rem_euclid(BACKGROUND_VARIANTS as i32) as u32,
                })
            })
            .collect();

        Self {
            enemies,
            coins: vec![Placement::default(); 10],
            bottles: vec![Placement::default(); 10],
            clouds: 2,
            backgrounds,
            level_end_x: 2200.0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject manifests a session cannot start from.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.enemies.is_empty() {
            return Err(EngineError::invalid_level("enemy roster is empty"));
        }
        let bosses = self.enemies.iter().filter(|e| e.kind == EnemyKind::Endboss).count();
        if bosses != 1 {
            return Err(EngineError::invalid_level(format!(
                "expected exactly one endboss, found {bosses}"
            )));
        }
        if !self.level_end_x.is_finite() || self.level_end_x <= 0.0 {
            return Err(EngineError::invalid_level(format!(
                "level_end_x must be positive, got {}",
                self.level_end_x
            )));
        }

        let mut explicit = self
            .enemies
            .iter()
            .filter_map(|e| e.x)
            .chain(self.coins.iter().chain(&self.bottles).flat_map(|p| p.x.into_iter().chain(p.y)))
            .chain(self.backgrounds.iter().map(|b| b.x));
        if let Some(bad) = explicit.find(|v| !v.is_finite()) {
            return Err(EngineError::invalid_level(format!("non-finite coordinate {bad}")));
        }

        if let Some(tile) = self
            .backgrounds
            .iter()
            .find(|b| b.layer >= BACKGROUND_LAYERS || b.variant >= BACKGROUND_VARIANTS)
        {
            return Err(EngineError::invalid_level(format!(
                "background tile at x {} uses layer {} variant {}",
                tile.x, tile.layer, tile.variant
            )));
        }
        Ok(())
    }
}

/// Hands out entity ids for one session.
#[derive(Debug, Default)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// The level's placed roster. Coins and bottles leave it when collected;
/// enemies stay for the whole session.
#[derive(Debug, Clone)]
pub struct Level {
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Entity>,
    pub bottles: Vec<Entity>,
    pub clouds: Vec<Entity>,
    pub backgrounds: Vec<Entity>,
    pub level_end_x: f32,
    boss_slot: usize,
}

impl Level {
    pub fn build(
        manifest: &LevelManifest,
        sheets: &Sheets,
        rng: &mut Rng,
        ids: &mut EntityIds,
    ) -> Result<Self, EngineError> {
        manifest.validate()?;

        let enemies: Vec<Enemy> = manifest
            .enemies
            .iter()
            .map(|spawn| Enemy::spawn(ids.next(), spawn.kind, spawn.x, sheets, rng))
            .collect();
        let boss_slot = enemies
            .iter()
            .position(|e| e.kind == EnemyKind::Endboss)
            .ok_or_else(|| EngineError::invalid_level("endboss missing from roster"))?;

        let coins = manifest
            .coins
            .iter()
            .map(|p| coin(ids.next(), p, sheets, rng))
            .collect();
        let bottles = manifest
            .bottles
            .iter()
            .map(|p| pickup_bottle(ids.next(), p, sheets, rng))
            .collect();
        let clouds = (0..manifest.clouds)
            .map(|_| cloud(ids.next(), sheets, rng))
            .collect();
        let backgrounds = manifest
            .backgrounds
            .iter()
            .map(|tile| background(ids.next(), tile, sheets))
            .collect();

        log::debug!(
            "level: {} enemies, {} coins, {} bottles, end at x {}",
            enemies.len(),
            manifest.coins.len(),
            manifest.bottles.len(),
            manifest.level_end_x
        );

        Ok(Self {
            enemies,
            coins,
            bottles,
            clouds,
            backgrounds,
            level_end_x: manifest.level_end_x,
            boss_slot,
        })
    }

    /// Roster index of the endboss.
    pub fn boss_slot(&self) -> usize {
        self.boss_slot
    }

    pub fn boss(&self) -> &Enemy {
        &self.enemies[self.boss_slot]
    }

    pub fn boss_mut(&mut self) -> &mut Enemy {
        &mut self.enemies[self.boss_slot]
    }

    /// Point every entity at the atlas of its role.
    pub fn assign_sheets(&mut self, sheets: &Sheets) {
        for enemy in &mut self.enemies {
            let atlas = enemy.sheet(sheets);
            if let Some(sprite) = enemy.entity.sprite.as_mut() {
                sprite.atlas = atlas;
            }
        }
        let groups = [
            (&mut self.coins, sheets.coin),
            (&mut self.bottles, sheets.bottle),
            (&mut self.clouds, sheets.cloud),
            (&mut self.backgrounds, sheets.background),
        ];
        for (entities, atlas) in groups {
            for sprite in entities.iter_mut().filter_map(|e| e.sprite.as_mut()) {
                sprite.atlas = atlas;
            }
        }
    }
}

fn coin(id: EntityId, at: &Placement, sheets: &Sheets, rng: &mut Rng) -> Entity {
    let x = at.x.unwrap_or_else(|| {
        let spread = rng.next_f32() * 3.0 * rng.next_f32();
        500.0 + spread * 600.0
    });
    let y = at.y.unwrap_or_else(|| rng.in_band(160.0, 100.0));
    Entity::new(id)
        .with_tag("coin")
        .with_pos(Vec2::new(x, y))
        .with_size(Vec2::splat(COIN_SIZE))
        .with_inset(COIN_INSET)
        .with_sprite(SpriteComponent::at_cell(sheets.coin, 0.0, 0.0))
}

fn pickup_bottle(id: EntityId, at: &Placement, sheets: &Sheets, rng: &mut Rng) -> Entity {
    let x = at.x.unwrap_or_else(|| rng.in_band(PICKUP_BOTTLE_MIN_X, PICKUP_BOTTLE_SPAN));
    let y = at.y.unwrap_or(PICKUP_BOTTLE_Y);
    let (col, row) = cells::BOTTLE_ON_GROUND;
    Entity::new(id)
        .with_tag("bottle")
        .with_pos(Vec2::new(x, y))
        .with_size(Vec2::splat(PICKUP_BOTTLE_SIZE))
        .with_inset(PICKUP_BOTTLE_INSET)
        .with_sprite(SpriteComponent::at_cell(sheets.bottle, col, row))
}

fn cloud(id: EntityId, sheets: &Sheets, rng: &mut Rng) -> Entity {
    let x = rng.in_band(10.0, 2000.0);
    Entity::new(id)
        .with_tag("cloud")
        .with_pos(Vec2::new(x, CLOUD_Y))
        .with_size(Vec2::new(CLOUD_W, CLOUD_H))
        .with_sprite(SpriteComponent::at_cell(sheets.cloud, 0.0, 0.0))
        .with_body(Body::walker(CLOUD_SPEED, CLOUD_Y))
}

fn background(id: EntityId, tile: &BackgroundTile, sheets: &Sheets) -> Entity {
    Entity::new(id)
        .with_tag("background")
        .with_pos(Vec2::new(tile.x, 0.0))
        .with_size(Vec2::new(BACKGROUND_W, BACKGROUND_H))
        .with_sprite(SpriteComponent::at_cell(
            sheets.background,
            tile.variant as f32,
            tile.layer as f32,
        ))
}
