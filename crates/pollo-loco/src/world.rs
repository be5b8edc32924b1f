//! Session orchestrator: owns the roster, runs every periodic system in a
//! fixed order each tick, and renders the scene.

use loco_engine::{
    draw_entities, draw_entity, Camera2D, Collider, ControlState, EngineContext, EngineError,
    Entity, Game, GameConfig, GameEvent, RenderTarget, Rng, Scheduler, SoundEvent, SoundKind,
    SpriteComponent, SpriteRegistry, SystemHandle,
};

use crate::character::Character;
use crate::constants::*;
use crate::enemy::{walker_animate, walker_step, Brain};
use crate::level::{EntityIds, Level, LevelManifest};
use crate::sheets::Sheets;
use crate::status_bar::{BarSnapshot, StatusBars};
use crate::throwable::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Handles of every periodic system of a running session.
#[derive(Debug, Clone, Copy)]
struct Systems {
    mute: SystemHandle,
    movement: SystemHandle,
    gravity: SystemHandle,
    character_anim: SystemHandle,
    idle_monitor: SystemHandle,
    walker_move: SystemHandle,
    walker_anim: SystemHandle,
    boss_phase: SystemHandle,
    boss_move: SystemHandle,
    clouds: SystemHandle,
    flight: SystemHandle,
    spin: SystemHandle,
    splash: SystemHandle,
    throw: SystemHandle,
    music: SystemHandle,
    pickups: SystemHandle,
    projectile_hits: SystemHandle,
    contacts: SystemHandle,
    status_bars: SystemHandle,
    outcome: SystemHandle,
}

impl Systems {
    fn register(s: &mut Scheduler) -> Self {
        Self {
            mute: s.register("mute", MOVE_MS),
            movement: s.register("movement", MOVE_MS),
            gravity: s.register("gravity", GRAVITY_MS),
            character_anim: s.register("character_anim", CHARACTER_ANIM_MS),
            idle_monitor: s.register("idle_monitor", IDLE_MONITOR_MS),
            walker_move: s.register("walker_move", MOVE_MS),
            walker_anim: s.register("walker_anim", WALKER_ANIM_MS),
            boss_phase: s.register("boss_phase", BOSS_PHASE_MS),
            boss_move: s.register("boss_move", MOVE_MS),
            clouds: s.register("clouds", MOVE_MS),
            flight: s.register("projectile_flight", MOVE_MS),
            spin: s.register("projectile_spin", PROJECTILE_SPIN_MS),
            splash: s.register("projectile_splash", PROJECTILE_SPLASH_MS),
            throw: s.register("throw", THROW_MS),
            music: s.register("music", MUSIC_MS),
            pickups: s.register("pickups", PICKUP_MS),
            projectile_hits: s.register("projectile_hits", PROJECTILE_HIT_MS),
            contacts: s.register("contacts", CONTACT_MS),
            status_bars: s.register("status_bars", STATUS_BAR_MS),
            outcome: s.register("outcome", OUTCOME_MS),
        }
    }
}

pub struct World {
    sheets: Sheets,
    ids: EntityIds,
    character: Character,
    level: Level,
    projectiles: Vec<Projectile>,
    collected_coins: Vec<Entity>,
    collected_bottles: Vec<Entity>,
    bars: StatusBars,
    camera: Camera2D,
    muted: bool,
    music_playing: bool,
    outcome: Option<Outcome>,
    systems: Option<Systems>,
    /// Sound cues raised during the current tick, gated by mute on flush.
    cues: Vec<SoundEvent>,
}

impl World {
    /// A session on the stock level.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_level(&LevelManifest::level_one(), GameConfig::default().seed)
    }

    pub fn with_level(manifest: &LevelManifest, seed: u64) -> Result<Self, EngineError> {
        let sheets = Sheets::default();
        let mut ids = EntityIds::default();
        let mut rng = Rng::new(seed);
        let character = Character::new(ids.next(), &sheets);
        let level = Level::build(manifest, &sheets, &mut rng, &mut ids)?;
        let bars = StatusBars::new(&mut ids, sheets.status_bars);
        let mut camera = Camera2D::new(VIEW_W, VIEW_H).with_lead(CAMERA_LEAD);
        camera.follow(character.x());

        Ok(Self {
            sheets,
            ids,
            character,
            level,
            projectiles: Vec::new(),
            collected_coins: Vec::new(),
            collected_bottles: Vec::new(),
            bars,
            camera,
            muted: false,
            music_playing: false,
            outcome: None,
            systems: None,
            cues: Vec::new(),
        })
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn collected_coins(&self) -> &[Entity] {
        &self.collected_coins
    }

    pub fn collected_bottles(&self) -> &[Entity] {
        &self.collected_bottles
    }

    pub fn bars(&self) -> &StatusBars {
        &self.bars
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_running(&self) -> bool {
        self.systems.is_some()
    }

    fn cue(&mut self, kind: SoundKind, volume: f32) {
        self.cues.push(SoundEvent::play(kind, volume));
    }

    /// Hand the tick's cues to the host. Muting drops every play request;
    /// stop requests always go through.
    fn flush_cues(&mut self, ctx: &mut EngineContext) {
        let muted = self.muted;
        for cue in self.cues.drain(..) {
            if cue.stop || !muted {
                ctx.emit_sound(cue);
            }
        }
    }

    // ---- Systems, in tick order ----

    fn sync_mute(&mut self, ctx: &mut EngineContext, controls: &ControlState) {
        if controls.mute != self.muted {
            self.muted = controls.mute;
            ctx.emit_event(GameEvent::mute_changed(self.muted));
            log::debug!("world: muted = {}", self.muted);
        }
    }

    fn move_character(&mut self, controls: &ControlState, now_ms: u64) {
        let max_x = self.level.boss().entity.pos.x;
        self.character.step_movement(controls, max_x, now_ms, &mut self.cues);
        self.camera.follow(self.character.x());
    }

    fn apply_gravity(&mut self) {
        self.character.entity.apply_gravity();
        for projectile in &mut self.projectiles {
            projectile.fall();
        }
    }

    fn move_walkers(&mut self) {
        for enemy in &mut self.level.enemies {
            if walker_step(enemy) {
                self.cues.push(SoundEvent::play(SoundKind::ChickenDeath, VOLUME_CHICKEN));
            }
        }
    }

    fn step_boss_phase(&mut self, now_ms: u64) {
        let character_x = self.character.x();
        if let Some((boss, entity)) = self.level.boss_mut().boss_parts_mut() {
            boss.step_phase(entity, character_x, now_ms);
        }
    }

    fn move_boss(&mut self) {
        let character_x = self.character.x();
        if let Some((boss, entity)) = self.level.boss_mut().boss_parts_mut() {
            boss.step_movement(entity, character_x);
        }
    }

    fn throw_bottle(&mut self, controls: &ControlState) {
        if !controls.throw || self.collected_bottles.is_empty() || self.character.entity.is_dead() {
            return;
        }
        self.collected_bottles.remove(0);
        let projectile = Projectile::throw(self.ids.next(), &self.character.entity, &self.sheets);
        self.projectiles.push(projectile);
        self.cue(SoundKind::Throw, VOLUME_THROW);
    }

    fn update_music(&mut self) {
        if !self.muted && !self.music_playing {
            self.music_playing = true;
            self.cue(SoundKind::Music, VOLUME_MUSIC);
        } else if self.muted && self.music_playing {
            self.stop_music();
        }
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            self.cues.push(SoundEvent::stop(SoundKind::Music));
        }
    }

    /// Coins first, then bottles.
    fn collect_pickups(&mut self) {
        let coins = take_colliding(&mut self.level.coins, &self.character.entity);
        for _ in &coins {
            self.cue(SoundKind::Coin, VOLUME_COIN);
        }
        self.collected_coins.extend(coins);

        let bottles = take_colliding(&mut self.level.bottles, &self.character.entity);
        self.collected_bottles.extend(bottles);
    }

    fn resolve_projectile_hits(&mut self, now_ms: u64, rng: &mut Rng) {
        for projectile in &mut self.projectiles {
            let mut struck = projectile.hits_ground();
            for enemy in &mut self.level.enemies {
                if !enemy.is_alive() || !projectile.entity.is_colliding(&enemy.entity) {
                    continue;
                }
                struck = true;
                match &mut enemy.brain {
                    Brain::Boss(boss) => {
                        if boss.hit(&mut enemy.entity, now_ms, rng).hit_sound {
                            self.cues.push(SoundEvent::play(SoundKind::HitMarker, VOLUME_HITMARKER));
                        }
                    }
                    Brain::Walker(_) => {
                        enemy.entity.hit(now_ms);
                    }
                }
            }
            if struck && projectile.impact(now_ms) {
                self.cues.push(SoundEvent::play(SoundKind::BrokenBottle, VOLUME_BROKEN_BOTTLE));
            }
        }
    }

    fn resolve_contacts(&mut self, now_ms: u64) {
        let boss_slot = self.level.boss_slot();
        for (slot, enemy) in self.level.enemies.iter_mut().enumerate() {
            let energy = enemy.entity.energy();
            if energy == 0 || !self.character.entity.is_colliding(&enemy.entity) {
                continue;
            }
            let stomp = self.character.entity.is_above_ground() && slot != boss_slot && energy > 1;
            if stomp {
                if let Some(health) = enemy.entity.health.as_mut() {
                    health.kill();
                }
                self.character.bounce();
                self.cues.push(SoundEvent::play(SoundKind::Jump, VOLUME_STOMP));
            } else {
                self.character.hit(now_ms, &mut self.cues);
            }
        }
    }

    /// Drop finished projectiles and an expired hitmarker.
    fn run_timers(&mut self, now_ms: u64) {
        self.projectiles.retain(|p| !p.is_finished(now_ms));
        if let Some((boss, _)) = self.level.boss_mut().boss_parts_mut() {
            boss.expire(now_ms);
        }
    }

    fn refresh_bars(&mut self) {
        let boss = self.level.boss();
        let snapshot = BarSnapshot {
            character_energy: self.character.entity.energy(),
            coins: self.collected_coins.len(),
            bottles: self.collected_bottles.len(),
            boss_energy: boss.entity.energy(),
            boss_revealed: boss.as_boss().is_some_and(|b| b.is_revealed()),
        };
        self.bars.update(&snapshot);
    }

    /// Latch the session outcome once. A dead boss wins even if the
    /// character fell in the same tick.
    fn evaluate_outcome(&mut self, ctx: &mut EngineContext) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = if self.level.boss().entity.is_dead() {
            Outcome::Won
        } else if self.character.entity.is_dead() {
            Outcome::Lost
        } else {
            return;
        };

        self.outcome = Some(outcome);
        let (event, jingle) = match outcome {
            Outcome::Won => (GameEvent::win(self.muted), SoundKind::Win),
            Outcome::Lost => (GameEvent::lose(self.muted), SoundKind::Lose),
        };
        ctx.emit_event(event);
        self.stop_music();
        self.cue(jingle, VOLUME_JINGLE);

        let drained = ctx.scheduler.cancel_all();
        self.systems = None;
        log::info!("world: session over ({:?}), stopped {} system(s)", outcome, drained);
    }

    fn draw_hitmarker(&self, target: &mut dyn RenderTarget) {
        let Some(marker) = self.level.boss().as_boss().and_then(|b| b.hitmarker()) else {
            return;
        };
        let sprite = SpriteComponent::at_cell(self.sheets.hitmarker, 0.0, 0.0);
        target.draw_sprite(&sprite, marker.pos.x, marker.pos.y, HITMARKER_SIZE, HITMARKER_SIZE);
    }
}

/// Remove and return every roster entity overlapping `by`.
fn take_colliding(roster: &mut Vec<Entity>, by: &Entity) -> Vec<Entity> {
    let (taken, kept): (Vec<Entity>, Vec<Entity>) = std::mem::take(roster)
        .into_iter()
        .partition(|e| e.is_colliding(by));
    *roster = kept;
    taken
}

impl Game for World {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: VIEW_W,
            world_height: VIEW_H,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        if self.systems.is_some() {
            log::warn!("world: init called on a running session");
            return Ok(());
        }
        self.systems = Some(Systems::register(&mut ctx.scheduler));
        log::info!(
            "world: session started with {} enemies, {} coins, {} bottles",
            self.level.enemies.len(),
            self.level.coins.len(),
            self.level.bottles.len()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, controls: &ControlState) {
        let Some(sys) = self.systems else {
            return;
        };
        let now = ctx.now_ms();

        for _ in 0..ctx.scheduler.due(sys.mute) {
            self.sync_mute(ctx, controls);
        }
        for _ in 0..ctx.scheduler.due(sys.movement) {
            self.move_character(controls, now);
        }
        for _ in 0..ctx.scheduler.due(sys.gravity) {
            self.apply_gravity();
        }
        for _ in 0..ctx.scheduler.due(sys.character_anim) {
            self.character.animate(controls, now, &mut self.cues);
        }
        for _ in 0..ctx.scheduler.due(sys.idle_monitor) {
            self.character.watch_activity(controls, now);
        }
        for _ in 0..ctx.scheduler.due(sys.walker_move) {
            self.move_walkers();
        }
        for _ in 0..ctx.scheduler.due(sys.walker_anim) {
            self.level.enemies.iter_mut().for_each(walker_animate);
        }
        for _ in 0..ctx.scheduler.due(sys.boss_phase) {
            self.step_boss_phase(now);
        }
        for _ in 0..ctx.scheduler.due(sys.boss_move) {
            self.move_boss();
        }
        for _ in 0..ctx.scheduler.due(sys.clouds) {
            self.level.clouds.iter_mut().for_each(Entity::move_left);
        }
        for _ in 0..ctx.scheduler.due(sys.flight) {
            self.projectiles.iter_mut().for_each(Projectile::fly);
        }
        for _ in 0..ctx.scheduler.due(sys.spin) {
            self.projectiles.iter_mut().for_each(Projectile::spin);
        }
        for _ in 0..ctx.scheduler.due(sys.splash) {
            self.projectiles.iter_mut().for_each(Projectile::splash_frame);
        }
        for _ in 0..ctx.scheduler.due(sys.throw) {
            self.throw_bottle(controls);
        }
        for _ in 0..ctx.scheduler.due(sys.music) {
            self.update_music();
        }
        for _ in 0..ctx.scheduler.due(sys.pickups) {
            self.collect_pickups();
        }
        for _ in 0..ctx.scheduler.due(sys.projectile_hits) {
            self.resolve_projectile_hits(now, &mut ctx.rng);
        }
        for _ in 0..ctx.scheduler.due(sys.contacts) {
            self.resolve_contacts(now);
        }
        self.run_timers(now);
        for _ in 0..ctx.scheduler.due(sys.status_bars) {
            self.refresh_bars();
        }
        for _ in 0..ctx.scheduler.due(sys.outcome) {
            self.evaluate_outcome(ctx);
        }

        self.flush_cues(ctx);
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        target.clear();
        target.save();
        target.translate(self.camera.offset_x, 0.0);

        draw_entities(target, &self.camera, self.level.backgrounds.iter());
        draw_entities(target, &self.camera, self.level.clouds.iter());
        draw_entities(target, &self.camera, self.level.coins.iter());
        draw_entities(target, &self.camera, self.level.bottles.iter());
        let boss_slot = self.level.boss_slot();
        for (slot, enemy) in self.level.enemies.iter().enumerate() {
            draw_entities(target, &self.camera, std::iter::once(&enemy.entity));
            if slot == boss_slot {
                self.draw_hitmarker(target);
            }
        }
        draw_entities(target, &self.camera, self.projectiles.iter().map(|p| &p.entity));
        draw_entity(target, &self.character.entity);

        target.restore();

        for bar in self.bars.iter().filter(|b| b.size.x > 0.0) {
            draw_entity(target, bar);
        }
    }

    fn load_assets(&mut self, registry: &SpriteRegistry) {
        self.sheets = Sheets::resolve(registry);
        self.level.assign_sheets(&self.sheets);
        let character_sheet = self.sheets.character;
        let bottle_sheet = self.sheets.bottle;
        let sprites = std::iter::once((&mut self.character.entity, character_sheet))
            .chain(self.projectiles.iter_mut().map(|p| (&mut p.entity, bottle_sheet)));
        for (entity, atlas) in sprites {
            if let Some(sprite) = entity.sprite.as_mut() {
                sprite.atlas = atlas;
            }
        }
        self.bars.set_atlas(self.sheets.status_bars);
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        self.projectiles.clear();
        self.collected_coins.clear();
        self.collected_bottles.clear();
        self.stop_music();
        self.flush_cues(ctx);

        let drained = ctx.scheduler.cancel_all();
        self.systems = None;
        ctx.emit_event(GameEvent::reset());
        log::info!("world: reset, stopped {} system(s)", drained);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endboss::BossPhase;
    use crate::enemy::EnemyKind;
    use glam::Vec2;
    use loco_engine::{AssetManifest, HitOutcome, RenderBuffer, PLACEHOLDER_ATLAS};

    const TICK_US: u64 = 16_667;

    fn session() -> (World, EngineContext) {
        let mut world = World::new().unwrap();
        let mut ctx = EngineContext::new(7);
        world.init(&mut ctx).unwrap();
        (world, ctx)
    }

    /// Run `n` ticks and collect every sound and event they produced.
    fn run(
        world: &mut World,
        ctx: &mut EngineContext,
        controls: &ControlState,
        n: usize,
    ) -> (Vec<SoundEvent>, Vec<GameEvent>) {
        let mut sounds = Vec::new();
        let mut events = Vec::new();
        for _ in 0..n {
            ctx.clear_frame_data();
            ctx.begin_tick(TICK_US);
            world.update(ctx, controls);
            sounds.extend(ctx.sounds.iter().copied());
            events.extend(ctx.events.iter().copied());
        }
        (sounds, events)
    }

    fn count(events: &[GameEvent], kind: f32) -> usize {
        events.iter().filter(|e| e.kind == kind).count()
    }

    fn plays(sounds: &[SoundEvent], kind: SoundKind) -> usize {
        sounds.iter().filter(|s| s.kind == kind && !s.stop).count()
    }

    /// Park every walker far away so only the entities a test sets up meet.
    fn clear_walkers(world: &mut World) {
        let boss_slot = world.level.boss_slot();
        for (slot, enemy) in world.level.enemies.iter_mut().enumerate() {
            if slot != boss_slot {
                enemy.entity.pos.x = 10_000.0;
            }
        }
    }

    fn kill_boss(world: &mut World) {
        let mut rng = Rng::new(3);
        let mut now = 0;
        let (boss, entity) = world.level.boss_mut().boss_parts_mut().unwrap();
        let mut last = HitOutcome::Ignored;
        for _ in 0..BOSS_ENERGY {
            last = boss.hit(entity, now, &mut rng).outcome;
            now += 20;
        }
        assert_eq!(last, HitOutcome::Killed);
        assert_eq!(boss.phase(), BossPhase::Dead);
    }

    #[test]
    fn stock_world_starts_every_system() {
        let (world, ctx) = session();
        assert!(world.is_running());
        assert_eq!(ctx.scheduler.active_count(), 20);
        assert_eq!(world.character().x(), CHARACTER_START_X);
        assert_eq!(world.camera().offset_x, -CHARACTER_START_X + CAMERA_LEAD);
    }

    #[test]
    fn coin_pickup_moves_coin_to_collection() {
        let (mut world, _) = session();
        world.character.entity.pos.x = 0.0;
        let n = world.level.coins.len();
        world.level.coins[0].pos = world.character.entity.pos;
        world.level.coins[0].size = world.character.entity.size;

        world.collect_pickups();
        assert_eq!(world.level().coins.len(), n - 1);
        assert_eq!(world.collected_coins().len(), 1);
        assert_eq!(world.cues, vec![SoundEvent::play(SoundKind::Coin, VOLUME_COIN)]);
    }

    #[test]
    fn bottles_are_collected_after_coins_without_a_cue() {
        let (mut world, _) = session();
        let at = world.character.entity.pos;
        world.level.bottles[0].pos = at + Vec2::new(0.0, 150.0);
        world.collect_pickups();
        assert_eq!(world.collected_bottles().len(), 1);
        assert!(world.cues.is_empty());
    }

    #[test]
    fn throw_consumes_one_bottle() {
        let (mut world, _) = session();
        world.character.entity.pos.x = 100.0;
        world.character.entity.facing_left = false;
        let two: Vec<Entity> = world.level.bottles.drain(..2).collect();
        world.collected_bottles.extend(two);

        let throw = ControlState { throw: true, ..Default::default() };
        world.throw_bottle(&throw);
        assert_eq!(world.collected_bottles().len(), 1);
        assert_eq!(world.projectiles().len(), 1);
        let p = &world.projectiles()[0];
        assert!(!p.entity.facing_left);
        assert!(p.entity.body.unwrap().speed_x > 0.0);
        assert_eq!(p.entity.pos.x, 110.0);

        let before = p.entity.pos.x;
        world.projectiles.iter_mut().for_each(Projectile::fly);
        assert!(world.projectiles()[0].entity.pos.x > before);
    }

    #[test]
    fn throw_needs_a_bottle() {
        let (mut world, _) = session();
        world.throw_bottle(&ControlState { throw: true, ..Default::default() });
        assert!(world.projectiles().is_empty());
        assert!(world.cues.is_empty());
    }

    #[test]
    fn stomp_kills_walker_and_bounces() {
        let (mut world, _) = session();
        clear_walkers(&mut world);
        world.character.entity.pos = Vec2::new(500.0, 150.0);
        let chicken = &mut world.level.enemies[0];
        assert_eq!(chicken.kind, EnemyKind::Chicken);
        assert_eq!(chicken.entity.energy(), 2);
        chicken.entity.pos = Vec2::new(520.0, 300.0);

        world.resolve_contacts(1000);
        assert_eq!(world.level().enemies[0].entity.energy(), 0);
        assert_eq!(world.character().entity.body.unwrap().speed_y, STOMP_BOUNCE_SPEED);
        assert_eq!(world.character().entity.energy(), CHARACTER_ENERGY);
        assert_eq!(world.cues, vec![SoundEvent::play(SoundKind::Jump, VOLUME_STOMP)]);
    }

    #[test]
    fn grounded_contact_hurts_the_character() {
        let (mut world, _) = session();
        clear_walkers(&mut world);
        let at = world.character.entity.pos;
        world.level.enemies[0].entity.pos = Vec2::new(at.x + 20.0, CHICKEN_Y);

        world.resolve_contacts(1000);
        assert_eq!(world.level().enemies[0].entity.energy(), 2);
        assert_eq!(world.character().entity.energy(), CHARACTER_ENERGY - 1);
        assert_eq!(world.cues, vec![SoundEvent::play(SoundKind::Hurt, VOLUME_HURT)]);
    }

    #[test]
    fn airborne_contact_with_boss_is_not_a_stomp() {
        let (mut world, _) = session();
        let boss_x = world.level.boss().entity.pos.x;
        world.character.entity.pos = Vec2::new(boss_x, 100.0);

        world.resolve_contacts(1000);
        assert_eq!(world.level().boss().entity.energy(), BOSS_ENERGY);
        assert_eq!(world.character().entity.energy(), CHARACTER_ENERGY - 1);
    }

    #[test]
    fn bottle_splashes_on_boss_and_keeps_hitting() {
        let (mut world, mut ctx) = session();
        let boss_pos = world.level.boss().entity.pos;
        world.character.entity.pos = Vec2::new(boss_pos.x, CHARACTER_GROUND_Y);
        let bottle = world.level.bottles.remove(0);
        world.collected_bottles.push(bottle);
        world.throw_bottle(&ControlState { throw: true, ..Default::default() });
        world.cues.clear();

        world.resolve_projectile_hits(1000, &mut ctx.rng);
        assert!(world.projectiles()[0].is_splashing());
        assert_eq!(world.level().boss().entity.energy(), BOSS_ENERGY - 1);
        assert_eq!(plays(&world.cues, SoundKind::BrokenBottle), 1);

        world.resolve_projectile_hits(1020, &mut ctx.rng);
        assert_eq!(world.level().boss().entity.energy(), BOSS_ENERGY - 2);
        assert_eq!(plays(&world.cues, SoundKind::BrokenBottle), 1);
        assert_eq!(world.projectiles()[0].last_impact_ms(), Some(1020));

        world.run_timers(1000 + SPLASH_REMOVE_MS);
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn ground_band_breaks_the_bottle() {
        let (mut world, mut ctx) = session();
        clear_walkers(&mut world);
        let bottle = world.level.bottles.remove(0);
        world.collected_bottles.push(bottle);
        world.throw_bottle(&ControlState { throw: true, ..Default::default() });
        world.projectiles[0].entity.pos.y = 340.0;

        world.resolve_projectile_hits(500, &mut ctx.rng);
        assert!(world.projectiles()[0].is_splashing());
        world.run_timers(999);
        assert_eq!(world.projectiles().len(), 1);
        world.run_timers(1000);
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn boss_defeat_fires_win_exactly_once() {
        let (mut world, mut ctx) = session();
        assert_eq!(world.level().boss().entity.energy(), 150);
        kill_boss(&mut world);

        let idle = ControlState::default();
        let (sounds, events) = run(&mut world, &mut ctx, &idle, 30);
        assert_eq!(world.outcome(), Some(Outcome::Won));
        assert_eq!(count(&events, GameEvent::WIN), 1);
        assert_eq!(count(&events, GameEvent::LOSE), 0);
        assert_eq!(plays(&sounds, SoundKind::Win), 1);
        assert!(!world.is_running());
        assert!(ctx.scheduler.ensure_drained().is_ok());

        // Later ticks, even with the character dying, change nothing.
        world.character.entity.health.as_mut().unwrap().kill();
        let (sounds, events) = run(&mut world, &mut ctx, &idle, 60);
        assert!(events.is_empty());
        assert!(sounds.is_empty());
        world.evaluate_outcome(&mut ctx);
        assert_eq!(world.outcome(), Some(Outcome::Won));
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn character_death_loses_with_muted_flag() {
        let (mut world, mut ctx) = session();
        let muted = ControlState { mute: true, ..Default::default() };
        run(&mut world, &mut ctx, &muted, 2);
        world.character.entity.health.as_mut().unwrap().kill();

        let (sounds, events) = run(&mut world, &mut ctx, &muted, 30);
        assert_eq!(world.outcome(), Some(Outcome::Lost));
        let lose: Vec<&GameEvent> = events.iter().filter(|e| e.kind == GameEvent::LOSE).collect();
        assert_eq!(lose.len(), 1);
        assert!(lose[0].muted());
        // Muted: no jingle.
        assert_eq!(plays(&sounds, SoundKind::Lose), 0);
        assert_eq!(ctx.scheduler.active_count(), 0);
    }

    #[test]
    fn music_follows_mute() {
        let (mut world, mut ctx) = session();
        let loud = ControlState::default();
        let (sounds, _) = run(&mut world, &mut ctx, &loud, 20);
        assert_eq!(plays(&sounds, SoundKind::Music), 1);

        let muted = ControlState { mute: true, ..Default::default() };
        let (sounds, events) = run(&mut world, &mut ctx, &muted, 20);
        assert_eq!(count(&events, GameEvent::MUTE_CHANGED), 1);
        assert!(sounds.contains(&SoundEvent::stop(SoundKind::Music)));
        assert!(sounds.iter().all(|s| s.stop));
        assert!(world.is_muted());

        let (sounds, events) = run(&mut world, &mut ctx, &loud, 20);
        assert_eq!(count(&events, GameEvent::MUTE_CHANGED), 1);
        assert_eq!(plays(&sounds, SoundKind::Music), 1);
    }

    #[test]
    fn walking_moves_camera_and_plays_footsteps() {
        let (mut world, mut ctx) = session();
        let right = ControlState { move_right: true, ..Default::default() };
        let (sounds, _) = run(&mut world, &mut ctx, &right, 60);
        let x = world.character().x();
        assert!(x > CHARACTER_START_X);
        assert_eq!(world.camera().offset_x, -x + CAMERA_LEAD);
        let steps = plays(&sounds, SoundKind::Footstep);
        assert!((3..=4).contains(&steps), "footsteps: {steps}");
    }

    #[test]
    fn idle_character_falls_asleep() {
        let (mut world, mut ctx) = session();
        clear_walkers(&mut world);
        let (sounds, _) = run(&mut world, &mut ctx, &ControlState::default(), 150);
        assert_eq!(plays(&sounds, SoundKind::Snore), 1);
        assert_eq!(world.character().entity.animator.as_ref().unwrap().current(), "sleep");
    }

    #[test]
    fn reset_drains_systems_and_clears_collections() {
        let (mut world, mut ctx) = session();
        run(&mut world, &mut ctx, &ControlState::default(), 20);
        let bottle = world.level.bottles.remove(0);
        world.collected_bottles.push(bottle);
        let coin = world.level.coins.remove(0);
        world.collected_coins.push(coin);
        world.throw_bottle(&ControlState { throw: true, ..Default::default() });
        let coins_left = world.level().coins.len();

        ctx.clear_frame_data();
        world.reset(&mut ctx);
        assert!(world.projectiles().is_empty());
        assert!(world.collected_coins().is_empty());
        assert!(world.collected_bottles().is_empty());
        assert_eq!(world.level().coins.len(), coins_left);
        assert_eq!(ctx.events, vec![GameEvent::reset()]);
        assert!(ctx.sounds.contains(&SoundEvent::stop(SoundKind::Music)));
        assert!(ctx.scheduler.ensure_drained().is_ok());
        assert!(!world.is_running());
        assert_eq!(ctx.scheduler.cancel_all(), 0);

        let (sounds, events) = run(&mut world, &mut ctx, &ControlState::default(), 10);
        assert!(sounds.is_empty() && events.is_empty());
    }

    #[test]
    fn second_init_registers_nothing() {
        let (mut world, mut ctx) = session();
        assert!(world.init(&mut ctx).is_ok());
        assert_eq!(ctx.scheduler.active_count(), 20);
    }

    #[test]
    fn render_order_and_balanced_transforms() {
        let (mut world, mut ctx) = session();
        run(&mut world, &mut ctx, &ControlState::default(), 5);
        world.character.entity.facing_left = true;

        let mut buf = RenderBuffer::new();
        world.render(&mut buf);
        assert_eq!(buf.stack_depth(), 0);
        assert!(buf.is_identity());

        let first = buf.instances[0];
        assert_eq!(first.atlas, world.sheets.background.0 as f32);
        // Boss bars stay hidden until it walks; three bars close the frame.
        let tail: Vec<f32> = buf.instances.iter().rev().take(3).map(|i| i.row).collect();
        assert_eq!(tail, vec![2.0, 1.0, 0.0]);
        let character = buf.instances[buf.instances.len() - 4];
        assert_eq!(character.atlas, world.sheets.character.0 as f32);
        assert!(character.is_flipped());
        // Camera-relative: the character sits at the lead on screen.
        assert_eq!(character.x, CAMERA_LEAD);
    }

    #[test]
    fn hitmarker_is_drawn_right_after_the_boss() {
        let (mut world, mut ctx) = session();
        world.character.entity.pos.x = 2000.0;
        world.camera.follow(2000.0);
        let mut rng = Rng::new(4);
        {
            let (boss, entity) = world.level.boss_mut().boss_parts_mut().unwrap();
            for step in 0..8 {
                boss.step_phase(entity, 2000.0, step * BOSS_FRAME_MS);
            }
            boss.hit(entity, 3000, &mut rng);
            assert!(boss.hitmarker().is_some());
        }
        run(&mut world, &mut ctx, &ControlState::default(), 1);

        let mut buf = RenderBuffer::new();
        world.render(&mut buf);
        let boss_at = buf
            .instances
            .iter()
            .position(|i| i.atlas == world.sheets.endboss.0 as f32)
            .unwrap();
        let marker = buf.instances[boss_at + 1];
        assert_eq!(marker.atlas, world.sheets.hitmarker.0 as f32);
        assert_eq!(marker.width, HITMARKER_SIZE);
    }

    #[test]
    fn load_assets_rebinds_sheets() {
        let (mut world, _) = session();
        let manifest = AssetManifest::from_json(
            r#"{ "sheets": [ { "name": "character", "cols": 10, "rows": 6, "path": "c.png" } ] }"#,
        )
        .unwrap();
        world.load_assets(&SpriteRegistry::from_manifest(&manifest));
        assert_eq!(world.character().entity.sprite.as_ref().unwrap().atlas.0, 0);
        assert_eq!(world.level().boss().entity.sprite.as_ref().unwrap().atlas, PLACEHOLDER_ATLAS);
        assert_eq!(world.bars().health.sprite.as_ref().unwrap().atlas, PLACEHOLDER_ATLAS);
    }

    #[test]
    fn invalid_level_never_builds_a_world() {
        let mut manifest = LevelManifest::level_one();
        manifest.enemies.clear();
        assert!(World::with_level(&manifest, 1).is_err());
    }
}
