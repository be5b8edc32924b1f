//! Tuning values for the stock game. World units, y grows downward;
//! timers and cadences are in milliseconds of session time.

use loco_engine::Inset;

// Viewport
pub const VIEW_W: f32 = 720.0;
pub const VIEW_H: f32 = 480.0;
/// Screen x the camera keeps the character at.
pub const CAMERA_LEAD: f32 = 100.0;

// Character
pub const CHARACTER_START_X: f32 = 120.0;
pub const CHARACTER_GROUND_Y: f32 = 170.0;
pub const CHARACTER_W: f32 = 120.0;
pub const CHARACTER_H: f32 = 250.0;
pub const CHARACTER_INSET: Inset = Inset::new(110.0, 10.0, 25.0, 25.0);
pub const CHARACTER_SPEED: f32 = 5.0;
pub const CHARACTER_ENERGY: u32 = 1000;
pub const JUMP_SPEED: f32 = 20.0;
pub const STOMP_BOUNCE_SPEED: f32 = 10.0;
pub const GRAVITY: f32 = 2.0;
/// Inactivity before the character falls asleep.
pub const SLEEP_AFTER_MS: u64 = 2000;
/// Minimum gap between two footstep cues.
pub const FOOTSTEP_INTERVAL_MS: u64 = 300;

// Walkers
pub const CHICKEN_Y: f32 = 340.0;
pub const CHICKEN_SIZE: f32 = 80.0;
pub const CHICKEN_INSET: Inset = Inset::new(5.0, 5.0, 25.0, 25.0);
pub const CHICKEN_SPAWN_MIN_X: f32 = 600.0;
pub const CHICKEN_SPAWN_SPAN: f32 = 800.0;
pub const MINI_CHICKEN_Y: f32 = 365.0;
pub const MINI_CHICKEN_SIZE: f32 = 50.0;
pub const MINI_CHICKEN_INSET: Inset = Inset::new(5.0, 5.0, 20.0, 20.0);
pub const MINI_CHICKEN_SPAWN_MIN_X: f32 = 300.0;
pub const MINI_CHICKEN_SPAWN_SPAN: f32 = 1000.0;
pub const WALKER_ENERGY: u32 = 2;
pub const WALKER_SPEED_MIN: f32 = 0.7;
pub const WALKER_SPEED_SPAN: f32 = 0.5;

// Endboss
pub const BOSS_SPAWN_X: f32 = 2300.0;
pub const BOSS_Y: f32 = 60.0;
pub const BOSS_SIZE: f32 = 400.0;
pub const BOSS_INSET: Inset = Inset::new(70.0, 10.0, 60.0, 30.0);
pub const BOSS_ENERGY: u32 = 150;
pub const BOSS_SPEED: f32 = 1.5;
/// Character x beyond which the boss closes in.
pub const BOSS_ENGAGE_X: f32 = 1950.0;
/// One boss animation frame; the phase machine steps at this rate.
pub const BOSS_FRAME_MS: u64 = 300;
/// An attack holds for one pass of the 8-frame attack clip.
pub const BOSS_ATTACK_MS: u64 = 8 * BOSS_FRAME_MS;
pub const BOSS_HIT_SOUND_COOLDOWN_MS: u64 = 1000;
pub const HITMARKER_SIZE: f32 = 50.0;
pub const HITMARKER_MS: u64 = 500;
/// Share of the boss sprite kept clear of hitmarkers on each axis.
pub const HITMARKER_PADDING: f32 = 0.3;

// Thrown bottles
pub const THROW_OFFSET_X: f32 = 10.0;
pub const THROW_OFFSET_Y: f32 = 100.0;
pub const PROJECTILE_SIZE: f32 = 70.0;
pub const PROJECTILE_INSET: Inset = Inset::uniform(5.0);
pub const THROW_SPEED_X: f32 = 5.0;
pub const THROW_SPEED_Y: f32 = 18.0;
/// Projectile top edge inside this open band means it hit the ground.
pub const GROUND_BAND: (f32, f32) = (330.0, 370.0);
pub const SPLASH_REMOVE_MS: u64 = 500;

// Pickups
pub const COIN_SIZE: f32 = 100.0;
pub const COIN_INSET: Inset = Inset::uniform(35.0);
pub const PICKUP_BOTTLE_SIZE: f32 = 80.0;
pub const PICKUP_BOTTLE_Y: f32 = 350.0;
pub const PICKUP_BOTTLE_INSET: Inset = Inset::new(15.0, 5.0, 25.0, 25.0);
pub const PICKUP_BOTTLE_MIN_X: f32 = 350.0;
pub const PICKUP_BOTTLE_SPAN: f32 = 1500.0;

// Scenery
pub const CLOUD_Y: f32 = 10.0;
pub const CLOUD_W: f32 = 1440.0;
pub const CLOUD_H: f32 = 480.0;
pub const CLOUD_SPEED: f32 = 0.2;
pub const BACKGROUND_W: f32 = 720.0;
pub const BACKGROUND_H: f32 = 480.0;
/// Tiles overlap by one unit to hide seams.
pub const BACKGROUND_STRIDE: f32 = 719.0;

// Cadences
pub const MOVE_MS: f64 = 1000.0 / 60.0;
pub const GRAVITY_MS: f64 = 1000.0 / 25.0;
pub const CHARACTER_ANIM_MS: f64 = 100.0;
pub const IDLE_MONITOR_MS: f64 = 100.0;
pub const WALKER_ANIM_MS: f64 = 100.0;
pub const BOSS_PHASE_MS: f64 = BOSS_FRAME_MS as f64;
pub const PROJECTILE_SPIN_MS: f64 = 150.0;
pub const PROJECTILE_SPLASH_MS: f64 = 80.0;
pub const PICKUP_MS: f64 = 20.0;
pub const PROJECTILE_HIT_MS: f64 = 20.0;
pub const CONTACT_MS: f64 = 50.0;
pub const THROW_MS: f64 = 150.0;
pub const MUSIC_MS: f64 = 150.0;
pub const STATUS_BAR_MS: f64 = 100.0;
pub const OUTCOME_MS: f64 = 200.0;

// Volumes
pub const VOLUME_FOOTSTEP: f32 = 1.0;
pub const VOLUME_JUMP: f32 = 0.5;
pub const VOLUME_STOMP: f32 = 0.2;
pub const VOLUME_HURT: f32 = 0.1;
pub const VOLUME_DEATH: f32 = 1.0;
pub const VOLUME_SNORE: f32 = 1.0;
pub const VOLUME_COIN: f32 = 0.2;
pub const VOLUME_THROW: f32 = 0.5;
pub const VOLUME_BROKEN_BOTTLE: f32 = 0.5;
pub const VOLUME_CHICKEN: f32 = 0.2;
pub const VOLUME_HITMARKER: f32 = 1.0;
pub const VOLUME_MUSIC: f32 = 0.03;
pub const VOLUME_JINGLE: f32 = 0.4;
