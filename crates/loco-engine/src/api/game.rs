use crate::api::types::{GameEvent, SoundEvent};
use crate::assets::registry::SpriteRegistry;
use crate::core::error::EngineError;
use crate::core::rng::Rng;
use crate::core::scheduler::Scheduler;
use crate::core::time::SimClock;
use crate::input::queue::ControlState;
use crate::renderer::traits::RenderTarget;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Base simulation tick in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Viewport width in game units.
    pub world_width: f32,
    /// Viewport height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the session RNG (spawn positions, speeds, hitmarkers).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 720.0,
            world_height: 480.0,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Register periodic systems and start the session. A failure here is
    /// fatal: the session does not start.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// One simulation tick. The clock and the scheduler were already
    /// advanced by the caller.
    fn update(&mut self, ctx: &mut EngineContext, controls: &ControlState);

    /// Read-only render pass, run at display rate.
    fn render(&self, target: &mut dyn RenderTarget);

    /// Rebind sprite sheets after the host loaded an asset manifest.
    fn load_assets(&mut self, _registry: &SpriteRegistry) {}

    /// Tear the session down: stop every periodic system and clear
    /// transient collections.
    fn reset(&mut self, ctx: &mut EngineContext);
}

/// Callbacks for terminal session transitions. The presentation layer owns
/// everything downstream of them (overlays, screen visibility).
pub trait SessionHooks {
    fn on_win(&mut self, _muted: bool) {}
    fn on_lose(&mut self, _muted: bool) {}
    fn on_reset(&mut self) {}
}

/// Hooks that only log the transition.
#[derive(Debug, Default)]
pub struct LogHooks;

impl SessionHooks for LogHooks {
    fn on_win(&mut self, muted: bool) {
        log::info!("session won (muted: {})", muted);
    }

    fn on_lose(&mut self, muted: bool) {
        log::info!("session lost (muted: {})", muted);
    }

    fn on_reset(&mut self) {
        log::info!("session reset");
    }
}

/// Route the game events of one frame to `hooks`.
pub fn dispatch_events(events: &[GameEvent], hooks: &mut dyn SessionHooks) {
    for event in events {
        if event.kind == GameEvent::WIN {
            hooks.on_win(event.muted());
        } else if event.kind == GameEvent::LOSE {
            hooks.on_lose(event.muted());
        } else if event.kind == GameEvent::RESET {
            hooks.on_reset();
        }
    }
}

/// Mutable session state shared by the game's systems, passed to
/// Game::init, Game::update and Game::reset.
pub struct EngineContext {
    pub clock: SimClock,
    pub scheduler: Scheduler,
    pub rng: Rng,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new(seed: u64) -> Self {
        Self {
            clock: SimClock::new(),
            scheduler: Scheduler::new(),
            rng: Rng::new(seed),
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Advance the session clock and every periodic cadence by one tick.
    pub fn begin_tick(&mut self, dt_us: u64) {
        self.clock.advance(dt_us);
        self.scheduler.advance(dt_us);
    }

    /// Session time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Emit a sound cue for the host audio layer.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event for the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(GameConfig::default().seed)
    }
}
