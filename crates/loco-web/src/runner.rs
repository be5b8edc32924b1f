use loco_engine::{
    dispatch_events, AssetManifest, ControlState, EngineContext, EngineError, FixedTimestep,
    Game, GameConfig, InputEvent, InputQueue, LogHooks, ProtocolLayout, RenderBuffer,
    SessionHooks, SoundRecord, SpriteRegistry,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    controls: ControlState,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    registry: Option<SpriteRegistry>,
    hooks: Box<dyn SessionHooks>,
    running: bool,
    frame_counter: u64,
    /// Sound records of the last frame for the host audio layer.
    sound_buffer: Vec<SoundRecord>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::new(config.seed),
            input: InputQueue::new(),
            controls: ControlState::default(),
            render_buffer,
            timestep,
            layout,
            config,
            registry: None,
            hooks: Box::new(LogHooks),
            running: false,
            frame_counter: 0,
            sound_buffer,
        }
    }

    /// Replace the session hooks (defaults to logging only).
    pub fn with_hooks(mut self, hooks: impl SessionHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Start the session. Call once after construction; a failure leaves the
    /// runner stopped.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx)?;
        self.running = true;
        log::info!(
            "runner: session started with {} periodic system(s)",
            self.ctx.scheduler.active_count()
        );
        Ok(())
    }

    /// Load an asset manifest and hand the resulting registry to the game.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), EngineError> {
        let manifest = AssetManifest::from_json(json)?;
        let registry = SpriteRegistry::from_manifest(&manifest);
        self.game.load_assets(&registry);
        log::info!(
            "runner: loaded {} sheet(s), {} sound(s)",
            manifest.sheets.len(),
            manifest.sounds.len()
        );
        self.registry = Some(registry);
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed simulation steps, then the render pass.
    pub fn tick(&mut self, dt: f32) {
        self.ctx.clear_frame_data();
        self.input.apply_to(&mut self.controls);

        if self.running {
            let steps = self.timestep.accumulate(dt);
            let dt_us = self.timestep.dt_us();
            for _ in 0..steps {
                self.ctx.begin_tick(dt_us);
                self.game.update(&mut self.ctx, &self.controls);
            }
        }

        self.game.render(&mut self.render_buffer);
        if self.render_buffer.instances.len() > self.layout.max_instances {
            log::warn!(
                "runner: {} render instances exceed capacity {}",
                self.render_buffer.instances.len(),
                self.layout.max_instances
            );
            self.render_buffer.instances.truncate(self.layout.max_instances);
        }

        self.pack_sounds();
        self.finish_events();
        self.frame_counter += 1;
    }

    /// Return to the start screen: tear the session down and verify every
    /// periodic system is gone.
    pub fn reset(&mut self) {
        self.ctx.clear_frame_data();
        self.game.reset(&mut self.ctx);
        if let Err(err) = self.ctx.scheduler.ensure_drained() {
            log::error!("runner: {}", err);
        }
        self.timestep.reset();
        self.controls = ControlState::default();
        self.running = false;
        self.pack_sounds();
        self.finish_events();
    }

    fn pack_sounds(&mut self) {
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            if let Some(registry) = &self.registry {
                if !registry.has_sound(sound.kind) {
                    continue;
                }
            }
            if self.sound_buffer.len() == self.layout.max_sounds {
                log::warn!("runner: sound buffer full, dropping {:?}", sound.kind);
                break;
            }
            self.sound_buffer.push(sound.record());
        }
    }

    fn finish_events(&mut self) {
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!("runner: dropping {} game event(s)", self.ctx.events.len() - self.layout.max_events);
            self.ctx.events.truncate(self.layout.max_events);
        }
        dispatch_events(&self.ctx.events, self.hooks.as_mut());
    }

    // ---- Accessors for host reads ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn sound_events(&self) -> &[SoundRecord] {
        &self.sound_buffer
    }

    /// The sound records as a flat float slice, `SoundRecord::FLOATS` per cue.
    pub fn sound_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.sound_buffer[..])
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_buffer.as_ptr() as *const f32
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
