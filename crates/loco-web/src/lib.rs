pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// This macro generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, control handlers,
///   session reset, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod world;
/// use world::World;
///
/// loco_web::export_game!(World, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `loco_engine::Game`
///   and provides `fn new() -> Result<Self, loco_engine::EngineError>`
/// - `$game_name`: A string literal used in log messages
///
/// Control ids follow `loco_engine::Control::from_id`: 0 left, 1 right,
/// 2 jump, 3 throw, 4 mute.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call game_init() first", $game_name);
                        None
                    }
                }
            })
        }

        fn push_control(id: u32, pressed: bool) {
            let Some(control) = loco_engine::Control::from_id(id) else {
                log::warn!("{}: unknown control id {}", $game_name, id);
                return;
            };
            let event = if pressed {
                loco_engine::InputEvent::Press(control)
            } else {
                loco_engine::InputEvent::Release(control)
            };
            with_runner(|r| r.push_input(event));
        }

        /// Start a fresh session. Returns false if the level could not be built.
        #[wasm_bindgen]
        pub fn game_init() -> bool {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = match <$game_type>::new() {
                Ok(game) => game,
                Err(err) => {
                    log::error!("{}: {}", $game_name, err);
                    return false;
                }
            };
            let mut runner = $crate::GameRunner::new(game);
            if let Err(err) = runner.init() {
                log::error!("{}: {}", $game_name, err);
                return false;
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            true
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_reset() {
            with_runner(|r| r.reset());
        }

        #[wasm_bindgen]
        pub fn game_control_down(id: u32) {
            push_control(id, true);
        }

        #[wasm_bindgen]
        pub fn game_control_up(id: u32) {
            push_control(id, false);
        }

        #[wasm_bindgen]
        pub fn game_release_all() {
            with_runner(|r| r.push_input(loco_engine::InputEvent::ReleaseAll));
        }

        #[wasm_bindgen]
        pub fn game_set_muted(muted: bool) {
            push_control(4, muted);
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> bool {
            match with_runner(|r| r.load_manifest(json)) {
                Some(Ok(())) => true,
                Some(Err(err)) => {
                    log::error!("{}: {}", $game_name, err);
                    false
                }
                None => false,
            }
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        /// Sound records of the last frame (kind, volume, stop per cue),
        /// copied into a fresh array.
        #[wasm_bindgen]
        pub fn get_sound_events() -> js_sys::Float32Array {
            with_runner(|r| js_sys::Float32Array::from(r.sound_floats()))
                .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const f32 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
