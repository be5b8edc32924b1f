pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{dispatch_events, EngineContext, Game, GameConfig, LogHooks, SessionHooks};
pub use api::types::{EntityId, GameEvent, SoundEvent, SoundKind, SoundRecord};
pub use components::animation::{Animator, Clip};
pub use components::entity::Entity;
pub use components::health::{Health, HitOutcome};
pub use components::sprite::{AtlasId, SpriteComponent};
pub use core::collision::{Collider, HitBox, Inset};
pub use core::error::EngineError;
pub use core::physics::{Body, Ground};
pub use core::rng::Rng;
pub use core::scheduler::{Scheduler, SystemHandle};
pub use core::time::{Cadence, FixedTimestep, SimClock};
pub use renderer::camera::Camera2D;
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use renderer::traits::RenderTarget;
pub use input::queue::{Control, ControlState, InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{SpriteRegistry, PLACEHOLDER_ATLAS};
pub use bridge::protocol::ProtocolLayout;
pub use systems::animation::play_clip;
pub use systems::render::{draw_entities, draw_entity};
