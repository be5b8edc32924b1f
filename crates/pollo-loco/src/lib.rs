use wasm_bindgen::prelude::*;

pub mod character;
pub mod constants;
pub mod endboss;
pub mod enemy;
pub mod level;
pub mod sheets;
pub mod status_bar;
pub mod throwable;
pub mod world;

pub use world::{Outcome, World};

loco_web::export_game!(World, "pollo-loco");
