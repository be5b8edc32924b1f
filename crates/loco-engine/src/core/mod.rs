pub mod collision;
pub mod error;
pub mod physics;
pub mod rng;
pub mod scheduler;
pub mod time;
