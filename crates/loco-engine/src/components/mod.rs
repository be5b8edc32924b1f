pub mod animation;
pub mod entity;
pub mod health;
pub mod sprite;
