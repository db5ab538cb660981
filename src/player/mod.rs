//! Player module - the controllable cat, its follow camera, and interact input.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
