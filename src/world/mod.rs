//! World module housing environment setup, prop layout, and prop reactions.
pub mod components;
pub mod layout;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
