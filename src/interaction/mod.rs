//! Interaction module: forward probe targeting, category dispatch, and the hold/drop state machine.
pub mod classify;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod hold;
pub mod plugin;
pub mod probe;
pub mod systems;
pub mod telemetry;

pub use plugin::{InteractionDispatchSet, InteractionPlugin};
