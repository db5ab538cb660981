//! Components used by the world module.
use bevy::prelude::*;

/// A prop placed from the world layout, kept for log-friendly naming.
#[derive(Component, Debug, Clone)]
pub struct Prop {
    pub label: String,
}
