//! Messages entering and leaving the interaction core.
use bevy::prelude::{Entity, Event, Message};

use super::components::InteractionCategory;

/// Interact button pressed by a character.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct InteractStart {
    pub character: Entity,
}

/// Interact button released. Releasing never drops a held object.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct InteractStop {
    pub character: Entity,
}

/// A stateless category handler fired for `target`.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct InteractionEffect {
    pub character: Entity,
    pub target: Entity,
    pub category: InteractionCategory,
}

#[derive(Event, Message, Debug, Clone, Copy)]
pub struct ObjectGrabbed {
    pub character: Entity,
    pub target: Entity,
}

#[derive(Event, Message, Debug, Clone, Copy)]
pub struct ObjectDropped {
    pub character: Entity,
    pub target: Entity,
}
