//! WorldPlugin coordinates environment setup, prop layout, and prop reactions.
use bevy::prelude::*;

use crate::{
    interaction::InteractionDispatchSet,
    world::{
        layout::WorldLayout,
        systems::{react_to_interaction_effects, spawn_props, spawn_world_environment},
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let layout = WorldLayout::load_or_default();
        info!("World layout configured with {} props", layout.props.len());

        app.insert_resource(layout)
            .add_systems(
                Startup,
                (spawn_world_environment, spawn_props.after(spawn_world_environment)),
            )
            .add_systems(
                Update,
                react_to_interaction_effects.after(InteractionDispatchSet),
            );
    }
}
