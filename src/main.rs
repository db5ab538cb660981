use bevy::prelude::*;

mod interaction;
mod player;
mod world;

use crate::{interaction::InteractionPlugin, player::PlayerPlugin, world::WorldPlugin};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            InteractionPlugin,
            WorldPlugin,
            PlayerPlugin,
        ))
        .run();
}
