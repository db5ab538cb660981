//! Player plugin wiring the cat's controls and carried-prop visuals.
use bevy::prelude::*;

use crate::{
    interaction::InteractionDispatchSet,
    player::systems::{
        attach_grabbed_objects, detach_dropped_objects, emit_interact_input, follow_player,
        orbit_follow_camera, spawn_player, update_cursor_grab, walk_player,
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player).add_systems(
            Update,
            (
                (
                    update_cursor_grab,
                    orbit_follow_camera.after(update_cursor_grab),
                    walk_player.after(orbit_follow_camera),
                    follow_player.after(walk_player),
                    emit_interact_input.after(follow_player),
                )
                    .before(InteractionDispatchSet),
                (attach_grabbed_objects, detach_dropped_objects).after(InteractionDispatchSet),
            ),
        );
    }
}
