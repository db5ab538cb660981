//! Systems for the player cat: spawning, locomotion, camera, input, and carried props.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    log::debug,
    math::primitives::Capsule3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    interaction::{
        components::{CharacterInteractionState, Interactor, ProbeCollider, ViewForward},
        config::InteractionSettings,
        events::{InteractStart, InteractStop, ObjectDropped, ObjectGrabbed},
    },
    player::components::{FollowCamera, Locomotion, Player},
};

const CAT_RADIUS: f32 = 25.0;
const CAT_BODY_LENGTH: f32 = 40.0;
const PLAYER_START_POS: Vec3 = Vec3::new(0.0, CAT_RADIUS + CAT_BODY_LENGTH * 0.5, 300.0);
const MAX_PITCH: f32 = 1.54;

/// Spawns the cat and the camera boom that follows it.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let player = commands
        .spawn((
            Mesh3d(meshes.add(Mesh::from(Capsule3d::new(CAT_RADIUS, CAT_BODY_LENGTH)))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(230, 150, 70),
                ..default()
            })),
            Transform::from_translation(PLAYER_START_POS),
            Player,
            Interactor,
            CharacterInteractionState::default(),
            ViewForward::default(),
            Locomotion::default(),
            Name::new("Cat"),
        ))
        .id();

    let follow = FollowCamera::new(player);
    let mut camera_transform = Transform::from_translation(
        PLAYER_START_POS + follow.rotation() * Vec3::new(0.0, 0.0, follow.distance),
    );
    camera_transform.look_at(PLAYER_START_POS, Vec3::Y);

    commands.spawn((Camera3d::default(), camera_transform, follow));
}

/// Maps the E key to interact press/release messages for the player.
pub fn emit_interact_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<Entity, With<Player>>,
    mut starts: MessageWriter<InteractStart>,
    mut stops: MessageWriter<InteractStop>,
) {
    let pressed = keyboard.just_pressed(KeyCode::KeyE);
    let released = keyboard.just_released(KeyCode::KeyE);
    if !pressed && !released {
        return;
    }

    for character in players.iter() {
        if pressed {
            starts.write(InteractStart { character });
        }
        if released {
            stops.write(InteractStop { character });
        }
    }
}

/// Toggles cursor grab while the orbit button is held.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Rotates the camera boom with the mouse while the right button is held.
pub fn orbit_follow_camera(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut cameras: Query<&mut FollowCamera>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if !mouse_buttons.pressed(MouseButton::Right) || cumulative_delta == Vec2::ZERO {
        return;
    }

    for mut camera in cameras.iter_mut() {
        let step = camera.look_sensitivity * time.delta_secs();
        camera.yaw -= cumulative_delta.x * step;
        camera.pitch = (camera.pitch - cumulative_delta.y * step).clamp(-MAX_PITCH, MAX_PITCH);
    }
}

/// Walks the player with WASD relative to where the camera looks, turning the body to match.
pub fn walk_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    cameras: Query<&FollowCamera>,
    mut players: Query<(Entity, &Locomotion, &mut Transform), With<Player>>,
) {
    for (entity, locomotion, mut transform) in players.iter_mut() {
        let Some(camera) = cameras.iter().find(|camera| camera.target == entity) else {
            continue;
        };

        let forward = camera.planar_forward();
        let right = Vec3::new(-forward.z, 0.0, forward.x);

        let mut direction = Vec3::ZERO;
        if keyboard.pressed(KeyCode::KeyW) {
            direction += forward;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            direction -= forward;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            direction -= right;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            direction += right;
        }

        if direction.length_squared() == 0.0 {
            continue;
        }

        let direction = direction.normalize();
        transform.translation += direction * locomotion.walk_speed * time.delta_secs();

        let facing = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
        let blend = (locomotion.turn_rate * time.delta_secs()).clamp(0.0, 1.0);
        transform.rotation = transform.rotation.slerp(facing, blend);
    }
}

/// Places each boom camera behind its target and publishes the view direction to the target.
pub fn follow_player(
    mut cameras: Query<(&FollowCamera, &mut Transform), Without<Player>>,
    mut players: Query<(&Transform, &mut ViewForward), With<Player>>,
) {
    for (camera, mut camera_transform) in cameras.iter_mut() {
        let Ok((target_transform, mut view)) = players.get_mut(camera.target) else {
            continue;
        };

        let rotation = camera.rotation();
        camera_transform.translation =
            target_transform.translation + rotation * Vec3::new(0.0, 0.0, camera.distance);
        camera_transform.rotation = rotation;
        view.0 = camera_transform.forward();
    }
}

/// Parents a grabbed prop to its carrier so it moves with the cat.
pub fn attach_grabbed_objects(
    mut commands: Commands,
    settings: Res<InteractionSettings>,
    mut grabbed: MessageReader<ObjectGrabbed>,
) {
    for message in grabbed.read() {
        let Ok(mut target) = commands.get_entity(message.target) else {
            continue;
        };
        target.try_insert((
            ChildOf(message.character),
            Transform::from_translation(settings.carry_offset),
        ));
        debug!(
            target: "interaction",
            "{} now carries {}",
            message.character,
            message.target
        );
    }
}

/// Detaches a dropped prop and sets it down in front of its carrier.
pub fn detach_dropped_objects(
    mut commands: Commands,
    settings: Res<InteractionSettings>,
    mut dropped: MessageReader<ObjectDropped>,
    carriers: Query<&GlobalTransform>,
    colliders: Query<&ProbeCollider>,
) {
    for message in dropped.read() {
        let Ok(carrier) = carriers.get(message.character) else {
            continue;
        };
        let Ok(mut target) = commands.get_entity(message.target) else {
            continue;
        };

        let forward = carrier.forward().as_vec3();
        let planar = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let resting_height = colliders
            .get(message.target)
            .map(|collider| collider.radius)
            .unwrap_or(0.0);

        let mut position = carrier.translation() + planar * settings.drop_distance;
        position.y = resting_height;

        target
            .try_remove::<ChildOf>()
            .try_insert(Transform::from_translation(position));
    }
}
