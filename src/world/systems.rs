//! Systems for the world module.
use bevy::{
    ecs::message::MessageReader,
    math::primitives::{Plane3d, Sphere},
    prelude::*,
};

use crate::{
    interaction::{
        components::{Interactable, InteractionCategory, ProbeCollider},
        config::InteractionSettings,
        events::InteractionEffect,
    },
    world::{
        components::Prop,
        layout::WorldLayout,
    },
};

const GROUND_SCALE: f32 = 2_000.0;

/// Spawns the ground plane and the sun.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(170, 140, 110),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(400.0, 800.0, 400.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Spawns every prop from the layout with its probe collider and category tag.
pub fn spawn_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<WorldLayout>,
    settings: Res<InteractionSettings>,
) {
    for spec in &layout.props {
        let radius = spec.radius.unwrap_or(settings.default_collider_radius);

        let mut prop = commands.spawn((
            Mesh3d(meshes.add(Mesh::from(Sphere::new(radius)))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: prop_color(spec.category),
                ..default()
            })),
            Transform::from_translation(spec.position),
            ProbeCollider::new(radius),
            Prop {
                label: spec.name.clone(),
            },
            Name::new(spec.name.clone()),
        ));
        if let Some(category) = spec.category {
            prop.insert(Interactable::new(category));
        }
    }

    info!("Spawned {} props", layout.props.len());
}

fn prop_color(category: Option<InteractionCategory>) -> Color {
    match category {
        Some(InteractionCategory::Push) => Color::srgb_u8(160, 120, 80),
        Some(InteractionCategory::Drink) => Color::srgb_u8(80, 140, 220),
        Some(InteractionCategory::Scratch) => Color::srgb_u8(200, 180, 140),
        Some(InteractionCategory::Food) => Color::srgb_u8(220, 90, 90),
        Some(InteractionCategory::Grab) => Color::srgb_u8(150, 150, 160),
        Some(InteractionCategory::Play) => Color::srgb_u8(210, 90, 200),
        Some(InteractionCategory::Sniff) => Color::srgb_u8(90, 170, 90),
        None => Color::srgb_u8(90, 70, 60),
    }
}

/// Reacts to category effects aimed at props. Food is eaten; the rest are acknowledged.
pub fn react_to_interaction_effects(
    mut commands: Commands,
    mut effects: MessageReader<InteractionEffect>,
    props: Query<&Prop>,
    names: Query<&Name>,
) {
    for effect in effects.read() {
        let actor = names
            .get(effect.character)
            .map(Name::as_str)
            .unwrap_or("someone");
        let label = props
            .get(effect.target)
            .map(|prop| prop.label.as_str())
            .unwrap_or("something");

        match effect.category {
            InteractionCategory::Push => info!("{} pushes {}", actor, label),
            InteractionCategory::Drink => info!("{} drinks from {}", actor, label),
            InteractionCategory::Scratch => info!("{} scratches {}", actor, label),
            InteractionCategory::Food => {
                info!("{} eats {}", actor, label);
                if let Ok(mut target) = commands.get_entity(effect.target) {
                    target.try_despawn();
                }
            }
            InteractionCategory::Play => info!("{} plays with {}", actor, label),
            InteractionCategory::Sniff => info!("{} sniffs {}", actor, label),
            InteractionCategory::Grab => warn!(
                "Grab from {} arrived as a stateless effect for {}; ignoring",
                actor, label
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eating_removes_the_food() {
        let mut app = App::new();
        app.add_message::<InteractionEffect>()
            .add_systems(Update, react_to_interaction_effects);

        let character = app.world_mut().spawn(Name::new("Cat")).id();
        let bowl = app
            .world_mut()
            .spawn(Prop {
                label: "Food bowl".to_string(),
            })
            .id();
        let post = app
            .world_mut()
            .spawn(Prop {
                label: "Scratching post".to_string(),
            })
            .id();

        app.world_mut().write_message(InteractionEffect {
            character,
            target: bowl,
            category: InteractionCategory::Food,
        });
        app.world_mut().write_message(InteractionEffect {
            character,
            target: post,
            category: InteractionCategory::Scratch,
        });
        app.update();

        assert!(app.world().get_entity(bowl).is_err());
        assert!(app.world().get_entity(post).is_ok());
    }
}
