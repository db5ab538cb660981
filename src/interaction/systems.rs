//! ECS adapters that run the interaction core inside the Bevy schedule.
use bevy::ecs::entity::EntityHashSet;
use bevy::log::{debug, error, info};
use bevy::prelude::*;

use super::{
    components::{
        CharacterInteractionState, CharacterPose, Interactable, InteractionCategory, Interactor,
        ProbeCollider, ViewForward,
    },
    config::InteractionSettings,
    dispatch::{on_interact_start, InteractableRegistry, InteractionEffects, InteractionOutcome},
    errors::InteractionError,
    events::{InteractStart, InteractStop, InteractionEffect, ObjectDropped, ObjectGrabbed},
    probe::{probe, ProbeBody, ProbeHit},
    telemetry::{InteractionRecord, InteractionTelemetry, InteractionTelemetryLog},
};

/// Copy of every probe body and every live entity, taken once per dispatch run.
///
/// An entity is alive while it exists in the world, with or without a collider.
#[derive(Debug, Default)]
pub struct SceneSnapshot {
    bodies: Vec<ProbeBody>,
    existing: EntityHashSet,
}

impl SceneSnapshot {
    pub fn capture<'a>(
        bodies: impl IntoIterator<
            Item = (
                Entity,
                &'a GlobalTransform,
                &'a ProbeCollider,
                Option<&'a Interactable>,
            ),
        >,
        existing: impl IntoIterator<Item = Entity>,
    ) -> Self {
        let bodies = bodies
            .into_iter()
            .map(|(entity, transform, collider, interactable)| ProbeBody {
                entity,
                center: transform.translation(),
                radius: collider.radius,
                category: interactable.map(Interactable::category),
            })
            .collect();
        Self {
            bodies,
            existing: existing.into_iter().collect(),
        }
    }
}

impl InteractableRegistry for SceneSnapshot {
    fn query_nearest(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_range: f32,
    ) -> Result<Option<ProbeHit>, InteractionError> {
        probe(&self.bodies, origin, direction, max_range)
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.existing.contains(&entity)
    }
}

/// Collects effect callbacks for one character so they can be written out as messages.
struct BufferedEffects {
    character: Entity,
    effects: Vec<InteractionEffect>,
    grabbed: Option<ObjectGrabbed>,
    dropped: Option<ObjectDropped>,
}

impl BufferedEffects {
    fn new(character: Entity) -> Self {
        Self {
            character,
            effects: Vec::new(),
            grabbed: None,
            dropped: None,
        }
    }

    fn apply(&mut self, category: InteractionCategory, target: Entity) {
        self.effects.push(InteractionEffect {
            character: self.character,
            target,
            category,
        });
    }

    fn write(
        self,
        effects: &mut MessageWriter<InteractionEffect>,
        grabbed: &mut MessageWriter<ObjectGrabbed>,
        dropped: &mut MessageWriter<ObjectDropped>,
    ) {
        for effect in self.effects {
            effects.write(effect);
        }
        if let Some(message) = self.grabbed {
            grabbed.write(message);
        }
        if let Some(message) = self.dropped {
            dropped.write(message);
        }
    }
}

impl InteractionEffects for BufferedEffects {
    fn push(&mut self, target: Entity) {
        self.apply(InteractionCategory::Push, target);
    }

    fn drink(&mut self, target: Entity) {
        self.apply(InteractionCategory::Drink, target);
    }

    fn scratch(&mut self, target: Entity) {
        self.apply(InteractionCategory::Scratch, target);
    }

    fn eat(&mut self, target: Entity) {
        self.apply(InteractionCategory::Food, target);
    }

    fn play(&mut self, target: Entity) {
        self.apply(InteractionCategory::Play, target);
    }

    fn sniff(&mut self, target: Entity) {
        self.apply(InteractionCategory::Sniff, target);
    }

    fn grab(&mut self, target: Entity) {
        self.grabbed = Some(ObjectGrabbed {
            character: self.character,
            target,
        });
    }

    fn drop_held(&mut self, target: Entity) {
        self.dropped = Some(ObjectDropped {
            character: self.character,
            target,
        });
    }
}

/// Resolves queued interact presses in arrival order.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_interact_requests(
    time: Res<Time>,
    settings: Res<InteractionSettings>,
    mut requests: MessageReader<InteractStart>,
    bodies: Query<(
        Entity,
        &GlobalTransform,
        &ProbeCollider,
        Option<&Interactable>,
    )>,
    entities: Query<Entity>,
    mut characters: Query<
        (
            &GlobalTransform,
            Option<&ViewForward>,
            &mut CharacterInteractionState,
        ),
        With<Interactor>,
    >,
    mut effect_writer: MessageWriter<InteractionEffect>,
    mut grabbed_writer: MessageWriter<ObjectGrabbed>,
    mut dropped_writer: MessageWriter<ObjectDropped>,
    mut telemetry: ResMut<InteractionTelemetry>,
    mut log: ResMut<InteractionTelemetryLog>,
) {
    if requests.is_empty() {
        return;
    }

    let snapshot = SceneSnapshot::capture(bodies.iter(), entities.iter());
    let now = time.elapsed_secs_f64();

    for request in requests.read() {
        let Ok((transform, view, mut state)) = characters.get_mut(request.character) else {
            debug!(
                target: "interaction",
                "Interact press from {} ignored: not an interactor",
                request.character
            );
            continue;
        };

        let forward = view.map(|view| view.0).unwrap_or_else(|| transform.forward());
        let pose = CharacterPose::new(transform.translation(), forward.as_vec3());
        let mut effects = BufferedEffects::new(request.character);

        match on_interact_start(
            &mut state,
            pose,
            settings.max_range,
            &snapshot,
            &mut effects,
        ) {
            Ok(outcome) => {
                log_outcome(request.character, &outcome);
                let record = InteractionRecord {
                    occurred_at_seconds: now,
                    character: request.character,
                    outcome,
                };
                log.push(&record);
                telemetry.push(record);
            }
            Err(err) => {
                error!(
                    target: "interaction",
                    "Interact press from {} violated a contract: {}",
                    request.character,
                    err
                );
                debug_assert!(
                    !matches!(err, InteractionError::InvalidTransition { .. }),
                    "hold state machine reached an invalid transition: {err}"
                );
            }
        }

        effects.write(&mut effect_writer, &mut grabbed_writer, &mut dropped_writer);
    }
}

fn log_outcome(character: Entity, outcome: &InteractionOutcome) {
    match outcome {
        InteractionOutcome::Grabbed { .. }
        | InteractionOutcome::Dropped { .. }
        | InteractionOutcome::Applied { .. } => {
            info!(target: "interaction", "{} interact: {}", character, outcome);
        }
        _ => debug!(target: "interaction", "{} interact: {}", character, outcome),
    }
}

/// Consumes release events; dropping happens on the next press instead.
pub fn log_interact_releases(mut releases: MessageReader<InteractStop>) {
    for release in releases.read() {
        debug!(
            target: "interaction",
            "{} released interact",
            release.character
        );
    }
}

/// Draws each interactor's probe ray.
#[cfg(feature = "probe_debug")]
pub fn draw_probe_rays(
    settings: Res<InteractionSettings>,
    characters: Query<
        (
            &GlobalTransform,
            Option<&ViewForward>,
            &CharacterInteractionState,
        ),
        With<Interactor>,
    >,
    mut gizmos: Gizmos,
) {
    for (transform, view, state) in characters.iter() {
        let forward = view.map(|view| view.0).unwrap_or_else(|| transform.forward());
        let start = transform.translation();
        let color = if state.hold().is_holding() {
            Color::srgb(0.95, 0.8, 0.2)
        } else {
            Color::srgb(0.2, 0.8, 0.95)
        };
        gizmos.line(start, start + forward.as_vec3() * settings.max_range, color);
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;
    use crate::interaction::hold::HoldState;

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .insert_resource(InteractionSettings::default())
            .insert_resource(InteractionTelemetry::new(8))
            .insert_resource(InteractionTelemetryLog::new(
                std::env::temp_dir().join("interaction_systems_test.jsonl"),
            ))
            .add_message::<InteractStart>()
            .add_message::<InteractionEffect>()
            .add_message::<ObjectGrabbed>()
            .add_message::<ObjectDropped>()
            .add_systems(Update, dispatch_interact_requests);
        app
    }

    fn spawn_character(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Interactor,
                CharacterInteractionState::default(),
                GlobalTransform::IDENTITY,
                ViewForward(Dir3::NEG_Z),
            ))
            .id()
    }

    fn spawn_prop(app: &mut App, distance: f32, category: Option<InteractionCategory>) -> Entity {
        let mut prop = app.world_mut().spawn((
            GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -distance)),
            ProbeCollider::new(5.0),
        ));
        if let Some(category) = category {
            prop.insert(Interactable::new(category));
        }
        prop.id()
    }

    fn press(app: &mut App, character: Entity) {
        app.world_mut().write_message(InteractStart { character });
        app.update();
    }

    #[test]
    fn press_grabs_then_second_press_drops() {
        let mut app = test_app();
        let character = spawn_character(&mut app);
        let ball = spawn_prop(&mut app, 50.0, Some(InteractionCategory::Grab));

        press(&mut app, character);
        let state = app
            .world()
            .get::<CharacterInteractionState>(character)
            .expect("character state");
        assert_eq!(state.hold(), HoldState::Holding(ball));
        assert_eq!(app.world().resource::<Messages<ObjectGrabbed>>().len(), 1);

        press(&mut app, character);
        let state = app
            .world()
            .get::<CharacterInteractionState>(character)
            .expect("character state");
        assert_eq!(state.hold(), HoldState::Empty);
        assert_eq!(app.world().resource::<Messages<ObjectDropped>>().len(), 1);

        let telemetry = app.world().resource::<InteractionTelemetry>();
        assert_eq!(telemetry.len(), 2);
        assert_eq!(
            telemetry.latest().map(|record| record.outcome),
            Some(InteractionOutcome::Dropped { target: ball })
        );
    }

    #[test]
    fn stateless_prop_emits_one_effect_message() {
        let mut app = test_app();
        let character = spawn_character(&mut app);
        let crate_prop = spawn_prop(&mut app, 50.0, Some(InteractionCategory::Push));

        press(&mut app, character);

        let messages = app.world().resource::<Messages<InteractionEffect>>();
        assert_eq!(messages.len(), 1);
        let state = app
            .world()
            .get::<CharacterInteractionState>(character)
            .expect("character state");
        assert_eq!(state.held_object(), None);
        assert_eq!(
            app.world()
                .resource::<InteractionTelemetry>()
                .latest()
                .map(|record| record.outcome),
            Some(InteractionOutcome::Applied {
                category: InteractionCategory::Push,
                target: crate_prop,
            })
        );
    }

    #[test]
    fn out_of_range_press_changes_nothing() {
        let mut app = test_app();
        let character = spawn_character(&mut app);
        spawn_prop(&mut app, 150.0, Some(InteractionCategory::Grab));

        press(&mut app, character);

        assert_eq!(app.world().resource::<Messages<ObjectGrabbed>>().len(), 0);
        assert_eq!(app.world().resource::<Messages<InteractionEffect>>().len(), 0);
        let state = app
            .world()
            .get::<CharacterInteractionState>(character)
            .expect("character state");
        assert_eq!(state.hold(), HoldState::Empty);
    }

    #[test]
    fn presses_from_non_interactors_are_skipped() {
        let mut app = test_app();
        let bystander = app.world_mut().spawn(GlobalTransform::IDENTITY).id();
        spawn_prop(&mut app, 20.0, Some(InteractionCategory::Sniff));

        press(&mut app, bystander);

        assert!(app.world().resource::<InteractionTelemetry>().latest().is_none());
    }

    #[test]
    fn snapshot_liveness_follows_the_world_not_the_collider() {
        let mut world = World::new();
        let collider = world
            .spawn((GlobalTransform::IDENTITY, ProbeCollider::new(1.0)))
            .id();
        let bare = world.spawn_empty().id();
        let gone = world.spawn_empty().id();
        world.despawn(gone);

        let mut bodies = world.query::<(
            Entity,
            &GlobalTransform,
            &ProbeCollider,
            Option<&Interactable>,
        )>();
        let mut entities = world.query::<Entity>();
        let snapshot = SceneSnapshot::capture(bodies.iter(&world), entities.iter(&world));

        assert!(snapshot.is_alive(collider));
        assert!(snapshot.is_alive(bare));
        assert!(!snapshot.is_alive(gone));
    }

    #[test]
    fn held_object_without_collider_still_drops() {
        let mut app = test_app();
        let character = spawn_character(&mut app);
        let ball = spawn_prop(&mut app, 50.0, Some(InteractionCategory::Grab));

        press(&mut app, character);
        app.world_mut().entity_mut(ball).remove::<ProbeCollider>();
        press(&mut app, character);

        let state = app
            .world()
            .get::<CharacterInteractionState>(character)
            .expect("character state");
        assert_eq!(state.hold(), HoldState::Empty);
        assert_eq!(app.world().resource::<Messages<ObjectDropped>>().len(), 1);
        assert!(app.world().get_entity(ball).is_ok());
    }

    #[test]
    fn despawned_held_object_empties_the_hand_without_drop_message() {
        let mut app = test_app();
        let character = spawn_character(&mut app);
        let ball = spawn_prop(&mut app, 50.0, Some(InteractionCategory::Grab));

        press(&mut app, character);
        app.world_mut().despawn(ball);
        press(&mut app, character);

        let state = app
            .world()
            .get::<CharacterInteractionState>(character)
            .expect("character state");
        assert_eq!(state.hold(), HoldState::Empty);
        assert_eq!(app.world().resource::<Messages<ObjectDropped>>().len(), 0);
        assert_eq!(
            app.world()
                .resource::<InteractionTelemetry>()
                .latest()
                .map(|record| record.outcome),
            Some(InteractionOutcome::Dropped { target: ball })
        );
    }
}
