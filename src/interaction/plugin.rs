//! Interaction plugin wiring the targeting core, its messages, and telemetry.
use bevy::prelude::*;

use super::{
    config::InteractionSettings,
    events::{InteractStart, InteractStop, InteractionEffect, ObjectDropped, ObjectGrabbed},
    systems::{dispatch_interact_requests, log_interact_releases},
    telemetry::{flush_interaction_telemetry_log, InteractionTelemetry, InteractionTelemetryLog},
};

/// Ordering label for systems that consume the dispatcher's output messages.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionDispatchSet;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = InteractionSettings::load_or_default();
        info!(
            "Interaction configured: range {:.1}, telemetry -> {}",
            settings.max_range, settings.telemetry_log_path
        );

        app.insert_resource(InteractionTelemetry::new(settings.telemetry_capacity))
            .insert_resource(InteractionTelemetryLog::new(
                settings.telemetry_log_path.clone(),
            ))
            .insert_resource(settings)
            .add_message::<InteractStart>()
            .add_message::<InteractStop>()
            .add_message::<InteractionEffect>()
            .add_message::<ObjectGrabbed>()
            .add_message::<ObjectDropped>()
            .add_systems(
                Update,
                (
                    (dispatch_interact_requests, log_interact_releases)
                        .in_set(InteractionDispatchSet),
                    flush_interaction_telemetry_log.after(InteractionDispatchSet),
                ),
            );

        #[cfg(feature = "probe_debug")]
        {
            app.add_systems(Update, super::systems::draw_probe_rays);
        }
    }
}
