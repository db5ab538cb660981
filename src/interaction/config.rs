use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    probe: RawProbe,
    #[serde(default)]
    hold: RawHold,
    #[serde(default)]
    telemetry: RawTelemetry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawProbe {
    max_range: f32,
    default_collider_radius: f32,
}

impl Default for RawProbe {
    fn default() -> Self {
        Self {
            max_range: 100.0,
            default_collider_radius: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHold {
    carry_offset: [f32; 3],
    drop_distance: f32,
}

impl Default for RawHold {
    fn default() -> Self {
        Self {
            carry_offset: [0.0, 40.0, -60.0],
            drop_distance: 80.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTelemetry {
    capacity: usize,
    log_path: String,
}

impl Default for RawTelemetry {
    fn default() -> Self {
        Self {
            capacity: 64,
            log_path: "logs/interaction_history.jsonl".to_string(),
        }
    }
}

/// Runtime configuration derived from `config/interaction.toml`.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub max_range: f32,
    pub default_collider_radius: f32,
    /// Local offset of a held object relative to the character carrying it.
    pub carry_offset: Vec3,
    pub drop_distance: f32,
    pub telemetry_capacity: usize,
    pub telemetry_log_path: String,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawInteractionConfig>(raw).map(Self::from)
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let defaults = RawProbe::default();

        let max_range = if value.probe.max_range.is_finite() && value.probe.max_range > 0.0 {
            value.probe.max_range
        } else {
            defaults.max_range
        };
        let default_collider_radius = if value.probe.default_collider_radius > 0.0 {
            value.probe.default_collider_radius
        } else {
            defaults.default_collider_radius
        };

        let [x, y, z] = value.hold.carry_offset;
        let telemetry_log_path = value.telemetry.log_path.trim().to_string();

        Self {
            max_range,
            default_collider_radius,
            carry_offset: Vec3::new(x, y, z),
            drop_distance: value.hold.drop_distance.max(0.0),
            telemetry_capacity: value.telemetry.capacity.max(1),
            telemetry_log_path: if telemetry_log_path.is_empty() {
                RawTelemetry::default().log_path
            } else {
                telemetry_log_path
            },
        }
    }
}
