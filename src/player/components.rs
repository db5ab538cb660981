//! Components for the player-controlled cat and its follow camera.
use bevy::prelude::*;

/// Marker component identifying the player character.
#[derive(Component, Debug)]
pub struct Player;

/// Ground movement tuning for a character.
#[derive(Component, Debug, Clone, Copy)]
pub struct Locomotion {
    pub walk_speed: f32,
    /// Radians per second the body turns towards its movement direction.
    pub turn_rate: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            walk_speed: 500.0,
            turn_rate: 8.7,
        }
    }
}

/// Orbiting camera boom that trails a character.
#[derive(Component, Debug)]
pub struct FollowCamera {
    pub target: Entity,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub look_sensitivity: f32,
}

impl FollowCamera {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            yaw: 0.0,
            pitch: -0.35,
            distance: 400.0,
            look_sensitivity: 0.2,
        }
    }

    pub fn rotation(&self) -> Quat {
        (Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch))
            .normalize()
    }

    /// Forward direction flattened onto the ground plane.
    pub fn planar_forward(&self) -> Vec3 {
        let forward = self.rotation() * Vec3::NEG_Z;
        Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_forward_ignores_pitch() {
        let mut world = World::new();
        let mut camera = FollowCamera::new(world.spawn_empty().id());
        camera.pitch = -1.2;

        let forward = camera.planar_forward();
        assert!(forward.y.abs() < 1.0e-6);
        assert!((forward - Vec3::NEG_Z).length() < 1.0e-5);
    }
}
