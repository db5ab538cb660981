//! Bounded forward ray query that picks the nearest body in front of a character.
use bevy::{
    math::bounding::{BoundingSphere, RayCast3d},
    prelude::*,
};

use super::{components::InteractionCategory, errors::InteractionError};

const UNIT_LENGTH_TOLERANCE: f32 = 1.0e-3;

/// Body the probe can intersect, copied out of the world at query time.
#[derive(Debug, Clone, Copy)]
pub struct ProbeBody {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub category: Option<InteractionCategory>,
}

/// First body intersected by the probe ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Entity,
    pub distance: f32,
    pub category: Option<InteractionCategory>,
}

/// Casts a ray from `origin` along `direction` for at most `max_range` units and returns the
/// nearest body whose bounding sphere it enters. Ties keep the earlier body.
pub fn probe<'a>(
    bodies: impl IntoIterator<Item = &'a ProbeBody>,
    origin: Vec3,
    direction: Vec3,
    max_range: f32,
) -> Result<Option<ProbeHit>, InteractionError> {
    let direction = validate_direction(direction)?;
    if !max_range.is_finite() || max_range <= 0.0 {
        return Err(InteractionError::invalid_range(max_range));
    }

    let ray = RayCast3d::from_ray(Ray3d::new(origin, direction), max_range);

    let mut nearest: Option<ProbeHit> = None;
    for body in bodies {
        let sphere = BoundingSphere::new(body.center, body.radius);
        let Some(distance) = ray.sphere_intersection_at(&sphere) else {
            continue;
        };
        if nearest.is_some_and(|best| best.distance <= distance) {
            continue;
        }
        nearest = Some(ProbeHit {
            entity: body.entity,
            distance,
            category: body.category,
        });
    }

    Ok(nearest)
}

fn validate_direction(direction: Vec3) -> Result<Dir3, InteractionError> {
    if !direction.is_finite() || (direction.length() - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
        return Err(InteractionError::invalid_direction(direction));
    }
    Dir3::new(direction).map_err(|_| InteractionError::invalid_direction(direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(
        world: &mut World,
        x: f32,
        radius: f32,
        category: Option<InteractionCategory>,
    ) -> ProbeBody {
        ProbeBody {
            entity: world.spawn_empty().id(),
            center: Vec3::new(x, 0.0, 0.0),
            radius,
            category,
        }
    }

    #[test]
    fn returns_nearest_body_along_ray() {
        let mut world = World::new();
        let far = body(&mut world, 80.0, 5.0, Some(InteractionCategory::Push));
        let near = body(&mut world, 40.0, 5.0, Some(InteractionCategory::Grab));
        let bodies = [far, near];

        let hit = probe(&bodies, Vec3::ZERO, Vec3::X, 100.0)
            .expect("valid probe")
            .expect("should hit something");
        assert_eq!(hit.entity, near.entity);
        assert_eq!(hit.category, Some(InteractionCategory::Grab));
        assert!((hit.distance - 35.0).abs() < 1.0e-3);
    }

    #[test]
    fn ignores_bodies_beyond_range_or_behind() {
        let mut world = World::new();
        let bodies = [
            body(&mut world, 150.0, 5.0, Some(InteractionCategory::Grab)),
            body(&mut world, -30.0, 5.0, Some(InteractionCategory::Push)),
        ];

        let hit = probe(&bodies, Vec3::ZERO, Vec3::X, 100.0).expect("valid probe");
        assert!(hit.is_none());
    }

    #[test]
    fn uses_configured_range() {
        let mut world = World::new();
        let bodies = [body(&mut world, 150.0, 5.0, Some(InteractionCategory::Drink))];

        assert!(probe(&bodies, Vec3::ZERO, Vec3::X, 100.0)
            .expect("valid probe")
            .is_none());
        assert!(probe(&bodies, Vec3::ZERO, Vec3::X, 200.0)
            .expect("valid probe")
            .is_some());
    }

    #[test]
    fn obstacles_block_and_report_no_category() {
        let mut world = World::new();
        let wall = body(&mut world, 20.0, 5.0, None);
        let toy = body(&mut world, 60.0, 5.0, Some(InteractionCategory::Play));
        let bodies = [toy, wall];

        let hit = probe(&bodies, Vec3::ZERO, Vec3::X, 100.0)
            .expect("valid probe")
            .expect("wall should be hit");
        assert_eq!(hit.entity, wall.entity);
        assert_eq!(hit.category, None);
    }

    #[test]
    fn rejects_degenerate_direction_and_range() {
        let empty: [ProbeBody; 0] = [];
        assert!(matches!(
            probe(&empty, Vec3::ZERO, Vec3::ZERO, 100.0),
            Err(InteractionError::InvalidDirection { .. })
        ));
        assert!(matches!(
            probe(&empty, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 100.0),
            Err(InteractionError::InvalidDirection { .. })
        ));
        assert!(matches!(
            probe(&empty, Vec3::ZERO, Vec3::X, 0.0),
            Err(InteractionError::InvalidRange { .. })
        ));
    }
}
