//! Sensing: ground / slope / ceiling под персонажем и стена перед ним
//!
//! Результат пересчитывается каждый frame и хранится в sensor компонентах.
//! Отсутствие контакта: нормальный отрицательный результат, не ошибка.

use bevy::prelude::*;
use bevy_rapier3d::plugin::ReadRapierContext;

use super::world::{CastQuery, PhysicsWorld};
use crate::config::{ClimbConfig, LocomotionConfig};
use crate::input::Orientation;
use crate::physics::LayerMask;

/// Угол меньше этого считается ровным полом (шум нормалей от solver'а)
pub const SLOPE_EPSILON_DEG: f32 = 0.01;

/// Угол между векторами в градусах
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    a.angle_between(b).to_degrees()
}

/// Склон под ногами
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SlopeContact {
    pub normal: Vec3,
    /// Градусы от world up
    pub angle: f32,
}

impl SlopeContact {
    /// Проекция направления на плоскость склона (normalized, или ноль)
    pub fn project(&self, direction: Vec3) -> Vec3 {
        direction.reject_from_normalized(self.normal).normalize_or_zero()
    }
}

/// Ground contact snapshot этого frame
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundSensor {
    pub grounded: bool,
    /// `Some` только для walkable склона (0 < angle < max_slope_angle)
    pub slope: Option<SlopeContact>,
    /// Над головой препятствие: вставать нельзя
    pub ceiling_blocked: bool,
}

impl GroundSensor {
    pub fn on_slope(&self) -> bool {
        self.slope.is_some()
    }
}

/// Стена перед персонажем
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct WallContact {
    /// Identity стены (для "та же / новая стена")
    pub wall: Entity,
    pub normal: Vec3,
    pub distance: f32,
    /// Градусы между forward и -normal (0 = смотрим прямо в стену)
    pub look_angle: f32,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WallSensor {
    pub contact: Option<WallContact>,
}

/// Ground ray + slope ray + ceiling ray из центра тела
pub fn sense_ground(
    world: &impl PhysicsWorld,
    origin: Vec3,
    config: &LocomotionConfig,
    exclude: Option<Entity>,
) -> GroundSensor {
    let ground_query = CastQuery::new(config.ground_layers, exclude);
    let grounded = world
        .cast_ray(origin, Vec3::NEG_Y, config.ground_probe_distance(), &ground_query)
        .is_some();

    // Slope ray длиннее и без layer фильтра: как и ceiling
    let any_query = CastQuery::new(LayerMask::ALL, exclude);
    let slope = world
        .cast_ray(origin, Vec3::NEG_Y, config.slope_probe_distance(), &any_query)
        .and_then(|hit| {
            let angle = angle_deg(Vec3::Y, hit.normal);
            (angle > SLOPE_EPSILON_DEG && angle < config.max_slope_angle).then_some(SlopeContact {
                normal: hit.normal,
                angle,
            })
        });

    let ceiling_blocked = world
        .cast_ray(origin, Vec3::Y, config.ceiling_probe_distance(), &any_query)
        .is_some();

    GroundSensor {
        grounded,
        slope,
        ceiling_blocked,
    }
}

/// Sphere cast вперёд по orientation.forward, только wall layers
pub fn sense_wall(
    world: &impl PhysicsWorld,
    origin: Vec3,
    forward: Vec3,
    config: &ClimbConfig,
    exclude: Option<Entity>,
) -> WallSensor {
    let query = CastQuery::new(config.wall_layers, exclude);
    let contact = world
        .cast_sphere(
            origin,
            config.sphere_cast_radius,
            forward,
            config.detection_length,
            &query,
        )
        .map(|hit| WallContact {
            wall: hit.entity,
            normal: hit.normal,
            distance: hit.distance,
            look_angle: angle_deg(forward, -hit.normal),
        });

    WallSensor { contact }
}

/// Система: rapier ground sensing
pub fn sense_ground_rapier(
    rapier: ReadRapierContext,
    mut query: Query<(Entity, &Transform, &LocomotionConfig, &mut GroundSensor)>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };

    for (entity, transform, config, mut sensor) in query.iter_mut() {
        let sensed = sense_ground(&context, transform.translation, config, Some(entity));
        if *sensor != sensed {
            *sensor = sensed;
        }
    }
}

/// Система: rapier wall sensing
pub fn sense_wall_rapier(
    rapier: ReadRapierContext,
    mut query: Query<(Entity, &Transform, &Orientation, &ClimbConfig, &mut WallSensor)>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };

    for (entity, transform, orientation, config, mut sensor) in query.iter_mut() {
        let sensed = sense_wall(
            &context,
            transform.translation,
            orientation.forward(),
            config,
            Some(entity),
        );
        if *sensor != sensed {
            *sensor = sensed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::world::mock::MockWorld;

    #[test]
    fn test_flat_ground_is_not_slope() {
        let world = MockWorld::default().with_floor(1.0, Vec3::Y);
        let sensor = sense_ground(&world, Vec3::ZERO, &LocomotionConfig::default(), None);

        assert!(sensor.grounded);
        assert!(!sensor.on_slope());
        assert!(!sensor.ceiling_blocked);
    }

    #[test]
    fn test_walkable_slope_detected() {
        // 20° склон
        let normal = Quat::from_rotation_x(20f32.to_radians()) * Vec3::Y;
        let world = MockWorld::default().with_floor(1.05, normal);
        let sensor = sense_ground(&world, Vec3::ZERO, &LocomotionConfig::default(), None);

        let slope = sensor.slope.expect("20° is walkable");
        assert!((slope.angle - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_too_steep_is_not_slope() {
        let normal = Quat::from_rotation_x(60f32.to_radians()) * Vec3::Y;
        let world = MockWorld::default().with_floor(1.0, normal);
        let sensor = sense_ground(&world, Vec3::ZERO, &LocomotionConfig::default(), None);

        assert!(sensor.slope.is_none());
    }

    #[test]
    fn test_slope_ray_reaches_further_than_ground_ray() {
        // 1.25: за ground probe (1.2), но в пределах slope probe (1.3)
        let normal = Quat::from_rotation_x(10f32.to_radians()) * Vec3::Y;
        let world = MockWorld::default().with_floor(1.25, normal);
        let sensor = sense_ground(&world, Vec3::ZERO, &LocomotionConfig::default(), None);

        assert!(!sensor.grounded);
        assert!(sensor.on_slope());
    }

    #[test]
    fn test_ceiling_detected() {
        let world = MockWorld::default().with_floor(1.0, Vec3::Y).with_ceiling(0.8);
        let sensor = sense_ground(&world, Vec3::ZERO, &LocomotionConfig::default(), None);
        assert!(sensor.ceiling_blocked);

        let open = MockWorld::default().with_floor(1.0, Vec3::Y).with_ceiling(3.0);
        let sensor = sense_ground(&open, Vec3::ZERO, &LocomotionConfig::default(), None);
        assert!(!sensor.ceiling_blocked);
    }

    #[test]
    fn test_wall_look_angle() {
        let wall = Entity::from_raw(7);
        // Смотрим в -Z, стена перед нами с нормалью +Z, повернутой на 10°
        let normal = Quat::from_rotation_y(10f32.to_radians()) * Vec3::Z;
        let world = MockWorld::default().with_wall(wall, 0.4, normal);

        let sensor = sense_wall(&world, Vec3::ZERO, Vec3::NEG_Z, &ClimbConfig::default(), None);
        let contact = sensor.contact.expect("wall in range");

        assert_eq!(contact.wall, wall);
        assert!((contact.look_angle - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_wall_out_of_range() {
        let world = MockWorld::default().with_wall(Entity::from_raw(7), 5.0, Vec3::Z);
        let sensor = sense_wall(&world, Vec3::ZERO, Vec3::NEG_Z, &ClimbConfig::default(), None);
        assert!(sensor.contact.is_none());
    }

    #[test]
    fn test_slope_projection_stays_on_plane() {
        let normal = Quat::from_rotation_x(30f32.to_radians()) * Vec3::Y;
        let slope = SlopeContact { normal, angle: 30.0 };

        let projected = slope.project(Vec3::NEG_Z);
        assert!(projected.dot(normal).abs() < 1e-5);
        assert!((projected.length() - 1.0).abs() < 1e-5);
        assert_eq!(slope.project(Vec3::ZERO), Vec3::ZERO);
    }
}
