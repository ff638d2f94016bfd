//! PhysicsWorld: граница с физическим движком
//!
//! Контроллер знает только про ray cast и sphere cast.
//! Production реализация: `RapierContext` (bevy_rapier3d), в тестах: `MockWorld`.

use bevy::prelude::*;
use bevy_rapier3d::plugin::RapierContext;
use bevy_rapier3d::prelude::{Collider, QueryFilter, ShapeCastOptions};

use super::layers::LayerMask;

/// Результат ray/shape cast
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CastHit {
    /// Во что попали (identity объекта)
    pub entity: Entity,
    /// Нормаль поверхности в точке попадания (world space, unit)
    pub normal: Vec3,
    /// Дистанция от origin до попадания
    pub distance: f32,
}

/// Фильтр для cast запросов
#[derive(Debug, Clone, Copy, Default)]
pub struct CastQuery {
    pub layers: LayerMask,
    /// Обычно: собственное тело персонажа
    pub exclude: Option<Entity>,
}

impl CastQuery {
    pub fn new(layers: LayerMask, exclude: Option<Entity>) -> Self {
        Self { layers, exclude }
    }
}

pub trait PhysicsWorld {
    /// Луч из `origin` вдоль `direction` (unit) не дальше `max_distance`
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        query: &CastQuery,
    ) -> Option<CastHit>;

    /// Sweep сферы радиуса `radius` из `origin` вдоль `direction` (unit)
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        query: &CastQuery,
    ) -> Option<CastHit>;
}

fn rapier_filter(query: &CastQuery) -> QueryFilter<'static> {
    let filter = QueryFilter::new()
        .exclude_sensors()
        .groups(query.layers.query_groups());

    match query.exclude {
        Some(entity) => filter.exclude_rigid_body(entity),
        None => filter,
    }
}

impl PhysicsWorld for RapierContext<'_> {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        query: &CastQuery,
    ) -> Option<CastHit> {
        let (entity, hit) = self.cast_ray_and_get_normal(
            origin,
            direction,
            max_distance,
            true,
            rapier_filter(query),
        )?;

        Some(CastHit {
            entity,
            normal: hit.normal,
            distance: hit.time_of_impact,
        })
    }

    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        query: &CastQuery,
    ) -> Option<CastHit> {
        let sphere = Collider::ball(radius);
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };

        // direction unit → time_of_impact == дистанция
        let (entity, hit) = self.cast_shape(
            origin,
            Quat::IDENTITY,
            direction,
            &*sphere.raw,
            options,
            rapier_filter(query),
        )?;

        // normal1: внешняя нормаль collider'а, в который попали (стены)
        let normal = hit
            .details
            .map(|details| details.normal1)
            .unwrap_or(-direction);

        Some(CastHit {
            entity,
            normal,
            distance: hit.time_of_impact,
        })
    }
}

/// Тестовый мир: одна поверхность на направление (вниз / вверх / вперёд)
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::physics::layers::{COLLISION_LAYER_GROUND, COLLISION_LAYER_WALL};

    #[derive(Debug, Clone, Copy)]
    pub struct MockSurface {
        pub entity: Entity,
        pub normal: Vec3,
        pub distance: f32,
        pub layer: u32,
    }

    #[derive(Debug, Clone, Default)]
    pub struct MockWorld {
        pub below: Option<MockSurface>,
        pub above: Option<MockSurface>,
        pub ahead: Option<MockSurface>,
    }

    impl MockWorld {
        /// Ровный пол на `distance` под origin
        pub fn with_floor(mut self, distance: f32, normal: Vec3) -> Self {
            self.below = Some(MockSurface {
                entity: Entity::from_raw(1),
                normal: normal.normalize(),
                distance,
                layer: COLLISION_LAYER_GROUND,
            });
            self
        }

        pub fn with_ceiling(mut self, distance: f32) -> Self {
            self.above = Some(MockSurface {
                entity: Entity::from_raw(2),
                normal: Vec3::NEG_Y,
                distance,
                layer: COLLISION_LAYER_GROUND,
            });
            self
        }

        pub fn with_wall(mut self, entity: Entity, distance: f32, normal: Vec3) -> Self {
            self.ahead = Some(MockSurface {
                entity,
                normal: normal.normalize(),
                distance,
                layer: COLLISION_LAYER_WALL,
            });
            self
        }

        fn pick(&self, direction: Vec3) -> Option<&MockSurface> {
            if direction.y < -0.5 {
                self.below.as_ref()
            } else if direction.y > 0.5 {
                self.above.as_ref()
            } else {
                self.ahead.as_ref()
            }
        }

        fn hit(&self, direction: Vec3, reach: f32, query: &CastQuery) -> Option<CastHit> {
            let surface = self.pick(direction)?;
            if !query.layers.contains(surface.layer) || surface.distance > reach {
                return None;
            }
            if query.exclude == Some(surface.entity) {
                return None;
            }

            Some(CastHit {
                entity: surface.entity,
                normal: surface.normal,
                distance: surface.distance,
            })
        }
    }

    impl PhysicsWorld for MockWorld {
        fn cast_ray(
            &self,
            _origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            query: &CastQuery,
        ) -> Option<CastHit> {
            self.hit(direction, max_distance, query)
        }

        fn cast_sphere(
            &self,
            _origin: Vec3,
            radius: f32,
            direction: Vec3,
            max_distance: f32,
            query: &CastQuery,
        ) -> Option<CastHit> {
            self.hit(direction, max_distance + radius, query)
        }
    }
}
