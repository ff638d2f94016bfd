//! Physics boundary module
//!
//! Физический движок: внешний: отсюда контроллер видит только cast запросы
//! (`PhysicsWorld`), rigid body (`Body`) и sensor компоненты.
//! Production backend: bevy_rapier3d.

use bevy::prelude::*;

pub mod body;
pub mod layers;
pub mod sensing;
pub mod world;

// Re-export основных типов
pub use body::{Body, RapierBody, RapierBodyQuery};
pub use layers::{character_groups, ground_groups, wall_groups, LayerMask};
pub use sensing::{
    angle_deg, sense_ground, sense_wall, GroundSensor, SlopeContact, WallContact, WallSensor,
};
pub use world::{CastHit, CastQuery, PhysicsWorld};

use crate::LocomotionSet;

/// Rapier sensing Plugin
///
/// Пишет `GroundSensor` и `WallSensor` из rapier ray/shape casts.
/// Headless тесты этот plugin НЕ добавляют: сенсоры пишет сам тест.
pub struct RapierSensingPlugin;

impl Plugin for RapierSensingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sensing::sense_wall_rapier, sensing::sense_ground_rapier).in_set(LocomotionSet::Sense),
        );
    }
}
