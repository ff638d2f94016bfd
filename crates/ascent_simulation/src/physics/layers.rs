//! Collision Layers Constants
//!
//! Rapier `CollisionGroups`: centralised константы для всего проекта.
//!
//! ## Архитектура:
//! - **Membership (битовая маска):** На каком слое находится объект
//! - **Filter (битовая маска):** С какими слоями объект коллидирует / что видит query
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Ground (пол, склоны, платформы)
//! - Layer 2 (0b10 = 2): Walls (поверхности, по которым можно лазить)
//! - Layer 3 (0b100 = 4): Characters (rigid body игрока)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};
use serde::{Deserialize, Serialize};

/// Layer 1: Ground
pub const COLLISION_LAYER_GROUND: u32 = 0b1;

/// Layer 2: Climbable walls
pub const COLLISION_LAYER_WALL: u32 = 0b10;

/// Layer 3: Characters
pub const COLLISION_LAYER_CHARACTER: u32 = 0b100;

/// Битовая маска слоёв для raycast / shapecast фильтрации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(COLLISION_LAYER_GROUND);
    pub const WALL: Self = Self(COLLISION_LAYER_WALL);
    pub const CHARACTER: Self = Self(COLLISION_LAYER_CHARACTER);
    pub const ALL: Self = Self(u32::MAX);

    pub fn contains(self, layer: u32) -> bool {
        self.0 & layer != 0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Query filter: "любая membership, видим только слои маски"
    pub fn query_groups(self) -> CollisionGroups {
        CollisionGroups::new(Group::ALL, Group::from_bits_truncate(self.0))
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Groups для статической геометрии пола
pub fn ground_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_GROUND),
        Group::from_bits_truncate(COLLISION_LAYER_CHARACTER),
    )
}

/// Groups для стен (стена тоже пол для query с маской ALL: склоны на стенах бывают)
pub fn wall_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_WALL),
        Group::from_bits_truncate(COLLISION_LAYER_CHARACTER),
    )
}

/// Groups для персонажа: коллайдит с полом и стенами
pub fn character_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_CHARACTER),
        Group::from_bits_truncate(COLLISION_LAYER_GROUND | COLLISION_LAYER_WALL),
    )
}
