//! Climb domain: лазание по стенам
//!
//! ECS ответственность:
//! - WallClimb: climbing state, stamina, climb jump заряды, exit window
//! - Events: ClimbEngaged, ClimbReleased, ClimbJumpFired
//!
//! Locomotion читает только `WallClimb::status()` (ClimbStatus snapshot),
//! обратной записи из locomotion в climb нет.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;
pub mod wall;


// Re-export основных типов
pub use components::{ClimbFrame, ClimbStatus, ClimbTransition, WallClimb};
pub use events::{ClimbEngaged, ClimbJumpFired, ClimbReleased, ReleaseReason};
pub use systems::update_wall_climb;
pub use wall::{is_new_wall, GrippedWall};

use crate::LocomotionSet;

/// Climb Plugin
///
/// update_wall_climb в Update (LocomotionSet::Climb), после sensing
/// и до locomotion frame update.
pub struct ClimbPlugin;

impl Plugin for ClimbPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<WallClimb>();

        app.add_event::<ClimbEngaged>()
            .add_event::<ClimbReleased>()
            .add_event::<ClimbJumpFired>();

        app.add_systems(Update, update_wall_climb.in_set(LocomotionSet::Climb));
    }
}
