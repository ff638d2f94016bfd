//! Locomotion domain: LocomotionController
//!
//! ECS ответственность:
//! - LocomotionController: режим движения, скорость, прыжок, присед/слайд
//! - Events: LocomotionStateChanged, SlideStarted, SlideEnded, Jumped
//!
//! Два темпа:
//! - Update: sensing результат → state machine, таймеры, extent
//! - FixedUpdate: только силы (apply_locomotion_forces)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod forces;
pub mod stance;
pub mod state;
pub mod systems;


// Re-export основных типов
pub use components::{LocomotionController, LocomotionFrame, LocomotionTransition};
pub use events::{Jumped, LocomotionStateChanged, SlideEndReason, SlideEnded, SlideStarted};
pub use forces::{movement_force, speed_control, ForceContext};
pub use stance::{Extent, SlideSession, Stance, StanceStep, StanceTrigger};
pub use state::{LocomotionState, StateConditions};
pub use systems::{apply_locomotion_forces, update_locomotion};

use crate::LocomotionSet;

/// Locomotion Plugin
///
/// Порядок:
/// 1. update_locomotion: Update, после ClimbPlugin (свежий ClimbStatus)
/// 2. apply_locomotion_forces: FixedUpdate
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LocomotionController>();

        app.add_event::<LocomotionStateChanged>()
            .add_event::<SlideStarted>()
            .add_event::<SlideEnded>()
            .add_event::<Jumped>();

        app.add_systems(Update, update_locomotion.in_set(LocomotionSet::Locomotion))
            .add_systems(
                FixedUpdate,
                apply_locomotion_forces.in_set(LocomotionSet::Forces),
            );
    }
}
