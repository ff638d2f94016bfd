//! Wall climb systems

use bevy::prelude::*;

use super::components::{ClimbFrame, ClimbTransition, WallClimb};
use super::events::{ClimbEngaged, ClimbJumpFired, ClimbReleased};
use crate::config::ClimbConfig;
use crate::input::LocomotionInput;
use crate::physics::{GroundSensor, RapierBodyQuery, WallSensor};

/// Система: WallClimb state machine (Update, LocomotionSet::Climb)
///
/// Работает ДО locomotion: LocomotionController в этом же frame
/// видит свежий ClimbStatus.
pub fn update_wall_climb(
    mut query: Query<(
        Entity,
        &mut WallClimb,
        &ClimbConfig,
        &WallSensor,
        &GroundSensor,
        &LocomotionInput,
        RapierBodyQuery,
    )>,
    time: Res<Time>,
    mut engaged_events: EventWriter<ClimbEngaged>,
    mut released_events: EventWriter<ClimbReleased>,
    mut jump_events: EventWriter<ClimbJumpFired>,
) {
    let delta = time.delta_secs();

    for (entity, mut climb, config, wall, ground, input, mut body_query) in query.iter_mut() {
        let frame = ClimbFrame {
            contact: wall.contact,
            grounded: ground.grounded,
            forward_held: input.forward > 0.0,
            climb_jump_pressed: input.climb_jump.pressed,
        };

        let mut body = body_query.body();
        let transitions = climb.frame_update(&frame, delta, config, &mut body);

        for transition in transitions {
            match transition {
                ClimbTransition::Engaged { wall } => {
                    crate::log(&format!("{:?} engaged wall {:?}", entity, wall));
                    engaged_events.write(ClimbEngaged { entity, wall });
                }
                ClimbTransition::Released(reason) => {
                    crate::log(&format!("{:?} released wall ({:?})", entity, reason));
                    released_events.write(ClimbReleased { entity, reason });
                }
                ClimbTransition::JumpFired { charges_left } => {
                    crate::log(&format!(
                        "{:?} climb jump (charges left: {})",
                        entity, charges_left
                    ));
                    jump_events.write(ClimbJumpFired {
                        entity,
                        charges_left,
                    });
                }
                ClimbTransition::ExitWindowClosed => {
                    crate::log(&format!("{:?} exit window closed", entity));
                }
            }
        }
    }
}
