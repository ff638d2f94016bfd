//! Locomotion systems

use bevy::prelude::*;

use super::components::{LocomotionController, LocomotionFrame, LocomotionTransition};
use super::events::{Jumped, LocomotionStateChanged, SlideEnded, SlideStarted};
use crate::climb::WallClimb;
use crate::config::LocomotionConfig;
use crate::input::{LocomotionInput, Orientation};
use crate::physics::{GroundSensor, RapierBodyQuery};

/// Система: frame tick контроллера (Update, LocomotionSet::Locomotion)
///
/// WallClimb опционален: без него персонаж просто никогда не лезет.
pub fn update_locomotion(
    mut query: Query<(
        Entity,
        &mut LocomotionController,
        &LocomotionConfig,
        &GroundSensor,
        &LocomotionInput,
        &Orientation,
        Option<&WallClimb>,
        RapierBodyQuery,
    )>,
    time: Res<Time>,
    mut state_events: EventWriter<LocomotionStateChanged>,
    mut slide_started_events: EventWriter<SlideStarted>,
    mut slide_ended_events: EventWriter<SlideEnded>,
    mut jump_events: EventWriter<Jumped>,
) {
    let delta = time.delta_secs();

    for (entity, mut controller, config, ground, input, orientation, climb, mut body_query) in
        query.iter_mut()
    {
        let frame = LocomotionFrame {
            ground: *ground,
            input: *input,
            climb: climb.map(WallClimb::status).unwrap_or_default(),
            orientation: *orientation,
        };

        let mut body = body_query.body();
        let transitions = controller.frame_update(&frame, delta, config, &mut body);

        for transition in transitions {
            match transition {
                LocomotionTransition::StateChanged { from, to } => {
                    crate::log(&format!("{:?} locomotion {:?} → {:?}", entity, from, to));
                    state_events.write(LocomotionStateChanged { entity, from, to });
                }
                LocomotionTransition::SlideStarted => {
                    crate::log(&format!("{:?} slide started", entity));
                    slide_started_events.write(SlideStarted { entity });
                }
                LocomotionTransition::SlideEnded(reason) => {
                    crate::log(&format!("{:?} slide ended ({:?})", entity, reason));
                    slide_ended_events.write(SlideEnded { entity, reason });
                }
                LocomotionTransition::Jumped => {
                    crate::log(&format!("{:?} jumped", entity));
                    jump_events.write(Jumped { entity });
                }
            }
        }
    }
}

/// Система: movement forces (FixedUpdate, LocomotionSet::Forces)
pub fn apply_locomotion_forces(
    mut query: Query<(
        &LocomotionController,
        &LocomotionConfig,
        Option<&WallClimb>,
        RapierBodyQuery,
    )>,
) {
    for (controller, config, climb, mut body_query) in query.iter_mut() {
        let status = climb.map(WallClimb::status).unwrap_or_default();
        controller.apply_forces(status, config, &mut body_query.body());
    }
}
