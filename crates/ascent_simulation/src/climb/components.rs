//! WallClimb: лазание по стенам со stamina и climb jump зарядами
//!
//! Порядок за frame (frame_update):
//! 1. refresh_resources: ground / новая стена пополняют stamina и заряды
//! 2. state machine: engage / exit window / release
//! 3. climb jump trigger: независим от climbing
//! 4. climb movement: vertical velocity = climb_speed, stamina тикает

use bevy::prelude::*;

use super::events::ReleaseReason;
use super::wall::{is_new_wall, GrippedWall};
use crate::config::ClimbConfig;
use crate::physics::{Body, WallContact};
use crate::timer::Countdown;

/// Read-only snapshot для LocomotionController
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClimbStatus {
    pub climbing: bool,
    /// Exit window после climb jump: locomotion силы подавлены
    pub exiting_wall: bool,
}

/// Что видит WallClimb в этом frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimbFrame {
    pub contact: Option<WallContact>,
    pub grounded: bool,
    pub forward_held: bool,
    pub climb_jump_pressed: bool,
}

/// Переходы за frame (система превращает их в events)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimbTransition {
    Engaged { wall: Entity },
    Released(ReleaseReason),
    JumpFired { charges_left: u32 },
    ExitWindowClosed,
}

/// Wall climb state
///
/// Инварианты:
/// - stamina тикает только пока climbing
/// - на земле stamina = max и заряды = max
/// - заряды уменьшаются только climb jump'ом и не уходят ниже 0
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WallClimb {
    climbing: bool,
    stamina: Countdown,
    exit_window: Countdown,
    charges_left: u32,
    gripped: Option<GrippedWall>,
}

impl Default for WallClimb {
    fn default() -> Self {
        Self::new(&ClimbConfig::default())
    }
}

impl WallClimb {
    pub fn new(config: &ClimbConfig) -> Self {
        Self {
            climbing: false,
            stamina: Countdown::new(config.max_climb_time),
            exit_window: Countdown::default(),
            charges_left: config.climb_jumps,
            gripped: None,
        }
    }

    pub fn status(&self) -> ClimbStatus {
        ClimbStatus {
            climbing: self.climbing,
            exiting_wall: self.is_exiting_wall(),
        }
    }

    pub fn is_climbing(&self) -> bool {
        self.climbing
    }

    pub fn is_exiting_wall(&self) -> bool {
        self.exit_window.is_running()
    }

    pub fn stamina_remaining(&self) -> f32 {
        self.stamina.remaining()
    }

    pub fn charges_left(&self) -> u32 {
        self.charges_left
    }

    pub fn gripped(&self) -> Option<&GrippedWall> {
        self.gripped.as_ref()
    }

    /// Ground → полная stamina и заряды.
    /// В воздухе без стены или у новой стены → заряды = max, stamina = max / 2.
    pub fn refresh_resources(&mut self, contact: Option<&WallContact>, grounded: bool, config: &ClimbConfig) {
        if grounded {
            self.stamina.start(config.max_climb_time);
            self.charges_left = config.climb_jumps;
            return;
        }

        let fresh_attempt = match contact {
            None => true,
            Some(contact) => {
                is_new_wall(contact, self.gripped.as_ref(), config.min_wall_normal_angle_change)
            }
        };

        if fresh_attempt {
            self.charges_left = config.climb_jumps;
            // Половина, не полный refill
            self.stamina.start(config.max_climb_time / 2.0);
        }
    }

    pub fn frame_update(
        &mut self,
        frame: &ClimbFrame,
        delta: f32,
        config: &ClimbConfig,
        body: &mut impl Body,
    ) -> Vec<ClimbTransition> {
        let mut transitions = Vec::new();

        self.refresh_resources(frame.contact.as_ref(), frame.grounded, config);

        let engage_contact = frame
            .contact
            .filter(|contact| contact.look_angle < config.max_wall_look_angle)
            .filter(|_| frame.forward_held && !self.is_exiting_wall());

        if let Some(contact) = engage_contact {
            if !self.climbing && self.stamina.is_running() {
                self.start_climbing(&contact, config);
                transitions.push(ClimbTransition::Engaged { wall: contact.wall });
            }
        } else if self.is_exiting_wall() {
            if self.climbing {
                self.stop_climbing(ReleaseReason::ClimbJump, &mut transitions);
            }
            if self.exit_window.tick(delta) {
                transitions.push(ClimbTransition::ExitWindowClosed);
            }
        } else if self.climbing {
            self.stop_climbing(ReleaseReason::ConditionLost, &mut transitions);
        }

        if let Some(contact) = frame.contact {
            if frame.climb_jump_pressed && self.charges_left > 0 {
                self.climb_jump(&contact, config, body, &mut transitions);
            }
        }

        if self.climbing && !self.is_exiting_wall() {
            self.climbing_movement(delta, config, body, &mut transitions);
        }

        transitions
    }

    fn start_climbing(&mut self, contact: &WallContact, config: &ClimbConfig) {
        self.climbing = true;
        self.stamina.start(config.max_climb_time);
        self.gripped = Some(GrippedWall::from(contact));
    }

    fn stop_climbing(&mut self, reason: ReleaseReason, transitions: &mut Vec<ClimbTransition>) {
        if self.climbing {
            self.climbing = false;
            transitions.push(ClimbTransition::Released(reason));
        }
    }

    // Horizontal velocity не трогаем
    fn climbing_movement(
        &mut self,
        delta: f32,
        config: &ClimbConfig,
        body: &mut impl Body,
        transitions: &mut Vec<ClimbTransition>,
    ) {
        let velocity = body.linear_velocity();
        body.set_linear_velocity(Vec3::new(velocity.x, config.climb_speed, velocity.z));

        if self.stamina.tick(delta) {
            self.stop_climbing(ReleaseReason::StaminaDepleted, transitions);
        }
    }

    fn climb_jump(
        &mut self,
        contact: &WallContact,
        config: &ClimbConfig,
        body: &mut impl Body,
        transitions: &mut Vec<ClimbTransition>,
    ) {
        self.exit_window.start(config.exit_wall_time);

        let launch = body.up() * config.climb_jump_up_force + contact.normal * config.climb_jump_back_force;
        let velocity = body.linear_velocity();
        body.set_linear_velocity(Vec3::new(velocity.x, 0.0, velocity.z));
        body.apply_impulse(launch);

        self.charges_left = self.charges_left.saturating_sub(1);
        transitions.push(ClimbTransition::JumpFired {
            charges_left: self.charges_left,
        });

        self.stop_climbing(ReleaseReason::ClimbJump, transitions);
    }
}
