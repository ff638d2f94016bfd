//! LocomotionController: ходьба, бег, присед, слайд, прыжок, склоны
//!
//! Frame tick (Update): `frame_update`:
//! 1. jump cooldown tick (готовность прыжка, exiting_slope)
//! 2. input: jump → crouch down/up → slide start
//! 3. speed control (клампит результат сил прошлого step)
//! 4. state resolve (таблица приоритетов)
//! 5. recheck отложенного подъёма
//! 6. slide timer / momentum
//! 7. ground drag
//!
//! Physics tick (FixedUpdate): `apply_forces`.

use bevy::prelude::*;

use super::events::SlideEndReason;
use super::forces::{movement_force, speed_control, ForceContext};
use super::stance::{SlideSession, Stance, StanceTrigger};
use super::state::{LocomotionState, StateConditions};
use crate::climb::ClimbStatus;
use crate::config::LocomotionConfig;
use crate::input::{LocomotionInput, Orientation};
use crate::physics::{Body, GroundSensor, SlopeContact};
use crate::timer::Countdown;

/// Всё, что контроллер читает за frame (сам ничем из этого не владеет)
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionFrame {
    pub ground: GroundSensor,
    pub input: LocomotionInput,
    pub climb: ClimbStatus,
    pub orientation: Orientation,
}

/// Переходы за frame (система превращает их в events)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionTransition {
    StateChanged {
        from: LocomotionState,
        to: LocomotionState,
    },
    SlideStarted,
    SlideEnded(SlideEndReason),
    Jumped,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LocomotionController {
    state: LocomotionState,
    move_speed: f32,
    grounded: bool,
    slope: Option<SlopeContact>,
    sprinting: bool,
    ready_to_jump: bool,
    jump_cooldown: Countdown,
    /// Сразу после прыжка: slope логика не тянет тело обратно к склону
    exiting_slope: bool,
    stance: Stance,
    slide: Option<SlideSession>,
    move_direction: Vec3,
    standing_scale: f32,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(&LocomotionConfig::default(), 1.0)
    }
}

impl LocomotionController {
    /// `standing_scale`: Y scale тела стоя (то, к чему возвращаемся из приседа)
    pub fn new(config: &LocomotionConfig, standing_scale: f32) -> Self {
        Self {
            state: LocomotionState::Walking,
            move_speed: config.walk_speed,
            grounded: false,
            slope: None,
            sprinting: false,
            ready_to_jump: true,
            jump_cooldown: Countdown::default(),
            exiting_slope: false,
            stance: Stance::Standing,
            slide: None,
            move_direction: Vec3::ZERO,
            standing_scale,
        }
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn on_slope(&self) -> bool {
        self.slope.is_some()
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    /// Остаток таймера слайда (None: не скользим)
    pub fn slide_remaining(&self) -> Option<f32> {
        self.slide.map(|session| session.timer.remaining())
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_ready_to_jump(&self) -> bool {
        self.ready_to_jump
    }

    pub fn is_exiting_slope(&self) -> bool {
        self.exiting_slope
    }

    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    pub fn frame_update(
        &mut self,
        frame: &LocomotionFrame,
        delta: f32,
        config: &LocomotionConfig,
        body: &mut impl Body,
    ) -> Vec<LocomotionTransition> {
        let mut transitions = Vec::new();

        self.grounded = frame.ground.grounded;
        self.slope = frame.ground.slope;
        self.move_direction = frame
            .orientation
            .move_direction(frame.input.forward, frame.input.right);

        if self.jump_cooldown.tick(delta) {
            self.ready_to_jump = true;
            self.exiting_slope = false;
        }

        let slide_started = self.handle_input(frame, config, body, &mut transitions);

        let velocity = body.linear_velocity();
        let clamped = speed_control(velocity, self.move_speed, self.on_slope() && !self.exiting_slope);
        if clamped != velocity {
            body.set_linear_velocity(clamped);
        }

        self.resolve_state(frame, config, body.linear_velocity().y, &mut transitions);

        if self.stance.is_stand_pending() {
            self.apply_stance(StanceTrigger::Recheck, frame.ground.ceiling_blocked, config, body);
        }

        // Слайд, начатый в этом frame, тикает со следующего
        if !slide_started {
            self.update_slide(frame.ground.ceiling_blocked, delta, config, body, &mut transitions);
        }

        body.set_damping(if self.grounded { config.ground_drag } else { 0.0 });

        transitions
    }

    /// Возвращает true, если в этом frame начался слайд
    fn handle_input(
        &mut self,
        frame: &LocomotionFrame,
        config: &LocomotionConfig,
        body: &mut impl Body,
        transitions: &mut Vec<LocomotionTransition>,
    ) -> bool {
        let input = &frame.input;
        let ceiling_blocked = frame.ground.ceiling_blocked;

        if input.jump.held && self.ready_to_jump && self.grounded {
            self.jump(config, body);
            transitions.push(LocomotionTransition::Jumped);
        }

        if input.crouch.pressed {
            self.apply_stance(StanceTrigger::CrouchPressed, ceiling_blocked, config, body);
        }
        if input.crouch.released {
            self.apply_stance(StanceTrigger::CrouchReleased, ceiling_blocked, config, body);
        }

        let can_slide = input.crouch.pressed
            && self.grounded
            && self.sprinting
            && input.has_movement()
            && self.slide.is_none();

        if can_slide {
            self.slide = Some(SlideSession::new(config.max_slide_time));
            self.apply_stance(StanceTrigger::SlideStarted, ceiling_blocked, config, body);
            transitions.push(LocomotionTransition::SlideStarted);
        }

        can_slide
    }

    fn jump(&mut self, config: &LocomotionConfig, body: &mut impl Body) {
        self.ready_to_jump = false;
        self.exiting_slope = true;
        self.jump_cooldown.start(config.jump_cooldown);

        let velocity = body.linear_velocity();
        body.set_linear_velocity(Vec3::new(velocity.x, 0.0, velocity.z));
        let up = body.up();
        body.apply_impulse(up * config.jump_force);
    }

    fn resolve_state(
        &mut self,
        frame: &LocomotionFrame,
        config: &LocomotionConfig,
        vertical_velocity: f32,
        transitions: &mut Vec<LocomotionTransition>,
    ) {
        let conditions = StateConditions {
            climbing: frame.climb.climbing,
            sliding: self.slide.is_some(),
            crouch_held: frame.input.crouch.held,
            grounded: self.grounded,
            sprint_held: frame.input.sprint.held,
        };
        let next = LocomotionState::resolve(&conditions);

        let downhill = self.on_slope() && vertical_velocity < 0.1;
        self.move_speed = next.move_speed(config, self.move_speed, downhill);
        if let Some(sprinting) = next.entry_sprint_flag() {
            self.sprinting = sprinting;
        }

        if next != self.state {
            transitions.push(LocomotionTransition::StateChanged {
                from: self.state,
                to: next,
            });
            self.state = next;
        }
    }

    fn update_slide(
        &mut self,
        ceiling_blocked: bool,
        delta: f32,
        config: &LocomotionConfig,
        body: &mut impl Body,
        transitions: &mut Vec<LocomotionTransition>,
    ) {
        let Some(session) = self.slide.as_mut() else {
            return;
        };

        let expired = session.timer.tick(delta);
        let velocity = body.linear_velocity();
        let momentum = Vec3::new(velocity.x, 0.0, velocity.z).length();

        let reason = if expired {
            SlideEndReason::Expired
        } else if momentum < config.min_slide_momentum {
            SlideEndReason::MomentumLost
        } else {
            return;
        };

        self.slide = None;
        self.apply_stance(StanceTrigger::SlideEnded, ceiling_blocked, config, body);
        transitions.push(LocomotionTransition::SlideEnded(reason));
    }

    fn apply_stance(
        &mut self,
        trigger: StanceTrigger,
        ceiling_blocked: bool,
        config: &LocomotionConfig,
        body: &mut impl Body,
    ) {
        let Some(step) = self.stance.transition(trigger, ceiling_blocked) else {
            return;
        };

        self.stance = step.next;
        if let Some(extent) = step.extent {
            body.set_extent_scale(extent.scale(config, self.standing_scale));
        }
        if step.settle_impulse {
            body.apply_impulse(Vec3::NEG_Y * config.stance_impulse);
        }
    }

    /// Physics tick: сила движения + gravity toggle.
    ///
    /// Пока WallClimb в exit window: никаких сил (climb jump impulse не гасим).
    pub fn apply_forces(&self, climb: ClimbStatus, config: &LocomotionConfig, body: &mut impl Body) {
        body.clear_force();
        if climb.exiting_wall {
            return;
        }

        let context = ForceContext {
            direction: self.move_direction,
            speed: self.move_speed,
            sliding: self.is_sliding(),
            grounded: self.grounded,
            slope: self.slope,
            exiting_slope: self.exiting_slope,
            vertical_velocity: body.linear_velocity().y,
        };
        body.add_force(movement_force(&context, config));

        // На склоне гравитацию заменяют slope силы
        body.set_gravity_enabled(!self.on_slope());
    }
}
