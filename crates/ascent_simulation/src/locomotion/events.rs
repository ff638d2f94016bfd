//! Locomotion events (для animation / UI / audio)

use bevy::prelude::*;

use super::state::LocomotionState;

/// Почему закончился слайд
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SlideEndReason {
    /// Таймер слайда истёк
    Expired,
    /// Горизонтальная скорость упала ниже порога
    MomentumLost,
}

/// Event: сменился режим движения
#[derive(Event, Debug, Clone)]
pub struct LocomotionStateChanged {
    pub entity: Entity,
    pub from: LocomotionState,
    pub to: LocomotionState,
}

#[derive(Event, Debug, Clone)]
pub struct SlideStarted {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone)]
pub struct SlideEnded {
    pub entity: Entity,
    pub reason: SlideEndReason,
}

#[derive(Event, Debug, Clone)]
pub struct Jumped {
    pub entity: Entity,
}
