//! Climb events
//!
//! Генерируются update_wall_climb, читаются кем угодно (animation, UI, audio).
//! LocomotionController сам события не читает: он смотрит на ClimbStatus.

use bevy::prelude::*;

/// Почему отпустили стену
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ReleaseReason {
    /// Стена пропала / отвернулись / отпустили forward
    ConditionLost,
    /// Stamina timer дошёл до нуля
    StaminaDepleted,
    /// Оттолкнулись climb jump'ом
    ClimbJump,
}

/// Event: начали лезть по стене
#[derive(Event, Debug, Clone)]
pub struct ClimbEngaged {
    pub entity: Entity,
    pub wall: Entity,
}

/// Event: перестали лезть
#[derive(Event, Debug, Clone)]
pub struct ClimbReleased {
    pub entity: Entity,
    pub reason: ReleaseReason,
}

/// Event: climb jump выполнен (exit window открыт)
#[derive(Event, Debug, Clone)]
pub struct ClimbJumpFired {
    pub entity: Entity,
    /// Сколько зарядов осталось после прыжка
    pub charges_left: u32,
}
