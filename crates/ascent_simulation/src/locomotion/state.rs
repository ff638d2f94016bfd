//! LocomotionState: режим движения и таблица приоритетов

use bevy::prelude::*;

use crate::config::LocomotionConfig;

/// Режим движения (ровно один активен в каждом frame)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum LocomotionState {
    #[default]
    Walking,
    Sprinting,
    Crouching,
    /// Нет земли под ногами
    Airborne,
    Sliding,
    /// WallClimb держит стену
    Climbing,
}

/// Условия, из которых выбирается режим
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateConditions {
    pub climbing: bool,
    pub sliding: bool,
    pub crouch_held: bool,
    pub grounded: bool,
    pub sprint_held: bool,
}

impl LocomotionState {
    /// Приоритет: Climbing > Sliding > Crouching > Sprinting > Walking > Airborne
    pub fn resolve(conditions: &StateConditions) -> Self {
        match *conditions {
            StateConditions { climbing: true, .. } => Self::Climbing,
            StateConditions { sliding: true, .. } => Self::Sliding,
            StateConditions { crouch_held: true, .. } => Self::Crouching,
            StateConditions {
                grounded: true,
                sprint_held: true,
                ..
            } => Self::Sprinting,
            StateConditions { grounded: true, .. } => Self::Walking,
            _ => Self::Airborne,
        }
    }

    /// Sprint flag при входе в режим. `None`: flag не трогаем.
    pub fn entry_sprint_flag(self) -> Option<bool> {
        match self {
            Self::Sprinting => Some(true),
            Self::Crouching | Self::Walking | Self::Airborne => Some(false),
            Self::Climbing | Self::Sliding => None,
        }
    }

    /// Скорость режима.
    ///
    /// `previous`: скорость прошлого frame (Airborne её сохраняет),
    /// `downhill`: на склоне и velocity.y < 0.1 (слайд разгоняется).
    pub fn move_speed(self, config: &LocomotionConfig, previous: f32, downhill: bool) -> f32 {
        match self {
            Self::Climbing => config.climb_move_speed,
            Self::Sliding if downhill => config.slide_force,
            Self::Sliding => config.sprint_speed,
            Self::Crouching => config.crouch_speed,
            Self::Sprinting => config.sprint_speed,
            Self::Walking => config.walk_speed,
            Self::Airborne => previous,
        }
    }
}
