//! Stance: таблица переходов collision extent (стоя / присед / слайд)
//!
//! Все изменения высоты тела идут через `Stance::transition`:
//! (текущая stance × trigger) → следующая stance + extent + settle impulse.
//! Встать под потолком нельзя: остаёмся в `StandPending` и перепроверяем
//! каждый frame (`StanceTrigger::Recheck`).

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::timer::Countdown;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum Stance {
    #[default]
    Standing,
    Crouched,
    Sliding,
    /// Хотим встать, но над головой потолок
    StandPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceTrigger {
    CrouchPressed,
    CrouchReleased,
    SlideStarted,
    SlideEnded,
    /// Каждый frame, пока StandPending
    Recheck,
}

/// Высота тела
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Extent {
    Standing,
    Crouched,
    Sliding,
}

impl Extent {
    /// Абсолютный Y scale
    pub fn scale(self, config: &LocomotionConfig, standing_scale: f32) -> f32 {
        match self {
            Self::Standing => standing_scale,
            Self::Crouched => config.crouch_scale,
            Self::Sliding => config.slide_scale,
        }
    }
}

/// Результат перехода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StanceStep {
    pub next: Stance,
    /// `None`: extent не меняется
    pub extent: Option<Extent>,
    /// Impulse вниз после смены extent
    pub settle_impulse: bool,
}

impl StanceStep {
    fn to(next: Stance, extent: Extent, settle_impulse: bool) -> Self {
        Self {
            next,
            extent: Some(extent),
            settle_impulse,
        }
    }

    fn defer() -> Self {
        Self {
            next: Stance::StandPending,
            extent: None,
            settle_impulse: false,
        }
    }
}

impl Stance {
    /// `None`: trigger в этой stance ничего не делает
    pub fn transition(self, trigger: StanceTrigger, ceiling_blocked: bool) -> Option<StanceStep> {
        use Stance::*;
        use StanceTrigger::*;

        match (self, trigger) {
            // Пока скользим, crouch кнопка extent не трогает
            (Sliding, CrouchPressed | CrouchReleased) => None,

            (Standing | Crouched | StandPending, CrouchPressed) => {
                Some(StanceStep::to(Crouched, Extent::Crouched, true))
            }

            (Crouched | StandPending, CrouchReleased) if ceiling_blocked => Some(StanceStep::defer()),
            (Crouched | StandPending, CrouchReleased) => {
                Some(StanceStep::to(Standing, Extent::Standing, false))
            }

            // Слайд забирает extent, отложенный подъём отменяется
            (Standing | Crouched | StandPending, SlideStarted) => {
                Some(StanceStep::to(Sliding, Extent::Sliding, true))
            }

            (Sliding, SlideEnded) if ceiling_blocked => Some(StanceStep::defer()),
            (Sliding, SlideEnded) => Some(StanceStep::to(Standing, Extent::Standing, true)),

            (StandPending, Recheck) if !ceiling_blocked => {
                Some(StanceStep::to(Standing, Extent::Standing, true))
            }

            _ => None,
        }
    }

    pub fn is_stand_pending(self) -> bool {
        self == Stance::StandPending
    }
}

/// Активный слайд
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SlideSession {
    pub timer: Countdown,
}

impl SlideSession {
    pub fn new(max_slide_time: f32) -> Self {
        Self {
            timer: Countdown::new(max_slide_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crouch_and_stand() {
        let step = Stance::Standing
            .transition(StanceTrigger::CrouchPressed, false)
            .unwrap();
        assert_eq!(step, StanceStep::to(Stance::Crouched, Extent::Crouched, true));

        let step = Stance::Crouched
            .transition(StanceTrigger::CrouchReleased, false)
            .unwrap();
        assert_eq!(step.next, Stance::Standing);
        assert_eq!(step.extent, Some(Extent::Standing));
        assert!(!step.settle_impulse);
    }

    #[test]
    fn test_ceiling_defers_stand() {
        let step = Stance::Crouched
            .transition(StanceTrigger::CrouchReleased, true)
            .unwrap();
        assert_eq!(step.next, Stance::StandPending);
        assert_eq!(step.extent, None);

        // Потолок всё ещё есть: ничего
        assert_eq!(Stance::StandPending.transition(StanceTrigger::Recheck, true), None);

        let step = Stance::StandPending
            .transition(StanceTrigger::Recheck, false)
            .unwrap();
        assert_eq!(step, StanceStep::to(Stance::Standing, Extent::Standing, true));
    }

    #[test]
    fn test_slide_owns_extent() {
        assert_eq!(Stance::Sliding.transition(StanceTrigger::CrouchPressed, false), None);
        assert_eq!(Stance::Sliding.transition(StanceTrigger::CrouchReleased, false), None);

        let step = Stance::Sliding
            .transition(StanceTrigger::SlideEnded, true)
            .unwrap();
        assert_eq!(step.next, Stance::StandPending);
    }

    #[test]
    fn test_slide_cancels_pending_stand() {
        let step = Stance::StandPending
            .transition(StanceTrigger::SlideStarted, true)
            .unwrap();
        assert_eq!(step.next, Stance::Sliding);
        assert_eq!(step.extent, Some(Extent::Sliding));
    }

    #[test]
    fn test_noop_triggers() {
        assert_eq!(Stance::Standing.transition(StanceTrigger::CrouchReleased, false), None);
        assert_eq!(Stance::Standing.transition(StanceTrigger::Recheck, false), None);
        assert_eq!(Stance::Crouched.transition(StanceTrigger::SlideEnded, false), None);
    }

    #[test]
    fn test_extent_scales() {
        let config = LocomotionConfig {
            crouch_scale: 0.6,
            slide_scale: 0.4,
            ..default()
        };
        assert_eq!(Extent::Standing.scale(&config, 1.0), 1.0);
        assert_eq!(Extent::Crouched.scale(&config, 1.0), 0.6);
        assert_eq!(Extent::Sliding.scale(&config, 1.0), 0.4);
    }
}
