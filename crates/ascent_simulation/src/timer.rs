//! Countdown: единый таймер для всех cooldown механик
//!
//! Jump cooldown, slide session, climb stamina, exit window: все работают
//! как "секунды до нуля", тикаются один раз за frame из системы-владельца.

use bevy::prelude::*;

/// Обратный отсчёт (секунды)
///
/// Инвариант: `remaining >= 0.0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    /// (Пере)запуск с полной длительностью
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Уменьшает таймер на `delta`.
    ///
    /// Возвращает `true` ровно на том тике, где таймер дошёл до нуля.
    /// Остановленный таймер всегда возвращает `false`.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.remaining = (self.remaining - delta.max(0.0)).max(0.0);
        self.remaining <= 0.0
    }
}
