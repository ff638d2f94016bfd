//! Speed control и movement forces
//!
//! Множители как у исходного контроллера: ровная земля ×10, склон ×20,
//! в воздухе дополнительно × air_multiplier.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::physics::SlopeContact;

pub const GROUND_FORCE_MULTIPLIER: f32 = 10.0;
pub const SLOPE_FORCE_MULTIPLIER: f32 = 20.0;

/// Ограничение скорости.
///
/// На склоне (`clamp_total`) режем весь вектор, иначе только горизонталь:
/// прыжок и падение по Y не ограничиваются.
pub fn speed_control(velocity: Vec3, speed: f32, clamp_total: bool) -> Vec3 {
    if clamp_total {
        return velocity.clamp_length_max(speed);
    }

    let flat = Vec3::new(velocity.x, 0.0, velocity.z);
    if flat.length() > speed {
        let limited = flat.normalize_or_zero() * speed;
        Vec3::new(limited.x, velocity.y, limited.z)
    } else {
        velocity
    }
}

/// Что нужно для силы одного physics step
#[derive(Debug, Clone, Copy)]
pub struct ForceContext {
    /// Intended direction (не normalized)
    pub direction: Vec3,
    pub speed: f32,
    pub sliding: bool,
    pub grounded: bool,
    pub slope: Option<SlopeContact>,
    pub exiting_slope: bool,
    pub vertical_velocity: f32,
}

pub fn movement_force(context: &ForceContext, config: &LocomotionConfig) -> Vec3 {
    let flat_direction = context.direction.normalize_or_zero();
    // Вверх по склону: прижимаем, чтобы не "выстрелить" с гребня
    let stick = if context.vertical_velocity > 0.0 {
        Vec3::NEG_Y * config.slope_stick_force
    } else {
        Vec3::ZERO
    };

    match context.slope {
        Some(slope) if context.sliding => slope.project(context.direction) * config.slide_force + stick,
        None if context.sliding => flat_direction * config.slide_force,
        Some(slope) if !context.exiting_slope => {
            slope.project(context.direction) * context.speed * SLOPE_FORCE_MULTIPLIER + stick
        }
        _ if context.grounded => flat_direction * context.speed * GROUND_FORCE_MULTIPLIER,
        _ => flat_direction * context.speed * GROUND_FORCE_MULTIPLIER * config.air_multiplier,
    }
}
