//! Конфигурация locomotion и wall climb
//!
//! Оба конфига: компоненты на entity персонажа (как AIConfig), с serde
//! для загрузки хостом. Значения по умолчанию: исходный тюнинг контроллера.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::physics::LayerMask;

/// Параметры ходьбы / бега / приседа / слайда / прыжка
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct LocomotionConfig {
    // Скорости (m/s)
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    /// Cap скорости пока WallClimb держит стену
    pub climb_move_speed: f32,

    /// Linear damping на земле (в воздухе 0)
    pub ground_drag: f32,

    // Jump
    pub jump_force: f32,
    /// Секунды до следующего прыжка
    pub jump_cooldown: f32,
    /// Множитель силы в воздухе (< 1: слабое air control)
    pub air_multiplier: f32,

    // Crouch / slide extents (абсолютный Y scale)
    pub crouch_scale: f32,
    pub slide_scale: f32,
    pub max_slide_time: f32,
    pub slide_force: f32,
    /// Ниже этой горизонтальной скорости слайд заканчивается
    pub min_slide_momentum: f32,
    /// Impulse вниз при смене extent (чтобы не зависнуть в воздухе)
    pub stance_impulse: f32,

    // Ground check
    pub standing_height: f32,
    pub ground_layers: LayerMask,
    pub ground_probe_margin: f32,
    pub slope_probe_margin: f32,
    pub ceiling_probe_fraction: f32,
    pub ceiling_probe_margin: f32,

    // Slopes
    /// Градусы
    pub max_slope_angle: f32,
    /// Прижимающая сила, если на склоне velocity.y > 0
    pub slope_stick_force: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 10.0,
            crouch_speed: 3.5,
            climb_move_speed: 3.0,
            ground_drag: 5.0,
            jump_force: 12.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.4,
            crouch_scale: 0.5,
            slide_scale: 0.5,
            max_slide_time: 0.75,
            slide_force: 200.0,
            min_slide_momentum: 0.5,
            stance_impulse: 5.0,
            standing_height: 2.0,
            ground_layers: LayerMask::GROUND,
            ground_probe_margin: 0.2,
            slope_probe_margin: 0.3,
            ceiling_probe_fraction: 0.5,
            ceiling_probe_margin: 0.2,
            max_slope_angle: 40.0,
            slope_stick_force: 80.0,
        }
    }
}

impl LocomotionConfig {
    pub fn ground_probe_distance(&self) -> f32 {
        self.standing_height * 0.5 + self.ground_probe_margin
    }

    pub fn slope_probe_distance(&self) -> f32 {
        self.standing_height * 0.5 + self.slope_probe_margin
    }

    pub fn ceiling_probe_distance(&self) -> f32 {
        self.standing_height * self.ceiling_probe_fraction + self.ceiling_probe_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("walk_speed", self.walk_speed)?;
        non_negative("sprint_speed", self.sprint_speed)?;
        non_negative("crouch_speed", self.crouch_speed)?;
        non_negative("climb_move_speed", self.climb_move_speed)?;
        non_negative("ground_drag", self.ground_drag)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("jump_cooldown", self.jump_cooldown)?;
        in_range("air_multiplier", self.air_multiplier, 0.0, 1.0)?;
        unit_scale("crouch_scale", self.crouch_scale)?;
        unit_scale("slide_scale", self.slide_scale)?;
        non_negative("max_slide_time", self.max_slide_time)?;
        non_negative("slide_force", self.slide_force)?;
        non_negative("min_slide_momentum", self.min_slide_momentum)?;
        non_negative("stance_impulse", self.stance_impulse)?;
        positive("standing_height", self.standing_height)?;
        non_negative("ground_probe_margin", self.ground_probe_margin)?;
        non_negative("slope_probe_margin", self.slope_probe_margin)?;
        non_negative("ceiling_probe_fraction", self.ceiling_probe_fraction)?;
        non_negative("ceiling_probe_margin", self.ceiling_probe_margin)?;
        in_range("max_slope_angle", self.max_slope_angle, 0.0, 90.0)?;
        non_negative("slope_stick_force", self.slope_stick_force)?;
        Ok(())
    }
}

/// Параметры лазания по стенам и climb jump
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ClimbConfig {
    /// Вертикальная скорость на стене (m/s)
    pub climb_speed: f32,
    /// Stamina одной попытки (секунды)
    pub max_climb_time: f32,

    // Climb jump
    pub climb_jump_up_force: f32,
    pub climb_jump_back_force: f32,
    pub climb_jumps: u32,

    // Detection
    pub detection_length: f32,
    pub sphere_cast_radius: f32,
    /// Градусы: 0 = смотрим прямо в стену
    pub max_wall_look_angle: f32,
    pub wall_layers: LayerMask,
    /// Градусы: больше: считаем стену новой
    pub min_wall_normal_angle_change: f32,

    /// Exit window после climb jump (секунды)
    pub exit_wall_time: f32,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            climb_speed: 10.0,
            max_climb_time: 0.75,
            climb_jump_up_force: 14.0,
            climb_jump_back_force: 12.0,
            climb_jumps: 1,
            detection_length: 0.7,
            sphere_cast_radius: 0.25,
            max_wall_look_angle: 30.0,
            wall_layers: LayerMask::WALL,
            min_wall_normal_angle_change: 5.0,
            exit_wall_time: 0.2,
        }
    }
}

impl ClimbConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("climb_speed", self.climb_speed)?;
        positive("max_climb_time", self.max_climb_time)?;
        non_negative("climb_jump_up_force", self.climb_jump_up_force)?;
        non_negative("climb_jump_back_force", self.climb_jump_back_force)?;
        positive("detection_length", self.detection_length)?;
        non_negative("sphere_cast_radius", self.sphere_cast_radius)?;
        in_range("max_wall_look_angle", self.max_wall_look_angle, 0.0, 180.0)?;
        in_range(
            "min_wall_normal_angle_change",
            self.min_wall_normal_angle_change,
            0.0,
            180.0,
        )?;
        non_negative("exit_wall_time", self.exit_wall_time)?;
        Ok(())
    }
}

/// Невалидное значение в конфиге
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFinite { field: &'static str },
    Negative { field: &'static str, value: f32 },
    NotPositive { field: &'static str, value: f32 },
    OutOfRange { field: &'static str, value: f32, min: f32, max: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::Negative { field, value } => {
                write!(f, "{} must be >= 0 (got {})", field, value)
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be > 0 (got {})", field, value)
            }
            ConfigError::OutOfRange { field, value, min, max } => {
                write!(f, "{} must be in [{}, {}] (got {})", field, min, max, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    let value = finite(field, value)?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

// Extent scale: (0, 1]
fn unit_scale(field: &'static str, value: f32) -> Result<(), ConfigError> {
    positive(field, value)?;
    in_range(field, value, 0.0, 1.0)
}
