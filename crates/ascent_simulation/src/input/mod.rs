//! Input domain: абстрактный input source и orientation
//!
//! Содержит:
//! - LocomotionInput (оси + кнопки за текущий frame)
//! - Orientation (forward/right от камеры, пишется снаружи)
//! - KeyBindings + gather_keyboard_input (опциональный keyboard backend)
//!
//! Для headless тестов: mock input через LocomotionInput напрямую.

use bevy::prelude::*;

pub mod keyboard;

pub use keyboard::{gather_keyboard_input, KeyBindings, KeyboardInputPlugin};

/// Состояние дискретной кнопки за frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ButtonState {
    /// Зажата сейчас
    pub held: bool,
    /// Нажата в этом frame
    pub pressed: bool,
    /// Отпущена в этом frame
    pub released: bool,
}

impl ButtonState {
    pub fn new(held: bool, pressed: bool, released: bool) -> Self {
        Self {
            held,
            pressed,
            released,
        }
    }

    /// Нажали в этом frame и держим
    pub fn tap() -> Self {
        Self::new(true, true, false)
    }

    pub fn hold() -> Self {
        Self::new(true, false, false)
    }

    pub fn release() -> Self {
        Self::new(false, false, true)
    }

    /// Следующий frame: edge флаги гаснут, held остаётся
    pub fn settle(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// Входные данные locomotion за frame
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionInput {
    /// Вперёд/назад, [-1, 1]
    pub forward: f32,
    /// Вправо/влево, [-1, 1]
    pub right: f32,
    pub jump: ButtonState,
    pub sprint: ButtonState,
    pub crouch: ButtonState,
    pub climb_jump: ButtonState,
}

impl LocomotionInput {
    pub fn set_axes(&mut self, forward: f32, right: f32) {
        self.forward = forward.clamp(-1.0, 1.0);
        self.right = right.clamp(-1.0, 1.0);
    }

    pub fn has_movement(&self) -> bool {
        self.forward != 0.0 || self.right != 0.0
    }

    pub fn settle(&mut self) {
        self.jump.settle();
        self.sprint.settle();
        self.crouch.settle();
        self.climb_jump.settle();
    }
}

/// Ориентация взгляда (yaw камеры), не владеем: только читаем
///
/// Инвариант: forward и right: unit, горизонтальные, ортогональные.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Orientation {
    forward: Vec3,
    right: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

impl Orientation {
    /// Yaw в радианах вокруг +Y; yaw 0 смотрит в -Z (Bevy forward)
    pub fn from_yaw(yaw: f32) -> Self {
        let rotation = Quat::from_rotation_y(yaw);
        Self {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
        }
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        *self = Self::from_yaw(yaw);
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// World-space направление из осей (НЕ normalized: диагональ длиннее)
    pub fn move_direction(&self, forward_axis: f32, right_axis: f32) -> Vec3 {
        self.forward * forward_axis + self.right * right_axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_clamped() {
        let mut input = LocomotionInput::default();
        assert!(!input.has_movement());

        input.set_axes(3.0, -2.0);
        assert_eq!(input.forward, 1.0);
        assert_eq!(input.right, -1.0);
        assert!(input.has_movement());
    }

    #[test]
    fn test_button_settle_keeps_held() {
        let mut input = LocomotionInput {
            crouch: ButtonState::tap(),
            jump: ButtonState::release(),
            ..default()
        };

        input.settle();
        assert_eq!(input.crouch, ButtonState::hold());
        assert_eq!(input.jump, ButtonState::default());
    }

    #[test]
    fn test_orientation_from_yaw() {
        let facing_forward = Orientation::default();
        assert_eq!(facing_forward.forward(), Vec3::NEG_Z);
        assert_eq!(facing_forward.right(), Vec3::X);

        // +90°: смотрим в -X
        let turned = Orientation::from_yaw(std::f32::consts::FRAC_PI_2);
        assert!(turned.forward().distance(Vec3::NEG_X) < 1e-5);
        assert!(turned.right().distance(Vec3::NEG_Z) < 1e-5);
        assert!(turned.forward().dot(turned.right()).abs() < 1e-5);
    }

    #[test]
    fn test_move_direction_combines_axes() {
        let orientation = Orientation::default();
        let direction = orientation.move_direction(1.0, 1.0);
        assert_eq!(direction, Vec3::new(1.0, 0.0, -1.0));
    }
}
