//! Keyboard backend для LocomotionInput
//!
//! ButtonInput<KeyCode> → LocomotionInput каждый frame (LocomotionSet::Input).

use bevy::prelude::*;

use super::{ButtonState, LocomotionInput};
use crate::LocomotionSet;

/// Keybinds персонажа
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub sprint: KeyCode,
    pub crouch: KeyCode,
    /// По умолчанию тот же Space, что и jump
    pub climb_jump: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            crouch: KeyCode::ControlLeft,
            climb_jump: KeyCode::Space,
        }
    }
}

fn button(keys: &ButtonInput<KeyCode>, key: KeyCode) -> ButtonState {
    ButtonState::new(keys.pressed(key), keys.just_pressed(key), keys.just_released(key))
}

// Raw axis: -1 / 0 / 1, без сглаживания
fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Система: keyboard → LocomotionInput
pub fn gather_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&KeyBindings, &mut LocomotionInput)>,
) {
    for (bindings, mut input) in query.iter_mut() {
        input.set_axes(
            axis(&keys, bindings.forward, bindings.back),
            axis(&keys, bindings.right, bindings.left),
        );
        input.jump = button(&keys, bindings.jump);
        input.sprint = button(&keys, bindings.sprint);
        input.crouch = button(&keys, bindings.crouch);
        input.climb_jump = button(&keys, bindings.climb_jump);
    }
}

/// Keyboard input Plugin
///
/// Полный InputPlugin не нужен: если `ButtonInput<KeyCode>` нет: создаём пустой.
pub struct KeyboardInputPlugin;

impl Plugin for KeyboardInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, gather_keyboard_input.in_set(LocomotionSet::Input));
    }
}
