//! Headless симуляция ASCENT
//!
//! Rapier мир (пол + стена), один персонаж, scripted keyboard input:
//! разбег → слайд → бег к стене → лазание → climb jump.

use std::time::Duration;

use ascent_simulation::physics::{ground_groups, wall_groups};
use ascent_simulation::{
    create_headless_app, log_error, log_info, spawn_locomotion_character, ClimbConfig,
    KeyboardInputPlugin, LocomotionConfig, LocomotionController, RapierSensingPlugin,
    SimulationPlugin, WallClimb,
};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::{Collider, NoUserData, RapierPhysicsPlugin, RigidBody};

const TICKS: u32 = 360;

fn setup_level(mut commands: Commands) {
    // Пол: 40×1×40, верх на y = 0
    commands.spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.5, 20.0),
        ground_groups(),
    ));

    // Стена перед персонажем (он смотрит в -Z)
    commands.spawn((
        Transform::from_xyz(0.0, 5.0, -14.0),
        RigidBody::Fixed,
        Collider::cuboid(5.0, 5.0, 0.5),
        wall_groups(),
    ));

    if let Err(err) = spawn_locomotion_character(
        &mut commands,
        Vec3::new(0.0, 1.1, 0.0),
        LocomotionConfig::default(),
        ClimbConfig::default(),
    ) {
        log_error(&format!("Level setup failed: {}", err));
    }
}

/// Какие клавиши зажаты на данном тике
fn scripted_keys(tick: u32) -> Vec<KeyCode> {
    let mut keys = vec![KeyCode::KeyW];
    match tick {
        0..=59 => keys.push(KeyCode::ShiftLeft),
        60..=80 => keys.extend([KeyCode::ShiftLeft, KeyCode::ControlLeft]),
        200 => keys.push(KeyCode::Space),
        _ => {}
    }
    keys
}

fn drive_keyboard(app: &mut App, tick: u32) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    // InputPlugin нет: edge флаги чистим сами
    input.clear();

    let wanted = scripted_keys(tick);
    let held: Vec<KeyCode> = input.get_pressed().copied().collect();
    for key in held {
        if !wanted.contains(&key) {
            input.release(key);
        }
    }
    for key in wanted {
        input.press(key);
    }
}

fn main() {
    let mut app = create_headless_app();
    log_info("Starting ASCENT headless simulation");

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )))
    .add_plugins((
        bevy::transform::TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
        SimulationPlugin,
        RapierSensingPlugin,
        KeyboardInputPlugin,
    ))
    .add_systems(Startup, setup_level);

    for tick in 0..TICKS {
        drive_keyboard(&mut app, tick);
        app.update();

        if tick % 30 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<(&Transform, &LocomotionController, &WallClimb)>();
            for (transform, controller, climb) in query.iter(world) {
                log_info(&format!(
                    "Tick {}: pos {:.2} state {:?} speed {:.1} climbing {} charges {}",
                    tick,
                    transform.translation,
                    controller.state(),
                    controller.move_speed(),
                    climb.is_climbing(),
                    climb.charges_left()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
