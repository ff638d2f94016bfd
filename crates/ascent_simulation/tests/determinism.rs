//! Property-based тесты детерминизма
//!
//! Одинаковый seed входных данных → идентичное состояние контроллеров.
//! Rapier прогон: одинаковый scripted input → идентичные Transform / Velocity
//! (bevy_rapier3d собран с enhanced-determinism).

use std::time::Duration;

use ascent_simulation::physics::{ground_groups, wall_groups, WallContact};
use ascent_simulation::{
    create_headless_app, spawn_locomotion_character, world_snapshot, ButtonState, ClimbConfig,
    GroundSensor, LocomotionConfig, LocomotionController, LocomotionInput, RapierSensingPlugin,
    SimulationPlugin, WallClimb, WallSensor,
};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::{Collider, NoUserData, RapierPhysicsPlugin, RigidBody, Velocity};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    // Первый прогон
    let snapshot1 = run_simulation(SEED, TICK_COUNT);

    // Второй прогон с тем же seed
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

fn random_button(rng: &mut ChaCha8Rng) -> ButtonState {
    match rng.gen_range(0..4) {
        0 => ButtonState::default(),
        1 => ButtonState::tap(),
        2 => ButtonState::hold(),
        _ => ButtonState::release(),
    }
}

/// Прогоняет 2 персонажей со случайными (seeded) сенсорами и input
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )))
    .add_plugins(SimulationPlugin);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut players = Vec::new();
    for i in 0..2 {
        let player = spawn_locomotion_character(
            &mut app.world_mut().commands(),
            Vec3::new(i as f32 * 3.0, 1.0, 0.0),
            LocomotionConfig::default(),
            ClimbConfig::default(),
        )
        .expect("default config is valid");
        players.push(player);
    }
    app.world_mut().flush();

    let walls: Vec<Entity> = (0..2).map(|_| app.world_mut().spawn_empty().id()).collect();

    for _ in 0..tick_count {
        for &player in &players {
            let ground = GroundSensor {
                grounded: rng.gen_bool(0.6),
                slope: None,
                ceiling_blocked: rng.gen_bool(0.1),
            };
            let wall = WallSensor {
                contact: rng.gen_bool(0.3).then(|| WallContact {
                    wall: walls[rng.gen_range(0..walls.len())],
                    normal: Vec3::Z,
                    distance: 0.4,
                    look_angle: rng.gen_range(0.0..45.0),
                }),
            };
            let input = LocomotionInput {
                forward: rng.gen_range(-1.0..=1.0),
                right: rng.gen_range(-1.0..=1.0),
                jump: random_button(&mut rng),
                sprint: random_button(&mut rng),
                crouch: random_button(&mut rng),
                climb_jump: random_button(&mut rng),
            };

            app.world_mut().entity_mut(player).insert((ground, wall, input));
        }

        app.update();
    }

    let mut snapshot = world_snapshot::<LocomotionController>(app.world_mut());
    snapshot.extend(world_snapshot::<WallClimb>(app.world_mut()));
    snapshot.extend(world_snapshot::<Transform>(app.world_mut()));
    snapshot
}

#[test]
fn test_rapier_determinism_same_script() {
    const TICK_COUNT: u32 = 240;

    let snapshot1 = run_rapier_simulation(TICK_COUNT);
    let snapshot2 = run_rapier_simulation(TICK_COUNT);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Rapier прогоны с одинаковым input разошлись"
    );
}

/// Input на тике: разбег, слайд, бег в стену, climb jump
fn scripted_input(tick: u32) -> LocomotionInput {
    let mut input = LocomotionInput {
        forward: 1.0,
        ..default()
    };
    match tick {
        0..=59 => input.sprint = ButtonState::hold(),
        60 => {
            input.sprint = ButtonState::hold();
            input.crouch = ButtonState::tap();
        }
        61..=80 => {
            input.sprint = ButtonState::hold();
            input.crouch = ButtonState::hold();
        }
        81 => input.crouch = ButtonState::release(),
        120 => input.jump = ButtonState::tap(),
        200 => input.climb_jump = ButtonState::tap(),
        _ => {}
    }
    input
}

/// Один персонаж в rapier мире (пол + стена), scripted input
fn run_rapier_simulation(tick_count: u32) -> Vec<u8> {
    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )))
    .add_plugins((
        bevy::transform::TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
        SimulationPlugin,
        RapierSensingPlugin,
    ));

    app.world_mut().spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.5, 20.0),
        ground_groups(),
    ));
    app.world_mut().spawn((
        Transform::from_xyz(0.0, 5.0, -14.0),
        RigidBody::Fixed,
        Collider::cuboid(5.0, 5.0, 0.5),
        wall_groups(),
    ));

    let player = spawn_locomotion_character(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, 1.1, 0.0),
        LocomotionConfig::default(),
        ClimbConfig::default(),
    )
    .expect("default config is valid");
    app.world_mut().flush();

    for tick in 0..tick_count {
        app.world_mut()
            .entity_mut(player)
            .insert(scripted_input(tick));
        app.update();
    }

    let mut snapshot = world_snapshot::<LocomotionController>(app.world_mut());
    snapshot.extend(world_snapshot::<WallClimb>(app.world_mut()));
    snapshot.extend(world_snapshot::<Velocity>(app.world_mut()));
    snapshot.extend(world_snapshot::<Transform>(app.world_mut()));
    snapshot
}
