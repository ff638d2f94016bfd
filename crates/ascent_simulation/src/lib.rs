//! ASCENT Simulation Core
//!
//! First-person locomotion на Bevy 0.16 + bevy_rapier3d:
//! - LocomotionController: ходьба / бег / присед / слайд / прыжок / склоны
//! - WallClimb: лазание по стенам, stamina, climb jump
//!
//! Два темпа (как у rigid body контроллера):
//! - Update: sensing, input, state machines, таймеры, extent
//! - FixedUpdate: только силы

use bevy::prelude::*;
use bevy_rapier3d::prelude::{
    Collider, ColliderMassProperties, Damping, ExternalForce, ExternalImpulse, GravityScale,
    LockedAxes, RigidBody, Velocity,
};

// Публичные модули
pub mod climb;
pub mod config;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod timer;

// Re-export основных типов для удобства
pub use climb::{ClimbPlugin, ClimbStatus, WallClimb};
pub use config::{ClimbConfig, ConfigError, LocomotionConfig};
pub use input::{ButtonState, KeyBindings, KeyboardInputPlugin, LocomotionInput, Orientation};
pub use locomotion::{LocomotionController, LocomotionPlugin, LocomotionState};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use physics::{GroundSensor, RapierSensingPlugin, WallSensor};
pub use timer::Countdown;

/// Порядок систем внутри frame
///
/// Update: Input → Sense → Climb → Locomotion.
/// FixedUpdate: Forces.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Input source → LocomotionInput
    Input,
    /// Physics queries → GroundSensor / WallSensor
    Sense,
    /// WallClimb state machine
    Climb,
    /// LocomotionController frame tick
    Locomotion,
    /// Movement forces (physics tick)
    Forces,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Sensing (`RapierSensingPlugin`) и keyboard (`KeyboardInputPlugin`)
/// добавляет хост: в headless тестах сенсоры и input пишутся напрямую.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                Update,
                (
                    LocomotionSet::Input,
                    LocomotionSet::Sense,
                    LocomotionSet::Climb,
                    LocomotionSet::Locomotion,
                )
                    .chain(),
            )
            .configure_sets(FixedUpdate, LocomotionSet::Forces)
            .register_type::<LocomotionConfig>()
            .register_type::<ClimbConfig>()
            .add_plugins((ClimbPlugin, LocomotionPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Радиус капсулы персонажа
pub const CHARACTER_RADIUS: f32 = 0.5;

/// Spawn персонажа со всем, что нужно контроллеру и WallClimb
///
/// Конфиги валидируются до spawn'а: невалидный конфиг → `Err`, entity не создаётся.
pub fn spawn_locomotion_character(
    commands: &mut Commands,
    position: Vec3,
    locomotion: LocomotionConfig,
    climb: ClimbConfig,
) -> Result<Entity, ConfigError> {
    if let Err(err) = locomotion.validate().and_then(|_| climb.validate()) {
        log_error(&format!("Character spawn rejected: {}", err));
        return Err(err);
    }

    let half_height = (locomotion.standing_height * 0.5 - CHARACTER_RADIUS).max(0.0);
    let controller = LocomotionController::new(&locomotion, 1.0);
    let wall_climb = WallClimb::new(&climb);

    let entity = commands
        .spawn((
            // Rigid body (rapier владеет симуляцией)
            (
                Transform::from_translation(position),
                RigidBody::Dynamic,
                Collider::capsule_y(half_height, CHARACTER_RADIUS),
                ColliderMassProperties::Mass(1.0),
                LockedAxes::ROTATION_LOCKED,
                physics::character_groups(),
            ),
            // Body state, который пишет контроллер
            (
                Velocity::default(),
                ExternalImpulse::default(),
                ExternalForce::default(),
                GravityScale(1.0),
                Damping::default(),
            ),
            // Sensing + input
            (
                GroundSensor::default(),
                WallSensor::default(),
                LocomotionInput::default(),
                Orientation::default(),
                KeyBindings::default(),
            ),
            // Controllers
            (controller, wall_climb, locomotion, climb),
        ))
        .id();

    log_info(&format!("Spawned locomotion character {:?} at {}", entity, position));

    Ok(entity)
}

/// Snapshot компонентов для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
