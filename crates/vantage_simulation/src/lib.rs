//! VANTAGE Simulation Core
//!
//! Headless ECS-ядро first-person character controller (Bevy 0.16):
//! перцепция (Detector), movement/jump state machine и generic interaction
//! framework с вариантами Door и Grabbable.
//!
//! Архитектура:
//! - ECS = simulation core (state machines, gating, velocity planning)
//! - Host (engine bridge) = рендер, камера, реальный input, rapier plugin
//!
//! Контракт host'а на tick: записать ViewpointPose + InputSnapshot →
//! FixedUpdate прогоняет фазы Detection → Movement → InteractionGate →
//! InteractionApply → физика интегрирует velocity. Все rapier-запросы
//! синхронны, tick — единица атомарности.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

pub mod detection;
pub mod input;
pub mod interaction;
pub mod logger;
pub mod movement;
pub mod player;
pub mod shared;

// Re-export основных типов
pub use detection::{
    BecameGrounded, DetectionPlugin, Detector, GroundSensor, LeftGround, LookAtEvent,
};
pub use input::{clear_input_edges, InputBindings, InputSnapshot};
pub use interaction::{
    CanInteract, CannotInteract, Door, DoorInteractionConfig, DoorInteractionPlugin, GrabConfig,
    GrabInteractionPlugin, GrabState, Grabbable, Interacted, InteractionCapability,
    InteractionConfig, InteractionPlugin,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use movement::{
    gravity_for_mode, set_movement_mode, JumpConfig, JumpMode, JumpState, MovementConfig,
    MovementMode, MovementPlugin, RunState, SmoothDampState,
};
pub use player::{spawn_player_character, Player, PLAYER_BODY_TAG};
pub use shared::{BodyTag, ViewpointPose};

/// Частота simulation tick (Hz)
pub const TICK_HZ: f64 = 60.0;

/// Фазы tick'а в порядке зависимостей: перцепция → движение → interaction.
/// Всё до rapier backend sync.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Look-at + ground edges
    Detection,
    /// Run латч, velocity, прыжки, mode toggle
    Movement,
    /// Generic interaction gating (can/cannot/interacted события)
    InteractionGate,
    /// Поведение вариантов (двери, grab/carry/release)
    InteractionApply,
}

/// Главный plugin: все подсистемы контроллера + порядок фаз
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Detection,
                SimulationSet::Movement,
                SimulationSet::InteractionGate,
                SimulationSet::InteractionApply,
            )
                .chain()
                .before(PhysicsSet::SyncBackend),
        );

        app.add_plugins((
            DetectionPlugin,
            MovementPlugin,
            DoorInteractionPlugin,
            GrabInteractionPlugin,
        ));

        // GetButtonDown семантика: edges живут ровно один tick
        app.add_systems(
            FixedUpdate,
            clear_input_edges.after(SimulationSet::InteractionApply),
        );
    }
}

/// Minimal headless App: фиксированный tick и детерминированное время —
/// каждый update() продвигает часы ровно на один tick (wall clock не
/// участвует)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            std::time::Duration::from_secs_f64(1.0 / TICK_HZ),
        ));

    app
}

/// Snapshot всех T-компонентов мира в байты (Debug-формат, сортировка по
/// entity) — для сравнения детерминизма прогонов
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &T)>();
    let mut entries: Vec<_> = query.iter(world).collect();
    entries.sort_by_key(|(entity, _)| entity.to_bits());

    let mut snapshot = Vec::new();
    for (entity, component) in entries {
        snapshot.extend_from_slice(format!("{:?}={:?};", entity, component).as_bytes());
    }
    snapshot
}
