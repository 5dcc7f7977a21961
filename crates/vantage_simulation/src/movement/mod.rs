//! Movement/Jump controller
//!
//! State machine над MovementMode × {grounded, airborne} с jump sub-state
//! {none, single-used, double-used}. Потребляет ground edges от Detector и оси
//! input, пишет target velocity в rigid-body sink (rapier Velocity) каждый
//! tick. Уровень grounded не перечитывается — только производная последнего
//! edge.

use bevy::prelude::*;

pub mod components;
pub mod smoothing;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod smoothing_tests;

// Re-export all components and systems
pub use components::*;
pub use smoothing::{move_towards, smooth_damp};
pub use systems::*;

use crate::SimulationSet;

/// Movement plugin: порядок систем внутри tick фиксирован —
/// ground edges → run латч → mode toggle → velocity → jump (jump
/// перезаписывает vertical после сглаживания)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::track_ground_state,
                systems::update_run_flag,
                systems::toggle_movement_mode,
                systems::apply_movement_input,
                systems::handle_jump_input,
            )
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
