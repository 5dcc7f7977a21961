//! Detector: перцепция персонажа
//!
//! Два семантически разных сигнала за tick:
//! - look-at: луч из viewpoint вдоль forward → LookAtEvent {target, distance}
//! - ground: capsule overlap под ногами → edge события BecameGrounded/LeftGround
//!
//! Edge-triggered: steady state не генерирует повторных событий. Потребители
//! держат "currently grounded" из последнего полученного edge, а не
//! перечитывают уровень каждый tick.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod queries;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod queries_tests;

// Re-export all components and events
pub use components::*;
pub use events::*;
pub use systems::{detect_ground, detect_look_at, ground_edge, GroundEdge};

use crate::SimulationSet;

/// Detection plugin: события перцепции + системы
pub struct DetectionPlugin;

impl Plugin for DetectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LookAtEvent>()
            .add_event::<BecameGrounded>()
            .add_event::<LeftGround>();

        app.add_systems(
            FixedUpdate,
            (systems::detect_look_at, systems::detect_ground)
                .chain()
                .in_set(SimulationSet::Detection),
        );
    }
}
