//! Interaction framework + варианты
//!
//! Generic detection-gated dispatch (framework.rs) поверх LookAtEvent и два
//! варианта capability: Door (toggle открыто/закрыто) и Grabbable
//! (grab/carry/drop/throw). Новый вариант = компонент с impl
//! InteractionCapability + InteractionPlugin::<C> + поведение, подписанное на
//! Interacted<C>.

use bevy::prelude::*;

pub mod door;
pub mod events;
pub mod framework;
pub mod grabbable;


// Re-export all framework types, events and variants
pub use door::{operate_doors, tick_door_transitions, Door, DoorInteractionConfig};
pub use events::{CanInteract, CannotInteract, Interacted};
pub use framework::{
    find_capability_holder, gate_interactions, InteractionCapability, InteractionConfig,
    InteractionPlugin,
};
pub use grabbable::{
    grab_on_interact, release_on_input, reset_grab_latch, update_held_objects, GrabConfig,
    GrabState, Grabbable, HeldObject,
};

use crate::SimulationSet;

/// Door вариант: generic framework для Door + toggle поведение
pub struct DoorInteractionPlugin;

impl Plugin for DoorInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InteractionPlugin::<Door>::default());

        app.add_systems(
            FixedUpdate,
            (door::operate_doors, door::tick_door_transitions)
                .chain()
                .in_set(SimulationSet::InteractionApply),
        );
    }
}

/// Grabbable вариант: framework + grab/carry/release цепочка.
///
/// Порядок внутри tick — часть контракта one-tick латча: grab → carry (c
/// force-drop при потере связи) → release по input → сброс латча. Release
/// видит латч grab'а этого же tick и подавляется.
pub struct GrabInteractionPlugin;

impl Plugin for GrabInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InteractionPlugin::<Grabbable>::default());

        app.add_systems(
            FixedUpdate,
            (
                grabbable::grab_on_interact,
                grabbable::update_held_objects,
                grabbable::release_on_input,
                grabbable::reset_grab_latch,
            )
                .chain()
                .in_set(SimulationSet::InteractionApply),
        );
    }
}
