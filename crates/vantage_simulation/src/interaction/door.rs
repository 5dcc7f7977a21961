//! Door interaction variant
//!
//! Состояние двери целиком на стороне entity двери; interactor только
//! триггерит toggle. Переходное состояние моделируется таймером: пока
//! transition идёт, interaction недоступна.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::events::Interacted;
use super::framework::{InteractionCapability, InteractionConfig};

/// Дверь (target-side capability)
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Door {
    pub open: bool,
    pub locked: bool,
    /// Длительность transition при toggle (секунды)
    pub transition_secs: f32,
    /// Остаток текущего transition; > 0 — дверь движется
    pub transition_secs_left: f32,
}

impl Default for Door {
    fn default() -> Self {
        Self {
            open: false,
            locked: false,
            transition_secs: 1.0,
            transition_secs_left: 0.0,
        }
    }
}

impl Door {
    pub fn is_moving(&self) -> bool {
        self.transition_secs_left > 0.0
    }
}

impl InteractionCapability for Door {
    fn can_interact_with(&self) -> bool {
        !self.locked && !self.is_moving()
    }
}

/// Конфиг door-interactor'а сверх generic гейта
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DoorInteractionConfig {
    /// Host-триггеры разрешены: trigger volume может открыть дверь без кнопки
    /// (сам trigger-слой живёт на стороне host)
    pub can_use_triggers: bool,
}

impl Default for DoorInteractionConfig {
    fn default() -> Self {
        Self {
            can_use_triggers: true,
        }
    }
}

impl Default for InteractionConfig<Door> {
    fn default() -> Self {
        Self::new(2.0, "Interact")
    }
}

/// System: toggle двери по Interacted<Door>
pub fn operate_doors(mut events: EventReader<Interacted<Door>>, mut doors: Query<&mut Door>) {
    for event in events.read() {
        let Ok(mut door) = doors.get_mut(event.target) else {
            continue;
        };

        door.open = !door.open;
        door.transition_secs_left = door.transition_secs;

        crate::logger::log_info(&format!(
            "Door {:?} -> {} (by {:?})",
            event.target,
            if door.open { "open" } else { "closed" },
            event.interactor
        ));
    }
}

/// System: тикает transition таймеры дверей
pub fn tick_door_transitions(mut doors: Query<&mut Door>, time: Res<Time>) {
    let delta = time.delta_secs();
    for mut door in doors.iter_mut() {
        if door.transition_secs_left > 0.0 {
            door.transition_secs_left = (door.transition_secs_left - delta).max(0.0);
        }
    }
}
