//! Generic interaction framework
//!
//! Detection-gated dispatch по capability-типу C: валидность (сам entity или
//! structural предок несёт C) → дистанция → ровно одно из
//! CanInteract/CannotInteract за tick → Interacted по edge кнопки в том же
//! tick. Framework interaction-логики не содержит: поведение живёт в
//! вариантах, подписанных на Interacted<C>.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::detection::LookAtEvent;
use crate::input::InputSnapshot;
use crate::SimulationSet;
use super::events::{CanInteract, CannotInteract, Interacted};

/// Capability contract: компонент цели, по наличию которого гейтится
/// interaction данного варианта
pub trait InteractionCapability: Component {
    /// Доступность цели в ЭТОМ tick (дверь заперта / mid-transition → false).
    /// Проверяется каждый tick заново — состояние цели может меняться.
    fn can_interact_with(&self) -> bool;
}

/// Конфиг interactor'а для capability C
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig<C: InteractionCapability> {
    /// Максимальная дистанция interaction (по closest-point-on-bounds метрике
    /// детектора — не зависит от размера цели)
    pub max_distance: f32,
    /// Имя кнопки interaction (edge)
    pub interact_input: String,
    /// Ручная interaction включена; false — interactor реагирует только на
    /// host-триггеры, гейт не работает
    pub manual_interact: bool,
    #[serde(skip)]
    marker: PhantomData<C>,
}

impl<C: InteractionCapability> InteractionConfig<C> {
    pub fn new(max_distance: f32, interact_input: impl Into<String>) -> Self {
        Self {
            max_distance,
            interact_input: interact_input.into(),
            manual_interact: true,
            marker: PhantomData,
        }
    }

    pub fn with_manual_interact(mut self, enabled: bool) -> Self {
        self.manual_interact = enabled;
        self
    }
}

/// Цель или её ближайший предок с компонентом C.
///
/// Явный обход ChildOf-цепочки: луч обычно попадает в дочерний коллайдер
/// (дверное полотно), а capability висит на корне (дверь целиком).
pub fn find_capability_holder<C: InteractionCapability>(
    entity: Entity,
    capabilities: &Query<&C>,
    parents: &Query<&ChildOf>,
) -> Option<Entity> {
    let mut current = Some(entity);
    while let Some(candidate) = current {
        if capabilities.contains(candidate) {
            return Some(candidate);
        }
        current = parents.get(candidate).ok().map(|child_of| child_of.0);
    }
    None
}

/// System: гейт interaction'а для capability C.
///
/// Цели без C (и без C у предков) молча игнорируются — это нормальное
/// состояние почти всех объектов сцены, не ошибка.
pub fn gate_interactions<C: InteractionCapability>(
    mut look_events: EventReader<LookAtEvent>,
    interactors: Query<(&InteractionConfig<C>, &InputSnapshot)>,
    capabilities: Query<&C>,
    parents: Query<&ChildOf>,
    mut can_events: EventWriter<CanInteract<C>>,
    mut cannot_events: EventWriter<CannotInteract<C>>,
    mut interacted_events: EventWriter<Interacted<C>>,
) {
    for look in look_events.read() {
        let Ok((config, input)) = interactors.get(look.detector) else {
            continue;
        };
        if !config.manual_interact {
            continue;
        }

        let Some(holder) = find_capability_holder(look.target, &capabilities, &parents) else {
            continue;
        };
        if look.distance > config.max_distance {
            continue;
        }

        let Ok(capability) = capabilities.get(holder) else {
            continue;
        };

        if capability.can_interact_with() {
            can_events.write(CanInteract::new(look.detector, holder));
            if input.button_down(&config.interact_input) {
                interacted_events.write(Interacted::new(look.detector, holder));
            }
        } else {
            cannot_events.write(CannotInteract::new(look.detector, holder));
        }
    }
}

/// Plugin: события + gating система для capability C
pub struct InteractionPlugin<C: InteractionCapability>(PhantomData<C>);

impl<C: InteractionCapability> Default for InteractionPlugin<C> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<C: InteractionCapability> Plugin for InteractionPlugin<C> {
    fn build(&self, app: &mut App) {
        app.add_event::<CanInteract<C>>()
            .add_event::<CannotInteract<C>>()
            .add_event::<Interacted<C>>();

        app.add_systems(
            FixedUpdate,
            gate_interactions::<C>.in_set(SimulationSet::InteractionGate),
        );
    }
}
