//! Grabbable interaction variant (grab / carry / drop / throw)
//!
//! Interactor state machine: Idle ⇄ Holding. Пока Holding, позиция объекта
//! каждый tick ведётся ограниченным шагом (не телепортом) к точке перед
//! viewpoint, rotation — slerp к rotation держателя. Drop = Throw(0):
//! единственный путь release, параметризованный силой.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::detection::queries;
use crate::input::InputSnapshot;
use crate::movement::smoothing::move_towards;
use crate::shared::ViewpointPose;
use super::events::Interacted;
use super::framework::{InteractionCapability, InteractionConfig};

/// Grabbable объект (target-side capability)
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Grabbable {
    /// Кто держит объект (None — свободен)
    #[serde(skip)]
    pub held_by: Option<Entity>,
    /// Дистанция разрыва связи: объект выдавлен препятствием дальше этого
    /// расстояния от carry anchor — связь считается потерянной
    pub link_break_distance: f32,
}

impl Default for Grabbable {
    fn default() -> Self {
        Self {
            held_by: None,
            link_break_distance: 1.5,
        }
    }
}

impl Grabbable {
    pub fn grab(&mut self, holder: Entity) {
        self.held_by = Some(holder);
    }

    pub fn release(&mut self) {
        self.held_by = None;
    }

    /// Физическая связь с держателем потеряна (объект застрял за препятствием)
    pub fn is_link_lost(&self, object_position: Vec3, anchor: Vec3) -> bool {
        object_position.distance(anchor) > self.link_break_distance
    }
}

impl InteractionCapability for Grabbable {
    /// Grab доступен всегда — гейт только по validity/дистанции. Пока
    /// interactor уже держит объект, Interacted игнорируется в
    /// grab_on_interact (single ownership по построению порядка систем).
    fn can_interact_with(&self) -> bool {
        true
    }
}

/// Держимый объект (interactor-side запись)
#[derive(Debug, Clone, Copy)]
pub struct HeldObject {
    pub entity: Entity,
    /// Size-зависимая часть carry offset (полудиагональ local AABB цели):
    /// крупный объект держится дальше и не клипает viewpoint
    pub size_offset: f32,
}

/// Grab state machine interactor'а: Idle (held == None) ⇄ Holding
#[derive(Component, Debug, Default)]
pub struct GrabState {
    pub held: Option<HeldObject>,
    /// One-tick латч: grab в этом tick подавляет drop/throw проверку — иначе
    /// grab и мгновенный release были бы неразличимы
    pub grabbed_this_tick: bool,
}

impl GrabState {
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }
}

/// Конфиг grab interaction
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Базовый offset carry anchor от viewpoint вдоль forward (метры)
    pub base_offset: f32,
    /// Максимальный шаг позиции за tick (MoveTowards)
    pub position_step: f32,
    /// Slerp-фактор rotation за tick [0, 1]
    pub rotation_smoothing: f32,
    /// Импульс throw (m/s вдоль viewpoint forward)
    pub throw_strength: f32,
    pub drop_input: String,
    pub throw_input: String,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            base_offset: 0.6,
            position_step: 0.35,
            rotation_smoothing: 0.2,
            throw_strength: 12.0,
            drop_input: "Drop".to_string(),
            throw_input: "Throw".to_string(),
        }
    }
}

impl Default for InteractionConfig<Grabbable> {
    fn default() -> Self {
        Self::new(2.5, "Interact")
    }
}

/// System: Idle → Holding по Interacted<Grabbable>.
///
/// Уже держим — событие игнорируется (замены без release не существует).
/// Объект в чужих руках тоже игнорируется. Захваченный объект выводится
/// из-под гравитации: позицией владеет перенос.
pub fn grab_on_interact(
    mut events: EventReader<Interacted<Grabbable>>,
    mut interactors: Query<&mut GrabState>,
    mut targets: Query<
        (&mut Grabbable, &mut Velocity, &mut GravityScale, Option<&Collider>),
        Without<GrabState>,
    >,
) {
    for event in events.read() {
        let Ok(mut state) = interactors.get_mut(event.interactor) else {
            continue;
        };
        if state.is_holding() {
            continue;
        }

        let Ok((mut grabbable, mut velocity, mut gravity, collider)) =
            targets.get_mut(event.target)
        else {
            continue;
        };
        if grabbable.held_by.is_some() {
            continue;
        }

        grabbable.grab(event.interactor);
        velocity.linvel = Vec3::ZERO;
        velocity.angvel = Vec3::ZERO;
        *gravity = GravityScale(0.0);

        let size_offset = collider.map(queries::half_extent_offset).unwrap_or(0.0);
        state.held = Some(HeldObject {
            entity: event.target,
            size_offset,
        });
        state.grabbed_this_tick = true;

        crate::logger::log(&format!(
            "Entity {:?} grabbed {:?} (size offset {:.2})",
            event.interactor, event.target, size_offset
        ));
    }
}

/// System: ведёт держимый объект к carry anchor.
///
/// Anchor = viewpoint + forward * (base_offset + size_offset). Velocity
/// объекта гасится каждый tick — позицией владеет перенос, физика объект не
/// двигает. Потеря связи (is_link_lost) — принудительный drop в ЭТОМ же tick,
/// без импульса.
pub fn update_held_objects(
    mut interactors: Query<(Entity, &ViewpointPose, &Transform, &GrabConfig, &mut GrabState)>,
    mut targets: Query<
        (&mut Transform, &mut Velocity, &mut GravityScale, &mut Grabbable),
        Without<GrabState>,
    >,
) {
    for (holder, viewpoint, holder_transform, config, mut state) in interactors.iter_mut() {
        let Some(held) = state.held else {
            continue;
        };

        let Ok((mut transform, mut velocity, mut gravity, mut grabbable)) =
            targets.get_mut(held.entity)
        else {
            // Объект исчез из мира — захват сбрасывается
            state.held = None;
            continue;
        };

        let anchor =
            viewpoint.position + viewpoint.forward * (config.base_offset + held.size_offset);
        transform.translation = move_towards(transform.translation, anchor, config.position_step);
        transform.rotation = transform
            .rotation
            .slerp(holder_transform.rotation, config.rotation_smoothing);
        velocity.linvel = Vec3::ZERO;
        velocity.angvel = Vec3::ZERO;

        if grabbable.is_link_lost(transform.translation, anchor) {
            grabbable.release();
            *gravity = GravityScale(1.0);
            state.held = None;
            crate::logger::log_warning(&format!(
                "Entity {:?} lost link to {:?}, force-dropped",
                holder, held.entity
            ));
        }
    }
}

/// System: drop/throw по edge кнопок.
///
/// Grab этого же tick подавляет проверку (one-tick латч). Drop — это
/// Throw(0): один путь release для обоих input'ов.
pub fn release_on_input(
    mut interactors: Query<(
        Entity,
        &ViewpointPose,
        &GrabConfig,
        &InputSnapshot,
        &mut GrabState,
    )>,
    mut targets: Query<(&mut Velocity, &mut GravityScale, &mut Grabbable), Without<GrabState>>,
) {
    for (holder, viewpoint, config, input, mut state) in interactors.iter_mut() {
        if !state.is_holding() || state.grabbed_this_tick {
            continue;
        }

        let strength = if input.button_down(&config.drop_input) {
            0.0
        } else if input.button_down(&config.throw_input) {
            config.throw_strength
        } else {
            continue;
        };

        let Some(held) = state.held.take() else {
            continue;
        };
        let Ok((mut velocity, mut gravity, mut grabbable)) = targets.get_mut(held.entity) else {
            continue;
        };

        grabbable.release();
        *gravity = GravityScale(1.0);
        velocity.linvel = viewpoint.forward * strength;

        crate::logger::log(&format!(
            "Entity {:?} released {:?} (strength {})",
            holder, held.entity, strength
        ));
    }
}

/// System: сброс one-tick grab латча в конце tick
pub fn reset_grab_latch(mut states: Query<&mut GrabState>) {
    for mut state in states.iter_mut() {
        if state.grabbed_this_tick {
            state.grabbed_this_tick = false;
        }
    }
}
