//! Detection системы: look-at луч + ground probe
//!
//! Обе работают поверх rapier context (Collision Query Service). Без context
//! (plugin физики не подключён) tick молча пропускается — perception просто
//! не даёт сигналов.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::shared::{BodyTag, ViewpointPose};
use super::components::{
    Detector, GroundSensor, GROUND_PROBE_MARGIN, GROUND_PROBE_WIDTH_FACTOR,
};
use super::events::{BecameGrounded, LeftGround, LookAtEvent};
use super::queries;

/// System: look-at detection.
///
/// Луч из viewpoint вдоль forward, неограниченная дальность, собственное тело
/// detector'а исключено. Дистанция события — до ближайшей точки bounds цели.
/// Цель без Collider-компонента события не даёт (ошибка конфигурации сцены —
/// fail-soft, пропускаем tick).
pub fn detect_look_at(
    rapier_context: ReadRapierContext,
    detectors: Query<(Entity, &ViewpointPose), With<Detector>>,
    colliders: Query<(&Collider, &GlobalTransform)>,
    mut look_events: EventWriter<LookAtEvent>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (detector, viewpoint) in detectors.iter() {
        let filter = QueryFilter::default().exclude_rigid_body(detector);

        let Some((target, _time_of_impact)) = context.cast_ray(
            viewpoint.position,
            viewpoint.forward,
            f32::MAX,
            true,
            filter,
        ) else {
            continue;
        };

        let Ok((collider, transform)) = colliders.get(target) else {
            continue;
        };

        let closest = queries::closest_point_on_bounds(collider, transform, viewpoint.position);
        look_events.write(LookAtEvent {
            detector,
            target,
            distance: viewpoint.position.distance(closest),
        });
    }
}

/// Edge перехода grounded-состояния (None — steady state, события нет)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundEdge {
    Became,
    Left,
}

/// Переход между предыдущим и текущим grounded-состоянием
pub fn ground_edge(previous: bool, current: bool) -> Option<GroundEdge> {
    match (previous, current) {
        (false, true) => Some(GroundEdge::Became),
        (true, false) => Some(GroundEdge::Left),
        _ => None,
    }
}

/// System: ground probe + edge события.
///
/// Короткая world-space капсула от подошвы вниз на GROUND_PROBE_MARGIN,
/// радиус = 0.8 полуширины персонажа. Опорой считается любой пересекающий
/// коллайдер, чей BodyTag отличается от тэга персонажа (self-exclusion).
/// События пишутся только на переходах.
pub fn detect_ground(
    rapier_context: ReadRapierContext,
    mut sensors: Query<(Entity, &GlobalTransform, &mut GroundSensor, Option<&BodyTag>)>,
    tags: Query<&BodyTag>,
    mut grounded_events: EventWriter<BecameGrounded>,
    mut airborne_events: EventWriter<LeftGround>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, mut sensor, own_tag) in sensors.iter_mut() {
        let feet = transform.translation() - Vec3::Y * sensor.half_height;
        let probe = Collider::capsule(
            feet,
            feet - Vec3::Y * GROUND_PROBE_MARGIN,
            sensor.half_width * GROUND_PROBE_WIDTH_FACTOR,
        );

        let own = own_tag.copied();
        let predicate = |other: Entity| match (tags.get(other).ok().copied(), own) {
            (Some(other_tag), Some(own_tag)) => other_tag != own_tag,
            _ => true,
        };
        let filter = QueryFilter::default()
            .exclude_rigid_body(entity)
            .predicate(&predicate);

        let mut support = 0usize;
        context.intersect_shape(Vec3::ZERO, Quat::IDENTITY, &*probe.raw, filter, |_| {
            support += 1;
            true
        });

        let grounded_now = support > 0;
        match ground_edge(sensor.grounded, grounded_now) {
            Some(GroundEdge::Became) => {
                grounded_events.write(BecameGrounded { entity });
            }
            Some(GroundEdge::Left) => {
                airborne_events.write(LeftGround { entity });
            }
            None => {}
        }
        sensor.grounded = grounded_now;
    }
}
