//! Collision query helpers: AABB math on top of rapier shapes.
//!
//! The query pipeline itself (ray casts, shape overlap) is accessed through
//! `ReadRapierContext` in the systems; this module only handles the bounds
//! geometry that rapier does not expose directly.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::math::{Isometry, Real};
use bevy_rapier3d::rapier::na;

/// World-space isometry of a collider from its GlobalTransform.
/// Scale is already baked into the rapier shape, so only rotation and
/// translation matter here.
fn collider_iso(transform: &GlobalTransform) -> Isometry<Real> {
    let (_, rotation, translation) = transform.to_scale_rotation_translation();
    Isometry::from_parts(
        na::Translation3::new(translation.x, translation.y, translation.z),
        na::Unit::new_normalize(na::Quaternion::new(
            rotation.w, rotation.x, rotation.y, rotation.z,
        )),
    )
}

/// Closest point on the collider's world AABB to `point`.
pub fn closest_point_on_bounds(
    collider: &Collider,
    transform: &GlobalTransform,
    point: Vec3,
) -> Vec3 {
    let aabb = collider.raw.compute_aabb(&collider_iso(transform));
    let min = Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z);
    let max = Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z);
    closest_point_on_aabb(min, max, point)
}

/// Closest point on the AABB `[min, max]` to `point`: per-component clamp.
/// A point inside the box maps to itself.
pub fn closest_point_on_aabb(min: Vec3, max: Vec3, point: Vec3) -> Vec3 {
    point.clamp(min, max)
}

/// Half the diagonal of the collider's local AABB.
///
/// Used as the size-dependent part of the carry offset: держим крупный объект
/// дальше от viewpoint, чтобы он не клипал камеру.
pub fn half_extent_offset(collider: &Collider) -> f32 {
    let aabb = collider.raw.compute_local_aabb();
    let half = aabb.half_extents();
    Vec3::new(half.x, half.y, half.z).length()
}
