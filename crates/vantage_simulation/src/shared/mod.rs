//! Shared components consumed by several subsystems.

use bevy::prelude::*;

/// Camera pose sampled by the host render layer once per tick.
///
/// The simulation never moves the camera: the render side owns the pose and
/// writes it here before the fixed tick runs. Detection uses it as the ray
/// origin, movement as the input basis, the grab interaction as the carry
/// anchor.
///
/// # Basis
/// - `forward`/`right`/`up`: orthonormal camera basis in world space
/// - `position`: world-space eye position
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewpointPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for ViewpointPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

/// Collider tag used for self-exclusion in the ground probe.
///
/// Коллайдеры с тем же тэгом, что у персонажа, не считаются опорой: probe
/// всегда пересекает собственную капсулу персонажа. Entity без тэга считается
/// опорой.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct BodyTag(pub u64);
