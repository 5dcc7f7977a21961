//! Detection события

use bevy::prelude::*;

/// Event: detector смотрит на объект (максимум одно за tick на detector)
///
/// `distance` — от viewpoint до ближайшей точки BOUNDS коллайдера цели, не до
/// точки попадания луча: консервативная метрика "насколько близко к
/// поверхности", не зависящая от размера объекта. Interaction-гейты сравнивают
/// именно её.
#[derive(Event, Debug, Clone, Copy)]
pub struct LookAtEvent {
    pub detector: Entity,
    pub target: Entity,
    pub distance: f32,
}

/// Event: переход not-grounded → grounded (ровно один на переход)
#[derive(Event, Debug, Clone, Copy)]
pub struct BecameGrounded {
    pub entity: Entity,
}

/// Event: переход grounded → not-grounded
#[derive(Event, Debug, Clone, Copy)]
pub struct LeftGround {
    pub entity: Entity,
}
