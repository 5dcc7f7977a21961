//! Player-controlled персонаж: marker + spawn helper

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::detection::{Detector, GroundSensor};
use crate::input::{InputBindings, InputSnapshot};
use crate::interaction::{
    Door, DoorInteractionConfig, GrabConfig, GrabState, Grabbable, InteractionConfig,
};
use crate::movement::{
    gravity_for_mode, JumpConfig, JumpState, MovementConfig, RunState, SmoothDampState,
};
use crate::shared::{BodyTag, ViewpointPose};

/// Marker component для player-controlled entity
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// BodyTag персонажей (self-exclusion в ground probe)
pub const PLAYER_BODY_TAG: u64 = 1;

/// Spawn первого лица: полный контроллер + rapier body.
///
/// Dynamic rigid body с замороженной rotation (yaw персонажа задаёт host через
/// Transform, как и pose камеры через ViewpointPose). Капсула тела строится по
/// габаритам GroundSensor.
pub fn spawn_player_character(
    commands: &mut Commands,
    position: Vec3,
    movement: MovementConfig,
    jump: JumpConfig,
) -> Entity {
    let sensor = GroundSensor::default();
    let gravity = gravity_for_mode(movement.mode);

    commands
        .spawn((
            Player,
            Transform::from_translation(position),
            // Host-written интерфейсы
            (ViewpointPose::default(), InputSnapshot::default(), InputBindings::default()),
            // Перцепция
            (Detector, sensor, BodyTag(PLAYER_BODY_TAG)),
            // Движение
            (
                movement,
                jump,
                JumpState::default(),
                RunState::default(),
                SmoothDampState::default(),
            ),
            // Interaction (door + grab варианты)
            (
                InteractionConfig::<Door>::default(),
                DoorInteractionConfig::default(),
                InteractionConfig::<Grabbable>::default(),
                GrabConfig::default(),
                GrabState::default(),
            ),
            // Rapier body (rigid-body sink)
            (
                RigidBody::Dynamic,
                Collider::capsule_y(sensor.half_height - sensor.half_width, sensor.half_width),
                Velocity::default(),
                LockedAxes::ROTATION_LOCKED,
                gravity,
            ),
        ))
        .id()
}
