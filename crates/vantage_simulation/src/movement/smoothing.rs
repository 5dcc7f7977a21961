//! Critically damped smoothing for velocity vectors.
//!
//! Same algorithm as Unity's `Vector3.SmoothDamp` (Game Programming Gems 4,
//! ch. 1.10). The damper state lives in an explicit struct
//! (`SmoothDampState.velocity`) threaded through each call instead of a hidden
//! mutable reference parameter.

use bevy::prelude::*;

/// Moves `current` toward `target`, carrying `state_velocity` between ticks.
///
/// `smooth_time` — время достижения ~63% дистанции; `dt` — длительность tick.
/// Никогда не перелетает target.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    state_velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(1.0e-4);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*state_velocity + change * omega) * dt;
    *state_velocity = (*state_velocity - temp * omega) * exp;
    let mut output = target + (change + temp) * exp;

    // overshoot guard
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *state_velocity = Vec3::ZERO;
    }

    output
}

/// Bounded step toward `target`: не дальше `max_delta` за вызов (MoveTowards).
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + to_target / distance * max_delta
    }
}
