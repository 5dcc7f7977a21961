//! Tests for smoothing helpers.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::movement::smoothing::{move_towards, smooth_damp};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_smooth_damp_converges_to_target() {
        let target = Vec3::new(4.0, 0.0, -2.0);
        let mut current = Vec3::ZERO;
        let mut state_velocity = Vec3::ZERO;

        // 2 секунды при smooth_time 0.2 — должны почти дойти
        for _ in 0..120 {
            current = smooth_damp(current, target, &mut state_velocity, 0.2, DT);
        }

        assert!(current.distance(target) < 0.05, "current = {:?}", current);
    }

    #[test]
    fn test_smooth_damp_does_not_overshoot() {
        let target = Vec3::X * 2.0;
        let mut current = Vec3::ZERO;
        let mut state_velocity = Vec3::ZERO;

        for _ in 0..600 {
            current = smooth_damp(current, target, &mut state_velocity, 0.05, DT);
            assert!(current.x <= target.x + 1.0e-4, "overshoot: {:?}", current);
        }
    }

    #[test]
    fn test_smooth_damp_monotonic_approach() {
        let target = Vec3::Z * -5.0;
        let mut current = Vec3::ZERO;
        let mut state_velocity = Vec3::ZERO;
        let mut previous_distance = current.distance(target);

        for _ in 0..60 {
            current = smooth_damp(current, target, &mut state_velocity, 0.2, DT);
            let distance = current.distance(target);
            assert!(distance <= previous_distance + 1.0e-5);
            previous_distance = distance;
        }
    }

    #[test]
    fn test_move_towards_clamps_step() {
        let from = Vec3::ZERO;
        let to = Vec3::X * 10.0;

        let stepped = move_towards(from, to, 0.25);
        assert!((stepped.x - 0.25).abs() < 1.0e-6);
    }

    #[test]
    fn test_move_towards_reaches_target() {
        let from = Vec3::X * 0.1;
        let to = Vec3::X * 0.2;

        // Шаг больше остатка — точно в target, без перелёта
        assert_eq!(move_towards(from, to, 1.0), to);
        // Нулевая дистанция
        assert_eq!(move_towards(to, to, 1.0), to);
    }
}
