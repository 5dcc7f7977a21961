//! Tests for bounds distance math.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::detection::queries::closest_point_on_aabb;

    #[test]
    fn test_unit_cube_distance_is_surface_distance() {
        // Unit cube в начале координат, точка на оси Z на дистанции D:
        // ближайшая точка bounds — грань куба, дистанция D - 0.5 (не D)
        let min = Vec3::splat(-0.5);
        let max = Vec3::splat(0.5);
        let d = 3.0;

        let closest = closest_point_on_aabb(min, max, Vec3::new(0.0, 0.0, d));
        assert_eq!(closest, Vec3::new(0.0, 0.0, 0.5));

        let distance = Vec3::new(0.0, 0.0, d).distance(closest);
        assert!((distance - (d - 0.5)).abs() < 1.0e-6, "distance = {}", distance);
    }

    #[test]
    fn test_point_inside_maps_to_itself() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        let inside = Vec3::new(0.2, -0.3, 0.9);

        assert_eq!(closest_point_on_aabb(min, max, inside), inside);
    }

    #[test]
    fn test_diagonal_point_clamps_to_corner() {
        let min = Vec3::splat(-0.5);
        let max = Vec3::splat(0.5);
        let point = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(closest_point_on_aabb(min, max, point), Vec3::splat(0.5));
    }
}
