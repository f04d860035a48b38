//! Per-frame transforms for the cube scene.

use glam::{Mat4, Vec3};

/// One cube at the origin and one 1.5 units out along each axis.
pub const CUBE_POSITIONS: [Vec3; 7] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.5),
    Vec3::new(0.0, 0.0, -1.5),
    Vec3::new(0.0, 1.5, 0.0),
    Vec3::new(0.0, -1.5, 0.0),
    Vec3::new(1.5, 0.0, 0.0),
    Vec3::new(-1.5, 0.0, 0.0),
];

/// Axis the centre cube spins around (normalised before use).
pub const SPIN_AXIS: Vec3 = Vec3::new(0.6, 1.0, 0.9);

/// View matrix of an eye circling the origin in the XZ plane.
pub fn orbit_view(elapsed: f32, radius: f32) -> Mat4 {
    let eye = Vec3::new(elapsed.sin() * radius, 0.0, elapsed.cos() * radius);
    Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)
}

pub fn projection(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_degrees.to_radians(), aspect, near, far)
}

/// Model matrix of cube `index`. Only the centre cube rotates.
pub fn cube_model(index: usize, position: Vec3, elapsed: f32, spin_rate: f32) -> Mat4 {
    let translation = Mat4::from_translation(position);
    if index == 0 {
        let angle = (elapsed * spin_rate).to_radians();
        translation * Mat4::from_axis_angle(SPIN_AXIS.normalize(), -angle)
    } else {
        translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn orbit_starts_on_positive_z() {
        let view = orbit_view(0.0, 5.0);
        // the origin sits 5 units in front of the eye
        let origin = view.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -5.0)).length() < EPS);
    }

    #[test]
    fn orbit_keeps_origin_at_constant_distance() {
        for t in [0.3, 1.7, 4.2] {
            let origin = orbit_view(t, 5.0).transform_point3(Vec3::ZERO);
            assert!((origin.length() - 5.0).abs() < 1e-4);
            assert!(origin.x.abs() < 1e-4 && origin.y.abs() < 1e-4);
        }
    }

    #[test]
    fn outer_cubes_only_translate() {
        for (i, position) in CUBE_POSITIONS.iter().enumerate().skip(1) {
            let model = cube_model(i, *position, 12.5, 80.0);
            assert_eq!(model, Mat4::from_translation(*position));
        }
    }

    #[test]
    fn centre_cube_spins_about_axis() {
        let model = cube_model(0, Vec3::ZERO, 1.0, 80.0);
        let axis = SPIN_AXIS.normalize();
        // the axis itself is fixed by the rotation
        assert!((model.transform_vector3(axis) - axis).length() < EPS);
        assert_ne!(model, Mat4::IDENTITY);
        assert_eq!(cube_model(0, Vec3::ZERO, 0.0, 80.0), Mat4::IDENTITY);
    }

    #[test]
    fn projection_maps_near_plane_to_minus_one() {
        let proj = projection(45.0, 4.0 / 3.0, 0.1, 100.0);
        let clip = proj * glam::Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((clip.z / clip.w + 1.0).abs() < 1e-4);
    }
}
