use glam::{Quat, Vec3};
use super::*;

#[test]
fn test_lens_from_degrees_stores_half_angle() {
    let lens = Lens::from_fov_degrees(60.0, 1.0, 0.3, 1000.0);
    assert!((lens.half_fov_y - 30f32.to_radians()).abs() < 1e-6);
}

#[test]
fn test_from_transform_copies_basis() {
    let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
        .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    let viewer = Viewer::from_transform(&transform, Lens::default());

    assert_eq!(viewer.position, Vec3::new(1.0, 2.0, 3.0));
    assert!((viewer.forward - Vec3::X).length() < 1e-5);
    assert!((viewer.right + Vec3::Z).length() < 1e-5);
    assert!((viewer.up - Vec3::Y).length() < 1e-5);
}

#[test]
fn test_looking_to_matches_identity_transform() {
    let a = Viewer::looking_to(Vec3::ZERO, Vec3::Z, Vec3::Y, Lens::default());
    let b = Viewer::from_transform(&Transform::IDENTITY, Lens::default());
    assert!((a.right - b.right).length() < 1e-6);
    assert!((a.up - b.up).length() < 1e-6);
}

#[test]
fn test_cross_section_size() {
    // 90° vertical → tan(45°) = 1 → height = 2d
    let viewer = Viewer::looking_to(
        Vec3::ZERO, Vec3::Z, Vec3::Y,
        Lens::from_fov_degrees(90.0, 2.0, 1.0, 10.0),
    );
    assert!((viewer.height_at(5.0) - 10.0).abs() < 1e-4);
    assert!((viewer.width_at(5.0) - 20.0).abs() < 1e-4);
}
