use glam::{Quat, Vec3};
use super::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn test_identity_basis() {
    let t = Transform::IDENTITY;
    assert_eq!(t.forward(), Vec3::Z);
    assert_eq!(t.right(), Vec3::X);
    assert_eq!(t.up(), Vec3::Y);
}

#[test]
fn test_rotated_basis_stays_orthonormal() {
    let t = Transform::IDENTITY.with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    // Turning 90° about +Y sends +Z to +X
    assert!(approx(t.forward(), Vec3::X));
    assert!(approx(t.right(), -Vec3::Z));
    assert!(t.forward().dot(t.up()).abs() < 1e-6);
    assert!(approx(t.up().cross(t.forward()), t.right()));
}

#[test]
fn test_transform_point_applies_scale_then_rotation_then_translation() {
    let t = Transform::new(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::splat(2.0),
    );
    // (1,0,0) * 2 = (2,0,0), rotated 90° about Z = (0,2,0), + offset
    assert!(approx(t.transform_point(Vec3::X), Vec3::new(1.0, 4.0, 3.0)));
    assert!(approx(t.matrix().transform_point3(Vec3::X), Vec3::new(1.0, 4.0, 3.0)));
}

#[test]
fn test_compose_parent_and_local() {
    let parent = Transform::from_position(Vec3::new(0.0, 0.0, 10.0)).with_scale(Vec3::splat(2.0));
    let local = Transform::from_position(Vec3::new(1.0, 0.0, 0.0)).with_scale(Vec3::splat(3.0));

    let world = parent.compose(&local);

    assert!(approx(world.position, Vec3::new(2.0, 0.0, 10.0)));
    assert!(approx(world.scale, Vec3::splat(6.0)));
}

#[test]
fn test_max_scale_uses_absolute_values() {
    let t = Transform::IDENTITY.with_scale(Vec3::new(1.0, -4.0, 2.0));
    assert_eq!(t.max_scale(), 4.0);
}
