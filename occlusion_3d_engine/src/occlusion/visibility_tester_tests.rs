use glam::Vec3;
use slotmap::SlotMap;
use crate::scene::{AABB, Transform};
use super::*;

fn ids(n: usize) -> Vec<ObjectId> {
    let mut keys: SlotMap<ObjectId, ()> = SlotMap::with_key();
    (0..n).map(|_| keys.insert(())).collect()
}

/// Cube-shaped volume: every coordinate within `half` of `center`.
fn cube_volume(occluder: ObjectId, center: Vec3, half: f32) -> OcclusionVolume {
    let planes = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z]
        .into_iter()
        .map(|n| OcclusionPlane::new(center + n * half, n))
        .collect();
    OcclusionVolume::from_planes(occluder, planes)
}

// ============================================================================
// Single sphere
// ============================================================================

#[test]
fn test_sphere_inside_all_planes_is_occluded() {
    let id = ids(1)[0];
    let volume = cube_volume(id, Vec3::ZERO, 10.0);
    let tester = VisibilityTester::default();
    assert!(tester.is_fully_occluded(&BoundingSphere::new(Vec3::ZERO, 2.0), volume.planes()));
}

#[test]
fn test_one_failing_plane_rejects() {
    let id = ids(1)[0];
    let volume = cube_volume(id, Vec3::ZERO, 10.0);
    let tester = VisibilityTester::default();
    assert!(!tester.is_fully_occluded(&BoundingSphere::new(Vec3::new(9.0, 0.0, 0.0), 2.0), volume.planes()));
}

#[test]
fn test_boundary_tangent_sphere() {
    let plane = OcclusionPlane::new(Vec3::ZERO, Vec3::X);
    let tangent = BoundingSphere::new(Vec3::new(-1.0, 0.0, 0.0), 1.0);

    // Exactly tangent from inside: occluded under the strict test...
    assert!(VisibilityTester::new(0.0).is_fully_occluded(&tangent, &[plane]));
    // ...but the default tolerance leans toward visible.
    assert!(!VisibilityTester::default().is_fully_occluded(&tangent, &[plane]));
}

#[test]
fn test_result_does_not_depend_on_plane_order() {
    let id = ids(1)[0];
    let wall = OcclusionVolume::build(
        id,
        &Transform::from_position(Vec3::new(0.0, 0.0, 10.0)),
        &AABB::from_center_extents(Vec3::ZERO, Vec3::new(5.0, 5.0, 0.5)),
        Vec3::ZERO,
    ).unwrap();
    let planes = wall.planes().to_vec();
    assert_eq!(planes.len(), 5);

    let spheres = [
        BoundingSphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0),   // contained
        BoundingSphere::new(Vec3::new(30.0, 0.0, 20.0), 1.0),  // beside the volume
        BoundingSphere::new(Vec3::new(9.5, 0.0, 20.0), 1.0),   // straddles a side plane
        BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0),   // straddles the facing side
    ];

    let mut orders: Vec<Vec<OcclusionPlane>> = (0..planes.len())
        .map(|k| {
            let mut rotated = planes.clone();
            rotated.rotate_left(k);
            rotated
        })
        .collect();
    orders.push(planes.iter().rev().copied().collect());

    let tester = VisibilityTester::default();
    let expected: Vec<bool> = spheres.iter().map(|s| tester.is_fully_occluded(s, &planes)).collect();
    assert_eq!(expected, vec![true, false, false, false]);

    for order in &orders {
        let got: Vec<bool> = spheres.iter().map(|s| tester.is_fully_occluded(s, order)).collect();
        assert_eq!(got, expected);
    }
}

#[test]
fn test_no_planes_is_vacuously_occluded() {
    let tester = VisibilityTester::default();
    assert!(tester.is_fully_occluded(&BoundingSphere::new(Vec3::ZERO, 1.0), &[]));
}

#[test]
fn test_default_epsilon() {
    assert_eq!(VisibilityTester::default().epsilon(), DEFAULT_CONTAINMENT_EPSILON);
}

// ============================================================================
// Resolution over several occluders
// ============================================================================

#[test]
fn test_resolve_credits_first_containing_occluder() {
    let keys = ids(4);
    let (a, b, near, far) = (keys[0], keys[1], keys[2], keys[3]);
    let volumes = vec![
        cube_volume(a, Vec3::ZERO, 10.0),
        cube_volume(b, Vec3::ZERO, 100.0),
    ];
    let candidates = vec![
        (near, BoundingSphere::new(Vec3::ZERO, 1.0)),
        (far, BoundingSphere::new(Vec3::new(50.0, 0.0, 0.0), 1.0)),
    ];

    let result = VisibilityTester::default().resolve(&candidates, &volumes);

    assert_eq!(result, vec![
        Occlusion { candidate: near, occluder: a },
        Occlusion { candidate: far, occluder: b },
    ]);
}

#[test]
fn test_resolve_reports_each_candidate_once() {
    let keys = ids(3);
    let volumes = vec![
        cube_volume(keys[0], Vec3::ZERO, 10.0),
        cube_volume(keys[1], Vec3::ZERO, 10.0),
    ];
    let candidates = vec![(keys[2], BoundingSphere::new(Vec3::ZERO, 1.0))];

    let result = VisibilityTester::default().resolve(&candidates, &volumes);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].occluder, keys[0]);
}

#[test]
fn test_resolve_occluded_set_ignores_occluder_order() {
    let keys = ids(5);
    let forward = vec![
        cube_volume(keys[0], Vec3::ZERO, 10.0),
        cube_volume(keys[1], Vec3::new(40.0, 0.0, 0.0), 10.0),
    ];
    let reversed: Vec<_> = forward.iter().rev().cloned().collect();
    let candidates = vec![
        (keys[2], BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0)),
        (keys[3], BoundingSphere::new(Vec3::new(40.0, 0.0, 0.0), 1.0)),
        (keys[4], BoundingSphere::new(Vec3::new(20.0, 0.0, 0.0), 1.0)),
    ];

    let tester = VisibilityTester::default();
    let mut a: Vec<_> = tester.resolve(&candidates, &forward).iter().map(|o| o.candidate).collect();
    let mut b: Vec<_> = tester.resolve(&candidates, &reversed).iter().map(|o| o.candidate).collect();
    a.sort();
    b.sort();

    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
    assert!(!a.contains(&keys[4]));
}

#[test]
fn test_resolve_without_volumes_is_empty() {
    let keys = ids(1);
    let candidates = vec![(keys[0], BoundingSphere::new(Vec3::ZERO, 1.0))];
    assert!(VisibilityTester::default().resolve(&candidates, &[]).is_empty());
}
