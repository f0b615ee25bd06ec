use glam::{Quat, Vec3};
use serial_test::serial;
use crate::error::Error;
use super::*;

fn unit_box() -> AABB {
    AABB::from_center_extents(Vec3::ZERO, Vec3::splat(1.0))
}

// ============================================================================
// Hierarchy and transforms
// ============================================================================

#[test]
fn test_child_world_transform_follows_parent() {
    let mut scene = MockScene::new();
    let parent = scene.add_object("parent", Transform::from_position(Vec3::new(0.0, 0.0, 10.0)));
    let child = scene.add_object("child", Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
    scene.set_parent(child, Some(parent));

    let world = scene.transform(child).unwrap();
    assert!((world.position - Vec3::new(1.0, 0.0, 10.0)).length() < 1e-5);

    scene.set_transform(parent, Transform::from_position(Vec3::new(5.0, 0.0, 0.0)));
    let world = scene.transform(child).unwrap();
    assert!((world.position - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_removed_object_has_no_transform() {
    let mut scene = MockScene::new();
    let id = scene.add_object("gone", Transform::IDENTITY);
    scene.set_main_viewer(Some(id));
    scene.remove(id);

    assert!(scene.transform(id).is_none());
    assert!(scene.main_viewer().is_none());
}

// ============================================================================
// Proxies
// ============================================================================

#[test]
fn test_create_proxy_and_find_child() {
    let mut scene = MockScene::new();
    let owner = scene.add_box("crate", Transform::from_position(Vec3::new(0.0, 0.0, 20.0)), unit_box());
    let desc = ProxyDesc::enclosing(&unit_box(), "proxy_mat");

    let proxy = scene.create_proxy(owner, &desc).unwrap();

    assert_eq!(scene.find_child(owner, &desc.name), Some(proxy));
    assert_eq!(scene.parent(proxy), Some(owner));
    assert_eq!(scene.material(proxy), Some("proxy_mat"));
    assert_eq!(scene.render_flags(proxy), Some(ProxyRenderFlags::empty()));
    assert_eq!(scene.tags(proxy), Some(SurfaceTags::VISIBILITY_PROXY));

    // diameter = 2·‖(1,1,1)‖ → world scale = diameter
    let world = scene.transform(proxy).unwrap();
    assert!((world.max_scale() - 2.0 * 3f32.sqrt()).abs() < 1e-4);
}

#[test]
#[serial]
fn test_create_proxy_for_missing_owner_fails() {
    let mut scene = MockScene::new();
    let owner = scene.add_object("tmp", Transform::IDENTITY);
    scene.remove(owner);

    let result = scene.create_proxy(owner, &ProxyDesc::enclosing(&unit_box(), "m"));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_refused_proxy_creation() {
    let mut scene = MockScene::new();
    let owner = scene.add_box("b", Transform::IDENTITY, unit_box());
    scene.set_refuse_proxies(true);
    let result = scene.create_proxy(owner, &ProxyDesc::enclosing(&unit_box(), "m"));
    assert!(matches!(result, Err(Error::BackendError(_))));
}

// ============================================================================
// Layers
// ============================================================================

#[test]
fn test_frustums_layer_is_registered() {
    let scene = MockScene::new();
    assert_eq!(scene.resolve_layer(FRUSTUMS_LAYER), Some(SurfaceTags::VISUALIZATION));
    assert_eq!(scene.resolve_layer("Unknown"), None);
}

// ============================================================================
// Ray casts
// ============================================================================

#[test]
fn test_raycast_returns_nearest_hit() {
    let mut scene = MockScene::new();
    let near = scene.add_box("near", Transform::from_position(Vec3::new(0.0, 0.0, 5.0)), unit_box());
    let _far = scene.add_box("far", Transform::from_position(Vec3::new(0.0, 0.0, 15.0)), unit_box());

    let hit = scene.raycast(&Ray::new(Vec3::ZERO, Vec3::Z), &RayFilter::default()).unwrap();

    assert_eq!(hit.object, near);
    assert!((hit.distance - 4.0).abs() < 1e-5);
    assert!((hit.point - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
}

#[test]
fn test_raycast_honors_filter() {
    let mut scene = MockScene::new();
    let viz = scene.add_box("frustum_viz", Transform::from_position(Vec3::new(0.0, 0.0, 5.0)), unit_box());
    scene.set_tags(viz, SurfaceTags::VISUALIZATION);
    let wall = scene.add_box("wall", Transform::from_position(Vec3::new(0.0, 0.0, 15.0)), unit_box());

    let filter = RayFilter::ignoring(SurfaceTags::VISUALIZATION);
    let hit = scene.raycast(&Ray::new(Vec3::ZERO, Vec3::Z), &filter).unwrap();
    assert_eq!(hit.object, wall);
    assert_eq!(hit.tags, SurfaceTags::empty());

    let hit = scene.raycast(&Ray::new(Vec3::ZERO, Vec3::Z), &RayFilter::default()).unwrap();
    assert_eq!(hit.object, viz);
    assert_eq!(hit.tags, SurfaceTags::VISUALIZATION);
}

#[test]
fn test_raycast_rotated_scaled_box() {
    let mut scene = MockScene::new();
    // 1x1x1 half-extents, scaled 4x along local X, then turned 90° about Y:
    // local X now runs along world Z, so the box reaches z = 10 - 4 = 6.
    let transform = Transform::new(
        Vec3::new(0.0, 0.0, 10.0),
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Vec3::new(4.0, 1.0, 1.0),
    );
    let id = scene.add_box("slab", transform, unit_box());

    let hit = scene.raycast(&Ray::new(Vec3::ZERO, Vec3::Z), &RayFilter::default()).unwrap();
    assert_eq!(hit.object, id);
    assert!((hit.distance - 6.0).abs() < 1e-4);
}

#[test]
fn test_raycast_sphere_and_counter() {
    let mut scene = MockScene::new();
    let ball = scene.add_sphere("ball", Transform::from_position(Vec3::new(0.0, 0.0, 10.0)), 2.0);

    let hit = scene.raycast(&Ray::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)), &RayFilter::default());
    assert_eq!(hit.map(|h| h.object), Some(ball));
    assert!(scene.raycast(&Ray::new(Vec3::ZERO, -Vec3::Z), &RayFilter::default()).is_none());
    assert_eq!(scene.raycast_count(), 2);

    scene.reset_raycast_count();
    assert_eq!(scene.raycast_count(), 0);
}

#[test]
fn test_objects_without_collider_are_not_hit() {
    let mut scene = MockScene::new();
    scene.add_object("marker", Transform::from_position(Vec3::new(0.0, 0.0, 5.0)));
    assert!(scene.raycast(&Ray::new(Vec3::ZERO, Vec3::Z), &RayFilter::default()).is_none());
}
