// Host-side tests for pointer picking against picture panels.

use glam::{Vec2, Vec3};
use tunnel_core::*;

fn camera_at_origin() -> Camera {
    let mut cam = Camera::default();
    cam.set_viewport(800, 600);
    cam
}

fn panel(id: usize, z: f32) -> InteractiveObject {
    InteractiveObject::new(id, Vec3::new(0.0, 0.0, z), Vec2::new(0.7, 0.35))
}

#[test]
fn empty_scene_returns_no_hit() {
    let cam = camera_at_origin();
    assert!(pick(400.0, 300.0, Viewport::new(800, 600), &cam, &[]).is_none());
}

#[test]
fn click_beside_all_panels_returns_no_hit() {
    let cam = camera_at_origin();
    let objects = [panel(0, -5.0)];
    assert!(pick(5.0, 5.0, Viewport::new(800, 600), &cam, &objects).is_none());
}

#[test]
fn nearest_overlapping_panel_wins() {
    let cam = camera_at_origin();
    let objects = [panel(0, -10.0), panel(1, -3.0), panel(2, -6.0)];
    let hit = pick(400.0, 300.0, Viewport::new(800, 600), &cam, &objects).unwrap();
    assert_eq!(hit.object.id, 1);
    assert!((hit.point.z + 3.0).abs() < 1e-3);
}

#[test]
fn panels_behind_the_camera_are_ignored() {
    let cam = camera_at_origin();
    let objects = [panel(0, 4.0), panel(1, -8.0)];
    let hit = pick(400.0, 300.0, Viewport::new(800, 600), &cam, &objects).unwrap();
    assert_eq!(hit.object.id, 1);
}

#[test]
fn picks_laid_out_pictures_from_the_start_pose() {
    let path = PathModel::new(LineCurve::new(TUNNEL_START, TUNNEL_END));
    let mut cam = camera_at_origin();
    cam.set_pose(CameraRig::default().snap_to_start(&path));

    let mut registry = ObjectRegistry::new();
    for i in 4..8 {
        registry.register(layout::picture_object(i));
    }

    // project the top-right picture of the second cluster back to the screen
    let target = layout::picture_position(5);
    let clip = cam.view_projection() * target.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    let sx = (ndc.x + 1.0) * 0.5 * 800.0;
    let sy = (1.0 - ndc.y) * 0.5 * 600.0;

    let hit = pick(sx, sy, Viewport::new(800, 600), &cam, registry.as_slice()).unwrap();
    assert_eq!(hit.object.id, 5);
}
