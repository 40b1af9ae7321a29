//! Ray-based hit testing of pointer positions against picture panels.

use crate::camera::Camera;
use crate::objects::InteractiveObject;
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// World-space ray through normalized device coordinates `ndc`.
    pub fn from_ndc(ndc: Vec2, camera: &Camera) -> Self {
        let inv = camera.view_projection().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Self {
            origin: p0,
            dir: (p1 - p0).normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Screen pixels (origin top-left, y down) to NDC (y up).
#[inline]
pub fn screen_to_ndc(screen_x: f32, screen_y: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (screen_x / viewport.width) * 2.0 - 1.0,
        -(screen_y / viewport.height) * 2.0 + 1.0,
    )
}

/// Distance along `ray` to the panel, if it is hit in front of the origin.
pub fn ray_panel(ray: &Ray, object: &InteractiveObject) -> Option<f32> {
    if ray.dir.z.abs() < 1e-6 {
        return None;
    }
    let t = (object.position.z - ray.origin.z) / ray.dir.z;
    if t < 0.0 {
        return None;
    }
    let hit = ray.at(t);
    let d = (hit - object.position).truncate().abs();
    (d.x <= object.half_size.x && d.y <= object.half_size.y).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit<'a> {
    pub object: &'a InteractiveObject,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest panel under the pointer, or `None` when nothing is hit.
pub fn pick<'a>(
    screen_x: f32,
    screen_y: f32,
    viewport: Viewport,
    camera: &Camera,
    objects: &'a [InteractiveObject],
) -> Option<PickHit<'a>> {
    let ray = Ray::from_ndc(screen_to_ndc(screen_x, screen_y, viewport), camera);
    let mut best: Option<PickHit<'a>> = None;
    for object in objects {
        if let Some(t) = ray_panel(&ray, object) {
            match best {
                Some(b) if t >= b.distance => {}
                _ => {
                    best = Some(PickHit {
                        object,
                        distance: t,
                        point: ray.at(t),
                    })
                }
            }
        }
    }
    best
}
