//! Camera pose along the path and the projection used for rendering/picking.
//!
//! These types avoid platform APIs; the web frontend feeds the pose into its
//! uniforms each frame and reuses the same [`Camera`] for pointer picking.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, LOOK_AHEAD};
use crate::path::{wrap_fraction, Curve, PathModel};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Derives a pose from progress; holds nothing but the look-ahead offset.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    look_ahead: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(LOOK_AHEAD)
    }
}

impl CameraRig {
    pub fn new(look_ahead: f32) -> Self {
        Self { look_ahead }
    }

    #[inline]
    pub fn look_ahead(&self) -> f32 {
        self.look_ahead
    }

    /// Fraction the camera looks at, `(progress + look_ahead) mod 1`.
    #[inline]
    pub fn look_at_fraction(&self, progress: f32) -> f32 {
        wrap_fraction(progress, self.look_ahead)
    }

    pub fn pose_at_progress<C: Curve>(&self, path: &PathModel<C>, progress: f32) -> CameraPose {
        CameraPose {
            position: path.point_at_fraction(progress).position,
            look_at: path
                .point_at_fraction(self.look_at_fraction(progress))
                .position,
        }
    }

    pub fn snap_to_start<C: Curve>(&self, path: &PathModel<C>) -> CameraPose {
        self.pose_at_progress(path, 0.0)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.position;
        // look_at_rh degenerates when eye == target
        if pose.look_at.distance_squared(pose.position) > f32::EPSILON {
            self.target = pose.look_at;
        } else {
            self.target = pose.position + Vec3::NEG_Z;
        }
    }

    /// Update the aspect ratio; zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}
