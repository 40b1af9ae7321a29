//! Tunable parameters for building a tunnel scene.
//!
//! Defaults reproduce the reference scene: a straight 100-unit tube, twelve
//! month segments, five audio tracks and 101 pictures in clusters of four.

use crate::constants::*;
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scroll sensitivity must be finite and positive, got {0}")]
    Sensitivity(f32),
    #[error("look-ahead must lie strictly between 0 and 1, got {0}")]
    LookAhead(f32),
    #[error("tube radius must be positive, got {0}")]
    TubeRadius(f32),
    #[error("tube needs at least 1 tubular and 3 radial segments, got {tubular}x{radial}")]
    TubeSegments { tubular: usize, radial: usize },
    #[error("fog density must be finite and positive, got {0}")]
    FogDensity(f32),
    #[error("tunnel path start and end coincide")]
    DegeneratePath,
    #[error("effect table has no segments")]
    NoSegments,
}

#[derive(Clone, Debug)]
pub struct TunnelParams {
    pub scroll_sensitivity: f32,
    pub look_ahead: f32,
    pub path_start: Vec3,
    pub path_end: Vec3,
    pub tube_radius: f32,
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub picture_count: usize,
    pub audio_track_count: usize,
    pub fog_density: f32,
    pub fovy_degrees: f32,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            scroll_sensitivity: SCROLL_SENSITIVITY,
            look_ahead: LOOK_AHEAD,
            path_start: TUNNEL_START,
            path_end: TUNNEL_END,
            tube_radius: TUBE_RADIUS,
            tubular_segments: TUBULAR_SEGMENTS,
            radial_segments: RADIAL_SEGMENTS,
            picture_count: PICTURE_COUNT,
            audio_track_count: AUDIO_TRACK_COUNT,
            fog_density: FOG_DENSITY,
            fovy_degrees: CAMERA_FOV_DEG,
        }
    }
}

impl TunnelParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scroll_sensitivity.is_finite() || self.scroll_sensitivity <= 0.0 {
            return Err(ConfigError::Sensitivity(self.scroll_sensitivity));
        }
        if !(self.look_ahead > 0.0 && self.look_ahead < 1.0) {
            return Err(ConfigError::LookAhead(self.look_ahead));
        }
        if !(self.tube_radius > 0.0) {
            return Err(ConfigError::TubeRadius(self.tube_radius));
        }
        if self.tubular_segments < 1 || self.radial_segments < 3 {
            return Err(ConfigError::TubeSegments {
                tubular: self.tubular_segments,
                radial: self.radial_segments,
            });
        }
        if !self.fog_density.is_finite() || self.fog_density <= 0.0 {
            return Err(ConfigError::FogDensity(self.fog_density));
        }
        if self.path_start.distance_squared(self.path_end) <= f32::EPSILON {
            return Err(ConfigError::DegeneratePath);
        }
        Ok(())
    }

    #[inline]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy_degrees.to_radians()
    }
}
