//! Single per-frame driver: advance the traversal, then hand everything the
//! frontend needs to a [`FrameSink`].
//!
//! Scheduling is left to the caller (requestAnimationFrame on the web, a
//! plain loop in tests); the driver only defines what one tick does.

use crate::camera::Camera;
use crate::config::{ConfigError, TunnelParams};
use crate::constants::{CAMERA_FAR, CAMERA_NEAR};
use crate::effects::{EffectCommand, EffectTable, TrackSource};
use crate::input::FrameInput;
use crate::objects::{InteractiveObject, ObjectRegistry};
use crate::path::{Curve, LineCurve, PathModel};
use crate::pick::{pick, Viewport};
use crate::traversal::{FrameOutput, TraversalState};
use anyhow::Context;

/// Receives the side effects of one tick, in order.
pub trait FrameSink {
    fn apply_effect(&mut self, command: &EffectCommand);
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn show_picked(&mut self, _object: &InteractiveObject) {}
    fn playback_changed(&mut self, _playing: bool) {}
    fn draw(&mut self, camera: &Camera, frame: &FrameOutput);
}

pub struct Driver<C: Curve> {
    params: TunnelParams,
    path: PathModel<C>,
    table: EffectTable,
    traversal: TraversalState,
    camera: Camera,
    viewport: Viewport,
}

impl Driver<LineCurve> {
    /// Straight tunnel with the month effect table.
    pub fn straight(params: TunnelParams, width: u32, height: u32) -> anyhow::Result<Self> {
        let path = PathModel::new(LineCurve::new(params.path_start, params.path_end));
        let table = EffectTable::months(params.audio_track_count);
        Self::new(params, path, table, width, height)
    }
}

impl<C: Curve> Driver<C> {
    pub fn new(
        params: TunnelParams,
        path: PathModel<C>,
        table: EffectTable,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        params.validate().context("invalid tunnel parameters")?;
        if table.is_empty() {
            return Err(ConfigError::NoSegments).context("invalid tunnel parameters");
        }
        let traversal = TraversalState::new(&params, table.len());
        let mut camera = Camera {
            fovy_radians: params.fovy_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            ..Camera::default()
        };
        camera.set_viewport(width, height);
        camera.set_pose(traversal.rig().snap_to_start(&path));
        Ok(Self {
            params,
            path,
            table,
            traversal,
            camera,
            viewport: Viewport::new(width, height),
        })
    }

    pub fn params(&self) -> &TunnelParams {
        &self.params
    }

    pub fn path(&self) -> &PathModel<C> {
        &self.path
    }

    pub fn table(&self) -> &EffectTable {
        &self.table
    }

    pub fn traversal(&self) -> &TraversalState {
        &self.traversal
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tick<T, S>(
        &mut self,
        input: FrameInput,
        tracks: &T,
        objects: &ObjectRegistry,
        sink: &mut S,
    ) -> FrameOutput
    where
        T: TrackSource + ?Sized,
        S: FrameSink,
    {
        if let Some((w, h)) = input.resize {
            self.camera.set_viewport(w, h);
            self.viewport = Viewport::new(w, h);
            sink.resize(w, h);
        }

        let out = self
            .traversal
            .advance(input.scroll_deltas, &self.path, &self.table, tracks);
        for cmd in &out.commands {
            sink.apply_effect(cmd);
        }
        self.camera.set_pose(out.pose);

        for click in &input.clicks {
            match pick(click.x, click.y, self.viewport, &self.camera, objects.as_slice()) {
                Some(hit) => {
                    log::info!(
                        "[pick] picture {} at ({:.2},{:.2},{:.2})",
                        hit.object.id,
                        hit.object.position.x,
                        hit.object.position.y,
                        hit.object.position.z
                    );
                    sink.show_picked(hit.object);
                }
                None => log::debug!("[pick] nothing under ({:.0},{:.0})", click.x, click.y),
            }
        }

        for _ in 0..input.audio_toggles {
            match self.traversal.toggle_playback() {
                Some(cmd) => {
                    sink.apply_effect(&cmd);
                    sink.playback_changed(self.traversal.dispatcher().is_playing());
                }
                None => log::debug!("[audio] toggle ignored; no active track"),
            }
        }

        sink.draw(&self.camera, &out);
        out
    }
}
