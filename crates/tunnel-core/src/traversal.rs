//! The per-frame traversal step: scroll → segment → effects → pose.
//!
//! All mutable traversal state (progress, last segment, active track) lives
//! in [`TraversalState`] and is only touched inside [`TraversalState::advance`].

use crate::camera::{CameraPose, CameraRig};
use crate::config::TunnelParams;
use crate::effects::{EffectCommand, EffectCommands, EffectDispatcher, EffectTable, TrackSource};
use crate::path::{Curve, PathModel};
use crate::scroll::ScrollAccumulator;
use crate::segment::SegmentTracker;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub pose: CameraPose,
    /// Progress after this frame, 0 when it wrapped.
    pub progress: f32,
    pub segment: Option<usize>,
    pub commands: EffectCommands,
    pub wrapped: bool,
}

#[derive(Clone, Debug)]
pub struct TraversalState {
    scroll: ScrollAccumulator,
    tracker: SegmentTracker,
    rig: CameraRig,
    dispatcher: EffectDispatcher,
}

impl TraversalState {
    pub fn new(params: &TunnelParams, segment_count: usize) -> Self {
        Self {
            scroll: ScrollAccumulator::new(params.scroll_sensitivity),
            tracker: SegmentTracker::new(segment_count),
            rig: CameraRig::new(params.look_ahead),
            dispatcher: EffectDispatcher::new(),
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.scroll.progress()
    }

    #[inline]
    pub fn current_segment(&self) -> Option<usize> {
        self.tracker.last_segment()
    }

    #[inline]
    pub fn dispatcher(&self) -> &EffectDispatcher {
        &self.dispatcher
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn advance<C, T, I>(
        &mut self,
        deltas: I,
        path: &PathModel<C>,
        table: &EffectTable,
        tracks: &T,
    ) -> FrameOutput
    where
        C: Curve,
        T: TrackSource + ?Sized,
        I: IntoIterator<Item = f32>,
    {
        for d in deltas {
            self.scroll.apply_delta(d);
        }
        let progress = self.scroll.progress();
        let step = self.tracker.evaluate(progress);

        let mut commands = EffectCommands::new();
        if let Some(segment) = step.changed {
            if let Some(effect) = table.get(segment) {
                log::info!("[traversal] segment changed to: {}", effect.label);
            }
            commands = self.dispatcher.on_segment_changed(segment, table, tracks);
        }

        let pose = if step.wrapped {
            log::info!("[traversal] reached the end; returning to start");
            self.scroll.reset();
            self.rig.snap_to_start(path)
        } else {
            self.rig.pose_at_progress(path, progress)
        };

        FrameOutput {
            pose,
            progress: self.scroll.progress(),
            segment: self.tracker.last_segment(),
            commands,
            wrapped: step.wrapped,
        }
    }

    pub fn toggle_playback(&mut self) -> Option<EffectCommand> {
        self.dispatcher.toggle_playback()
    }
}
