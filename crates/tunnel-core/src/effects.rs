//! Per-segment side effects and the dispatcher that applies them.
//!
//! The dispatcher only emits commands; the frontend executes them against
//! its material, clear colour and audio player.

use crate::color::Color;
use smallvec::SmallVec;

pub const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_COLORS: [u32; 12] = [
    0xff0000, 0xffa500, 0xffff00, 0x008000, 0x0000ff, 0x4b0082, 0xee82ee, 0xa52a2a, 0x00ffff,
    0xff69b4, 0x8b4513, 0x000000,
];

pub const MONTH_TEXT_COLORS: [u32; 12] = [
    0xff1493, 0xff4500, 0x7fff00, 0x1e90ff, 0xd2691e, 0x9932cc, 0x00ff7f, 0x8b0000, 0xffd700,
    0x20b2aa, 0xee82ee, 0xf0e68c,
];

#[derive(Clone, Debug, PartialEq)]
pub struct SegmentEffect {
    pub label: &'static str,
    pub tube_color: Color,
    pub background_color: Color,
    pub text_color: Color,
    /// `segment mod track_count`; `None` when the scene has no tracks.
    pub audio_track: Option<usize>,
}

/// Immutable lookup table, one entry per segment.
#[derive(Clone, Debug)]
pub struct EffectTable {
    effects: Vec<SegmentEffect>,
}

impl EffectTable {
    pub fn new(effects: Vec<SegmentEffect>) -> Self {
        Self { effects }
    }

    /// Twelve month segments; tube and background share the month colour.
    pub fn months(track_count: usize) -> Self {
        let effects = MONTH_LABELS
            .into_iter()
            .zip(MONTH_COLORS)
            .zip(MONTH_TEXT_COLORS)
            .enumerate()
            .map(|(i, ((label, color), text))| SegmentEffect {
                label,
                tube_color: Color(color),
                background_color: Color(color),
                text_color: Color(text),
                audio_track: (track_count > 0).then(|| i % track_count),
            })
            .collect();
        Self { effects }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    #[inline]
    pub fn get(&self, segment: usize) -> Option<&SegmentEffect> {
        self.effects.get(segment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SegmentEffect> {
        self.effects.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectCommand {
    SetTubeColor(Color),
    SetBackgroundColor(Color),
    StopTrack(usize),
    StartTrack(usize),
    PauseAudio,
    ResumeAudio,
}

pub type EffectCommands = SmallVec<[EffectCommand; 4]>;

/// Readiness of decoded audio tracks.
pub trait TrackSource {
    fn is_track_ready(&self, track: usize) -> bool;
}

impl TrackSource for [bool] {
    fn is_track_ready(&self, track: usize) -> bool {
        self.get(track).copied().unwrap_or(false)
    }
}

/// Tracks which audio track is active; at most one at a time.
#[derive(Clone, Debug, Default)]
pub struct EffectDispatcher {
    active_track: Option<usize>,
    playing: bool,
}

impl EffectDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn active_track(&self) -> Option<usize> {
        self.active_track
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Commands for entering `segment`.
    ///
    /// Colours always change. The audio switch is skipped when the segment's
    /// track has not finished loading, leaving the current track untouched.
    /// Out-of-range segments yield no commands.
    pub fn on_segment_changed<T: TrackSource + ?Sized>(
        &mut self,
        segment: usize,
        table: &EffectTable,
        tracks: &T,
    ) -> EffectCommands {
        let mut out = EffectCommands::new();
        let Some(effect) = table.get(segment) else {
            log::warn!("[effects] segment {} outside table of {}", segment, table.len());
            return out;
        };

        log::info!("[effects] tube color -> {}", effect.tube_color);
        out.push(EffectCommand::SetTubeColor(effect.tube_color));
        log::info!("[effects] background color -> {}", effect.background_color);
        out.push(EffectCommand::SetBackgroundColor(effect.background_color));

        match effect.audio_track {
            Some(track) if tracks.is_track_ready(track) => {
                if let Some(prev) = self.active_track.take() {
                    out.push(EffectCommand::StopTrack(prev));
                }
                out.push(EffectCommand::StartTrack(track));
                self.active_track = Some(track);
                self.playing = true;
                log::info!("[effects] audio track -> {}", track);
            }
            Some(track) => {
                log::debug!("[effects] audio track {} not ready; keeping current", track);
            }
            None => {}
        }
        out
    }

    /// Pause/resume the active track. No-op without one.
    pub fn toggle_playback(&mut self) -> Option<EffectCommand> {
        self.active_track?;
        self.playing = !self.playing;
        Some(if self.playing {
            EffectCommand::ResumeAudio
        } else {
            EffectCommand::PauseAudio
        })
    }
}
