use crate::constants::SCROLL_SENSITIVITY;

/// Converts raw wheel deltas into a clamped \[0, 1\] traversal progress.
#[derive(Clone, Debug)]
pub struct ScrollAccumulator {
    progress: f32,
    sensitivity: f32,
}

impl Default for ScrollAccumulator {
    fn default() -> Self {
        Self::new(SCROLL_SENSITIVITY)
    }
}

impl ScrollAccumulator {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            progress: 0.0,
            sensitivity,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Apply one wheel delta and return the new progress.
    /// Non-finite deltas are dropped.
    pub fn apply_delta(&mut self, raw_delta: f32) -> f32 {
        if raw_delta.is_finite() {
            self.progress = (self.progress + raw_delta * self.sensitivity).clamp(0.0, 1.0);
        }
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
    }
}
