//! Edge-triggered segment detection over traversal progress.
//!
//! The segment is always derived from progress, never stored independently;
//! only the last observed segment is remembered so an effect fires once per
//! crossing instead of every frame.

/// Segment index for `progress`, `floor(progress * count)`.
/// Progress 1.0 yields `count`, which is out of bounds on purpose.
#[inline]
pub fn segment_index(progress: f32, segment_count: usize) -> usize {
    (progress.max(0.0) * segment_count as f32).floor() as usize
}

/// Outcome of one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentStep {
    /// Newly entered segment, if the derived segment changed and is in bounds.
    pub changed: Option<usize>,
    /// Progress reached the far end; the caller resets progress and snaps the camera.
    pub wrapped: bool,
}

#[derive(Clone, Debug)]
pub struct SegmentTracker {
    segment_count: usize,
    last_segment: Option<usize>,
}

impl SegmentTracker {
    pub fn new(segment_count: usize) -> Self {
        Self {
            segment_count,
            last_segment: None,
        }
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    #[inline]
    pub fn last_segment(&self) -> Option<usize> {
        self.last_segment
    }

    /// Evaluate once per frame, after the progress update.
    ///
    /// A large jump across several segments only reports the destination.
    pub fn evaluate(&mut self, progress: f32) -> SegmentStep {
        let mut step = SegmentStep::default();
        let segment = segment_index(progress, self.segment_count);
        if Some(segment) != self.last_segment && segment < self.segment_count {
            self.last_segment = Some(segment);
            step.changed = Some(segment);
        }
        if progress >= 1.0 {
            step.wrapped = true;
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_evaluation_fires_segment_zero() {
        let mut t = SegmentTracker::new(12);
        assert_eq!(t.last_segment(), None);
        assert_eq!(t.evaluate(0.0).changed, Some(0));
        assert_eq!(t.last_segment(), Some(0));
    }

    #[test]
    fn midpoint_is_segment_six() {
        assert_eq!(segment_index(0.5, 12), 6);
    }

    #[test]
    fn dwelling_does_not_refire() {
        let mut t = SegmentTracker::new(12);
        t.evaluate(0.51);
        for _ in 0..10 {
            assert_eq!(t.evaluate(0.51), SegmentStep::default());
        }
        assert_eq!(t.evaluate(0.52).changed, None);
    }

    #[test]
    fn large_jump_fires_destination_only() {
        let mut t = SegmentTracker::new(12);
        t.evaluate(0.0);
        let step = t.evaluate(0.9);
        assert_eq!(step.changed, Some(10));
        assert_eq!(t.last_segment(), Some(10));
    }

    #[test]
    fn far_end_wraps_without_out_of_range_segment() {
        let mut t = SegmentTracker::new(12);
        t.evaluate(0.95);
        let step = t.evaluate(1.0);
        assert_eq!(step.changed, None);
        assert!(step.wrapped);
        assert_eq!(t.last_segment(), Some(11));
    }

    #[test]
    fn backwards_scroll_fires_on_entry() {
        let mut t = SegmentTracker::new(4);
        t.evaluate(0.6);
        assert_eq!(t.evaluate(0.3).changed, Some(1));
        assert_eq!(t.evaluate(0.1).changed, Some(0));
    }

    #[test]
    fn zero_segments_never_fire() {
        let mut t = SegmentTracker::new(0);
        assert_eq!(t.evaluate(0.5).changed, None);
        assert!(t.evaluate(1.0).wrapped);
    }
}
