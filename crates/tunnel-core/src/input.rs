use glam::Vec2;
use smallvec::SmallVec;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Vertical wheel delta in raw browser units.
    Wheel { delta_y: f32 },
    /// Pointer click in canvas backing-store pixels.
    Click { x: f32, y: f32 },
    Resize { width: u32, height: u32 },
    ToggleAudio,
}

/// Everything that arrived since the previous frame, in arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub scroll_deltas: SmallVec<[f32; 8]>,
    pub clicks: SmallVec<[Vec2; 2]>,
    pub resize: Option<(u32, u32)>,
    pub audio_toggles: u32,
}

/// Events queued by listeners and drained once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn take_frame(&mut self) -> FrameInput {
        let mut out = FrameInput::default();
        for ev in self.events.drain(..) {
            match ev {
                InputEvent::Wheel { delta_y } => out.scroll_deltas.push(delta_y),
                InputEvent::Click { x, y } => out.clicks.push(Vec2::new(x, y)),
                InputEvent::Resize { width, height } => out.resize = Some((width, height)),
                InputEvent::ToggleAudio => out.audio_toggles += 1,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_order_and_keeps_last_resize() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Wheel { delta_y: 100.0 });
        q.push(InputEvent::Resize { width: 10, height: 10 });
        q.push(InputEvent::Wheel { delta_y: -40.0 });
        q.push(InputEvent::Click { x: 5.0, y: 6.0 });
        q.push(InputEvent::Resize { width: 640, height: 480 });
        q.push(InputEvent::ToggleAudio);

        let f = q.take_frame();
        assert_eq!(f.scroll_deltas.as_slice(), &[100.0, -40.0]);
        assert_eq!(f.clicks.as_slice(), &[Vec2::new(5.0, 6.0)]);
        assert_eq!(f.resize, Some((640, 480)));
        assert_eq!(f.audio_toggles, 1);
        assert!(q.is_empty());
        assert_eq!(q.take_frame(), FrameInput::default());
    }
}
