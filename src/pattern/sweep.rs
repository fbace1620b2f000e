//! Single point moving in a straight line

use std::time::Duration;

use super::{FrameSource, Pattern};
use crate::config::SweepConfig;
use crate::types::{Frame, Point, ScheduledFrame, wrap_frame_number};

/// One point stepping by a fixed offset each frame
pub struct LinearSweep {
    start: Point,
    step_x: i64,
    step_y: i64,
    frames: u32,
    index: u32,
    reserved: u16,
    delay: Duration,
}

impl LinearSweep {
    pub fn new(config: &SweepConfig, reserved: u16) -> Self {
        Self {
            start: config.start,
            step_x: config.step_x.into(),
            step_y: config.step_y.into(),
            frames: config.frames,
            index: 0,
            reserved,
            delay: config.interval(),
        }
    }

    /// Position at frame `index`
    pub fn position_at(&self, index: u32) -> Point {
        let i = i64::from(index);
        Point::saturating(
            i64::from(self.start.x) + self.step_x * i,
            i64::from(self.start.y) + self.step_y * i,
        )
    }
}

impl Iterator for LinearSweep {
    type Item = ScheduledFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.frames {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let point = self.position_at(index);
        let frame = Frame::new(wrap_frame_number(index.into()), self.reserved, vec![point]);
        Some(ScheduledFrame::new(frame, self.delay))
    }
}

impl FrameSource for LinearSweep {
    fn pattern(&self) -> Pattern {
        Pattern::Sweep
    }

    fn total_frames(&self) -> Option<u64> {
        Some(self.frames.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_follows_reference_path() {
        let frames: Vec<Frame> =
            LinearSweep::new(&SweepConfig::default(), 1).map(|s| s.frame).collect();

        assert_eq!(frames.len(), 50);
        assert_eq!(frames[0].points, vec![Point::new(100, 200)]);
        assert_eq!(frames[49].points, vec![Point::new(590, 445)]);
        assert_eq!(frames[49].frame_number, 49);
    }

    #[test]
    fn negative_steps_saturate_at_zero() {
        let config = SweepConfig { step_x: -100, step_y: -100, ..SweepConfig::default() };
        let sweep = LinearSweep::new(&config, 1);
        assert_eq!(sweep.position_at(10), Point::new(0, 0));
    }
}
