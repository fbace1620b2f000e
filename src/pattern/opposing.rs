//! Two points crossing in opposite directions

use std::time::Duration;

use super::{FrameSource, Pattern};
use crate::config::OpposingConfig;
use crate::types::{Frame, Point, ScheduledFrame, wrap_frame_number};

/// Point A moves right from `start_a`, point B moves left from `start_b`.
///
/// Both wobble vertically on a triangle wave, in opposite directions.
pub struct OpposingMotion {
    start_a: Point,
    start_b: Point,
    step: i64,
    amplitude: i64,
    wobble_period: u32,
    frames: u32,
    index: u32,
    reserved: u16,
    delay: Duration,
}

impl OpposingMotion {
    pub fn new(config: &OpposingConfig, reserved: u16) -> Self {
        Self {
            start_a: config.start_a,
            start_b: config.start_b,
            step: config.step.into(),
            amplitude: config.wobble_amplitude.into(),
            wobble_period: config.wobble_period.max(2),
            frames: config.frames,
            index: 0,
            reserved,
            delay: config.interval(),
        }
    }

    /// Triangle wave over `index mod wobble_period`, from 0 up to `amplitude` and back
    pub fn wobble(&self, index: u32) -> i64 {
        let phase = index % self.wobble_period;
        let half = self.wobble_period / 2;
        let rise = if phase <= half { phase } else { self.wobble_period - phase };
        self.amplitude * i64::from(rise) / i64::from(half)
    }

    /// Positions of both points at frame `index`
    pub fn positions(&self, index: u32) -> [Point; 2] {
        let travel = self.step * i64::from(index);
        let wobble = self.wobble(index);
        [
            Point::saturating(
                i64::from(self.start_a.x) + travel,
                i64::from(self.start_a.y) + wobble,
            ),
            Point::saturating(
                i64::from(self.start_b.x) - travel,
                i64::from(self.start_b.y) - wobble,
            ),
        ]
    }
}

impl Iterator for OpposingMotion {
    type Item = ScheduledFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.frames {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let frame = Frame::new(
            wrap_frame_number(index.into()),
            self.reserved,
            self.positions(index).to_vec(),
        );
        Some(ScheduledFrame::new(frame, self.delay))
    }
}

impl FrameSource for OpposingMotion {
    fn pattern(&self) -> Pattern {
        Pattern::Opposing
    }

    fn total_frames(&self) -> Option<u64> {
        Some(self.frames.into())
    }
}
