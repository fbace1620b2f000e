//! Fixed frame tables

use std::time::Duration;
use std::vec;
use tracing::debug;

use super::{FrameSource, Pattern};
use crate::config::{EdgeCaseConfig, ExamplesConfig};
use crate::types::{DEFAULT_RESERVED, Frame, Point, ScheduledFrame};

/// Frames from the protocol documentation:
/// `86 55 01 00 01 00 1D 01 05 00` and
/// `CA 56 01 00 02 00 F5 00 05 00 FF 00 0F 00`
const DOCUMENTATION_FRAMES: [(u16, &[(u16, u16)]); 2] =
    [(0x5586, &[(285, 5)]), (0x56CA, &[(245, 5), (255, 15)])];

/// A pre-built sequence of frames emitted in order at a fixed interval
pub struct ScriptedFrames {
    pattern: Pattern,
    frames: vec::IntoIter<Frame>,
    total: u64,
    delay: Duration,
}

impl ScriptedFrames {
    fn new(pattern: Pattern, frames: Vec<Frame>, delay: Duration) -> Self {
        debug!("{} pattern: {} scripted frames", pattern, frames.len());
        let total = frames.len() as u64;
        Self { pattern, frames: frames.into_iter(), total, delay }
    }

    /// The literal documentation examples, reserved field included
    pub fn documentation_examples(config: &ExamplesConfig) -> Self {
        let frames = DOCUMENTATION_FRAMES
            .iter()
            .map(|(frame_number, points)| {
                Frame::new(
                    *frame_number,
                    DEFAULT_RESERVED,
                    points.iter().copied().map(Point::from).collect(),
                )
            })
            .collect();
        Self::new(Pattern::Examples, frames, config.interval())
    }

    /// Boundary frames: empty, extreme coordinates, a large frame, and
    /// frame numbers crossing 65535 -> 0
    pub fn edge_cases(config: &EdgeCaseConfig, reserved: u16) -> Self {
        let max = u16::MAX;
        let center = Point::new(960, 540);
        let frames = vec![
            Frame::new(0, reserved, Vec::new()),
            Frame::new(1, reserved, vec![Point::new(0, 0)]),
            Frame::new(2, reserved, vec![Point::new(max, max)]),
            Frame::new(3, reserved, vec![Point::new(0, max), Point::new(max, 0)]),
            Frame::new(4, reserved, diagonal(config.many_points)),
            Frame::new(max - 1, reserved, vec![center]),
            Frame::new(max, reserved, vec![center]),
            Frame::new(0, reserved, vec![center]),
        ];
        Self::new(Pattern::EdgeCases, frames, config.interval())
    }
}

/// `count` points spread evenly along the anti-diagonal of the full 16-bit range
fn diagonal(count: usize) -> Vec<Point> {
    let last = count.saturating_sub(1).max(1) as u64;
    (0..count as u64)
        .map(|i| {
            let x = i * u64::from(u16::MAX) / last;
            Point::saturating(x as i64, i64::from(u16::MAX) - x as i64)
        })
        .collect()
}

impl Iterator for ScriptedFrames {
    type Item = ScheduledFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.next().map(|frame| ScheduledFrame::new(frame, self.delay))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl FrameSource for ScriptedFrames {
    fn pattern(&self) -> Pattern {
        self.pattern
    }

    fn total_frames(&self) -> Option<u64> {
        Some(self.total)
    }
}
