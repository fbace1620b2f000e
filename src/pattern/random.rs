//! Random point clouds

use rand::Rng;
use std::time::Duration;
use tracing::debug;

use super::{FrameSource, Pattern};
use crate::config::{Canvas, RandomConfig, StreamConfig};
use crate::types::{Frame, FrameCounter, Point, ScheduledFrame};

/// Independent random frames: each tick draws a point count in
/// `[min_points, max_points]` and coordinates uniformly over the canvas.
///
/// The random source is injected so seeded runs are reproducible.
pub struct RandomPoints<R> {
    rng: R,
    canvas: Canvas,
    min_points: usize,
    max_points: usize,
    counter: FrameCounter,
    remaining: Option<u64>,
    limit: Option<u64>,
    reserved: u16,
    delay: Duration,
    pattern: Pattern,
}

impl<R: Rng> RandomPoints<R> {
    /// Fixed-length run with frame numbers starting at 0
    pub fn bounded(config: &RandomConfig, canvas: Canvas, reserved: u16, rng: R) -> Self {
        let frames = u64::from(config.frames);
        debug!(
            "Random pattern: {} frames, {}-{} points",
            frames, config.min_points, config.max_points
        );
        Self {
            rng,
            canvas,
            min_points: config.min_points,
            max_points: config.max_points.max(config.min_points),
            counter: FrameCounter::starting_at(0),
            remaining: Some(frames),
            limit: Some(frames),
            reserved,
            delay: config.interval(),
            pattern: Pattern::Random,
        }
    }

    /// Endless stream; frame numbers wrap modulo 65536
    pub fn unbounded(config: &StreamConfig, canvas: Canvas, reserved: u16, rng: R) -> Self {
        debug!(
            "Stream pattern: starting at frame {}, {}-{} points",
            config.start_frame, config.min_points, config.max_points
        );
        Self {
            rng,
            canvas,
            min_points: config.min_points,
            max_points: config.max_points.max(config.min_points),
            counter: FrameCounter::starting_at(config.start_frame),
            remaining: None,
            limit: None,
            reserved,
            delay: config.interval(),
            pattern: Pattern::Stream,
        }
    }

    fn draw_points(&mut self) -> Vec<Point> {
        let count = self.rng.gen_range(self.min_points..=self.max_points);
        let (width, height) = (self.canvas.width, self.canvas.height);
        let rng = &mut self.rng;
        (0..count)
            .map(|_| Point::new(rng.gen_range(0..=width), rng.gen_range(0..=height)))
            .collect()
    }
}

impl<R: Rng> Iterator for RandomPoints<R> {
    type Item = ScheduledFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let points = self.draw_points();
        let frame = Frame::new(self.counter.advance(), self.reserved, points);
        Some(ScheduledFrame::new(frame, self.delay))
    }
}

impl<R: Rng + Send> FrameSource for RandomPoints<R> {
    fn pattern(&self) -> Pattern {
        self.pattern
    }

    fn total_frames(&self) -> Option<u64> {
        self.limit
    }
}
