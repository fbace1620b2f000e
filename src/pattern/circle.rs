//! Single point on a circular path

use std::f64::consts::TAU;
use std::time::Duration;

use super::{FrameSource, Pattern};
use crate::config::CircleConfig;
use crate::types::{Frame, Point, ScheduledFrame, wrap_frame_number};

/// One point orbiting `center` once every `period` frames
///
/// The trajectory is periodic: `position_at(i + period) == position_at(i)`.
pub struct CircleMotion {
    center: Point,
    radius: f64,
    period: u32,
    frames: u32,
    index: u32,
    reserved: u16,
    interval: Duration,
    pause_every: u32,
    pause: Duration,
}

impl CircleMotion {
    pub fn new(config: &CircleConfig, reserved: u16) -> Self {
        Self {
            center: config.center,
            radius: config.radius.into(),
            period: config.period.max(1),
            frames: config.frames,
            index: 0,
            reserved,
            interval: config.interval(),
            pause_every: config.pause_every,
            pause: config.pause(),
        }
    }

    /// Position at frame `index`
    pub fn position_at(&self, index: u32) -> Point {
        let angle = TAU * f64::from(index % self.period) / f64::from(self.period);
        let x = f64::from(self.center.x) + self.radius * angle.cos();
        let y = f64::from(self.center.y) + self.radius * angle.sin();
        Point::saturating(x.round() as i64, y.round() as i64)
    }

    fn delay_after(&self, index: u32) -> Duration {
        if self.pause_every > 0 && index % self.pause_every == self.pause_every - 1 {
            self.interval + self.pause
        } else {
            self.interval
        }
    }
}

impl Iterator for CircleMotion {
    type Item = ScheduledFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.frames {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let point = self.position_at(index);
        let frame = Frame::new(wrap_frame_number(index.into()), self.reserved, vec![point]);
        Some(ScheduledFrame::new(frame, self.delay_after(index)))
    }
}

impl FrameSource for CircleMotion {
    fn pattern(&self) -> Pattern {
        Pattern::Circle
    }

    fn total_frames(&self) -> Option<u64> {
        Some(self.frames.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn distance(a: Point, b: Point) -> f64 {
        let dx = f64::from(a.x) - f64::from(b.x);
        let dy = f64::from(a.y) - f64::from(b.y);
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn returns_to_start_after_full_period() {
        let config = CircleConfig::default();
        let points: Vec<Point> =
            CircleMotion::new(&config, 1).map(|s| s.frame.points[0]).collect();

        assert_eq!(points.len(), 360);
        let period = config.period as usize;
        assert!(distance(points[0], points[period]) <= 1.0);
        assert_eq!(points[0], Point::new(700, 500));
    }

    #[test]
    fn stays_on_the_circle() {
        let config = CircleConfig::default();
        for scheduled in CircleMotion::new(&config, 1) {
            let r = distance(scheduled.frame.points[0], config.center);
            assert!((r - f64::from(config.radius)).abs() <= 1.0, "radius {r}");
        }
    }

    #[test]
    fn pauses_after_each_quarter() {
        let config = CircleConfig::default();
        let delays: Vec<Duration> = CircleMotion::new(&config, 1).map(|s| s.delay).collect();

        assert_eq!(delays[0], Duration::from_millis(50));
        assert_eq!(delays[89], Duration::from_millis(550));
        assert_eq!(delays[90], Duration::from_millis(50));
        assert_eq!(delays.iter().filter(|d| **d > Duration::from_millis(50)).count(), 4);
    }

    #[test]
    fn frame_numbers_follow_index() {
        let numbers: Vec<u16> = CircleMotion::new(&CircleConfig::default(), 1)
            .map(|s| s.frame.frame_number)
            .collect();
        assert_eq!(numbers, (0..360).collect::<Vec<u16>>());
    }

    proptest! {
        #[test]
        fn prop_periodic_for_any_geometry(
            cx in any::<u16>(),
            cy in any::<u16>(),
            radius in 0u16..2000,
            period in 1u32..720,
            index in 0u32..10_000
        ) {
            let config = CircleConfig {
                center: Point::new(cx, cy),
                radius,
                period,
                ..CircleConfig::default()
            };
            let motion = CircleMotion::new(&config, 1);
            prop_assert_eq!(motion.position_at(index), motion.position_at(index + period));
        }
    }
}
