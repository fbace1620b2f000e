//! Frame generation patterns
//!
//! Each pattern is a small state machine over a frame index that yields
//! [`ScheduledFrame`]s: the frame to send and how long to wait afterwards.
//! Together they cover the input space a decoder has to handle:
//!
//! | Pattern | Points per frame | Length |
//! |---------|------------------|--------|
//! | [`Pattern::Examples`] | 1, 2 (documentation vectors) | 2 frames |
//! | [`Pattern::Sweep`] | 1 | 50 frames |
//! | [`Pattern::Circle`] | 1 | 360 frames |
//! | [`Pattern::Opposing`] | 2 | 100 frames |
//! | [`Pattern::Random`] | 1-5 | 50 frames |
//! | [`Pattern::Stream`] | 1-3 | unbounded, frame numbers wrap |
//! | [`Pattern::EdgeCases`] | 0, extremes, many | 8 frames, wraps 65535 -> 0 |
//!
//! Generators never fail: every coordinate is computed in wide integers and
//! saturated into the 16-bit wire range.

mod circle;
mod opposing;
mod random;
mod scripted;
mod sweep;

pub use circle::CircleMotion;
pub use opposing::OpposingMotion;
pub use random::RandomPoints;
pub use scripted::ScriptedFrames;
pub use sweep::LinearSweep;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::EmulatorConfig;
use crate::types::ScheduledFrame;
use crate::{EmulatorError, Result};

/// Trait for frame generators
///
/// Sources are plain iterators; pacing, encoding and delivery happen
/// downstream so a source can be driven synchronously in tests.
pub trait FrameSource: Iterator<Item = ScheduledFrame> + Send {
    /// Pattern this source implements
    fn pattern(&self) -> Pattern;

    /// Total frames this source yields, or `None` if it only ends on cancellation
    fn total_frames(&self) -> Option<u64>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn pattern(&self) -> Pattern {
        (**self).pattern()
    }

    fn total_frames(&self) -> Option<u64> {
        (**self).total_frames()
    }
}

/// Selectable generation pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// Literal packets from the protocol documentation
    Examples,
    /// One point moving diagonally
    Sweep,
    /// One point circling a center
    Circle,
    /// Two points crossing in opposite directions
    Opposing,
    /// Bounded run of random point clouds
    Random,
    /// Unbounded random stream with wrapping frame numbers
    Stream,
    /// Zero points, coordinate extremes, many points and frame wraparound
    EdgeCases,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Examples,
        Pattern::Sweep,
        Pattern::Circle,
        Pattern::Opposing,
        Pattern::Random,
        Pattern::Stream,
        Pattern::EdgeCases,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Examples => "examples",
            Pattern::Sweep => "sweep",
            Pattern::Circle => "circle",
            Pattern::Opposing => "opposing",
            Pattern::Random => "random",
            Pattern::Stream => "stream",
            Pattern::EdgeCases => "edge-cases",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Pattern::Examples => "Protocol documentation examples",
            Pattern::Sweep => "Single point sweeping diagonally",
            Pattern::Circle => "Single point (circle pattern)",
            Pattern::Opposing => "Two points (opposite movement)",
            Pattern::Random => "Random multi-point",
            Pattern::Stream => "Continuous random stream",
            Pattern::EdgeCases => "Boundary values and frame wraparound",
        }
    }

    /// Legacy menu number of the reference sender, where one exists
    pub fn menu_number(self) -> Option<u8> {
        match self {
            Pattern::Examples => Some(1),
            Pattern::Circle => Some(2),
            Pattern::Opposing => Some(3),
            Pattern::Random => Some(4),
            Pattern::Stream => Some(5),
            Pattern::Sweep | Pattern::EdgeCases => None,
        }
    }

    /// Whether this pattern only ends when cancelled
    pub fn is_unbounded(self) -> bool {
        matches!(self, Pattern::Stream)
    }

    /// Patterns that run to completion, in conformance order
    pub fn bounded() -> impl Iterator<Item = Pattern> {
        Self::ALL.into_iter().filter(|p| !p.is_unbounded())
    }

    /// Build a generator for this pattern.
    ///
    /// `rng` drives the random patterns; the others ignore it.
    pub fn source<R>(self, config: &EmulatorConfig, rng: R) -> Box<dyn FrameSource>
    where
        R: Rng + Send + 'static,
    {
        let reserved = config.reserved;
        match self {
            Pattern::Examples => Box::new(ScriptedFrames::documentation_examples(&config.examples)),
            Pattern::Sweep => Box::new(LinearSweep::new(&config.sweep, reserved)),
            Pattern::Circle => Box::new(CircleMotion::new(&config.circle, reserved)),
            Pattern::Opposing => Box::new(OpposingMotion::new(&config.opposing, reserved)),
            Pattern::Random => {
                Box::new(RandomPoints::bounded(&config.random, config.canvas, reserved, rng))
            }
            Pattern::Stream => {
                Box::new(RandomPoints::unbounded(&config.stream, config.canvas, reserved, rng))
            }
            Pattern::EdgeCases => {
                Box::new(ScriptedFrames::edge_cases(&config.edge_cases, reserved))
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = EmulatorError;

    /// Accepts pattern names (case-insensitive, `_` or `-`) and legacy menu numbers
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| {
                p.name() == normalized
                    || p.menu_number().is_some_and(|n| n.to_string() == normalized)
            })
            .ok_or_else(|| EmulatorError::UnknownPattern { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn parses_names_and_menu_numbers() {
        assert_eq!("circle".parse::<Pattern>().unwrap(), Pattern::Circle);
        assert_eq!("EDGE_CASES".parse::<Pattern>().unwrap(), Pattern::EdgeCases);
        assert_eq!("1".parse::<Pattern>().unwrap(), Pattern::Examples);
        assert_eq!("5".parse::<Pattern>().unwrap(), Pattern::Stream);
    }

    #[test]
    fn rejects_unknown_selectors() {
        for input in ["6", "spiral", ""] {
            let err = input.parse::<Pattern>().unwrap_err();
            assert!(matches!(err, EmulatorError::UnknownPattern { .. }));
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for pattern in Pattern::ALL {
            assert_eq!(pattern.to_string().parse::<Pattern>().unwrap(), pattern);
        }
    }

    #[test]
    fn only_stream_is_unbounded() {
        let config = EmulatorConfig::default();
        for pattern in Pattern::ALL {
            let source = pattern.source(&config, ChaCha8Rng::seed_from_u64(1));
            assert_eq!(source.pattern(), pattern);
            assert_eq!(source.total_frames().is_none(), pattern.is_unbounded());
        }
        assert_eq!(Pattern::bounded().count(), Pattern::ALL.len() - 1);
    }

    #[test]
    fn bounded_sources_yield_their_declared_length() {
        let config = EmulatorConfig::default();
        for pattern in Pattern::bounded() {
            let source = pattern.source(&config, ChaCha8Rng::seed_from_u64(9));
            let expected = source.total_frames().unwrap();
            assert_eq!(source.count() as u64, expected, "{pattern}");
        }
    }

    #[test]
    fn generated_frames_always_encode() {
        let config = EmulatorConfig::default();
        for pattern in Pattern::ALL {
            let source = pattern.source(&config, ChaCha8Rng::seed_from_u64(3));
            for scheduled in source.take(400) {
                let packet = scheduled.frame.encode().unwrap();
                assert_eq!(packet.len(), 6 + 4 * scheduled.frame.point_count());
            }
        }
    }
}
