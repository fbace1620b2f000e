//! Emulator configuration
//!
//! Settings are plain serde structs with defaults matching the reference
//! sensor sender, so an empty YAML document is a valid configuration:
//!
//! ```yaml
//! target:
//!   host: 192.168.1.50
//!   port: 25000
//! seed: 7
//! random:
//!   frames: 200
//!   max_points: 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::codec::MAX_DATAGRAM_POINTS;
use crate::types::{DEFAULT_RESERVED, Point};
use crate::{EmulatorError, Result};

/// Default receiver port of the LED interactive application
pub const DEFAULT_PORT: u16 = 25000;

/// Default receiver host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Playback speed bounds, as a multiplier on every pattern delay
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 10.0;

/// Clamp a speed multiplier into `MIN_SPEED..=MAX_SPEED`; NaN falls back to 1.0
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() { 1.0 } else { speed.clamp(MIN_SPEED, MAX_SPEED) }
}

/// Top-level emulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    pub target: TargetConfig,
    /// Seed for random patterns; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Value written to every frame's reserved field
    pub reserved: u16,
    /// Pacing multiplier (2.0 = twice as fast)
    pub speed: f64,
    pub canvas: Canvas,
    pub examples: ExamplesConfig,
    pub sweep: SweepConfig,
    pub circle: CircleConfig,
    pub opposing: OpposingConfig,
    pub random: RandomConfig,
    pub stream: StreamConfig,
    pub edge_cases: EdgeCaseConfig,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            seed: None,
            reserved: DEFAULT_RESERVED,
            speed: 1.0,
            canvas: Canvas::default(),
            examples: ExamplesConfig::default(),
            sweep: SweepConfig::default(),
            circle: CircleConfig::default(),
            opposing: OpposingConfig::default(),
            random: RandomConfig::default(),
            stream: StreamConfig::default(),
            edge_cases: EdgeCaseConfig::default(),
        }
    }
}

impl EmulatorConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| EmulatorError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(EmulatorError::config(format!(
                "speed must be a positive number, got {}",
                self.speed
            )));
        }
        if self.circle.period == 0 {
            return Err(EmulatorError::config("circle.period must be at least 1 frame"));
        }
        if self.opposing.wobble_period < 2 {
            return Err(EmulatorError::config("opposing.wobble_period must be at least 2 frames"));
        }
        check_point_bounds("random", self.random.min_points, self.random.max_points)?;
        check_point_bounds("stream", self.stream.min_points, self.stream.max_points)?;
        if self.edge_cases.many_points > MAX_DATAGRAM_POINTS {
            return Err(EmulatorError::config(format!(
                "edge_cases.many_points must not exceed {}",
                MAX_DATAGRAM_POINTS
            )));
        }
        Ok(())
    }

    /// Speed clamped into the supported range
    pub fn effective_speed(&self) -> f64 {
        clamp_speed(self.speed)
    }
}

fn check_point_bounds(section: &str, min: usize, max: usize) -> Result<()> {
    if min > max {
        return Err(EmulatorError::config(format!(
            "{section}.min_points ({min}) is greater than {section}.max_points ({max})"
        )));
    }
    if max > MAX_DATAGRAM_POINTS {
        return Err(EmulatorError::config(format!(
            "{section}.max_points must not exceed {MAX_DATAGRAM_POINTS}"
        )));
    }
    Ok(())
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Receiver address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub host: String,
    pub port: u16,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.to_string(), port: DEFAULT_PORT }
    }
}

/// Coordinate space random patterns draw from (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: u16,
    pub height: u16,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamplesConfig {
    pub interval_ms: u64,
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl ExamplesConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }
}

/// Single point moving along a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub frames: u32,
    pub start: Point,
    pub step_x: i32,
    pub step_y: i32,
    pub interval_ms: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { frames: 50, start: Point::new(100, 200), step_x: 10, step_y: 5, interval_ms: 100 }
    }
}

impl SweepConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }
}

/// Single point circling a center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    pub frames: u32,
    pub center: Point,
    pub radius: u16,
    /// Frames per revolution
    pub period: u32,
    pub interval_ms: u64,
    /// Extra pause after every `pause_every` frames; 0 disables it
    pub pause_every: u32,
    pub pause_ms: u64,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            frames: 360,
            center: Point::new(500, 500),
            radius: 200,
            period: 180,
            interval_ms: 50,
            pause_every: 90,
            pause_ms: 500,
        }
    }
}

impl CircleConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }

    pub fn pause(&self) -> Duration {
        millis(self.pause_ms)
    }
}

/// Two points crossing in opposite directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpposingConfig {
    pub frames: u32,
    pub start_a: Point,
    pub start_b: Point,
    /// Horizontal movement per frame
    pub step: u16,
    /// Peak vertical offset of the triangle wave
    pub wobble_amplitude: u16,
    pub wobble_period: u32,
    pub interval_ms: u64,
}

impl Default for OpposingConfig {
    fn default() -> Self {
        Self {
            frames: 100,
            start_a: Point::new(100, 200),
            start_b: Point::new(900, 600),
            step: 8,
            wobble_amplitude: 50,
            wobble_period: 20,
            interval_ms: 50,
        }
    }
}

impl OpposingConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }
}

/// Bounded run of random point clouds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub frames: u32,
    pub min_points: usize,
    pub max_points: usize,
    pub interval_ms: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self { frames: 50, min_points: 1, max_points: 5, interval_ms: 100 }
    }
}

impl RandomConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }
}

/// Unbounded random stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub min_points: usize,
    pub max_points: usize,
    /// First frame number; set near 65535 to exercise wraparound early
    pub start_frame: u16,
    pub interval_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { min_points: 1, max_points: 3, start_frame: 0, interval_ms: 33 }
    }
}

impl StreamConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }
}

/// Boundary values a decoder must survive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeCaseConfig {
    /// Point count of the largest frame
    pub many_points: usize,
    pub interval_ms: u64,
}

impl Default for EdgeCaseConfig {
    fn default() -> Self {
        Self { many_points: 256, interval_ms: 100 }
    }
}

impl EdgeCaseConfig {
    pub fn interval(&self) -> Duration {
        millis(self.interval_ms)
    }
}
