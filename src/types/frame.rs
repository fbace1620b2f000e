//! Frame types for the packet pipeline

use std::time::Duration;

use super::Point;
use crate::Result;
use crate::codec;

/// Reserved ("ignore") field value emitted by the reference sensor
pub const DEFAULT_RESERVED: u16 = 0x0001;

/// One emitted unit of protocol data
///
/// This is the fundamental data unit that flows through the system: built
/// fresh by a pattern on every tick, serialized, sent and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Wrapping 16-bit sequence number
    pub frame_number: u16,

    /// Compatibility field, echoed unchanged
    pub reserved: u16,

    /// Reported points, in wire order
    pub points: Vec<Point>,
}

impl Frame {
    /// Create a new frame
    pub fn new(frame_number: u16, reserved: u16, points: Vec<Point>) -> Self {
        Self { frame_number, reserved, points }
    }

    /// Number of points carried by this frame
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Size of this frame once encoded
    pub fn encoded_len(&self) -> usize {
        codec::encoded_len(self.points.len())
    }

    /// Serialize into a freshly allocated packet
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut packet = Vec::with_capacity(self.encoded_len());
        codec::encode_into(self, &mut packet)?;
        Ok(packet)
    }
}

/// A frame together with the pause a pattern wants after emitting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFrame {
    pub frame: Frame,
    pub delay: Duration,
}

impl ScheduledFrame {
    pub fn new(frame: Frame, delay: Duration) -> Self {
        Self { frame, delay }
    }
}
