//! Point coordinates reported within a frame

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EmulatorError, Result};

/// A reported (x, y) position.
///
/// Both axes are unsigned 16-bit on the wire. Screen-space ranges such as
/// 1920x1080 are a convention of the producing pattern, not of the protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    /// Create a point from in-range coordinates
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Create a point from wider integers, refusing coordinates above 16 bits
    pub fn try_new(x: u32, y: u32) -> Result<Self> {
        let x = u16::try_from(x)
            .map_err(|_| EmulatorError::invalid_argument("x", x.into(), u16::MAX.into()))?;
        let y = u16::try_from(y)
            .map_err(|_| EmulatorError::invalid_argument("y", y.into(), u16::MAX.into()))?;
        Ok(Self { x, y })
    }

    /// Create a point from computed coordinates, saturating into the wire range
    pub fn saturating(x: i64, y: i64) -> Self {
        Self { x: saturate_u16(x), y: saturate_u16(y) }
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

fn saturate_u16(value: i64) -> u16 {
    value.clamp(0, i64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_full_range() {
        assert_eq!(Point::try_new(0, 0).unwrap(), Point::new(0, 0));
        assert_eq!(Point::try_new(65_535, 65_535).unwrap(), Point::new(u16::MAX, u16::MAX));
    }

    #[test]
    fn try_new_rejects_wide_coordinates() {
        let err = Point::try_new(65_536, 5).unwrap_err();
        assert!(matches!(err, EmulatorError::InvalidArgument { field: "x", value: 65_536, .. }));

        let err = Point::try_new(5, 100_000).unwrap_err();
        assert!(matches!(err, EmulatorError::InvalidArgument { field: "y", value: 100_000, .. }));
    }

    #[test]
    fn saturating_clamps_both_ends() {
        assert_eq!(Point::saturating(-40, 70_000), Point::new(0, u16::MAX));
        assert_eq!(Point::saturating(285, 5), Point::new(285, 5));
    }

    #[test]
    fn display_matches_log_format() {
        assert_eq!(Point::new(245, 5).to_string(), "(245,5)");
    }
}
