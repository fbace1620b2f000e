//! Core types for sensor frame representation.
//!
//! ## Architecture
//!
//! - [`Point`] is one reported (x, y) position in 16-bit wire coordinates
//! - [`Frame`] is a frame number, the reserved field and an ordered point list
//! - [`ScheduledFrame`] pairs a frame with the pause its pattern wants after it
//! - [`FrameCounter`] produces frame numbers that wrap modulo 65536
//!
//! ## Usage Example
//!
//! ```rust
//! use led_sensor_sim::types::{DEFAULT_RESERVED, Frame, Point};
//!
//! let frame = Frame::new(0x5586, DEFAULT_RESERVED, vec![Point::new(285, 5)]);
//! let packet = frame.encode().unwrap();
//! assert_eq!(packet, [0x86, 0x55, 0x01, 0x00, 0x01, 0x00, 0x1D, 0x01, 0x05, 0x00]);
//! ```

mod frame;
mod frame_number;
mod point;

pub use frame::{DEFAULT_RESERVED, Frame, ScheduledFrame};
pub use frame_number::{FrameCounter, frame_after, wrap_frame_number};
pub use point::Point;

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    prop_compose! {
        fn arb_point()(x in any::<u16>(), y in any::<u16>()) -> Point {
            Point::new(x, y)
        }
    }

    proptest! {
        #[test]
        fn prop_encoded_len_tracks_point_count(
            frame_number in any::<u16>(),
            points in prop::collection::vec(arb_point(), 0..64)
        ) {
            let frame = Frame::new(frame_number, DEFAULT_RESERVED, points);
            prop_assert_eq!(frame.encoded_len(), 6 + 4 * frame.point_count());
            prop_assert_eq!(frame.encode().unwrap().len(), frame.encoded_len());
        }

        #[test]
        fn prop_frame_after_is_antisymmetric(a in any::<u16>(), b in any::<u16>()) {
            prop_assume!(a != b && a.wrapping_sub(b) != 0x8000);
            prop_assert_ne!(frame_after(a, b), frame_after(b, a));
        }
    }
}
