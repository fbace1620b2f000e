//! Packet codec for the LED interactive position protocol
//!
//! ## Packet Structure
//!
//! Every packet is a 6-byte header followed by one 4-byte record per point.
//! All fields are little-endian `u16`:
//!
//! ```text
//! offset  size  field
//! 0       2     frame_number
//! 2       2     reserved ("ignore")
//! 4       2     point_count
//! 6+4i    2     point[i].x
//! 8+4i    2     point[i].y
//! ```
//!
//! A packet is therefore always `6 + 4 * point_count` bytes. Zero points is a
//! valid 6-byte packet.

mod format;
mod hex;

pub use format::{
    HEADER_SIZE, MAX_DATAGRAM_POINTS, MAX_UDP_PAYLOAD, POINT_SIZE, decode, encode, encode_into,
    encoded_len,
};
pub use hex::HexDump;
