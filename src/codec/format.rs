//! Binary layout encoding and parsing

use tracing::trace;

use crate::types::{Frame, Point};
use crate::{EmulatorError, Result};

/// Fixed header: frame number, reserved field, point count
pub const HEADER_SIZE: usize = 6;

/// One point record: x then y
pub const POINT_SIZE: usize = 4;

/// Largest payload a single IPv4 UDP datagram can carry
pub const MAX_UDP_PAYLOAD: usize = 65_507;

/// Largest point count whose packet still fits in one UDP datagram
pub const MAX_DATAGRAM_POINTS: usize = (MAX_UDP_PAYLOAD - HEADER_SIZE) / POINT_SIZE;

/// Encoded size of a frame carrying `point_count` points
pub const fn encoded_len(point_count: usize) -> usize {
    HEADER_SIZE + POINT_SIZE * point_count
}

/// Encode a frame from raw header values.
///
/// `frame_number` and `reserved` must already be reduced into 16 bits by the
/// caller; larger values are refused rather than truncated.
pub fn encode(frame_number: u32, reserved: u32, points: &[Point]) -> Result<Vec<u8>> {
    let frame_number = checked_u16("frame_number", frame_number.into())?;
    let reserved = checked_u16("reserved", reserved.into())?;
    let point_count = checked_u16("point_count", points.len() as u64)?;

    let mut packet = Vec::with_capacity(encoded_len(points.len()));
    write_packet(&mut packet, frame_number, reserved, point_count, points);
    Ok(packet)
}

/// Encode a frame into `buffer`, replacing its contents.
///
/// Lets a sender reuse one allocation across frames.
pub fn encode_into(frame: &Frame, buffer: &mut Vec<u8>) -> Result<()> {
    let point_count = checked_u16("point_count", frame.points.len() as u64)?;

    buffer.clear();
    buffer.reserve(encoded_len(frame.points.len()));
    write_packet(buffer, frame.frame_number, frame.reserved, point_count, &frame.points);
    Ok(())
}

/// Parse a packet back into a frame.
///
/// The byte length must match the header's point count exactly.
pub fn decode(packet: &[u8]) -> Result<Frame> {
    if packet.len() < HEADER_SIZE {
        return Err(EmulatorError::decode(
            "Packet header",
            format!("need {} bytes, have {}", HEADER_SIZE, packet.len()),
        ));
    }

    let frame_number = parse_u16_le(packet, 0)?;
    let reserved = parse_u16_le(packet, 2)?;
    let point_count = parse_u16_le(packet, 4)? as usize;

    let expected = encoded_len(point_count);
    if packet.len() != expected {
        return Err(EmulatorError::decode(
            "Packet body",
            format!(
                "header declares {} points ({} bytes), packet has {} bytes",
                point_count,
                expected,
                packet.len()
            ),
        ));
    }

    let mut points = Vec::with_capacity(point_count);
    for i in 0..point_count {
        let offset = HEADER_SIZE + POINT_SIZE * i;
        points.push(Point::new(parse_u16_le(packet, offset)?, parse_u16_le(packet, offset + 2)?));
    }

    trace!("Decoded frame {}: {} points", frame_number, point_count);

    Ok(Frame { frame_number, reserved, points })
}

fn write_packet(
    buffer: &mut Vec<u8>,
    frame_number: u16,
    reserved: u16,
    point_count: u16,
    points: &[Point],
) {
    buffer.extend_from_slice(&frame_number.to_le_bytes());
    buffer.extend_from_slice(&reserved.to_le_bytes());
    buffer.extend_from_slice(&point_count.to_le_bytes());
    for point in points {
        buffer.extend_from_slice(&point.x.to_le_bytes());
        buffer.extend_from_slice(&point.y.to_le_bytes());
    }
}

fn checked_u16(field: &'static str, value: u64) -> Result<u16> {
    u16::try_from(value)
        .map_err(|_| EmulatorError::invalid_argument(field, value, u16::MAX.into()))
}

fn parse_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    if offset + 2 > data.len() {
        return Err(EmulatorError::decode(
            "Integer parsing",
            format!(
                "Insufficient data for u16 at offset {} (need 2 bytes, have {})",
                offset,
                data.len().saturating_sub(offset)
            ),
        ));
    }
    Ok(u16::from_le_bytes([data[offset], data[offset + 1]]))
}
