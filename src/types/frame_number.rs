//! Wrapping frame sequence numbers

/// Reduce any counter value into the 16-bit frame number space.
pub fn wrap_frame_number(value: u64) -> u16 {
    (value % 0x1_0000) as u16
}

/// Compare frame numbers in u16 space with wraparound using half-range rule.
/// Returns true if `a` is considered newer than `b`.
pub fn frame_after(a: u16, b: u16) -> bool {
    if a == b {
        return false;
    }
    a.wrapping_sub(b) < 0x8000
}

/// Per-pattern frame counter that wraps modulo 65536
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCounter {
    next: u16,
}

impl FrameCounter {
    pub fn starting_at(start: u16) -> Self {
        Self { next: start }
    }

    /// Take the current frame number and move to the next, wrapping past 65535
    pub fn advance(&mut self) -> u16 {
        let current = self.next;
        self.next = self.next.wrapping_add(1);
        current
    }
}
