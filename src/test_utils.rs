//! Test utilities: scripted sources and misbehaving transports
//!
//! Shared by the unit tests of the driver and the facade.

#![cfg(test)]

use std::io;
use std::net::SocketAddr;

use crate::config::EmulatorConfig;
use crate::pattern::{FrameSource, Pattern};
use crate::transport::Transport;
use crate::transports::MemoryTransport;
use crate::types::ScheduledFrame;
use crate::{EmulatorError, Result};

/// Default configuration with every pacing delay set to zero
pub fn unpaced_config() -> EmulatorConfig {
    let mut config = EmulatorConfig::default();
    config.examples.interval_ms = 0;
    config.sweep.interval_ms = 0;
    config.circle.interval_ms = 0;
    config.circle.pause_ms = 0;
    config.opposing.interval_ms = 0;
    config.random.interval_ms = 0;
    config.stream.interval_ms = 0;
    config.edge_cases.interval_ms = 0;
    config
}

/// Source yielding a fixed list of frames, for driving edge cases directly
pub struct VecSource {
    frames: std::vec::IntoIter<ScheduledFrame>,
    total: u64,
}

impl VecSource {
    pub fn new(frames: Vec<ScheduledFrame>) -> Self {
        let total = frames.len() as u64;
        Self { frames: frames.into_iter(), total }
    }
}

impl Iterator for VecSource {
    type Item = ScheduledFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.next()
    }
}

impl FrameSource for VecSource {
    fn pattern(&self) -> Pattern {
        Pattern::EdgeCases
    }

    fn total_frames(&self) -> Option<u64> {
        Some(self.total)
    }
}

/// Transport that fails every `n`th send (the 2nd, 4th, ... for `n == 2`)
pub struct FlakyTransport {
    every: u64,
    attempts: u64,
    delivered: MemoryTransport,
}

impl FlakyTransport {
    pub fn failing_every(every: u64) -> Self {
        Self { every, attempts: 0, delivered: MemoryTransport::new() }
    }

    /// Packets that were sent successfully
    pub fn delivered(&self) -> &MemoryTransport {
        &self.delivered
    }
}

#[async_trait::async_trait]
impl Transport for FlakyTransport {
    async fn send(&mut self, packet: &[u8]) -> Result<usize> {
        self.attempts += 1;
        if self.attempts % self.every == 0 {
            let target: SocketAddr = ([127, 0, 0, 1], 25000).into();
            return Err(EmulatorError::transport(
                target,
                io::Error::new(io::ErrorKind::ConnectionRefused, "injected failure"),
            ));
        }
        self.delivered.send(packet).await
    }

    fn describe(&self) -> String {
        format!("flaky(every {})", self.every)
    }
}

/// Transport whose sends never complete
pub struct StallingTransport;

#[async_trait::async_trait]
impl Transport for StallingTransport {
    async fn send(&mut self, _packet: &[u8]) -> Result<usize> {
        std::future::pending().await
    }

    fn describe(&self) -> String {
        "stalled".to_string()
    }
}
